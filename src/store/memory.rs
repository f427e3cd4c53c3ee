//! In-memory entity store backing the app
//!
//! Rows live behind a shared handle so list views and form sessions see the
//! same data. Uniqueness constraints are enforced here so the save path has
//! a realistic failure mode.

use super::traits::EntityStore;
use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Identity and constraint hooks an entity must provide to be stored
pub trait StoredEntity: Clone + Send + Sync {
    /// The id under which the entity is stored, if already assigned
    fn id(&self) -> Option<u32>;

    /// The same entity carrying the given id
    fn with_id(self, id: u32) -> Self;

    /// Key used to order `find_all` results
    fn sort_key(&self) -> String;

    /// Value that must be unique across stored rows, if any
    fn unique_key(&self) -> Option<String>;

    /// Message reported when `unique_key` collides with another row
    fn conflict_message(&self) -> String;
}

struct StoreInner<E> {
    rows: BTreeMap<u32, E>,
    next_id: u32,
}

impl<E> Default for StoreInner<E> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// Cloneable handle to a shared in-memory row set
pub struct MemoryStore<E> {
    inner: Arc<Mutex<StoreInner<E>>>,
}

impl<E> Clone for MemoryStore<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> Default for MemoryStore<E> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner::default())),
        }
    }
}

impl<E: StoredEntity> MemoryStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the given rows; rows without ids get sequential ones
    pub fn with_rows(rows: impl IntoIterator<Item = E>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.lock();
            for row in rows {
                let id = row.id().unwrap_or(inner.next_id);
                inner.rows.insert(id, row.with_id(id));
                inner.next_id = inner.next_id.max(id + 1);
            }
        }
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreInner<E>> {
        // a poisoned lock means another thread panicked mid-write; the data
        // is plain rows, so continue with whatever is there
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.lock().rows.is_empty()
    }
}

#[async_trait]
impl<E: StoredEntity + 'static> EntityStore<E> for MemoryStore<E> {
    async fn save_or_update(&mut self, entity: E) -> Result<E> {
        let mut inner = self.lock();

        if let Some(key) = entity.unique_key() {
            let conflict = inner.rows.iter().any(|(id, row)| {
                row.unique_key() == Some(key.clone()) && Some(*id) != entity.id()
            });
            if conflict {
                bail!(entity.conflict_message());
            }
        }

        let id = match entity.id() {
            Some(id) => id,
            None => inner.next_id,
        };
        let stored = entity.with_id(id);
        inner.rows.insert(id, stored.clone());
        inner.next_id = inner.next_id.max(id + 1);
        Ok(stored)
    }

    async fn find_all(&mut self) -> Result<Vec<E>> {
        let inner = self.lock();
        let mut rows: Vec<E> = inner.rows.values().cloned().collect();
        rows.sort_by(|a, b| {
            a.sort_key()
                .cmp(&b.sort_key())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(rows)
    }

    async fn delete(&mut self, id: u32) -> Result<()> {
        let mut inner = self.lock();
        if inner.rows.remove(&id).is_none() {
            bail!("no record with id {id}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Department, Seller};
    use chrono::NaiveDate;
    use tokio_test::block_on;

    fn department(name: &str) -> Department {
        Department {
            id: None,
            name: name.to_string(),
        }
    }

    fn seller(name: &str, email: &str) -> Seller {
        Seller {
            id: None,
            name: name.to_string(),
            email: email.to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 15).unwrap(),
            base_salary: 2500.0,
            department_id: None,
        }
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let mut store = MemoryStore::new();
        let first = block_on(store.save_or_update(department("Books"))).unwrap();
        let second = block_on(store.save_or_update(department("Music"))).unwrap();
        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
    }

    #[test]
    fn test_explicit_id_is_honored() {
        let mut store = MemoryStore::new();
        let saved = block_on(store.save_or_update(Department {
            id: Some(0),
            name: "Books".to_string(),
        }))
        .unwrap();
        assert_eq!(saved.id, Some(0));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_replaces_row_with_same_id() {
        let mut store = MemoryStore::new();
        let saved = block_on(store.save_or_update(department("Books"))).unwrap();
        let renamed = Department {
            name: "Book Store".to_string(),
            ..saved
        };
        block_on(store.save_or_update(renamed.clone())).unwrap();

        let rows = block_on(store.find_all()).unwrap();
        assert_eq!(rows, vec![renamed]);
    }

    #[test]
    fn test_duplicate_department_name_is_rejected() {
        let mut store = MemoryStore::new();
        block_on(store.save_or_update(department("Books"))).unwrap();
        let err = block_on(store.save_or_update(department("books"))).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_does_not_conflict_with_itself() {
        let mut store = MemoryStore::new();
        let saved = block_on(store.save_or_update(department("Books"))).unwrap();
        assert!(block_on(store.save_or_update(saved)).is_ok());
    }

    #[test]
    fn test_duplicate_seller_email_is_rejected() {
        let mut store = MemoryStore::new();
        block_on(store.save_or_update(seller("Bob Brown", "bob@gmail.com"))).unwrap();
        let err =
            block_on(store.save_or_update(seller("Robert Brown", "BOB@gmail.com"))).unwrap_err();
        assert!(err.to_string().contains("bob@gmail.com"));
    }

    #[test]
    fn test_find_all_orders_by_name_case_insensitive() {
        let mut store = MemoryStore::new();
        for name in ["fashion", "Books", "Electronics"] {
            block_on(store.save_or_update(department(name))).unwrap();
        }
        let names: Vec<String> = block_on(store.find_all())
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["Books", "Electronics", "fashion"]);
    }

    #[test]
    fn test_delete_removes_row() {
        let mut store = MemoryStore::new();
        let saved = block_on(store.save_or_update(department("Books"))).unwrap();
        block_on(store.delete(saved.id.unwrap())).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_unknown_id_fails() {
        let mut store = MemoryStore::<Department>::new();
        let err = block_on(store.delete(42)).unwrap_err();
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_with_rows_continues_id_sequence() {
        let mut store = MemoryStore::with_rows([
            Department {
                id: Some(3),
                name: "Books".to_string(),
            },
            department("Music"),
        ]);
        let saved = block_on(store.save_or_update(department("Games"))).unwrap();
        assert_eq!(saved.id, Some(5));
    }

    #[test]
    fn test_clones_share_rows() {
        let mut store = MemoryStore::new();
        let mut handle = store.clone();
        block_on(handle.save_or_update(department("Books"))).unwrap();
        assert_eq!(block_on(store.find_all()).unwrap().len(), 1);
    }
}
