//! Trait abstraction for entity stores to enable mocking in tests

use anyhow::Result;
use async_trait::async_trait;

/// Trait for persistence operations on one entity kind, enabling mocking
/// in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntityStore<E: Send + Sync + 'static>: Send + Sync {
    /// Insert the entity when it carries no known id, update the stored
    /// row otherwise. Returns the stored row (with its assigned id).
    async fn save_or_update(&mut self, entity: E) -> Result<E>;

    /// All stored entities, ordered by name
    async fn find_all(&mut self) -> Result<Vec<E>>;

    /// Remove the entity with the given id
    async fn delete(&mut self, id: u32) -> Result<()>;
}
