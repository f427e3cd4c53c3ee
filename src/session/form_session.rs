//! Edit-validate-save workflow for a single entity

use super::fields::FieldValues;
use super::validation::ValidationErrors;
use crate::store::EntityStore;
use thiserror::Error;

/// Entity kinds editable through a [`FormSession`]
///
/// Implementors supply their required-field list and the two conversions
/// between the entity and its raw string representation. `to_fields` applies
/// display formatting (two-decimal salaries, `dd/MM/yyyy` dates);
/// `from_fields` parses the same formats back, accumulating one error per
/// failing field.
pub trait FormEntity: Clone + Send + Sync + 'static {
    /// Field names that must be non-blank for a submit to succeed
    fn required_fields() -> &'static [&'static str];

    /// Build a draft from raw field values
    fn from_fields(fields: &FieldValues) -> Result<Self, ValidationErrors>;

    /// Render the entity back into raw field values
    fn to_fields(&self) -> FieldValues;
}

/// Failure modes of a form session
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session was used before its collaborators were wired up, or
    /// after it closed. Signals a caller bug, not user input.
    #[error("invalid session state: {0}")]
    InvalidState(&'static str),

    /// One or more fields failed validation; the session stays open so the
    /// user can correct and resubmit
    #[error("validation failed for {} field(s)", .0.len())]
    ValidationFailed(ValidationErrors),

    /// The store rejected the draft; the session stays open and the draft
    /// is discarded
    #[error("error saving object: {0}")]
    PersistenceFailed(String),
}

type ChangeListener = Box<dyn FnMut() + Send>;

/// Stateful workflow coordinating one entity's edit-validate-save cycle
///
/// A session is bound once (to an existing entity for editing, or to
/// nothing for creation), given a store, and then driven with raw field
/// values. A successful submit or a cancel closes the session; submits are
/// strictly sequential and a closed session rejects further use.
pub struct FormSession<E: FormEntity> {
    entity: Option<E>,
    bound: bool,
    store: Option<Box<dyn EntityStore<E>>>,
    listeners: Vec<ChangeListener>,
    closed: bool,
}

impl<E: FormEntity> FormSession<E> {
    pub fn new() -> Self {
        Self {
            entity: None,
            bound: false,
            store: None,
            listeners: Vec::new(),
            closed: false,
        }
    }

    /// Attach an existing entity for editing, or none for creation
    pub fn bind(&mut self, entity: Option<E>) -> Result<(), SessionError> {
        if self.bound {
            return Err(SessionError::InvalidState("session already bound"));
        }
        self.entity = entity;
        self.bound = true;
        Ok(())
    }

    /// Inject the store used by `submit`
    pub fn set_store(&mut self, store: Box<dyn EntityStore<E>>) {
        self.store = Some(store);
    }

    /// Register a callback invoked once after each successful save
    ///
    /// Listeners fire synchronously, in subscription order, with no payload.
    pub fn subscribe(&mut self, listener: impl FnMut() + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// The currently bound entity, if any
    pub fn entity(&self) -> Option<&E> {
        self.entity.as_ref()
    }

    #[allow(dead_code)]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Return the session to unbound and open, discarding the bound entity
    ///
    /// The store and listeners stay wired so the session can be rebound.
    #[allow(dead_code)]
    pub fn reset(&mut self) {
        self.entity = None;
        self.bound = false;
        self.closed = false;
    }

    /// Copy the bound entity's fields into raw, display-formatted values
    pub fn populate_fields(&self) -> Result<FieldValues, SessionError> {
        self.entity
            .as_ref()
            .map(FormEntity::to_fields)
            .ok_or(SessionError::InvalidState("no entity bound"))
    }

    /// Validate the raw values, persist the draft, and notify listeners
    ///
    /// On validation or persistence failure the draft is discarded and the
    /// session stays open. On success the bound entity is replaced by the
    /// stored row, every listener fires in order, and the session closes.
    pub async fn submit(&mut self, fields: &FieldValues) -> Result<E, SessionError> {
        if !self.bound {
            return Err(SessionError::InvalidState("session not bound"));
        }
        if self.closed {
            return Err(SessionError::InvalidState("session already closed"));
        }
        let store = self
            .store
            .as_mut()
            .ok_or(SessionError::InvalidState("no store injected"))?;

        let draft = E::from_fields(fields).map_err(SessionError::ValidationFailed)?;

        let saved = store
            .save_or_update(draft)
            .await
            .map_err(|e| SessionError::PersistenceFailed(e.to_string()))?;

        self.entity = Some(saved.clone());
        for listener in &mut self.listeners {
            listener();
        }
        self.closed = true;
        Ok(saved)
    }

    /// Close the session without validation or persistence side effects
    pub fn cancel(&mut self) {
        self.closed = true;
    }
}

impl<E: FormEntity> Default for FormSession<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::validation::REQUIRED_MESSAGE;
    use crate::state::{Department, Seller};
    use crate::store::MockEntityStore;
    use chrono::NaiveDate;
    use std::sync::{Arc, Mutex};

    fn test_seller() -> Seller {
        Seller {
            id: Some(1),
            name: "Bob Brown".to_string(),
            email: "bob@gmail.com".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1998, 4, 21).unwrap(),
            base_salary: 1000.0,
            department_id: Some(1),
        }
    }

    /// Session with a bound target and an echoing store
    fn open_session(entity: Option<Department>) -> FormSession<Department> {
        let mut store = MockEntityStore::<Department>::new();
        store.expect_save_or_update().returning(Ok);
        let mut session = FormSession::new();
        session.bind(entity).unwrap();
        session.set_store(Box::new(store));
        session
    }

    mod binding {
        use super::*;

        #[test]
        fn test_bind_twice_is_invalid_state() {
            let mut session = FormSession::<Department>::new();
            session.bind(None).unwrap();
            let err = session.bind(None).unwrap_err();
            assert!(matches!(err, SessionError::InvalidState(_)));
        }

        #[test]
        fn test_rebind_after_reset() {
            let mut session = FormSession::<Department>::new();
            session.bind(None).unwrap();
            session.reset();
            assert!(session.bind(None).is_ok());
        }

        #[tokio::test]
        async fn test_submit_without_bind_is_invalid_state() {
            let mut session = FormSession::<Department>::new();
            session.set_store(Box::new(MockEntityStore::<Department>::new()));
            let fields = FieldValues::new().with("name", "Books");
            let err = session.submit(&fields).await.unwrap_err();
            assert!(matches!(err, SessionError::InvalidState(_)));
        }

        #[tokio::test]
        async fn test_submit_without_store_is_invalid_state() {
            let mut session = FormSession::<Department>::new();
            session.bind(None).unwrap();
            let fields = FieldValues::new().with("name", "Books");
            let err = session.submit(&fields).await.unwrap_err();
            assert!(matches!(err, SessionError::InvalidState(_)));
        }
    }

    mod validation {
        use super::*;

        #[tokio::test]
        async fn test_blank_required_field_fails_without_persisting() {
            let mut store = MockEntityStore::<Department>::new();
            store.expect_save_or_update().never();
            let mut session = FormSession::new();
            session.bind(None).unwrap();
            session.set_store(Box::new(store));

            let fields = FieldValues::new().with("name", "");
            let err = session.submit(&fields).await.unwrap_err();
            match err {
                SessionError::ValidationFailed(errors) => {
                    assert_eq!(errors.len(), 1);
                    assert_eq!(errors.get("name"), Some(REQUIRED_MESSAGE));
                }
                other => panic!("expected ValidationFailed, got {other:?}"),
            }
            assert!(!session.is_closed());
        }

        #[tokio::test]
        async fn test_error_set_has_exactly_the_blank_fields() {
            let mut store = MockEntityStore::<Seller>::new();
            store.expect_save_or_update().never();
            let mut session = FormSession::new();
            session.bind(None).unwrap();
            session.set_store(Box::new(store));

            let fields = FieldValues::new()
                .with("name", "  ")
                .with("email", "bob@gmail.com")
                .with("birth_date", "")
                .with("base_salary", "1000.00");
            let err = session.submit(&fields).await.unwrap_err();
            match err {
                SessionError::ValidationFailed(errors) => {
                    let fields: Vec<_> = errors.fields().collect();
                    assert_eq!(fields, vec!["birth_date", "name"]);
                }
                other => panic!("expected ValidationFailed, got {other:?}"),
            }
        }

        #[tokio::test]
        async fn test_listeners_not_notified_on_validation_failure() {
            let calls = Arc::new(Mutex::new(0u32));
            let counter = Arc::clone(&calls);

            let mut store = MockEntityStore::<Department>::new();
            store.expect_save_or_update().never();
            let mut session = FormSession::new();
            session.bind(None).unwrap();
            session.set_store(Box::new(store));
            session.subscribe(move || *counter.lock().unwrap() += 1);

            let fields = FieldValues::new().with("name", " ");
            assert!(session.submit(&fields).await.is_err());
            assert_eq!(*calls.lock().unwrap(), 0);
        }
    }

    mod commit {
        use super::*;

        #[tokio::test]
        async fn test_create_commits_draft_and_closes() {
            let mut session = open_session(None);
            let fields = FieldValues::new().with("id", "0").with("name", "Books");
            let saved = session.submit(&fields).await.unwrap();
            assert_eq!(saved.id, Some(0));
            assert_eq!(saved.name, "Books");
            assert_eq!(session.entity(), Some(&saved));
            assert!(session.is_closed());
        }

        #[tokio::test]
        async fn test_listeners_fire_once_each_in_subscription_order() {
            let order = Arc::new(Mutex::new(Vec::new()));

            let mut session = open_session(None);
            for tag in [1, 2, 3] {
                let order = Arc::clone(&order);
                session.subscribe(move || order.lock().unwrap().push(tag));
            }

            let fields = FieldValues::new().with("name", "Books");
            session.submit(&fields).await.unwrap();
            assert_eq!(*order.lock().unwrap(), vec![1, 2, 3]);
        }

        #[tokio::test]
        async fn test_closed_session_rejects_resubmit() {
            let mut session = open_session(None);
            let fields = FieldValues::new().with("name", "Books");
            session.submit(&fields).await.unwrap();
            let err = session.submit(&fields).await.unwrap_err();
            assert!(matches!(err, SessionError::InvalidState(_)));
        }

        #[tokio::test]
        async fn test_populate_then_submit_round_trips_the_entity() {
            let original = test_seller();
            let expected = original.clone();

            let mut store = MockEntityStore::<Seller>::new();
            store
                .expect_save_or_update()
                .times(1)
                .withf(move |draft| *draft == expected)
                .returning(Ok);

            let mut session = FormSession::new();
            session.bind(Some(original.clone())).unwrap();
            session.set_store(Box::new(store));

            let fields = session.populate_fields().unwrap();
            let saved = session.submit(&fields).await.unwrap();
            assert_eq!(saved, original);
        }
    }

    mod persistence_failure {
        use super::*;

        #[tokio::test]
        async fn test_store_error_surfaces_message_and_keeps_session_open() {
            let calls = Arc::new(Mutex::new(0u32));
            let counter = Arc::clone(&calls);

            let mut store = MockEntityStore::<Department>::new();
            store
                .expect_save_or_update()
                .times(1)
                .returning(|_| Err(anyhow::anyhow!("department 'Books' already exists")));
            store.expect_save_or_update().times(1).returning(Ok);

            let mut session = FormSession::new();
            session.bind(None).unwrap();
            session.set_store(Box::new(store));
            session.subscribe(move || *counter.lock().unwrap() += 1);

            let fields = FieldValues::new().with("name", "Books");
            let err = session.submit(&fields).await.unwrap_err();
            match err {
                SessionError::PersistenceFailed(msg) => {
                    assert!(msg.contains("already exists"));
                }
                other => panic!("expected PersistenceFailed, got {other:?}"),
            }
            assert_eq!(*calls.lock().unwrap(), 0);
            assert!(!session.is_closed());

            // the same session accepts a corrected resubmit
            session.submit(&fields).await.unwrap();
            assert_eq!(*calls.lock().unwrap(), 1);
        }
    }

    mod cancel {
        use super::*;

        #[tokio::test]
        async fn test_cancel_closes_without_side_effects() {
            let calls = Arc::new(Mutex::new(0u32));
            let counter = Arc::clone(&calls);

            let mut store = MockEntityStore::<Department>::new();
            store.expect_save_or_update().never();
            let mut session = FormSession::new();
            session.bind(None).unwrap();
            session.set_store(Box::new(store));
            session.subscribe(move || *counter.lock().unwrap() += 1);

            session.cancel();
            assert!(session.is_closed());
            assert_eq!(*calls.lock().unwrap(), 0);
        }
    }

    mod populate {
        use super::*;

        #[test]
        fn test_populate_without_entity_is_invalid_state() {
            let mut session = FormSession::<Seller>::new();
            session.bind(None).unwrap();
            let err = session.populate_fields().unwrap_err();
            assert!(matches!(err, SessionError::InvalidState(_)));
        }

        #[test]
        fn test_populate_applies_display_formatting() {
            let mut session = FormSession::new();
            session.bind(Some(test_seller())).unwrap();
            let fields = session.populate_fields().unwrap();
            assert_eq!(fields.get("base_salary"), Some("1000.00"));
            assert_eq!(fields.get("birth_date"), Some("21/04/1998"));
        }
    }
}
