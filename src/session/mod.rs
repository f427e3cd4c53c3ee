//! Entity form sessions: the edit-validate-save workflow
//!
//! This module is presentation-independent. Forms hand a session raw
//! key→string field values; the session validates, persists through an
//! injected [`crate::store::EntityStore`], and notifies subscribers on
//! success.

mod fields;
mod form_session;
mod validation;

pub use fields::*;
pub use form_session::*;
pub use validation::*;
