//! Request-scoped model types.

pub mod session;

pub use session::{AuthSnapshot, CurrentSession, PersistedUser, VerifiedIdentity};
