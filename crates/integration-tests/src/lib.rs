//! Integration tests for Kostpanel.
//!
//! The suites under `tests/` drive the real portal router in-process via
//! `tower::ServiceExt::oneshot`, with a `wiremock::MockServer` standing in
//! for the kost backend. No TCP listener and no real backend are involved.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p kostpanel-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `session_reconciler` - cookie/blob precedence and route guarding
//! - `auth_flow` - login/logout cookie effects
//! - `admin_dashboard` - aggregate fetch and the fallback dataset
