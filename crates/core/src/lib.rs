//! Kostpanel Core - Shared types library.
//!
//! This crate provides common types used across all Kostpanel components:
//! - `portal` - The kost web application (tenant and admin surfaces)
//! - `cli` - Command-line tools for seeding and tenant management
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no storage access. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, status enums, prices, the facility-list wire
//!   codec, the password policy, and the domain entities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
