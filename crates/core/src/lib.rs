//! Packdesk Core - Shared types library.
//!
//! This crate provides common types used across all Packdesk components:
//! - `backoffice` - Internal back-office service (quotes, artwork, orders, campaigns)
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails, plus the status
//!   state machines for quotes, artwork files, and orders

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
