//! ViralCopy Core - Shared types library.
//!
//! This crate provides common types used across all ViralCopy components:
//! - `dashboard` - The copy-generation dashboard (server-rendered)
//! - `cli` - Operator tools for inspecting sessions and routing
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Identities, roles, emails, ids, and the project/client records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
