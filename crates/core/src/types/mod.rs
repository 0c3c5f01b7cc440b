//! Core types for ViralCopy.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod client;
pub mod email;
pub mod id;
pub mod identity;
pub mod project;
pub mod role;
pub mod status;

pub use client::Client;
pub use email::{Email, EmailError};
pub use id::*;
pub use identity::{AvatarRef, AvatarRefError, Identity, ProfileUpdate};
pub use project::Project;
pub use role::{Role, RoleParseError};
pub use status::*;
