//! Business logic services for the dashboard.
//!
//! # Services
//!
//! - `auth` - Account directory: sign-in, sign-up, profile updates
//! - `catalog` - Static AI tool and strategy template catalogs
//! - `data` - Projects, clients, and analytics

pub mod auth;
pub mod catalog;
pub mod data;

pub use auth::{AuthError, MockAuthService};
pub use data::{DataError, MockDataService, NewProject, ProjectUpdate};
