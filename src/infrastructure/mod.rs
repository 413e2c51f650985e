//! Infrastructure layer for external integrations.
//!
//! This layer implements the [`LinkStore`](crate::domain::repositories::LinkStore)
//! contract defined by the domain layer against concrete backends.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL, Redis and in-memory link stores

pub mod persistence;
