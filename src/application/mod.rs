//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::LinkStore`] trait and
//! translate every store failure into an [`crate::error::AppError`] or a
//! fallback outcome.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation and detail reads
//! - [`services::resolution_service::ResolutionService`] - Lookup with click counting

pub mod services;
