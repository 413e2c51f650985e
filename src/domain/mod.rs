//! Domain layer containing the link record and the store contract.
//!
//! # Architecture
//!
//! - [`entities`] - The link record and its retention window
//! - [`repositories`] - The [`repositories::LinkStore`] trait and its error type
//! - [`expiry_worker`] - Background reclamation for stores without native TTL
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Business flows live in [`crate::application::services`].

pub mod entities;
pub mod expiry_worker;
pub mod repositories;
