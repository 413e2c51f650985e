//! Repository trait definitions for the domain layer.
//!
//! Concrete stores live in `crate::infrastructure::persistence`; mocks are
//! generated with `mockall` for unit tests.

pub mod link_store;

pub use link_store::{LinkStore, StoreError};

#[cfg(test)]
pub use link_store::MockLinkStore;
