//! Core domain entities.
//!
//! The service has a single entity, [`LinkRecord`], plus the retention
//! constants that decide when a record stops being resolvable.

pub mod link;

pub use link::{LINK_TTL_DAYS, LinkRecord, link_ttl};
