//! Data Transfer Objects for API requests and responses.
//!
//! Request and response bodies use camelCase field names on the wire.

pub mod health;
pub mod link;
pub mod shorten;
