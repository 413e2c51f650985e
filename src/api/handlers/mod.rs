//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one endpoint.

pub mod health;
pub mod link_details;
pub mod redirect;
pub mod shorten;

pub use health::health_handler;
pub use link_details::link_details_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
