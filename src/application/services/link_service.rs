//! Link creation and detail retrieval service.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use super::{DEFAULT_STORE_TIMEOUT, bounded};
use crate::domain::entities::LinkRecord;
use crate::domain::repositories::{LinkStore, StoreError};
use crate::error::{AppError, URL_REQUIRED_MESSAGE};
use crate::utils::code_generator::generate_identifier;
use crate::utils::url_normalizer::normalize_destination;

/// Maximum identifiers tried before a creation gives up.
pub const MAX_CREATE_ATTEMPTS: usize = 5;

/// Result of a successful creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedLink {
    pub identifier: String,
    pub short_link: String,
}

/// Service for creating short links and reading their details.
///
/// Collisions between generated identifiers are detected by the store on
/// insert and retried with a fresh identifier.
pub struct LinkService<S: LinkStore + ?Sized> {
    store: Arc<S>,
    base_url: String,
    store_timeout: Duration,
}

impl<S: LinkStore + ?Sized> LinkService<S> {
    /// Creates a new link service.
    ///
    /// `base_url` is the public address short links are composed from.
    pub fn new(store: Arc<S>, base_url: impl Into<String>) -> Self {
        Self {
            store,
            base_url: base_url.into(),
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Overrides the bound applied to each store call.
    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    /// Creates a short link for `raw_url`.
    ///
    /// The destination is normalized before it is stored, so a later
    /// resolution returns exactly the normalized form.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is empty.
    ///
    /// Returns [`AppError::Internal`] if the random source fails, the store
    /// fails or times out, or every attempt hit an existing identifier.
    pub async fn create_short_link(&self, raw_url: &str) -> Result<CreatedLink, AppError> {
        if raw_url.trim().is_empty() {
            return Err(AppError::bad_request(URL_REQUIRED_MESSAGE));
        }

        let destination = normalize_destination(raw_url);

        for attempt in 1..=MAX_CREATE_ATTEMPTS {
            let identifier = generate_identifier().map_err(|e| {
                error!("Random source failure while generating identifier: {}", e);
                AppError::internal(format!("identifier generation failed: {e}"))
            })?;

            // A timeout does not undo a write the backend already committed.
            match bounded(
                self.store_timeout,
                self.store.insert(&identifier, &destination),
            )
            .await
            {
                Ok(record) => {
                    info!(identifier = %record.identifier, "Short link created");
                    return Ok(CreatedLink {
                        short_link: self.short_link_for(&record.identifier),
                        identifier: record.identifier,
                    });
                }
                Err(StoreError::DuplicateIdentifier(taken)) => {
                    warn!(
                        attempt,
                        identifier = %taken,
                        "Generated identifier already in use, retrying"
                    );
                }
                Err(e) => {
                    error!("Failed to persist short link: {}", e);
                    return Err(e.into());
                }
            }
        }

        error!(
            attempts = MAX_CREATE_ATTEMPTS,
            "Giving up on short link creation after repeated identifier collisions"
        );
        Err(AppError::internal("Failed to generate unique identifier"))
    }

    /// Retrieves a live record without affecting its click count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the identifier is absent or expired.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn get_link_details(&self, identifier: &str) -> Result<LinkRecord, AppError> {
        let found = bounded(self.store_timeout, self.store.find_by_id(identifier))
            .await
            .inspect_err(|e| error!("Failed to read link {}: {}", identifier, e))?;

        found
            .map(|mut record| {
                record.destination = normalize_destination(&record.destination);
                record
            })
            .ok_or_else(|| AppError::not_found("URL not found"))
    }

    /// Constructs the full short link from the configured base address.
    pub fn short_link_for(&self, identifier: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), identifier)
    }
}
