//! DTOs for link details endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::LinkRecord;

/// A live link as seen by its owner.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDetailsResponse {
    pub destination: String,
    pub identifier: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<LinkRecord> for LinkDetailsResponse {
    fn from(record: LinkRecord) -> Self {
        Self {
            destination: record.destination,
            identifier: record.identifier,
            click_count: record.click_count,
            created_at: record.created_at,
        }
    }
}
