//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::CreatedLink;

/// Request to shorten a single URL.
///
/// `url` is optional at the serde level so a missing field reaches
/// validation and gets the same message as an empty one.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(
        required(message = "URL is required"),
        length(min = 1, message = "URL is required")
    )]
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_link: String,
    pub identifier: String,
}

impl From<CreatedLink> for ShortenResponse {
    fn from(created: CreatedLink) -> Self {
        Self {
            short_link: created.short_link,
            identifier: created.identifier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_fails_validation() {
        let request: ShortenRequest = serde_json::from_str("{}").unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("url"));
    }

    #[test]
    fn test_empty_url_fails_validation() {
        let request: ShortenRequest = serde_json::from_str(r#"{"url": ""}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_response_uses_camel_case() {
        let response = ShortenResponse {
            short_link: "http://localhost:3000/abc12345".to_string(),
            identifier: "abc12345".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["shortLink"], "http://localhost:3000/abc12345");
        assert_eq!(json["identifier"], "abc12345");
    }
}
