//! Short identifier generation and shape checks.
//!
//! Identifiers are drawn from the OS random source and encoded as URL-safe
//! base64 without padding, giving 8 characters from `[A-Za-z0-9_-]`.

use base64::Engine as _;
use regex::Regex;
use std::sync::LazyLock;

/// Length of random bytes before base64 encoding.
const IDENTIFIER_LENGTH_BYTES: usize = 6;

/// Number of characters in a generated identifier.
pub const IDENTIFIER_LENGTH: usize = 8;

/// Identifiers accepted on lookup paths. Wider than what the generator
/// produces so records written with a different length stay reachable.
static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("identifier regex is valid"));

/// Generates a cryptographically secure random short identifier.
///
/// Uniqueness is not checked here; the store rejects duplicates on insert.
///
/// # Errors
///
/// Returns the underlying [`getrandom::Error`] if the system random number
/// generator fails.
///
/// # Examples
///
/// ```ignore
/// let id = generate_identifier()?;
/// assert_eq!(id.len(), 8);
/// ```
pub fn generate_identifier() -> Result<String, getrandom::Error> {
    let mut buffer = [0u8; IDENTIFIER_LENGTH_BYTES];

    getrandom::fill(&mut buffer)?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}

/// Returns true if `identifier` could have been produced by a link store.
///
/// Used to short-circuit lookups for paths like `favicon.ico`.
pub fn is_well_formed_identifier(identifier: &str) -> bool {
    IDENTIFIER_REGEX.is_match(identifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_identifier_has_correct_length() {
        let id = generate_identifier().unwrap();
        assert_eq!(id.len(), IDENTIFIER_LENGTH);
    }

    #[test]
    fn test_generate_identifier_url_safe_characters() {
        for _ in 0..100 {
            let id = generate_identifier().unwrap();
            assert!(
                id.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
                "unexpected character in {id}"
            );
        }
    }

    #[test]
    fn test_generate_identifier_no_padding() {
        let id = generate_identifier().unwrap();
        assert!(!id.contains('='));
    }

    #[test]
    fn test_generate_identifier_produces_unique_values() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_identifier().unwrap()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_generated_identifiers_are_well_formed() {
        let id = generate_identifier().unwrap();
        assert!(is_well_formed_identifier(&id));
    }

    #[test]
    fn test_well_formed_accepts_other_lengths() {
        assert!(is_well_formed_identifier("abc12345"));
        assert!(is_well_formed_identifier("doesnotexist"));
        assert!(is_well_formed_identifier("a"));
    }

    #[test]
    fn test_well_formed_rejects_bad_shapes() {
        assert!(!is_well_formed_identifier(""));
        assert!(!is_well_formed_identifier("favicon.ico"));
        assert!(!is_well_formed_identifier("with space"));
        assert!(!is_well_formed_identifier(&"a".repeat(65)));
    }
}
