//! Slug generation and custom slug validation.
//!
//! Generated slugs are six characters drawn uniformly from the 52-letter
//! mixed-case alphabet. They are not guaranteed unique; the link store's
//! unique constraint is the only authority on that.

use crate::error::AppError;
use rand::Rng;
use serde_json::json;

/// Length of a generated slug.
pub const SLUG_LENGTH: usize = 6;

/// Alphabet for generated slugs (`A-Z`, `a-z`).
pub const SLUG_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Maximum length of a caller-supplied slug.
pub const MAX_CUSTOM_SLUG_LENGTH: usize = 64;

/// Slugs that would shadow service routes.
const RESERVED_SLUGS: &[&str] = &["shorten", "stats", "health", "config", "api"];

/// Source of candidate slugs for allocation.
pub trait SlugGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Production generator backed by the thread-local CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSlugGenerator;

impl SlugGenerator for RandomSlugGenerator {
    fn generate(&self) -> String {
        generate_slug()
    }
}

/// Generates a random six-character slug.
///
/// # Examples
///
/// ```ignore
/// let slug = generate_slug();
/// assert_eq!(slug.len(), 6);
/// assert!(slug.chars().all(|c| c.is_ascii_alphabetic()));
/// ```
pub fn generate_slug() -> String {
    let mut rng = rand::rng();

    (0..SLUG_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..SLUG_ALPHABET.len());
            SLUG_ALPHABET[idx] as char
        })
        .collect()
}

/// Returns true for slugs that look like static asset requests (`favicon.ico`).
///
/// Redirect lookups skip these without touching the store.
pub fn is_asset_like(slug: &str) -> bool {
    slug.contains('.')
}

/// Validates a caller-supplied slug.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: ASCII letters, digits, `-` and `_`
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_slug(slug: &str) -> Result<(), AppError> {
    if slug.is_empty() || slug.len() > MAX_CUSTOM_SLUG_LENGTH {
        return Err(AppError::bad_request(
            format!("Slug must be 1-{} characters", MAX_CUSTOM_SLUG_LENGTH),
            json!({ "provided_length": slug.len() }),
        ));
    }

    if !slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            "Slug can only contain letters, digits, hyphens and underscores",
            json!({ "slug": slug }),
        ));
    }

    if RESERVED_SLUGS.contains(&slug) {
        return Err(AppError::bad_request(
            "This slug is reserved",
            json!({ "slug": slug }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_slug_has_fixed_length() {
        for _ in 0..100 {
            assert_eq!(generate_slug().len(), SLUG_LENGTH);
        }
    }

    #[test]
    fn test_generate_slug_uses_alphabet_only() {
        for _ in 0..100 {
            let slug = generate_slug();
            assert!(slug.bytes().all(|b| SLUG_ALPHABET.contains(&b)), "{slug}");
        }
    }

    #[test]
    fn test_alphabet_has_52_distinct_letters() {
        let distinct: HashSet<_> = SLUG_ALPHABET.iter().collect();
        assert_eq!(SLUG_ALPHABET.len(), 52);
        assert_eq!(distinct.len(), 52);
    }

    #[test]
    fn test_generate_slug_rarely_repeats() {
        let slugs: HashSet<String> = (0..1000).map(|_| generate_slug()).collect();
        assert!(slugs.len() >= 999);
    }

    #[test]
    fn test_random_generator_delegates() {
        let slug = RandomSlugGenerator.generate();
        assert_eq!(slug.len(), SLUG_LENGTH);
    }

    #[test]
    fn test_is_asset_like() {
        assert!(is_asset_like("favicon.ico"));
        assert!(is_asset_like("robots.txt"));
        assert!(!is_asset_like("AbCdEf"));
    }

    #[test]
    fn test_validate_accepts_common_slugs() {
        assert!(validate_custom_slug("promo").is_ok());
        assert!(validate_custom_slug("a").is_ok());
        assert!(validate_custom_slug("Spring_Sale-2025").is_ok());
        assert!(validate_custom_slug(&"x".repeat(MAX_CUSTOM_SLUG_LENGTH)).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_and_too_long() {
        assert!(validate_custom_slug("").is_err());

        let err = validate_custom_slug(&"x".repeat(MAX_CUSTOM_SLUG_LENGTH + 1)).unwrap_err();
        assert!(err.to_string().contains("1-64 characters"));
    }

    #[test]
    fn test_validate_rejects_dots_and_separators() {
        assert!(validate_custom_slug("file.txt").is_err());
        assert!(validate_custom_slug("a/b").is_err());
        assert!(validate_custom_slug("with space").is_err());
        assert!(validate_custom_slug("\u{fc}mlaut").is_err());
    }

    #[test]
    fn test_validate_rejects_reserved() {
        for &reserved in RESERVED_SLUGS {
            assert!(
                validate_custom_slug(reserved).is_err(),
                "Reserved slug '{}' should be invalid",
                reserved
            );
        }
    }
}
