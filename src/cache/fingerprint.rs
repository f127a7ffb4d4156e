//! Request fingerprinting for cache keys.
//!
//! A fingerprint is the first [`FINGERPRINT_LEN`] hex characters of a SHA-256
//! digest over the request fields in a fixed order. 64 bits keeps keys short;
//! collisions only become likely around 2^32 distinct requests, orders of
//! magnitude beyond any cache capacity this crate is used with.

use sha2::{Digest, Sha256};

use crate::search::SearchRequest;

/// Number of hex characters kept from the digest.
pub const FINGERPRINT_LEN: usize = 16;

/// Compute the cache key for a search request.
///
/// Fields are hashed in the order query, page, format, categories,
/// languages, safe search, time range. Strings and lists are length-prefixed
/// so that `["a,b"]` and `["a", "b"]` never share a digest.
pub fn fingerprint(request: &SearchRequest) -> String {
    let mut hasher = Sha256::new();

    update_str(&mut hasher, &request.query);
    hasher.update(request.page.to_le_bytes());
    update_str(&mut hasher, request.format.as_str());
    update_list(&mut hasher, &request.categories);
    update_list(&mut hasher, &request.languages);
    hasher.update([request.safe_search]);
    update_str(&mut hasher, &request.time_range);

    let mut key = hex::encode(hasher.finalize());
    key.truncate(FINGERPRINT_LEN);
    key
}

fn update_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

fn update_list(hasher: &mut Sha256, values: &[String]) {
    hasher.update((values.len() as u64).to_le_bytes());
    for value in values {
        update_str(hasher, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::OutputFormat;

    fn base() -> SearchRequest {
        SearchRequest {
            query: "rust lru cache".to_string(),
            page: 1,
            format: OutputFormat::Text,
            categories: vec!["general".to_string(), "it".to_string()],
            languages: vec!["en".to_string()],
            safe_search: 1,
            time_range: String::new(),
        }
    }

    #[test]
    fn test_fingerprint_stability() {
        let request = base();
        let first = fingerprint(&request);
        for _ in 0..10 {
            assert_eq!(fingerprint(&request), first);
        }
        assert_eq!(fingerprint(&request.clone()), first);
    }

    #[test]
    fn test_fingerprint_format() {
        let key = fingerprint(&base());
        assert_eq!(key.len(), FINGERPRINT_LEN);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_fingerprint_empty_request_is_not_empty() {
        let request = SearchRequest::new("");
        assert_eq!(fingerprint(&request).len(), FINGERPRINT_LEN);
    }

    #[test]
    fn test_fingerprint_each_field_matters() {
        let original = fingerprint(&base());

        let variants: Vec<(&str, SearchRequest)> = vec![
            ("query", SearchRequest { query: "rust lru".to_string(), ..base() }),
            ("page", SearchRequest { page: 2, ..base() }),
            ("format", SearchRequest { format: OutputFormat::Json, ..base() }),
            (
                "categories",
                SearchRequest { categories: vec!["general".to_string()], ..base() },
            ),
            (
                "languages",
                SearchRequest { languages: vec!["de".to_string()], ..base() },
            ),
            ("safe_search", SearchRequest { safe_search: 2, ..base() }),
            ("time_range", SearchRequest { time_range: "week".to_string(), ..base() }),
        ];

        for (field, variant) in variants {
            assert_ne!(fingerprint(&variant), original, "changing {} kept the key", field);
        }
    }

    #[test]
    fn test_fingerprint_list_boundaries() {
        let joined = SearchRequest {
            categories: vec!["general,it".to_string()],
            ..base()
        };
        let split = SearchRequest {
            categories: vec!["general".to_string(), "it".to_string()],
            ..base()
        };
        assert_ne!(fingerprint(&joined), fingerprint(&split));

        // Moving a value from categories to languages must not alias either
        let moved = SearchRequest {
            categories: vec!["general".to_string(), "it".to_string(), "en".to_string()],
            languages: vec![],
            ..base()
        };
        assert_ne!(fingerprint(&moved), fingerprint(&base()));
    }

    #[test]
    fn test_fingerprint_list_order_matters() {
        let reversed = SearchRequest {
            categories: vec!["it".to_string(), "general".to_string()],
            ..base()
        };
        assert_ne!(fingerprint(&reversed), fingerprint(&base()));
    }
}
