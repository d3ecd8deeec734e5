//! API key credential management
//!
//! The API key comes from the RDR_API_KEY environment variable (or the
//! equivalent CLI flag). Nothing is persisted.

use std::env;

pub const API_KEY_ENV_VAR: &str = "RDR_API_KEY";

/// Get the API key from environment variable
///
/// Returns the value of RDR_API_KEY if set and non-empty, otherwise None.
pub fn get_api_key() -> Option<String> {
    env::var(API_KEY_ENV_VAR).ok().filter(|k| !k.is_empty())
}

/// Check if an API key is configured
pub fn has_api_key() -> bool {
    get_api_key().is_some()
}

/// Mask an API key for display, keeping the first and last four characters
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "*****".to_string()
    }
}
