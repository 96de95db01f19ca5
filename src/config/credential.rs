//! API credential resolution.
//!
//! The credential never lives in a config file. A missing credential is a
//! startup failure, not a per-request condition.

use crate::error::AppError;

/// Environment variables checked for the API key, in order.
pub const API_KEY_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

/// Resolve the API key through `lookup` (normally `std::env::var`).
pub fn resolve_api_key<F>(lookup: F) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    API_KEY_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .ok_or_else(|| AppError::MissingCredential(API_KEY_VARS[0].to_string()))
}
