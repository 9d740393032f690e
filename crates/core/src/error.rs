//! Error types for the SplitPay domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all SplitPay operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Fetch errors ---
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    // --- Rule loading ---
    #[error("Rule load error: {0}")]
    RuleLoad(#[from] RuleLoadError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failure to obtain the raw body of a rule document.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Network error fetching {location}: {reason}")]
    Network { location: String, reason: String },

    #[error("Unexpected HTTP status {status_code} for {location}")]
    Status { location: String, status_code: u16 },

    #[error("Failed to read {location}: {reason}")]
    Io { location: String, reason: String },

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Unsupported document location: {0}")]
    UnsupportedLocation(String),
}

/// Terminal failure to resolve a rule set.
///
/// Only raised once every per-tier document has failed *and* the legacy
/// combined document could not be used either.
#[derive(Debug, Clone, Error)]
pub enum RuleLoadError {
    #[error("legacy rules unavailable: {0}")]
    LegacyFetch(#[from] FetchError),

    #[error("legacy rules at {location} are malformed: {reason}")]
    LegacyParse { location: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_displays_correctly() {
        let err = Error::Fetch(FetchError::Status {
            location: "https://cdn.example.com/tier1.json".into(),
            status_code: 404,
        });
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("tier1.json"));
    }

    #[test]
    fn rule_load_error_wraps_fetch_error() {
        let err: RuleLoadError = FetchError::NotFound("rules.json".into()).into();
        assert!(matches!(err, RuleLoadError::LegacyFetch(_)));
        assert!(err.to_string().contains("rules.json"));

        let err = Error::RuleLoad(RuleLoadError::LegacyParse {
            location: "rules.json".into(),
            reason: "expected value at line 1".into(),
        });
        assert!(err.to_string().contains("malformed"));
    }
}
