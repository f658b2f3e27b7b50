//! Error types for ec2-find-asg.

use std::time::Duration;

use thiserror::Error;

/// Errors that terminate a find invocation.
#[derive(Error, Debug)]
pub enum FindAsgError {
    #[error("[{0}] AWS credentials error: {1}")]
    Authentication(String, String),

    #[error("[{0}] {1}")]
    Connectivity(String, String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Failed to serialize result: {0}")]
    Output(#[from] serde_json::Error),
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, FindAsgError>;

/// Message fragments (lowercased) that indicate a credentials problem.
const CREDENTIAL_MARKERS: &[&str] = &[
    "no credentials",
    "credentials not found",
    "invalid credentials",
    "failed to load credentials",
    "expired token",
    "expiredtoken",
    "the security token included in the request is invalid",
    "the security token included in the request is expired",
    "unrecognized client",
    "invalidclienttokenid",
    "signaturedoesnotmatch",
    "access denied",
    "accessdenied",
    "not authorized",
];

/// Message fragments (lowercased) that indicate no region was resolved.
const REGION_MARKERS: &[&str] = &["no region", "region not found", "missing region"];

impl FindAsgError {
    /// Classify a provider failure by its error code and message.
    ///
    /// The message is kept verbatim; only the variant is chosen from it.
    pub fn classify(component: &str, code: Option<&str>, message: impl Into<String>) -> Self {
        let message = message.into();
        let haystack = format!("{} {}", code.unwrap_or_default(), message).to_lowercase();

        if CREDENTIAL_MARKERS.iter().any(|m| haystack.contains(m)) {
            return FindAsgError::Authentication(component.to_string(), message);
        }

        if REGION_MARKERS.iter().any(|m| haystack.contains(m)) {
            return FindAsgError::Configuration(format!(
                "AWS region not configured ({}): {}",
                component, message
            ));
        }

        FindAsgError::Connectivity(component.to_string(), message)
    }

    /// Deadline exceeded while waiting on the provider.
    pub fn timeout(component: &str, limit: Duration) -> Self {
        FindAsgError::Connectivity(
            component.to_string(),
            format!("request did not complete within {:?}", limit),
        )
    }

    /// Shorthand for a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        FindAsgError::Configuration(msg.into())
    }
}
