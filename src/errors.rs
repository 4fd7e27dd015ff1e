// errors.rs
use thiserror::Error;

/// Errors raised by the HTTP layer itself. A non-2xx status is *not* one of
/// these: it comes back as an ordinary `ApiResponse`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Could not encode request body: {0}")]
    Encode(String),
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

/// Malformed configuration. These abort before any request is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid base URL '{url}': {reason}")]
    BadBaseUrl { url: String, reason: String },
    #[error("Unsupported URL scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),
    #[error("Entry count must be at least 1")]
    ZeroCount,
    #[error("{0} must not be blank")]
    BlankCredential(&'static str),
}

/// Fatal generator failures. Everything else in a seeding run is logged and
/// skipped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SeedError {
    #[error("Username and secret are required to seed data")]
    MissingCredentials,
    #[error("Authentication rejected: {0}")]
    Unauthenticated(String),
    #[error("District reference data unavailable: {0}")]
    DistrictsUnavailable(String),
}
