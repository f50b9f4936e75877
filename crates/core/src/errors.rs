//! Error types shared by the console services.

use thiserror::Error;

/// Result type alias for console operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Structured error codes carried in the `message` of a GraphQL error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidFilter,
    DuplicateConfiguration,
    DuplicateSite,
    SameSite,
    InvalidHostname,
    InvalidPortRange,
    SiteInUse,
    Unknown(String),
}

impl ErrorCode {
    /// Parse a server error message into a code. Anything unrecognized is kept verbatim.
    pub fn parse(message: &str) -> Self {
        match message.trim() {
            "INVALID_FILTER" => Self::InvalidFilter,
            "DUPLICATE_CONFIGURATION" => Self::DuplicateConfiguration,
            "DUPLICATE_SITE" => Self::DuplicateSite,
            "SAME_SITE" => Self::SameSite,
            "INVALID_HOSTNAME" => Self::InvalidHostname,
            "INVALID_PORT_RANGE" => Self::InvalidPortRange,
            "SITE_IN_USE" => Self::SiteInUse,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::InvalidFilter => "INVALID_FILTER",
            Self::DuplicateConfiguration => "DUPLICATE_CONFIGURATION",
            Self::DuplicateSite => "DUPLICATE_SITE",
            Self::SameSite => "SAME_SITE",
            Self::InvalidHostname => "INVALID_HOSTNAME",
            Self::InvalidPortRange => "INVALID_PORT_RANGE",
            Self::SiteInUse => "SITE_IN_USE",
            Self::Unknown(code) => code,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by the console core.
#[derive(Debug, Error)]
pub enum Error {
    /// The hub rejected an operation with one or more structured codes
    #[error("Hub rejected the request: {}", format_codes(.codes))]
    Api { codes: Vec<ErrorCode> },

    /// The request never produced a usable response
    #[error("Transport error: {0}")]
    Transport(String),

    /// Local input validation failed before anything was sent
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The referenced entity is not in the local cache
    #[error("Not found: {0}")]
    NotFound(String),

    /// Local settings store failure
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn format_codes(codes: &[ErrorCode]) -> String {
    codes
        .iter()
        .map(ErrorCode::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Error {
    /// Build an API error from raw GraphQL error messages.
    pub fn from_messages<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Api {
            codes: messages
                .into_iter()
                .map(|m| ErrorCode::parse(m.as_ref()))
                .collect(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Structured codes, empty for non-API failures.
    pub fn codes(&self) -> &[ErrorCode] {
        match self {
            Self::Api { codes } => codes,
            _ => &[],
        }
    }

    pub fn has_code(&self, code: &ErrorCode) -> bool {
        self.codes().contains(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_parse() {
        assert_eq!(ErrorCode::parse("SITE_IN_USE"), ErrorCode::SiteInUse);
        assert_eq!(ErrorCode::parse("INVALID_FILTER"), ErrorCode::InvalidFilter);
        assert_eq!(
            ErrorCode::parse("INVALID_PORT_RANGE"),
            ErrorCode::InvalidPortRange
        );
    }

    #[test]
    fn unknown_code_is_kept_verbatim() {
        let code = ErrorCode::parse("SOMETHING_NEW");
        assert_eq!(code, ErrorCode::Unknown("SOMETHING_NEW".to_string()));
        assert_eq!(code.as_str(), "SOMETHING_NEW");
    }

    #[test]
    fn api_error_lists_codes() {
        let err = Error::from_messages(["DUPLICATE_SITE", "INVALID_HOSTNAME"]);
        assert!(err.has_code(&ErrorCode::DuplicateSite));
        assert!(err.has_code(&ErrorCode::InvalidHostname));
        assert_eq!(
            err.to_string(),
            "Hub rejected the request: DUPLICATE_SITE, INVALID_HOSTNAME"
        );
    }

    #[test]
    fn transport_error_has_no_codes() {
        let err = Error::Transport("connection refused".to_string());
        assert!(err.codes().is_empty());
    }
}
