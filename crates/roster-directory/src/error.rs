//! Error types for the directory subsystem.

use thiserror::Error;

/// Coarse classification of a [`DirectoryError`].
///
/// Callers use this to tell "the record is not there" apart from "the
/// directory could not be asked".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required parameter was missing; raised before any request.
    Configuration,
    /// The request could not be completed.
    Transport,
    /// The directory answered with something unusable.
    MalformedResponse,
    /// The search space was exhausted or an invariant was violated.
    NotFound,
}

/// Errors that can occur during directory operations.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// The configuration has no sort parameter
    #[error("sort parameter is not set on the configuration")]
    MissingSortKey,

    /// A parameter required by the operation is not set
    #[error("required parameter '{name}' is not set on the configuration")]
    MissingParameter {
        /// Parameter name
        name: String,
    },

    /// The request failed at the transport level or returned a non-success status
    #[error("request to {endpoint} failed: {message}")]
    RequestFailed {
        /// Endpoint that was requested
        endpoint: String,
        /// HTTP status, when a response was received
        status: Option<u16>,
        /// Error message
        message: String,
    },

    /// The first/last pagination links are missing or carry no page number
    #[error("malformed pagination links: {reason}")]
    MalformedPaginationLinks {
        /// What was wrong with the links
        reason: String,
    },

    /// The response body does not have the expected shape
    #[error("malformed directory response: {reason}")]
    MalformedResponse {
        /// What was wrong with the response
        reason: String,
    },

    /// The target is not present anywhere in the page range
    #[error("{key} = {target} is not in the directory (searched {fetches} pages)")]
    OutOfRange {
        /// Sort key searched on
        key: String,
        /// Rendered target value
        target: String,
        /// Page fetches spent before giving up
        fetches: u32,
    },

    /// The page bounds enclose the target but no record on the page matches it
    #[error("{key} = {target} should be on page {page} but is not")]
    RecordNotFoundOnExpectedPage {
        /// Sort key searched on
        key: String,
        /// Rendered target value
        target: String,
        /// Page whose bounds enclosed the target
        page: u32,
    },

    /// No member on the searched page belongs to an organization with this name
    #[error("no organization named '{name}' found on the first result page")]
    OrganizationNotFound {
        /// Organization name searched for
        name: String,
    },

    /// The query matched no usable member
    #[error("no member found for {query}")]
    MemberNotFound {
        /// Description of the query
        query: String,
    },

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DirectoryError {
    /// Classify the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingSortKey | Self::MissingParameter { .. } => ErrorKind::Configuration,
            Self::RequestFailed { .. } => ErrorKind::Transport,
            Self::MalformedPaginationLinks { .. }
            | Self::MalformedResponse { .. }
            | Self::Serialization(_) => ErrorKind::MalformedResponse,
            Self::OutOfRange { .. }
            | Self::RecordNotFoundOnExpectedPage { .. }
            | Self::OrganizationNotFound { .. }
            | Self::MemberNotFound { .. } => ErrorKind::NotFound,
        }
    }

    /// Whether the error means the directory was reachable but the record is absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub(crate) fn request_failed(endpoint: &str, err: &reqwest::Error) -> Self {
        Self::RequestFailed {
            endpoint: endpoint.to_string(),
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

/// Result type alias for directory operations.
pub type Result<T> = std::result::Result<T, DirectoryError>;
