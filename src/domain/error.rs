//! Error types for cinesearch.
//!
//! [`CinesearchError`] covers infrastructure failures (storage, I/O, configuration)
//! and carries the crate-wide [`Result`] alias. Search-level outcomes that the
//! session turns into states live in [`SearchError`], and input rejected before
//! any I/O lives in [`ValidationError`]. All of them derive their `Error`
//! implementation through `thiserror`.

use thiserror::Error;

/// Infrastructure error type for cinesearch operations.
///
/// Nothing in the search core is fatal; these errors surface from storage
/// backends, configuration loading and HTTP client setup.
///
/// # Examples
///
/// ```
/// use cinesearch::CinesearchError;
///
/// fn read_storage() -> Result<(), CinesearchError> {
///     Err(CinesearchError::Storage("Failed to read file".to_string()))
/// }
/// assert!(read_storage().is_err());
/// ```
#[derive(Debug, Error)]
pub enum CinesearchError {
    /// Reading from or writing to the storage backend failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or unreadable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP transport could not be constructed.
    #[error("Transport setup error: {0}")]
    Transport(String),
}

/// A specialized `Result` type for cinesearch operations.
pub type Result<T> = std::result::Result<T, CinesearchError>;

/// Failure outcomes of a request to the movie service.
///
/// `NoResults` and `NoMorePages` are both reported by the service as a falsy
/// `Response`; which one applies depends on the page that was asked for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The service found nothing for the query on page 1.
    #[error("{message}")]
    NoResults {
        /// Message reported by the service.
        message: String,
    },

    /// A page beyond the first came back empty. Informational, not user-facing.
    #[error("no more pages available")]
    NoMorePages,

    /// Network failure, non-2xx status or a body that could not be decoded.
    #[error("transport failure: {detail}")]
    Transport {
        /// Human-readable description of the underlying failure.
        detail: String,
    },

    /// The detail endpoint reported no title for the identifier.
    #[error("no title found for id {id}")]
    DetailNotFound {
        /// Identifier that was looked up.
        id: String,
    },
}

impl SearchError {
    /// Shorthand for building a [`SearchError::Transport`].
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            detail: detail.into(),
        }
    }
}

/// Input rejected before any request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Nothing left after trimming.
    #[error("Please enter a search term")]
    Empty,

    /// Fewer than `min` characters after trimming.
    #[error("Search term must be at least {min} characters")]
    TooShort {
        /// Minimum accepted length.
        min: usize,
        /// Length of the trimmed input.
        actual: usize,
    },
}

/// Category attached to errors delivered to the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NoResults,
    Transport,
    DetailNotFound,
}

impl ErrorKind {
    /// Short lowercase label used in log fields and the status line.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NoResults => "no-results",
            Self::Transport => "transport",
            Self::DetailNotFound => "detail-not-found",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_match_prompt_text() {
        assert_eq!(ValidationError::Empty.to_string(), "Please enter a search term");
        assert_eq!(
            ValidationError::TooShort { min: 2, actual: 1 }.to_string(),
            "Search term must be at least 2 characters"
        );
    }

    #[test]
    fn no_results_displays_service_message() {
        let err = SearchError::NoResults {
            message: "Movie not found!".to_string(),
        };
        assert_eq!(err.to_string(), "Movie not found!");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CinesearchError = io.into();
        assert!(matches!(err, CinesearchError::Io(_)));
    }
}
