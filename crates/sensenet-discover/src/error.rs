//! Protocol error types.

use thiserror::Error;

/// Errors that can occur while producing a discovery response.
///
/// The taxonomy is deliberately small: an unsupported page is not an error
/// (it degrades to the legacy parent reply) and an unsupported hardware
/// reading is not an error (the sentinel value is written instead).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscoverError {
    /// The persistent firmware-config block could not be read. The caller
    /// may retry the page or skip it.
    #[error("firmware config block unreadable: {0}")]
    ConfigRead(String),

    /// A stored record is shorter than its fixed layout.
    #[error("record truncated: expected {expected} bytes, got {actual}")]
    RecordTruncated {
        /// Expected record length.
        expected: usize,
        /// Actual length available.
        actual: usize,
    },
}
