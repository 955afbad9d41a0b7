//! Error types for segment-dl
//!
//! This module provides the error handling surface for the library:
//! - [`Error`] - the boundary type returned by public operations
//! - [`ValidationError`] - pre-launch input rejection, surfaced synchronously
//!   before any external process is spawned
//! - [`TimeField`] - which timestamp field a validation failure refers to
//!
//! Faults that occur after launch (a nonzero exit, a missing tool discovered
//! at spawn time, a mid-stream I/O failure) are not returned as errors; they
//! are delivered asynchronously as a terminal
//! [`DownloadOutcome`](crate::DownloadOutcome).

use thiserror::Error;

use crate::timestamp::TimestampError;

/// Result type alias for segment-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for segment-dl
///
/// This is the primary error type returned by the library's public
/// operations. Each variant includes enough context for a host application
/// to present the failure to its user directly.
#[derive(Debug, Error)]
pub enum Error {
    /// Input rejected before any external process was spawned
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// External tool execution failed (yt-dlp or ffmpeg could not be
    /// resolved or invoked)
    #[error("external tool error: {0}")]
    ExternalTool(String),
}

/// Pre-launch validation failures
///
/// Every variant is detected before a child process exists, returned
/// synchronously from [`start_download`](crate::SegmentDownloader::start_download),
/// and guarantees that no state was mutated - the busy flag is untouched and
/// no events were emitted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The video URL was empty after trimming whitespace
    #[error("video URL must not be empty")]
    EmptyUrl,

    /// A timestamp field was empty after trimming whitespace
    #[error("{field} time must not be empty")]
    EmptyTimestamp {
        /// Which timestamp field was empty
        field: TimeField,
    },

    /// A timestamp field did not match the accepted `HH:MM:SS` / `MM:SS`
    /// grammar
    #[error("invalid {field} time: {source}")]
    InvalidTimestamp {
        /// Which timestamp field was malformed
        field: TimeField,
        /// The grammar rule that rejected the text
        #[source]
        source: TimestampError,
    },
}

/// Identifies which end of the requested range a validation failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    /// The segment start timestamp
    Start,
    /// The segment end timestamp
    End,
}

impl std::fmt::Display for TimeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeField::Start => write!(f, "start"),
            TimeField::End => write!(f, "end"),
        }
    }
}
