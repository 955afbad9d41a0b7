//! Core types for segment-dl
//!
//! This module defines the data model shared across the library:
//! - [`ContainerFormat`] and [`Quality`] - user-facing output preferences
//! - [`DownloadParams`] - raw field values collected by the host surface
//! - [`DownloadRequest`] - the validated, immutable per-attempt description
//! - [`DownloadOutcome`] - the terminal result of one attempt
//! - [`Event`] - everything the orchestrator reports to subscribers

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::error::{TimeField, ValidationError};
use crate::timestamp::Timestamp;

/// The quality presets offered by the original front-end, in menu order.
///
/// The first entry is the default. These are yt-dlp format selectors; hosts
/// may present them as a menu, but any free-form selector string is accepted
/// - see [`Quality`].
pub const QUALITY_PRESETS: [&str; 7] = [
    "best[height<=1080]",
    "best[height<=720]",
    "best[height<=480]",
    "best[height<=360]",
    "best",
    "bestvideo[height<=1080]+bestaudio/best",
    "bestvideo[height<=720]+bestaudio/best",
];

/// Container format for the downloaded segment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerFormat {
    /// MPEG-4 container (the default)
    #[default]
    Mp4,
    /// Matroska container
    Mkv,
    /// WebM container
    Webm,
}

impl ContainerFormat {
    /// All supported formats, in the order the original front-end lists them.
    pub const ALL: [ContainerFormat; 3] = [
        ContainerFormat::Mp4,
        ContainerFormat::Mkv,
        ContainerFormat::Webm,
    ];

    /// Returns the lowercase name used on the yt-dlp command line and as the
    /// output file extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerFormat::Mp4 => "mp4",
            ContainerFormat::Mkv => "mkv",
            ContainerFormat::Webm => "webm",
        }
    }
}

impl std::fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ContainerFormat {
    type Err = ParseContainerFormatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = s.trim();
        ContainerFormat::ALL
            .iter()
            .copied()
            .find(|format| name.eq_ignore_ascii_case(format.as_str()))
            .ok_or_else(|| ParseContainerFormatError(name.to_string()))
    }
}

/// Error returned when parsing an unrecognized container format name
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown container format `{0}` (expected mp4, mkv, or webm)")]
pub struct ParseContainerFormatError(String);

/// A yt-dlp format selector, passed through to the tool verbatim.
///
/// The selector grammar belongs to yt-dlp and is deliberately not validated
/// here; an unsupported selector surfaces as a failed download. Defaults to
/// the first entry of [`QUALITY_PRESETS`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quality(String);

impl Quality {
    /// Wraps a selector string without inspecting it.
    pub fn new(selector: impl Into<String>) -> Self {
        Quality(selector.into())
    }

    /// Returns the selector exactly as it will appear after `-f`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Quality(QUALITY_PRESETS[0].to_string())
    }
}

impl From<&str> for Quality {
    fn from(selector: &str) -> Self {
        Quality(selector.to_string())
    }
}

impl From<String> for Quality {
    fn from(selector: String) -> Self {
        Quality(selector)
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw field values for one download attempt, as collected by the host
/// surface.
///
/// Nothing here has been validated; hand the struct to
/// [`start_download`](crate::SegmentDownloader::start_download), which trims
/// and checks the text fields before anything is spawned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadParams {
    /// Video URL as entered by the user
    pub url: String,
    /// Segment start text (expected `HH:MM:SS` or `MM:SS`)
    pub start: String,
    /// Segment end text (expected `HH:MM:SS` or `MM:SS`)
    pub end: String,
    /// Format selector passed to yt-dlp verbatim
    #[serde(default)]
    pub quality: Quality,
    /// Container format for the saved segment
    #[serde(default)]
    pub container: ContainerFormat,
    /// Directory the segment is saved under
    #[serde(default = "crate::config::default_output_dir")]
    pub output_dir: PathBuf,
}

impl DownloadParams {
    /// Creates params for `url` and the `start`/`end` range with default
    /// quality, container, and output directory (the working directory).
    pub fn new(url: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        DownloadParams {
            url: url.into(),
            start: start.into(),
            end: end.into(),
            quality: Quality::default(),
            container: ContainerFormat::default(),
            output_dir: crate::config::default_output_dir(),
        }
    }

    /// Like [`DownloadParams::new`] but seeded with the quality, container,
    /// and output directory configured in `config`.
    pub fn from_config(
        config: &Config,
        url: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        DownloadParams {
            url: url.into(),
            start: start.into(),
            end: end.into(),
            quality: config.download.quality.clone(),
            container: config.download.container,
            output_dir: config.download.output_dir.clone(),
        }
    }
}

/// A validated, immutable description of one download attempt.
///
/// Built from [`DownloadParams`] via `TryFrom` once every precondition
/// holds; owned by exactly one in-flight execution and read-only for its
/// duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadRequest {
    /// Video URL, trimmed and non-empty
    pub url: String,
    /// Validated segment start
    pub start: Timestamp,
    /// Validated segment end
    pub end: Timestamp,
    /// Format selector passed to yt-dlp verbatim
    pub quality: Quality,
    /// Container format for the saved segment
    pub container: ContainerFormat,
    /// Directory the segment is saved under
    pub output_dir: PathBuf,
}

impl TryFrom<DownloadParams> for DownloadRequest {
    type Error = ValidationError;

    fn try_from(params: DownloadParams) -> std::result::Result<Self, Self::Error> {
        let url = params.url.trim();
        if url.is_empty() {
            return Err(ValidationError::EmptyUrl);
        }

        // Both fields are checked for emptiness before either is parsed, so
        // an empty end is reported even when the start is malformed.
        let start_text = non_empty(&params.start, TimeField::Start)?;
        let end_text = non_empty(&params.end, TimeField::End)?;
        let start = parse_time_field(start_text, TimeField::Start)?;
        let end = parse_time_field(end_text, TimeField::End)?;

        Ok(DownloadRequest {
            url: url.to_string(),
            start,
            end,
            quality: params.quality,
            container: params.container,
            output_dir: params.output_dir,
        })
    }
}

fn non_empty(text: &str, field: TimeField) -> std::result::Result<&str, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTimestamp { field });
    }
    Ok(trimmed)
}

fn parse_time_field(
    text: &str,
    field: TimeField,
) -> std::result::Result<Timestamp, ValidationError> {
    text.parse()
        .map_err(|source| ValidationError::InvalidTimestamp { field, source })
}

/// Terminal result of one download attempt, produced exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DownloadOutcome {
    /// The child process exited with code 0
    Success,
    /// The child process exited nonzero, or was terminated by a signal
    /// (in which case there is no exit code)
    Failure {
        /// Exit code reported by the child, when one exists
        exit_code: Option<i32>,
    },
    /// The attempt never ran to a child exit: the tool could not be spawned
    /// or its output stream failed mid-read
    Error {
        /// Human-readable description of the fault
        message: String,
    },
}

impl DownloadOutcome {
    /// True only for [`DownloadOutcome::Success`]; drives the host's
    /// success/failure acknowledgment.
    pub fn is_success(&self) -> bool {
        matches!(self, DownloadOutcome::Success)
    }
}

/// Events emitted by the orchestrator to its subscribers.
///
/// Delivery order per attempt is fixed: one `Started`, any number of
/// `Status` lines in the order the child emitted them, then exactly one
/// `Finished` after process exit is observed. Serialized with a `type` tag
/// so hosts can bridge events over IPC unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A download attempt was accepted; the orchestrator is busy and hosts
    /// should disable their trigger and start progress indication
    Started {
        /// URL being downloaded
        url: String,
        /// Requested segment start
        start: Timestamp,
        /// Requested segment end
        end: Timestamp,
    },
    /// One line of progress output, trimmed, in emission order
    Status {
        /// The output line (may be empty after trimming)
        line: String,
    },
    /// The attempt reached its terminal outcome; hosts should clear busy
    /// indication and acknowledge the result to the user
    Finished {
        /// What the attempt produced
        outcome: DownloadOutcome,
    },
}
