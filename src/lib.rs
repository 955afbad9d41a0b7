//! # segment-dl
//!
//! Backend library for applications that download time-bounded segments of
//! videos via yt-dlp.
//!
//! Given a URL, a start/end timestamp pair, and output preferences, the
//! library validates the inputs, builds a deterministic yt-dlp invocation,
//! runs it as a child process without blocking the caller, and streams the
//! tool's output back as events until a terminal success/failure outcome.
//!
//! ## Design Philosophy
//!
//! segment-dl is designed to be:
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Event-driven** - Consumers subscribe to events, no polling required
//! - **Sensible defaults** - Works out of the box with zero configuration
//! - **Tool-transparent** - yt-dlp's output and format selectors pass
//!   through untouched; the library orchestrates, it does not reinterpret
//!
//! ## Quick Start
//!
//! ```no_run
//! use segment_dl::{Config, DownloadParams, Event, SegmentDownloader};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let downloader = SegmentDownloader::new(Config::default());
//!
//!     // Subscribe to events before starting
//!     let mut events = downloader.subscribe();
//!
//!     downloader
//!         .start_download(DownloadParams::new(
//!             "https://www.youtube.com/watch?v=jNQXAC9IVRw",
//!             "00:01:00",
//!             "00:02:30",
//!         ))
//!         .await?;
//!
//!     while let Ok(event) = events.recv().await {
//!         match event {
//!             Event::Status { line } => println!("{line}"),
//!             Event::Finished { outcome } => {
//!                 println!("finished: {outcome:?}");
//!                 break;
//!             }
//!             _ => {}
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Core orchestrator implementation
pub mod downloader;
/// Error types
pub mod error;
/// Timestamp grammar and validation
pub mod timestamp;
/// External tool discovery and the dependency probe
pub mod tools;
/// Core types and events
pub mod types;
/// yt-dlp invocation building
pub mod ytdlp;

// Re-export commonly used types
pub use config::{Config, DownloadConfig, ToolsConfig};
pub use downloader::SegmentDownloader;
pub use error::{Error, Result, TimeField, ValidationError};
pub use timestamp::{Timestamp, TimestampError};
pub use tools::{DependencyReport, ToolStatus};
pub use types::{
    ContainerFormat, DownloadOutcome, DownloadParams, DownloadRequest, Event,
    ParseContainerFormatError, QUALITY_PRESETS, Quality,
};
