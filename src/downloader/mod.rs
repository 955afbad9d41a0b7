//! Core orchestrator implementation
//!
//! [`SegmentDownloader`] accepts raw field values from a host surface,
//! validates them, and runs at most one yt-dlp invocation at a time as a
//! background task, reporting progress and the terminal outcome through a
//! broadcast event channel:
//! - [`execution`] - the background attempt itself (spawn, stream, outcome)

mod execution;


use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::Result;
use crate::tools::{self, DependencyReport, ToolStatus};
use crate::types::{DownloadParams, DownloadRequest, Event};

/// Busy and cancellation state shared with the execution task
#[derive(Clone)]
pub(crate) struct DownloadState {
    /// True from attempt acceptance until the execution task's completion
    /// guard clears it
    pub(crate) downloading: Arc<AtomicBool>,
    /// Cancellation token of the in-flight attempt; overwritten on each
    /// accepted start, never handed out
    pub(crate) cancel: Arc<tokio::sync::Mutex<Option<CancellationToken>>>,
}

/// Main orchestrator instance (cloneable - all fields are Arc-wrapped)
///
/// At most one download attempt is in flight per instance; while one runs,
/// further [`start_download`](SegmentDownloader::start_download) calls are
/// silently ignored. Everything the orchestrator observes - acceptance,
/// output lines, the terminal outcome - is published to subscribers as
/// [`Event`]s.
#[derive(Clone)]
pub struct SegmentDownloader {
    /// Configuration (wrapped in Arc for sharing across tasks)
    pub(crate) config: Arc<Config>,
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: tokio::sync::broadcast::Sender<Event>,
    /// Busy and cancellation state
    pub(crate) state: DownloadState,
}

impl SegmentDownloader {
    /// Create a new SegmentDownloader instance
    ///
    /// Construction is infallible and spawns nothing; the external tools
    /// are first touched by [`probe_dependencies`](Self::probe_dependencies)
    /// or an accepted download attempt.
    pub fn new(config: Config) -> Self {
        // Buffer size 1000 lets multiple subscribers receive all events
        // independently without back-pressuring the execution task
        let (event_tx, _rx) = tokio::sync::broadcast::channel(1000);

        Self {
            config: Arc::new(config),
            event_tx,
            state: DownloadState {
                downloading: Arc::new(AtomicBool::new(false)),
                cancel: Arc::new(tokio::sync::Mutex::new(None)),
            },
        }
    }

    /// Subscribe to orchestrator events
    ///
    /// Returns a broadcast receiver; every subscriber sees the full event
    /// stream. Subscribe before calling
    /// [`start_download`](Self::start_download) to observe the attempt from
    /// its `Started` event.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Emit an event to all subscribers (ignores errors if no subscribers)
    pub(crate) fn emit_event(&self, event: Event) {
        self.event_tx.send(event).ok();
    }

    /// Forward one line to the Status Sink
    pub(crate) fn emit_status(&self, line: impl Into<String>) {
        self.emit_event(Event::Status { line: line.into() });
    }

    /// Whether a download attempt is currently in flight
    pub fn is_downloading(&self) -> bool {
        self.state.downloading.load(Ordering::SeqCst)
    }

    /// Start a segment download
    ///
    /// Validates `params` and, if everything holds, spawns the attempt as a
    /// background task and returns immediately. Progress and the terminal
    /// outcome arrive through the event channel: one [`Event::Started`],
    /// the tool's output as [`Event::Status`] lines, and exactly one
    /// [`Event::Finished`] after process exit.
    ///
    /// A call while an attempt is already in flight is silently ignored and
    /// returns `Ok(())`; check [`is_downloading`](Self::is_downloading)
    /// first if you need to distinguish the two.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`](crate::Error::Validation) when the URL
    /// is empty after trimming or a timestamp is empty or fails the
    /// `HH:MM:SS` / `MM:SS` grammar. On a validation error nothing was
    /// spawned, no event was emitted, and the busy state is untouched.
    pub async fn start_download(&self, params: DownloadParams) -> Result<()> {
        if self.is_downloading() {
            tracing::debug!("start_download ignored: an attempt is already in flight");
            return Ok(());
        }

        let request = match DownloadRequest::try_from(params) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "download request rejected before launch");
                return Err(e.into());
            }
        };

        // Hold the cancellation slot across the gate so cancel() always
        // observes a token that belongs to the attempt that won the flag.
        let mut cancel_slot = self.state.cancel.lock().await;

        // compare_exchange is the authoritative gate: of two calls that both
        // passed validation, only one can flip the flag.
        if self
            .state
            .downloading
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(());
        }

        let cancel = CancellationToken::new();
        *cancel_slot = Some(cancel.clone());
        drop(cancel_slot);

        tracing::info!(
            url = %request.url,
            start = %request.start,
            end = %request.end,
            quality = %request.quality,
            container = %request.container,
            "segment download accepted"
        );
        self.emit_event(Event::Started {
            url: request.url.clone(),
            start: request.start.clone(),
            end: request.end.clone(),
        });

        let downloader = self.clone();
        tokio::spawn(execution::run(downloader, request, cancel));

        Ok(())
    }

    /// Cancel the in-flight download attempt, if any
    ///
    /// Kills the child process; the attempt still delivers its
    /// [`Event::Finished`] (as a failure) after the exit is observed.
    /// Returns `true` when an attempt was signalled, `false` when the
    /// orchestrator was idle. A `true` return can race an attempt that
    /// finished at the same moment, in which case it is harmless.
    pub async fn cancel(&self) -> bool {
        if !self.is_downloading() {
            return false;
        }

        let cancel_slot = self.state.cancel.lock().await;
        match cancel_slot.as_ref() {
            Some(token) => {
                tracing::info!("cancelling in-flight download");
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Probe for the external tools and report what was found
    ///
    /// Runs `yt-dlp --version` and `ffmpeg -version` independently and
    /// publishes one informational status line per tool. Advisory only: a
    /// missing tool disables nothing and is rediscovered as a launch fault
    /// when a download attempt runs.
    pub async fn probe_dependencies(&self) -> DependencyReport {
        let ytdlp = tools::probe_ytdlp(&self.config.tools).await;
        match &ytdlp {
            ToolStatus::Found { .. } => self.emit_status("✓ yt-dlp found"),
            ToolStatus::Missing { .. } => {
                self.emit_status(format!("✗ yt-dlp not found. {}", tools::YTDLP_INSTALL_HINT));
            }
        }

        let ffmpeg = tools::probe_ffmpeg(&self.config.tools).await;
        match &ffmpeg {
            ToolStatus::Found { .. } => self.emit_status("✓ ffmpeg found"),
            ToolStatus::Missing { .. } => {
                self.emit_status(format!(
                    "✗ ffmpeg not found. {}",
                    tools::FFMPEG_INSTALL_HINT
                ));
            }
        }

        DependencyReport { ytdlp, ffmpeg }
    }
}
