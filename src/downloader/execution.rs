//! Background execution of one accepted download attempt
//!
//! Resolves the yt-dlp binary, spawns it with piped output, streams its
//! stdout and stderr lines to subscribers as they arrive, and reports
//! exactly one terminal outcome once the exit status is observed. The busy
//! flag is released by a drop guard so every exit path (including a panic
//! in this task) leaves the orchestrator ready for the next attempt.

use std::process::Stdio;
use std::sync::atomic::Ordering;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::SegmentDownloader;
use crate::error::Error;
use crate::tools;
use crate::types::{DownloadOutcome, DownloadRequest, Event};
use crate::ytdlp;

/// Clears the busy flag and delivers the terminal event when dropped
///
/// Created before any fallible step of the attempt. `finish` records the
/// real outcome; if the task unwinds without reaching it, the drop still
/// clears the flag and reports an `Error` outcome so subscribers never
/// wait on an attempt that died silently.
struct CompletionGuard {
    downloader: SegmentDownloader,
    outcome: Option<DownloadOutcome>,
}

impl CompletionGuard {
    fn new(downloader: SegmentDownloader) -> Self {
        Self {
            downloader,
            outcome: None,
        }
    }

    fn finish(mut self, outcome: DownloadOutcome) {
        self.outcome = Some(outcome);
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        // Flag first, then the event: a subscriber reacting to `Finished`
        // may immediately start the next attempt.
        self.downloader
            .state
            .downloading
            .store(false, Ordering::SeqCst);

        let outcome = self.outcome.take().unwrap_or_else(|| DownloadOutcome::Error {
            message: "download task terminated unexpectedly".to_string(),
        });
        self.downloader.emit_event(Event::Finished { outcome });
    }
}

/// Run one accepted download attempt to completion
///
/// The caller has already validated the request, flipped the busy flag,
/// and emitted `Event::Started`; everything from here on reports through
/// the status stream and the guard.
///
/// Stdout and stderr are captured on separate pipes: lines keep their
/// order within each stream, but there is no ordering guarantee across
/// the two.
pub(super) async fn run(
    downloader: SegmentDownloader,
    request: DownloadRequest,
    cancel: CancellationToken,
) {
    let guard = CompletionGuard::new(downloader.clone());

    downloader.emit_status(format!(
        "Starting download from {} to {}...",
        request.start, request.end
    ));

    let binary = match tools::resolve_ytdlp(&downloader.config.tools) {
        Ok(path) => path,
        Err(e) => {
            let message = match e {
                Error::ExternalTool(message) => message,
                other => other.to_string(),
            };
            tracing::warn!(error = %message, "yt-dlp unavailable");
            downloader.emit_status(format!("Error: {message}"));
            guard.finish(DownloadOutcome::Error { message });
            return;
        }
    };

    let args = ytdlp::build_args(&request);
    let command_echo = ytdlp::render_command(&binary, &args);

    downloader.emit_status(format!("Using format: {}", request.quality));
    downloader.emit_status(format!("Output format: {}", request.container));
    downloader.emit_status(format!("Running command: {command_echo}"));
    tracing::debug!(command = %command_echo, "launching yt-dlp");

    let mut command = Command::new(&binary);
    command
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    // Suppress the console window that would otherwise flash up when a
    // GUI host launches the tool on Windows (CREATE_NO_WINDOW).
    #[cfg(windows)]
    command.creation_flags(0x0800_0000);

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(e) => {
            let message = format!("failed to launch yt-dlp: {e}");
            tracing::error!(error = %e, binary = %binary.display(), "spawn failed");
            downloader.emit_status(format!("Error: {message}"));
            guard.finish(DownloadOutcome::Error { message });
            return;
        }
    };

    let stdout_reader = child
        .stdout
        .take()
        .map(|stream| spawn_line_reader(downloader.clone(), stream));
    let stderr_reader = child
        .stderr
        .take()
        .map(|stream| spawn_line_reader(downloader.clone(), stream));

    let mut cancelled = false;
    let wait_result = tokio::select! {
        status = child.wait() => status,
        _ = cancel.cancelled() => {
            cancelled = true;
            tracing::info!("kill signal received, stopping yt-dlp");
            if let Err(e) = child.start_kill() {
                tracing::warn!(error = %e, "failed to kill yt-dlp process");
            }
            child.wait().await
        }
    };

    // After a kill the pipes need not reach EOF: the tool's own children
    // (ffmpeg) inherit the write ends and can outlive it, so the readers
    // are stopped rather than drained.
    if cancelled {
        if let Some(reader) = &stdout_reader {
            reader.abort();
        }
        if let Some(reader) = &stderr_reader {
            reader.abort();
        }
    }

    // Joining keeps `Finished` strictly after every forwarded line; on the
    // non-cancel paths the readers terminate on pipe EOF.
    let mut stream_fault: Option<String> = None;
    for reader in [stdout_reader, stderr_reader].into_iter().flatten() {
        match reader.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                if stream_fault.is_none() {
                    stream_fault = Some(format!("failed to read yt-dlp output: {e}"));
                }
            }
            // An aborted reader is the cancel path stopping it, not a fault.
            Err(e) if e.is_cancelled() => {}
            Err(e) => {
                if stream_fault.is_none() {
                    stream_fault = Some(format!("output reader failed: {e}"));
                }
            }
        }
    }

    let status = match wait_result {
        Ok(status) => status,
        Err(e) => {
            let message = format!("failed to await yt-dlp exit: {e}");
            tracing::error!(error = %e, "wait on yt-dlp failed");
            downloader.emit_status(format!("Error: {message}"));
            guard.finish(DownloadOutcome::Error { message });
            return;
        }
    };

    if let Some(message) = stream_fault {
        tracing::error!(error = %message, "output streaming failed");
        downloader.emit_status(format!("Error: {message}"));
        guard.finish(DownloadOutcome::Error { message });
        return;
    }

    if status.success() {
        tracing::info!("segment download completed");
        downloader.emit_status("✓ Download completed successfully!");
        guard.finish(DownloadOutcome::Success);
    } else if cancelled {
        tracing::info!(exit_code = ?status.code(), "segment download cancelled");
        downloader.emit_status("✗ Download cancelled");
        guard.finish(DownloadOutcome::Failure {
            exit_code: status.code(),
        });
    } else {
        tracing::warn!(exit_code = ?status.code(), "segment download failed");
        downloader.emit_status("✗ Download failed!");
        guard.finish(DownloadOutcome::Failure {
            exit_code: status.code(),
        });
    }
}

/// Forward one output stream to subscribers, line by line
///
/// Lines are sent trimmed, in the order the child produced them, until the
/// stream hits EOF. The returned handle resolves once the stream is fully
/// drained.
fn spawn_line_reader<R>(
    downloader: SegmentDownloader,
    stream: R,
) -> JoinHandle<std::io::Result<()>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(stream).lines();
        while let Some(line) = lines.next_line().await? {
            downloader.emit_status(line.trim());
        }
        Ok(())
    })
}
