//! External tool discovery and the startup dependency probe
//!
//! The library shells out to two binaries: yt-dlp (the downloader) and
//! ffmpeg (the muxer yt-dlp drives for merging). Resolution prefers an
//! explicitly configured path, then falls back to a `$PATH` search via the
//! `which` crate. The probe is advisory only - a missing tool is reported
//! but never disables anything; it simply resurfaces as a launch fault when
//! a download attempt runs.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::process::Command;

use crate::config::ToolsConfig;
use crate::error::{Error, Result};

/// Binary name of the external downloader
pub const YTDLP_BINARY: &str = "yt-dlp";

/// Binary name of the external muxer
pub const FFMPEG_BINARY: &str = "ffmpeg";

/// Remediation hint reported when yt-dlp is missing
pub(crate) const YTDLP_INSTALL_HINT: &str = "Install with: pip install yt-dlp";

/// Remediation hint reported when ffmpeg is missing
pub(crate) const FFMPEG_INSTALL_HINT: &str = "Download from: https://ffmpeg.org/download.html";

/// Presence of one external tool, as determined by the dependency probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolStatus {
    /// The tool resolved and answered its version check
    Found {
        /// Resolved path of the binary
        path: PathBuf,
        /// First line of the tool's version output
        version: String,
    },
    /// The tool could not be resolved, or did not answer the version check
    Missing {
        /// What went wrong (resolution failure or version-check failure)
        detail: String,
    },
}

impl ToolStatus {
    /// True when the tool resolved and answered its version check.
    pub fn is_found(&self) -> bool {
        matches!(self, ToolStatus::Found { .. })
    }
}

/// Result of probing both external tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyReport {
    /// Presence of the downloader
    pub ytdlp: ToolStatus,
    /// Presence of the muxer
    pub ffmpeg: ToolStatus,
}

impl DependencyReport {
    /// True when both tools answered their version checks.
    pub fn all_found(&self) -> bool {
        self.ytdlp.is_found() && self.ffmpeg.is_found()
    }
}

/// Resolves the yt-dlp binary according to `tools`.
pub(crate) fn resolve_ytdlp(tools: &ToolsConfig) -> Result<PathBuf> {
    resolve(
        YTDLP_BINARY,
        tools.ytdlp_path.as_deref(),
        tools.search_path,
        YTDLP_INSTALL_HINT,
    )
}

/// Resolves the ffmpeg binary according to `tools`.
pub(crate) fn resolve_ffmpeg(tools: &ToolsConfig) -> Result<PathBuf> {
    resolve(
        FFMPEG_BINARY,
        tools.ffmpeg_path.as_deref(),
        tools.search_path,
        FFMPEG_INSTALL_HINT,
    )
}

fn resolve(
    name: &str,
    configured: Option<&Path>,
    search_path: bool,
    hint: &str,
) -> Result<PathBuf> {
    if let Some(path) = configured {
        // An explicitly configured path is trusted as-is; a wrong path
        // surfaces when the tool is invoked.
        return Ok(path.to_path_buf());
    }

    if search_path
        && let Ok(found) = which::which(name)
    {
        tracing::debug!(binary = %found.display(), "resolved {name} from PATH");
        return Ok(found);
    }

    Err(Error::ExternalTool(format!("{name} not found. {hint}")))
}

/// Probes yt-dlp by running `yt-dlp --version`.
pub(crate) async fn probe_ytdlp(tools: &ToolsConfig) -> ToolStatus {
    probe(YTDLP_BINARY, resolve_ytdlp(tools), &["--version"]).await
}

/// Probes ffmpeg by running `ffmpeg -version`.
pub(crate) async fn probe_ffmpeg(tools: &ToolsConfig) -> ToolStatus {
    probe(FFMPEG_BINARY, resolve_ffmpeg(tools), &["-version"]).await
}

async fn probe(name: &str, resolved: Result<PathBuf>, version_args: &[&str]) -> ToolStatus {
    let path = match resolved {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!(tool = name, error = %e, "dependency probe could not resolve tool");
            return ToolStatus::Missing {
                detail: e.to_string(),
            };
        }
    };

    let mut command = Command::new(&path);
    command.args(version_args);

    // Same console suppression as the download child (CREATE_NO_WINDOW).
    #[cfg(windows)]
    command.creation_flags(0x0800_0000);

    match command.output().await {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .unwrap_or("")
                .trim()
                .to_string();
            tracing::info!(tool = name, path = %path.display(), version = %version, "dependency probe found tool");
            ToolStatus::Found { path, version }
        }
        Ok(output) => {
            tracing::warn!(tool = name, status = %output.status, "dependency probe version check failed");
            ToolStatus::Missing {
                detail: format!("{name} version check exited with {}", output.status),
            }
        }
        Err(e) => {
            tracing::warn!(tool = name, error = %e, "dependency probe could not execute tool");
            ToolStatus::Missing {
                detail: format!("failed to execute {name}: {e}"),
            }
        }
    }
}
