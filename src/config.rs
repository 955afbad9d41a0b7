//! Configuration types for segment-dl

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::{ContainerFormat, Quality};

/// Download preference defaults (output location, quality, container)
///
/// Seeds the host surface via
/// [`DownloadParams::from_config`](crate::DownloadParams::from_config);
/// every value remains overridable per attempt. Used as a nested sub-config
/// within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Directory segments are saved under (default: the working directory)
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Default yt-dlp format selector (default: `best[height<=1080]`)
    #[serde(default)]
    pub quality: Quality,

    /// Default container format (default: mp4)
    #[serde(default)]
    pub container: ContainerFormat,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            quality: Quality::default(),
            container: ContainerFormat::default(),
        }
    }
}

/// External tool paths (yt-dlp, ffmpeg)
///
/// Groups settings for locating the external binaries.
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Path to the yt-dlp executable (auto-detected if None)
    #[serde(default)]
    pub ytdlp_path: Option<PathBuf>,

    /// Path to the ffmpeg executable (auto-detected if None)
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,

    /// Whether to search PATH for external binaries if explicit paths not set (default: true)
    #[serde(default = "default_true")]
    pub search_path: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: None,
            ffmpeg_path: None,
            search_path: true,
        }
    }
}

/// Main configuration for [`SegmentDownloader`](crate::SegmentDownloader)
///
/// Fields are organized into logical sub-configs:
/// - [`download`](DownloadConfig) - output location and format defaults
/// - [`tools`](ToolsConfig) - external binary paths
///
/// All sub-config fields are flattened for serialization, so a config
/// document stays flat (no nesting) and every field is optional.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Output location and format defaults
    #[serde(flatten)]
    pub download: DownloadConfig,

    /// External tool paths
    #[serde(flatten)]
    pub tools: ToolsConfig,
}

pub(crate) fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}
