//! Dependency probe example
//!
//! Checks whether yt-dlp and ffmpeg are reachable before any download is
//! attempted, the way a host application would at startup. The probe is
//! advisory: a missing tool is reported but nothing is disabled.

use segment_dl::{Config, SegmentDownloader, ToolStatus};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let downloader = SegmentDownloader::new(Config::default());

    let report = downloader.probe_dependencies().await;

    match &report.ytdlp {
        ToolStatus::Found { path, version } => {
            println!("✓ yt-dlp {} at {}", version, path.display());
        }
        ToolStatus::Missing { detail } => {
            println!("✗ yt-dlp unavailable: {}", detail);
        }
    }

    match &report.ffmpeg {
        ToolStatus::Found { path, version } => {
            println!("✓ {} at {}", version, path.display());
        }
        ToolStatus::Missing { detail } => {
            println!("✗ ffmpeg unavailable: {}", detail);
        }
    }

    if report.all_found() {
        println!("All dependencies present");
    } else {
        println!("Downloads will fail until the missing tools are installed");
    }

    Ok(())
}
