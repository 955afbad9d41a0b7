//! Basic segment download example
//!
//! This example demonstrates the core functionality of segment-dl:
//! - Building a configuration
//! - Creating a downloader instance
//! - Subscribing to events
//! - Starting a segment download
//! - Following the attempt to its terminal outcome
//!
//! Run with a URL of your own:
//! `cargo run --example download_segment -- https://www.youtube.com/watch?v=...`

use std::path::PathBuf;

use segment_dl::config::{Config, DownloadConfig};
use segment_dl::{
    ContainerFormat, DownloadOutcome, DownloadParams, Event, Quality, SegmentDownloader,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    // Build configuration
    let config = Config {
        download: DownloadConfig {
            output_dir: PathBuf::from("downloads"),
            quality: Quality::new("best[height<=720]"),
            container: ContainerFormat::Mp4,
        },
        ..Default::default()
    };

    // Create downloader instance
    let downloader = SegmentDownloader::new(config.clone());

    // Subscribe to events before starting so nothing is missed
    let mut events = downloader.subscribe();

    // Download the 00:01:00 - 00:02:30 segment of the given video
    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://www.youtube.com/watch?v=jNQXAC9IVRw".to_string());
    downloader
        .start_download(DownloadParams::from_config(
            &config, url, "00:01:00", "00:02:30",
        ))
        .await?;

    // Follow the attempt until its terminal outcome
    while let Ok(event) = events.recv().await {
        match event {
            Event::Started { url, start, end } => {
                println!("▶ Downloading {} ({} - {})", url, start, end);
            }
            Event::Status { line } => {
                println!("  {}", line);
            }
            Event::Finished { outcome } => {
                match outcome {
                    DownloadOutcome::Success => println!("✓ Segment saved"),
                    DownloadOutcome::Failure { exit_code } => {
                        println!("✗ yt-dlp failed (exit code: {:?})", exit_code);
                    }
                    DownloadOutcome::Error { message } => {
                        println!("✗ {}", message);
                    }
                }
                break;
            }
        }
    }

    Ok(())
}
