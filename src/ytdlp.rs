//! yt-dlp invocation building
//!
//! The wire contract with the external downloader. Argument order is fixed
//! so invocations are reproducible and can be echoed to the user before
//! execution; yt-dlp itself does not care about the order.

use std::path::Path;

use crate::types::DownloadRequest;

/// Builds the yt-dlp argument list for one download attempt.
///
/// The list is deterministic and ordered: the `--download-sections` range
/// (`*start-end`, inclusive), the `-f` format selector carried verbatim,
/// the merge container, metadata embedding, playlist expansion disabled,
/// the output template, and finally the URL.
///
/// # Examples
///
/// ```
/// use segment_dl::{ContainerFormat, DownloadRequest, Quality};
///
/// let request = DownloadRequest {
///     url: "U".to_string(),
///     start: "00:01:00".parse()?,
///     end: "00:02:30".parse()?,
///     quality: Quality::new("best[height<=720]"),
///     container: ContainerFormat::Mkv,
///     output_dir: "/out".into(),
/// };
/// let args = segment_dl::ytdlp::build_args(&request);
/// assert_eq!(args[0], "--download-sections");
/// assert_eq!(args[1], "*00:01:00-00:02:30");
/// assert_eq!(args.last().map(String::as_str), Some("U"));
/// # Ok::<(), segment_dl::TimestampError>(())
/// ```
pub fn build_args(request: &DownloadRequest) -> Vec<String> {
    vec![
        "--download-sections".to_string(),
        format!("*{}-{}", request.start, request.end),
        "-f".to_string(),
        request.quality.as_str().to_string(),
        "--merge-output-format".to_string(),
        request.container.as_str().to_string(),
        "--embed-metadata".to_string(),
        "--no-playlist".to_string(),
        "-o".to_string(),
        output_template(request),
        request.url.clone(),
    ]
}

/// Builds the output path template for one download attempt.
///
/// The file name embeds the yt-dlp template tokens `%(title)s` and `%(id)s`
/// - resolved by the tool at run time, never by this library - and takes
/// the chosen container format as its extension, rooted under the request's
/// output directory.
pub fn output_template(request: &DownloadRequest) -> String {
    let file_name = format!("segment_%(title)s_%(id)s.{}", request.container.as_str());
    request.output_dir.join(file_name).display().to_string()
}

/// Renders the resolved binary plus its arguments as one line, the way the
/// command is echoed to the Status Sink before execution.
pub(crate) fn render_command(binary: &Path, args: &[String]) -> String {
    format!("{} {}", binary.display(), args.join(" "))
}
