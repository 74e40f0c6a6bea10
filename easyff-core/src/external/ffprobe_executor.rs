//! FFprobe integration for media metadata
//!
//! This module runs ffprobe against a single file and turns its JSON report
//! into a [`MediaInfo`]. Probing is never retried and results are never
//! cached: every call spawns a fresh ffprobe process.

use crate::error::{CoreError, CoreResult};
use super::format_command;
use serde::Deserialize;
use serde_json::Value;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Metadata reported by ffprobe for one file.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaInfo {
    /// Container size in bytes
    pub size_bytes: u64,
    /// Duration of the media in seconds
    pub duration_secs: f64,
    /// Raw stream entries, passed through untouched
    pub streams: Vec<Value>,
}

/// Anything that can produce [`MediaInfo`] for a file.
pub trait MediaProbe {
    fn probe(&self, input_path: &Path) -> CoreResult<MediaInfo>;
}

/// [`MediaProbe`] backed by an ffprobe executable.
#[derive(Debug, Clone)]
pub struct FfprobeExecutor {
    ffprobe_path: PathBuf,
}

impl FfprobeExecutor {
    pub fn new(ffprobe_path: impl Into<PathBuf>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
        }
    }

    /// The argument list passed to ffprobe for `input_path`.
    pub fn probe_args(input_path: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "-loglevel",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ]
        .iter()
        .map(OsString::from)
        .collect();
        args.push(input_path.as_os_str().to_os_string());
        args
    }
}

impl Default for FfprobeExecutor {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_FFPROBE)
    }
}

impl MediaProbe for FfprobeExecutor {
    fn probe(&self, input_path: &Path) -> CoreResult<MediaInfo> {
        let args = Self::probe_args(input_path);
        log::debug!(
            "Running ffprobe: {}",
            format_command(self.ffprobe_path.as_os_str(), &args)
        );

        let output = Command::new(&self.ffprobe_path)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                log::error!("Failed to start ffprobe for {}: {}", input_path.display(), e);
                CoreError::ProbeStart(e)
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            log::error!(
                "ffprobe failed for {} with {}",
                input_path.display(),
                output.status
            );
            return Err(CoreError::ProbeFailed {
                status: output.status,
                message: stderr,
            });
        }

        parse_probe_output(&output.stdout, input_path)
    }
}

#[derive(Deserialize)]
struct ProbeReport {
    format: Option<ProbeFormat>,
    #[serde(default)]
    streams: Vec<Value>,
}

#[derive(Deserialize)]
struct ProbeFormat {
    size: Option<Numeric>,
    duration: Option<Numeric>,
}

/// ffprobe prints numbers as strings, but accept bare numbers as well.
#[derive(Deserialize)]
#[serde(untagged)]
enum Numeric {
    Text(String),
    Number(serde_json::Number),
}

/// Parses ffprobe's JSON report into a [`MediaInfo`].
///
/// `input_path` is only used for error messages.
pub fn parse_probe_output(stdout: &[u8], input_path: &Path) -> CoreResult<MediaInfo> {
    let report: ProbeReport = serde_json::from_slice(stdout).map_err(|e| {
        CoreError::JsonParse(format!("{} ({})", e, input_path.display()))
    })?;

    let missing = |field| CoreError::ProbeFieldMissing {
        field,
        path: input_path.to_path_buf(),
    };

    let format = report.format.ok_or_else(|| missing("format"))?;

    let size_bytes = match format.size.ok_or_else(|| missing("format.size"))? {
        Numeric::Text(text) => text.trim().parse::<u64>().ok(),
        Numeric::Number(number) => number.as_u64(),
    }
    .ok_or_else(|| {
        CoreError::ProbeParse(format!("invalid format.size for {}", input_path.display()))
    })?;

    let duration_secs = match format.duration.ok_or_else(|| missing("format.duration"))? {
        Numeric::Text(text) => text.trim().parse::<f64>().ok(),
        Numeric::Number(number) => number.as_f64(),
    }
    .filter(|d| d.is_finite() && *d >= 0.0)
    .ok_or_else(|| {
        CoreError::ProbeParse(format!(
            "invalid format.duration for {}",
            input_path.display()
        ))
    })?;

    Ok(MediaInfo {
        size_bytes,
        duration_secs,
        streams: report.streams,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "streams": [
            {"index": 0, "codec_type": "video", "codec_name": "h264"},
            {"index": 1, "codec_type": "audio", "codec_name": "aac"}
        ],
        "format": {
            "filename": "clip.mp4",
            "duration": "100.400000",
            "size": "10485760",
            "bit_rate": "835510"
        }
    }"#;

    #[test]
    fn test_parse_probe_output() {
        let info = parse_probe_output(SAMPLE.as_bytes(), Path::new("clip.mp4")).unwrap();
        assert_eq!(info.size_bytes, 10_485_760);
        assert!((info.duration_secs - 100.4).abs() < 1e-9);
        assert_eq!(info.streams.len(), 2);
        assert_eq!(info.streams[1]["codec_type"], "audio");
    }

    #[test]
    fn test_parse_probe_output_numeric_fields() {
        let json = r#"{"format": {"size": 2048, "duration": 3.5}, "streams": []}"#;
        let info = parse_probe_output(json.as_bytes(), Path::new("a.mkv")).unwrap();
        assert_eq!(info.size_bytes, 2048);
        assert_eq!(info.duration_secs, 3.5);
    }

    #[test]
    fn test_parse_probe_output_missing_streams_defaults_empty() {
        let json = r#"{"format": {"size": "1", "duration": "1"}}"#;
        let info = parse_probe_output(json.as_bytes(), Path::new("a.mkv")).unwrap();
        assert!(info.streams.is_empty());
    }

    #[test]
    fn test_parse_probe_output_missing_fields() {
        let no_format = r#"{"streams": []}"#;
        assert!(matches!(
            parse_probe_output(no_format.as_bytes(), Path::new("a.mp4")),
            Err(CoreError::ProbeFieldMissing { field: "format", .. })
        ));

        let no_size = r#"{"format": {"duration": "10.0"}, "streams": []}"#;
        assert!(matches!(
            parse_probe_output(no_size.as_bytes(), Path::new("a.mp4")),
            Err(CoreError::ProbeFieldMissing { field: "format.size", .. })
        ));

        let no_duration = r#"{"format": {"size": "100"}, "streams": []}"#;
        assert!(matches!(
            parse_probe_output(no_duration.as_bytes(), Path::new("a.mp4")),
            Err(CoreError::ProbeFieldMissing { field: "format.duration", .. })
        ));
    }

    #[test]
    fn test_parse_probe_output_garbage() {
        let err = parse_probe_output(b"not json", Path::new("a.mp4")).unwrap_err();
        assert!(matches!(err, CoreError::JsonParse(_)));
        assert!(err.is_probe_error());

        // `-loglevel quiet` with an unreadable file prints an empty object
        let err = parse_probe_output(b"{}", Path::new("a.mp4")).unwrap_err();
        assert!(err.is_probe_error());
    }

    #[test]
    fn test_parse_probe_output_bad_values() {
        let json = r#"{"format": {"size": "N/A", "duration": "10"}}"#;
        assert!(matches!(
            parse_probe_output(json.as_bytes(), Path::new("a.mp4")),
            Err(CoreError::ProbeParse(_))
        ));

        let json = r#"{"format": {"size": "10", "duration": "-1"}}"#;
        assert!(matches!(
            parse_probe_output(json.as_bytes(), Path::new("a.mp4")),
            Err(CoreError::ProbeParse(_))
        ));
    }

    #[test]
    fn test_probe_args() {
        let args = FfprobeExecutor::probe_args(Path::new("my clip.mp4"));
        let args: Vec<String> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            args,
            [
                "-loglevel",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
                "my clip.mp4"
            ]
        );
    }

    #[test]
    fn test_probe_missing_executable() {
        let probe = FfprobeExecutor::new("/nonexistent/easyff-test/ffprobe");
        let err = probe.probe(Path::new("clip.mp4")).unwrap_err();
        assert!(matches!(err, CoreError::ProbeStart(_)));
        assert!(err.is_probe_error());
    }

    #[cfg(unix)]
    #[test]
    fn test_probe_nonzero_exit() {
        // `false` ignores its arguments and exits with 1
        let probe = FfprobeExecutor::new("false");
        let err = probe.probe(Path::new("clip.mp4")).unwrap_err();
        assert!(matches!(err, CoreError::ProbeFailed { ref status, .. } if !status.success()));
        assert!(err.is_probe_error());
    }
}
