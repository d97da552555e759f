//! Landmark stream replay: reads frames line by line, runs the pipeline
//! and writes feedback for each frame.
//!
//! Each input line is one frame in JSON:
//! - an array of landmark objects (`{"x":..,"y":..,"z":..,"visibility":..}`)
//!   or `null`s, indexed by canonical landmark index;
//! - a pose-source result object `{"landmarks": [[...], ...]}`, of which
//!   only the first (primary) subject is used;
//! - `null`, `[]` or `{"landmarks": []}` when nobody was detected.
//!
//! Blank lines are ignored. Lines that fail to decode are logged and
//! dropped without touching the smoothing state.

use crate::{
    config::Config,
    landmarks::LandmarkFrame,
    pipeline::{FrameMetrics, PosePipeline},
    report::render_text,
    side::Laterality,
    Error, Result,
};
use log::{info, warn};
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::time::Instant;

/// Where landmark frames are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input
    Stdin,
    /// JSON-lines file
    File(PathBuf),
}

impl InputSource {
    /// `-` selects standard input, anything else is a path
    #[must_use]
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(arg))
        }
    }
}

/// How per-frame results are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human readable feedback lines
    #[default]
    Text,
    /// One JSON object per frame
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(Error::InvalidInput(format!("Unknown output format: {s}"))),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Landmark stream
    pub input: InputSource,
    /// Output format
    pub format: OutputFormat,
    /// Pipeline configuration
    pub config: Config,
    /// Side override; falls back to the configured laterality
    pub laterality: Option<Laterality>,
}

/// Counters reported after a replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames passed to the pipeline
    pub frames: u64,
    /// Frames in which a subject was detected
    pub detected: u64,
    /// Lines that could not be decoded
    pub dropped: u64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FrameLine {
    Landmarks(LandmarkFrame),
    Result { landmarks: Vec<LandmarkFrame> },
}

/// Decode one line of the landmark stream.
///
/// Returns `Ok(None)` for a frame without detection.
///
/// # Errors
///
/// Returns `Error::ParseError` if the line is not a recognised frame
pub fn parse_frame_line(line: &str, line_number: usize) -> Result<Option<LandmarkFrame>> {
    let parsed: Option<FrameLine> = serde_json::from_str(line).map_err(|e| Error::ParseError {
        line: line_number,
        message: e.to_string(),
    })?;
    Ok(match parsed {
        None => None,
        Some(FrameLine::Landmarks(frame)) => Some(frame),
        Some(FrameLine::Result { landmarks }) => landmarks.into_iter().next(),
    })
}

/// Landmark stream replay application
pub struct MetricsApp {
    format: OutputFormat,
    input: InputSource,
    pipeline: PosePipeline,
}

impl MetricsApp {
    /// Create a new replay application
    ///
    /// # Errors
    ///
    /// Returns an error if the pipeline configuration is invalid
    pub fn new(config: AppConfig) -> Result<Self> {
        info!("Initializing pose metrics replay");

        let settings = config.config.pipeline_settings()?;
        let laterality = config.laterality.unwrap_or(config.config.display.laterality);

        Ok(Self {
            format: config.format,
            input: config.input,
            pipeline: PosePipeline::new(settings, laterality),
        })
    }

    /// Replay the configured input to standard output
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be opened or output fails
    pub fn run(&mut self) -> Result<RunSummary> {
        let stdout = io::stdout();
        let writer = stdout.lock();
        match self.input.clone() {
            InputSource::Stdin => {
                info!("Reading landmark frames from stdin");
                self.process_stream(io::stdin().lock(), writer)
            }
            InputSource::File(path) => {
                info!("Reading landmark frames from {}", path.display());
                let file = File::open(&path)?;
                self.process_stream(BufReader::new(file), writer)
            }
        }
    }

    /// Replay every frame in `reader`, writing results to `writer`
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails
    pub fn process_stream<R: BufRead, W: Write>(&mut self, reader: R, mut writer: W) -> Result<RunSummary> {
        let start_time = Instant::now();
        let mut summary = RunSummary::default();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let frame = match parse_frame_line(&line, i + 1) {
                Ok(frame) => frame,
                Err(e) => {
                    warn!("Dropping frame: {}", e);
                    summary.dropped += 1;
                    continue;
                }
            };

            let metrics = self.pipeline.process(frame.as_ref());
            summary.frames += 1;
            if metrics.detected {
                summary.detected += 1;
            }
            self.write_frame(&mut writer, summary.frames, &metrics)?;
        }

        writer.flush()?;
        info!(
            "Processed {} frames ({} with a subject, {} dropped) in {:.2?}",
            summary.frames,
            summary.detected,
            summary.dropped,
            start_time.elapsed()
        );
        Ok(summary)
    }

    fn write_frame<W: Write>(&self, writer: &mut W, number: u64, metrics: &FrameMetrics) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(writer, "frame {number}")?;
                writeln!(writer, "{}", render_text(metrics))?;
                writeln!(writer)?;
            }
            OutputFormat::Json => {
                let json = serde_json::to_string(metrics)
                    .map_err(|e| Error::InvalidInput(format!("Failed to encode frame {number}: {e}")))?;
                writeln!(writer, "{json}")?;
            }
        }
        Ok(())
    }

    /// The pipeline driven by this application
    #[must_use]
    pub const fn pipeline(&self) -> &PosePipeline {
        &self.pipeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_line_variants() {
        assert_eq!(parse_frame_line("null", 1).unwrap(), None);
        assert!(parse_frame_line("[]", 1).unwrap().unwrap().is_empty());

        let frame = parse_frame_line(r#"[{"x":0.5,"y":0.5},null]"#, 1).unwrap().unwrap();
        assert_eq!(frame.indices(), vec![0]);

        let frame = parse_frame_line(r#"{"landmarks":[[null,{"x":0.1,"y":0.2}],[{"x":0.9,"y":0.9}]]}"#, 1)
            .unwrap()
            .unwrap();
        assert_eq!(frame.indices(), vec![1]);

        assert_eq!(parse_frame_line(r#"{"landmarks":[]}"#, 1).unwrap(), None);
    }

    #[test]
    fn test_parse_error_reports_line() {
        match parse_frame_line("{not json", 7) {
            Err(Error::ParseError { line, .. }) => assert_eq!(line, 7),
            other => panic!("Expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_output_format() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(InputSource::from_arg("-"), InputSource::Stdin);
        assert_eq!(InputSource::from_arg("a.jsonl"), InputSource::File(PathBuf::from("a.jsonl")));
    }
}
