//! Pose metrics library for real-time biomechanical feedback.
//!
//! Turns a per-frame stream of 2D body landmarks, as produced by a pose
//! estimation model, into stabilized and classified joint-angle metrics.
//!
//! The pipeline for each frame consists of:
//! 1. Landmark validation (points outside the image are discarded)
//! 2. Exponential smoothing of landmark coordinates
//! 3. Joint angle computation (three-point angles, trunk lean, ground angles)
//! 4. Exponential smoothing of the angles
//! 5. Classification against configured targets, restricted to the
//!    selected side of the body
//!
//! Tracking loss resets both smoothing stages; the first frame after a gap
//! is reported unfiltered.
//!
//! # Examples
//!
//! ## Threading state explicitly
//!
//! ```
//! use pose_metrics::{
//!     landmarks::{BodyLandmark, Landmark, LandmarkFrame},
//!     pipeline::{process_frame, PipelineSettings, SmoothingState},
//!     angles::AngleName,
//!     side::Laterality,
//! };
//!
//! let mut frame = LandmarkFrame::new();
//! frame.set(BodyLandmark::LeftHip.index(), Landmark::new(0.5, 0.6));
//! frame.set(BodyLandmark::LeftKnee.index(), Landmark::new(0.5, 0.8));
//! frame.set(BodyLandmark::LeftAnkle.index(), Landmark::new(0.5, 1.0));
//!
//! let settings = PipelineSettings::default();
//! let (metrics, state) = process_frame(Some(&frame), &SmoothingState::default(), Laterality::Left, &settings);
//!
//! let knee = metrics.metrics[&AngleName::LeftKnee];
//! println!("Left knee: {} ({})", knee.value, knee.severity);
//!
//! // No detection: everything unavailable, smoothing starts over
//! let (metrics, state) = process_frame(None, &state, Laterality::Left, &settings);
//! assert!(!metrics.detected);
//! assert!(state.is_empty());
//! ```
//!
//! ## Letting the pipeline keep its state
//!
//! ```no_run
//! use pose_metrics::{config::Config, pipeline::PosePipeline, report::render_text};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_file("pose-metrics.yaml")?;
//! let mut pipeline = PosePipeline::new(config.pipeline_settings()?, config.display.laterality);
//!
//! # let frames: Vec<Option<pose_metrics::landmarks::LandmarkFrame>> = Vec::new();
//! for frame in &frames {
//!     let metrics = pipeline.process(frame.as_ref());
//!     println!("{}", render_text(&metrics));
//! }
//! # Ok(())
//! # }
//! ```

/// Landmark data model and validation
pub mod landmarks;

/// Planar angle primitives
pub mod geometry;

/// Named joint angles and their definitions
pub mod angles;

/// Temporal smoothing stages
pub mod filters;

/// Severity classification against targets
pub mod classifier;

/// Laterality selection and feedback markers
pub mod side;

/// Per-frame pipeline orchestration
pub mod pipeline;

/// Plain-text feedback rendering
pub mod report;

/// Landmark stream replay application
pub mod app;

/// Error types and result handling
pub mod error;

/// Constants used throughout the library
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
