//! Configuration management for the pose metrics pipeline

use crate::{
    angles::AngleName,
    classifier::{default_targets, AngleTarget, TargetTable},
    constants::{DEFAULT_ANGLE_ALPHA, DEFAULT_LANDMARK_ALPHA},
    filters::{AngleSmoother, ExponentialFilter, LandmarkSmoother},
    landmarks::ValidationRules,
    pipeline::PipelineSettings,
    side::Laterality,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Smoothing configuration
    pub smoothing: SmoothingConfig,

    /// Landmark validation configuration
    pub validation: ValidationConfig,

    /// Display configuration
    pub display: DisplayConfig,

    /// Ideal value or band per angle
    pub targets: TargetTable,
}

/// Exponential smoothing weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Landmark coordinate weight (lower = smoother)
    pub landmark_alpha: f64,

    /// Angle weight (higher = more responsive)
    pub angle_alpha: f64,
}

/// Landmark acceptance rules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Minimum visibility score (0.0-1.0); unset disables the check
    pub min_visibility: Option<f64>,
}

/// Display configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Side of the body whose angles are shown
    pub laterality: Laterality,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            smoothing: SmoothingConfig::default(),
            validation: ValidationConfig::default(),
            display: DisplayConfig::default(),
            targets: default_targets(),
        }
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            landmark_alpha: DEFAULT_LANDMARK_ALPHA,
            angle_alpha: DEFAULT_ANGLE_ALPHA,
        }
    }
}

fn check_alpha(name: &str, alpha: f64) -> Result<()> {
    if alpha > 0.0 && alpha <= 1.0 {
        Ok(())
    } else {
        Err(Error::ConfigError(format!("{name} must be in (0, 1], got {alpha}")))
    }
}

fn check_target(name: AngleName, target: &AngleTarget) -> Result<()> {
    let finite = |v: f64| v.is_finite();
    match *target {
        AngleTarget::Point { ideal, good, warn } => {
            if !(finite(ideal) && finite(good) && finite(warn)) {
                return Err(Error::ConfigError(format!("Target for {name} has non-finite values")));
            }
            if good < 0.0 || warn < good {
                return Err(Error::ConfigError(format!(
                    "Target for {name}: thresholds must satisfy 0 <= good <= warn (good {good}, warn {warn})"
                )));
            }
        }
        AngleTarget::Range { min, max, warn_fraction } => {
            if !(finite(min) && finite(max) && finite(warn_fraction)) {
                return Err(Error::ConfigError(format!("Target for {name} has non-finite values")));
            }
            if min > max {
                return Err(Error::ConfigError(format!(
                    "Target for {name}: range minimum {min} exceeds maximum {max}"
                )));
            }
            if warn_fraction < 0.0 {
                return Err(Error::ConfigError(format!(
                    "Target for {name}: warn fraction must be non-negative"
                )));
            }
        }
    }
    Ok(())
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if the text is not a valid configuration
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` describing the first invalid setting
    pub fn validate(&self) -> Result<()> {
        // Validate smoothing weights
        check_alpha("Landmark alpha", self.smoothing.landmark_alpha)?;
        check_alpha("Angle alpha", self.smoothing.angle_alpha)?;

        // Validate landmark rules
        if let Some(min) = self.validation.min_visibility {
            if !(0.0..=1.0).contains(&min) {
                return Err(Error::ConfigError(
                    "Minimum visibility must be between 0.0 and 1.0".to_string(),
                ));
            }
        }

        // Validate targets
        for (&name, target) in &self.targets {
            check_target(name, target)?;
        }

        Ok(())
    }

    /// Build pipeline settings from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate
    pub fn pipeline_settings(&self) -> Result<PipelineSettings> {
        self.validate()?;

        Ok(PipelineSettings {
            landmark_smoother: LandmarkSmoother::from_filter(ExponentialFilter::try_new(self.smoothing.landmark_alpha)?),
            angle_smoother: AngleSmoother::from_filter(ExponentialFilter::try_new(self.smoothing.angle_alpha)?),
            validation: ValidationRules {
                min_visibility: self.validation.min_visibility,
            },
            targets: self.targets.clone(),
        })
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Pose Metrics Configuration

# Exponential smoothing weights, both in (0, 1]
smoothing:
  landmark_alpha: 0.4
  angle_alpha: 0.9

# Landmark acceptance
validation:
  min_visibility: null

# Display settings
display:
  laterality: left

# Ideal values per angle. Angles without a target are shown unclassified.
targets:
  Trunk_Angle:
    kind: range
    min: 0.0
    max: 30.0
    warn_fraction: 0.2
  Left_Hip_Angle:
    kind: point
    ideal: 90.0
    good: 5.0
    warn: 10.0
  Left_Knee_Angle:
    kind: point
    ideal: 90.0
    good: 5.0
    warn: 10.0
  Left_Ankle_Angle:
    kind: point
    ideal: 90.0
    good: 5.0
    warn: 10.0
  Right_Hip_Angle:
    kind: point
    ideal: 90.0
    good: 5.0
    warn: 10.0
  Right_Knee_Angle:
    kind: point
    ideal: 90.0
    good: 5.0
    warn: 10.0
  Right_Ankle_Angle:
    kind: point
    ideal: 90.0
    good: 5.0
    warn: 10.0
"#;
