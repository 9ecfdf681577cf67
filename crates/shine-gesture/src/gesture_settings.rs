use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error as ThisError;

pub const ENV_PREFIX: &str = "GESTURE";
/// Decimal digits an f32 acceleration can meaningfully be rounded to.
pub const MAX_ACCELERATION_PRECISION: u32 = 6;

#[derive(Debug, ThisError)]
pub enum SettingsError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("{field} is not a number")]
    NotANumber { field: &'static str },
    #[error("{field} = {value} is outside of [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("acceleration_precision = {value} is above {max}")]
    PrecisionTooHigh { value: u32, max: u32 },
    #[error("Tap window is empty: min_tap_duration ({min}) > max_tap_duration ({max})")]
    InvalidTapWindow { min: f32, max: f32 },
}

/// Thresholds of the gesture evaluators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSettings {
    /// Minimal length of a horizontal swipe in percentage of the screen width.
    pub min_horizontal_swipe_length: f32,
    /// Minimal length of a vertical swipe in percentage of the screen height.
    pub min_vertical_swipe_length: f32,

    /// A tap must last strictly longer than this (seconds).
    pub min_tap_duration: f32,
    /// A tap must last strictly shorter than this (seconds).
    pub max_tap_duration: f32,

    /// Right tilt is reported when acceleration.x >= this.
    pub x_tilt_pos_threshold: f32,
    /// Left tilt is reported when acceleration.x <= this.
    pub x_tilt_neg_threshold: f32,
    /// Forward tilt is reported when acceleration.y >= this.
    pub y_tilt_pos_threshold: f32,
    /// Backward tilt is reported when acceleration.y <= this.
    pub y_tilt_neg_threshold: f32,

    /// Number of decimals the device acceleration is rounded to before tilt evaluation.
    pub acceleration_precision: Option<u32>,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            min_horizontal_swipe_length: 0.0,
            min_vertical_swipe_length: 0.0,
            min_tap_duration: 0.0,
            max_tap_duration: f32::MAX,
            x_tilt_pos_threshold: 0.4,
            x_tilt_neg_threshold: -0.4,
            y_tilt_pos_threshold: 0.4,
            y_tilt_neg_threshold: -0.4,
            acceleration_precision: Some(2),
        }
    }
}

fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), SettingsError> {
    if value.is_nan() {
        Err(SettingsError::NotANumber { field })
    } else if value < min || value > max {
        Err(SettingsError::OutOfRange { field, value, min, max })
    } else {
        Ok(())
    }
}

impl GestureSettings {
    /// Load the settings from a configuration file (json, toml, ...), overridden by the
    /// `GESTURE__<FIELD>` environment variables.
    pub fn load<P: AsRef<Path>>(config_file: P) -> Result<Self, SettingsError> {
        let builder = Config::builder()
            .add_source(File::from(config_file.as_ref()))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        let s = builder.build()?;
        let settings: GestureSettings = s.try_deserialize()?;
        settings.validate()?;

        log::info!("gesture settings: {:#?}", settings);
        Ok(settings)
    }

    /// Parse the settings from a json document. Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: GestureSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        check_range("min_horizontal_swipe_length", self.min_horizontal_swipe_length, 0.0, 100.0)?;
        check_range("min_vertical_swipe_length", self.min_vertical_swipe_length, 0.0, 100.0)?;

        check_range("min_tap_duration", self.min_tap_duration, 0.0, f32::MAX)?;
        check_range("max_tap_duration", self.max_tap_duration, 0.0, f32::MAX)?;
        if self.min_tap_duration > self.max_tap_duration {
            return Err(SettingsError::InvalidTapWindow {
                min: self.min_tap_duration,
                max: self.max_tap_duration,
            });
        }

        check_range("x_tilt_pos_threshold", self.x_tilt_pos_threshold, -1.0, 1.0)?;
        check_range("x_tilt_neg_threshold", self.x_tilt_neg_threshold, -1.0, 1.0)?;
        check_range("y_tilt_pos_threshold", self.y_tilt_pos_threshold, -1.0, 1.0)?;
        check_range("y_tilt_neg_threshold", self.y_tilt_neg_threshold, -1.0, 1.0)?;

        if let Some(value) = self.acceleration_precision {
            if value > MAX_ACCELERATION_PRECISION {
                return Err(SettingsError::PrecisionTooHigh {
                    value,
                    max: MAX_ACCELERATION_PRECISION,
                });
            }
        }

        Ok(())
    }
}
