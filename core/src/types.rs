use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::zones::ZoneTable;

/// One telemetry reading. Absent sensors stay `None`; downstream metrics
/// branch on field presence instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    /// Watts.
    pub power: Option<f64>,
    /// Beats per minute.
    pub heart_rate: Option<f64>,
    /// Revolutions per minute.
    pub cadence: Option<f64>,
    /// Meters per second (normalized at ingestion, whatever the source unit).
    pub speed: Option<f64>,
    /// (latitude, longitude) in decimal degrees.
    pub position: Option<(f64, f64)>,
    /// Degrees Celsius.
    pub temperature: Option<f64>,
}

impl Sample {
    /// A sample with a timestamp and no sensor data.
    pub fn at(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            power: None,
            heart_rate: None,
            cadence: None,
            speed: None,
            position: None,
            temperature: None,
        }
    }

    pub(crate) fn epoch_seconds(&self) -> f64 {
        self.timestamp.timestamp_millis() as f64 / 1000.0
    }
}

/// Rider configuration threaded explicitly through every computation.
/// Zone tables are treated as immutable for the duration of one summary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AthleteProfile {
    /// Functional threshold power, watts.
    #[serde(default)]
    pub ftp: f64,
    #[serde(default)]
    pub max_hr: Option<f64>,
    #[serde(default)]
    pub resting_hr: Option<f64>,
    #[serde(default)]
    pub hr_zones: ZoneTable,
    #[serde(default)]
    pub power_zones: ZoneTable,
}
