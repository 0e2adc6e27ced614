use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::errors::MetricsError;
use crate::types::Sample;

/// Row shape delivered by the parsing layer. The two source formats disagree
/// on field names, so every field tolerates both naming generations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default, alias = "time")]
    pub timestamp: Option<TimeField>,
    #[serde(default, alias = "power")]
    pub power_watts: Option<f64>,
    #[serde(default, alias = "heart_rate")]
    pub heart_rate_bpm: Option<f64>,
    #[serde(default, alias = "cadence")]
    pub cadence_rpm: Option<f64>,
    #[serde(default, alias = "speed", alias = "enhanced_speed")]
    pub speed_mps: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default, alias = "temperature")]
    pub temperature_c: Option<f64>,
}

/// Timestamps arrive either as RFC 3339 text or as epoch seconds.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TimeField {
    Epoch(f64),
    Text(String),
}

impl TimeField {
    fn resolve(&self) -> Result<DateTime<Utc>, MetricsError> {
        match self {
            TimeField::Epoch(secs) => Utc
                .timestamp_millis_opt((secs * 1000.0).round() as i64)
                .single()
                .ok_or_else(|| MetricsError::Parse(format!("epoch seconds out of range: {secs}"))),
            TimeField::Text(text) => DateTime::parse_from_rfc3339(text)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| MetricsError::Parse(format!("bad timestamp `{text}`: {e}"))),
        }
    }
}

/// An ordered telemetry stream. Construction sorts by timestamp and records
/// which fields the series actually carries, so callers query capability
/// once instead of probing raw storage.
///
/// A series is never empty: zero samples fail construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSeries {
    samples: Vec<Sample>,
    has_power: bool,
    has_heart_rate: bool,
    has_cadence: bool,
    has_speed: bool,
    has_position: bool,
    has_temperature: bool,
}

impl SampleSeries {
    pub fn new(mut samples: Vec<Sample>) -> Result<Self, MetricsError> {
        if samples.is_empty() {
            return Err(MetricsError::EmptySeries);
        }
        samples.sort_by_key(|s| s.timestamp);
        Ok(Self {
            has_power: samples.iter().any(|s| s.power.is_some()),
            has_heart_rate: samples.iter().any(|s| s.heart_rate.is_some()),
            has_cadence: samples.iter().any(|s| s.cadence.is_some()),
            has_speed: samples.iter().any(|s| s.speed.is_some()),
            has_position: samples.iter().any(|s| s.position.is_some()),
            has_temperature: samples.iter().any(|s| s.temperature.is_some()),
            samples,
        })
    }

    /// Build a series from a JSON array of raw records. Parse failures name
    /// the offending path.
    pub fn from_json(raw: &str) -> Result<Self, MetricsError> {
        let de = &mut serde_json::Deserializer::from_str(raw);
        let records: Vec<RawRecord> = serde_path_to_error::deserialize(de)
            .map_err(|e| MetricsError::Parse(e.to_string()))?;
        Self::from_records(records)
    }

    /// A record without any timestamp field is fatal: every derived metric
    /// here is time-based.
    pub fn from_records(records: Vec<RawRecord>) -> Result<Self, MetricsError> {
        let mut samples = Vec::with_capacity(records.len());
        for rec in records {
            let timestamp = rec
                .timestamp
                .as_ref()
                .ok_or(MetricsError::MissingField("timestamp"))?
                .resolve()?;
            let position = match (rec.latitude, rec.longitude) {
                (Some(lat), Some(lon)) => Some((lat, lon)),
                _ => None,
            };
            samples.push(Sample {
                timestamp,
                power: rec.power_watts,
                heart_rate: rec.heart_rate_bpm,
                cadence: rec.cadence_rpm,
                speed: rec.speed_mps,
                position,
                temperature: rec.temperature_c,
            });
        }
        Self::new(samples)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Elapsed seconds between the first and last sample.
    pub fn duration_seconds(&self) -> f64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => last.epoch_seconds() - first.epoch_seconds(),
            _ => 0.0,
        }
    }

    pub fn has_power(&self) -> bool {
        self.has_power
    }

    pub fn has_heart_rate(&self) -> bool {
        self.has_heart_rate
    }

    pub fn has_cadence(&self) -> bool {
        self.has_cadence
    }

    pub fn has_speed(&self) -> bool {
        self.has_speed
    }

    pub fn has_position(&self) -> bool {
        self.has_position
    }

    pub fn has_temperature(&self) -> bool {
        self.has_temperature
    }

    /// Inter-sample time deltas in seconds; `deltas[0] = 0`. Working state
    /// for the time-bucketed metrics, not part of the series identity.
    pub(crate) fn deltas(&self) -> Vec<f64> {
        let mut out = vec![0.0; self.samples.len()];
        for i in 1..self.samples.len() {
            out[i] = self.samples[i].epoch_seconds() - self.samples[i - 1].epoch_seconds();
        }
        out
    }
}
