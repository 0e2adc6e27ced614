use std::collections::BTreeMap;

use log::warn;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::power::RoundTo;
use crate::summary::SummaryRecord;

/// Per-zone cost weights. Empirical constants modeling how strongly one
/// minute in the zone drives each energy system; reproduced exactly for
/// numeric compatibility with historical summaries.
#[derive(Debug, Clone, Copy)]
pub struct ZoneWeights {
    pub aerobic: f64,
    pub anaerobic: f64,
}

static ZONE_WEIGHTS: Lazy<BTreeMap<u8, ZoneWeights>> = Lazy::new(|| {
    BTreeMap::from([
        (1, ZoneWeights { aerobic: 0.35, anaerobic: 0.01 }),
        (2, ZoneWeights { aerobic: 0.40, anaerobic: 0.02 }),
        (3, ZoneWeights { aerobic: 0.34, anaerobic: 0.18 }),
        (4, ZoneWeights { aerobic: 0.10, anaerobic: 0.80 }),
        (5, ZoneWeights { aerobic: 0.00, anaerobic: 1.55 }),
    ])
});

/// Aerobic and anaerobic training effect, both on a 0–5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrainingEffect {
    pub aerobic: f64,
    pub anaerobic: f64,
}

/// Estimate training effect from heart-rate zone occupancy and intensity
/// factor. Zone indexes without weights are skipped with a warning; an
/// empty mapping yields zero for both scores.
pub fn estimate(zone_seconds: &BTreeMap<u8, f64>, intensity_factor: f64) -> TrainingEffect {
    let mut aerobic_raw = 0.0;
    let mut anaerobic_raw = 0.0;
    let mut duration_min = 0.0;

    for (&zone, &seconds) in zone_seconds {
        let Some(weights) = ZONE_WEIGHTS.get(&zone) else {
            warn!("no training-effect weights for zone {zone}, skipping {seconds:.0}s");
            continue;
        };
        let minutes = seconds / 60.0;
        aerobic_raw += minutes * weights.aerobic;
        anaerobic_raw += minutes * weights.anaerobic;
        duration_min += minutes;
    }

    TrainingEffect {
        aerobic: scale(aerobic_raw, duration_min, intensity_factor),
        anaerobic: scale(anaerobic_raw, duration_min, intensity_factor),
    }
}

/// Duration bracket picks the (h, i) scaling pair; longer rides damp the
/// per-minute accumulation harder. Capped at 5, one decimal.
fn scale(raw: f64, duration_min: f64, intensity: f64) -> f64 {
    let (h, i) = if duration_min <= 60.0 {
        (60.0, intensity * 10.0)
    } else if duration_min <= 120.0 {
        (90.0, intensity * 15.0)
    } else if duration_min <= 240.0 {
        (180.0, intensity * 12.0)
    } else {
        (210.0, intensity * 18.0)
    };
    (raw * i / h).min(5.0).round_to(1)
}

/// Input row for the externally trained aerobic-TE regression model. Field
/// order matches the model's training schema; `to_vec` preserves it. Model
/// loading and inference stay outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AerobicModelFeatures {
    pub activity_distance: f64,
    pub hr_average: f64,
    pub hr_max: f64,
    pub hr_time_in_zone_1: f64,
    pub hr_time_in_zone_2: f64,
    pub hr_time_in_zone_3: f64,
    pub hr_time_in_zone_4: f64,
    pub hr_time_in_zone_5: f64,
    pub intensity_factor: f64,
    pub time_total: f64,
    pub training_stress_score: f64,
}

impl AerobicModelFeatures {
    /// Collect the feature vector from a finished summary. `None` when the
    /// summary lacks any of the model's inputs.
    pub fn from_summary(record: &SummaryRecord) -> Option<Self> {
        let zone = |i: u8| record.hr_zone_seconds.get(&i).copied();
        Some(Self {
            activity_distance: record.distance_total?,
            hr_average: record.hr_avg?,
            hr_max: record.hr_max?,
            hr_time_in_zone_1: zone(1)?,
            hr_time_in_zone_2: zone(2)?,
            hr_time_in_zone_3: zone(3)?,
            hr_time_in_zone_4: zone(4)?,
            hr_time_in_zone_5: zone(5)?,
            intensity_factor: record.intensity_factor?,
            time_total: record.time_splits.total.seconds as f64,
            training_stress_score: record.tss?,
        })
    }

    pub fn to_vec(&self) -> [f64; 11] {
        [
            self.activity_distance,
            self.hr_average,
            self.hr_max,
            self.hr_time_in_zone_1,
            self.hr_time_in_zone_2,
            self.hr_time_in_zone_3,
            self.hr_time_in_zone_4,
            self.hr_time_in_zone_5,
            self.intensity_factor,
            self.time_total,
            self.training_stress_score,
        ]
    }
}
