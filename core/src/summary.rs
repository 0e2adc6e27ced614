use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::power::{self, RoundTo};
use crate::series::SampleSeries;
use crate::timesplit::{self, TimeSplit};
use crate::training_effect::{self, TrainingEffect};
use crate::types::AthleteProfile;
use crate::zones::{self, Signal};

/// Speed (m/s) above which a sample contributes to the moving speed
/// average. Deliberately higher than the moving-time threshold.
const MOVING_AVG_SPEED_MPS: f64 = 4.0;

const MPS_TO_KMH: f64 = 3.6;

/// The flat per-activity metrics record. Unavailable metrics are `None`,
/// never a fabricated zero; zone maps are empty when the signal or table is
/// absent. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub hr_avg: Option<f64>,
    pub hr_max: Option<f64>,
    pub power_avg: Option<f64>,
    pub power_max: Option<f64>,
    pub power_max_avg_30s: Option<f64>,
    pub power_max_avg_5m: Option<f64>,
    pub power_max_avg_10m: Option<f64>,
    pub power_max_avg_20m: Option<f64>,
    pub power_max_avg_60m: Option<f64>,
    pub power_normalized: Option<f64>,
    pub intensity_factor: Option<f64>,
    pub tss: Option<f64>,
    pub cadence_avg: Option<f64>,
    pub cadence_max: Option<f64>,
    /// km/h.
    pub speed_avg: Option<f64>,
    /// km/h, over samples faster than 4 m/s.
    pub speed_moving_avg: Option<f64>,
    /// km/h.
    pub speed_max: Option<f64>,
    pub temp_avg: Option<f64>,
    pub temp_max: Option<f64>,
    /// Kilometers.
    pub distance_total: Option<f64>,
    pub time_splits: TimeSplit,
    /// Seconds per heart-rate zone index.
    pub hr_zone_seconds: BTreeMap<u8, f64>,
    /// Seconds per power zone index.
    pub power_zone_seconds: BTreeMap<u8, f64>,
    pub training_effect: Option<TrainingEffect>,
}

/// Compute every summary metric for one activity. Sub-metrics are
/// independent: a missing signal or a strict configuration error inside one
/// of them is logged and degraded to unavailable, and the rest of the
/// record still completes.
pub fn summarize(series: &SampleSeries, profile: &AthleteProfile) -> SummaryRecord {
    let samples = series.samples();
    let time_splits = timesplit::split_time(series);
    let duration_seconds = series.duration_seconds();

    // Heart rate: zero readings are sensor dropouts, not rest.
    let (hr_avg, hr_max) = if series.has_heart_rate() {
        let values: Vec<f64> = samples
            .iter()
            .filter_map(|s| s.heart_rate)
            .filter(|v| *v != 0.0)
            .collect();
        (mean(&values).map(|v| v.round()), max(&values))
    } else {
        (None, None)
    };

    let mut power_avg = None;
    let mut power_max = None;
    let mut power_normalized = None;
    let mut intensity_factor = None;
    let mut tss = None;
    let mut best_avg = [None; 5];
    if series.has_power() {
        let moving_watts: Vec<f64> = samples
            .iter()
            .filter(|s| power::eligible_for_best_avg(s, series.has_speed()))
            .filter_map(|s| s.power)
            .collect();
        let all_watts: Vec<f64> = samples.iter().filter_map(|s| s.power).collect();
        power_avg = mean(&moving_watts).map(|v| v.round());
        power_max = max(&all_watts);

        match power::normalized_power(series) {
            Ok(np) => {
                power_normalized = Some(np);
                match power::intensity_factor(np, profile.ftp) {
                    Ok(factor) => {
                        intensity_factor = Some(factor);
                        match power::training_stress_score(np, profile.ftp, duration_seconds, factor)
                        {
                            Ok(score) => tss = Some(score),
                            Err(e) => warn!("tss unavailable: {e}"),
                        }
                    }
                    Err(e) => warn!("intensity factor unavailable: {e}"),
                }
            }
            Err(e) => warn!("normalized power unavailable: {e}"),
        }

        for (slot, minutes) in best_avg.iter_mut().zip(power::BEST_AVG_WINDOWS_MIN) {
            match power::best_avg_power(series, minutes) {
                Ok(v) => *slot = Some(v),
                Err(e) => warn!("best-average power over {minutes} min unavailable: {e}"),
            }
        }
    }

    let (cadence_avg, cadence_max) = if series.has_cadence() {
        let values: Vec<f64> = samples.iter().filter_map(|s| s.cadence).collect();
        (mean(&values).map(|v| v.round()), max(&values))
    } else {
        (None, None)
    };

    let (speed_avg, speed_moving_avg, speed_max) = if series.has_speed() {
        let values: Vec<f64> = samples.iter().filter_map(|s| s.speed).collect();
        let moving: Vec<f64> = values
            .iter()
            .copied()
            .filter(|v| *v > MOVING_AVG_SPEED_MPS)
            .collect();
        (
            mean(&values).map(|v| (v * MPS_TO_KMH).round()),
            mean(&moving).map(|v| (v * MPS_TO_KMH).round()),
            max(&values).map(|v| (v * MPS_TO_KMH).round()),
        )
    } else {
        (None, None, None)
    };

    let (temp_avg, temp_max) = if series.has_temperature() {
        let values: Vec<f64> = samples.iter().filter_map(|s| s.temperature).collect();
        (mean(&values).map(|v| v.round()), max(&values))
    } else {
        (None, None)
    };

    let distance_total = total_distance_km(series);

    let hr_zone_seconds = if series.has_heart_rate() && !profile.hr_zones.is_empty() {
        zones::time_in_zones(series, &profile.hr_zones, Signal::HeartRate)
    } else {
        BTreeMap::new()
    };
    let power_zone_seconds = if series.has_power() && !profile.power_zones.is_empty() {
        zones::time_in_zones(series, &profile.power_zones, Signal::Power)
    } else {
        BTreeMap::new()
    };

    let training_effect = match intensity_factor {
        Some(factor) if !hr_zone_seconds.is_empty() => {
            Some(training_effect::estimate(&hr_zone_seconds, factor))
        }
        _ => None,
    };

    SummaryRecord {
        hr_avg,
        hr_max,
        power_avg,
        power_max,
        power_max_avg_30s: best_avg[0],
        power_max_avg_5m: best_avg[1],
        power_max_avg_10m: best_avg[2],
        power_max_avg_20m: best_avg[3],
        power_max_avg_60m: best_avg[4],
        power_normalized,
        intensity_factor,
        tss,
        cadence_avg,
        cadence_max,
        speed_avg,
        speed_moving_avg,
        speed_max,
        temp_avg,
        temp_max,
        distance_total,
        time_splits,
        hr_zone_seconds,
        power_zone_seconds,
        training_effect,
    }
}

impl SummaryRecord {
    /// Flatten to the stable key set consumed by the presentation and export
    /// layers. Unavailable metrics serialize as `null`.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        let mut put = |key: &str, value: Option<f64>| {
            map.insert(key.into(), value.map_or(Value::Null, |v| json!(v)));
        };

        put("hr_avg", self.hr_avg);
        put("hr_max", self.hr_max);
        put("power_avg", self.power_avg);
        put("power_max", self.power_max);
        put("power_max_avg_30s", self.power_max_avg_30s);
        put("power_max_avg_5m", self.power_max_avg_5m);
        put("power_max_avg_10m", self.power_max_avg_10m);
        put("power_max_avg_20m", self.power_max_avg_20m);
        put("power_max_avg_60m", self.power_max_avg_60m);
        put("power_normalized", self.power_normalized);
        put("intensity_factor", self.intensity_factor);
        put("tss", self.tss);
        put("cadence_avg", self.cadence_avg);
        put("cadence_max", self.cadence_max);
        put("speed_avg", self.speed_avg);
        put("speed_moving_avg", self.speed_moving_avg);
        put("speed_max", self.speed_max);
        put("temp_avg", self.temp_avg);
        put("temp_max", self.temp_max);
        put("distance_total", self.distance_total);
        put("te_aerobic", self.training_effect.map(|te| te.aerobic));
        put("te_anaerobic", self.training_effect.map(|te| te.anaerobic));

        let splits = [
            ("time_stopped", self.time_splits.stopped),
            ("time_moving", self.time_splits.moving),
            ("time_coasting", self.time_splits.coasting),
            ("time_working", self.time_splits.working),
            ("time_total", Some(self.time_splits.total)),
        ];
        for (key, bucket) in splits {
            map.insert(
                format!("{key}_seconds"),
                bucket.map_or(Value::Null, |b| json!(b.seconds)),
            );
            map.insert(
                format!("{key}_string"),
                bucket.map_or(Value::Null, |b| json!(b.formatted())),
            );
        }

        for (zone, seconds) in &self.hr_zone_seconds {
            map.insert(format!("hr_time_in_zone_{zone}"), json!(seconds));
        }
        for (zone, seconds) in &self.power_zone_seconds {
            map.insert(format!("power_time_in_zone_{zone}"), json!(seconds));
        }

        map
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Total distance in whole kilometers: great-circle accumulation over GPS
/// fixes when present, else speed integrated over time.
fn total_distance_km(series: &SampleSeries) -> Option<f64> {
    let samples = series.samples();
    if series.has_position() {
        let mut meters = 0.0;
        let mut previous: Option<(f64, f64)> = None;
        for sample in samples {
            let Some(current) = sample.position else {
                continue;
            };
            if let Some(prev) = previous {
                meters += haversine_m(prev, current);
            }
            previous = Some(current);
        }
        return Some((meters / 1000.0).round_to(0));
    }
    if series.has_speed() {
        let deltas = series.deltas();
        let meters: f64 = samples
            .iter()
            .zip(&deltas)
            .filter_map(|(s, d)| s.speed.map(|v| v * d))
            .sum();
        return Some((meters / 1000.0).round_to(0));
    }
    None
}

/// Great-circle distance in meters between two (lat, lon) fixes.
/// https://en.wikipedia.org/wiki/Haversine_formula
fn haversine_m(a: (f64, f64), b: (f64, f64)) -> f64 {
    const EARTH_RADIUS_M: f64 = 6_371_000.0;
    let (lat1, lon1) = (a.0.to_radians(), a.1.to_radians());
    let (lat2, lon2) = (b.0.to_radians(), b.1.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}
