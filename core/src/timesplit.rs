use std::fmt;

use serde::{Deserialize, Serialize};

use crate::series::SampleSeries;
use crate::types::Sample;

/// Speed (m/s) above which a sample counts as moving. Slower-but-nonzero
/// samples are neither stopped nor moving.
pub const MOVING_SPEED_MPS: f64 = 1.0;

/// Whole seconds accumulated in one bucket, displayed as `{h}h {m}m {s}s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BucketTime {
    pub seconds: u64,
}

impl BucketTime {
    fn from_secs_f64(total: f64) -> Self {
        Self {
            seconds: total.max(0.0) as u64,
        }
    }

    pub fn formatted(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BucketTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.seconds / 3600;
        let minutes = (self.seconds % 3600) / 60;
        let seconds = self.seconds % 60;
        write!(f, "{hours}h {minutes}m {seconds}s")
    }
}

/// Elapsed-time decomposition of one activity. Buckets are computed
/// independently against the full series; a bucket whose required fields
/// are absent is `None` (unavailable), never a fabricated zero. `total`
/// needs only timestamps and is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSplit {
    /// Speed exactly zero. Requires speed.
    pub stopped: Option<BucketTime>,
    /// Speed above [`MOVING_SPEED_MPS`]. Requires speed.
    pub moving: Option<BucketTime>,
    /// Rolling without pedaling: speed > 0 and (power == 0 or cadence == 0).
    /// Requires speed, power, and cadence.
    pub coasting: Option<BucketTime>,
    /// Power > 0 or cadence > 0. Requires power and cadence.
    pub working: Option<BucketTime>,
    pub total: BucketTime,
}

/// Partition elapsed time by the bucket predicates. Each inter-sample delta
/// is attributed to the later sample, so a single-sample series yields all
/// zeros.
pub fn split_time(series: &SampleSeries) -> TimeSplit {
    let deltas = series.deltas();
    let samples = series.samples();

    let sum_where = |pred: &dyn Fn(&Sample) -> bool| -> BucketTime {
        let total: f64 = samples
            .iter()
            .zip(&deltas)
            .filter(|(s, _)| pred(s))
            .map(|(_, d)| *d)
            .sum();
        BucketTime::from_secs_f64(total)
    };

    let stopped = series
        .has_speed()
        .then(|| sum_where(&|s| s.speed == Some(0.0)));
    let moving = series
        .has_speed()
        .then(|| sum_where(&|s| s.speed.is_some_and(|v| v > MOVING_SPEED_MPS)));
    let coasting = (series.has_speed() && series.has_power() && series.has_cadence()).then(|| {
        sum_where(&|s| {
            s.speed.is_some_and(|v| v > 0.0)
                && (s.power == Some(0.0) || s.cadence == Some(0.0))
        })
    });
    let working = (series.has_power() && series.has_cadence()).then(|| {
        sum_where(&|s| {
            s.power.is_some_and(|p| p > 0.0) || s.cadence.is_some_and(|c| c > 0.0)
        })
    });
    let total = sum_where(&|_| true);

    TimeSplit {
        stopped,
        moving,
        coasting,
        working,
        total,
    }
}
