use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::series::SampleSeries;
use crate::types::Sample;

/// One contiguous band of a signal. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub index: u8,
    #[serde(alias = "low_bound")]
    pub low: f64,
    #[serde(alias = "high_bound")]
    pub high: f64,
}

impl Zone {
    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }
}

/// Ordered zone definitions for one signal. The upstream zone editor builds
/// contiguous tables, but nothing here assumes it: lookup scans in ascending
/// index order and the first matching zone wins, so gaps and overlaps are
/// tolerated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneTable {
    zones: Vec<Zone>,
}

impl ZoneTable {
    pub fn new(mut zones: Vec<Zone>) -> Self {
        zones.sort_by_key(|z| z.index);
        Self { zones }
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Lowest-indexed zone containing `value`. Independent of storage
    /// order, so tables deserialized unsorted still resolve the same way.
    pub fn classify(&self, value: f64) -> Option<u8> {
        self.zones
            .iter()
            .filter(|z| z.contains(value))
            .min_by_key(|z| z.index)
            .map(|z| z.index)
    }
}

/// Which telemetry field a zone table applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    HeartRate,
    Power,
}

impl Signal {
    fn value(self, sample: &Sample) -> Option<f64> {
        match self {
            Signal::HeartRate => sample.heart_rate,
            Signal::Power => sample.power,
        }
    }
}

/// Seconds spent in each zone. Every index in the table appears in the
/// output, zero-filled. Each inter-sample delta is attributed to the later
/// sample's value; samples matching no zone contribute nothing, so the sum
/// can fall short of total elapsed time.
pub fn time_in_zones(
    series: &SampleSeries,
    table: &ZoneTable,
    signal: Signal,
) -> BTreeMap<u8, f64> {
    let mut out: BTreeMap<u8, f64> = table.zones().iter().map(|z| (z.index, 0.0)).collect();
    let deltas = series.deltas();
    for (i, sample) in series.samples().iter().enumerate().skip(1) {
        let Some(value) = signal.value(sample) else {
            continue;
        };
        if let Some(index) = table.classify(value) {
            *out.entry(index).or_default() += deltas[i];
        }
    }
    out
}
