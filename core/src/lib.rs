//! RideMetrics core: turns a time-ordered stream of activity telemetry
//! (power, heart rate, cadence, speed, position) into derived summary
//! metrics: normalized power, intensity factor, TSS, best-average power,
//! zone occupancy, time splits, and a training-effect estimate.
//!
//! File parsing, rendering, and persistence beyond zone configuration live
//! in the surrounding application; everything here is pure computation over
//! an immutable [`SampleSeries`] and an explicit [`AthleteProfile`].

pub mod errors;
pub mod power;
pub mod series;
pub mod storage;
pub mod summary;
pub mod timesplit;
pub mod training_effect;
pub mod types;
pub mod zones;

pub use errors::MetricsError;
pub use series::{RawRecord, SampleSeries, TimeField};
pub use storage::{load_profile, save_profile};
pub use summary::{summarize, SummaryRecord};
pub use timesplit::{split_time, BucketTime, TimeSplit};
pub use training_effect::{AerobicModelFeatures, TrainingEffect};
pub use types::{AthleteProfile, Sample};
pub use zones::{time_in_zones, Signal, Zone, ZoneTable};
