use crate::errors::MetricsError;
use crate::series::SampleSeries;
use crate::types::Sample;

/// Trailing window over which power is smoothed before the fourth-power mean.
pub const NP_WINDOW_SECONDS: f64 = 30.0;

/// Window lengths (minutes) evaluated for best-average power.
pub const BEST_AVG_WINDOWS_MIN: [f64; 5] = [0.5, 5.0, 10.0, 20.0, 60.0];

pub trait RoundTo {
    fn round_to(self, dp: u32) -> f64;
}

impl RoundTo for f64 {
    #[inline]
    fn round_to(self, dp: u32) -> f64 {
        if dp == 0 {
            return self.round();
        }
        let factor = 10_f64.powi(dp as i32);
        (self * factor).round() / factor
    }
}

/// Normalized Power:
/// 1) trailing 30 s mean of power (time-based, so variable sampling rates
///    stay correct; partial windows count from the first sample)
/// 2) mean of the fourth powers
/// 3) fourth root, rounded to the nearest watt
pub fn normalized_power(series: &SampleSeries) -> Result<f64, MetricsError> {
    if !series.has_power() {
        return Err(MetricsError::MissingField("power"));
    }
    let points: Vec<(f64, f64)> = series
        .samples()
        .iter()
        .filter_map(|s| s.power.map(|p| (s.epoch_seconds(), p)))
        .collect();
    if points.is_empty() {
        return Err(MetricsError::EmptySeries);
    }

    let mut window_sum = 0.0;
    let mut start = 0usize;
    let mut fourth_sum = 0.0;
    for i in 0..points.len() {
        window_sum += points[i].1;
        while points[i].0 - points[start].0 >= NP_WINDOW_SECONDS {
            window_sum -= points[start].1;
            start += 1;
        }
        let mean = window_sum / (i - start + 1) as f64;
        fourth_sum += mean.powi(4);
    }

    let np = (fourth_sum / points.len() as f64).powf(0.25);
    Ok(np.round())
}

/// IF = NP / FTP, three decimals. Strict about configuration: a non-positive
/// FTP is an error here, and the one lenient call site (the summary
/// assembler) degrades it to unavailable itself.
pub fn intensity_factor(normalized_power: f64, ftp: f64) -> Result<f64, MetricsError> {
    if ftp <= 0.0 {
        return Err(MetricsError::InvalidConfiguration(format!(
            "ftp must be positive, got {ftp}"
        )));
    }
    Ok((normalized_power / ftp).round_to(3))
}

/// TSS = (duration × NP × IF) / (FTP × 3600) × 100, one decimal.
/// Calibrated so one hour at threshold scores 100 points.
pub fn training_stress_score(
    normalized_power: f64,
    ftp: f64,
    duration_seconds: f64,
    intensity_factor: f64,
) -> Result<f64, MetricsError> {
    if ftp <= 0.0 {
        return Err(MetricsError::InvalidConfiguration(format!(
            "ftp must be positive, got {ftp}"
        )));
    }
    if duration_seconds <= 0.0 {
        return Err(MetricsError::InvalidConfiguration(format!(
            "duration must be positive, got {duration_seconds}s"
        )));
    }
    let tss = (duration_seconds * normalized_power * intensity_factor) / (ftp * 3600.0) * 100.0;
    Ok(tss.round_to(1))
}

/// Highest mean power over any trailing time window of `minutes`, restricted
/// to samples where the rider is moving (speed > 0). A series without a
/// speed signal keeps every power sample eligible. Returns 0 when the
/// activity is shorter than the window.
pub fn best_avg_power(series: &SampleSeries, minutes: f64) -> Result<f64, MetricsError> {
    if !series.has_power() {
        return Err(MetricsError::MissingField("power"));
    }
    let window_seconds = minutes * 60.0;
    if series.duration_seconds() < window_seconds {
        return Ok(0.0);
    }

    let points: Vec<(f64, f64)> = series
        .samples()
        .iter()
        .filter(|s| eligible_for_best_avg(s, series.has_speed()))
        .filter_map(|s| s.power.map(|p| (s.epoch_seconds(), p)))
        .collect();
    if points.is_empty() {
        return Ok(0.0);
    }

    let mut window_sum = 0.0;
    let mut start = 0usize;
    let mut best = f64::MIN;
    for i in 0..points.len() {
        window_sum += points[i].1;
        while points[i].0 - points[start].0 >= window_seconds {
            window_sum -= points[start].1;
            start += 1;
        }
        let mean = window_sum / (i - start + 1) as f64;
        if mean > best {
            best = mean;
        }
    }

    Ok(best.round())
}

pub(crate) fn eligible_for_best_avg(sample: &Sample, has_speed: bool) -> bool {
    !has_speed || sample.speed.is_some_and(|v| v > 0.0)
}
