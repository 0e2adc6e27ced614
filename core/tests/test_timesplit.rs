use chrono::{DateTime, Duration, TimeZone, Utc};

use ridemetrics_core::timesplit::{split_time, BucketTime};
use ridemetrics_core::{Sample, SampleSeries};

fn ts(offset_secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap() + Duration::seconds(offset_secs)
}

fn sample(offset_secs: i64, speed: f64, power: f64, cadence: f64) -> Sample {
    Sample {
        speed: Some(speed),
        power: Some(power),
        cadence: Some(cadence),
        ..Sample::at(ts(offset_secs))
    }
}

#[test]
fn buckets_a_mixed_ride() {
    // 1 Hz, 11 samples: a stop, steady pedaling, a coast, and a slow roll.
    let mut samples = Vec::new();
    for i in 0..=4 {
        samples.push(sample(i, 0.0, 0.0, 0.0)); // standstill
    }
    for i in 5..=7 {
        samples.push(sample(i, 5.0, 150.0, 90.0)); // pedaling
    }
    for i in 8..=9 {
        samples.push(sample(i, 5.0, 0.0, 0.0)); // coasting downhill
    }
    samples.push(sample(10, 0.5, 0.0, 30.0)); // trackstand-ish crawl

    let series = SampleSeries::new(samples).unwrap();
    let split = split_time(&series);

    assert_eq!(split.total.seconds, 10);
    assert_eq!(split.stopped.unwrap().seconds, 4);
    assert_eq!(split.moving.unwrap().seconds, 5);
    assert_eq!(split.coasting.unwrap().seconds, 3);
    assert_eq!(split.working.unwrap().seconds, 4);
}

#[test]
fn stopped_and_moving_never_claim_the_same_delta() {
    let samples: Vec<Sample> = (0..=100)
        .map(|i| sample(i, if i % 2 == 0 { 0.0 } else { 6.0 }, 100.0, 80.0))
        .collect();
    let series = SampleSeries::new(samples).unwrap();
    let split = split_time(&series);
    let stopped = split.stopped.unwrap().seconds;
    let moving = split.moving.unwrap().seconds;
    assert!(stopped + moving <= split.total.seconds);
}

#[test]
fn single_sample_yields_all_zero_buckets() {
    let series = SampleSeries::new(vec![sample(0, 5.0, 150.0, 90.0)]).unwrap();
    let split = split_time(&series);
    assert_eq!(split.total.seconds, 0);
    assert_eq!(split.stopped.unwrap().seconds, 0);
    assert_eq!(split.moving.unwrap().seconds, 0);
    assert_eq!(split.coasting.unwrap().seconds, 0);
    assert_eq!(split.working.unwrap().seconds, 0);
}

#[test]
fn buckets_missing_their_fields_are_unavailable_not_zero() {
    // Power and cadence but no speed: stopped/moving/coasting cannot be
    // known, while working still can.
    let samples: Vec<Sample> = (0..=60)
        .map(|i| Sample {
            power: Some(180.0),
            cadence: Some(85.0),
            ..Sample::at(ts(i))
        })
        .collect();
    let series = SampleSeries::new(samples).unwrap();
    let split = split_time(&series);

    assert_eq!(split.stopped, None);
    assert_eq!(split.moving, None);
    assert_eq!(split.coasting, None);
    assert_eq!(split.working.unwrap().seconds, 60);
    assert_eq!(split.total.seconds, 60);
}

#[test]
fn slow_rolling_is_neither_stopped_nor_moving() {
    // 0 < speed <= 1 m/s: excluded from both buckets.
    let samples: Vec<Sample> = (0..=10).map(|i| sample(i, 0.8, 0.0, 0.0)).collect();
    let series = SampleSeries::new(samples).unwrap();
    let split = split_time(&series);
    assert_eq!(split.stopped.unwrap().seconds, 0);
    assert_eq!(split.moving.unwrap().seconds, 0);
    assert_eq!(split.total.seconds, 10);
}

#[test]
fn bucket_time_formats_hours_minutes_seconds() {
    let bucket = BucketTime { seconds: 3725 };
    assert_eq!(bucket.formatted(), "1h 2m 5s");
    assert_eq!(BucketTime { seconds: 0 }.formatted(), "0h 0m 0s");
}
