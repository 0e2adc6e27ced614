use std::collections::BTreeMap;

use ridemetrics_core::training_effect::estimate;
use ridemetrics_core::AerobicModelFeatures;

fn zone_map(entries: &[(u8, f64)]) -> BTreeMap<u8, f64> {
    entries.iter().copied().collect()
}

#[test]
fn short_endurance_ride_scores_low() {
    // 10 min in zone 2 at IF 0.75: aerobic 10 × 0.40 × 7.5 / 60 = 0.5.
    let te = estimate(&zone_map(&[(2, 600.0)]), 0.75);
    assert_eq!(te.aerobic, 0.5);
    assert_eq!(te.anaerobic, 0.0);
}

#[test]
fn all_out_hour_saturates_the_anaerobic_score() {
    let te = estimate(&zone_map(&[(5, 3600.0)]), 1.0);
    assert_eq!(te.anaerobic, 5.0);
    assert_eq!(te.aerobic, 0.0);
}

#[test]
fn ninety_minute_ride_uses_the_second_bracket() {
    // 90 min in zone 2 at IF 0.8: (h, i) = (90, 12), so aerobic
    // 36 × 12 / 90 = 4.8 and anaerobic 1.8 × 12 / 90 = 0.24 → 0.2.
    let te = estimate(&zone_map(&[(2, 5400.0)]), 0.8);
    assert_eq!(te.aerobic, 4.8);
    assert_eq!(te.anaerobic, 0.2);
}

#[test]
fn very_long_ride_uses_the_top_bracket() {
    // 300 min in zone 1 at IF 1.0: (h, i) = (210, 18). Aerobic raw 105
    // scales past the cap; anaerobic raw 3 lands at 0.3.
    let te = estimate(&zone_map(&[(1, 18_000.0)]), 1.0);
    assert_eq!(te.aerobic, 5.0);
    assert_eq!(te.anaerobic, 0.3);
}

#[test]
fn unknown_zone_indexes_are_skipped() {
    let with_junk = estimate(&zone_map(&[(2, 600.0), (9, 600.0)]), 0.75);
    let clean = estimate(&zone_map(&[(2, 600.0)]), 0.75);
    assert_eq!(with_junk, clean);

    let only_junk = estimate(&zone_map(&[(9, 3600.0)]), 1.0);
    assert_eq!(only_junk.aerobic, 0.0);
    assert_eq!(only_junk.anaerobic, 0.0);
}

#[test]
fn empty_zone_map_scores_zero() {
    let te = estimate(&BTreeMap::new(), 1.0);
    assert_eq!(te.aerobic, 0.0);
    assert_eq!(te.anaerobic, 0.0);
}

#[test]
fn scores_stay_within_bounds() {
    for zone in 1u8..=5 {
        for &seconds in &[60.0, 3600.0, 14_400.0, 36_000.0] {
            for &factor in &[0.0, 0.5, 1.0, 1.3] {
                let te = estimate(&zone_map(&[(zone, seconds)]), factor);
                assert!((0.0..=5.0).contains(&te.aerobic), "aerobic {te:?}");
                assert!((0.0..=5.0).contains(&te.anaerobic), "anaerobic {te:?}");
            }
        }
    }
}

#[test]
fn feature_vector_preserves_the_model_field_order() {
    let features = AerobicModelFeatures {
        activity_distance: 42.0,
        hr_average: 140.0,
        hr_max: 180.0,
        hr_time_in_zone_1: 100.0,
        hr_time_in_zone_2: 200.0,
        hr_time_in_zone_3: 300.0,
        hr_time_in_zone_4: 400.0,
        hr_time_in_zone_5: 500.0,
        intensity_factor: 0.85,
        time_total: 3600.0,
        training_stress_score: 72.3,
    };
    assert_eq!(
        features.to_vec(),
        [42.0, 140.0, 180.0, 100.0, 200.0, 300.0, 400.0, 500.0, 0.85, 3600.0, 72.3]
    );
}
