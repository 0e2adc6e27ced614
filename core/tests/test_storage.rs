use std::fs;

use ridemetrics_core::{load_profile, save_profile, AthleteProfile, Zone, ZoneTable};

#[test]
fn profile_round_trips_through_json() {
    let path = "tests/tmp_profile.json";

    let profile = AthleteProfile {
        ftp: 265.0,
        max_hr: Some(188.0),
        resting_hr: Some(47.0),
        hr_zones: ZoneTable::new(vec![
            Zone { index: 1, low: 100.0, high: 120.0 },
            Zone { index: 2, low: 121.0, high: 140.0 },
        ]),
        power_zones: ZoneTable::new(vec![
            Zone { index: 1, low: 0.0, high: 145.0 },
            Zone { index: 2, low: 146.0, high: 198.0 },
        ]),
    };

    save_profile(&profile, path).expect("could not save profile");
    let loaded = load_profile(path).expect("could not load profile");

    assert_eq!(loaded, profile);

    fs::remove_file(path).ok();
}

#[test]
fn missing_profile_file_falls_back_to_defaults() {
    let loaded = load_profile("tests/does_not_exist.json").expect("default expected");
    assert_eq!(loaded.ftp, 0.0);
    assert!(loaded.hr_zones.is_empty());
    assert!(loaded.power_zones.is_empty());
}

#[test]
fn zone_bounds_survive_the_round_trip_exactly() {
    let path = "tests/tmp_zones_profile.json";

    let profile = AthleteProfile {
        ftp: 250.0,
        hr_zones: ZoneTable::new(vec![Zone { index: 1, low: 99.5, high: 120.5 }]),
        ..AthleteProfile::default()
    };

    save_profile(&profile, path).expect("could not save profile");
    let loaded = load_profile(path).expect("could not load profile");
    let zone = loaded.hr_zones.zones()[0];
    assert_eq!(zone.low, 99.5);
    assert_eq!(zone.high, 120.5);

    fs::remove_file(path).ok();
}
