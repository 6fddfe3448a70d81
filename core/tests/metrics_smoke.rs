use cyclestats_core::*;

#[test]
fn smoke_one_hour_constant_at_ftp() {
    // 3600 sek, 1 Hz, tidsstempel 1..=3600, konstant 200W
    let raw = RawStreams::new()
        .with_values(Channel::Time, (1..=3600).map(f64::from))
        .with_values(Channel::Watts, std::iter::repeat(200.0).take(3600));
    let cfg = AnalysisConfig::default();
    let table = normalize(&raw, &cfg).unwrap();

    let s = power_summary(&table, 200.0, &cfg).unwrap().unwrap();
    assert!((s.normalized_power - 200.0).abs() < 1e-9);
    assert!((s.intensity_factor - 1.0).abs() < 1e-12);
    assert!((s.training_stress_score - 100.0).abs() < 1e-9);
}

#[test]
fn smoke_constant_series_np_equals_power() {
    for p in [95.0, 180.0, 312.0] {
        let table = NormalizedTable::from_power_series(&vec![p; 600]);
        let cfg = AnalysisConfig::default();
        let s = power_summary(&table, p, &cfg).unwrap().unwrap();
        assert!((s.normalized_power - p).abs() < 1e-9);
        assert!((s.intensity_factor - 1.0).abs() < 1e-9);
    }
}

#[test]
fn summary_recomputed_per_ftp() {
    let table = NormalizedTable::from_power_series(&vec![250.0; 1800]);
    let cfg = AnalysisConfig::default();
    let a = power_summary(&table, 250.0, &cfg).unwrap().unwrap();
    let b = power_summary(&table, 300.0, &cfg).unwrap().unwrap();

    assert_eq!(a.normalized_power, b.normalized_power);
    assert!(b.intensity_factor < a.intensity_factor);
    assert!(b.training_stress_score < a.training_stress_score);
    assert!((b.intensity_factor - 250.0 / 300.0).abs() < 1e-9);
}

#[test]
fn ten_sample_ride_efforts() {
    let raw = RawStreams::new()
        .with_values(Channel::Time, (0..10).map(f64::from))
        .with_values(Channel::Watts, (1..=10).map(|i| f64::from(i) * 10.0));
    let cfg = AnalysisConfig::default();
    let efforts = best_efforts(&normalize(&raw, &cfg).unwrap(), &cfg);

    assert_eq!(efforts.twenty_minute, None);
    assert_eq!(efforts.ten_minute, None);
    assert_eq!(efforts.five_minute, None);
    assert_eq!(efforts.one_minute, None);
    assert_eq!(efforts.thirty_second, None);
    assert_eq!(efforts.one_second, Some(100.0));
}

#[test]
fn split_four_of_eight() {
    let table = NormalizedTable::from_power_series(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    let levels = power_splits(&table, 4).unwrap();
    let four = levels.iter().find(|l| l.split_count == 4).unwrap();
    assert_eq!(four.splits, vec![Some(1.5), Some(3.5), Some(5.5), Some(7.5)]);
    // 8 grupper à 1 rad
    assert_eq!(levels[3].splits.len(), 8);
    assert_eq!(levels[3].splits[7], Some(8.0));
}
