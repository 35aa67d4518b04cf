use birthrate_charts::algorithm::RegionWeighted;
use birthrate_charts::{FertilityRecord, aggregate_regions};

use crate::utils::{assert_close, sample_records};

#[test]
fn test_weighted_rate_within_member_bounds() {
    let records = sample_records();
    let table = aggregate_regions(&records);

    for entry in table.iter() {
        let members: Vec<f64> = records
            .iter()
            .filter(|record| record.region == entry.region && record.year == entry.year)
            .map(|record| record.tfr)
            .collect();
        let min = members.iter().copied().fold(f64::INFINITY, f64::min);
        let max = members.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        assert!(entry.population > 0.0);
        assert!(
            entry.tfr_region >= min && entry.tfr_region <= max,
            "{} {} = {} outside [{min}, {max}]",
            entry.region,
            entry.year,
            entry.tfr_region
        );
    }
}

#[test]
fn test_weighted_rate_value() {
    let table = aggregate_regions(&sample_records());
    let entry = table
        .get("Latin America & Caribbean", 1988)
        .expect("region entry for 1988");

    assert_close(entry.tfr_region, (3.5 * 82.0 + 2.9 * 142.0) / (82.0 + 142.0));
    assert_close(entry.population, 224.0);
}

#[test]
fn test_zero_population_group_omitted() {
    let records = vec![
        FertilityRecord::new("Tuvalu", "Pacific", 1990, 3.0, 0.0),
        FertilityRecord::new("Nauru", "Pacific", 1990, 4.0, 0.0),
        FertilityRecord::new("Tuvalu", "Pacific", 1991, 3.0, 10.0),
    ];
    let table = RegionWeighted::from_records(&records);

    assert!(table.get("Pacific", 1990).is_none());
    assert!(table.get("Pacific", 1991).is_some());
    assert_eq!(table.len(), 1);
    assert_eq!(table.dropped_groups(), &[("Pacific".to_string(), 1990)]);
}

#[test]
fn test_padded_region_labels_group_together() {
    let records = vec![
        FertilityRecord {
            country: "France".to_string(),
            region: "Europe & Central Asia ".to_string(),
            year: 2000,
            tfr: 1.9,
            population: 60.0,
        },
        FertilityRecord {
            country: "Norway".to_string(),
            region: "Europe & Central Asia".to_string(),
            year: 2000,
            tfr: 1.8,
            population: 4.5,
        },
    ];
    let table = RegionWeighted::from_records(&records);

    assert_eq!(table.regions(), vec!["Europe & Central Asia"]);
    let entry = table.get(" Europe & Central Asia  ", 2000).expect("grouped entry");
    assert_close(entry.population, 64.5);
}

#[test]
fn test_series_for_is_ordered_by_year() {
    let mut records = sample_records();
    records.reverse();
    let table = aggregate_regions(&records);

    let years: Vec<i32> = table
        .series_for("Europe & Central Asia")
        .into_iter()
        .map(|entry| entry.year)
        .collect();
    assert_eq!(years, vec![1987, 1988]);
}
