use birthrate_charts::filter::{filter_records, filter_region_series};
use birthrate_charts::{ChartFilter, CountrySelection, YearRange};

use crate::utils::{sample_dataset, sample_records};

#[test]
fn test_inverted_range_yields_empty_view() {
    let dataset = sample_dataset();
    let filter = ChartFilter {
        years: YearRange::new(1990, 1980),
        countries: CountrySelection::new(["Mexico", "France"]),
        show_regions: true,
    };

    let view = filter.apply(&dataset);
    assert!(view.years.is_empty());
    assert!(view.records.is_empty());
    assert!(view.regions.is_empty());
    assert!(view.is_empty());
}

#[test]
fn test_range_outside_data_is_clamped() {
    let dataset = sample_dataset();
    let filter = ChartFilter {
        years: YearRange::new(1900, 1987),
        countries: CountrySelection::new(["Mexico"]),
        show_regions: false,
    };

    let view = filter.apply(&dataset);
    assert_eq!(view.years, YearRange::new(1987, 1987));
    assert_eq!(view.records.len(), 1);
    assert!(view.regions.is_empty());
}

#[test]
fn test_full_span_round_trip() {
    let dataset = sample_dataset();
    let everyone = CountrySelection::new(dataset.countries());
    let view = ChartFilter::full_span(&dataset, everyone).apply(&dataset);

    assert_eq!(view.records, dataset.records());
    let all_regions: Vec<_> = dataset.regions().iter().cloned().collect();
    assert_eq!(view.regions, all_regions);
}

#[test]
fn test_empty_selection_keeps_regions() {
    let dataset = sample_dataset();
    let view = ChartFilter::full_span(&dataset, CountrySelection::none()).apply(&dataset);

    assert!(view.records.is_empty());
    assert_eq!(view.regions.len(), dataset.regions().len());
}

#[test]
fn test_filters_do_not_touch_input() {
    let records = sample_records();
    let before = records.clone();
    let dataset = sample_dataset();

    let kept = filter_records(&records, YearRange::new(1988, 1988), &CountrySelection::new(["Brazil"]));
    let regions = filter_region_series(dataset.regions(), YearRange::new(1988, 1988));

    assert_eq!(records, before);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].country, "Brazil");
    assert!(regions.iter().all(|entry| entry.year == 1988));
}

#[test]
fn test_unknown_countries_are_dropped_from_selection() {
    let dataset = sample_dataset();
    let selection = CountrySelection::new(["Mexico", "Atlantis", "  France "]).restrict_to(dataset.countries());

    assert_eq!(selection.names().collect::<Vec<_>>(), vec!["France", "Mexico"]);
}
