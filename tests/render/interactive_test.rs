use birthrate_charts::config::InteractiveConfig;
use birthrate_charts::render::TraceKind;
use birthrate_charts::{ChartFilter, CountrySelection, InteractiveChart, YearRange};

use crate::utils::sample_dataset;

#[test]
fn test_empty_selection_only_regions() {
    let dataset = sample_dataset();
    let view = ChartFilter::full_span(&dataset, CountrySelection::none()).apply(&dataset);
    let chart = InteractiveChart::from_view(&view, &InteractiveConfig::default());

    assert!(chart.country_traces.is_empty());
    assert_eq!(chart.region_traces.len(), 2);
    assert!(chart.traces().all(|trace| trace.kind == TraceKind::Region));
}

#[test]
fn test_empty_selection_without_regions_is_still_a_chart() {
    let dataset = sample_dataset();
    let mut filter = ChartFilter::full_span(&dataset, CountrySelection::none());
    filter.show_regions = false;
    let chart = InteractiveChart::from_view(&filter.apply(&dataset), &InteractiveConfig::default());

    assert_eq!(chart.traces().count(), 0);
    assert!(chart.to_html().contains("Birthrates Over Time"));
}

#[test]
fn test_trace_styles() {
    let dataset = sample_dataset();
    let view = ChartFilter::full_span(&dataset, CountrySelection::new(["Mexico", "Brazil"])).apply(&dataset);
    let chart = InteractiveChart::from_view(&view, &InteractiveConfig::default());

    let names: Vec<&str> = chart.country_traces.iter().map(|trace| trace.name.as_str()).collect();
    assert_eq!(names, vec!["Brazil", "Mexico"]);

    for trace in &chart.country_traces {
        assert!(trace.show_legend);
        assert!(trace.color.is_none());
        assert!(trace.hover_template.contains(&format!("Country: {}", trace.name)));
        assert!(trace.hover_template.contains("%{y:.2f}"));
    }
    for trace in &chart.region_traces {
        assert!(!trace.show_legend);
        assert!((trace.opacity - 0.35).abs() < f64::EPSILON);
        assert!((trace.line_width - 1.0).abs() < f64::EPSILON);
        assert!(trace.hover_template.starts_with(&format!("Region: {}", trace.name)));
        assert!(trace.hover_template.contains("%{y:.2f}"));
    }
}

#[test]
fn test_points_are_ordered_by_year() {
    let dataset = sample_dataset();
    let mut records = dataset.records().to_vec();
    records.reverse();

    let chart = InteractiveChart::build(&records, None, YearRange::new(1987, 1988), &InteractiveConfig::default());
    for trace in chart.traces() {
        assert!(trace.years.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(trace.years.len(), trace.values.len());
    }
    assert!(chart.region_traces.is_empty());
}

#[test]
fn test_plot_json_carries_layout() {
    let dataset = sample_dataset();
    let view = ChartFilter::full_span(&dataset, CountrySelection::new(["France"])).apply(&dataset);
    let chart = InteractiveChart::from_view(&view, &InteractiveConfig::default());
    let json = chart.to_json();

    assert!(json.contains("Birthrates Over Time"));
    assert!(json.contains("\"hovermode\":\"closest\""));
    assert!(json.contains("France"));
    assert!(chart.to_inline_html().contains("fertility-interactive"));
}
