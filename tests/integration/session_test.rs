use std::sync::Arc;

use birthrate_charts::{CountrySelection, LabelTable, LoaderConfig, Result, Session, YearRange, load_dataset};

use crate::utils::{SAMPLE_CSV, write_fixture};

fn sample_session(name: &str) -> Result<Session> {
    let fixture = write_fixture(name, "fertility.csv", SAMPLE_CSV);
    let path = fixture.path();
    let dataset = Arc::new(load_dataset(path, &LoaderConfig::default())?);
    Ok(Session::new(dataset, LabelTable::default()))
}

#[test]
fn test_default_filter_selects_available_highlights() -> Result<()> {
    let session = sample_session("session-defaults")?;
    let filter = session.filter();

    assert_eq!(filter.years, YearRange::new(1987, 1989));
    assert_eq!(filter.countries.names().collect::<Vec<_>>(), vec!["France", "Mexico", "Norway"]);
    assert!(filter.show_regions);
    Ok(())
}

#[test]
fn test_render_cycle_produces_all_outputs() -> Result<()> {
    let mut session = sample_session("session-render")?;
    session.set_year_range(YearRange::new(1988, 1989));
    session.set_countries(CountrySelection::new(["Brazil", "Mexico"]));
    session.set_show_regions(false);

    let output = session.render()?;

    assert!(output.static_svg.starts_with("<svg"));
    assert!(output.interactive_html.contains("Birthrates Over Time"));
    assert!(output.report_html.contains("Static recreation (NYT-style)"));
    assert!(output.report_html.contains("Interactive explorer"));
    assert_eq!(output.view.records.len(), 4);
    assert!(output.view.regions.is_empty());
    Ok(())
}

#[test]
fn test_sessions_do_not_share_filters() -> Result<()> {
    let first = sample_session("session-shared")?;
    let mut second = first.clone();
    second.set_countries(CountrySelection::none());

    assert!(!first.filter().countries.is_empty());
    assert!(second.filter().countries.is_empty());
    assert_eq!(first.dataset().len(), second.dataset().len());
    Ok(())
}
