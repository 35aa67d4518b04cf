use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use birthrate_charts::{CountrySelection, DatasetCache, LabelTable, LoaderConfig, Session, YearRange};
use clap::Parser;
use log::info;

/// Render fertility-rate charts from a World Bank style dataset
#[derive(Parser, Debug)]
#[command(name = "birthrate-charts")]
#[command(about = "Render a static SVG and an interactive chart of fertility rates over time")]
struct Args {
    /// Dataset with name, region, year, tfr and population columns (.csv or .parquet)
    #[arg(long, default_value = "fertility_worldbank.csv")]
    data: PathBuf,

    /// Label placement JSON; defaults to label_positions.json beside the dataset
    #[arg(long)]
    labels: Option<PathBuf>,

    /// Directory the output files are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// First year of the interactive chart (defaults to the first year in the data)
    #[arg(long)]
    from: Option<i32>,

    /// Last year of the interactive chart (defaults to the last year in the data)
    #[arg(long)]
    to: Option<i32>,

    /// Country to show in the interactive chart; repeat for several
    #[arg(long = "country")]
    countries: Vec<String>,

    /// Hide the regional lines in the interactive chart
    #[arg(long)]
    no_regions: bool,

    /// Drop rows with missing values instead of failing
    #[arg(long)]
    skip_incomplete_rows: bool,

    /// Width of the static chart in pixels
    #[arg(long, default_value_t = 1200)]
    width: u32,

    /// Height of the static chart in pixels
    #[arg(long, default_value_t = 700)]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let start = Instant::now();

    let cache = DatasetCache::new(LoaderConfig {
        skip_incomplete_rows: args.skip_incomplete_rows,
        ..LoaderConfig::default()
    });
    let dataset = cache
        .load(&args.data)
        .with_context(|| format!("Failed to load dataset from {}", args.data.display()))?;

    let labels = LabelTable::resolve(args.labels.as_deref(), &args.data)
        .context("Failed to read label placements")?;

    let mut session = Session::new(dataset, labels);
    session.set_canvas_size(args.width, args.height);

    if args.from.is_some() || args.to.is_some() {
        let span = session.dataset().year_span();
        session.set_year_range(YearRange::new(
            args.from.unwrap_or(span.start()),
            args.to.unwrap_or(span.end()),
        ));
    }
    if !args.countries.is_empty() {
        session.set_countries(CountrySelection::new(&args.countries));
    }
    session.set_show_regions(!args.no_regions);

    let output = session.render().context("Failed to render charts")?;

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create output directory {}", args.out_dir.display()))?;
    write_output(&args.out_dir, "fertility_static.svg", &output.static_svg)?;
    write_output(&args.out_dir, "fertility_interactive.html", &output.interactive_html)?;
    write_output(&args.out_dir, "fertility_report.html", &output.report_html)?;

    info!("Finished in {:?}", start.elapsed());
    Ok(())
}

fn write_output(dir: &Path, name: &str, contents: &str) -> anyhow::Result<()> {
    let path = dir.join(name);
    fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}
