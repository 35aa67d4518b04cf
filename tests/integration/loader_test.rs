use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use birthrate_charts::{FertilityError, LoaderConfig, Result, dataset_from_csv_str, load_dataset};
use parquet::arrow::ArrowWriter;

use crate::utils::{SAMPLE_CSV, fixture_dir, write_fixture};

#[test]
fn test_load_valid_csv() -> Result<()> {
    let fixture = write_fixture("loader-valid", "fertility.csv", SAMPLE_CSV);
    let path = fixture.path();
    let dataset = load_dataset(path, &LoaderConfig::default())?;

    assert_eq!(dataset.len(), 12);
    assert_eq!(dataset.year_span().start(), 1987);
    assert_eq!(dataset.year_span().end(), 1989);
    assert_eq!(dataset.countries().len(), 4);
    // Padded labels collapse into one region per name.
    assert_eq!(
        dataset.regions().regions(),
        vec!["Europe & Central Asia", "Latin America & Caribbean"]
    );
    assert!(dataset.records().iter().all(|record| record.region.trim() == record.region));
    assert_eq!(dataset.source().path(), path);
    Ok(())
}

#[test]
fn test_column_aliases_are_accepted() -> Result<()> {
    let csv = "Country,Region,Year,fertility_rate,pop\nChile,Latin America & Caribbean,2000,2.1,15000000\n";
    let dataset = dataset_from_csv_str(csv, &LoaderConfig::default())?;

    assert_eq!(dataset.records()[0].country, "Chile");
    assert_eq!(dataset.records()[0].year, 2000);
    Ok(())
}

#[test]
fn test_missing_column_names_field() {
    let csv = "name,region,year,tfr\nMexico,Latin America & Caribbean,1988,3.5\n";
    let err = dataset_from_csv_str(csv, &LoaderConfig::default()).unwrap_err();

    assert!(matches!(err, FertilityError::MissingField { .. }), "unexpected error: {err}");
    assert_eq!(err.field(), Some("population"));
}

#[test]
fn test_malformed_value_names_field_and_row() {
    let csv = "\
name,region,year,tfr,population
Mexico,Latin America & Caribbean,1988,3.5,82000000
Mexico,Latin America & Caribbean,1989,abc,84000000
";
    let err = dataset_from_csv_str(csv, &LoaderConfig::default()).unwrap_err();

    match err {
        FertilityError::InvalidValue { field, row, reason } => {
            assert_eq!(field, "tfr");
            assert_eq!(row, 2);
            assert!(reason.contains("abc"), "reason was: {reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_fractional_year_is_rejected() -> Result<()> {
    let csv = "\
name,region,year,tfr,population
Mexico,Latin America & Caribbean,1988.7,3.5,82000000
Brazil,Latin America & Caribbean,1989,2.9,140000000
";
    let err = dataset_from_csv_str(csv, &LoaderConfig::default()).unwrap_err();
    match err {
        FertilityError::InvalidValue { field, row, reason } => {
            assert_eq!(field, "year");
            assert_eq!(row, 1);
            assert!(reason.contains("1988.7"), "reason was: {reason}");
        }
        other => panic!("unexpected error: {other}"),
    }

    let lenient = LoaderConfig {
        skip_incomplete_rows: true,
        ..LoaderConfig::default()
    };
    let dataset = dataset_from_csv_str(csv, &lenient)?;
    let years: Vec<i32> = dataset.records().iter().map(|record| record.year).collect();
    assert_eq!(years, vec![1989]);
    Ok(())
}

#[test]
fn test_missing_value_fails_unless_lenient() -> Result<()> {
    let csv = "\
name,region,year,tfr,population
Mexico,Latin America & Caribbean,1988,3.5,82000000
France,Europe & Central Asia,1988,1.8,
Norway,Europe & Central Asia,1988,1.84,4210000
";
    let strict = dataset_from_csv_str(csv, &LoaderConfig::default()).unwrap_err();
    assert_eq!(strict.field(), Some("population"));

    let lenient = LoaderConfig {
        skip_incomplete_rows: true,
        ..LoaderConfig::default()
    };
    let dataset = dataset_from_csv_str(csv, &lenient)?;
    assert_eq!(dataset.len(), 2);
    assert!(dataset.record_at("France", 1988).is_none());
    assert!(dataset.record_at("Norway", 1988).is_some());
    Ok(())
}

#[test]
fn test_negative_population_always_fails() {
    let csv = "name,region,year,tfr,population\nMexico,Latin America & Caribbean,1988,3.5,-1\n";
    let lenient = LoaderConfig {
        skip_incomplete_rows: true,
        ..LoaderConfig::default()
    };

    let err = dataset_from_csv_str(csv, &lenient).unwrap_err();
    assert!(matches!(err, FertilityError::InvalidValue { row: 1, .. }), "unexpected error: {err}");
}

#[test]
fn test_missing_file_is_reported() {
    let dir = fixture_dir("loader-missing");
    let path = dir.path().join("absent.csv");
    let err = load_dataset(&path, &LoaderConfig::default()).unwrap_err();
    assert!(err.to_string().contains("absent.csv"), "unexpected error: {err}");
}

#[test]
fn test_unsupported_extension() {
    let fixture = write_fixture("loader-ext", "fertility.xlsx", SAMPLE_CSV);
    let path = fixture.path();
    let err = load_dataset(path, &LoaderConfig::default()).unwrap_err();
    assert!(matches!(err, FertilityError::UnsupportedSource(_)));
}

#[test]
fn test_parquet_source() -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("region", DataType::Utf8, false),
        Field::new("year", DataType::Int64, false),
        Field::new("tfr", DataType::Float64, false),
        Field::new("population", DataType::Float64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(vec!["Israel", "Hungary"])),
            Arc::new(StringArray::from(vec!["Middle East & North Africa", "Europe & Central Asia"])),
            Arc::new(Int64Array::from(vec![2010, 2010])),
            Arc::new(Float64Array::from(vec![3.03, 1.25])),
            Arc::new(Float64Array::from(vec![7_620_000.0, 10_000_000.0])),
        ],
    )?;

    let dir = fixture_dir("loader-parquet");
    let path = dir.path().join("fertility.parquet");
    let file = std::fs::File::create(&path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    let dataset = load_dataset(&path, &LoaderConfig::default())?;
    assert_eq!(dataset.len(), 2);
    let israel = dataset.record_at("Israel", 2010).expect("Israel 2010");
    assert!((israel.tfr - 3.03).abs() < 1e-12);
    assert_eq!(dataset.regions().len(), 2);
    Ok(())
}
