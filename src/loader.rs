//! Dataset loading utilities
//!
//! Reads a CSV or Parquet source into Arrow record batches, validates the
//! header against the required fields, adapts every column to its canonical
//! type and deserializes the rows into [`FertilityRecord`]s. Any problem in
//! the source is a load-time error; no partial dataset is ever returned.

use std::hash::{Hash, Hasher};
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::array::{Array, BooleanArray, Float64Array, StringArray};
use arrow::compute::filter_record_batch;
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::record_batch::RecordBatch;
use arrow_schema::SchemaRef;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use rustc_hash::{FxHashSet, FxHasher};

use crate::config::LoaderConfig;
use crate::error::util::{safe_open_file, safe_read_file};
use crate::error::{FertilityError, Result};
use crate::models::{Dataset, FertilityRecord, SourceId};
use crate::schema::{AdaptedBatch, ValueIssue, adapt_record_batch, canonical_schema, check_schema};

/// File formats a dataset can be read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma separated values with a header row
    Csv,
    /// Apache Parquet
    Parquet,
}

impl SourceFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("parquet" | "pq") => Ok(Self::Parquet),
            _ => Err(FertilityError::UnsupportedSource(format!(
                "{} (expected a .csv or .parquet file)",
                path.display()
            ))),
        }
    }
}

/// Fingerprint of a source's content
#[must_use]
pub fn fingerprint(bytes: &[u8]) -> u64 {
    let mut hasher = FxHasher::default();
    bytes.hash(&mut hasher);
    hasher.finish()
}

/// Load a dataset from a CSV or Parquet file
///
/// # Arguments
/// * `path` - The source file; the format follows its extension
/// * `config` - Loader configuration
///
/// # Returns
/// The records and their regional aggregation, identified by path and content
pub fn load_dataset(path: &Path, config: &LoaderConfig) -> Result<Dataset> {
    let start = Instant::now();
    let format = SourceFormat::from_path(path)?;
    log::info!("Loading fertility data from {}", path.display());

    let bytes = safe_read_file(path, "loading the fertility dataset")?;
    let source = SourceId::new(path, fingerprint(&bytes));

    let (schema, batches) = match format {
        SourceFormat::Csv => read_csv_batches(&bytes, config.batch_size)?,
        SourceFormat::Parquet => read_parquet_batches(path, config.batch_size)?,
    };

    let origin = path.display().to_string();
    let records = records_from_batches(&schema, &batches, &origin, config)?;

    log::info!(
        "Successfully loaded {} records from {} in {:?}",
        records.len(),
        path.display(),
        start.elapsed()
    );

    Ok(Dataset::from_records(source, records))
}

/// Build a dataset from CSV text held in memory
pub fn dataset_from_csv_str(csv: &str, config: &LoaderConfig) -> Result<Dataset> {
    let bytes = csv.as_bytes();
    let (schema, batches) = read_csv_batches(bytes, config.batch_size)?;
    let records = records_from_batches(&schema, &batches, "<memory>", config)?;
    Ok(Dataset::from_records(
        SourceId::new("<memory>", fingerprint(bytes)),
        records,
    ))
}

/// Decode CSV bytes into record batches, inferring column types from the whole file
pub fn read_csv_batches(bytes: &[u8], batch_size: usize) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let format = Format::default().with_header(true);
    let (schema, rows) = format.infer_schema(Cursor::new(bytes), None)?;
    let schema = Arc::new(schema);
    log::debug!("Inferred CSV schema over {rows} rows: {schema:?}");

    let reader = ReaderBuilder::new(schema.clone())
        .with_header(true)
        .with_batch_size(batch_size)
        .build(Cursor::new(bytes))?;

    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((schema, batches))
}

/// Read a Parquet file into record batches
pub fn read_parquet_batches(path: &Path, batch_size: usize) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let file = safe_open_file(path, "reading parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let reader = builder.with_batch_size(batch_size).build()?;

    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((schema, batches))
}

/// Validate and deserialize decoded batches into records
///
/// # Arguments
/// * `schema` - Schema of the source, checked even when there are no rows
/// * `batches` - Decoded source batches
/// * `origin` - Name of the source for error messages
/// * `config` - Loader configuration
///
/// # Errors
/// Fails on the first missing field, on the first missing or malformed value
/// (unless `skip_incomplete_rows` is set) and on any negative or non-finite
/// rate or population.
pub fn records_from_batches(
    schema: &SchemaRef,
    batches: &[RecordBatch],
    origin: &str,
    config: &LoaderConfig,
) -> Result<Vec<FertilityRecord>> {
    let mapping = check_schema(schema).into_result(origin)?;

    let mut records = Vec::with_capacity(batches.iter().map(RecordBatch::num_rows).sum());
    let mut offset = 0usize;
    let mut skipped = 0usize;

    for batch in batches {
        let AdaptedBatch { batch: adapted, mut issues } = adapt_record_batch(batch, &mapping)?;
        issues.extend(blank_label_issues(&adapted)?);

        if let Some(fatal) = invalid_number_issues(&adapted)?.into_iter().next() {
            return Err(row_error(&fatal, offset));
        }

        let usable = if issues.is_empty() {
            adapted
        } else if config.skip_incomplete_rows {
            let bad_rows: FxHashSet<usize> = issues.iter().map(|issue| issue.row).collect();
            for issue in &issues {
                log::debug!(
                    "{origin}: skipping row {} ({}: {})",
                    offset + issue.row + 1,
                    issue.field,
                    issue.reason
                );
            }
            skipped += bad_rows.len();

            let mask: BooleanArray = (0..adapted.num_rows())
                .map(|row| Some(!bad_rows.contains(&row)))
                .collect();
            filter_record_batch(&adapted, &mask)?
        } else {
            let first = issues
                .iter()
                .min_by_key(|issue| issue.row)
                .ok_or_else(|| FertilityError::InvalidOperation("empty issue list".to_string()))?;
            return Err(row_error(first, offset));
        };

        // Every remaining value is present, so the strict schema holds.
        let strict = RecordBatch::try_new(canonical_schema(false), usable.columns().to_vec())?;
        let mut decoded = serde_arrow::from_record_batch::<Vec<FertilityRecord>>(&strict)
            .map_err(|e| {
                FertilityError::SchemaError(format!("Failed to deserialize records from {origin}: {e}"))
            })?;
        for record in &mut decoded {
            record.post_deserialize();
        }
        records.extend(decoded);

        offset += batch.num_rows();
    }

    if skipped > 0 {
        log::warn!("{origin}: skipped {skipped} incomplete rows");
    }

    if config.warn_on_implausible_rates {
        let (low, high) = config.plausible_tfr;
        let implausible = records
            .iter()
            .filter(|record| record.tfr < low || record.tfr > high)
            .count();
        if implausible > 0 {
            log::warn!(
                "{origin}: {implausible} records have a fertility rate outside {low}-{high}"
            );
        }
    }

    Ok(records)
}

fn row_error(issue: &ValueIssue, offset: usize) -> FertilityError {
    FertilityError::invalid_value(issue.field, offset + issue.row + 1, issue.reason.clone())
}

/// Labels that are present but empty once trimmed
fn blank_label_issues(batch: &RecordBatch) -> Result<Vec<ValueIssue>> {
    let mut issues = Vec::new();

    for (index, field) in batch.schema().fields().iter().enumerate() {
        let Some(strings) = batch.column(index).as_any().downcast_ref::<StringArray>() else {
            continue;
        };
        let name = canonical_name(field.name())?;
        for row in 0..strings.len() {
            if strings.is_valid(row) && strings.value(row).trim().is_empty() {
                issues.push(ValueIssue {
                    row,
                    field: name,
                    reason: "blank value".to_string(),
                });
            }
        }
    }

    Ok(issues)
}

/// Rates and populations that are negative or not finite
fn invalid_number_issues(batch: &RecordBatch) -> Result<Vec<ValueIssue>> {
    let mut issues = Vec::new();

    for (index, field) in batch.schema().fields().iter().enumerate() {
        let Some(numbers) = batch.column(index).as_any().downcast_ref::<Float64Array>() else {
            continue;
        };
        let name = canonical_name(field.name())?;
        for row in 0..numbers.len() {
            if !numbers.is_valid(row) {
                continue;
            }
            let value = numbers.value(row);
            let reason = if !value.is_finite() {
                format!("{value} is not a finite number")
            } else if value < 0.0 {
                format!("{value} is negative")
            } else {
                continue;
            };
            issues.push(ValueIssue {
                row,
                field: name,
                reason,
            });
        }
    }

    issues.sort_by_key(|issue| issue.row);
    Ok(issues)
}

fn canonical_name(column: &str) -> Result<&'static str> {
    crate::schema::FertilityFields::all()
        .into_iter()
        .map(|definition| definition.name)
        .find(|name| *name == column)
        .ok_or_else(|| {
            FertilityError::SchemaError(format!("Column '{column}' is not part of the canonical schema"))
        })
}
