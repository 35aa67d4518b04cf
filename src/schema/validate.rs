//! Header validation and type adaptation of source record batches

use std::fmt;

use arrow::array::{Array, ArrayRef, Float64Array};
use arrow::compute::cast;
use arrow::record_batch::RecordBatch;
use arrow::util::display::array_value_to_string;
use arrow_schema::{DataType, Schema};

use crate::error::{FertilityError, Result};
use crate::schema::fields::{FertilityFields, FieldDefinition, FieldType, canonical_schema};

/// Outcome of checking a source schema against the required fields
#[derive(Debug)]
pub struct SchemaCompatibilityReport {
    /// Whether every required field was found with an adaptable type
    pub compatible: bool,
    /// List of incompatibility issues, if any
    pub issues: Vec<SchemaIssue>,
    /// Source column index for every required field that was found
    pub columns: Vec<(FieldDefinition, usize)>,
}

/// A single schema problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    /// Canonical name of the field concerned
    pub field: &'static str,
    /// What is wrong
    pub kind: SchemaIssueKind,
}

/// Kinds of schema problems
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaIssueKind {
    /// No column matches the field
    Missing,
    /// The matching column has a type that cannot be adapted
    IncompatibleType(String),
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SchemaIssueKind::Missing => write!(f, "required field '{}' is missing", self.field),
            SchemaIssueKind::IncompatibleType(found) => {
                write!(f, "field '{}' has unsupported type {found}", self.field)
            }
        }
    }
}

/// Check a source schema against the required fields
#[must_use]
pub fn check_schema(schema: &Schema) -> SchemaCompatibilityReport {
    let mut issues = Vec::new();
    let mut columns = Vec::new();

    for definition in FertilityFields::all() {
        let found = schema
            .fields()
            .iter()
            .position(|field| definition.matches_header(field.name()));

        match found {
            None => issues.push(SchemaIssue {
                field: definition.name,
                kind: SchemaIssueKind::Missing,
            }),
            Some(index) => {
                let data_type = schema.field(index).data_type();
                if definition.field_type.accepts(data_type) {
                    columns.push((definition, index));
                } else {
                    issues.push(SchemaIssue {
                        field: definition.name,
                        kind: SchemaIssueKind::IncompatibleType(data_type.to_string()),
                    });
                }
            }
        }
    }

    SchemaCompatibilityReport {
        compatible: issues.is_empty(),
        issues,
        columns,
    }
}

impl SchemaCompatibilityReport {
    /// Turn the first issue into an error naming its field
    pub fn into_result(self, origin: &str) -> Result<ColumnMapping> {
        if let Some(issue) = self.issues.first() {
            for other in &self.issues[1..] {
                log::warn!("{origin}: {other}");
            }
            return Err(match &issue.kind {
                SchemaIssueKind::Missing => FertilityError::missing_field(issue.field, origin),
                SchemaIssueKind::IncompatibleType(_) => {
                    FertilityError::SchemaError(format!("{origin}: {issue}"))
                }
            });
        }

        Ok(ColumnMapping {
            columns: self.columns,
        })
    }
}

/// Positions of the required fields in a validated source schema
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    columns: Vec<(FieldDefinition, usize)>,
}

/// A value that could not be adapted, or is missing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueIssue {
    /// Zero-based row within the batch
    pub row: usize,
    /// Canonical name of the field
    pub field: &'static str,
    /// What is wrong with the value
    pub reason: String,
}

/// A batch in canonical layout plus the values that did not survive adaptation
#[derive(Debug)]
pub struct AdaptedBatch {
    /// Canonical columns, nullable; invalid values are null
    pub batch: RecordBatch,
    /// Missing or unconvertible values, ordered by field then row
    pub issues: Vec<ValueIssue>,
}

/// Project a source batch onto the canonical schema and cast every column
///
/// Casting is lenient: values that cannot be converted become null and are
/// reported as [`ValueIssue`]s together with values that were already null.
pub fn adapt_record_batch(batch: &RecordBatch, mapping: &ColumnMapping) -> Result<AdaptedBatch> {
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(mapping.columns.len());
    let mut issues = Vec::new();

    for (definition, index) in &mapping.columns {
        let source = batch.column(*index);
        let target_type = definition.field_type.arrow_type();

        // Casting a float to an integer truncates, so fractions are caught first.
        let fractional = if definition.field_type == FieldType::Integer && is_float(source.data_type()) {
            fractional_rows(source)?
        } else {
            Vec::new()
        };
        for &row in &fractional {
            let shown = array_value_to_string(source, row)?;
            issues.push(ValueIssue {
                row,
                field: definition.name,
                reason: format!("'{shown}' is not a valid {}", definition.field_type.describe()),
            });
        }

        let adapted = if source.data_type() == &target_type {
            source.clone()
        } else {
            cast(source, &target_type)?
        };

        if adapted.null_count() > 0 {
            for row in (0..adapted.len()).filter(|&row| adapted.is_null(row)) {
                let reason = if source.is_null(row) {
                    "missing value".to_string()
                } else {
                    let shown = array_value_to_string(source, row)?;
                    format!("'{shown}' is not a valid {}", definition.field_type.describe())
                };
                issues.push(ValueIssue {
                    row,
                    field: definition.name,
                    reason,
                });
            }
        }

        columns.push(adapted);
    }

    let batch = RecordBatch::try_new(canonical_schema(true), columns)?;
    Ok(AdaptedBatch { batch, issues })
}

fn is_float(data_type: &DataType) -> bool {
    matches!(data_type, DataType::Float16 | DataType::Float32 | DataType::Float64)
}

/// Rows holding a value with a fractional part or no finite value at all
fn fractional_rows(source: &ArrayRef) -> Result<Vec<usize>> {
    let widened = cast(source, &DataType::Float64)?;
    let values = widened
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| FertilityError::SchemaError("float column did not widen to Float64".to_string()))?;

    Ok((0..values.len())
        .filter(|&row| values.is_valid(row))
        .filter(|&row| {
            let value = values.value(row);
            !value.is_finite() || value.fract() != 0.0
        })
        .collect())
}
