//! Schema handling for fertility datasets
//!
//! Sources are validated against a fixed set of required fields before any
//! row is read, and every batch is adapted to the canonical column types.

pub mod fields;
pub mod validate;

pub use fields::{FertilityFields, FieldDefinition, FieldType, canonical_schema};
pub use validate::{
    AdaptedBatch, ColumnMapping, SchemaCompatibilityReport, SchemaIssue, SchemaIssueKind,
    ValueIssue, adapt_record_batch, check_schema,
};
