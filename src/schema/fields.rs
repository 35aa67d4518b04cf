//! Field definitions for the fertility dataset
//!
//! Central source of truth for the columns a source must provide: canonical
//! names, accepted header aliases, descriptions and the Arrow type each column
//! is adapted to before deserialization.

use std::sync::Arc;

use arrow_schema::{DataType, Field, Schema, SchemaRef};

/// Logical type of a dataset column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Free text
    Text,
    /// Whole number
    Integer,
    /// Floating point number
    Float,
}

impl FieldType {
    /// Arrow type the column is adapted to
    #[must_use]
    pub const fn arrow_type(self) -> DataType {
        match self {
            Self::Text => DataType::Utf8,
            Self::Integer => DataType::Int32,
            Self::Float => DataType::Float64,
        }
    }

    /// Whether a source column of `data_type` can be adapted to this type
    #[must_use]
    pub fn accepts(self, data_type: &DataType) -> bool {
        let textual = matches!(data_type, DataType::Utf8 | DataType::LargeUtf8 | DataType::Null);
        match self {
            Self::Text => textual || data_type.is_integer(),
            Self::Integer | Self::Float => textual || data_type.is_numeric(),
        }
    }

    /// Human readable name used in error messages
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Text => "text value",
            Self::Integer => "whole number",
            Self::Float => "number",
        }
    }
}

/// Definition of one required column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    /// Canonical column name
    pub name: &'static str,
    /// Other header names accepted for this column
    pub aliases: &'static [&'static str],
    /// What the column holds
    pub description: &'static str,
    /// Logical type
    pub field_type: FieldType,
}

impl FieldDefinition {
    /// Create a field definition
    #[must_use]
    pub const fn new(
        name: &'static str,
        aliases: &'static [&'static str],
        description: &'static str,
        field_type: FieldType,
    ) -> Self {
        Self {
            name,
            aliases,
            description,
            field_type,
        }
    }

    /// Whether a source header refers to this field
    ///
    /// Headers are compared trimmed and case-insensitively against the
    /// canonical name and every alias.
    #[must_use]
    pub fn matches_header(&self, header: &str) -> bool {
        let header = header.trim();
        std::iter::once(self.name)
            .chain(self.aliases.iter().copied())
            .any(|candidate| candidate.eq_ignore_ascii_case(header))
    }

    /// Arrow field in the canonical schema
    #[must_use]
    pub fn arrow_field(&self, nullable: bool) -> Field {
        Field::new(self.name, self.field_type.arrow_type(), nullable)
    }
}

/// Field definitions for the fertility dataset
pub struct FertilityFields;

impl FertilityFields {
    /// Country name
    #[must_use]
    pub const fn country() -> FieldDefinition {
        FieldDefinition::new(
            "name",
            &["country", "country_name"],
            "Country name",
            FieldType::Text,
        )
    }

    /// Region label
    #[must_use]
    pub const fn region() -> FieldDefinition {
        FieldDefinition::new("region", &[], "Region the country belongs to", FieldType::Text)
    }

    /// Calendar year
    #[must_use]
    pub const fn year() -> FieldDefinition {
        FieldDefinition::new("year", &[], "Calendar year", FieldType::Integer)
    }

    /// Total fertility rate
    #[must_use]
    pub const fn tfr() -> FieldDefinition {
        FieldDefinition::new(
            "tfr",
            &["fertility_rate"],
            "Total fertility rate (children per woman)",
            FieldType::Float,
        )
    }

    /// Population
    #[must_use]
    pub const fn population() -> FieldDefinition {
        FieldDefinition::new("population", &["pop"], "Total population", FieldType::Float)
    }

    /// Every required field in canonical column order
    #[must_use]
    pub fn all() -> Vec<FieldDefinition> {
        vec![
            Self::country(),
            Self::region(),
            Self::year(),
            Self::tfr(),
            Self::population(),
        ]
    }
}

/// The canonical schema records are deserialized from
#[must_use]
pub fn canonical_schema(nullable: bool) -> SchemaRef {
    Arc::new(Schema::new(
        FertilityFields::all()
            .iter()
            .map(|field| field.arrow_field(nullable))
            .collect::<Vec<_>>(),
    ))
}
