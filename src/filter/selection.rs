//! Country selections made through the multi-country control

use std::collections::BTreeSet;

use crate::models::normalize_label;

/// A set of country names, kept normalized and sorted
///
/// The selection may be empty; an empty selection filters every country out
/// but is otherwise a perfectly valid input to the renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountrySelection {
    names: BTreeSet<String>,
}

impl CountrySelection {
    /// Build a selection from any list of names; duplicates collapse
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|name| normalize_label(name.as_ref()))
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }

    /// A selection with no countries
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether `country` is selected
    #[must_use]
    pub fn contains(&self, country: &str) -> bool {
        self.names.contains(country)
    }

    /// Whether no country is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of selected countries
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Selected names in alphabetical order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Keep only names present in `available`, logging the ones that are not
    #[must_use]
    pub fn restrict_to(&self, available: &BTreeSet<String>) -> Self {
        let (known, unknown): (BTreeSet<String>, BTreeSet<String>) = self
            .names
            .iter()
            .cloned()
            .partition(|name| available.contains(name));

        for name in &unknown {
            log::warn!("Country '{name}' is not in the dataset, ignoring it");
        }

        Self { names: known }
    }
}

impl<S: AsRef<str>> FromIterator<S> for CountrySelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
