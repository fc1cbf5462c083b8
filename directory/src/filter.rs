//! Conjunctive record filters.
//!
//! Each filter targets one [`FilterField`]; a set holds at most one filter per
//! field and applies them in sequence, every filter narrowing the previous
//! result.

use serde::{Deserialize, Serialize};
use shared_types::{GeoPoint, ResourceRecord};
use tracing::error;

use crate::error::DirectoryError;
use crate::geo::{distance_to, miles_to_km};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterField {
    Category,
    Town,
    County,
    Name,
    Location,
}

impl FilterField {
    pub fn name(&self) -> &'static str {
        match self {
            FilterField::Category => "Category",
            FilterField::Town => "Town",
            FilterField::County => "County",
            FilterField::Name => "Name",
            FilterField::Location => "Location",
        }
    }

    /// Text compared by single and multi filters. `None` for fields that are
    /// not textual.
    fn text_of<'a>(&self, record: &'a ResourceRecord) -> Option<&'a str> {
        match self {
            FilterField::Category => Some(record.category.as_str()),
            FilterField::Town => Some(&record.town),
            FilterField::County => Some(&record.county),
            FilterField::Name => Some(&record.name),
            FilterField::Location => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadiusFilter {
    pub zip_code: Option<String>,
    pub center: GeoPoint,
    pub radius_miles: f64,
}

impl RadiusFilter {
    pub fn contains(&self, record: &ResourceRecord) -> bool {
        distance_to(self.center, record.position()) <= miles_to_km(self.radius_miles)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterValue {
    /// Substring match.
    Single(String),
    /// Set membership.
    Multi(Vec<String>),
    Radius(RadiusFilter),
}

impl FilterValue {
    pub fn kind(&self) -> &'static str {
        match self {
            FilterValue::Single(_) => "single",
            FilterValue::Multi(_) => "multi",
            FilterValue::Radius(_) => "radius",
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Single(value) => value.trim().is_empty(),
            FilterValue::Multi(values) => values.is_empty(),
            FilterValue::Radius(_) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub field: FilterField,
    pub value: FilterValue,
}

impl Filter {
    pub fn new(field: FilterField, value: FilterValue) -> Self {
        Self { field, value }
    }

    /// Rejects field/value pairs there is no comparison for.
    pub fn validate(&self) -> Result<(), DirectoryError> {
        let supported = match (&self.value, self.field) {
            (FilterValue::Radius(_), FilterField::Location) => true,
            (FilterValue::Radius(_), _) => false,
            (_, FilterField::Location) => false,
            _ => true,
        };
        if supported {
            Ok(())
        } else {
            Err(DirectoryError::UnsupportedFilter {
                field: self.field.name(),
                kind: self.value.kind(),
            })
        }
    }

    /// Assumes [`Filter::validate`] passed.
    fn matches(&self, record: &ResourceRecord) -> bool {
        match &self.value {
            FilterValue::Single(needle) => self
                .field
                .text_of(record)
                .is_some_and(|text| text.contains(needle.trim())),
            FilterValue::Multi(values) => self
                .field
                .text_of(record)
                .is_some_and(|text| values.iter().any(|v| v == text)),
            FilterValue::Radius(radius) => radius.contains(record),
        }
    }

    fn badge(&self) -> FilterBadge {
        let label = match &self.value {
            FilterValue::Single(value) => value.trim().to_string(),
            FilterValue::Multi(values) => values.join(", "),
            FilterValue::Radius(radius) => match &radius.zip_code {
                Some(zip) => format!("Within {} mi of {}", radius.radius_miles, zip),
                None => format!(
                    "Within {} mi of {:.3}, {:.3}",
                    radius.radius_miles, radius.center.lat, radius.center.long
                ),
            },
        };
        FilterBadge {
            field: self.field,
            label,
        }
    }
}

/// Header chip describing one active filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterBadge {
    pub field: FilterField,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any filter already set on the same field.
    pub fn set(&mut self, filter: Filter) {
        match self.filters.iter_mut().find(|f| f.field == filter.field) {
            Some(existing) => *existing = filter,
            None => self.filters.push(filter),
        }
    }

    pub fn get(&self, field: FilterField) -> Option<&Filter> {
        self.filters.iter().find(|f| f.field == field)
    }

    /// Returns whether a filter was removed.
    pub fn clear(&mut self, field: FilterField) -> bool {
        let before = self.filters.len();
        self.filters.retain(|f| f.field != field);
        self.filters.len() != before
    }

    pub fn clear_all(&mut self) {
        self.filters.clear();
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter()
    }

    pub fn badges(&self) -> Vec<FilterBadge> {
        self.filters
            .iter()
            .filter(|f| !f.value.is_empty())
            .map(Filter::badge)
            .collect()
    }

    pub fn apply(&self, records: &[ResourceRecord]) -> Vec<ResourceRecord> {
        let mut current: Vec<&ResourceRecord> = records.iter().collect();
        for filter in &self.filters {
            if filter.value.is_empty() {
                continue;
            }
            if let Err(e) = filter.validate() {
                error!(error = %e, "Ignoring filter");
                continue;
            }
            current.retain(|record| filter.matches(record));
        }
        current.into_iter().cloned().collect()
    }
}
