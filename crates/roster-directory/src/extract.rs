//! Typed field extraction from irregularly nested member records.
//!
//! Fields such as `researchOrganizations` arrive as a mapping, a list of
//! mappings or lists nested to arbitrary depth. The extractor walks them
//! depth-first in source order and projects every mapping it reaches to an
//! `{id, name}` pair.

use crate::page::MemberRecord;
use crate::reconcile::identifier_text;
use serde::Serialize;
use serde_json::{Map, Value};

/// `{id, name}` projection of a nested mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedRef {
    /// The mapping's `id` field, `null` when absent
    pub id: Value,
    /// The mapping's name in the extractor's locale
    pub name: Option<String>,
}

impl NamedRef {
    /// The id rendered as text; `None` when the mapping had no id.
    #[must_use]
    pub fn id_text(&self) -> Option<String> {
        match &self.id {
            Value::Null => None,
            id => Some(identifier_text(id)),
        }
    }
}

/// How many mappings to collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractMode {
    /// Stop at the first mapping reached
    #[default]
    First,
    /// Collect every mapping, in discovery order
    All,
}

/// Outcome of extracting one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    /// The record has no such field
    Missing,
    /// The field holds a scalar, returned unchanged
    Scalar(Value),
    /// The field is nested; projections of the mappings reached (possibly none)
    Refs(Vec<NamedRef>),
}

impl Extracted {
    /// The scalar value, if the field held one.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            Self::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// The projections, empty unless the field was nested.
    #[must_use]
    pub fn into_refs(self) -> Vec<NamedRef> {
        match self {
            Self::Refs(refs) => refs,
            _ => Vec::new(),
        }
    }
}

/// Extracts fields from member records, reading names in one locale.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    locale: String,
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new("en")
    }
}

impl FieldExtractor {
    /// Create an extractor reading `name.<locale>`.
    #[must_use]
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
        }
    }

    /// Extract `field` from `record`.
    ///
    /// Never fails: a missing field gives [`Extracted::Missing`] and a nested
    /// value with no mapping inside gives an empty [`Extracted::Refs`].
    #[must_use]
    pub fn extract(&self, record: &MemberRecord, field: &str, mode: ExtractMode) -> Extracted {
        match record.get(field) {
            None => Extracted::Missing,
            Some(value @ (Value::Object(_) | Value::Array(_))) => {
                Extracted::Refs(self.walk(value, mode))
            }
            Some(scalar) => Extracted::Scalar(scalar.clone()),
        }
    }

    /// First mapping reached under `field`.
    #[must_use]
    pub fn first_ref(&self, record: &MemberRecord, field: &str) -> Option<NamedRef> {
        self.extract(record, field, ExtractMode::First)
            .into_refs()
            .into_iter()
            .next()
    }

    /// Every mapping reached under `field`.
    #[must_use]
    pub fn all_refs(&self, record: &MemberRecord, field: &str) -> Vec<NamedRef> {
        self.extract(record, field, ExtractMode::All).into_refs()
    }

    fn walk(&self, root: &Value, mode: ExtractMode) -> Vec<NamedRef> {
        let mut found = Vec::new();
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            match node {
                Value::Object(fields) => {
                    found.push(self.project(fields));
                    if mode == ExtractMode::First {
                        break;
                    }
                }
                // Reversed so elements pop in source order.
                Value::Array(items) => stack.extend(items.iter().rev()),
                _ => {}
            }
        }

        found
    }

    fn project(&self, fields: &Map<String, Value>) -> NamedRef {
        let name = match fields.get("name") {
            Some(Value::Object(localized)) => localized
                .get(&self.locale)
                .and_then(Value::as_str)
                .map(str::to_string),
            Some(Value::String(name)) => Some(name.clone()),
            _ => None,
        };

        NamedRef {
            id: fields.get("id").cloned().unwrap_or(Value::Null),
            name,
        }
    }
}
