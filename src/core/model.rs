// PlaceBoard - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.
//
// These types are the shared vocabulary across all layers.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// =============================================================================
// Listing Record
// =============================================================================

/// One item in a browsable collection (an opportunity, an application,
/// a feedback entry, a student profile).
///
/// Records are schemaless: beyond the identifier every field is an entry in
/// `attributes`. Typed reads go through [`text`](Self::text),
/// [`number`](Self::number) and [`datetime`](Self::datetime), which treat a
/// value of the wrong JSON type as absent rather than failing.
///
/// Records are immutable once fetched. The filter engine only ever reads
/// them and hands back clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// Opaque identifier, unique within its collection.
    #[serde(rename = "_id")]
    pub id: String,

    /// Attribute name to raw JSON value.
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

impl ListingRecord {
    /// Create a record with no attributes.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with(mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(attribute.into(), value.into());
        self
    }

    /// String value of `attribute`, or `None` if absent or not a string.
    pub fn text(&self, attribute: &str) -> Option<&str> {
        match self.attributes.get(attribute) {
            Some(Value::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Numeric value of `attribute`, or `None` if absent or not a number.
    pub fn number(&self, attribute: &str) -> Option<f64> {
        self.attributes.get(attribute).and_then(Value::as_f64)
    }

    /// Timestamp value of `attribute`.
    ///
    /// Accepts RFC 3339 strings and bare `YYYY-MM-DD` dates (midnight UTC).
    pub fn datetime(&self, attribute: &str) -> Option<DateTime<Utc>> {
        parse_datetime(self.text(attribute)?)
    }

    /// Display form of `attribute` for tabular output: strings as-is,
    /// numbers and booleans rendered, everything else empty.
    pub fn display(&self, attribute: &str) -> String {
        match self.attributes.get(attribute) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    /// Shallow-merge the attributes of `partial` over this record.
    ///
    /// Used by stores to apply an update; the id is never changed.
    pub fn merge(&mut self, partial: &ListingRecord) {
        for (key, value) in &partial.attributes {
            self.attributes.insert(key.clone(), value.clone());
        }
    }
}

/// Parse an RFC 3339 timestamp, an offset-less `YYYY-MM-DDTHH:MM:SS` (UTC),
/// or a `YYYY-MM-DD` date.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // No offset given: read as UTC.
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// =============================================================================
// Collection envelope
// =============================================================================

/// Shape of a `getAll` response and of a collection file on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub items: Vec<ListingRecord>,
}
