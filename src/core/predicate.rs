// PlaceBoard - core/predicate.rs
//
// Predicate builder: turns filter criteria into a composable predicate
// over listing records.
// Core layer: pure logic, no I/O.
//
// A predicate is a conjunction of clauses. Each clause is a disjunction of
// case-insensitive substring tests over one or more attributes. Patterns are
// lowercased once at build time; record values are lowercased per test.

use crate::core::filter::{FilterCriteria, FilterFields};
use crate::core::model::ListingRecord;

/// A case-insensitive substring test over one or more attributes.
///
/// Matches if ANY of `attributes` holds a string containing the pattern.
/// Absent or non-string attributes never match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    attributes: Vec<String>,
    pattern_lower: String,
}

impl Clause {
    /// Clause over a single attribute.
    pub fn contains(attribute: &str, pattern: &str) -> Self {
        Self::any_contains(&[attribute], pattern)
    }

    /// Clause matching if any of `attributes` contains `pattern`.
    pub fn any_contains<S: AsRef<str>>(attributes: &[S], pattern: &str) -> Self {
        Self {
            attributes: attributes.iter().map(|a| a.as_ref().to_string()).collect(),
            pattern_lower: pattern.to_lowercase(),
        }
    }

    /// Attributes this clause inspects.
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// The lowercased pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern_lower
    }

    pub fn matches(&self, record: &ListingRecord) -> bool {
        self.attributes.iter().any(|attribute| {
            record
                .text(attribute)
                .is_some_and(|value| value.to_lowercase().contains(&self.pattern_lower))
        })
    }
}

/// Conjunction of clauses. The empty conjunction matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    /// The always-true predicate.
    pub fn always() -> Self {
        Self::default()
    }

    /// Add a clause that must also hold.
    pub fn and(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// True if this predicate has no clauses.
    pub fn is_always(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn matches(&self, record: &ListingRecord) -> bool {
        self.clauses.iter().all(|clause| clause.matches(record))
    }
}

/// Build the predicate for `criteria` using the attribute mapping in `fields`.
///
/// Each non-empty criterion contributes one clause: the term searches all of
/// `fields.term_attributes`, location and company one attribute each.
/// Empty criteria contribute nothing. Patterns are not trimmed.
pub fn build_predicate(criteria: &FilterCriteria, fields: &FilterFields) -> Predicate {
    let mut predicate = Predicate::always();

    if !criteria.term.is_empty() {
        predicate = predicate.and(Clause::any_contains(
            fields.term_attributes.as_slice(),
            &criteria.term,
        ));
    }
    if !criteria.location.is_empty() {
        predicate = predicate.and(Clause::contains(&fields.location_attribute, &criteria.location));
    }
    if !criteria.company.is_empty() {
        predicate = predicate.and(Clause::contains(&fields.company_attribute, &criteria.company));
    }

    predicate
}
