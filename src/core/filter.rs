// PlaceBoard - core/filter.rs
//
// Filter engine for listing records.
// All active criteria are AND-combined.
// Core layer: pure logic, no I/O, no state between calls.

use crate::core::facet::{extract_facets, FacetSet};
use crate::core::model::ListingRecord;
use crate::core::predicate::build_predicate;
use crate::util::constants;

/// User-selected filter values. Empty string = criterion inactive.
///
/// Matching is case-insensitive substring; whitespace is taken literally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Free-text term searched across `FilterFields::term_attributes`.
    pub term: String,

    /// Matched against `FilterFields::location_attribute`.
    pub location: String,

    /// Matched against `FilterFields::company_attribute`.
    pub company: String,
}

impl FilterCriteria {
    /// Returns true if no criteria are active.
    pub fn is_empty(&self) -> bool {
        self.term.is_empty() && self.location.is_empty() && self.company.is_empty()
    }

    /// Deactivate every criterion.
    pub fn clear(&mut self) {
        self.term.clear();
        self.location.clear();
        self.company.clear();
    }

    pub fn mode(&self) -> FilterMode {
        if self.is_empty() {
            FilterMode::Idle
        } else {
            FilterMode::Filtered
        }
    }
}

/// Whether the caller is showing the full collection or a derived subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// No criteria active; full list shown.
    Idle,
    /// One or more criteria active; derived subset shown.
    Filtered,
}

/// Which record attributes each criterion inspects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterFields {
    /// Attributes searched by the term (match if ANY contains it).
    pub term_attributes: Vec<String>,

    /// Attribute matched by the location criterion; also a facet.
    pub location_attribute: String,

    /// Attribute matched by the company criterion; also a facet.
    pub company_attribute: String,
}

impl Default for FilterFields {
    fn default() -> Self {
        Self {
            term_attributes: constants::DEFAULT_TERM_ATTRIBUTES
                .iter()
                .map(|a| a.to_string())
                .collect(),
            location_attribute: constants::DEFAULT_LOCATION_ATTRIBUTE.to_string(),
            company_attribute: constants::DEFAULT_COMPANY_ATTRIBUTE.to_string(),
        }
    }
}

impl FilterFields {
    /// The facet-bearing attributes, in display order.
    pub fn facet_attributes(&self) -> [&str; 2] {
        [
            self.location_attribute.as_str(),
            self.company_attribute.as_str(),
        ]
    }
}

/// Visible records plus the facets of the full collection.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub visible: Vec<ListingRecord>,
    pub facets: FacetSet,
}

/// Indices of records matching `criteria`, in original order.
///
/// Returns indices into `records` rather than copies so the controller can
/// recompute its view on every criteria change without cloning.
pub fn matching_indices(
    records: &[ListingRecord],
    criteria: &FilterCriteria,
    fields: &FilterFields,
) -> Vec<usize> {
    if criteria.is_empty() {
        return (0..records.len()).collect();
    }

    let predicate = build_predicate(criteria, fields);

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| predicate.matches(record))
        .map(|(idx, _)| idx)
        .collect()
}

/// Records matching `criteria`, in original relative order.
///
/// Always returns a new `Vec`; with empty criteria it is a full copy of the
/// input, never the input itself.
pub fn apply_filter(
    records: &[ListingRecord],
    criteria: &FilterCriteria,
    fields: &FilterFields,
) -> Vec<ListingRecord> {
    let predicate = build_predicate(criteria, fields);
    records
        .iter()
        .filter(|record| predicate.matches(record))
        .cloned()
        .collect()
}

/// Apply `criteria` and report the result together with the location and
/// company facets of the full (unfiltered) collection.
pub fn run(records: &[ListingRecord], criteria: &FilterCriteria, fields: &FilterFields) -> FilterOutcome {
    let visible = apply_filter(records, criteria, fields);

    tracing::debug!(
        total = records.len(),
        visible = visible.len(),
        mode = ?criteria.mode(),
        "Filter applied"
    );

    FilterOutcome {
        visible,
        facets: extract_facets(records, &fields.facet_attributes()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(id: &str, role: &str, company: &str, location: &str) -> ListingRecord {
        ListingRecord::new(id)
            .with("role", role)
            .with("companyName", company)
            .with("location", location)
    }

    fn scenario() -> Vec<ListingRecord> {
        vec![
            make_record("1", "Backend Intern", "Acme", "Remote"),
            make_record("2", "Designer", "Globex", "NYC"),
        ]
    }

    fn ids(records: &[ListingRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_returns_all() {
        let records = scenario();
        let result = apply_filter(&records, &FilterCriteria::default(), &FilterFields::default());
        assert_eq!(result, records);
        assert_eq!(
            matching_indices(&records, &FilterCriteria::default(), &FilterFields::default()),
            vec![0, 1]
        );
    }

    #[test]
    fn test_term_filter_scenario() {
        let criteria = FilterCriteria {
            term: "intern".to_string(),
            ..Default::default()
        };
        let result = apply_filter(&scenario(), &criteria, &FilterFields::default());
        assert_eq!(ids(&result), vec!["1"]);
    }

    #[test]
    fn test_location_filter_case_insensitive() {
        let criteria = FilterCriteria {
            location: "nyc".to_string(),
            ..Default::default()
        };
        let result = apply_filter(&scenario(), &criteria, &FilterFields::default());
        assert_eq!(ids(&result), vec!["2"]);
    }

    #[test]
    fn test_no_match_is_empty_vec() {
        let criteria = FilterCriteria {
            term: "zzz-no-match".to_string(),
            ..Default::default()
        };
        let result = apply_filter(&scenario(), &criteria, &FilterFields::default());
        assert!(result.is_empty());
    }

    #[test]
    fn test_outcome_reports_facets_of_full_collection() {
        let criteria = FilterCriteria {
            company: "globex".to_string(),
            ..Default::default()
        };
        let outcome = run(&scenario(), &criteria, &FilterFields::default());

        assert_eq!(ids(&outcome.visible), vec!["2"]);
        assert_eq!(
            outcome.facets.get("location").unwrap(),
            &["Remote".to_string(), "NYC".to_string()]
        );
        assert_eq!(
            outcome.facets.get("companyName").unwrap(),
            &["Acme".to_string(), "Globex".to_string()]
        );
    }

    #[test]
    fn test_idempotent() {
        let records = vec![
            make_record("1", "Backend Intern", "Acme", "Remote"),
            make_record("2", "Intern, Design", "Globex", "NYC"),
            make_record("3", "Data Intern", "Initech", "Remote"),
            make_record("4", "Manager", "Acme", "Remote"),
        ];
        let criteria = FilterCriteria {
            term: "intern".to_string(),
            location: "rem".to_string(),
            ..Default::default()
        };
        let fields = FilterFields::default();

        let once = apply_filter(&records, &criteria, &fields);
        let twice = apply_filter(&once, &criteria, &fields);
        assert_eq!(ids(&once), vec!["1", "3"]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_criteria_mode_transitions() {
        let mut criteria = FilterCriteria::default();
        assert_eq!(criteria.mode(), FilterMode::Idle);

        criteria.location = "NYC".to_string();
        assert_eq!(criteria.mode(), FilterMode::Filtered);

        criteria.clear();
        assert_eq!(criteria.mode(), FilterMode::Idle);
        assert!(criteria.is_empty());
    }
}
