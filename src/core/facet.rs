// PlaceBoard - core/facet.rs
//
// Facet extraction: the distinct values of an attribute across a
// collection, used to populate filter option lists.
// Core layer: pure logic, no I/O.
//
// Facets are always derived from the authoritative collection on demand.
// Nothing caches them, so they cannot drift from the records they describe.

use crate::core::model::ListingRecord;
use std::collections::HashSet;

/// Distinct values per facet-bearing attribute, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetSet {
    facets: Vec<(String, Vec<String>)>,
}

impl FacetSet {
    /// Values for `attribute`, or `None` if it was not requested.
    pub fn get(&self, attribute: &str) -> Option<&[String]> {
        self.facets
            .iter()
            .find(|(name, _)| name == attribute)
            .map(|(_, values)| values.as_slice())
    }

    /// Iterate `(attribute, values)` pairs in the order they were requested.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.facets
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }
}

/// Distinct non-empty string values of `attribute`, in first-seen order.
///
/// Absent, empty and non-string values are skipped. Comparison is exact,
/// so values differing only in case are kept as separate facet values.
pub fn extract_facet(records: &[ListingRecord], attribute: &str) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut values = Vec::new();

    for value in records.iter().filter_map(|r| r.text(attribute)) {
        if !value.is_empty() && seen.insert(value) {
            values.push(value.to_string());
        }
    }

    values
}

/// Extract one facet per attribute. Repeated attribute names are ignored.
pub fn extract_facets(records: &[ListingRecord], attributes: &[&str]) -> FacetSet {
    let mut facets: Vec<(String, Vec<String>)> = Vec::with_capacity(attributes.len());
    for &attribute in attributes {
        if facets.iter().any(|(name, _)| name == attribute) {
            continue;
        }
        facets.push((attribute.to_string(), extract_facet(records, attribute)));
    }

    tracing::trace!(
        records = records.len(),
        facets = facets.len(),
        "Facets extracted"
    );

    FacetSet { facets }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(id: &str, location: Option<&str>, company: &str) -> ListingRecord {
        let record = ListingRecord::new(id).with("companyName", company);
        match location {
            Some(loc) => record.with("location", loc),
            None => record,
        }
    }

    #[test]
    fn test_facet_first_seen_order_without_duplicates() {
        let records = vec![
            make_record("1", Some("Remote"), "Acme"),
            make_record("2", Some("NYC"), "Globex"),
            make_record("3", Some("Remote"), "Initech"),
            make_record("4", Some("Berlin"), "Acme"),
        ];
        assert_eq!(
            extract_facet(&records, "location"),
            vec!["Remote", "NYC", "Berlin"]
        );
        assert_eq!(
            extract_facet(&records, "companyName"),
            vec!["Acme", "Globex", "Initech"]
        );
    }

    #[test]
    fn test_facet_skips_absent_empty_and_malformed() {
        let records = vec![
            make_record("1", None, "Acme"),
            make_record("2", Some(""), "Acme"),
            ListingRecord::new("3").with("location", 7),
            make_record("4", Some("Pune"), "Acme"),
        ];
        assert_eq!(extract_facet(&records, "location"), vec!["Pune"]);
    }

    #[test]
    fn test_facet_is_case_sensitive() {
        let records = vec![
            make_record("1", Some("NYC"), "Acme"),
            make_record("2", Some("nyc"), "Acme"),
        ];
        assert_eq!(extract_facet(&records, "location"), vec!["NYC", "nyc"]);
    }

    #[test]
    fn test_unknown_attribute_yields_empty() {
        let records = vec![make_record("1", Some("NYC"), "Acme")];
        assert!(extract_facet(&records, "stipend").is_empty());
        assert!(extract_facet(&[], "location").is_empty());
    }

    #[test]
    fn test_facet_set_lookup_and_order() {
        let records = vec![make_record("1", Some("NYC"), "Acme")];
        let set = extract_facets(&records, &["location", "companyName", "location"]);

        assert_eq!(set.len(), 2);
        assert_eq!(set.get("companyName"), Some(&["Acme".to_string()][..]));
        assert!(set.get("role").is_none());

        let names: Vec<&str> = set.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["location", "companyName"]);
    }
}
