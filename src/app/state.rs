// PlaceBoard - app/state.rs
//
// Board state: the single owner of the loaded collection and the user's
// filter selections. Every mutation recomputes the visible view through
// the pure filter engine; facets are derived from the collection on demand.

use crate::app::loader::LoadProgress;
use crate::core::facet::{extract_facets, FacetSet};
use crate::core::filter::{FilterCriteria, FilterFields, FilterMode};
use crate::core::model::ListingRecord;

/// Browse-view state for one collection.
#[derive(Debug)]
pub struct BoardState {
    /// Collection this board shows.
    pub collection: String,

    /// All records from the most recent applied load.
    records: Vec<ListingRecord>,

    /// Indices of records matching `criteria` (into `records`).
    visible_indices: Vec<usize>,

    /// Current filter selections.
    criteria: FilterCriteria,

    /// Attribute mapping for the criteria.
    fields: FilterFields,

    /// True while a load newer than the last applied one is in flight.
    pub loading: bool,

    /// Generation of the last load result applied (0 = none yet).
    applied_generation: u64,

    /// Whether any load has ever succeeded.
    has_loaded: bool,

    /// Status message for display.
    pub status_message: String,
}

impl BoardState {
    pub fn new(collection: &str, fields: FilterFields) -> Self {
        Self {
            collection: collection.to_string(),
            records: Vec::new(),
            visible_indices: Vec::new(),
            criteria: FilterCriteria::default(),
            fields,
            loading: true,
            applied_generation: 0,
            has_loaded: false,
            status_message: "Loading...".to_string(),
        }
    }

    /// Replace the collection and recompute the view.
    pub fn set_records(&mut self, records: Vec<ListingRecord>) {
        self.records = records;
        self.has_loaded = true;
        self.loading = false;
        self.status_message = format!("{} records loaded.", self.records.len());
        self.recompute();
    }

    /// Apply one progress message from the loader.
    ///
    /// Returns true if the message changed the state. Messages for another
    /// collection, or from a generation not newer than the last applied one,
    /// are ignored. `Started` only raises `loading`; records stay on display
    /// until the result arrives.
    pub fn apply_progress(&mut self, progress: LoadProgress) -> bool {
        let generation = progress.generation();
        match progress {
            LoadProgress::Started { collection, .. } => {
                if collection != self.collection || generation <= self.applied_generation {
                    return false;
                }
                self.loading = true;
                true
            }
            LoadProgress::Loaded {
                collection,
                records,
                ..
            } => {
                if !self.accepts(&collection, generation) {
                    return false;
                }
                self.applied_generation = generation;
                self.set_records(records);
                true
            }
            LoadProgress::Failed {
                collection, error, ..
            } => {
                if !self.accepts(&collection, generation) {
                    return false;
                }
                self.applied_generation = generation;
                self.load_failed(&error);
                true
            }
        }
    }

    fn accepts(&self, collection: &str, generation: u64) -> bool {
        if collection != self.collection {
            return false;
        }
        if generation <= self.applied_generation {
            tracing::debug!(
                generation,
                applied = self.applied_generation,
                collection,
                "Discarding stale load result"
            );
            return false;
        }
        true
    }

    /// Record a fetch failure. The previously loaded collection, if any,
    /// stays on display; otherwise the view stays empty.
    pub fn load_failed(&mut self, error: &str) {
        self.loading = false;
        tracing::warn!(collection = %self.collection, error, "Keeping current records after load failure");
        self.status_message = if self.has_loaded {
            format!("Refresh failed, showing previous results: {error}")
        } else {
            format!("Could not load {}: {error}", self.collection)
        };
    }

    pub fn set_term(&mut self, term: &str) {
        self.criteria.term = term.to_string();
        self.recompute();
    }

    pub fn set_location(&mut self, location: &str) {
        self.criteria.location = location.to_string();
        self.recompute();
    }

    pub fn set_company(&mut self, company: &str) {
        self.criteria.company = company.to_string();
        self.recompute();
    }

    /// Replace all criteria at once.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.recompute();
    }

    /// Back to `Idle`: full list shown.
    pub fn clear_filters(&mut self) {
        self.criteria.clear();
        self.recompute();
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn fields(&self) -> &FilterFields {
        &self.fields
    }

    pub fn mode(&self) -> FilterMode {
        self.criteria.mode()
    }

    pub fn records(&self) -> &[ListingRecord] {
        &self.records
    }

    /// Records currently shown, in collection order.
    pub fn visible(&self) -> impl Iterator<Item = &ListingRecord> + '_ {
        self.visible_indices
            .iter()
            .filter_map(move |&idx| self.records.get(idx))
    }

    /// Owned copy of the visible records (for export).
    pub fn visible_records(&self) -> Vec<ListingRecord> {
        self.visible().cloned().collect()
    }

    pub fn visible_count(&self) -> usize {
        self.visible_indices.len()
    }

    /// Location and company facets of the full collection.
    pub fn facets(&self) -> FacetSet {
        extract_facets(&self.records, &self.fields.facet_attributes())
    }

    fn recompute(&mut self) {
        self.visible_indices =
            crate::core::filter::matching_indices(&self.records, &self.criteria, &self.fields);
        tracing::trace!(
            collection = %self.collection,
            visible = self.visible_indices.len(),
            total = self.records.len(),
            "View recomputed"
        );
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

    fn loaded(generation: u64, records: Vec<ListingRecord>) -> LoadProgress {
        LoadProgress::Loaded {
            generation,
            collection: "opportunities".to_string(),
            records,
        }
    }

    fn board() -> BoardState {
        let mut state = BoardState::new("opportunities", FilterFields::default());
        state.set_records(vec![
            make_record("1", "Backend Intern", "Acme", "Remote"),
            make_record("2", "Designer", "Globex", "NYC"),
        ]);
        state
    }

    fn visible_ids(state: &BoardState) -> Vec<String> {
        state.visible().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_idle_filtered_cycle() {
        let mut state = board();
        assert_eq!(state.mode(), FilterMode::Idle);
        assert_eq!(state.visible_count(), 2);

        state.set_term("intern");
        assert_eq!(state.mode(), FilterMode::Filtered);
        assert_eq!(visible_ids(&state), vec!["1"]);

        state.set_location("nyc");
        assert!(visible_ids(&state).is_empty());

        state.clear_filters();
        assert_eq!(state.mode(), FilterMode::Idle);
        assert_eq!(visible_ids(&state), vec!["1", "2"]);
    }

    #[test]
    fn test_facets_follow_collection() {
        let mut state = board();
        assert_eq!(
            state.facets().get("location").unwrap(),
            &["Remote".to_string(), "NYC".to_string()]
        );

        state.set_records(vec![make_record("3", "Analyst", "Initech", "Pune")]);
        assert_eq!(state.facets().get("location").unwrap(), &["Pune".to_string()]);
        assert_eq!(state.facets().get("companyName").unwrap(), &["Initech".to_string()]);
    }

    #[test]
    fn test_criteria_survive_reload() {
        let mut state = board();
        state.set_company("globex");
        state.set_records(vec![
            make_record("4", "PM", "Globex", "Remote"),
            make_record("5", "PM", "Acme", "Remote"),
        ]);
        assert_eq!(visible_ids(&state), vec!["4"]);
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let mut state = BoardState::new("opportunities", FilterFields::default());

        assert!(state.apply_progress(loaded(2, vec![make_record("new", "A", "B", "C")])));
        // Generation 1 was requested earlier but finished later.
        assert!(!state.apply_progress(loaded(1, vec![make_record("old", "A", "B", "C")])));

        assert_eq!(visible_ids(&state), vec!["new"]);
    }

    #[test]
    fn test_refresh_sets_loading_until_result() {
        let mut state = BoardState::new("opportunities", FilterFields::default());
        state.apply_progress(loaded(1, vec![make_record("1", "A", "B", "C")]));
        assert!(!state.loading);

        assert!(state.apply_progress(LoadProgress::Started {
            generation: 2,
            collection: "opportunities".to_string(),
        }));
        assert!(state.loading);
        assert_eq!(visible_ids(&state), vec!["1"]);

        // A late start from an already superseded generation changes nothing.
        state.apply_progress(loaded(2, vec![make_record("2", "A", "B", "C")]));
        assert!(!state.apply_progress(LoadProgress::Started {
            generation: 1,
            collection: "opportunities".to_string(),
        }));
        assert!(!state.loading);
        assert_eq!(visible_ids(&state), vec!["2"]);
    }

    #[test]
    fn test_other_collection_ignored() {
        let mut state = BoardState::new("opportunities", FilterFields::default());
        let applied = state.apply_progress(LoadProgress::Loaded {
            generation: 1,
            collection: "applications".to_string(),
            records: vec![ListingRecord::new("a")],
        });
        assert!(!applied);
        assert!(state.records().is_empty());
        assert!(state.loading);
    }

    #[test]
    fn test_failure_before_first_load_leaves_empty_view() {
        let mut state = BoardState::new("opportunities", FilterFields::default());
        state.apply_progress(LoadProgress::Failed {
            generation: 1,
            collection: "opportunities".to_string(),
            error: "connection refused".to_string(),
        });
        assert!(!state.loading);
        assert_eq!(state.visible_count(), 0);
        assert!(state.status_message.contains("connection refused"));
    }

    #[test]
    fn test_failure_after_load_keeps_stale_records() {
        let mut state = BoardState::new("opportunities", FilterFields::default());
        state.apply_progress(loaded(1, vec![make_record("1", "A", "B", "C")]));
        state.apply_progress(LoadProgress::Failed {
            generation: 2,
            collection: "opportunities".to_string(),
            error: "timeout".to_string(),
        });
        assert_eq!(visible_ids(&state), vec!["1"]);
        assert!(state.status_message.starts_with("Refresh failed"));
    }
}
