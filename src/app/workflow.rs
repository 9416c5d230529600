// PlaceBoard - app/workflow.rs
//
// Write workflows and single-record reads against the Record Store.
//
// Every write is followed by a full re-fetch of the affected collection
// (reload on write). Nothing patches a local copy, so what the caller shows
// after a write is whatever the store returns, including any lag on the
// store's side.

use crate::app::store::RecordStore;
use crate::core::applications::StatusUpdate;
use crate::core::feedback::{self, NewFeedback};
use crate::core::model::ListingRecord;
use crate::util::constants::{
    COLLECTION_APPLICATIONS, COLLECTION_FEEDBACK, COLLECTION_OPPORTUNITIES, COLLECTION_PROFILES,
};
use crate::util::error::Result;

/// Record a mentor's decision, then reload all applications.
pub fn submit_review(store: &dyn RecordStore, update: &StatusUpdate) -> Result<Vec<ListingRecord>> {
    store.update(COLLECTION_APPLICATIONS, update.to_partial())?;
    tracing::info!(id = %update.id, status = %update.status, "Application reviewed");
    Ok(store.get_all(COLLECTION_APPLICATIONS)?)
}

/// Validate and store new feedback, then reload the feedback collection
/// newest-first. Returns the id assigned to the new entry and the reloaded
/// collection.
pub fn submit_feedback(
    store: &dyn RecordStore,
    submission: NewFeedback,
) -> Result<(String, Vec<ListingRecord>)> {
    submission.validate()?;
    let created = store.create(COLLECTION_FEEDBACK, submission.into_record())?;
    tracing::info!(id = %created.id, "Feedback submitted");
    Ok((created.id, load_feedback(store)?))
}

/// All feedback, newest first.
pub fn load_feedback(store: &dyn RecordStore) -> Result<Vec<ListingRecord>> {
    let mut records = store.get_all(COLLECTION_FEEDBACK)?;
    feedback::sort_newest_first(&mut records);
    Ok(records)
}

/// The student profile shown on the profile page: the first stored profile.
pub fn load_profile(store: &dyn RecordStore) -> Result<Option<ListingRecord>> {
    Ok(store.get_all(COLLECTION_PROFILES)?.into_iter().next())
}

/// One opportunity by id.
pub fn load_opportunity(store: &dyn RecordStore, id: &str) -> Result<ListingRecord> {
    Ok(store.get_by_id(COLLECTION_OPPORTUNITIES, id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::store::MemoryStore;
    use crate::core::applications::{status_of, ApplicationStatus};
    use crate::util::error::{PlaceBoardError, StoreError};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_submit_review_reloads_with_new_status() {
        let store = MemoryStore::new().with_collection(
            COLLECTION_APPLICATIONS,
            vec![
                ListingRecord::new("a1").with("applicantName", "Ada"),
                ListingRecord::new("a2").with("applicantName", "Lin"),
            ],
        );
        let update = StatusUpdate {
            id: "a2".to_string(),
            status: ApplicationStatus::Approved,
            mentor_feedback: "Strong portfolio".to_string(),
        };

        let reloaded = submit_review(&store, &update).unwrap();

        assert_eq!(reloaded.len(), 2);
        assert_eq!(status_of(&reloaded[0]), ApplicationStatus::Pending);
        assert_eq!(status_of(&reloaded[1]), ApplicationStatus::Approved);
        assert_eq!(reloaded[1].text("applicantName"), Some("Lin"));
    }

    #[test]
    fn test_submit_review_unknown_id_fails() {
        let store = MemoryStore::new();
        let update = StatusUpdate {
            id: "ghost".to_string(),
            status: ApplicationStatus::Rejected,
            mentor_feedback: String::new(),
        };
        assert!(matches!(
            submit_review(&store, &update),
            Err(PlaceBoardError::Store(StoreError::NotFound { .. }))
        ));
    }

    #[test]
    fn test_submit_feedback_reloads_newest_first() {
        let store = MemoryStore::new().with_collection(
            COLLECTION_FEEDBACK,
            vec![ListingRecord::new("f-old").with("feedbackDate", "2024-01-01")],
        );
        let submission = NewFeedback {
            overall_rating: 4.0,
            ..NewFeedback::new(Utc.with_ymd_and_hms(2025, 5, 5, 0, 0, 0).unwrap())
        };

        let (id, reloaded) = submit_feedback(&store, submission).unwrap();

        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded[0].id, id);
        assert_eq!(reloaded[1].id, "f-old");
    }

    #[test]
    fn test_invalid_feedback_never_reaches_store() {
        let store = MemoryStore::new();
        let submission = NewFeedback {
            overall_rating: 9.0,
            ..NewFeedback::new(Utc::now())
        };
        assert!(matches!(
            submit_feedback(&store, submission),
            Err(PlaceBoardError::Feedback(_))
        ));
        assert!(store.get_all(COLLECTION_FEEDBACK).unwrap().is_empty());
    }

    #[test]
    fn test_load_profile_first_or_none() {
        assert!(load_profile(&MemoryStore::new()).unwrap().is_none());

        let store = MemoryStore::new().with_collection(
            COLLECTION_PROFILES,
            vec![ListingRecord::new("p1"), ListingRecord::new("p2")],
        );
        assert_eq!(load_profile(&store).unwrap().unwrap().id, "p1");
    }
}
