// PlaceBoard - core/applications.rs
//
// Application review: status vocabulary, status filtering, and the partial
// record sent to the store when a mentor records a decision.
// Core layer: pure logic, no I/O.

use crate::core::model::ListingRecord;
use crate::util::constants::{ATTR_APPLICATION_STATUS, ATTR_MENTOR_FEEDBACK};

/// Review state of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ApplicationStatus {
    #[default]
    Pending,
    UnderReview,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    /// All variants in review-flow order.
    pub fn all() -> &'static [ApplicationStatus] {
        &[
            ApplicationStatus::Pending,
            ApplicationStatus::UnderReview,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
        ]
    }

    /// Label as stored in the `applicationStatus` attribute.
    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::UnderReview => "Under Review",
            ApplicationStatus::Approved => "Approved",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    /// Exact label match; `None` for anything else.
    pub fn parse(label: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.label() == label)
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Displayed status of an application. Missing or unrecognised values
/// show as `Pending`.
pub fn status_of(record: &ListingRecord) -> ApplicationStatus {
    record
        .text(ATTR_APPLICATION_STATUS)
        .and_then(ApplicationStatus::parse)
        .unwrap_or_default()
}

/// Applications whose stored status equals `status`; `None` keeps all.
///
/// Compares the raw attribute, so a record with no status is not treated as
/// `Pending` here even though [`status_of`] displays it that way.
pub fn filter_by_status(
    records: &[ListingRecord],
    status: Option<ApplicationStatus>,
) -> Vec<ListingRecord> {
    match status {
        None => records.to_vec(),
        Some(status) => records
            .iter()
            .filter(|r| r.text(ATTR_APPLICATION_STATUS) == Some(status.label()))
            .cloned()
            .collect(),
    }
}

/// A mentor's decision on one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub id: String,
    pub status: ApplicationStatus,
    pub mentor_feedback: String,
}

impl StatusUpdate {
    /// Partial record carrying only the fields a review changes.
    pub fn to_partial(&self) -> ListingRecord {
        ListingRecord::new(self.id.clone())
            .with(ATTR_APPLICATION_STATUS, self.status.label())
            .with(ATTR_MENTOR_FEEDBACK, self.mentor_feedback.clone())
    }
}
