// PlaceBoard - core/feedback.rs
//
// Supervisor performance feedback: ordering, summary statistics, and
// construction of new feedback records.
// Core layer: pure logic, no I/O. The current time is always passed in.

use crate::core::model::ListingRecord;
use crate::util::constants::{
    ATTR_AREAS_FOR_IMPROVEMENT, ATTR_FEEDBACK_DATE, ATTR_INTERNSHIP_TITLE, ATTR_OVERALL_RATING,
    ATTR_STRENGTHS, ATTR_SUPERVISOR_COMMENTS, MAX_RATING, MIN_RATING,
};
use crate::util::error::FeedbackError;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Sort feedback newest first by `feedbackDate`.
///
/// Stable: entries with equal dates keep their relative order. Entries
/// without a parseable date sort as the Unix epoch, i.e. last.
pub fn sort_newest_first(records: &mut [ListingRecord]) {
    records.sort_by_key(|r| {
        std::cmp::Reverse(
            r.datetime(ATTR_FEEDBACK_DATE)
                .map(|dt| dt.timestamp_millis())
                .unwrap_or(0),
        )
    });
}

/// Mean `overallRating`; a missing rating counts as 0. Empty input → 0.0.
pub fn average_rating(records: &[ListingRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let total: f64 = records
        .iter()
        .map(|r| r.number(ATTR_OVERALL_RATING).unwrap_or(0.0))
        .sum();
    total / records.len() as f64
}

/// Number of entries dated strictly after `now - window_days`.
pub fn recent_count(records: &[ListingRecord], now: DateTime<Utc>, window_days: i64) -> usize {
    let cutoff = now - Duration::days(window_days);
    records
        .iter()
        .filter(|r| r.datetime(ATTR_FEEDBACK_DATE).is_some_and(|dt| dt > cutoff))
        .count()
}

/// A feedback submission before it has an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFeedback {
    pub overall_rating: f64,
    pub strengths: String,
    pub areas_for_improvement: String,
    pub supervisor_comments: String,
    pub internship_title: String,
    pub feedback_date: DateTime<Utc>,
}

impl NewFeedback {
    /// A blank submission dated `now` with a zero rating.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            overall_rating: 0.0,
            strengths: String::new(),
            areas_for_improvement: String::new(),
            supervisor_comments: String::new(),
            internship_title: String::new(),
            feedback_date: now,
        }
    }

    pub fn validate(&self) -> Result<(), FeedbackError> {
        if !(MIN_RATING..=MAX_RATING).contains(&self.overall_rating) {
            return Err(FeedbackError::RatingOutOfRange {
                rating: self.overall_rating,
                min: MIN_RATING,
                max: MAX_RATING,
            });
        }
        Ok(())
    }

    /// Convert into a storable record with a fresh UUID v4 id.
    /// Empty text fields are omitted.
    pub fn into_record(self) -> ListingRecord {
        let mut record = ListingRecord::new(Uuid::new_v4().to_string())
            .with(ATTR_OVERALL_RATING, self.overall_rating)
            .with(ATTR_FEEDBACK_DATE, self.feedback_date.to_rfc3339());

        for (attribute, value) in [
            (ATTR_STRENGTHS, self.strengths),
            (ATTR_AREAS_FOR_IMPROVEMENT, self.areas_for_improvement),
            (ATTR_SUPERVISOR_COMMENTS, self.supervisor_comments),
            (ATTR_INTERNSHIP_TITLE, self.internship_title),
        ] {
            if !value.is_empty() {
                record = record.with(attribute, value);
            }
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn feedback(id: &str, date: Option<&str>, rating: Option<f64>) -> ListingRecord {
        let mut record = ListingRecord::new(id);
        if let Some(d) = date {
            record = record.with(ATTR_FEEDBACK_DATE, d);
        }
        if let Some(r) = rating {
            record = record.with(ATTR_OVERALL_RATING, r);
        }
        record
    }

    fn ids(records: &[ListingRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_sort_newest_first_undated_last() {
        let mut records = vec![
            feedback("old", Some("2024-01-10"), None),
            feedback("undated", None, None),
            feedback("new", Some("2025-06-01T09:00:00Z"), None),
            feedback("mid", Some("2024-11-30"), None),
        ];
        sort_newest_first(&mut records);
        assert_eq!(ids(&records), vec!["new", "mid", "old", "undated"]);
    }

    #[test]
    fn test_average_rating_counts_missing_as_zero() {
        let records = vec![
            feedback("a", None, Some(4.0)),
            feedback("b", None, Some(5.0)),
            feedback("c", None, None),
        ];
        assert!((average_rating(&records) - 3.0).abs() < f64::EPSILON);
        assert_eq!(average_rating(&[]), 0.0);
    }

    #[test]
    fn test_recent_count_uses_strict_cutoff() {
        let now = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();
        let records = vec![
            feedback("in", Some("2025-06-20"), None),
            feedback("edge", Some("2025-06-01T00:00:00Z"), None),
            feedback("out", Some("2025-05-01"), None),
            feedback("undated", None, None),
        ];
        assert_eq!(recent_count(&records, now, 30), 1);
        assert_eq!(recent_count(&records, now, 31), 2);
    }

    #[test]
    fn test_offset_less_dates_sort_and_count() {
        let mut records = vec![
            feedback("dated", Some("2025-06-01"), None),
            feedback("naive", Some("2025-06-20T09:00:00"), None),
        ];
        let now = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();

        assert_eq!(recent_count(&records[1..], now, 30), 1);

        sort_newest_first(&mut records);
        assert_eq!(ids(&records), vec!["naive", "dated"]);
    }

    #[test]
    fn test_validate_rating_range() {
        let now = Utc::now();
        let mut submission = NewFeedback::new(now);
        assert!(submission.validate().is_ok());

        submission.overall_rating = 5.0;
        assert!(submission.validate().is_ok());

        submission.overall_rating = 5.5;
        assert!(matches!(
            submission.validate(),
            Err(FeedbackError::RatingOutOfRange { .. })
        ));

        submission.overall_rating = f64::NAN;
        assert!(submission.validate().is_err());
    }

    #[test]
    fn test_into_record_assigns_unique_ids_and_skips_empty_text() {
        let now = Utc.with_ymd_and_hms(2025, 3, 4, 12, 0, 0).unwrap();
        let submission = NewFeedback {
            overall_rating: 4.5,
            strengths: "Ownership".to_string(),
            internship_title: "Backend Intern".to_string(),
            ..NewFeedback::new(now)
        };

        let first = submission.clone().into_record();
        let second = submission.into_record();

        assert_ne!(first.id, second.id);
        assert_eq!(first.number(ATTR_OVERALL_RATING), Some(4.5));
        assert_eq!(first.datetime(ATTR_FEEDBACK_DATE), Some(now));
        assert_eq!(first.text(ATTR_STRENGTHS), Some("Ownership"));
        assert!(first.text(ATTR_SUPERVISOR_COMMENTS).is_none());
    }
}
