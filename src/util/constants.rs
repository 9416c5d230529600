// PlaceBoard - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.
// Every configurable value validated in platform::config has its default
// and its bounds defined here.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "PlaceBoard";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "PlaceBoard";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Record Store collections
// =============================================================================

/// Internship and job listings.
pub const COLLECTION_OPPORTUNITIES: &str = "opportunities";

/// Student applications to opportunities.
pub const COLLECTION_APPLICATIONS: &str = "applications";

/// Supervisor performance feedback.
pub const COLLECTION_FEEDBACK: &str = "performancefeedback";

/// Student profiles.
pub const COLLECTION_PROFILES: &str = "studentprofiles";

/// Maximum length of a collection name accepted by the JSON store.
pub const MAX_COLLECTION_NAME_LENGTH: usize = 64;

/// Extension of collection files inside the store directory.
pub const COLLECTION_FILE_EXTENSION: &str = "json";

/// Sub-directory of the platform data directory used by the default store.
pub const STORE_DIR_NAME: &str = "store";

// =============================================================================
// Attribute names
// =============================================================================

/// Serialised name of the record identifier.
pub const ATTR_ID: &str = "_id";

// -- Opportunities --
pub const ATTR_ROLE: &str = "role";
pub const ATTR_COMPANY_NAME: &str = "companyName";
pub const ATTR_DESCRIPTION: &str = "description";
pub const ATTR_LOCATION: &str = "location";
pub const ATTR_APPLICATION_DEADLINE: &str = "applicationDeadline";
pub const ATTR_ELIGIBILITY: &str = "eligibilityCriteria";
pub const ATTR_STIPEND: &str = "stipend";
pub const ATTR_APPLICATION_URL: &str = "applicationUrl";

// -- Applications --
pub const ATTR_APPLICANT_NAME: &str = "applicantName";
pub const ATTR_OPPORTUNITY_TITLE: &str = "opportunityTitle";
pub const ATTR_SUBMISSION_DATE: &str = "submissionDate";
pub const ATTR_APPLICATION_STATUS: &str = "applicationStatus";
pub const ATTR_MENTOR_FEEDBACK: &str = "mentorFeedback";

// -- Performance feedback --
pub const ATTR_FEEDBACK_DATE: &str = "feedbackDate";
pub const ATTR_OVERALL_RATING: &str = "overallRating";
pub const ATTR_STRENGTHS: &str = "strengths";
pub const ATTR_AREAS_FOR_IMPROVEMENT: &str = "areasForImprovement";
pub const ATTR_SUPERVISOR_COMMENTS: &str = "supervisorComments";
pub const ATTR_INTERNSHIP_TITLE: &str = "internshipTitle";

// -- Student profiles --
pub const ATTR_STUDENT_NAME: &str = "studentName";
pub const ATTR_EMAIL: &str = "email";
pub const ATTR_MAJOR: &str = "major";
pub const ATTR_GRADUATION_YEAR: &str = "graduationYear";
pub const ATTR_GPA: &str = "gpa";
pub const ATTR_SKILLS: &str = "skills";

// =============================================================================
// Filtering
// =============================================================================

/// Attributes searched by the free-text term when not overridden in config.
pub const DEFAULT_TERM_ATTRIBUTES: &[&str] = &[ATTR_ROLE, ATTR_COMPANY_NAME, ATTR_DESCRIPTION];

/// Attribute matched by the location criterion.
pub const DEFAULT_LOCATION_ATTRIBUTE: &str = ATTR_LOCATION;

/// Attribute matched by the company criterion.
pub const DEFAULT_COMPANY_ATTRIBUTE: &str = ATTR_COMPANY_NAME;

/// Upper bound on the number of attributes a term may search.
pub const MAX_TERM_ATTRIBUTES: usize = 16;

/// Labelled fields printed by `show`, in display order.
pub const OPPORTUNITY_DETAIL_FIELDS: &[(&str, &str)] = &[
    ("Role", ATTR_ROLE),
    ("Company", ATTR_COMPANY_NAME),
    ("Location", ATTR_LOCATION),
    ("Description", ATTR_DESCRIPTION),
    ("Deadline", ATTR_APPLICATION_DEADLINE),
    ("Eligibility", ATTR_ELIGIBILITY),
    ("Stipend", ATTR_STIPEND),
    ("Apply at", ATTR_APPLICATION_URL),
];

/// Labelled fields printed by `profile`, in display order.
pub const PROFILE_FIELDS: &[(&str, &str)] = &[
    ("Name", ATTR_STUDENT_NAME),
    ("Email", ATTR_EMAIL),
    ("Major", ATTR_MAJOR),
    ("Graduation year", ATTR_GRADUATION_YEAR),
    ("GPA", ATTR_GPA),
    ("Skills", ATTR_SKILLS),
];

/// Columns written by `browse --export` in CSV form.
pub const OPPORTUNITY_EXPORT_COLUMNS: &[&str] = &[
    ATTR_ID,
    ATTR_ROLE,
    ATTR_COMPANY_NAME,
    ATTR_LOCATION,
    ATTR_STIPEND,
    ATTR_APPLICATION_DEADLINE,
    ATTR_APPLICATION_URL,
];

// =============================================================================
// Feedback
// =============================================================================

/// Window used for the "recent reviews" count.
pub const DEFAULT_RECENT_WINDOW_DAYS: i64 = 30;

/// Lower bound for `[feedback] recent_window_days`.
pub const MIN_RECENT_WINDOW_DAYS: i64 = 1;

/// Upper bound for `[feedback] recent_window_days`.
pub const MAX_RECENT_WINDOW_DAYS: i64 = 365;

/// Lowest accepted overall rating.
pub const MIN_RATING: f64 = 0.0;

/// Highest accepted overall rating.
pub const MAX_RATING: f64 = 5.0;

// =============================================================================
// Loading
// =============================================================================

/// How long the CLI waits for a background collection load.
pub const LOAD_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Export
// =============================================================================

/// Hard upper bound on records written by a single export.
pub const MAX_EXPORT_RECORDS: usize = 1_000_000;

/// Lower bound for `[export] max_records`.
pub const MIN_EXPORT_RECORDS: usize = 1;

// =============================================================================
// Logging & files
// =============================================================================

/// Default log level when neither RUST_LOG, --debug nor config override it.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Extension appended to files being written atomically.
pub const TEMP_FILE_SUFFIX: &str = "tmp";

/// Maximum accepted size of a single collection file.
pub const MAX_COLLECTION_FILE_SIZE: u64 = 256 * 1024 * 1024; // 256 MB
