// PlaceBoard - cli.rs
//
// Subcommand definitions and handlers.
// Wires the Record Store, background loader and board state together and
// renders results as plain text on stdout.

use crate::app::loader::{LoadManager, LoadProgress};
use crate::app::state::BoardState;
use crate::app::store::RecordStore;
use crate::app::workflow;
use crate::core::applications::{self, ApplicationStatus, StatusUpdate};
use crate::core::export;
use crate::core::feedback::{self, NewFeedback};
use crate::core::filter::FilterCriteria;
use crate::core::model::ListingRecord;
use crate::platform::config::AppConfig;
use crate::util::constants::*;
use crate::util::error::{ExportError, PlaceBoardError, Result};
use chrono::Utc;
use clap::{Args, Subcommand, ValueEnum};
use serde_json::Value;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Everything a command handler needs.
pub struct Context {
    pub store: Arc<dyn RecordStore>,
    pub config: AppConfig,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List opportunities, optionally filtered, with facets and export.
    Browse(BrowseArgs),

    /// Show one opportunity.
    Show {
        /// Opportunity id.
        id: String,
    },

    /// List applications.
    Applications {
        /// Only applications with this status.
        #[arg(short = 's', long = "status", value_parser = parse_status)]
        status: Option<ApplicationStatus>,
    },

    /// Record a decision on an application.
    Review {
        /// Application id.
        id: String,

        /// New status: Pending, "Under Review", Approved or Rejected.
        #[arg(short = 's', long = "status", value_parser = parse_status)]
        status: ApplicationStatus,

        /// Mentor feedback stored with the decision.
        #[arg(short = 'f', long = "feedback", default_value = "")]
        feedback: String,
    },

    /// List or add performance feedback.
    #[command(subcommand)]
    Feedback(FeedbackCommand),

    /// Show the student profile.
    Profile,
}

#[derive(Args, Debug, Default)]
pub struct BrowseArgs {
    /// Free-text term matched against role, company and description.
    #[arg(short = 't', long = "term")]
    pub term: Option<String>,

    /// Location substring.
    #[arg(short = 'l', long = "location")]
    pub location: Option<String>,

    /// Company substring.
    #[arg(short = 'c', long = "company")]
    pub company: Option<String>,

    /// Also print the distinct locations and companies.
    #[arg(long = "facets")]
    pub facets: bool,

    /// Write the visible opportunities to this file.
    #[arg(short = 'o', long = "export")]
    pub export: Option<PathBuf>,

    /// Export format.
    #[arg(long = "format", value_enum, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,
}

#[derive(Subcommand, Debug)]
pub enum FeedbackCommand {
    /// List feedback newest first with the average rating.
    List,

    /// Submit new feedback.
    Add {
        /// Overall rating (0-5).
        #[arg(short = 'r', long = "rating")]
        rating: f64,

        #[arg(long = "strengths", default_value = "")]
        strengths: String,

        #[arg(long = "improvements", default_value = "")]
        improvements: String,

        #[arg(long = "comments", default_value = "")]
        comments: String,

        /// Internship the feedback refers to.
        #[arg(long = "title", default_value = "")]
        title: String,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

/// Accepts status labels case-insensitively, with `-` or `_` for the space
/// in "Under Review".
fn parse_status(raw: &str) -> std::result::Result<ApplicationStatus, String> {
    let wanted = raw.trim().replace(['-', '_'], " ").to_lowercase();
    ApplicationStatus::all()
        .iter()
        .copied()
        .find(|s| s.label().to_lowercase() == wanted)
        .ok_or_else(|| {
            let labels: Vec<&str> = ApplicationStatus::all().iter().map(|s| s.label()).collect();
            format!("unknown status '{raw}' (expected one of: {})", labels.join(", "))
        })
}

/// Run one command to completion.
pub fn run(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Browse(args) => browse(ctx, args),
        Command::Show { id } => show(ctx, &id),
        Command::Applications { status } => list_applications(ctx, status),
        Command::Review {
            id,
            status,
            feedback,
        } => review(
            ctx,
            StatusUpdate {
                id,
                status,
                mentor_feedback: feedback,
            },
        ),
        Command::Feedback(FeedbackCommand::List) => list_feedback(ctx),
        Command::Feedback(FeedbackCommand::Add {
            rating,
            strengths,
            improvements,
            comments,
            title,
        }) => add_feedback(
            ctx,
            NewFeedback {
                overall_rating: rating,
                strengths,
                areas_for_improvement: improvements,
                supervisor_comments: comments,
                internship_title: title,
                ..NewFeedback::new(Utc::now())
            },
        ),
        Command::Profile => profile(ctx),
    }
}

// =============================================================================
// Browse
// =============================================================================

/// Load the board's collection on the background loader and wait for it.
fn load_board(ctx: &Context, state: &mut BoardState) -> Result<()> {
    let mut loader = LoadManager::new();
    let generation = loader.start_load(Arc::clone(&ctx.store), &state.collection);

    let mut failure = None;
    for msg in loader.wait_for(generation, Duration::from_secs(LOAD_TIMEOUT_SECS)) {
        if let LoadProgress::Failed {
            generation: g,
            error,
            ..
        } = &msg
        {
            if *g == generation {
                failure = Some(error.clone());
            }
        }
        state.apply_progress(msg);
    }

    if let Some(message) = failure {
        return Err(PlaceBoardError::Load {
            collection: state.collection.clone(),
            message,
        });
    }
    if state.loading {
        let message = format!("no response within {LOAD_TIMEOUT_SECS}s");
        state.load_failed(&message);
        return Err(PlaceBoardError::Load {
            collection: state.collection.clone(),
            message,
        });
    }
    Ok(())
}

fn opportunity_rows(state: &BoardState) -> Vec<[String; 4]> {
    state
        .visible()
        .map(|r| {
            [
                r.id.clone(),
                r.display(ATTR_ROLE),
                r.display(ATTR_COMPANY_NAME),
                r.display(ATTR_LOCATION),
            ]
        })
        .collect()
}

fn print_board(state: &BoardState) {
    print_table(&["ID", "ROLE", "COMPANY", "LOCATION"], &opportunity_rows(state));
    println!(
        "\nShowing {} of {} opportunities",
        state.visible_count(),
        state.records().len()
    );
}

fn browse(ctx: &Context, args: BrowseArgs) -> Result<()> {
    let mut state = BoardState::new(COLLECTION_OPPORTUNITIES, ctx.config.filter_fields.clone());
    if let Err(e) = load_board(ctx, &mut state) {
        // Whatever the board holds after a failed load (nothing, on a first
        // load) is still shown before the error.
        print_board(&state);
        println!("{}", state.status_message);
        return Err(e);
    }

    state.set_criteria(FilterCriteria {
        term: args.term.unwrap_or_default(),
        location: args.location.unwrap_or_default(),
        company: args.company.unwrap_or_default(),
    });

    print_board(&state);

    if args.facets {
        println!();
        for (attribute, values) in state.facets().iter() {
            println!("{attribute}: {}", values.join(", "));
        }
    }

    if let Some(path) = args.export {
        let visible = state.visible_records();
        let count = export_records(&visible, &path, args.format, ctx.config.max_export_records)?;
        println!("Exported {count} opportunities to {}", path.display());
    }
    Ok(())
}

fn export_records(
    records: &[ListingRecord],
    path: &Path,
    format: ExportFormat,
    max_records: usize,
) -> Result<usize> {
    export::check_export_size(records.len(), max_records)?;

    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = std::fs::File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);

    let count = match format {
        ExportFormat::Csv => {
            export::export_csv(records, OPPORTUNITY_EXPORT_COLUMNS, &mut writer, path)?
        }
        ExportFormat::Json => export::export_json(records, &mut writer, path)?,
    };
    writer.flush().map_err(io_err)?;

    tracing::info!(path = %path.display(), records = count, format = ?format, "Export complete");
    Ok(count)
}

fn show(ctx: &Context, id: &str) -> Result<()> {
    let record = workflow::load_opportunity(ctx.store.as_ref(), id)?;
    print_record(&record, OPPORTUNITY_DETAIL_FIELDS);
    Ok(())
}

// =============================================================================
// Applications
// =============================================================================

fn application_rows(records: &[ListingRecord]) -> Vec<[String; 5]> {
    records
        .iter()
        .map(|r| {
            [
                r.id.clone(),
                r.display(ATTR_APPLICANT_NAME),
                r.display(ATTR_OPPORTUNITY_TITLE),
                applications::status_of(r).to_string(),
                r.display(ATTR_SUBMISSION_DATE),
            ]
        })
        .collect()
}

const APPLICATION_HEADERS: [&str; 5] = ["ID", "APPLICANT", "OPPORTUNITY", "STATUS", "SUBMITTED"];

fn list_applications(ctx: &Context, status: Option<ApplicationStatus>) -> Result<()> {
    let all = ctx.store.get_all(COLLECTION_APPLICATIONS)?;
    let shown = applications::filter_by_status(&all, status);

    print_table(&APPLICATION_HEADERS, &application_rows(&shown));
    println!("\nShowing {} of {} applications", shown.len(), all.len());
    Ok(())
}

fn review(ctx: &Context, update: StatusUpdate) -> Result<()> {
    let reloaded = workflow::submit_review(ctx.store.as_ref(), &update)?;
    println!("Application {} marked {}", update.id, update.status);
    if let Some(record) = reloaded.iter().find(|r| r.id == update.id) {
        print_table(&APPLICATION_HEADERS, &application_rows(std::slice::from_ref(record)));
    }
    Ok(())
}

// =============================================================================
// Feedback
// =============================================================================

fn print_feedback_summary(ctx: &Context, records: &[ListingRecord]) {
    let window = ctx.config.recent_window_days;
    println!(
        "{} reviews, average rating {:.1}, {} in the last {window} days",
        records.len(),
        feedback::average_rating(records),
        feedback::recent_count(records, Utc::now(), window),
    );
}

fn list_feedback(ctx: &Context) -> Result<()> {
    let records = workflow::load_feedback(ctx.store.as_ref())?;

    let rows: Vec<[String; 4]> = records
        .iter()
        .map(|r| {
            [
                r.display(ATTR_FEEDBACK_DATE),
                r.display(ATTR_INTERNSHIP_TITLE),
                r.display(ATTR_OVERALL_RATING),
                r.display(ATTR_SUPERVISOR_COMMENTS),
            ]
        })
        .collect();
    print_table(&["DATE", "INTERNSHIP", "RATING", "COMMENTS"], &rows);
    println!();
    print_feedback_summary(ctx, &records);
    Ok(())
}

fn add_feedback(ctx: &Context, submission: NewFeedback) -> Result<()> {
    let (id, reloaded) = workflow::submit_feedback(ctx.store.as_ref(), submission)?;
    println!("Feedback {id} recorded");
    print_feedback_summary(ctx, &reloaded);
    Ok(())
}

// =============================================================================
// Profile
// =============================================================================

fn profile(ctx: &Context) -> Result<()> {
    match workflow::load_profile(ctx.store.as_ref())? {
        Some(record) => print_record(&record, PROFILE_FIELDS),
        None => println!("No student profile found."),
    }
    Ok(())
}

// =============================================================================
// Rendering
// =============================================================================

/// Display form of any attribute, including lists of scalars.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(render_value)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null | Value::Object(_) => String::new(),
        other => other.to_string(),
    }
}

/// Label/value pairs for a detail view: the id, then `fields` in order,
/// then any other attributes under their stored names.
fn detail_lines(record: &ListingRecord, fields: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut lines = vec![("ID".to_string(), record.id.clone())];
    for (label, attribute) in fields {
        if let Some(value) = record.attributes.get(*attribute) {
            lines.push((label.to_string(), render_value(value)));
        }
    }
    for (attribute, value) in &record.attributes {
        if !fields.iter().any(|(_, a)| a == attribute) {
            lines.push((attribute.clone(), render_value(value)));
        }
    }
    lines
}

fn print_record(record: &ListingRecord, fields: &[(&str, &str)]) {
    let lines = detail_lines(record, fields);
    let width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in &lines {
        println!("{label:<width$}  {value}");
    }
}

fn print_table<const N: usize>(headers: &[&str; N], rows: &[[String; N]]) {
    let mut widths = headers.map(str::len);
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{cell:<w$}"))
            .collect();
        println!("{}", padded.join("  ").trim_end());
    };

    line(headers.to_vec());
    for row in rows {
        line(row.iter().map(String::as_str).collect());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::store::{JsonDirStore, MemoryStore};
    use tempfile::TempDir;

    fn context(store: impl RecordStore + 'static) -> Context {
        Context {
            store: Arc::new(store),
            config: AppConfig::default(),
        }
    }

    #[test]
    fn test_parse_status_is_lenient() {
        assert_eq!(parse_status("approved"), Ok(ApplicationStatus::Approved));
        assert_eq!(parse_status("under-review"), Ok(ApplicationStatus::UnderReview));
        assert_eq!(parse_status("Under Review"), Ok(ApplicationStatus::UnderReview));
        assert!(parse_status("done").unwrap_err().contains("Pending"));
    }

    #[test]
    fn test_render_value_lists() {
        let skills = serde_json::json!(["Rust", "SQL"]);
        assert_eq!(render_value(&skills), "Rust, SQL");
        assert_eq!(render_value(&serde_json::json!(3.5)), "3.5");
        assert_eq!(render_value(&Value::Null), "");
    }

    #[test]
    fn test_profile_detail_uses_labels_then_extras() {
        let record = ListingRecord::new("stu-1")
            .with(ATTR_GPA, 3.9)
            .with(ATTR_STUDENT_NAME, "Ada")
            .with(ATTR_SKILLS, serde_json::json!(["Rust", "SQL"]))
            .with("club", "Chess");

        let lines = detail_lines(&record, PROFILE_FIELDS);
        let labels: Vec<&str> = lines.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["ID", "Name", "GPA", "Skills", "club"]);
        assert_eq!(lines[3].1, "Rust, SQL");
    }

    #[test]
    fn test_browse_export_writes_visible_subset() {
        let dir = TempDir::new().unwrap();
        let store = MemoryStore::new().with_collection(
            COLLECTION_OPPORTUNITIES,
            vec![
                ListingRecord::new("1")
                    .with(ATTR_ROLE, "Backend Intern")
                    .with(ATTR_LOCATION, "Remote"),
                ListingRecord::new("2")
                    .with(ATTR_ROLE, "Designer")
                    .with(ATTR_LOCATION, "NYC"),
            ],
        );
        let ctx = context(store);
        let out = dir.path().join("out.json");

        browse(
            &ctx,
            BrowseArgs {
                location: Some("remote".to_string()),
                export: Some(out.clone()),
                format: ExportFormat::Json,
                ..BrowseArgs::default()
            },
        )
        .unwrap();

        let written: Vec<ListingRecord> =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].id, "1");
    }

    #[test]
    fn test_export_limit_enforced() {
        let dir = TempDir::new().unwrap();
        let records = vec![ListingRecord::new("1"), ListingRecord::new("2")];
        let result = export_records(&records, &dir.path().join("x.csv"), ExportFormat::Csv, 1);
        assert!(matches!(
            result,
            Err(PlaceBoardError::Export(ExportError::TooManyRecords { count: 2, max: 1 }))
        ));
    }

    #[test]
    fn test_load_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let store = JsonDirStore::new(dir.path());
        std::fs::write(store.collection_path(COLLECTION_OPPORTUNITIES), "not json").unwrap();

        let ctx = context(store);
        let mut state =
            BoardState::new(COLLECTION_OPPORTUNITIES, ctx.config.filter_fields.clone());
        assert!(matches!(
            load_board(&ctx, &mut state),
            Err(PlaceBoardError::Load { .. })
        ));

        // The board is left showing an empty collection with the reason.
        assert!(!state.loading);
        assert!(opportunity_rows(&state).is_empty());
        assert!(state.status_message.starts_with("Could not load opportunities"));
    }

    #[test]
    fn test_browse_failure_still_returns_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonDirStore::new(dir.path());
        std::fs::write(store.collection_path(COLLECTION_OPPORTUNITIES), "not json").unwrap();

        let result = browse(&context(store), BrowseArgs::default());
        assert!(matches!(result, Err(PlaceBoardError::Load { .. })));
    }

    #[test]
    fn test_review_then_list() {
        let store = MemoryStore::new().with_collection(
            COLLECTION_APPLICATIONS,
            vec![ListingRecord::new("a1").with(ATTR_APPLICANT_NAME, "Ada")],
        );
        let ctx = context(store);
        review(
            &ctx,
            StatusUpdate {
                id: "a1".to_string(),
                status: ApplicationStatus::Approved,
                mentor_feedback: String::new(),
            },
        )
        .unwrap();

        let all = ctx.store.get_all(COLLECTION_APPLICATIONS).unwrap();
        let approved = applications::filter_by_status(&all, Some(ApplicationStatus::Approved));
        assert_eq!(approved.len(), 1);
    }
}
