// PlaceBoard - core/export.rs
//
// CSV and JSON export of listing records (typically the visible subset).
// Core layer: writes to any Write trait object.

use crate::core::model::ListingRecord;
use crate::util::constants::ATTR_ID;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Reject exports larger than `max_records`.
pub fn check_export_size(count: usize, max_records: usize) -> Result<(), ExportError> {
    if count > max_records {
        return Err(ExportError::TooManyRecords {
            count,
            max: max_records,
        });
    }
    Ok(())
}

/// Export records to CSV with one column per entry in `columns`.
///
/// The `_id` column name selects the record identifier. Absent or
/// non-scalar values are written as empty cells.
pub fn export_csv<W: Write>(
    records: &[ListingRecord],
    columns: &[&str],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(columns)
        .map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;

    let mut count = 0;
    for record in records {
        let row: Vec<String> = columns
            .iter()
            .map(|&column| {
                if column == ATTR_ID {
                    record.id.clone()
                } else {
                    record.display(column)
                }
            })
            .collect();

        csv_writer.write_record(&row).map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %export_path.display(), records = count, "CSV export written");
    Ok(count)
}

/// Export records to JSON (pretty-printed array of objects).
pub fn export_json<W: Write>(
    records: &[ListingRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, records).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %export_path.display(), records = records.len(), "JSON export written");
    Ok(records.len())
}
