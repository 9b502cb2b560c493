//! CSV output.
//!
//! The table is written to a sibling temporary file and renamed over the
//! destination, so an interrupted write never leaves a partial table behind.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use attractions_models::{ListingRecord, OUTPUT_COLUMNS};

use crate::ScrapeError;

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("output"), ToOwned::to_owned);
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_rows(path: &Path, records: &[ListingRecord]) -> Result<(), ScrapeError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(OUTPUT_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `records` to `path` with the header `name,rating,image`,
/// replacing any existing file.
///
/// # Errors
///
/// Returns [`ScrapeError`] if the file cannot be written or renamed.
pub fn write_csv(path: &Path, records: &[ListingRecord]) -> Result<(), ScrapeError> {
    let tmp = temp_path(path);

    if let Err(e) = write_rows(&tmp, records) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }
    std::fs::rename(&tmp, path)?;

    log::info!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}
