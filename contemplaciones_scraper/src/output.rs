use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::PostRecord;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("could not create {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Writes `records` to `path` as CSV, header first, replacing any existing file.
///
/// The header is always written, so an empty crawl still leaves a valid file.
pub fn save_csv(records: &[PostRecord], path: &Path) -> Result<(), OutputError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
            path: dir.display().to_string(),
            source,
        })?;
    }

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    wtr.write_record(PostRecord::COLUMNS)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;

    println!("✅ Saved {} entries to {}", records.len(), path.display());
    Ok(())
}
