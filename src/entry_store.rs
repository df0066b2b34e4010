use crate::error::{JournalError, JournalResult};
use crate::journal_entry::JournalEntry;
use crate::query::export_text;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The journal's entries, persisted as one JSON array.
///
/// Every operation works on the whole file: `append` reads the array,
/// pushes, and rewrites it.
pub struct EntryStore {
    path: PathBuf,
}

impl EntryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        EntryStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes an empty array if the file is missing or has zero length.
    pub fn ensure_initialized(&self) -> JournalResult<()> {
        let needs_init = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == ErrorKind::NotFound => true,
            Err(source) => {
                return Err(JournalError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if needs_init {
            self.save_to_file(&[])?;
            info!(path = %self.path.display(), "initialized empty entry store");
        }
        Ok(())
    }

    pub fn append(&self, entry: &JournalEntry) -> JournalResult<()> {
        let mut entries = self.read_all()?;
        entries.push(entry.clone());
        self.save_to_file(&entries)?;
        info!(count = entries.len(), mood = %entry.mood, "appended journal entry");
        Ok(())
    }

    /// Loads every entry in insertion order. Unparseable content reads as empty.
    pub fn read_all(&self) -> JournalResult<Vec<JournalEntry>> {
        let serialized = match fs::read_to_string(&self.path) {
            Ok(serialized) => serialized,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(JournalError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        match serde_json::from_str::<Vec<JournalEntry>>(&serialized) {
            Ok(entries) => {
                debug!(count = entries.len(), "loaded journal entries");
                Ok(entries)
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "entry store is corrupt, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn save_to_file(&self, entries: &[JournalEntry]) -> JournalResult<()> {
        let serialized = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, serialized).map_err(|source| JournalError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Writes the plain-text rendering of `entries` to `path`, replacing it.
pub fn export_to_file(path: &Path, entries: &[JournalEntry]) -> JournalResult<()> {
    fs::write(path, export_text(entries)).map_err(|source| JournalError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), count = entries.len(), "exported journal");
    Ok(())
}
