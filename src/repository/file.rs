//! JSON file repository used by the command line.
//!
//! The whole store is loaded for every operation and rewritten through a temporary
//! file plus rename, so a crash mid-write leaves the previous contents intact.
//! Saves hold an exclusive lock on a sidecar `.lock` file from load to rename, so
//! separate processes sharing a store cannot overwrite each other's writes.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::NaiveDate;
use fs4::fs_std::FileExt;
use tempfile::NamedTempFile;
use tracing::debug;

use super::tables::Tables;
use super::{ChangeSet, GameRepository, RepositoryError, Result};
use crate::game::model::{AttemptHistoryEntry, AttemptRecord, DailyPuzzle, PlayerId, PuzzleId};

/// Repository persisted as a single JSON document
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
    // Serializes load-modify-store cycles within this process
    write_lock: Mutex<()>,
}

impl JsonFileRepository {
    /// Open (or lazily create) a store at `path`
    #[must_use]
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".lock");
        PathBuf::from(name)
    }

    fn parent_dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }

    /// Block until no other process is saving; released when the file is dropped
    fn lock_store(&self) -> Result<File> {
        fs::create_dir_all(self.parent_dir())?;
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path())?;
        FileExt::lock_exclusive(&file)?;
        Ok(file)
    }

    fn load(&self) -> Result<Tables> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(Tables::default()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Tables::default()),
            Err(err) => Err(err.into()),
        }
    }

    fn store(&self, tables: &Tables) -> Result<()> {
        let mut tmp = NamedTempFile::new_in(self.parent_dir())?;
        serde_json::to_writer_pretty(tmp.as_file_mut(), tables)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|err| err.error)?;

        debug!(
            path = %self.path.display(),
            puzzles = tables.puzzles.len(),
            attempts = tables.attempts.len(),
            "store written"
        );
        Ok(())
    }
}

impl GameRepository for JsonFileRepository {
    fn puzzle_by_date(&self, date: NaiveDate) -> Result<Option<DailyPuzzle>> {
        Ok(self.load()?.puzzle_by_date(date))
    }

    fn attempt(&self, player_id: PlayerId, puzzle_id: PuzzleId) -> Result<Option<AttemptRecord>> {
        Ok(self.load()?.attempt(player_id, puzzle_id))
    }

    fn attempts_for_puzzle(&self, puzzle_id: PuzzleId) -> Result<Vec<AttemptRecord>> {
        Ok(self.load()?.attempts_for_puzzle(puzzle_id))
    }

    fn attempts_for_player(&self, player_id: PlayerId) -> Result<Vec<AttemptHistoryEntry>> {
        Ok(self.load()?.attempts_for_player(player_id))
    }

    fn save(&self, changes: ChangeSet) -> Result<()> {
        if changes.is_empty() {
            return Ok(());
        }
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let _store_lock = self.lock_store()?;

        let mut tables = self.load()?;
        tables.apply(changes)?;
        self.store(&tables)
    }
}
