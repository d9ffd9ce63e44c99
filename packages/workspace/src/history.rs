//! Recently-used workspace history.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WorkspaceStoreError;

/// One remembered workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceEntry {
    /// Playground root directory.
    pub path: PathBuf,
    /// When the workspace was last entered.
    pub last_opened: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct HistoryFile {
    last_used: Option<PathBuf>,
    workspaces: Vec<WorkspaceEntry>,
}

/// File-backed store of recently-used workspaces.
///
/// Storage layout:
/// ```text
/// $XDG_DATA_HOME/scmbench/workspaces.json
/// ```
///
/// A missing or unreadable file behaves as an empty history.
pub struct WorkspaceHistory {
    file_path: PathBuf,
    cache: RwLock<Option<HistoryFile>>,
}

impl WorkspaceHistory {
    /// Open the history at its default XDG location.
    ///
    /// # Errors
    ///
    /// Returns an error if the XDG data directory cannot be determined.
    pub fn open_default() -> Result<Self, WorkspaceStoreError> {
        let data_dir = dirs::data_dir().ok_or(WorkspaceStoreError::NoDataDir)?;
        Ok(Self::with_file(
            data_dir.join("scmbench").join("workspaces.json"),
        ))
    }

    /// Open a history backed by an explicit file.
    #[must_use]
    pub fn with_file(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            cache: RwLock::new(None),
        }
    }

    /// Record `path` as entered now and mark it last-used.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be written.
    pub fn add(&self, path: &Path) -> Result<(), WorkspaceStoreError> {
        let mut contents = self.load();
        let now = Utc::now();
        if let Some(entry) = contents
            .workspaces
            .iter_mut()
            .find(|entry| entry.path == path)
        {
            entry.last_opened = now;
        } else {
            contents.workspaces.push(WorkspaceEntry {
                path: path.to_path_buf(),
                last_opened: now,
            });
        }
        contents.last_used = Some(path.to_path_buf());
        self.save(&contents)
    }

    /// The workspace most recently recorded.
    #[must_use]
    pub fn last_used(&self) -> Option<PathBuf> {
        self.load().last_used
    }

    /// Remembered workspaces, most recently entered first.
    #[must_use]
    pub fn list(&self) -> Vec<WorkspaceEntry> {
        let mut entries = self.load().workspaces;
        entries.sort_by(|a, b| b.last_opened.cmp(&a.last_opened));
        entries
    }

    fn load(&self) -> HistoryFile {
        if let Ok(cache) = self.cache.read()
            && let Some(contents) = cache.as_ref()
        {
            return contents.clone();
        }
        let contents = self.read_file().unwrap_or_default();
        if let Ok(mut cache) = self.cache.write() {
            *cache = Some(contents.clone());
        }
        contents
    }

    fn read_file(&self) -> Option<HistoryFile> {
        let file = File::open(&self.file_path).ok()?;
        serde_json::from_reader(BufReader::new(file)).ok()
    }

    fn save(&self, contents: &HistoryFile) -> Result<(), WorkspaceStoreError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).map_err(WorkspaceStoreError::CreateDir)?;
        }
        let file = File::create(&self.file_path).map_err(WorkspaceStoreError::Write)?;
        serde_json::to_writer_pretty(BufWriter::new(file), contents)
            .map_err(WorkspaceStoreError::Serialize)?;
        if let Ok(mut cache) = self.cache.write() {
            *cache = Some(contents.clone());
        }
        Ok(())
    }
}
