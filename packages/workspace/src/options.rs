//! Layered key/value options.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::WorkspaceStoreError;

type OptionSections = HashMap<String, HashMap<String, String>>;

/// Layered options store: per-playground values shadow global values.
///
/// The global layer persists under the XDG config directory; the
/// playground layer is read from [`OptionsStore::PLAYGROUND_FILE`] at the
/// playground root and is never written by this store.
pub struct OptionsStore {
    global_path: PathBuf,
    global: RwLock<OptionSections>,
    playground: RwLock<OptionSections>,
}

impl OptionsStore {
    /// Name of the per-playground options file.
    pub const PLAYGROUND_FILE: &'static str = ".scmbench.json";

    /// Open the store at its default XDG location.
    ///
    /// # Errors
    ///
    /// Returns an error if the XDG config directory cannot be determined.
    pub fn open_default() -> Result<Self, WorkspaceStoreError> {
        let config_dir = dirs::config_dir().ok_or(WorkspaceStoreError::NoConfigDir)?;
        Ok(Self::with_file(
            config_dir.join("scmbench").join("options.json"),
        ))
    }

    /// Open a store whose global layer is backed by an explicit file.
    #[must_use]
    pub fn with_file(global_path: impl Into<PathBuf>) -> Self {
        Self {
            global_path: global_path.into(),
            global: RwLock::new(HashMap::new()),
            playground: RwLock::new(HashMap::new()),
        }
    }

    /// Load (or reload) the global layer from disk.
    ///
    /// A missing file loads as an empty layer.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_global(&self) -> Result<(), WorkspaceStoreError> {
        let sections = Self::read_sections(&self.global_path)?;
        if let Ok(mut global) = self.global.write() {
            *global = sections;
        }
        Ok(())
    }

    /// Reload the playground layer for the playground rooted at `root`.
    ///
    /// Passing `None` clears the layer.
    ///
    /// # Errors
    ///
    /// Returns an error if the playground file exists but cannot be read
    /// or parsed.
    pub fn reload_playground(&self, root: Option<&Path>) -> Result<(), WorkspaceStoreError> {
        let sections = match root {
            Some(root) => Self::read_sections(&root.join(Self::PLAYGROUND_FILE))?,
            None => HashMap::new(),
        };
        if let Ok(mut playground) = self.playground.write() {
            *playground = sections;
        }
        Ok(())
    }

    /// Look up `key` in `section`, playground layer first.
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<String> {
        if let Ok(playground) = self.playground.read()
            && let Some(value) = playground.get(section).and_then(|entries| entries.get(key))
        {
            return Some(value.clone());
        }
        self.global.read().ok().and_then(|global| {
            global
                .get(section)
                .and_then(|entries| entries.get(key))
                .cloned()
        })
    }

    /// Set `key` in `section` on the global layer and persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the global file cannot be written.
    pub fn set_global(
        &self,
        section: &str,
        key: &str,
        value: &str,
    ) -> Result<(), WorkspaceStoreError> {
        let mut sections = self
            .global
            .read()
            .map_or_else(|_| HashMap::new(), |global| global.clone());
        sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        self.write_global_file(&sections)?;
        if let Ok(mut global) = self.global.write() {
            *global = sections;
        }
        Ok(())
    }

    fn read_sections(path: &Path) -> Result<OptionSections, WorkspaceStoreError> {
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let file = File::open(path).map_err(WorkspaceStoreError::Read)?;
        serde_json::from_reader(BufReader::new(file)).map_err(WorkspaceStoreError::Parse)
    }

    fn write_global_file(&self, sections: &OptionSections) -> Result<(), WorkspaceStoreError> {
        if let Some(parent) = self.global_path.parent() {
            fs::create_dir_all(parent).map_err(WorkspaceStoreError::CreateDir)?;
        }
        let file = File::create(&self.global_path).map_err(WorkspaceStoreError::Write)?;
        serde_json::to_writer_pretty(BufWriter::new(file), sections)
            .map_err(WorkspaceStoreError::Serialize)
    }
}
