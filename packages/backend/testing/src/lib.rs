#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Configurable fake SCM backend for `scmbench` tests.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use scmbench_backend::{
    BranchInfo, CommandOutput, HistoryEntry, ImportReadiness, RemoteInfo, ScmBackend, ScmError,
    StashInfo, TagInfo,
};

/// In-memory [`ScmBackend`] whose identity and playground claim are set by
/// the test.
///
/// The playground root is shared interior state: clones observe later
/// mutations made through any handle, so a test can hand a clone to a
/// registry and still drive `init_dir`/`clone_as` (or
/// [`set_playground`](Self::set_playground)) afterwards.
#[derive(Clone)]
pub struct FakeBackend {
    name: String,
    label: String,
    available: bool,
    requires: String,
    mutable: bool,
    root: Arc<RwLock<Option<PathBuf>>>,
}

impl FakeBackend {
    /// An available backend named `name` with no playground claim.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            label: name.to_string(),
            available: true,
            requires: format!("{name} (any version)"),
            mutable: true,
            root: Arc::new(RwLock::new(None)),
        }
    }

    /// An unavailable backend carrying `requires` for the missing report.
    #[must_use]
    pub fn unavailable(name: &str, requires: &str) -> Self {
        Self {
            available: false,
            requires: requires.to_string(),
            ..Self::new(name)
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    /// Claim every directory at or under `root` as this backend's
    /// playground.
    #[must_use]
    pub fn with_playground(self, root: impl Into<PathBuf>) -> Self {
        self.set_playground(Some(root.into()));
        self
    }

    #[must_use]
    pub const fn with_mutable(mut self, mutable: bool) -> Self {
        self.mutable = mutable;
        self
    }

    /// Change the playground claim on this handle and all its clones.
    pub fn set_playground(&self, root: Option<PathBuf>) {
        if let Ok(mut slot) = self.root.write() {
            *slot = root;
        }
    }

    /// This backend as a shared trait object.
    #[must_use]
    pub fn shared(self) -> Arc<dyn ScmBackend> {
        Arc::new(self)
    }

    fn root(&self) -> Option<PathBuf> {
        self.root.read().ok().and_then(|slot| slot.clone())
    }
}

impl ScmBackend for FakeBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn requires(&self) -> String {
        self.requires.clone()
    }

    fn dir_is_in_valid_playground(&self, dir: &Path) -> bool {
        self.root().is_some_and(|root| dir.starts_with(root))
    }

    fn in_valid_workspace(&self) -> bool {
        self.root().is_some()
    }

    fn playground_is_mutable(&self) -> bool {
        self.mutable
    }

    fn author_name_and_email(&self) -> Result<Option<String>, ScmError> {
        Ok(Some(format!("{} tester <{}@example.com>", self.name, self.name)))
    }

    fn playground_root(&self) -> Result<Option<PathBuf>, ScmError> {
        Ok(self.root())
    }

    fn revision(&self, _file: Option<&Path>) -> Result<Option<String>, ScmError> {
        Ok(Some(String::from("1")))
    }

    fn commit_message(&self, _commit: Option<&str>) -> Result<Option<String>, ScmError> {
        Ok(None)
    }

    fn commit_show(&self, _commit: &str) -> Result<Option<String>, ScmError> {
        Ok(None)
    }

    fn file_status_digest(&self) -> Result<Option<String>, ScmError> {
        Ok(None)
    }

    fn history(
        &self,
        _rev: Option<&str>,
        _max_items: Option<usize>,
    ) -> Result<Vec<HistoryEntry>, ScmError> {
        Ok(Vec::new())
    }

    fn heads(&self) -> Result<Vec<HistoryEntry>, ScmError> {
        Ok(Vec::new())
    }

    fn parents(&self, _rev: Option<&str>) -> Result<Vec<HistoryEntry>, ScmError> {
        Ok(Vec::new())
    }

    fn branches(&self) -> Result<Vec<BranchInfo>, ScmError> {
        Ok(Vec::new())
    }

    fn tags(&self) -> Result<Vec<TagInfo>, ScmError> {
        Ok(Vec::new())
    }

    fn stashes(&self) -> Result<Vec<StashInfo>, ScmError> {
        Ok(Vec::new())
    }

    fn remotes(&self) -> Result<Vec<RemoteInfo>, ScmError> {
        Ok(Vec::new())
    }

    fn files_with_uncommitted_changes(
        &self,
        _files: Option<&[PathBuf]>,
    ) -> Result<Vec<PathBuf>, ScmError> {
        Ok(Vec::new())
    }

    fn diff_text(&self, _files: &[PathBuf], _rev: Option<&str>) -> Result<String, ScmError> {
        Ok(String::new())
    }

    fn ready_for_import(&self) -> Result<ImportReadiness, ScmError> {
        if self.in_valid_workspace() {
            Ok(ImportReadiness::Ready)
        } else {
            Ok(ImportReadiness::not_ready("not inside a workspace"))
        }
    }

    fn init_dir(&self, dir: &Path) -> Result<CommandOutput, ScmError> {
        self.set_playground(Some(dir.to_path_buf()));
        Ok(CommandOutput {
            stdout: format!("Initialized empty {} playground in {}", self.name, dir.display()),
            stderr: String::new(),
        })
    }

    fn clone_as(&self, repo: &str, dir: &Path) -> Result<CommandOutput, ScmError> {
        self.set_playground(Some(dir.to_path_buf()));
        Ok(CommandOutput {
            stdout: format!("Cloned {repo} into {}", dir.display()),
            stderr: String::new(),
        })
    }

    fn import_patch(&self, patch: &Path) -> Result<CommandOutput, ScmError> {
        Ok(CommandOutput {
            stdout: format!("Imported {}", patch.display()),
            stderr: String::new(),
        })
    }

    fn copy_clean_version_to(&self, file: &Path, target: &Path) -> Result<CommandOutput, ScmError> {
        Ok(CommandOutput {
            stdout: format!("Copied clean {} to {}", file.display(), target.display()),
            stderr: String::new(),
        })
    }
}
