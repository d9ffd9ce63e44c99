use std::path::{Path, PathBuf};
use std::sync::Arc;

use scmbench_backend_models::{
    BranchInfo, CommandOutput, HistoryEntry, ImportReadiness, RemoteInfo, ScmError, StashInfo,
    TagInfo,
};

use crate::backend::ScmBackend;

/// Stand-in backend for "no SCM here".
///
/// The session falls back to this whenever no registered backend controls
/// the current directory, so consumers never branch on an absent backend.
/// Every query answers with an empty value, every predicate with `false`,
/// and the two operations that only make sense against a real SCM
/// ([`import_patch`](ScmBackend::import_patch) and
/// [`copy_clean_version_to`](ScmBackend::copy_clean_version_to)) panic,
/// since reaching them means a caller skipped the
/// [`in_valid_workspace`](ScmBackend::in_valid_workspace) check.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBackend;

impl NullBackend {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// The null backend as a shared trait object.
    #[must_use]
    pub fn shared() -> Arc<dyn ScmBackend> {
        Arc::new(Self::new())
    }
}

impl ScmBackend for NullBackend {
    fn name(&self) -> &str {
        "os"
    }

    fn label(&self) -> &str {
        "null"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn requires(&self) -> String {
        String::new()
    }

    fn dir_is_in_valid_playground(&self, _dir: &Path) -> bool {
        false
    }

    fn in_valid_workspace(&self) -> bool {
        false
    }

    fn playground_is_mutable(&self) -> bool {
        false
    }

    fn author_name_and_email(&self) -> Result<Option<String>, ScmError> {
        Ok(None)
    }

    fn playground_root(&self) -> Result<Option<PathBuf>, ScmError> {
        Ok(None)
    }

    fn revision(&self, _file: Option<&Path>) -> Result<Option<String>, ScmError> {
        Ok(None)
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
        Ok(ImportReadiness::not_ready(
            "No (or unsupported) underlying SCM.",
        ))
    }

    fn init_dir(&self, _dir: &Path) -> Result<CommandOutput, ScmError> {
        Err(ScmError::unsupported("init"))
    }

    fn clone_as(&self, _repo: &str, _dir: &Path) -> Result<CommandOutput, ScmError> {
        Err(ScmError::unsupported("clone"))
    }

    fn import_patch(&self, _patch: &Path) -> Result<CommandOutput, ScmError> {
        panic!("import_patch called on the null backend");
    }

    fn copy_clean_version_to(
        &self,
        _file: &Path,
        _target: &Path,
    ) -> Result<CommandOutput, ScmError> {
        panic!("copy_clean_version_to called on the null backend");
    }
}
