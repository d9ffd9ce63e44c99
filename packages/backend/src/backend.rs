//! The SCM backend capability contract.
//!
//! Every concrete SCM adapter implements this trait; the registry, the
//! session, and higher-level GUI/CLI code consume it uniformly. Mock
//! implementations can stand in during tests.

use std::path::{Path, PathBuf};

use scmbench_backend_models::{
    BranchInfo, CommandOutput, HistoryEntry, ImportReadiness, RemoteInfo, ScmError, StashInfo,
    TagInfo,
};

/// Uniform capability contract over one SCM system.
///
/// Implementations are registered once at startup and never mutated
/// afterwards; all workspace-dependent answers are computed per call.
/// Consumers hold backends as `Arc<dyn ScmBackend>` so the trait only
/// requires `&self`.
///
/// Callers must check [`in_valid_workspace`](Self::in_valid_workspace)
/// before invoking file-mutating operations; the null backend treats
/// [`import_patch`](Self::import_patch) and
/// [`copy_clean_version_to`](Self::copy_clean_version_to) as fatal
/// programmer errors.
pub trait ScmBackend: Send + Sync {
    // === Identity ===

    /// Unique name of this backend (e.g. `"git"`, `"hg"`).
    ///
    /// The registry keys on this name; registering a second backend with the
    /// same name silently replaces the first.
    fn name(&self) -> &str;

    /// Short label for command-oriented UI text.
    ///
    /// Defaults to [`name`](Self::name).
    fn label(&self) -> &str {
        self.name()
    }

    /// Whether the backing SCM tooling is installed and usable.
    ///
    /// Backends reporting `false` are kept only for the missing-requirements
    /// report and never participate in playground detection.
    fn is_available(&self) -> bool;

    /// Human-readable requirement string for the missing-backend report
    /// (e.g. `"git (>= 2.30)"`).
    fn requires(&self) -> String;

    // === Predicates ===

    /// Whether `dir` sits inside a playground this backend controls.
    ///
    /// This is the only input to playground detection. It must not mutate
    /// any state and should be cheap, since the resolver calls it on every
    /// registered backend in turn.
    fn dir_is_in_valid_playground(&self, dir: &Path) -> bool;

    /// Whether the backend currently sits in a workspace it can operate on.
    ///
    /// Lifecycle side effects (directory change, workspace bookkeeping) only
    /// run when this is `true`.
    fn in_valid_workspace(&self) -> bool;

    /// Whether the current playground accepts mutating operations.
    fn playground_is_mutable(&self) -> bool;

    /// Whether a named SCM extension is enabled (hg-style).
    ///
    /// Defaults to `false`; backends without an extension mechanism leave it
    /// alone.
    fn is_extension_enabled(&self, _extension: &str) -> bool {
        false
    }

    // === Data queries ===

    /// Configured author as `"Name <email>"`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot read its configuration.
    fn author_name_and_email(&self) -> Result<Option<String>, ScmError>;

    /// Root directory of the current playground, if inside one.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be determined.
    fn playground_root(&self) -> Result<Option<PathBuf>, ScmError>;

    /// Revision of the named file, or of the whole playground when `file`
    /// is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the revision cannot be determined.
    fn revision(&self, file: Option<&Path>) -> Result<Option<String>, ScmError>;

    /// Full message of `commit`, or of the working revision when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit cannot be read.
    fn commit_message(&self, commit: Option<&str>) -> Result<Option<String>, ScmError>;

    /// Full textual presentation of one commit (message, stats, patch
    /// headers), as the SCM renders it.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit cannot be read.
    fn commit_show(&self, commit: &str) -> Result<Option<String>, ScmError>;

    /// Opaque digest of the SCM's view of the files' status, used by
    /// refresh machinery to detect change cheaply.
    ///
    /// # Errors
    ///
    /// Returns an error if the status cannot be read.
    fn file_status_digest(&self) -> Result<Option<String>, ScmError>;

    /// Revision history, newest first.
    ///
    /// # Arguments
    ///
    /// * `rev` - Start point; the current head when `None`.
    /// * `max_items` - Cap on the number of rows; unlimited when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if history cannot be read.
    fn history(
        &self,
        rev: Option<&str>,
        max_items: Option<usize>,
    ) -> Result<Vec<HistoryEntry>, ScmError>;

    /// Head revisions (multiple for hg-style branch heads).
    ///
    /// # Errors
    ///
    /// Returns an error if heads cannot be read.
    fn heads(&self) -> Result<Vec<HistoryEntry>, ScmError>;

    /// Parent revisions of `rev`, or of the working revision when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if parents cannot be read.
    fn parents(&self, rev: Option<&str>) -> Result<Vec<HistoryEntry>, ScmError>;

    /// Branches known to the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if branches cannot be listed.
    fn branches(&self) -> Result<Vec<BranchInfo>, ScmError>;

    /// Tags known to the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if tags cannot be listed.
    fn tags(&self) -> Result<Vec<TagInfo>, ScmError>;

    /// Stashed change sets.
    ///
    /// # Errors
    ///
    /// Returns an error if stashes cannot be listed.
    fn stashes(&self) -> Result<Vec<StashInfo>, ScmError>;

    /// Remote repositories (git remotes, hg paths).
    ///
    /// # Errors
    ///
    /// Returns an error if remotes cannot be listed.
    fn remotes(&self) -> Result<Vec<RemoteInfo>, ScmError>;

    /// The subset of `files` with uncommitted SCM changes; all files in the
    /// current directory when `files` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the status cannot be read.
    fn files_with_uncommitted_changes(
        &self,
        files: Option<&[PathBuf]>,
    ) -> Result<Vec<PathBuf>, ScmError>;

    /// Unified diff text for `files` (the whole playground when empty)
    /// against `rev` (the working parent when `None`).
    ///
    /// # Errors
    ///
    /// Returns an error if the diff cannot be produced.
    fn diff_text(&self, files: &[PathBuf], rev: Option<&str>) -> Result<String, ScmError>;

    /// Whether the SCM is in a position to accept a patch import.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be determined.
    fn ready_for_import(&self) -> Result<ImportReadiness, ScmError>;

    // === Mutation entry points ===

    /// Initialize a new playground in `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if initialization fails or the backend does not
    /// support it.
    fn init_dir(&self, dir: &Path) -> Result<CommandOutput, ScmError>;

    /// Clone the repository at `repo` (path or URL) into `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the clone fails or the backend does not support
    /// it.
    fn clone_as(&self, repo: &str, dir: &Path) -> Result<CommandOutput, ScmError>;

    /// Import `patch` into the current playground.
    ///
    /// Callers must hold a real backend in a valid workspace; the null
    /// backend panics.
    ///
    /// # Errors
    ///
    /// Returns an error if the import fails.
    fn import_patch(&self, patch: &Path) -> Result<CommandOutput, ScmError>;

    /// Copy a clean (committed) version of `file` to `target`.
    ///
    /// Callers must hold a real backend in a valid workspace; the null
    /// backend panics.
    ///
    /// # Errors
    ///
    /// Returns an error if the copy fails.
    fn copy_clean_version_to(&self, file: &Path, target: &Path) -> Result<CommandOutput, ScmError>;
}
