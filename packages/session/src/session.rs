use std::env;
use std::path::Path;
use std::sync::Arc;

use scmbench_backend::{CommandOutput, NullBackend, ScmBackend, ScmError};
use scmbench_registry::BackendRegistry;
use scmbench_workspace::{OptionsStore, WorkspaceHistory, WorkspaceStoreError};

use crate::events::{ChangeFlags, ChangeNotifier, NullNotifier};

/// Error type for session lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Error from an SCM backend.
    #[error("SCM error: {0}")]
    Scm(#[from] ScmError),

    /// Workspace store error.
    #[error("Workspace store error: {0}")]
    Workspace(#[from] WorkspaceStoreError),

    /// Filesystem interaction failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Port to the project-manager layer stacked on top of the SCM.
///
/// The lifecycle re-resolves the project manager after every backend
/// swap; contexts without one simply leave it unset.
pub trait ProjectManager: Send + Sync {
    /// Re-resolve the selection; `true` when it changed.
    fn reset(&self) -> bool;
}

/// How an application should pick an SCM backend for a new playground.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendChoice {
    /// Nothing usable; carries the missing-requirements report.
    NoneAvailable(String),
    /// Exactly one backend; no need to ask.
    Single(String),
    /// Several candidates; the application shows its own picker.
    Multiple(Vec<String>),
}

/// The SCM context of one application instance.
///
/// Owns the backend registry and the active backend selection. There is
/// always an active backend: when no registered backend claims the working
/// directory it is the shared null backend, so consumers never branch on
/// an absent one. All selection changes go through `&mut self`; reads hand
/// out cheap [`Arc`] clones.
pub struct ScmSession {
    registry: BackendRegistry,
    null_backend: Arc<dyn ScmBackend>,
    active: Arc<dyn ScmBackend>,
    notifier: Arc<dyn ChangeNotifier>,
    project_manager: Option<Arc<dyn ProjectManager>>,
    history: Option<WorkspaceHistory>,
    options: Option<OptionsStore>,
}

impl ScmSession {
    /// A session over `registry` with the null backend active.
    #[must_use]
    pub fn new(registry: BackendRegistry) -> Self {
        let null_backend = NullBackend::shared();
        Self {
            registry,
            active: Arc::clone(&null_backend),
            null_backend,
            notifier: Arc::new(NullNotifier),
            project_manager: None,
            history: None,
            options: None,
        }
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn ChangeNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    #[must_use]
    pub fn with_project_manager(mut self, project_manager: Arc<dyn ProjectManager>) -> Self {
        self.project_manager = Some(project_manager);
        self
    }

    #[must_use]
    pub fn with_workspace_history(mut self, history: WorkspaceHistory) -> Self {
        self.history = Some(history);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: OptionsStore) -> Self {
        self.options = Some(options);
        self
    }

    /// The currently active backend.
    ///
    /// Always valid: the null backend stands in when no registered backend
    /// claims the working directory.
    #[must_use]
    pub fn active(&self) -> Arc<dyn ScmBackend> {
        Arc::clone(&self.active)
    }

    #[must_use]
    pub const fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn workspace_history(&self) -> Option<&WorkspaceHistory> {
        self.history.as_ref()
    }

    #[must_use]
    pub const fn options(&self) -> Option<&OptionsStore> {
        self.options.as_ref()
    }

    /// Re-resolve the active backend against the working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be read.
    pub fn reset(&mut self) -> Result<Arc<dyn ScmBackend>, SessionError> {
        let cwd = env::current_dir()?;
        let resolved = self.registry.backend_for_dir(&cwd, &self.null_backend);
        if !Arc::ptr_eq(&resolved, &self.active) {
            log::debug!("active SCM backend is now {:?}", resolved.name());
        }
        self.active = resolved;
        Ok(self.active())
    }

    /// Re-check the SCM and project-manager selections after something may
    /// have changed.
    ///
    /// When the active backend changes to one sitting in a valid workspace,
    /// the process working directory moves to the playground root, the
    /// workspace is recorded in history, and the playground options layer
    /// is reloaded. Returns the accumulated change flags; the caller
    /// decides whether and how to publish them. `NEW_PM` is withheld while
    /// `CHANGE_WD` is pending, since a directory change already forces a
    /// full re-read downstream.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be read or moved,
    /// or if a store operation fails.
    pub fn refresh(&mut self) -> Result<ChangeFlags, SessionError> {
        let mut events = ChangeFlags::NONE;
        let previous = Arc::clone(&self.active);
        self.reset()?;
        if !Arc::ptr_eq(&previous, &self.active) {
            events |= ChangeFlags::NEW_SCM;
            if self.active.in_valid_workspace()
                && let Some(root) = self.active.playground_root()?
            {
                let cwd = env::current_dir()?;
                if !same_file(&root, &cwd) {
                    env::set_current_dir(&root)?;
                    events |= ChangeFlags::CHANGE_WD;
                }
                self.record_workspace(&root)?;
                self.reload_playground_options(Some(&root))?;
            }
        }
        Ok(self.reset_project_manager(events))
    }

    /// Bring the session up at application start.
    ///
    /// Loads global options, resolves the active backend, moves into the
    /// playground root when inside a valid workspace, records the
    /// workspace, resets the project manager, and reloads playground
    /// options. Publishes `CHANGE_WD` (with the new directory) when the
    /// working directory moved, otherwise `NEW_SCM` plus `NEW_PM` when a
    /// project manager is attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be read or moved,
    /// or if a store operation fails.
    pub fn startup(&mut self) -> Result<ChangeFlags, SessionError> {
        let orig_dir = env::current_dir()?;
        if let Some(options) = &self.options {
            options.load_global()?;
        }
        self.reset()?;
        if self.active.in_valid_workspace()
            && let Some(root) = self.active.playground_root()?
        {
            env::set_current_dir(&root)?;
            self.record_workspace(&root)?;
        }
        if let Some(project_manager) = &self.project_manager {
            project_manager.reset();
        }
        let curr_dir = env::current_dir()?;
        let playground_root = if self.active.in_valid_workspace() {
            self.active.playground_root()?
        } else {
            None
        };
        self.reload_playground_options(playground_root.as_deref())?;
        log::info!("Working directory: {}", curr_dir.display());
        if self.active.in_valid_workspace() {
            log::info!("In valid repository");
        } else {
            log::warn!("NOT in valid repository");
        }
        let events = if same_file(&orig_dir, &curr_dir) {
            if self.project_manager.is_some() {
                ChangeFlags::NEW_SCM | ChangeFlags::NEW_PM
            } else {
                ChangeFlags::NEW_SCM
            }
        } else {
            ChangeFlags::CHANGE_WD
        };
        let new_wd = events
            .contains(ChangeFlags::CHANGE_WD)
            .then_some(curr_dir.as_path());
        self.notifier.notify_events(events, new_wd);
        Ok(events)
    }

    /// Initialize a new playground in `dir` and re-resolve.
    ///
    /// Dispatches to the named backend, or to the active one when `backend`
    /// is `None` (which yields a typed error on the null backend). Records
    /// the workspace when the re-resolved backend sits in a valid one and
    /// publishes the accumulated flags when any. The working directory and
    /// options are left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unknown, initialization fails,
    /// or a store operation fails.
    pub fn init_playground(
        &mut self,
        backend: Option<&str>,
        dir: &Path,
    ) -> Result<CommandOutput, SessionError> {
        let target = match backend {
            Some(name) => self.lookup(name)?,
            None => Arc::clone(&self.active),
        };
        let result = target.init_dir(dir)?;
        let mut events = ChangeFlags::NONE;
        let previous = Arc::clone(&self.active);
        self.reset()?;
        if !Arc::ptr_eq(&previous, &self.active) {
            events |= ChangeFlags::NEW_SCM;
        }
        events = self.reset_project_manager(events);
        if self.active.in_valid_workspace()
            && let Some(root) = self.active.playground_root()?
        {
            self.record_workspace(&root)?;
        }
        if !events.is_empty() {
            self.notifier.notify_events(events, None);
        }
        Ok(result)
    }

    /// Clone the repository at `repo` into `dir` with the named backend.
    ///
    /// Pure dispatch: no selection change, no notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unknown or the clone fails.
    pub fn clone_playground(
        &self,
        backend: &str,
        repo: &str,
        dir: &Path,
    ) -> Result<CommandOutput, SessionError> {
        let target = self.lookup(backend)?;
        Ok(target.clone_as(repo, dir)?)
    }

    /// How a new-playground dialog should pick a backend.
    #[must_use]
    pub fn backend_choice(&self) -> BackendChoice {
        let names = self.registry.available_backends();
        match names.as_slice() {
            [] => BackendChoice::NoneAvailable(self.registry.missing_requirements()),
            [only] => BackendChoice::Single((*only).to_string()),
            _ => BackendChoice::Multiple(names.iter().map(|name| (*name).to_string()).collect()),
        }
    }

    fn lookup(&self, name: &str) -> Result<Arc<dyn ScmBackend>, SessionError> {
        self.registry.get(name).ok_or_else(|| {
            SessionError::Scm(ScmError::UnknownBackend {
                name: name.to_string(),
            })
        })
    }

    fn reset_project_manager(&self, mut events: ChangeFlags) -> ChangeFlags {
        if let Some(project_manager) = &self.project_manager
            && project_manager.reset()
            && !events.contains(ChangeFlags::CHANGE_WD)
        {
            events |= ChangeFlags::NEW_PM;
        }
        events
    }

    fn record_workspace(&self, root: &Path) -> Result<(), SessionError> {
        if let Some(history) = &self.history {
            history.add(root)?;
        }
        Ok(())
    }

    fn reload_playground_options(&self, root: Option<&Path>) -> Result<(), SessionError> {
        if let Some(options) = &self.options {
            options.reload_playground(root)?;
        }
        Ok(())
    }
}

/// Whether `a` and `b` name the same location, tolerating symlinks.
fn same_file(a: &Path, b: &Path) -> bool {
    let canon_a = a.canonicalize().unwrap_or_else(|_| a.to_path_buf());
    let canon_b = b.canonicalize().unwrap_or_else(|_| b.to_path_buf());
    canon_a == canon_b
}
