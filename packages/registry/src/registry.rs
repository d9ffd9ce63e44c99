use std::fmt;
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use scmbench_backend::ScmBackend;

use crate::text::quoted_list;

/// Registry of SCM backends, partitioned by availability.
///
/// Backends whose tooling is usable go into the available partition and
/// take part in playground detection; the rest are kept only so their
/// requirements can be reported. Registration order is significant: it is
/// the scan order for [`playground_type`](Self::playground_type).
#[derive(Default)]
pub struct BackendRegistry {
    available: Vec<Arc<dyn ScmBackend>>,
    missing: Vec<Arc<dyn ScmBackend>>,
}

impl BackendRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            available: Vec::new(),
            missing: Vec::new(),
        }
    }

    /// Register a backend, partitioning on [`ScmBackend::is_available`].
    ///
    /// Registering a second backend under an already-registered name
    /// silently replaces the first. A same-partition replacement keeps the
    /// original registration position; a replacement whose availability
    /// flipped moves to the end of the other partition, so a name is never
    /// in both.
    pub fn register(&mut self, backend: Arc<dyn ScmBackend>) {
        let name = backend.name().to_owned();
        let available = backend.is_available();
        log::debug!("registering SCM backend {name:?} (available={available})");

        let (target, other) = if available {
            (&mut self.available, &mut self.missing)
        } else {
            (&mut self.missing, &mut self.available)
        };
        other.retain(|existing| existing.name() != name.as_str());
        if let Some(slot) = target
            .iter_mut()
            .find(|existing| existing.name() == name.as_str())
        {
            *slot = backend;
        } else {
            target.push(backend);
        }
    }

    /// Names of the available backends, in registration order.
    #[must_use]
    pub fn available_backends(&self) -> Vec<&str> {
        self.available.iter().map(|backend| backend.name()).collect()
    }

    /// Look up an available backend by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn ScmBackend>> {
        self.available
            .iter()
            .find(|backend| backend.name() == name)
            .cloned()
    }

    /// Human-readable report of the unavailable backends' requirements.
    #[must_use]
    pub fn missing_requirements(&self) -> String {
        if self.missing.is_empty() {
            return String::from("No SCM back ends are available.");
        }
        let mut msg = String::from("No SCM back ends are available. SCM systems:\n");
        for backend in &self.missing {
            let _ = writeln!(msg, "\t{}", backend.requires());
        }
        let names: Vec<&str> = self.missing.iter().map(|backend| backend.name()).collect();
        let _ = write!(
            msg,
            "{} are the ones that are understood.",
            quoted_list(&names)
        );
        msg
    }

    /// Name of the backend whose playground contains `dir`, if any.
    ///
    /// Scans the available backends in registration order and returns the
    /// first claimant.
    // TODO: prefer the closest root when nested playgrounds of different
    // types overlap.
    #[must_use]
    pub fn playground_type(&self, dir: &Path) -> Option<&str> {
        self.available
            .iter()
            .find(|backend| backend.dir_is_in_valid_playground(dir))
            .map(|backend| backend.name())
    }

    /// The backend controlling `dir`, or `fallback` when none claims it.
    ///
    /// The no-match case returns a clone of the exact `fallback` handle, so
    /// callers can detect it with [`Arc::ptr_eq`].
    #[must_use]
    pub fn backend_for_dir(
        &self,
        dir: &Path,
        fallback: &Arc<dyn ScmBackend>,
    ) -> Arc<dyn ScmBackend> {
        self.playground_type(dir)
            .and_then(|name| self.get(name))
            .unwrap_or_else(|| Arc::clone(fallback))
    }
}

impl fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let missing: Vec<&str> = self.missing.iter().map(|backend| backend.name()).collect();
        f.debug_struct("BackendRegistry")
            .field("available", &self.available_backends())
            .field("missing", &missing)
            .finish()
    }
}
