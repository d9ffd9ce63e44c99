use std::env;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use scmbench_session::{ChangeFlags, ChangeNotifier, ProjectManager};

static CWD_LOCK: Mutex<()> = Mutex::new(());

/// Serializes tests that touch the process working directory and restores
/// it afterwards, even on panic.
pub struct CwdGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl CwdGuard {
    pub fn acquire() -> Self {
        let lock = CWD_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let original = env::current_dir().expect("current directory should be readable");
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.original);
    }
}

/// Temp directory plus its canonical path, since the temp root may be a
/// symlink on some platforms.
pub fn canonical_tempdir() -> anyhow::Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().canonicalize()?;
    Ok((dir, path))
}

/// Notifier that records every published event.
#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<(ChangeFlags, Option<PathBuf>)>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Drain the recorded notifications.
    pub fn take(&self) -> Vec<(ChangeFlags, Option<PathBuf>)> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }
}

impl ChangeNotifier for RecordingNotifier {
    fn notify_events(&self, events: ChangeFlags, new_wd: Option<&Path>) {
        if let Ok(mut log) = self.events.lock() {
            log.push((events, new_wd.map(Path::to_path_buf)));
        }
    }
}

/// Project manager whose reset outcome is fixed by the test.
pub struct FakeProjectManager {
    changed: bool,
    resets: AtomicUsize,
}

impl FakeProjectManager {
    #[must_use]
    pub fn changed() -> Arc<Self> {
        Arc::new(Self {
            changed: true,
            resets: AtomicUsize::new(0),
        })
    }

    #[must_use]
    pub fn unchanged() -> Arc<Self> {
        Arc::new(Self {
            changed: false,
            resets: AtomicUsize::new(0),
        })
    }

    #[must_use]
    pub fn reset_count(&self) -> usize {
        self.resets.load(Ordering::SeqCst)
    }
}

impl ProjectManager for FakeProjectManager {
    fn reset(&self) -> bool {
        self.resets.fetch_add(1, Ordering::SeqCst);
        self.changed
    }
}
