mod helpers;

use std::env;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use helpers::{CwdGuard, FakeProjectManager, RecordingNotifier, canonical_tempdir};
use scmbench_backend_testing::FakeBackend;
use scmbench_registry::BackendRegistry;
use scmbench_session::{ChangeFlags, ScmSession};
use scmbench_workspace::{OptionsStore, WorkspaceHistory};

fn session_with_stores(
    registry: BackendRegistry,
    store_dir: &Path,
) -> (ScmSession, Arc<RecordingNotifier>) {
    let notifier = RecordingNotifier::shared();
    let session = ScmSession::new(registry)
        .with_notifier(notifier.clone())
        .with_workspace_history(WorkspaceHistory::with_file(
            store_dir.join("workspaces.json"),
        ))
        .with_options(OptionsStore::with_file(store_dir.join("options.json")));
    (session, notifier)
}

#[test_log::test]
fn test_startup_moves_into_playground_and_notifies_change_wd() {
    let _guard = CwdGuard::acquire();
    let (_playground, root) = canonical_tempdir().unwrap();
    let subdir = root.join("src");
    fs::create_dir(&subdir).unwrap();
    env::set_current_dir(&subdir).unwrap();

    let stores = tempfile::tempdir().unwrap();
    let mut registry = BackendRegistry::new();
    registry.register(FakeBackend::new("git").with_playground(&root).shared());
    let (mut session, notifier) = session_with_stores(registry, stores.path());

    let events = session.startup().unwrap();

    assert_eq!(events, ChangeFlags::CHANGE_WD);
    assert_eq!(env::current_dir().unwrap(), root);
    assert_eq!(session.active().name(), "git");
    let notifications = notifier.take();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].0, ChangeFlags::CHANGE_WD);
    assert_eq!(notifications[0].1.as_deref(), Some(root.as_path()));
    assert_eq!(
        session.workspace_history().unwrap().last_used(),
        Some(root.clone())
    );
}

#[test_log::test]
fn test_startup_in_place_notifies_new_scm_and_pm() {
    let _guard = CwdGuard::acquire();
    let (_playground, root) = canonical_tempdir().unwrap();
    env::set_current_dir(&root).unwrap();

    let stores = tempfile::tempdir().unwrap();
    let mut registry = BackendRegistry::new();
    registry.register(FakeBackend::new("git").with_playground(&root).shared());
    let project_manager = FakeProjectManager::changed();
    let (session, notifier) = session_with_stores(registry, stores.path());
    let mut session = session.with_project_manager(project_manager.clone());

    let events = session.startup().unwrap();

    assert_eq!(events, ChangeFlags::NEW_SCM | ChangeFlags::NEW_PM);
    assert_eq!(notifier.take(), vec![(events, None)]);
    assert_eq!(project_manager.reset_count(), 1);
}

#[test_log::test]
fn test_startup_outside_playground_stays_on_null_backend() {
    let _guard = CwdGuard::acquire();
    let (_plain, dir) = canonical_tempdir().unwrap();
    env::set_current_dir(&dir).unwrap();

    let stores = tempfile::tempdir().unwrap();
    let (mut session, notifier) = session_with_stores(BackendRegistry::new(), stores.path());

    let events = session.startup().unwrap();

    assert_eq!(events, ChangeFlags::NEW_SCM);
    assert_eq!(session.active().name(), "os");
    assert!(!session.active().in_valid_workspace());
    assert_eq!(notifier.take(), vec![(ChangeFlags::NEW_SCM, None)]);
    assert_eq!(session.workspace_history().unwrap().last_used(), None);
}

#[test_log::test]
fn test_refresh_moves_into_playground_without_notifying() {
    let _guard = CwdGuard::acquire();
    let (_playground, root) = canonical_tempdir().unwrap();
    let subdir = root.join("nested");
    fs::create_dir(&subdir).unwrap();
    fs::write(
        root.join(OptionsStore::PLAYGROUND_FILE),
        r#"{"ui": {"theme": "dark"}}"#,
    )
    .unwrap();
    env::set_current_dir(&subdir).unwrap();

    let stores = tempfile::tempdir().unwrap();
    let mut registry = BackendRegistry::new();
    registry.register(FakeBackend::new("git").with_playground(&root).shared());
    let (mut session, notifier) = session_with_stores(registry, stores.path());

    let events = session.refresh().unwrap();

    assert_eq!(events, ChangeFlags::NEW_SCM | ChangeFlags::CHANGE_WD);
    assert_eq!(env::current_dir().unwrap(), root);
    assert!(notifier.take().is_empty());
    assert_eq!(
        session.workspace_history().unwrap().last_used(),
        Some(root.clone())
    );
    assert_eq!(
        session.options().unwrap().get("ui", "theme"),
        Some(String::from("dark"))
    );
}

#[test_log::test]
fn test_refresh_in_place_adds_new_pm() {
    let _guard = CwdGuard::acquire();
    let (_playground, root) = canonical_tempdir().unwrap();
    env::set_current_dir(&root).unwrap();

    let stores = tempfile::tempdir().unwrap();
    let mut registry = BackendRegistry::new();
    registry.register(FakeBackend::new("git").with_playground(&root).shared());
    let project_manager = FakeProjectManager::changed();
    let (session, _) = session_with_stores(registry, stores.path());
    let mut session = session.with_project_manager(project_manager.clone());

    let events = session.refresh().unwrap();

    assert_eq!(events, ChangeFlags::NEW_SCM | ChangeFlags::NEW_PM);
    assert_eq!(project_manager.reset_count(), 1);
}

#[test_log::test]
fn test_refresh_withholds_new_pm_while_wd_change_pending() {
    let _guard = CwdGuard::acquire();
    let (_playground, root) = canonical_tempdir().unwrap();
    let subdir = root.join("nested");
    fs::create_dir(&subdir).unwrap();
    env::set_current_dir(&subdir).unwrap();

    let stores = tempfile::tempdir().unwrap();
    let mut registry = BackendRegistry::new();
    registry.register(FakeBackend::new("git").with_playground(&root).shared());
    let project_manager = FakeProjectManager::changed();
    let (session, _) = session_with_stores(registry, stores.path());
    let mut session = session.with_project_manager(project_manager.clone());

    let events = session.refresh().unwrap();

    assert_eq!(events, ChangeFlags::NEW_SCM | ChangeFlags::CHANGE_WD);
    assert!(!events.contains(ChangeFlags::NEW_PM));
    assert_eq!(project_manager.reset_count(), 1);
}

#[test_log::test]
fn test_refresh_without_changes_is_quiet() {
    let _guard = CwdGuard::acquire();
    let (_plain, dir) = canonical_tempdir().unwrap();
    env::set_current_dir(&dir).unwrap();

    let stores = tempfile::tempdir().unwrap();
    let project_manager = FakeProjectManager::unchanged();
    let (session, notifier) = session_with_stores(BackendRegistry::new(), stores.path());
    let mut session = session.with_project_manager(project_manager.clone());

    let events = session.refresh().unwrap();

    assert_eq!(events, ChangeFlags::NONE);
    assert!(notifier.take().is_empty());
    assert_eq!(project_manager.reset_count(), 1);
}

#[test_log::test]
fn test_init_playground_activates_new_backend() {
    let _guard = CwdGuard::acquire();
    let (_playground, dir) = canonical_tempdir().unwrap();
    env::set_current_dir(&dir).unwrap();

    let stores = tempfile::tempdir().unwrap();
    let mut registry = BackendRegistry::new();
    registry.register(FakeBackend::new("git").shared());
    let (mut session, notifier) = session_with_stores(registry, stores.path());
    assert_eq!(session.active().name(), "os");

    let output = session.init_playground(Some("git"), &dir).unwrap();

    assert!(output.stdout.contains("Initialized"));
    assert_eq!(session.active().name(), "git");
    assert_eq!(notifier.take(), vec![(ChangeFlags::NEW_SCM, None)]);
    assert_eq!(
        session.workspace_history().unwrap().last_used(),
        Some(dir.clone())
    );
    assert_eq!(env::current_dir().unwrap(), dir);
}

#[test_log::test]
fn test_init_playground_rejects_unknown_backend() {
    let _guard = CwdGuard::acquire();
    let (_plain, dir) = canonical_tempdir().unwrap();
    env::set_current_dir(&dir).unwrap();

    let stores = tempfile::tempdir().unwrap();
    let (mut session, notifier) = session_with_stores(BackendRegistry::new(), stores.path());

    let err = session.init_playground(Some("svn"), &dir).unwrap_err();

    assert_eq!(err.to_string(), "SCM error: Unknown SCM backend: svn");
    assert!(notifier.take().is_empty());
}

#[test_log::test]
fn test_init_playground_without_backend_uses_active() {
    let _guard = CwdGuard::acquire();
    let (_plain, dir) = canonical_tempdir().unwrap();
    env::set_current_dir(&dir).unwrap();

    let stores = tempfile::tempdir().unwrap();
    let (mut session, _) = session_with_stores(BackendRegistry::new(), stores.path());

    // The active backend is the null one, so the dispatch surfaces its
    // typed unsupported-operation error.
    let err = session.init_playground(None, &dir).unwrap_err();

    assert_eq!(
        err.to_string(),
        "SCM error: No (or unsupported) underlying SCM for operation: init"
    );
}

#[test_log::test]
fn test_clone_playground_is_pure_dispatch() {
    let (_target, dir) = canonical_tempdir().unwrap();
    let mut registry = BackendRegistry::new();
    registry.register(FakeBackend::new("git").shared());
    let notifier = RecordingNotifier::shared();
    let session = ScmSession::new(registry).with_notifier(notifier.clone());

    let output = session
        .clone_playground("git", "https://example.com/repo.git", &dir)
        .unwrap();

    assert!(output.stdout.contains("Cloned"));
    assert_eq!(session.active().name(), "os");
    assert!(notifier.take().is_empty());

    let err = session
        .clone_playground("svn", "https://example.com/repo.git", &dir)
        .unwrap_err();
    assert_eq!(err.to_string(), "SCM error: Unknown SCM backend: svn");
}
