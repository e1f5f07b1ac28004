mod common;

use common::{project, CountingCleaner, DiesOn, FakeControl, FakeDirectory, FakeEditor, PID};
use editor_lifecycle::{
    EditorInstallations, EditorLifecycle, LaunchCoordinator, NoExtraArgs, NoopRecorder,
    ProjectStatus, TerminationTimings,
};
use editor_process_control::{ManagedProcess, NoWindowControl, Platform};
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn lifecycle(directory: Arc<FakeDirectory>) -> EditorLifecycle {
    let platform = Platform::new(
        directory,
        Arc::new(FakeControl(FakeEditor::new(DiesOn::Never))),
        Arc::new(NoWindowControl),
    );
    let launcher = LaunchCoordinator::new(
        EditorInstallations::default(),
        Arc::new(NoExtraArgs),
        Arc::new(NoopRecorder),
    );
    EditorLifecycle::new(
        &platform,
        Arc::new(CountingCleaner::default()),
        launcher,
        TerminationTimings::default(),
    )
}

#[tokio::test]
async fn single_project_status() {
    let (_idle_dir, idle) = project(false);
    let (_crashed_dir, crashed) = project(true);
    let (_running_dir, running) = project(true);
    let editors = lifecycle(FakeDirectory::with(vec![ManagedProcess::new(PID, &running)]));

    assert_eq!(editors.status(&idle).await.unwrap(), ProjectStatus::Idle);
    assert_eq!(editors.status(&crashed).await.unwrap(), ProjectStatus::Crashed);
    assert_eq!(editors.status(&running).await.unwrap(), ProjectStatus::Running);
}

#[tokio::test]
async fn statuses_use_one_listing() {
    let (_a, idle) = project(false);
    let (_b, crashed) = project(true);
    let (_c, running) = project(false);
    let directory = FakeDirectory::with(vec![ManagedProcess::new(PID, &running)]);
    let editors = lifecycle(directory.clone());

    let statuses = editors
        .statuses(&[idle.clone(), crashed.clone(), running.clone()])
        .await
        .unwrap();

    assert_eq!(
        statuses,
        vec![
            (idle, ProjectStatus::Idle),
            (crashed, ProjectStatus::Crashed),
            (running, ProjectStatus::Running),
        ]
    );
    assert_eq!(directory.queries.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn status_surfaces_query_failure() {
    let (_dir, path) = project(false);
    let editors = lifecycle(FakeDirectory::failing());
    assert!(editors.status(&path).await.is_err());
    assert!(editors.statuses(&[path]).await.is_err());
}

#[tokio::test]
async fn admit_then_status_after_crash_cleanup() {
    let (_dir, path) = project(true);
    let editors = lifecycle(FakeDirectory::empty());

    assert_eq!(editors.status(&path).await.unwrap(), ProjectStatus::Crashed);
    assert!(editors.admit(&path).await.unwrap().is_allowed());
    assert_eq!(editors.status(&path).await.unwrap(), ProjectStatus::Idle);
    assert!(!path.join("Temp").exists());
}
