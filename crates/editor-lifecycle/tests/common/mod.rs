#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use editor_lifecycle::{
    BoxError, CacheCleaner, ExtraArgsSource, LaunchRecorder, TempCleaner, TerminationTimings,
};
use editor_process_control::{
    Liveness, ManagedProcess, Platform, ProcessControl, ProcessControlError, ProcessDirectory,
    ProcessQueryError, SignalDelivery, WindowControl, WindowControlError,
};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const PID: u32 = 4242;

/// Create a project directory, optionally with a lock marker and cache files.
pub fn project(with_lock: bool) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("Game");
    std::fs::create_dir_all(path.join("Assets")).expect("failed to create project");
    if with_lock {
        std::fs::create_dir_all(path.join("Temp/Bee")).expect("failed to create cache");
        std::fs::write(path.join("Temp/Bee/cache.bin"), b"x").expect("failed to write cache");
        std::fs::write(path.join("Temp/UnityLockfile"), b"").expect("failed to write lock");
    }
    (dir, path)
}

// =========================================================================
// Process directory
// =========================================================================

#[derive(Default)]
pub struct FakeDirectory {
    processes: Mutex<Vec<ManagedProcess>>,
    fail: AtomicBool,
    pub queries: AtomicUsize,
}

impl FakeDirectory {
    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with(processes: Vec<ManagedProcess>) -> Arc<Self> {
        let directory = Self::default();
        *directory.processes.lock().unwrap() = processes;
        Arc::new(directory)
    }

    pub fn failing() -> Arc<Self> {
        let directory = Self::default();
        directory.fail.store(true, Ordering::SeqCst);
        Arc::new(directory)
    }
}

#[async_trait]
impl ProcessDirectory for FakeDirectory {
    async fn list_managed_processes(&self) -> Result<Vec<ManagedProcess>, ProcessQueryError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(ProcessQueryError::Failed {
                command: "ps".to_string(),
                exit_code: Some(1),
                stderr: "operation not permitted".to_string(),
            });
        }
        Ok(self.processes.lock().unwrap().clone())
    }
}

// =========================================================================
// A scripted editor process
// =========================================================================

/// Which request makes the fake editor exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiesOn {
    AlreadyGone,
    Quit,
    Terminate,
    Kill,
    Never,
}

/// Fake editor shared by the process control and window control fakes.
pub struct FakeEditor {
    alive: AtomicBool,
    dies_on: DiesOn,
    pub calls: Mutex<Vec<&'static str>>,
}

impl FakeEditor {
    pub fn new(dies_on: DiesOn) -> Arc<Self> {
        Arc::new(Self {
            alive: AtomicBool::new(dies_on != DiesOn::AlreadyGone),
            dies_on,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    fn hit(&self, trigger: DiesOn) -> SignalDelivery {
        if !self.alive.load(Ordering::SeqCst) {
            return SignalDelivery::ProcessMissing;
        }
        if self.dies_on == trigger {
            self.alive.store(false, Ordering::SeqCst);
        }
        SignalDelivery::Delivered
    }
}

pub struct FakeControl(pub Arc<FakeEditor>);

#[async_trait]
impl ProcessControl for FakeControl {
    async fn probe(&self, _pid: u32) -> Liveness {
        if self.0.alive.load(Ordering::SeqCst) {
            Liveness::Alive
        } else {
            Liveness::Gone
        }
    }

    async fn terminate(&self, _pid: u32) -> Result<SignalDelivery, ProcessControlError> {
        self.0.record("terminate");
        Ok(self.0.hit(DiesOn::Terminate))
    }

    async fn kill(&self, _pid: u32) -> Result<SignalDelivery, ProcessControlError> {
        self.0.record("kill");
        Ok(self.0.hit(DiesOn::Kill))
    }
}

pub struct FakeWindows {
    editor: Arc<FakeEditor>,
    cooperative: bool,
    quit_fails: bool,
    pub focused: AtomicUsize,
}

impl FakeWindows {
    pub fn new(editor: Arc<FakeEditor>, cooperative: bool) -> Arc<Self> {
        Arc::new(Self {
            editor,
            cooperative,
            quit_fails: false,
            focused: AtomicUsize::new(0),
        })
    }

    /// Claims cooperative quit, but the quit request itself fails.
    pub fn failing_quit(editor: Arc<FakeEditor>) -> Arc<Self> {
        Arc::new(Self {
            editor,
            cooperative: true,
            quit_fails: true,
            focused: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl WindowControl for FakeWindows {
    fn supports_cooperative_quit(&self) -> bool {
        self.cooperative
    }

    async fn focus(&self, _pid: u32) -> Result<(), WindowControlError> {
        self.focused.fetch_add(1, Ordering::SeqCst);
        Err(WindowControlError::Unsupported)
    }

    async fn request_quit(&self, _pid: u32) -> Result<(), WindowControlError> {
        if !self.cooperative {
            return Err(WindowControlError::Unsupported);
        }
        self.editor.record("quit");
        if self.quit_fails {
            return Err(WindowControlError::Failed {
                program: "osascript".to_string(),
                exit_code: Some(1),
                stderr: "Not authorized to send Apple events".to_string(),
            });
        }
        self.editor.hit(DiesOn::Quit);
        Ok(())
    }
}

// =========================================================================
// Cleaner, recorder and settings
// =========================================================================

/// Counts calls and performs the real delete.
#[derive(Default)]
pub struct CountingCleaner {
    pub calls: AtomicUsize,
}

impl CountingCleaner {
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheCleaner for CountingCleaner {
    async fn clean(&self, project_path: &Path) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        TempCleaner::new().clean(project_path).await;
    }
}

#[derive(Default)]
pub struct RecordingRecorder {
    pub launched: Mutex<Vec<(PathBuf, DateTime<Utc>)>>,
    pub fail: bool,
}

#[async_trait]
impl LaunchRecorder for RecordingRecorder {
    async fn mark_launched(&self, project_path: &Path, at: DateTime<Utc>) -> Result<(), BoxError> {
        if self.fail {
            return Err("registry is read-only".into());
        }
        self.launched
            .lock()
            .unwrap()
            .push((project_path.to_path_buf(), at));
        Ok(())
    }
}

pub struct StaticArgs(pub Option<&'static str>);

#[async_trait]
impl ExtraArgsSource for StaticArgs {
    async fn extra_args(&self, _project_path: &Path) -> Result<Option<String>, BoxError> {
        Ok(self.0.map(str::to_string))
    }
}

// =========================================================================
// Wiring
// =========================================================================

/// A platform whose single editor has `project_path` open.
pub fn platform_with_editor(
    project_path: &Path,
    dies_on: DiesOn,
    cooperative: bool,
) -> (Platform, Arc<FakeEditor>) {
    let editor = FakeEditor::new(dies_on);
    let platform = Platform::new(
        FakeDirectory::with(vec![ManagedProcess::new(PID, project_path)]),
        Arc::new(FakeControl(editor.clone())),
        FakeWindows::new(editor.clone(), cooperative),
    );
    (platform, editor)
}

pub fn timings() -> TerminationTimings {
    TerminationTimings::default()
}
