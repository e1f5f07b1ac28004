//! Application state for the TUI.

use super::theme::Theme;
use crate::context::{open_project, HubContext, OpenOutcome};
use editor_lifecycle::ProjectStatus;
use hub_projects::{current_branch, filter_projects, HubProject};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Input mode for the project list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing into the filter.
    Filter,
}

/// Operation running in the background for one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingOperation {
    Launch,
    Stop,
}

impl PendingOperation {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Launch => "launching",
            Self::Stop => "stopping",
        }
    }
}

/// Results reported back by background tasks.
#[derive(Debug)]
pub enum TaskEvent {
    Finished {
        path: PathBuf,
        op: PendingOperation,
        result: Result<String, String>,
    },
    Statuses(Result<Vec<(PathBuf, ProjectStatus)>, String>),
}

/// Main application state.
pub struct App {
    pub theme: Theme,
    pub input_mode: InputMode,
    pub show_help: bool,
    pub status_message: Option<String>,

    // Data
    pub projects: Vec<HubProject>,
    pub statuses: HashMap<PathBuf, ProjectStatus>,
    pub branches: HashMap<PathBuf, Option<String>>,

    // Selection, an index into the filtered list
    pub selected: usize,
    pub filter: String,

    /// At most one operation per project.
    pub pending: HashMap<PathBuf, PendingOperation>,

    ctx: Arc<HubContext>,
    tx: mpsc::UnboundedSender<TaskEvent>,
    rx: mpsc::UnboundedReceiver<TaskEvent>,
    refresh_interval: Duration,
    refresh_in_flight: bool,
    last_refresh: Option<Instant>,
}

impl App {
    pub fn new(ctx: Arc<HubContext>, theme: Theme) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let refresh_interval = Duration::from_millis(ctx.config.refresh_interval_ms.max(100));
        let mut app = Self {
            theme,
            input_mode: InputMode::Normal,
            show_help: false,
            status_message: None,
            projects: Vec::new(),
            statuses: HashMap::new(),
            branches: HashMap::new(),
            selected: 0,
            filter: String::new(),
            pending: HashMap::new(),
            ctx,
            tx,
            rx,
            refresh_interval,
            refresh_in_flight: false,
            last_refresh: None,
        };
        app.reload_projects();
        app
    }

    /// Re-read the hub registry. Statuses of projects that are still listed
    /// are kept until the next refresh.
    pub fn reload_projects(&mut self) {
        match self.ctx.projects() {
            Ok(projects) => {
                self.branches = projects
                    .iter()
                    .map(|p| (p.path.clone(), current_branch(&p.path)))
                    .collect();
                self.statuses
                    .retain(|path, _| projects.iter().any(|p| &p.path == path));
                self.projects = projects;
                self.clamp_selection();
            }
            Err(e) => {
                warn!(error = %e, "failed to load projects");
                self.set_status_message(format!("Failed to load projects: {:#}", e));
            }
        }
    }

    /// Projects matching the current filter, in display order.
    pub fn visible_projects(&self) -> Vec<&HubProject> {
        filter_projects(&self.projects, &self.filter)
    }

    pub fn selected_project(&self) -> Option<&HubProject> {
        self.visible_projects().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let count = self.visible_projects().len();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    pub fn select_prev(&mut self) {
        let count = self.visible_projects().len();
        if count > 0 {
            self.selected = (self.selected + count - 1) % count;
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_projects().len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter.push(c);
        self.selected = 0;
    }

    pub fn pop_filter_char(&mut self) {
        self.filter.pop();
        self.clamp_selection();
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
        self.selected = 0;
    }

    pub fn status_of(&self, project: &HubProject) -> Option<ProjectStatus> {
        self.statuses.get(&project.path).copied()
    }

    pub fn branch_of(&self, project: &HubProject) -> Option<&str> {
        self.branches.get(&project.path).and_then(|b| b.as_deref())
    }

    pub fn pending_of(&self, project: &HubProject) -> Option<PendingOperation> {
        self.pending.get(&project.path).copied()
    }

    /// Set a status message to display.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some(message);
    }

    /// Clear the status message.
    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    /// Reserve the selected project for `op`. Returns `None` when nothing is
    /// selected or another operation is still running for it.
    fn begin_operation(&mut self, op: PendingOperation) -> Option<HubProject> {
        let project = self.selected_project()?.clone();
        if let Some(running) = self.pending.get(&project.path) {
            self.set_status_message(format!(
                "{} is busy ({}), try again when it finishes",
                project.title,
                running.label()
            ));
            return None;
        }
        self.pending.insert(project.path.clone(), op);
        self.set_status_message(format!("{} {}...", capitalize(op.label()), project.title));
        Some(project)
    }

    /// Launch the selected project's editor in the background.
    pub fn start_launch(&mut self) -> bool {
        let Some(project) = self.begin_operation(PendingOperation::Launch) else {
            return false;
        };
        let lifecycle = self.ctx.lifecycle.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let result = match open_project(&lifecycle, &project).await {
                Ok(OpenOutcome::Launched(launched)) => Ok(match launched.pid {
                    Some(pid) => format!("Launched {} (pid {})", project.title, pid),
                    None => format!("Launched {}", project.title),
                }),
                Ok(OpenOutcome::Skipped(message)) => Ok(message),
                Err(e) => Err(format!("Launch failed: {:#}", e)),
            };
            let _ = tx.send(TaskEvent::Finished {
                path: project.path,
                op: PendingOperation::Launch,
                result,
            });
        });
        true
    }

    /// Stop the selected project's editor in the background.
    pub fn start_stop(&mut self) -> bool {
        let Some(project) = self.begin_operation(PendingOperation::Stop) else {
            return false;
        };
        let lifecycle = self.ctx.lifecycle.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let result = match lifecycle.stop(&project.path).await {
                Ok(outcome) => match outcome.stage {
                    Some(stage) => Ok(format!("Stopped {} ({})", project.title, stage)),
                    None if !outcome.process_found => {
                        Ok(format!("{} is not running", project.title))
                    }
                    None => Err(format!("{} is still running after kill", project.title)),
                },
                Err(e) => Err(format!("Stop failed: {}", e)),
            };
            let _ = tx.send(TaskEvent::Finished {
                path: project.path,
                op: PendingOperation::Stop,
                result,
            });
        });
        true
    }

    /// Query every project's status in the background unless a query is
    /// already running.
    pub fn request_status_refresh(&mut self) {
        if self.refresh_in_flight {
            return;
        }
        self.refresh_in_flight = true;
        self.last_refresh = Some(Instant::now());

        let lifecycle = self.ctx.lifecycle.clone();
        let tx = self.tx.clone();
        let paths: Vec<PathBuf> = self.projects.iter().map(|p| p.path.clone()).collect();

        tokio::spawn(async move {
            let result = lifecycle.statuses(&paths).await.map_err(|e| e.to_string());
            let _ = tx.send(TaskEvent::Statuses(result));
        });
    }

    pub fn refresh_due(&self) -> bool {
        match self.last_refresh {
            None => true,
            Some(at) => at.elapsed() >= self.refresh_interval,
        }
    }

    /// Apply every event the background tasks have reported so far.
    pub fn drain_task_events(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            self.handle_task_event(event);
        }
    }

    pub fn handle_task_event(&mut self, event: TaskEvent) {
        match event {
            TaskEvent::Finished { path, op, result } => {
                self.pending.remove(&path);
                debug!(project = %path.display(), ?op, ok = result.is_ok(), "operation finished");
                match result {
                    Ok(message) | Err(message) => self.set_status_message(message),
                }
                if op == PendingOperation::Launch {
                    // last-opened time changed
                    self.reload_projects();
                }
                self.request_status_refresh();
            }
            TaskEvent::Statuses(result) => {
                self.refresh_in_flight = false;
                match result {
                    Ok(statuses) => self.statuses = statuses.into_iter().collect(),
                    Err(e) => {
                        warn!(error = %e, "status refresh failed");
                        self.set_status_message(format!("Status refresh failed: {}", e));
                    }
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) async fn next_task_event(&mut self) -> Option<TaskEvent> {
        self.rx.recv().await
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
