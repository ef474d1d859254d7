//! The background task manager.
//!
//! `launch` never waits on the platform. It stores a pending record, spawns
//! a continuation that asks the platform for a session, and returns a
//! handle straight away. Each record is only written by its own
//! continuation (or by refresh/event calls after it is running), so no lock
//! is held across an await point.

use super::platform::{
    MessageRole, SessionEvent, SessionEventKind, SessionMessage, SessionPlatform, SessionRequest,
    SessionState,
};
use super::{BackgroundTask, LaunchRequest, TaskStatus, generate_task_id};
use crate::agent::AgentRole;
use crate::error::{RelayError, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use tokio::runtime::Handle;
use tracing::{Instrument, debug, info, info_span, warn};

type SharedTask = Arc<Mutex<BackgroundTask>>;

fn lock(task: &Mutex<BackgroundTask>) -> MutexGuard<'_, BackgroundTask> {
    task.lock().unwrap_or_else(|poison| poison.into_inner())
}

/// Read-only view of a launched task.
///
/// The session id may not be known yet; poll [`TaskHandle::session_id`] or
/// [`TaskHandle::status`] to observe the assignment.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: String,
    task: SharedTask,
}

impl TaskHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn session_id(&self) -> Option<String> {
        lock(&self.task).session_id.clone()
    }

    pub fn status(&self) -> TaskStatus {
        lock(&self.task).status
    }

    pub fn snapshot(&self) -> BackgroundTask {
        lock(&self.task).clone()
    }
}

/// Maps session ids to the role they were launched under.
///
/// Append-only for the life of the process. Sessions this process never
/// launched are simply absent.
#[derive(Debug, Clone, Default)]
pub struct SessionIndex {
    inner: Arc<RwLock<HashMap<String, AgentRole>>>,
}

impl SessionIndex {
    /// Record `session_id`. An existing entry is never overwritten.
    pub fn record(&self, session_id: &str, role: AgentRole) {
        let mut map = self.inner.write().unwrap_or_else(|poison| poison.into_inner());
        map.entry(session_id.to_string()).or_insert(role);
    }

    pub fn role_of(&self, session_id: &str) -> Option<AgentRole> {
        let map = self.inner.read().unwrap_or_else(|poison| poison.into_inner());
        map.get(session_id).copied()
    }

    pub fn len(&self) -> usize {
        let map = self.inner.read().unwrap_or_else(|poison| poison.into_inner());
        map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
struct TaskTable {
    order: Vec<String>,
    by_id: HashMap<String, SharedTask>,
}

/// Launches and tracks background tasks.
///
/// Cloning is cheap and clones share state.
#[derive(Clone)]
pub struct BackgroundTaskManager {
    platform: Arc<dyn SessionPlatform>,
    tasks: Arc<Mutex<TaskTable>>,
    sessions: SessionIndex,
}

impl BackgroundTaskManager {
    pub fn new(platform: Arc<dyn SessionPlatform>) -> Self {
        Self {
            platform,
            tasks: Arc::new(Mutex::new(TaskTable::default())),
            sessions: SessionIndex::default(),
        }
    }

    fn table(&self) -> MutexGuard<'_, TaskTable> {
        self.tasks.lock().unwrap_or_else(|poison| poison.into_inner())
    }

    fn find(&self, task_id: &str) -> Option<SharedTask> {
        self.table().by_id.get(task_id).cloned()
    }

    fn find_by_session(&self, session_id: &str) -> Option<SharedTask> {
        self.table()
            .by_id
            .values()
            .find(|task| lock(task).session_id.as_deref() == Some(session_id))
            .cloned()
    }

    /// Launch a task and return its handle immediately.
    ///
    /// The session request runs as a task on the current Tokio runtime.
    /// Without one nothing is recorded and `RuntimeUnavailable` is returned.
    pub fn launch(&self, request: LaunchRequest) -> Result<TaskHandle> {
        let runtime = Handle::try_current().map_err(|_| RelayError::RuntimeUnavailable)?;

        let id = generate_task_id();
        let task: SharedTask = Arc::new(Mutex::new(BackgroundTask::new(id.clone(), &request)));

        {
            let mut table = self.table();
            table.order.push(id.clone());
            table.by_id.insert(id.clone(), Arc::clone(&task));
        }

        info!(
            task_id = %id,
            agent = %request.agent,
            parent_session = %request.parent_session_id,
            "launching background task"
        );

        let span = info_span!("background_task", task_id = %id, agent = %request.agent);
        let continuation = start_session(
            Arc::clone(&self.platform),
            self.sessions.clone(),
            Arc::clone(&task),
            request,
        );
        runtime.spawn(continuation.instrument(span));

        Ok(TaskHandle { id, task })
    }

    /// Handle for an existing task.
    pub fn handle(&self, task_id: &str) -> Option<TaskHandle> {
        self.find(task_id).map(|task| TaskHandle {
            id: task_id.to_string(),
            task,
        })
    }

    /// Current status of a task.
    pub fn status(&self, task_id: &str) -> Option<TaskStatus> {
        self.find(task_id).map(|task| lock(&task).status)
    }

    /// Snapshot of a task.
    pub fn get(&self, task_id: &str) -> Option<BackgroundTask> {
        self.find(task_id).map(|task| lock(&task).clone())
    }

    /// Snapshots in launch order, optionally only children of `parent_session_id`.
    pub fn list_tasks(&self, parent_session_id: Option<&str>) -> Vec<BackgroundTask> {
        let table = self.table();
        table
            .order
            .iter()
            .filter_map(|id| table.by_id.get(id))
            .map(|task| lock(task).clone())
            .filter(|task| parent_session_id.is_none_or(|parent| task.parent_session_id == parent))
            .collect()
    }

    /// Role a session was launched under, if this manager launched it.
    pub fn session_role(&self, session_id: &str) -> Option<AgentRole> {
        self.sessions.role_of(session_id)
    }

    /// The session index.
    pub fn sessions(&self) -> &SessionIndex {
        &self.sessions
    }

    /// Poll the platform for a running task and apply any terminal state.
    ///
    /// A completed task also gets its output collected. Returns `Ok(None)`
    /// for unknown task ids. Polling errors are returned without changing
    /// the task.
    pub async fn refresh(&self, task_id: &str) -> Result<Option<TaskStatus>> {
        let Some(task) = self.find(task_id) else {
            return Ok(None);
        };

        let running_session = {
            let record = lock(&task);
            match (&record.status, &record.session_id) {
                (TaskStatus::Running, Some(session_id)) => Some(session_id.clone()),
                _ => None,
            }
        };

        if let Some(session_id) = running_session {
            let state = self
                .platform
                .session_state(&session_id)
                .await
                .map_err(|e| RelayError::PlatformError(e.to_string()))?;
            apply_state(&mut lock(&task), state);
        }

        self.collect_result(&task).await;
        Ok(Some(lock(&task).status))
    }

    /// Poll every running task.
    pub async fn refresh_all(&self) {
        let running: Vec<String> = self
            .list_tasks(None)
            .into_iter()
            .filter(|task| task.status == TaskStatus::Running)
            .map(|task| task.id)
            .collect();

        for task_id in running {
            if let Err(e) = self.refresh(&task_id).await {
                warn!(task_id = %task_id, error = %e, "failed to poll background task");
            }
        }
    }

    /// Apply a terminal event pushed by the platform.
    ///
    /// Returns whether a task changed state. Events for sessions this
    /// manager does not track are ignored, and so is an idle event that
    /// arrives before the prompt was delivered. Output is collected by the
    /// next [`refresh`](Self::refresh).
    pub fn handle_event(&self, event: &SessionEvent) -> bool {
        let Some(task) = self.find_by_session(&event.session_id) else {
            debug!(session_id = %event.session_id, "ignoring event for untracked session");
            return false;
        };

        let state = match &event.kind {
            SessionEventKind::Idle => SessionState::Idle,
            SessionEventKind::Error(message) => SessionState::Error(message.clone()),
        };
        apply_state(&mut lock(&task), state)
    }

    /// Fetch the transcript of a completed task once and keep its answer.
    async fn collect_result(&self, task: &SharedTask) {
        let session_id = {
            let record = lock(task);
            if record.status != TaskStatus::Completed || record.result.is_some() {
                return;
            }
            match &record.session_id {
                Some(session_id) => session_id.clone(),
                None => return,
            }
        };

        match self.platform.session_messages(&session_id).await {
            Ok(messages) => {
                let mut record = lock(task);
                if record.set_result(assistant_output(&messages)) {
                    debug!(task_id = %record.id, "collected background task output");
                }
            }
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "failed to read session messages");
            }
        }
    }
}

/// Apply a platform-reported state to a record. Returns whether it changed.
fn apply_state(record: &mut BackgroundTask, state: SessionState) -> bool {
    match state {
        SessionState::Busy => false,
        SessionState::Idle if !record.prompt_sent => {
            debug!(task_id = %record.id, "session idle before its prompt was delivered");
            false
        }
        SessionState::Idle => {
            let changed = record.complete();
            if changed {
                info!(task_id = %record.id, "background task completed");
            }
            changed
        }
        SessionState::Error(message) => {
            let changed = record.fail(message);
            if changed {
                warn!(task_id = %record.id, "background task failed");
            }
            changed
        }
    }
}

/// Text of the assistant's replies, in order.
fn assistant_output(messages: &[SessionMessage]) -> String {
    messages
        .iter()
        .filter(|message| message.role == MessageRole::Assistant)
        .map(|message| message.text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Continuation of `launch`: create the session, then hand it the prompt.
async fn start_session(
    platform: Arc<dyn SessionPlatform>,
    sessions: SessionIndex,
    task: SharedTask,
    request: LaunchRequest,
) {
    let session_request = SessionRequest {
        parent_id: request.parent_session_id.clone(),
        title: format!("{} (@{})", request.description, request.agent),
    };

    let session_id = match platform.create_session(&session_request).await {
        Ok(session_id) => session_id,
        Err(e) => {
            warn!(error = %e, "session creation failed");
            lock(&task).fail(format!("session creation failed: {}", e));
            return;
        }
    };

    // Index before publishing the id so a caller that sees it can delegate.
    sessions.record(&session_id, request.agent);
    if !lock(&task).assign_session(session_id.clone()) {
        return;
    }
    info!(session_id = %session_id, "session assigned");

    match platform
        .send_prompt(&session_id, request.agent, &request.prompt)
        .await
    {
        Ok(()) => {
            if lock(&task).mark_prompt_sent() {
                debug!(session_id = %session_id, "prompt delivered");
            }
        }
        Err(e) => {
            warn!(session_id = %session_id, error = %e, "failed to send prompt");
            lock(&task).fail(format!("failed to send prompt: {}", e));
        }
    }
}
