use crate::agent::AgentRole;
use crate::task::{
    PlatformError, SessionMessage, SessionPlatform, SessionRequest, SessionState, TaskHandle,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{LazyLock, Mutex, MutexGuard};
use tokio::sync::Notify;

static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Sets an environment variable for the lifetime of the guard.
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<OsString>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &Path) -> Self {
        // The process environment is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = ENV_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::var_os(key);
        // SAFETY: serialized by ENV_LOCK and #[serial]; no other threads read the env here.
        unsafe { std::env::set_var(key, value) };
        Self {
            key,
            original,
            _lock: lock,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // SAFETY: still holding ENV_LOCK.
        unsafe {
            match &self.original {
                Some(value) => std::env::set_var(self.key, value),
                None => std::env::remove_var(self.key),
            }
        }
    }
}

/// In-memory platform that hands out `test-session-N` ids.
#[derive(Default)]
pub(crate) struct MockPlatform {
    counter: AtomicUsize,
    fail_create: bool,
    fail_prompt: bool,
    gate: Option<Notify>,
    prompt_gate: Option<Notify>,
    states: Mutex<HashMap<String, SessionState>>,
    messages: Mutex<HashMap<String, Vec<SessionMessage>>>,
    pub(crate) requests: Mutex<Vec<SessionRequest>>,
    pub(crate) prompts: Mutex<Vec<(String, AgentRole, String)>>,
}

impl MockPlatform {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Every session request is rejected.
    pub(crate) fn failing() -> Self {
        Self {
            fail_create: true,
            ..Self::default()
        }
    }

    /// Sessions are created but prompts are rejected.
    pub(crate) fn failing_prompts() -> Self {
        Self {
            fail_prompt: true,
            ..Self::default()
        }
    }

    /// Session requests wait until [`MockPlatform::open_gate`] is called.
    pub(crate) fn gated() -> Self {
        Self {
            gate: Some(Notify::new()),
            ..Self::default()
        }
    }

    /// Prompt sends wait until [`MockPlatform::open_prompt_gate`] is called.
    pub(crate) fn with_gated_prompts(mut self) -> Self {
        self.prompt_gate = Some(Notify::new());
        self
    }

    pub(crate) fn open_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_waiters();
            gate.notify_one();
        }
    }

    pub(crate) fn open_prompt_gate(&self) {
        if let Some(gate) = &self.prompt_gate {
            gate.notify_waiters();
            gate.notify_one();
        }
    }

    pub(crate) fn set_messages(&self, session_id: &str, messages: Vec<SessionMessage>) {
        self.messages
            .lock()
            .unwrap()
            .insert(session_id.to_string(), messages);
    }

    pub(crate) fn set_state(&self, session_id: &str, state: SessionState) {
        self.states
            .lock()
            .unwrap()
            .insert(session_id.to_string(), state);
    }
}

#[async_trait]
impl SessionPlatform for MockPlatform {
    async fn create_session(&self, request: &SessionRequest) -> Result<String, PlatformError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.requests.lock().unwrap().push(request.clone());
        if self.fail_create {
            return Err(PlatformError("platform unavailable".to_string()));
        }
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("test-session-{}", n))
    }

    async fn send_prompt(
        &self,
        session_id: &str,
        agent: AgentRole,
        prompt: &str,
    ) -> Result<(), PlatformError> {
        if let Some(gate) = &self.prompt_gate {
            gate.notified().await;
        }
        if self.fail_prompt {
            return Err(PlatformError("prompt rejected".to_string()));
        }
        self.prompts
            .lock()
            .unwrap()
            .push((session_id.to_string(), agent, prompt.to_string()));
        Ok(())
    }

    async fn session_state(&self, session_id: &str) -> Result<SessionState, PlatformError> {
        self.states
            .lock()
            .unwrap()
            .get(session_id)
            .cloned()
            .ok_or_else(|| PlatformError(format!("unknown session '{}'", session_id)))
    }

    async fn session_messages(
        &self,
        session_id: &str,
    ) -> Result<Vec<SessionMessage>, PlatformError> {
        Ok(self
            .messages
            .lock()
            .unwrap()
            .get(session_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Yield until the handle's task leaves `pending`.
pub(crate) async fn settle(handle: &TaskHandle) {
    for _ in 0..100 {
        if handle.status() != crate::task::TaskStatus::Pending {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("task {} never left pending", handle.id());
}

/// Yield until the handle has a session id, and return it.
pub(crate) async fn wait_for_session(handle: &TaskHandle) -> String {
    settle(handle).await;
    // The prompt is sent after the id is published; let it go through.
    tokio::task::yield_now().await;
    handle
        .session_id()
        .unwrap_or_else(|| panic!("task {} has no session: {:?}", handle.id(), handle.snapshot()))
}
