//! Application state: the session store and the loaded lesson configuration.
//!
//! Each session owns its exercise and recap set. They are generated on
//! first access and then served unchanged, so a learner is always graded
//! against the operands they were shown. Only an explicit "new exercise" /
//! "new recap" request replaces them.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::config::{load_lesson_config_from_env, EngineSettings, Labels, LessonConfig};
use crate::domain::Session;
use crate::engine::{generate, generate_recap, Exercise};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown session id: {0}")]
    UnknownSession(String),
}

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<HashMap<String, Session>>>,
    pub engine: EngineSettings,
    pub labels: Labels,
}

impl AppState {
    /// Build state from env: load TOML config if provided, else defaults.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_lesson_config_from_env().unwrap_or_default();
        Self::with_config(cfg)
    }

    pub fn with_config(cfg: LessonConfig) -> Self {
        let e = &cfg.engine;
        info!(
            target: "complex_lesson",
            operand_min = e.operand_min,
            operand_max = e.operand_max,
            tolerance = e.tolerance,
            recap_len = e.recap_len,
            "Engine settings"
        );
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            engine: cfg.engine,
            labels: cfg.labels,
        }
    }

    /// Register a fresh, empty session and return its id.
    /// Idle sessions are pruned first, then the oldest ones if the store is full.
    #[instrument(level = "debug", skip(self))]
    pub async fn create_session(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;
        let evicted = prune_sessions(
            &mut sessions,
            Instant::now(),
            self.engine.session_idle(),
            self.engine.max_sessions.saturating_sub(1),
        );
        sessions.insert(id.clone(), Session::new());
        info!(target: "complex_lesson", session = %id, evicted, held = sessions.len(), "Session opened");
        id
    }

    /// The session's exercise, generated on first access.
    #[instrument(level = "debug", skip(self), fields(%session_id))]
    pub async fn exercise_for(&self, session_id: &str) -> Result<Exercise, SessionError> {
        // Generate under the write lock so concurrent first reads agree.
        let mut sessions = self.sessions.write().await;
        let session = touch(&mut sessions, session_id)?;
        let range = self.engine.operand_range();
        let ex = session.exercise.get_or_insert_with(|| {
            let ex = generate(range);
            debug!(target: "exercise", session = %session_id, ?ex, "Generated exercise");
            ex
        });
        Ok(ex.clone())
    }

    /// Replace the session's exercise with a freshly generated one.
    #[instrument(level = "debug", skip(self), fields(%session_id))]
    pub async fn new_exercise(&self, session_id: &str) -> Result<Exercise, SessionError> {
        let ex = generate(self.engine.operand_range());
        let mut sessions = self.sessions.write().await;
        touch(&mut sessions, session_id)?.exercise = Some(ex.clone());
        info!(target: "exercise", session = %session_id, "Exercise replaced on request");
        Ok(ex)
    }

    /// The session's recap set, generated on first access.
    #[instrument(level = "debug", skip(self), fields(%session_id))]
    pub async fn recap_for(&self, session_id: &str) -> Result<Vec<Exercise>, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = touch(&mut sessions, session_id)?;
        let (range, len) = (self.engine.operand_range(), self.engine.recap_len);
        let set = session.recap.get_or_insert_with(|| {
            debug!(target: "exercise", session = %session_id, len, "Generated recap set");
            generate_recap(range, len)
        });
        Ok(set.clone())
    }

    /// Replace the session's recap set.
    #[instrument(level = "debug", skip(self), fields(%session_id))]
    pub async fn new_recap(&self, session_id: &str) -> Result<Vec<Exercise>, SessionError> {
        let set = generate_recap(self.engine.operand_range(), self.engine.recap_len);
        let mut sessions = self.sessions.write().await;
        touch(&mut sessions, session_id)?.recap = Some(set.clone());
        info!(target: "exercise", session = %session_id, "Recap set replaced on request");
        Ok(set)
    }
}

/// Look up a session and refresh its last-access time.
fn touch<'a>(
    sessions: &'a mut HashMap<String, Session>,
    session_id: &str,
) -> Result<&'a mut Session, SessionError> {
    let session = sessions
        .get_mut(session_id)
        .ok_or_else(|| SessionError::UnknownSession(session_id.to_string()))?;
    session.last_access = Instant::now();
    Ok(session)
}

/// Drop sessions idle for `idle` or longer, then the least recently used
/// ones until at most `keep` remain. Returns how many were removed.
fn prune_sessions(
    sessions: &mut HashMap<String, Session>,
    now: Instant,
    idle: Duration,
    keep: usize,
) -> usize {
    let before = sessions.len();
    sessions.retain(|_, s| now.saturating_duration_since(s.last_access) < idle);
    if sessions.len() > keep {
        let mut by_age: Vec<(Instant, String)> = sessions
            .iter()
            .map(|(id, s)| (s.last_access, id.clone()))
            .collect();
        by_age.sort();
        for (_, id) in by_age.into_iter().take(sessions.len() - keep) {
            sessions.remove(&id);
        }
    }
    let evicted = before - sessions.len();
    if evicted > 0 {
        debug!(target: "complex_lesson", evicted, "Pruned sessions");
    }
    evicted
}
