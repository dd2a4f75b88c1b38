// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Session registry
//!
//! One process serves many sessions; each session is serialized behind its
//! own mutex so a single conversation processes one input fully before the
//! next, while different conversations proceed independently. The index is
//! shared read-only across all of them through the pipeline.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use super::{Mode, Session, SessionReply};
use crate::rag::{PipelineError, RagPipeline};

/// Owns all live sessions for the process
pub struct SessionManager {
    sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
    pipeline: Arc<RagPipeline>,
    triage_min_turns: usize,
}

impl SessionManager {
    pub fn new(pipeline: Arc<RagPipeline>, triage_min_turns: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            pipeline,
            triage_min_turns,
        }
    }

    /// Route one message into its session, creating the session on first
    /// contact. Switching mode restarts the conversation: turn thresholds
    /// and history are mode-specific.
    pub async fn handle_message(
        &self,
        session_id: &str,
        mode: Mode,
        text: &str,
    ) -> Result<SessionReply, PipelineError> {
        let session = self.get_or_create(session_id, mode).await;
        let mut guard = session.lock().await;

        if guard.mode() != mode {
            debug!(session = session_id, ?mode, "mode switched, restarting session");
            *guard = Session::new(
                session_id.to_string(),
                mode,
                self.triage_min_turns,
                self.pipeline.clone(),
            );
        }

        guard.handle_message(text).await
    }

    async fn get_or_create(&self, session_id: &str, mode: Mode) -> Arc<Mutex<Session>> {
        if let Some(session) = self.sessions.read().await.get(session_id) {
            return session.clone();
        }

        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                Arc::new(Mutex::new(Session::new(
                    session_id.to_string(),
                    mode,
                    self.triage_min_turns,
                    self.pipeline.clone(),
                )))
            })
            .clone()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
