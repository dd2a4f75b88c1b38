// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Conversation session state machine
//!
//! A session owns the ordered turn history for one interaction and gates
//! when enough user input has accumulated to attempt an answer. Triage mode
//! waits for a minimum number of user turns before invoking the pipeline;
//! tutor mode answers immediately. The machine is re-evaluated on every
//! incoming message — there is no terminal state.

pub mod manager;

pub use manager::SessionManager;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::images::ResolvedImage;
use crate::rag::{PipelineError, RagPipeline};

/// Canned reply emitted while triage mode is still gathering symptoms
pub const NEED_MORE_DETAIL_REPLY: &str = "Please provide more details about your symptoms.";

/// Interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Single plant-name query -> informational answer + image
    Tutor,
    /// Multi-turn symptom description -> recommended-plant answer + image
    Triage,
}

/// Per-turn lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    AwaitingMoreInput,
    Ready,
    Responded,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::AwaitingMoreInput => "awaiting_more_input",
            Phase::Ready => "ready",
            Phase::Responded => "responded",
        }
    }
}

/// One (user, assistant) exchange; append-only, ordered by arrival
#[derive(Debug, Clone)]
pub struct ConversationTurn {
    pub user: String,
    pub assistant: String,
}

/// Reply produced for one incoming message
#[derive(Debug)]
pub struct SessionReply {
    pub text: String,
    pub image: Option<ResolvedImage>,
    pub phase: Phase,
    pub turns: usize,
    pub recommendation_made: bool,
}

/// One user's ongoing interaction with the assistant
pub struct Session {
    id: String,
    mode: Mode,
    phase: Phase,
    turns: Vec<ConversationTurn>,
    recommendation_made: bool,
    triage_min_turns: usize,
    pipeline: Arc<RagPipeline>,
}

impl Session {
    pub fn new(
        id: String,
        mode: Mode,
        triage_min_turns: usize,
        pipeline: Arc<RagPipeline>,
    ) -> Self {
        Self {
            id,
            mode,
            phase: Phase::Idle,
            turns: Vec::new(),
            recommendation_made: false,
            triage_min_turns,
            pipeline,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn recommendation_made(&self) -> bool {
        self.recommendation_made
    }

    /// Handle one incoming user message.
    ///
    /// Below the triage threshold this records the turn with the canned
    /// reply and does NOT touch the retriever or synthesizer. Otherwise the
    /// full pipeline runs; its failure is surfaced to the caller (and noted
    /// in the history) rather than swallowed.
    pub async fn handle_message(&mut self, text: &str) -> Result<SessionReply, PipelineError> {
        // user turns so far, counting this one
        let user_turns = self.turns.len() + 1;

        if self.mode == Mode::Triage && user_turns < self.triage_min_turns {
            self.phase = Phase::AwaitingMoreInput;
            self.turns.push(ConversationTurn {
                user: text.to_string(),
                assistant: NEED_MORE_DETAIL_REPLY.to_string(),
            });

            debug!(
                session = %self.id,
                user_turns,
                needed = self.triage_min_turns,
                "gathering more symptom detail"
            );

            return Ok(SessionReply {
                text: NEED_MORE_DETAIL_REPLY.to_string(),
                image: None,
                phase: self.phase,
                turns: self.turns.len(),
                recommendation_made: self.recommendation_made,
            });
        }

        self.phase = Phase::Ready;

        // triage grounds retrieval in the whole accumulated description;
        // tutor uses the plant name just entered
        let query = match self.mode {
            Mode::Tutor => text.to_string(),
            Mode::Triage => {
                let mut parts: Vec<&str> = self.turns.iter().map(|t| t.user.as_str()).collect();
                parts.push(text);
                parts.join(" ")
            }
        };

        let answer = match self.pipeline.answer(self.mode, &query).await {
            Ok(answer) => answer,
            Err(e) => {
                // keep the user input in the history so triage accumulation
                // survives a transient model failure
                self.turns.push(ConversationTurn {
                    user: text.to_string(),
                    assistant: e.user_message(),
                });
                return Err(e);
            }
        };

        let mut reply_text = match self.mode {
            Mode::Tutor => answer.text.clone(),
            Mode::Triage => format!("Recommended Plant: {}", answer.text),
        };
        if answer.image.is_none() {
            reply_text.push_str(&format!("\nNo image found for {}.", answer.subject));
        }

        if self.mode == Mode::Triage {
            self.recommendation_made = true;
        }
        self.phase = Phase::Responded;
        self.turns.push(ConversationTurn {
            user: text.to_string(),
            assistant: reply_text.clone(),
        });

        Ok(SessionReply {
            text: reply_text,
            image: answer.image,
            phase: self.phase,
            turns: self.turns.len(),
            recommendation_made: self.recommendation_made,
        })
    }
}
