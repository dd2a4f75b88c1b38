// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Answer synthesis over retrieved context

use std::sync::Arc;
use tracing::debug;

use super::errors::PipelineError;
use crate::index::ScoredChunk;
use crate::llm::ChatClient;
use crate::session::Mode;

/// Hard character budget for the context block of the prompt
pub const DEFAULT_MAX_CONTEXT_CHARS: usize = 6000;

const TUTOR_PROMPT: &str =
    "Provide specific insights from the plant documents below. Answer only from the given context.";
const TRIAGE_PROMPT: &str =
    "Analyze the symptoms and provide a suitable medicinal plant. Answer only from the given context.";

/// Synthesizes a grounded answer from query + retrieved chunks.
///
/// The model's output is untrusted free text; callers must not assume any
/// structure in it.
pub struct AnswerSynthesizer {
    chat: Arc<dyn ChatClient>,
    max_context_chars: usize,
}

impl AnswerSynthesizer {
    pub fn new(chat: Arc<dyn ChatClient>) -> Self {
        Self {
            chat,
            max_context_chars: DEFAULT_MAX_CONTEXT_CHARS,
        }
    }

    pub fn with_max_context_chars(mut self, max_context_chars: usize) -> Self {
        self.max_context_chars = max_context_chars;
        self
    }

    /// Concatenate chunk texts into a bounded context block.
    ///
    /// Chunks are kept whole: the first chunk that would overflow the budget
    /// ends the block (retrieval order already puts the best context first).
    fn build_context(&self, chunks: &[ScoredChunk]) -> String {
        let mut context = String::new();
        for scored in chunks {
            let needed = scored.chunk.text.chars().count() + 2;
            if !context.is_empty() && context.chars().count() + needed > self.max_context_chars {
                break;
            }
            if !context.is_empty() {
                context.push_str("\n\n");
            }
            context.push_str(&scored.chunk.text);
        }
        context
    }

    fn build_prompt(&self, mode: Mode, query: &str, context: &str) -> String {
        let instruction = match mode {
            Mode::Tutor => TUTOR_PROMPT,
            Mode::Triage => TRIAGE_PROMPT,
        };
        format!(
            "{}\nUser: {}\n<context>\n{}\n</context>",
            instruction, query, context
        )
    }

    /// Produce an answer grounded in the retrieved chunks.
    ///
    /// No retry on failure — the caller decides.
    pub async fn synthesize(
        &self,
        mode: Mode,
        query: &str,
        chunks: &[ScoredChunk],
    ) -> Result<String, PipelineError> {
        let context = self.build_context(chunks);
        let prompt = self.build_prompt(mode, query, &context);

        debug!(
            context_chunks = chunks.len(),
            prompt_chars = prompt.len(),
            "synthesizing answer"
        );

        let answer = self.chat.complete(&prompt).await?;
        Ok(answer.trim().to_string())
    }
}
