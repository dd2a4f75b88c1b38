// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! The retrieval-augmented answer pipeline
//!
//! One call runs retrieve -> synthesize -> resolve image in sequence. The
//! image stage is best-effort; the first two stages are mandatory and their
//! failures abort the turn.

use tracing::info;

use super::errors::PipelineError;
use super::retriever::Retriever;
use super::synthesizer::AnswerSynthesizer;
use crate::images::{ImageResolver, ResolvedImage};
use crate::session::Mode;

/// A grounded answer, optionally illustrated
#[derive(Debug)]
pub struct GroundedAnswer {
    /// The synthesized answer text
    pub text: String,
    /// Subject used for image resolution (also used for the no-image note)
    pub subject: String,
    /// Illustration, when one could be resolved
    pub image: Option<ResolvedImage>,
    /// Distinct source documents behind the answer, in retrieval order
    pub sources: Vec<String>,
}

/// Ties the retriever, synthesizer and image resolver together
pub struct RagPipeline {
    retriever: Retriever,
    synthesizer: AnswerSynthesizer,
    images: ImageResolver,
    top_k: usize,
}

impl RagPipeline {
    pub fn new(
        retriever: Retriever,
        synthesizer: AnswerSynthesizer,
        images: ImageResolver,
        top_k: usize,
    ) -> Self {
        Self {
            retriever,
            synthesizer,
            images,
            top_k,
        }
    }

    /// Produce a grounded answer for `query`.
    ///
    /// In tutor mode the query itself names the plant, so it doubles as the
    /// image subject; in triage mode the synthesized recommendation does.
    pub async fn answer(&self, mode: Mode, query: &str) -> Result<GroundedAnswer, PipelineError> {
        let chunks = self.retriever.retrieve(query, self.top_k).await?;
        let text = self.synthesizer.synthesize(mode, query, &chunks).await?;

        let subject = match mode {
            Mode::Tutor => query.trim().to_string(),
            Mode::Triage => text.trim().to_string(),
        };

        let image = self.images.resolve(&subject).await.into_option();

        let mut sources = Vec::new();
        for scored in &chunks {
            if !sources.contains(&scored.chunk.source) {
                sources.push(scored.chunk.source.clone());
            }
        }

        info!(
            mode = ?mode,
            context_chunks = chunks.len(),
            illustrated = image.is_some(),
            "answer produced"
        );

        Ok(GroundedAnswer {
            text,
            subject,
            image,
            sources,
        })
    }
}
