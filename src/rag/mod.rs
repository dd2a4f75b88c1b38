// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Retrieval-augmented generation: retriever, synthesizer and pipeline glue

pub mod errors;
pub mod pipeline;
pub mod retriever;
pub mod synthesizer;

pub use errors::PipelineError;
pub use pipeline::{GroundedAnswer, RagPipeline};
pub use retriever::Retriever;
pub use synthesizer::AnswerSynthesizer;
