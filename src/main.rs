// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use ayur_assist::{
    api,
    config::AppConfig,
    embeddings::RemoteEmbeddingClient,
    images::ImageResolver,
    index::{IndexBuilder, PdfDirectoryLoader, SharedIndex, TextSplitter},
    llm::GroqChatClient,
    rag::{AnswerSynthesizer, RagPipeline, Retriever},
    session::SessionManager,
};
use std::{env, sync::Arc};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🌿 Starting Ayur Assist node...\n");

    let config = AppConfig::from_env()?;
    println!("📚 Document corpus: {}", config.documents_dir.display());
    println!("🖼  Herb images:     {}", config.herb_images_dir.display());
    println!();

    // External service clients
    let embeddings = Arc::new(RemoteEmbeddingClient::new(&config.embedding)?);
    let chat = Arc::new(GroqChatClient::new(&config.chat)?);

    // Shared document index, built lazily on first use or via /v1/index/build
    let splitter = TextSplitter::new(config.chunk_window, config.chunk_overlap)?;
    let builder = IndexBuilder::new(
        Box::new(PdfDirectoryLoader::new(config.documents_dir.clone())),
        splitter,
        embeddings.clone(),
        config.max_documents,
    );
    let index = Arc::new(SharedIndex::new(builder));

    // Answer pipeline
    let retriever = Retriever::new(index.clone(), embeddings);
    let synthesizer = AnswerSynthesizer::new(chat.clone());
    let images = ImageResolver::new(config.herb_images_dir.clone(), chat)?;
    let pipeline = Arc::new(RagPipeline::new(
        retriever,
        synthesizer,
        images,
        config.top_k,
    ));

    let manager = Arc::new(SessionManager::new(pipeline, config.triage_min_turns));

    api::start_server(&config.api_addr, manager, index)
        .await
        .map_err(|e| anyhow::anyhow!("server error: {}", e))?;

    Ok(())
}
