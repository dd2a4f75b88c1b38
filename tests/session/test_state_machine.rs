// Session state machine: triage threshold gating, tutor immediacy,
// mode switching, and graceful no-image degradation

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ayur_assist::embeddings::{Embedding, EmbeddingClient, EmbeddingError};
use ayur_assist::images::ImageResolver;
use ayur_assist::index::{IndexBuilder, SharedIndex, StaticDocumentSource, TextSplitter};
use ayur_assist::llm::{ChatClient, ChatError};
use ayur_assist::rag::{AnswerSynthesizer, RagPipeline, Retriever};
use ayur_assist::session::{
    Mode, Phase, Session, SessionManager, NEED_MORE_DETAIL_REPLY,
};

struct CountingEmbedder {
    calls: AtomicUsize,
}

#[async_trait]
impl EmbeddingClient for CountingEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut v = vec![0.01f32; 4];
        for (i, c) in text.chars().enumerate() {
            v[i % 4] += (c as u32 % 17) as f32;
        }
        Ok(Embedding::new(v))
    }

    fn dimension(&self) -> usize {
        4
    }
}

struct CountingChat {
    calls: AtomicUsize,
    reply: String,
}

#[async_trait]
impl ChatClient for CountingChat {
    async fn complete(&self, _prompt: &str) -> Result<String, ChatError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }

    fn model_name(&self) -> &str {
        "counting"
    }
}

struct Harness {
    chat: Arc<CountingChat>,
    embedder: Arc<CountingEmbedder>,
    pipeline: Arc<RagPipeline>,
}

fn harness(herb_dir: &Path, reply: &str) -> Harness {
    let chat = Arc::new(CountingChat {
        calls: AtomicUsize::new(0),
        reply: reply.to_string(),
    });
    let embedder = Arc::new(CountingEmbedder {
        calls: AtomicUsize::new(0),
    });

    let index = Arc::new(SharedIndex::new(IndexBuilder::new(
        Box::new(StaticDocumentSource::new(vec![
            ("tulsi.pdf", "Tulsi relieves coughs and colds."),
            ("neem.pdf", "Neem soothes itchy, irritated skin."),
        ])),
        TextSplitter::new(200, 40).unwrap(),
        embedder.clone() as Arc<dyn EmbeddingClient>,
        20,
    )));

    let retriever = Retriever::new(index, embedder.clone() as Arc<dyn EmbeddingClient>);
    let synthesizer = AnswerSynthesizer::new(chat.clone() as Arc<dyn ChatClient>);
    let images = ImageResolver::new(herb_dir, chat.clone() as Arc<dyn ChatClient>).unwrap();

    Harness {
        chat: chat.clone(),
        embedder: embedder.clone(),
        pipeline: Arc::new(RagPipeline::new(retriever, synthesizer, images, 4)),
    }
}

#[tokio::test]
async fn test_triage_below_threshold_never_touches_pipeline() {
    let herbs = tempfile::tempdir().unwrap();
    let h = harness(herbs.path(), "Neem");
    let mut session = Session::new("s-1".to_string(), Mode::Triage, 3, h.pipeline.clone());

    for (i, message) in ["itchy skin", "also redness"].iter().enumerate() {
        let reply = session.handle_message(message).await.unwrap();
        assert_eq!(reply.text, NEED_MORE_DETAIL_REPLY);
        assert_eq!(reply.phase, Phase::AwaitingMoreInput);
        assert_eq!(reply.turns, i + 1);
        assert!(!reply.recommendation_made);
    }

    // neither the retriever/index nor the model was invoked
    assert_eq!(h.embedder.calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.chat.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_triage_third_turn_runs_full_pipeline() {
    let herbs = tempfile::tempdir().unwrap();
    let h = harness(herbs.path(), "Neem");
    let mut session = Session::new("s-1".to_string(), Mode::Triage, 3, h.pipeline.clone());

    session.handle_message("itchy skin").await.unwrap();
    session.handle_message("also redness").await.unwrap();
    let reply = session.handle_message("worse at night").await.unwrap();

    assert!(reply.text.starts_with("Recommended Plant: Neem"));
    assert_eq!(reply.phase, Phase::Responded);
    assert_eq!(reply.turns, 3);
    assert!(reply.recommendation_made);
    assert!(h.chat.calls.load(Ordering::SeqCst) >= 1);
    assert!(h.embedder.calls.load(Ordering::SeqCst) >= 1);
}

#[tokio::test]
async fn test_tutor_answers_on_first_turn() {
    let herbs = tempfile::tempdir().unwrap();
    let h = harness(herbs.path(), "Tulsi is holy basil.");
    let mut session = Session::new("s-1".to_string(), Mode::Tutor, 3, h.pipeline.clone());

    let reply = session.handle_message("Tulsi").await.unwrap();

    assert_ne!(reply.text, NEED_MORE_DETAIL_REPLY);
    assert!(reply.text.starts_with("Tulsi is holy basil."));
    assert_eq!(reply.phase, Phase::Responded);
    assert!(h.chat.calls.load(Ordering::SeqCst) >= 1);
}

#[tokio::test]
async fn test_missing_image_adds_note_instead_of_failing() {
    // empty herb directory and a model reply with no URL: the answer must
    // still arrive, with an explicit no-image note
    let herbs = tempfile::tempdir().unwrap();
    let h = harness(herbs.path(), "Tulsi");
    let mut session = Session::new("s-1".to_string(), Mode::Tutor, 3, h.pipeline.clone());

    let reply = session.handle_message("Tulsi").await.unwrap();

    assert!(reply.image.is_none());
    assert!(reply.text.contains("No image found for Tulsi"));
}

#[tokio::test]
async fn test_manager_keeps_sessions_apart() {
    let herbs = tempfile::tempdir().unwrap();
    let h = harness(herbs.path(), "Neem");
    let manager = SessionManager::new(h.pipeline.clone(), 3);

    let a = manager
        .handle_message("alice", Mode::Triage, "itchy skin")
        .await
        .unwrap();
    let b = manager
        .handle_message("bob", Mode::Triage, "sore throat")
        .await
        .unwrap();

    assert_eq!(a.turns, 1);
    assert_eq!(b.turns, 1);
    assert_eq!(manager.session_count().await, 2);
}

#[tokio::test]
async fn test_manager_mode_switch_restarts_history() {
    let herbs = tempfile::tempdir().unwrap();
    let h = harness(herbs.path(), "Neem");
    let manager = SessionManager::new(h.pipeline.clone(), 3);

    manager
        .handle_message("alice", Mode::Triage, "itchy skin")
        .await
        .unwrap();
    manager
        .handle_message("alice", Mode::Triage, "also redness")
        .await
        .unwrap();

    // switching to tutor resets accumulated triage turns
    let reply = manager
        .handle_message("alice", Mode::Tutor, "Neem")
        .await
        .unwrap();
    assert_eq!(reply.turns, 1);

    // and switching back starts triage from zero again
    let reply = manager
        .handle_message("alice", Mode::Triage, "itchy skin")
        .await
        .unwrap();
    assert_eq!(reply.text, NEED_MORE_DETAIL_REPLY);
    assert_eq!(reply.turns, 1);
}
