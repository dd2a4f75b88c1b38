// Index build contract: non-empty corpus -> non-empty index,
// empty/unparsable corpus -> NoDocumentsFound

use async_trait::async_trait;
use std::sync::Arc;

use ayur_assist::embeddings::{Embedding, EmbeddingClient, EmbeddingError};
use ayur_assist::index::{
    IndexBuilder, IndexError, PdfDirectoryLoader, SharedIndex, StaticDocumentSource, TextSplitter,
};

struct HistogramEmbedder;

#[async_trait]
impl EmbeddingClient for HistogramEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let mut v = vec![0.0f32; 8];
        for (i, c) in text.chars().enumerate() {
            v[i % 8] += (c as u32 % 31) as f32;
        }
        Ok(Embedding::new(v))
    }

    fn dimension(&self) -> usize {
        8
    }
}

fn splitter() -> TextSplitter {
    TextSplitter::new(120, 20).unwrap()
}

#[tokio::test]
async fn test_parsable_corpus_yields_non_empty_index() {
    let builder = IndexBuilder::new(
        Box::new(StaticDocumentSource::new(vec![
            ("tulsi.pdf", "Tulsi, holy basil, supports respiratory health."),
            ("neem.pdf", "Neem bark and leaf are bitter and cooling."),
        ])),
        splitter(),
        Arc::new(HistogramEmbedder),
        20,
    );

    let index = builder.build().await.unwrap();
    assert!(!index.is_empty());
}

#[tokio::test]
async fn test_empty_source_is_no_documents_found() {
    let builder = IndexBuilder::new(
        Box::new(StaticDocumentSource::new(vec![])),
        splitter(),
        Arc::new(HistogramEmbedder),
        20,
    );

    assert!(matches!(
        builder.build().await,
        Err(IndexError::NoDocumentsFound { .. })
    ));
}

#[tokio::test]
async fn test_directory_without_parsable_pdfs_is_no_documents_found() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("not-a-pdf.txt"), "plain text").unwrap();
    std::fs::write(dir.path().join("garbage.pdf"), "not really pdf bytes").unwrap();

    let builder = IndexBuilder::new(
        Box::new(PdfDirectoryLoader::new(dir.path())),
        splitter(),
        Arc::new(HistogramEmbedder),
        20,
    );

    assert!(matches!(
        builder.build().await,
        Err(IndexError::NoDocumentsFound { .. })
    ));
}

#[tokio::test]
async fn test_failed_rebuild_keeps_previous_index() {
    // first build succeeds, then the source disappears; the shared handle
    // must keep serving the old index
    let dir = tempfile::tempdir().unwrap();

    struct SwitchableSource {
        dir: std::path::PathBuf,
    }

    impl ayur_assist::index::DocumentSource for SwitchableSource {
        fn load(&self) -> Result<Vec<ayur_assist::index::LoadedDocument>, IndexError> {
            let marker = self.dir.join("present");
            if marker.exists() {
                Ok(vec![ayur_assist::index::LoadedDocument {
                    name: "doc.pdf".to_string(),
                    text: "tulsi monograph".to_string(),
                }])
            } else {
                Ok(vec![])
            }
        }

        fn origin(&self) -> String {
            self.dir.display().to_string()
        }
    }

    std::fs::write(dir.path().join("present"), b"x").unwrap();

    let shared = SharedIndex::new(IndexBuilder::new(
        Box::new(SwitchableSource {
            dir: dir.path().to_path_buf(),
        }),
        splitter(),
        Arc::new(HistogramEmbedder),
        20,
    ));

    let first = shared.get_or_build().await.unwrap();
    assert!(!first.is_empty());

    std::fs::remove_file(dir.path().join("present")).unwrap();
    assert!(shared.rebuild().await.is_err());

    // previous index still published
    let snapshot = shared.snapshot().await.unwrap();
    assert!(Arc::ptr_eq(&first, &snapshot));
}
