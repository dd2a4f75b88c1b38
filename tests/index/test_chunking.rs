// Chunking properties at production window/overlap settings

use ayur_assist::index::{ChunkIndex, DocumentChunk, TextSplitter};

fn synthetic_text(chars: usize) -> String {
    // repeating but position-distinct text so reassembly mistakes show up
    (0..chars)
        .map(|i| char::from(b'a' + (i % 26) as u8))
        .collect()
}

#[test]
fn test_production_settings_cover_document_without_gaps() {
    let splitter = TextSplitter::new(1000, 200).unwrap();
    let text = synthetic_text(5000);
    let chunks = splitter.split("monograph.pdf", &text);

    // consecutive windows advance by window - overlap
    for pair in chunks.windows(2) {
        assert_eq!(pair[1].start, pair[0].start + 800);
        // overlap: next chunk starts before the previous one ends
        assert!(pair[1].start < pair[0].end);
    }

    // order-preserving coverage: first chunk whole, then the unseen tail of
    // each subsequent chunk, reproduces the original
    let mut rebuilt = chunks[0].text.clone();
    for pair in chunks.windows(2) {
        let already_covered = pair[0].end - pair[1].start;
        let fresh: String = pair[1].text.chars().skip(already_covered).collect();
        rebuilt.push_str(&fresh);
    }
    assert_eq!(rebuilt, text);
}

#[test]
fn test_chunk_offsets_match_text_length() {
    let splitter = TextSplitter::new(1000, 200).unwrap();
    let text = synthetic_text(2345);
    let chunks = splitter.split("monograph.pdf", &text);

    assert_eq!(chunks[0].start, 0);
    assert_eq!(chunks.last().unwrap().end, 2345);
    for chunk in &chunks {
        assert_eq!(chunk.text.chars().count(), chunk.end - chunk.start);
    }
}

#[test]
fn test_search_returns_at_most_k_sorted_by_score() {
    let entries: Vec<(DocumentChunk, Vec<f32>)> = (0..12)
        .map(|i| {
            let chunk = DocumentChunk {
                text: format!("chunk {}", i),
                source: format!("doc{}.pdf", i / 4),
                start: 0,
                end: 7,
            };
            let angle = i as f32 * 0.2;
            (chunk, vec![angle.cos(), angle.sin(), 0.1, 0.1])
        })
        .collect();

    let index = ChunkIndex::build(entries, 4).unwrap();

    for k in [1usize, 3, 5, 20] {
        let results = index.search(&[1.0, 0.0, 0.1, 0.1], k).unwrap();
        assert!(results.len() <= k);
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }
}
