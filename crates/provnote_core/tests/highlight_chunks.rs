use provnote_core::{build_chunks, classify_score, Chunk, ScoredSpan};

fn concat(chunks: &[Chunk]) -> String {
    chunks.iter().map(|chunk| chunk.text.as_str()).collect()
}

#[test]
fn scenario_single_span() {
    let chunks = build_chunks("abcdef", &[ScoredSpan::new(2, 4, 0.5)]).expect("valid spans");
    let shape: Vec<_> = chunks
        .iter()
        .map(|chunk| (chunk.text.as_str(), chunk.highlighted, chunk.score))
        .collect();
    assert_eq!(
        shape,
        vec![("ab", false, 0.0), ("cd", true, 0.5), ("ef", false, 0.0)]
    );
}

#[test]
fn scenario_no_spans() {
    let chunks = build_chunks("abc", &[]).expect("no spans");
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, "abc");
    assert!(!chunks[0].highlighted);
}

#[test]
fn partitions_reconstruct_text_and_match_spans() {
    let text = "The treaty was signed in 1648.\n\nIt ended the war.\n\nAftermath followed.";
    let len = text.chars().count();
    let cases: Vec<Vec<ScoredSpan>> = vec![
        vec![ScoredSpan::new(0, len, 1.0)],
        vec![ScoredSpan::new(0, 3, 0.1), ScoredSpan::new(len - 5, len, 0.9)],
        vec![
            ScoredSpan::new(40, 48, 0.35),
            ScoredSpan::new(4, 10, 0.62),
            ScoredSpan::new(25, 34, 0.2),
        ],
        vec![ScoredSpan::new(10, 10, 0.0), ScoredSpan::new(10, 20, 0.5)],
    ];

    for spans in cases {
        let chunks = build_chunks(text, &spans).expect("valid spans");
        assert_eq!(concat(&chunks), text);

        let mut sorted = spans.clone();
        sorted.sort_by_key(|span| span.start);
        let highlighted: Vec<&Chunk> = chunks.iter().filter(|chunk| chunk.highlighted).collect();
        assert_eq!(highlighted.len(), sorted.len());
        for chunk in &highlighted {
            let ordinal = chunk.ordinal.expect("highlighted chunk has ordinal");
            let span = sorted[ordinal];
            assert_eq!((chunk.start, chunk.end, chunk.score), (span.start, span.end, span.score));
        }

        for pair in chunks.windows(2) {
            assert_eq!(pair[0].end, pair[1].start, "chunks must be gapless");
            assert!(
                pair[0].highlighted || pair[1].highlighted,
                "two plain chunks must never be adjacent"
            );
        }
    }
}

#[test]
fn empty_text_with_zero_length_span() {
    let chunks = build_chunks("", &[ScoredSpan::new(0, 0, 0.3)]).expect("valid span");
    assert_eq!(chunks.len(), 1);
    assert!(chunks[0].highlighted);
    assert_eq!(concat(&chunks), "");
}

#[test]
fn invalid_span_error_message_names_the_span() {
    let err = build_chunks("abc", &[ScoredSpan::new(0, 1, 0.2), ScoredSpan::new(2, 9, 0.2)])
        .expect_err("end past text");
    assert_eq!(err.to_string(), "span #1 [2, 9) exceeds text length (3)");
}

#[test]
fn buckets_for_chunk_scores_are_ordered() {
    let chunks = build_chunks(
        "abcdefghij",
        &[
            ScoredSpan::new(0, 2, 0.1),
            ScoredSpan::new(2, 4, 0.3),
            ScoredSpan::new(4, 6, 0.5),
            ScoredSpan::new(6, 8, 0.7),
            ScoredSpan::new(8, 10, 0.9),
        ],
    )
    .expect("valid spans");
    let levels: Vec<u8> = chunks
        .iter()
        .map(|chunk| classify_score(chunk.score, false).bucket.level())
        .collect();
    assert_eq!(levels, vec![0, 1, 2, 3, 4]);
}
