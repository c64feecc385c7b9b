//! Tests for the streaming translator: line re-framing, verbatim
//! passthrough, and delta aggregation.

use std::convert::Infallible;

use bytes::Bytes;
use deepgate::proxy::error::GatewayError;
use deepgate::proxy::stream::{collect_content, relay_sse};
use futures::{stream, Stream, StreamExt};
use pretty_assertions::assert_eq;

const DELTA_HE: &str = "data: {\"choices\":[{\"delta\":{\"content\":\"He\"}}]}\n";
const DELTA_LLO: &str = "data: {\"choices\":[{\"delta\":{\"content\":\"llo\"}}]}\n";
const DONE: &str = "data: [DONE]\n";

fn fragments(parts: &[&str]) -> impl Stream<Item = Result<Bytes, Infallible>> + Send + 'static {
    let owned: Vec<Result<Bytes, Infallible>> = parts
        .iter()
        .map(|p| Ok(Bytes::from(p.to_string())))
        .collect();
    stream::iter(owned)
}

fn byte_chunks(
    data: &[u8],
    size: usize,
) -> impl Stream<Item = Result<Bytes, Infallible>> + Send + 'static {
    let owned: Vec<Result<Bytes, Infallible>> = data
        .chunks(size)
        .map(|c| Ok(Bytes::copy_from_slice(c)))
        .collect();
    stream::iter(owned)
}

async fn relayed(parts: &[&str]) -> Vec<String> {
    relay_sse(fragments(parts))
        .map(|line| line.unwrap())
        .collect()
        .await
}

// --- fragmentation invariance ---

#[tokio::test]
async fn relay_is_invariant_under_fragmentation() {
    let whole = format!("{DELTA_HE}{DELTA_LLO}{DONE}");
    let chunkings: Vec<Vec<&str>> = vec![
        // everything in one fragment
        vec![whole.as_str()],
        // one fragment per line
        vec![DELTA_HE, DELTA_LLO, DONE],
        // split mid-prefix
        vec![
            "da",
            "ta: {\"choices\":[{\"delta\":{\"content\":\"He\"}}]}\nda",
            "ta: {\"choices\":[{\"delta\":{\"content\":\"llo\"}}]}\ndata: [DONE]\n",
        ],
        // empty fragments interleaved
        vec!["", DELTA_HE, "", DELTA_LLO, DONE, ""],
    ];

    let expected = vec![
        format!("{}\n\n", DELTA_HE.trim_end()),
        format!("{}\n\n", DELTA_LLO.trim_end()),
        "data: [DONE]\n\n".to_string(),
    ];

    for chunking in &chunkings {
        assert_eq!(relayed(chunking).await, expected, "chunking: {chunking:?}");
    }
}

#[tokio::test]
async fn collect_is_invariant_under_fragmentation() {
    let whole = format!("{DELTA_HE}{DELTA_LLO}{DONE}");
    let byte_split: Vec<String> = whole
        .as_bytes()
        .chunks(7)
        .map(|c| String::from_utf8(c.to_vec()).unwrap())
        .collect();
    let byte_split: Vec<&str> = byte_split.iter().map(String::as_str).collect();

    for chunking in [
        vec![whole.as_str()],
        vec![DELTA_HE, DELTA_LLO, DONE],
        byte_split,
    ] {
        let content = collect_content(fragments(&chunking)).await.unwrap();
        assert_eq!(content, "Hello", "chunking: {chunking:?}");
    }
}

#[tokio::test]
async fn multibyte_characters_survive_byte_level_splits() {
    let line = "data: {\"choices\":[{\"delta\":{\"content\":\"中文 désolé\"}}]}\n";
    let whole = format!("{line}{DONE}");
    let expected_line = format!("{}\n\n", line.trim_end());

    // Every chunk size up to 5 splits some multi-byte sequence.
    for size in 1..=5 {
        let content = collect_content(byte_chunks(whole.as_bytes(), size))
            .await
            .unwrap();
        assert_eq!(content, "中文 désolé", "chunk size {size}");

        let lines: Vec<String> = relay_sse(byte_chunks(whole.as_bytes(), size))
            .map(|l| l.unwrap())
            .collect()
            .await;
        assert_eq!(
            lines,
            vec![expected_line.clone(), "data: [DONE]\n\n".to_string()],
            "chunk size {size}"
        );
    }
}

#[tokio::test]
async fn multibyte_whole_body_fallback_survives_byte_level_splits() {
    let body = "{\"content\":\"你好，世界\"}";
    let content = collect_content(byte_chunks(body.as_bytes(), 2))
        .await
        .unwrap();
    assert_eq!(content, "你好，世界");
}

// --- line filtering ---

#[tokio::test]
async fn non_data_lines_produce_no_output() {
    let parts = vec!["\n", ": keep-alive\n", "event: ping\n", DELTA_HE, "\n"];
    let lines = relayed(&parts).await;
    assert_eq!(lines, vec![format!("{}\n\n", DELTA_HE.trim_end())]);

    let content = collect_content(fragments(&parts)).await.unwrap();
    assert_eq!(content, "He");
}

#[tokio::test]
async fn done_is_forwarded_but_never_accumulated() {
    let lines = relayed(&[DONE]).await;
    assert_eq!(lines, vec!["data: [DONE]\n\n".to_string()]);

    let parts = vec![DELTA_HE, DONE, DELTA_LLO];
    let content = collect_content(fragments(&parts)).await.unwrap();
    assert_eq!(content, "Hello");
}

#[tokio::test]
async fn trailing_partial_line_is_discarded() {
    let parts = vec![DELTA_HE, "data: {\"choices\":[{\"delta\":{\"content\":\"X\""];
    let lines = relayed(&parts).await;
    assert_eq!(lines.len(), 1);

    let content = collect_content(fragments(&parts)).await.unwrap();
    assert_eq!(content, "He");
}

// --- partial-failure tolerance ---

#[tokio::test]
async fn malformed_lines_are_skipped_without_corruption() {
    let parts = vec![
        DELTA_HE,
        "data: {not json at all\n",
        "data: {\"choices\":[]}\n",
        "data: {\"unexpected\":\"shape\"}\n",
        DELTA_LLO,
        DONE,
    ];
    let content = collect_content(fragments(&parts)).await.unwrap();
    assert_eq!(content, "Hello");
}

#[tokio::test]
async fn passthrough_never_parses_line_payloads() {
    // A data line with garbage JSON is still forwarded verbatim.
    let parts = vec!["data: {not json at all\n"];
    let lines = relayed(&parts).await;
    assert_eq!(lines, vec!["data: {not json at all\n\n".to_string()]);
}

// --- whole-body fallback ---

#[tokio::test]
async fn falls_back_to_whole_body_json() {
    let parts = vec!["{\"content\":\"direct answer\"}"];
    let content = collect_content(fragments(&parts)).await.unwrap();
    assert_eq!(content, "direct answer");
}

#[tokio::test]
async fn whole_body_json_without_content_field_yields_empty() {
    let parts = vec!["{\"message\":\"no content here\"}"];
    let content = collect_content(fragments(&parts)).await.unwrap();
    assert_eq!(content, "");
}

#[tokio::test]
async fn unparseable_body_is_malformed_with_bounded_snippet() {
    let long_garbage = "<html>".repeat(100);
    let parts = vec![long_garbage.as_str()];
    let err = collect_content(fragments(&parts)).await.unwrap_err();
    match err {
        GatewayError::MalformedUpstreamResponse { snippet } => {
            assert_eq!(snippet.chars().count(), 200);
            assert!(long_garbage.starts_with(&snippet));
        }
        other => panic!("unexpected error: {other}"),
    }
}

// --- ordering ---

#[tokio::test]
async fn emission_order_matches_assembly_order() {
    let lines: Vec<String> = (0..50)
        .map(|i| format!("data: {{\"choices\":[{{\"delta\":{{\"content\":\"{i} \"}}}}]}}\n"))
        .collect();
    let joined = lines.concat();
    // deliberately awkward split size so lines straddle fragments
    let parts: Vec<String> = joined
        .as_bytes()
        .chunks(13)
        .map(|c| String::from_utf8(c.to_vec()).unwrap())
        .collect();
    let parts: Vec<&str> = parts.iter().map(String::as_str).collect();

    let out = relayed(&parts).await;
    let expected: Vec<String> = lines
        .iter()
        .map(|l| format!("{}\n\n", l.trim_end()))
        .collect();
    assert_eq!(out, expected);

    let content = collect_content(fragments(&parts)).await.unwrap();
    let expected_content: String = (0..50).map(|i| format!("{i} ")).collect();
    assert_eq!(content, expected_content);
}
