#![allow(dead_code)]

use fencestream::{Document, FenceStream, RegionKind, RegionStatus};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub type Snapshot = Vec<(RegionKind, RegionStatus, String)>;

pub fn snapshot(stream: &FenceStream) -> Snapshot {
    stream
        .regions()
        .iter()
        .map(|r| (r.kind, r.status, r.text.clone()))
        .collect()
}

pub fn collect_final_regions(chunks: impl IntoIterator<Item = String>) -> Snapshot {
    let mut s = FenceStream::new();
    for chunk in chunks {
        s.append(&chunk);
    }
    s.finalize();
    snapshot(&s)
}

/// Replays every update into a [`Document`] mirror instead of reading the parser directly.
pub fn collect_mirrored_regions(chunks: impl IntoIterator<Item = String>) -> Snapshot {
    let mut s = FenceStream::new();
    let mut doc = Document::new();
    for chunk in chunks {
        doc.apply(s.append(&chunk));
    }
    doc.apply(s.finalize());
    assert!(doc.is_finished());
    doc.regions()
        .iter()
        .map(|r| (r.kind, r.status, r.text.clone()))
        .collect()
}

pub fn region(kind: RegionKind, status: RegionStatus, text: &str) -> (RegionKind, RegionStatus, String) {
    (kind, status, text.to_string())
}

pub fn chunk_whole(text: &str) -> Vec<String> {
    vec![text.to_string()]
}

pub fn chunk_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(|s| s.to_string()).collect()
}

pub fn chunk_chars(text: &str) -> Vec<String> {
    text.chars().map(|c| c.to_string()).collect()
}

/// Two chunks cut at char index `at` (both non-empty for `0 < at < len`).
pub fn chunk_split_at(text: &str, at: usize) -> Vec<String> {
    let byte = text
        .char_indices()
        .nth(at)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    vec![text[..byte].to_string(), text[byte..].to_string()]
}

/// Seeded random chunking: each chunk holds `1..=max_chars` chars, cut on char boundaries.
pub fn chunk_random(text: &str, seed: u64, max_chars: usize) -> Vec<String> {
    assert!(max_chars > 0);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let want = rng.random_range(1..=max_chars);
        let end = rest
            .char_indices()
            .nth(want)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let (head, tail) = rest.split_at(end);
        out.push(head.to_string());
        rest = tail;
    }
    out
}
