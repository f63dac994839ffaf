#![cfg(feature = "pulldown")]

mod support;

use fencestream::adapters::pulldown;
use fencestream::FenceStream;
use pulldown_cmark::{Event, Tag};

fn regions_for(chunks: Vec<String>) -> Vec<fencestream::Region> {
    let mut s = FenceStream::new();
    for chunk in &chunks {
        s.append(chunk);
    }
    s.finalize();
    s.into_regions()
}

#[test]
fn sample_document_renders_the_same_html_under_any_chunking() {
    let doc = include_str!("fixtures/setup_readme.md");
    let expected = pulldown::to_html(&regions_for(support::chunk_whole(doc)));
    for t in 0..8 {
        let got = pulldown::to_html(&regions_for(support::chunk_random(doc, t, 19)));
        assert_eq!(got, expected, "t={t}");
    }
    assert!(expected.contains("<code>src</code>"));
    assert!(expected.contains("<pre><code>bash\ngit clone"));
}

#[test]
fn events_are_balanced() {
    let doc = include_str!("fixtures/setup_readme.md");
    let events = pulldown::events(&regions_for(support::chunk_chars(doc)));
    let mut depth = 0i32;
    for e in &events {
        match e {
            Event::Start(Tag::Paragraph) | Event::Start(Tag::CodeBlock(_)) => depth += 1,
            Event::End(_) => depth -= 1,
            _ => {}
        }
        assert!((0..=1).contains(&depth));
    }
    assert_eq!(depth, 0);
}
