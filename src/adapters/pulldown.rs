//! Maps regions onto `pulldown-cmark` events so any pulldown-based renderer can act as the
//! rendering surface.
//!
//! Plain runs and inline code are inline content and share a paragraph. A fence block is a
//! block-level element, so the surrounding paragraph is closed before it and reopened after.

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Tag, TagEnd};

use crate::types::{Region, RegionKind};

pub fn events(regions: &[Region]) -> Vec<Event<'static>> {
    let mut out = Vec::with_capacity(regions.len() + 2);
    let mut in_paragraph = false;

    for region in regions {
        let text = CowStr::from(region.text.clone());
        match region.kind {
            RegionKind::PlainRun | RegionKind::InlineCode => {
                if !in_paragraph {
                    out.push(Event::Start(Tag::Paragraph));
                    in_paragraph = true;
                }
                out.push(if region.kind.is_code() {
                    Event::Code(text)
                } else {
                    Event::Text(text)
                });
            }
            RegionKind::FenceBlock => {
                if in_paragraph {
                    out.push(Event::End(TagEnd::Paragraph));
                    in_paragraph = false;
                }
                out.push(Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(
                    CowStr::Borrowed(""),
                ))));
                if !region.text.is_empty() {
                    out.push(Event::Text(text));
                }
                out.push(Event::End(TagEnd::CodeBlock));
            }
        }
    }

    if in_paragraph {
        out.push(Event::End(TagEnd::Paragraph));
    }
    out
}

pub fn push_html(out: &mut String, regions: &[Region]) {
    pulldown_cmark::html::push_html(out, events(regions).into_iter());
}

pub fn to_html(regions: &[Region]) -> String {
    let mut out = String::new();
    push_html(&mut out, regions);
    out
}
