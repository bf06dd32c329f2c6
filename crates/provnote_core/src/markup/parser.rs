//! Tagged text to ordered blocks.
//!
//! A single linear scan with one open-block slot. The grammar cannot nest,
//! so a new open tag implicitly closes whatever is open.

use crate::markup::grammar::{classify_line, expected_keys, metadata_value, LineKind};
use crate::model::block::{ContentBlock, ContentBlockType};
use log::debug;

enum ScanState {
    Idle,
    Open(ContentBlock),
}

/// Parses a note buffer into blocks in buffer order.
///
/// Never fails:
/// - an open tag while a block is open flushes that block first,
/// - a close tag that does not match the open block is body text,
/// - an image reference flushes the open block and emits an `Image` block,
/// - untagged lines coalesce into one `Default` block per run.
///
/// Blank lines do not start a `Default` block, and trailing blank lines of a
/// `Default` block are dropped.
pub fn parse(buffer: &str) -> Vec<ContentBlock> {
    let mut blocks = Vec::new();
    let mut state = ScanState::Idle;
    let mut line_count = 0usize;

    for line in buffer.lines() {
        line_count += 1;
        match classify_line(line) {
            LineKind::Open(kind) => {
                flush(&mut state, &mut blocks);
                state = ScanState::Open(ContentBlock::new(kind));
            }
            LineKind::Close(kind) => {
                let closes_open_block =
                    matches!(&state, ScanState::Open(block) if block.kind == kind);
                if closes_open_block {
                    flush(&mut state, &mut blocks);
                } else {
                    push_text(&mut state, line);
                }
            }
            LineKind::ImageRef { id, filename } => {
                flush(&mut state, &mut blocks);
                blocks.push(ContentBlock::image(id, filename));
            }
            LineKind::Text => push_text(&mut state, line),
        }
    }
    flush(&mut state, &mut blocks);

    debug!(
        "event=markup_parse module=markup status=ok lines={} blocks={}",
        line_count,
        blocks.len()
    );
    blocks
}

fn push_text(state: &mut ScanState, line: &str) {
    match state {
        ScanState::Open(block) => block.body.push(line.to_string()),
        ScanState::Idle => {
            if line.trim().is_empty() {
                return;
            }
            let mut block = ContentBlock::new(ContentBlockType::Default);
            block.body.push(line.to_string());
            *state = ScanState::Open(block);
        }
    }
}

fn flush(state: &mut ScanState, blocks: &mut Vec<ContentBlock>) {
    let ScanState::Open(mut block) = std::mem::replace(state, ScanState::Idle) else {
        return;
    };

    if block.kind == ContentBlockType::Default {
        while block.body.last().is_some_and(|line| line.trim().is_empty()) {
            block.body.pop();
        }
        if block.body.is_empty() {
            return;
        }
    } else {
        strip_metadata(&mut block);
    }
    blocks.push(block);
}

/// Moves leading `KEY: value` lines into metadata, matching keys positionally.
fn strip_metadata(block: &mut ContentBlock) {
    let mut consumed = 0usize;
    for key in expected_keys(block.kind) {
        let Some(line) = block.body.get(consumed) else {
            break;
        };
        let Some(value) = metadata_value(line, *key) else {
            break;
        };
        let value = value.to_string();
        block.metadata.insert(*key, value);
        consumed += 1;
    }
    block.body.drain(..consumed);
}

#[cfg(test)]
mod tests {
    use super::parse;
    use crate::model::block::{ContentBlockType, MetadataKey};

    #[test]
    fn untagged_lines_coalesce_into_one_default_block() {
        let blocks = parse("plain line 1\nplain line 2");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, ContentBlockType::Default);
        assert_eq!(blocks[0].body, vec!["plain line 1", "plain line 2"]);
    }

    #[test]
    fn unclosed_block_is_flushed_by_next_open_tag() {
        let buffer = "<source-content>\nTITLE: Book\nquoted\n<ai-content>\nMODEL: m\nanswer\n</ai-content>";
        let blocks = parse(buffer);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind, ContentBlockType::Source);
        assert_eq!(blocks[0].body, vec!["quoted"]);
        assert_eq!(blocks[0].metadata.get(MetadataKey::Title), Some("Book"));
        assert_eq!(blocks[1].kind, ContentBlockType::Ai);
        assert_eq!(blocks[1].body, vec!["answer"]);
    }

    #[test]
    fn mismatched_close_tag_is_body_text() {
        let blocks = parse("<user-note>\nDATE: d\nNOTE:\nkeep\n</ai-content>\n</user-note>");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].body, vec!["keep", "</ai-content>"]);
    }

    #[test]
    fn stray_close_tag_becomes_default_content() {
        let blocks = parse("</source-content>\nafter");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, ContentBlockType::Default);
        assert_eq!(blocks[0].body, vec!["</source-content>", "after"]);
    }

    #[test]
    fn image_reference_closes_open_block() {
        let buffer = "<user-note>\nDATE: d\nNOTE:\nbefore\n<img-ref id=\"i1\" filename=\"a.png\">\nafter";
        let blocks = parse(buffer);
        let kinds: Vec<_> = blocks.iter().map(|block| block.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ContentBlockType::User,
                ContentBlockType::Image,
                ContentBlockType::Default
            ]
        );
        assert_eq!(blocks[1].image_id.as_deref(), Some("i1"));
        assert_eq!(blocks[1].image_filename.as_deref(), Some("a.png"));
        assert!(blocks[1].body.is_empty());
    }

    #[test]
    fn out_of_order_metadata_stays_in_body() {
        let blocks = parse("<source-content>\nDATE: today\nTITLE: late\nbody\n</source-content>");
        assert!(blocks[0].metadata.is_empty());
        assert_eq!(blocks[0].body, vec!["DATE: today", "TITLE: late", "body"]);
    }

    #[test]
    fn partial_metadata_prefix_is_consumed() {
        let blocks = parse("<ai-content>\nMODEL: m\nnot a key\n</ai-content>");
        assert_eq!(blocks[0].metadata.keys(), vec![MetadataKey::Model]);
        assert_eq!(blocks[0].body, vec!["not a key"]);
    }

    #[test]
    fn blank_lines_between_blocks_do_not_create_default_blocks() {
        let buffer = "\n\n<user-note>\nDATE: d\nNOTE:\na\n</user-note>\n\n\n\n<user-note>\nDATE: d\nNOTE:\nb\n</user-note>\n";
        let blocks = parse(buffer);
        assert_eq!(blocks.len(), 2);
        assert!(blocks
            .iter()
            .all(|block| block.kind == ContentBlockType::User));
    }

    #[test]
    fn default_block_keeps_inner_blank_lines_and_drops_trailing_ones() {
        let blocks = parse("a\n\nb\n\n\n<user-note>\nDATE: d\nNOTE:\nx\n</user-note>");
        assert_eq!(blocks[0].body, vec!["a", "", "b"]);
    }

    #[test]
    fn empty_buffer_yields_no_blocks() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n  \n").is_empty());
    }

    #[test]
    fn block_left_open_at_end_is_flushed() {
        let blocks = parse("<source-content>\nTITLE: t\nDATE: d\nQUOTE:\ntail");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].body, vec!["tail"]);
        assert_eq!(blocks[0].metadata.len(), 3);
    }
}
