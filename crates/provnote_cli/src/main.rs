//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `provnote_core` linkage without a Flutter host.
//! - Exercise both engines with fixed input and deterministic output shape.

use provnote_core::{build_chunks, format, parse, ContentBlockType, ScoredSpan};

fn main() {
    println!("provnote_core ping={}", provnote_core::ping());
    println!("provnote_core version={}", provnote_core::core_version());

    let buffer = format("Hello world", "Diary", ContentBlockType::Source);
    for block in parse(&buffer) {
        println!(
            "block kind={} metadata={} body_lines={}",
            block.kind.as_str(),
            block.metadata.len(),
            block.body.len()
        );
    }

    match build_chunks("abcdef", &[ScoredSpan::new(2, 4, 0.5)]) {
        Ok(chunks) => {
            for chunk in chunks {
                println!(
                    "chunk text={:?} highlighted={} score={}",
                    chunk.text, chunk.highlighted, chunk.score
                );
            }
        }
        Err(err) => {
            eprintln!("chunk build failed: {err}");
            std::process::exit(1);
        }
    }
}
