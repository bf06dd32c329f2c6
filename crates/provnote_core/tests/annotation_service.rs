use chrono::NaiveDate;
use provnote_core::{
    parse, AnnotationService, ContentBlockType, EditorError, FixedClock, Formatter,
    InsertCapability, MarkupConfig, MetadataKey, NoteBuffer,
};

fn service(buffer: &mut NoteBuffer) -> AnnotationService<&mut NoteBuffer, FixedClock> {
    let instant = NaiveDate::from_ymd_opt(2026, 5, 1)
        .and_then(|date| date.and_hms_opt(8, 0, 0))
        .expect("valid fixed instant");
    AnnotationService::with_formatter(
        buffer,
        Formatter::with_clock(FixedClock(instant), MarkupConfig::default()),
    )
}

#[test]
fn inserted_blocks_parse_back_with_provenance() {
    let mut buffer = NoteBuffer::new("Reading notes");
    {
        let mut annotations = service(&mut buffer);
        annotations
            .add_source_quote("It was the best of times", "A Tale of Two Cities")
            .expect("source insert");
        annotations
            .add_ai_response("The line sets up contrast.", "model-a")
            .expect("ai insert");
        annotations
            .add_user_note("Compare with chapter 2")
            .expect("user insert");
    }

    let blocks = parse(buffer.content());
    let kinds: Vec<_> = blocks.iter().map(|block| block.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ContentBlockType::Default,
            ContentBlockType::Source,
            ContentBlockType::Ai,
            ContentBlockType::User,
        ]
    );
    assert_eq!(
        blocks[1].metadata.get(MetadataKey::Title),
        Some("A Tale of Two Cities")
    );
    assert_eq!(blocks[2].metadata.get(MetadataKey::Model), Some("model-a"));
    assert_eq!(blocks[3].body, vec!["Compare with chapter 2"]);
}

#[test]
fn insertion_happens_at_cursor() {
    let mut buffer = NoteBuffer::new("top\nbottom");
    buffer.set_cursor(3).expect("cursor after `top`");
    {
        let mut annotations = service(&mut buffer);
        annotations.add_user_note("middle").expect("user insert");
    }

    let blocks = parse(buffer.content());
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0].body, vec!["top"]);
    assert_eq!(blocks[1].kind, ContentBlockType::User);
    assert_eq!(blocks[2].body, vec!["bottom"]);
}

#[test]
fn image_insert_returns_generated_id() {
    let mut buffer = NoteBuffer::default();
    let inserted = service(&mut buffer)
        .add_image("figure \"3\".png")
        .expect("image insert");

    let blocks = parse(buffer.content());
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].image_id.as_deref(), Some(inserted.image_id.as_str()));
    assert_eq!(blocks[0].image_filename.as_deref(), Some("figure 3.png"));
    assert_eq!(inserted.end_offset, buffer.content().chars().count());
}

#[test]
fn empty_body_is_rejected_without_touching_buffer() {
    let mut buffer = NoteBuffer::new("unchanged");
    let err = service(&mut buffer)
        .add_source_quote("   \n", "t")
        .expect_err("blank body must fail");
    assert_eq!(err, EditorError::EmptyBody);
    assert_eq!(buffer.content(), "unchanged");
}

struct RecordingEditor {
    inserts: Vec<String>,
}

impl InsertCapability for RecordingEditor {
    fn insert(&mut self, text: &str, _at: provnote_core::InsertAt) -> Result<usize, EditorError> {
        self.inserts.push(text.to_string());
        Ok(text.chars().count())
    }
}

#[test]
fn any_editor_capability_can_receive_blocks() {
    let mut annotations = AnnotationService::new(RecordingEditor {
        inserts: Vec::new(),
    });
    annotations.add_plain("legacy", "log").expect("plain insert");
    let editor = annotations.into_editor();
    assert_eq!(editor.inserts.len(), 1);
    assert!(editor.inserts[0].starts_with("\n\nLOG\n"));
}
