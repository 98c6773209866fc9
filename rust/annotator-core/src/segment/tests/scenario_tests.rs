//! Scenario tests for the Segment Partitioner
//!
//! Concrete texts with hand-checked expected segments.

use crate::segment::{partition, Highlight, Segment, SpanAnnotation};

fn values(segments: &[Segment]) -> Vec<&str> {
    segments.iter().map(|s| s.value.as_str()).collect()
}

// ============================================================================
// Highlights
// ============================================================================

#[test]
fn test_highlight_only() {
    let highlights = vec![Highlight::new(0, 3, "Foo")];
    let segments = partition("Foo Bar", &[], &highlights);

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].value, "Foo");
    assert!(segments[0].is_highlight);
    assert!(segments[0].is_bare());
    assert_eq!(segments[1].value, " Bar");
    assert!(!segments[1].is_highlight);
}

#[test]
fn test_highlight_splits_annotation() {
    let spans = vec![SpanAnnotation::new("X", 0, 6)];
    let highlights = vec![Highlight::new(2, 4, "cd")];
    let segments = partition("abcdef", &spans, &highlights);

    assert_eq!(values(&segments), vec!["ab", "cd", "ef"]);
    assert_eq!(
        segments.iter().map(|s| s.is_highlight).collect::<Vec<_>>(),
        vec![false, true, false]
    );

    let flags: Vec<(bool, bool)> = segments
        .iter()
        .map(|s| (s.char_annotations[0].is_first_mark, s.char_annotations[0].is_last_mark))
        .collect();
    assert_eq!(flags, vec![(true, false), (false, false), (false, true)]);
}

#[test]
fn test_overlapping_highlights_collapse() {
    let highlights = vec![Highlight::new(0, 3, "abc"), Highlight::new(2, 5, "cde")];
    let segments = partition("abcdefg", &[], &highlights);
    assert_eq!(values(&segments), vec!["abcde", "fg"]);
    assert!(segments[0].is_highlight);
}

#[test]
fn test_degenerate_highlight_ignored() {
    let highlights = vec![Highlight::new(2, 2, "")];
    let segments = partition("abc", &[], &highlights);
    assert_eq!(segments.len(), 1);
    assert!(!segments[0].is_highlight);
}

// ============================================================================
// Annotations
// ============================================================================

#[test]
fn test_whole_text_annotation() {
    let spans = vec![SpanAnnotation::new("X", 0, 5).with_annotation_index(0)];
    let segments = partition("Hello", &spans, &[]);

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].value, "Hello");
    assert_eq!(segments[0].char_annotations.len(), 1);

    let r = &segments[0].char_annotations[0];
    assert_eq!(r.task_value, "X");
    assert_eq!(r.annotation_index, Some(0));
    assert!(r.is_first_mark);
    assert!(r.is_last_mark);
}

#[test]
fn test_boundary_flags_on_inner_span() {
    let spans = vec![SpanAnnotation::new("X", 3, 7)];
    let segments = partition("abcdefghij", &spans, &[]);

    assert_eq!(values(&segments), vec!["abc", "defg", "hij"]);
    assert!(segments[0].is_bare());
    assert!(segments[2].is_bare());

    let run = &segments[1];
    assert_eq!((run.start, run.end), (3, 7));
    assert!(run.char_annotations[0].is_first_mark);
    assert!(run.char_annotations[0].is_last_mark);
}

#[test]
fn test_overlapping_annotations() {
    let spans = vec![SpanAnnotation::new("A", 0, 4), SpanAnnotation::new("B", 2, 6)];
    let segments = partition("abcdefgh", &spans, &[]);

    assert_eq!(values(&segments), vec!["ab", "cd", "ef", "gh"]);

    let a = &segments[0].char_annotations;
    assert_eq!(a.len(), 1);
    assert!(a[0].is_first_mark && !a[0].is_last_mark);

    let ab = &segments[1].char_annotations;
    assert_eq!(ab.len(), 2);
    assert_eq!(ab[0].task_value, "A");
    assert!(!ab[0].is_first_mark && ab[0].is_last_mark);
    assert_eq!(ab[1].task_value, "B");
    assert!(ab[1].is_first_mark && !ab[1].is_last_mark);

    let b = &segments[2].char_annotations;
    assert_eq!(b.len(), 1);
    assert!(!b[0].is_first_mark && b[0].is_last_mark);

    assert!(segments[3].is_bare());
}

#[test]
fn test_nested_annotation() {
    let spans = vec![SpanAnnotation::new("OUTER", 0, 9), SpanAnnotation::new("INNER", 3, 6)];
    let segments = partition("abcdefghi", &spans, &[]);
    assert_eq!(values(&segments), vec!["abc", "def", "ghi"]);
    assert_eq!(segments[1].char_annotations.len(), 2);
    assert_eq!(segments[1].char_annotations[0].task_value, "OUTER");
}

#[test]
fn test_annotation_and_prediction_are_distinct_cover() {
    let spans = vec![
        SpanAnnotation::new("X", 0, 3).with_annotation_index(0),
        SpanAnnotation::new("X", 3, 6).with_prediction_index(0),
    ];
    let segments = partition("abcdef", &spans, &[]);
    assert_eq!(values(&segments), vec!["abc", "def"]);
    assert_eq!(segments[0].char_annotations[0].annotation_index, Some(0));
    assert_eq!(segments[1].char_annotations[0].prediction_index, Some(0));
}

#[test]
fn test_adjacent_same_identity_spans_merge() {
    // Without indices both spans have the same identity, so the covering set
    // never changes and the two spans render as one run.
    let spans = vec![SpanAnnotation::new("X", 0, 3), SpanAnnotation::new("X", 3, 6)];
    let segments = partition("abcdef", &spans, &[]);

    assert_eq!(segments.len(), 1);
    let r = &segments[0].char_annotations[0];
    assert!(r.is_first_mark);
    assert!(r.is_last_mark);
    assert_eq!((r.start, r.end), (0, 3));
}

#[test]
fn test_accepted_prediction_carries_both_indices() {
    let spans = vec![SpanAnnotation::new("PER", 0, 4)
        .with_annotation_index(2)
        .with_prediction_index(5)];
    let segments = partition("John ran", &spans, &[]);
    let r = &segments[0].char_annotations[0];
    assert_eq!(r.annotation_index, Some(2));
    assert_eq!(r.prediction_index, Some(5));
}

// ============================================================================
// Edge cases
// ============================================================================

#[test]
fn test_empty_text() {
    let spans = vec![SpanAnnotation::new("X", 0, 3)];
    let highlights = vec![Highlight::new(0, 3, "abc")];
    assert!(partition("", &spans, &highlights).is_empty());
}

#[test]
fn test_no_annotations_single_segment() {
    let segments = partition("plain text", &[], &[]);
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].value, "plain text");
    assert!(segments[0].is_bare());
}

#[test]
fn test_degenerate_annotation_ignored() {
    let spans = vec![SpanAnnotation::new("X", 2, 2), SpanAnnotation::new("Y", 4, 1)];
    let segments = partition("abcdef", &spans, &[]);
    assert_eq!(segments.len(), 1);
    assert!(segments[0].is_bare());
}

#[test]
fn test_span_past_end_is_clipped() {
    let spans = vec![SpanAnnotation::new("X", 2, 50)];
    let segments = partition("abcd", &spans, &[]);
    assert_eq!(values(&segments), vec!["ab", "cd"]);
    // The span's real last unit is beyond the text
    assert!(!segments[1].char_annotations[0].is_last_mark);
}

#[test]
fn test_utf16_offsets() {
    // "😀" occupies two UTF-16 units, offsets 1 and 2
    let spans = vec![SpanAnnotation::new("EMOJI", 1, 3)];
    let segments = partition("a😀b", &spans, &[]);
    assert_eq!(values(&segments), vec!["a", "😀", "b"]);
    assert_eq!((segments[1].start, segments[1].end), (1, 3));
    assert_eq!(segments[2].start, 3);
}

#[test]
fn test_bmp_accents_are_single_units() {
    let spans = vec![SpanAnnotation::new("LOC", 4, 8)];
    let segments = partition("Zoë Café", &spans, &[]);
    assert_eq!(values(&segments), vec!["Zoë ", "Café"]);
}

#[test]
fn test_inputs_untouched() {
    let spans = vec![SpanAnnotation::new("X", 0, 3)];
    let highlights = vec![Highlight::new(1, 2, "b")];
    let spans_before = spans.clone();
    let highlights_before = highlights.clone();
    let _ = partition("abcdef", &spans, &highlights);
    assert_eq!(spans, spans_before);
    assert_eq!(highlights, highlights_before);
}
