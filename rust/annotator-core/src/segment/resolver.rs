//! Span resolution: which annotations cover a given code unit

use crate::segment::types::{CharAnnotationRef, SpanAnnotation};

/// Every annotation covering `char_index`, in input order.
///
/// Input order is kept so label/z-order stays stable across re-renders.
/// Degenerate spans never match.
pub fn resolve_covering_annotations(
    char_index: usize,
    annotations: &[SpanAnnotation],
) -> Vec<CharAnnotationRef> {
    annotations
        .iter()
        .filter(|a| a.contains(char_index))
        .map(|a| CharAnnotationRef {
            task_value: a.task_value.clone(),
            annotation_index: a.annotation_index,
            prediction_index: a.prediction_index,
            is_first_mark: a.start == char_index,
            is_last_mark: a.end - 1 == char_index,
            start: a.start,
            end: a.end,
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
