//! Structural equivalence predicates, one per annotation shape
//!
//! Each shape predicate answers `false` unless both sides carry that shape,
//! well-formed; other keys on either record are ignored. The
//! dispatcher tries the shapes in a fixed order (NER, classification,
//! free-text, zone) and accepts the first match, which is how a model
//! prediction is matched against a human annotation without knowing the task
//! type up front.

use crate::equivalence::record::{AnnotationRecord, NerRecord, Point, RelationRecord, ZoneRecord};

// =============================================================================
// Shape predicates
// =============================================================================

/// Same span offsets, exactly. Labels are not compared.
pub fn is_ner_annotation_equivalent(a: &AnnotationRecord, b: &AnnotationRecord) -> bool {
    match (a.as_ner(), b.as_ner()) {
        (Some(a), Some(b)) => ner_equivalent(a, b),
        _ => false,
    }
}

/// Span equality on already-typed NER records
#[inline]
pub fn ner_equivalent(a: &NerRecord, b: &NerRecord) -> bool {
    a.ner.start == b.ner.start && a.ner.end == b.ner.end
}

/// Same polygon, compared vertex by vertex in order.
///
/// The same point set listed from another starting vertex or in the opposite
/// winding is a different zone.
pub fn is_zone_annotation_equivalent(a: &AnnotationRecord, b: &AnnotationRecord) -> bool {
    match (a.as_zone(), b.as_zone()) {
        (Some(a), Some(b)) => zone_equivalent(a, b),
        _ => false,
    }
}

pub fn zone_equivalent(a: &ZoneRecord, b: &ZoneRecord) -> bool {
    a.zone.len() == b.zone.len()
        && a.zone.iter().all(point_is_finite)
        && b.zone.iter().all(point_is_finite)
        && a.zone.iter().zip(&b.zone).all(|(p, q)| p.x == q.x && p.y == q.y)
}

fn point_is_finite(p: &Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// Deep equality over the whole record, every field included.
///
/// Numbers compare by value, so `1` and `1.0` are equal as in JS. Object key
/// sets must match exactly: an explicit `null` is not the same as absent.
pub fn is_classification_annotation_equivalent(a: &AnnotationRecord, b: &AnnotationRecord) -> bool {
    a == b
}

/// Same free-text answer
fn is_text_annotation_equivalent(a: &AnnotationRecord, b: &AnnotationRecord) -> bool {
    match (a.as_text(), b.as_text()) {
        (Some(a), Some(b)) => a.text == b.text,
        _ => false,
    }
}

// =============================================================================
// Dispatcher
// =============================================================================

/// Does a prediction match an annotation, whatever the task type?
pub fn is_prediction_equivalent_to_annotation(a: &AnnotationRecord, b: &AnnotationRecord) -> bool {
    is_ner_annotation_equivalent(a, b)
        || is_classification_annotation_equivalent(a, b)
        || is_text_annotation_equivalent(a, b)
        || is_zone_annotation_equivalent(a, b)
}

// =============================================================================
// Relations
// =============================================================================

/// Same endpoints and the same, non-empty, label.
///
/// An unlabeled relation never matches anything, not even a copy of itself:
/// without a label there is nothing to deduplicate on.
pub fn is_entities_relation_equivalent(a: &RelationRecord, b: &RelationRecord) -> bool {
    let label = match a.value.as_deref() {
        Some(v) if !v.is_empty() => v,
        _ => return false,
    };
    b.value.as_deref() == Some(label) && ner_equivalent(&a.src, &b.src) && ner_equivalent(&a.dest, &b.dest)
}

// =============================================================================
// Tests
// =============================================================================
