//! Reconciliation of human annotations with model predictions
//!
//! Built on the dispatcher: a prediction is "accepted" when some annotation
//! is equivalent to it, and the span list handed to the partitioner merges
//! the two lists so an accepted prediction renders once, carrying both
//! indices.

use serde::{Deserialize, Serialize};

use crate::equivalence::predicates::{is_entities_relation_equivalent, is_prediction_equivalent_to_annotation};
use crate::equivalence::record::{AnnotationRecord, NerRecord, RelationRecord};
use crate::segment::SpanAnnotation;

// =============================================================================
// Types
// =============================================================================

/// Whether a prediction still needs the annotator's validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PredictionStatus {
    /// Already present among the annotations, at this display index
    #[serde(rename_all = "camelCase")]
    Accepted { annotation_index: usize },
    /// Not yet annotated
    Pending,
}

impl PredictionStatus {
    pub fn is_accepted(&self) -> bool {
        matches!(self, PredictionStatus::Accepted { .. })
    }
}

// =============================================================================
// Lookup
// =============================================================================

/// Display index of the first annotation equivalent to `prediction`.
pub fn find_equivalent_annotation(annotations: &[AnnotationRecord], prediction: &AnnotationRecord) -> Option<usize> {
    annotations
        .iter()
        .position(|a| is_prediction_equivalent_to_annotation(prediction, a))
}

pub fn prediction_status(annotations: &[AnnotationRecord], prediction: &AnnotationRecord) -> PredictionStatus {
    match find_equivalent_annotation(annotations, prediction) {
        Some(annotation_index) => PredictionStatus::Accepted { annotation_index },
        None => PredictionStatus::Pending,
    }
}

// =============================================================================
// Span reconciliation
// =============================================================================

fn to_span(record: &NerRecord) -> SpanAnnotation {
    SpanAnnotation::new(record.value.clone().unwrap_or_default(), record.start(), record.end())
}

/// Merge NER annotations and predictions into the partitioner's span list.
///
/// Annotations come first, in order, each with its `annotation_index`. A
/// prediction equivalent to an annotation adds its `prediction_index` to that
/// annotation's span (the first one it matches that has no prediction yet);
/// the rest follow as prediction-only spans. Non-NER records are skipped but
/// still count for indexing.
pub fn reconcile_spans(annotations: &[AnnotationRecord], predictions: &[AnnotationRecord]) -> Vec<SpanAnnotation> {
    let mut spans: Vec<(usize, SpanAnnotation)> = annotations
        .iter()
        .enumerate()
        .filter_map(|(i, a)| a.as_ner().map(|r| (i, to_span(r).with_annotation_index(i))))
        .collect();

    let mut unmatched = Vec::new();
    for (j, prediction) in predictions.iter().enumerate() {
        let Some(ner) = prediction.as_ner() else {
            continue;
        };
        let slot = spans.iter_mut().find(|(i, span)| {
            span.prediction_index.is_none() && is_prediction_equivalent_to_annotation(prediction, &annotations[*i])
        });
        match slot {
            Some((_, span)) => span.prediction_index = Some(j),
            None => unmatched.push(to_span(ner).with_prediction_index(j)),
        }
    }

    log::debug!(
        "[Reconcile] {} annotation spans, {} accepted predictions, {} pending",
        spans.len(),
        spans.iter().filter(|(_, s)| s.prediction_index.is_some()).count(),
        unmatched.len()
    );

    spans.into_iter().map(|(_, s)| s).chain(unmatched).collect()
}

// =============================================================================
// Relations
// =============================================================================

/// Would adding `candidate` duplicate an existing edge?
pub fn contains_equivalent_relation(existing: &[RelationRecord], candidate: &RelationRecord) -> bool {
    existing.iter().any(|r| is_entities_relation_equivalent(candidate, r))
}

/// Drop later duplicates. Unlabeled relations are never equivalent, so all of
/// them are kept.
pub fn dedupe_relations(relations: &[RelationRecord]) -> Vec<RelationRecord> {
    relations.iter().fold(Vec::new(), |mut kept, r| {
        if !contains_equivalent_relation(&kept, r) {
            kept.push(r.clone());
        }
        kept
    })
}

// =============================================================================
// Tests
// =============================================================================
