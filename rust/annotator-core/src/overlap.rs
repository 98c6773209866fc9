//! Overlap and ordering checks for span records
//!
//! Run by the authoring flow: `find_overlapping` before a new span is
//! committed, `sort_and_filter_by_start` before the list is persisted.

use crate::config::OverlapPolicy;
use crate::equivalence::{AnnotationRecord, NerRecord};

/// NER records only, ascending by `start`. Ties keep input order.
pub fn sort_and_filter_by_start(records: &[AnnotationRecord]) -> Vec<NerRecord> {
    let mut spans: Vec<NerRecord> = records.iter().filter_map(AnnotationRecord::as_ner).cloned().collect();
    // `sort_by_key` is stable
    spans.sort_by_key(NerRecord::start);
    spans
}

/// Every NER record colliding with the candidate `[start, end)`, touching
/// included: `[0,5)` blocks `[5,10)`.
pub fn find_overlapping(records: &[AnnotationRecord], start: usize, end: usize) -> Vec<NerRecord> {
    find_overlapping_with(OverlapPolicy::Inclusive, records, start, end)
}

/// `find_overlapping` under an explicit policy.
///
/// A degenerate candidate (`start > end`) collides with nothing.
pub fn find_overlapping_with(
    policy: OverlapPolicy,
    records: &[AnnotationRecord],
    start: usize,
    end: usize,
) -> Vec<NerRecord> {
    if start > end {
        return Vec::new();
    }
    records
        .iter()
        .filter_map(AnnotationRecord::as_ner)
        .filter(|r| policy.collides(r.start(), r.end(), start, end))
        .cloned()
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
