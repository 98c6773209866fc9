//! Lenient list decoding at the JSON boundary
//!
//! The UI hands over whatever the store holds. Malformed entries are dropped
//! (and counted in the log) so one bad record never blanks the whole view.

use serde_json::Value;

use crate::equivalence::AnnotationRecord;
use crate::segment::{Highlight, SpanAnnotation};

/// Largest integer a JS number represents exactly (2^53 - 1)
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A UTF-16 offset: non-negative integer. Integral floats (`3.0`) are
/// accepted because JS has no integer type.
pub fn as_offset(value: &Value) -> Option<usize> {
    if let Some(n) = value.as_u64() {
        return usize::try_from(n).ok();
    }
    let f = value.as_f64()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= MAX_SAFE_INTEGER {
        Some(f as usize)
    } else {
        None
    }
}

/// List positions follow the same rules as offsets.
pub fn as_index(value: &Value) -> Option<usize> {
    as_offset(value)
}

/// Decode a span list, dropping malformed entries. Non-arrays decode to empty.
pub fn decode_spans(value: &Value) -> Vec<SpanAnnotation> {
    decode_list(value, "spans", SpanAnnotation::from_value)
}

/// Decode a highlight list, dropping malformed entries.
pub fn decode_highlights(value: &Value) -> Vec<Highlight> {
    decode_list(value, "highlights", Highlight::from_value)
}

/// Decode annotation records. Only non-objects are dropped: any object is at
/// least a classification record.
///
/// Dropping shifts positions; callers that need display indices use
/// `decode_records_positional`.
pub fn decode_records(value: &Value) -> Vec<AnnotationRecord> {
    decode_list(value, "records", |v| AnnotationRecord::from_value(v).ok())
}

/// Decode annotation records keeping every position, so indices into the
/// result are the caller's display indices. A non-object entry becomes an
/// empty classification record that only matches another empty object.
pub fn decode_records_positional(value: &Value) -> Vec<AnnotationRecord> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .map(|v| {
            AnnotationRecord::from_value(v).unwrap_or_else(|e| {
                log::warn!("[Decode] record kept as placeholder: {}", e);
                AnnotationRecord::default()
            })
        })
        .collect()
}

fn decode_list<T>(value: &Value, what: &str, decode: impl Fn(&Value) -> Option<T>) -> Vec<T> {
    let Some(items) = value.as_array() else {
        if !value.is_null() {
            log::warn!("[Decode] expected an array of {}, ignoring input", what);
        }
        return Vec::new();
    };

    let decoded: Vec<T> = items.iter().filter_map(&decode).collect();
    let dropped = items.len() - decoded.len();
    if dropped > 0 {
        log::warn!("[Decode] dropped {} malformed {} of {}", dropped, what, items.len());
    }
    decoded
}

// =============================================================================
// Tests
// =============================================================================
