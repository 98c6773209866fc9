//! Core data structures for span segmentation
//!
//! Field names serialize in camelCase because these records cross into the
//! browser as-is (`taskValue`, `annotationIndex`, `isFirstMark`, ...).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::decode::{as_index, as_offset};

// =============================================================================
// Inputs
// =============================================================================

/// A span annotation over `[start, end)` in UTF-16 code units.
///
/// `annotation_index` points into the authoritative annotation list,
/// `prediction_index` into the prediction list. An accepted prediction
/// carries both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanAnnotation {
    pub task_value: String,
    pub start: usize,
    pub end: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction_index: Option<usize>,
}

impl SpanAnnotation {
    pub fn new(task_value: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            task_value: task_value.into(),
            start,
            end,
            annotation_index: None,
            prediction_index: None,
        }
    }

    pub fn with_annotation_index(mut self, index: usize) -> Self {
        self.annotation_index = Some(index);
        self
    }

    pub fn with_prediction_index(mut self, index: usize) -> Self {
        self.prediction_index = Some(index);
        self
    }

    /// Degenerate spans (`start >= end`) never cover anything.
    pub fn is_degenerate(&self) -> bool {
        self.start >= self.end
    }

    /// Half-open containment test
    #[inline]
    pub fn contains(&self, char_index: usize) -> bool {
        self.start <= char_index && char_index < self.end
    }

    /// Lenient decode from a loose JSON object.
    ///
    /// Returns `None` when `taskValue` is not a string or an offset is not a
    /// non-negative integer. Index fields that are present but malformed are
    /// dropped rather than failing the whole span.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let task_value = obj.get("taskValue")?.as_str()?.to_string();
        let start = as_offset(obj.get("start")?)?;
        let end = as_offset(obj.get("end")?)?;
        Some(Self {
            task_value,
            start,
            end,
            annotation_index: obj.get("annotationIndex").and_then(as_index),
            prediction_index: obj.get("predictionIndex").and_then(as_index),
        })
    }
}

/// Lexical highlight over `[start, end)`. Advisory only: it never takes part
/// in annotation identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Highlight {
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            score: None,
        }
    }

    #[inline]
    pub fn contains(&self, char_index: usize) -> bool {
        self.start <= char_index && char_index < self.end
    }

    /// Lenient decode. A score outside `[0, 1]` or non-numeric is dropped.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let start = as_offset(obj.get("start")?)?;
        let end = as_offset(obj.get("end")?)?;
        let text = obj
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let score = obj
            .get("score")
            .and_then(Value::as_f64)
            .filter(|s| (0.0..=1.0).contains(s));
        Some(Self {
            start,
            end,
            text,
            score,
        })
    }
}

// =============================================================================
// Outputs
// =============================================================================

/// One annotation covering a character, with boundary flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharAnnotationRef {
    pub task_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction_index: Option<usize>,
    pub is_first_mark: bool,
    pub is_last_mark: bool,
    pub start: usize,
    pub end: usize,
}

/// Identity of a covering annotation with the boundary flags stripped.
pub type CoverKey<'a> = (&'a str, Option<usize>, Option<usize>);

impl CharAnnotationRef {
    pub fn key(&self) -> CoverKey<'_> {
        (
            self.task_value.as_str(),
            self.annotation_index,
            self.prediction_index,
        )
    }
}

/// A maximal run of characters with one covering set and one highlight state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub value: String,
    pub is_highlight: bool,
    pub char_annotations: Vec<CharAnnotationRef>,
    /// First code unit of the segment
    pub start: usize,
    /// One past the last code unit of the segment
    pub end: usize,
}

impl Segment {
    /// Length in UTF-16 code units
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True when no annotation covers this segment
    pub fn is_bare(&self) -> bool {
        self.char_annotations.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
