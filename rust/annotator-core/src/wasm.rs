//! AnnotationEngine: the browser-facing entry point
//!
//! One `#[wasm_bindgen]` struct holding the engine config, with a camelCase
//! method per core operation. Inputs arrive as loose `JsValue`s and are
//! decoded leniently; a conversion failure is reported on the console and
//! degrades to an empty result or `false`, never to an exception.

use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::config::EngineConfig;
use crate::decode::{decode_highlights, decode_records, decode_records_positional, decode_spans};
use crate::equivalence::{
    dedupe_relations, find_equivalent_annotation, is_classification_annotation_equivalent,
    is_entities_relation_equivalent, is_ner_annotation_equivalent, is_prediction_equivalent_to_annotation,
    is_zone_annotation_equivalent, prediction_status, reconcile_spans, AnnotationRecord, PredictionStatus,
    RelationRecord,
};
use crate::overlap::{find_overlapping_with, sort_and_filter_by_start};
use crate::palette::{assign_colors, Task};
use crate::segment::{partition_buffer_with, resolve_covering_annotations};
use crate::text::TextBuffer;

// =============================================================================
// Conversion helpers
// =============================================================================

fn console_error(context: &str, message: &str) {
    web_sys::console::error_1(&format!("[AnnotationEngine] {}: {}", context, message).into());
}

/// `JsValue` → JSON. `undefined`/`null` become `Value::Null`.
fn from_js(value: JsValue, context: &str) -> Value {
    serde_wasm_bindgen::from_value(value).unwrap_or_else(|e| {
        console_error(context, &format!("failed to read input: {}", e));
        Value::Null
    })
}

/// Plain JS objects out, not `Map`s
fn to_js<T: Serialize + ?Sized>(value: &T, context: &str) -> JsValue {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    match value.serialize(&serializer) {
        Ok(v) => v,
        Err(e) => {
            console_error(context, &format!("serialization failed: {}", e));
            JsValue::NULL
        }
    }
}

fn record(value: JsValue, context: &str) -> Option<AnnotationRecord> {
    AnnotationRecord::from_value(&from_js(value, context)).ok()
}

fn relation(value: JsValue, context: &str) -> Option<RelationRecord> {
    RelationRecord::from_value(&from_js(value, context)).ok()
}

fn both<T>(a: Option<T>, b: Option<T>, predicate: impl Fn(&T, &T) -> bool) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => predicate(&a, &b),
        _ => false,
    }
}

// =============================================================================
// AnnotationEngine
// =============================================================================

#[wasm_bindgen]
pub struct AnnotationEngine {
    config: EngineConfig,
}

impl Default for AnnotationEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl AnnotationEngine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Engine with a project config; a malformed config is a caller bug and throws.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<AnnotationEngine, JsValue> {
        let value: Value = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Failed to read config: {}", e)))?;
        let config = EngineConfig::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { config })
    }

    /// Current config as a plain object
    #[wasm_bindgen(getter)]
    pub fn config(&self) -> JsValue {
        to_js(&self.config, "config")
    }

    // ========================================================================
    // Segmentation
    // ========================================================================

    /// Segments for `text`. Code units are copied straight out of the JS
    /// string so offsets match the caller's exactly.
    #[wasm_bindgen(js_name = partition)]
    pub fn partition(&self, text: &js_sys::JsString, annotations: JsValue, highlights: JsValue) -> JsValue {
        let buffer = TextBuffer::from_units(text.iter().collect());
        let spans = decode_spans(&from_js(annotations, "partition"));
        let highlights = decode_highlights(&from_js(highlights, "partition"));
        to_js(&partition_buffer_with(&self.config, &buffer, &spans, &highlights), "partition")
    }

    #[wasm_bindgen(js_name = resolveCoveringAnnotations)]
    pub fn resolve_covering_annotations(&self, char_index: usize, annotations: JsValue) -> JsValue {
        let spans = decode_spans(&from_js(annotations, "resolveCoveringAnnotations"));
        to_js(&resolve_covering_annotations(char_index, &spans), "resolveCoveringAnnotations")
    }

    // ========================================================================
    // Overlap / ordering
    // ========================================================================

    #[wasm_bindgen(js_name = findOverlapping)]
    pub fn find_overlapping(&self, annotations: JsValue, start: usize, end: usize) -> JsValue {
        let records = decode_records(&from_js(annotations, "findOverlapping"));
        to_js(
            &find_overlapping_with(self.config.overlap, &records, start, end),
            "findOverlapping",
        )
    }

    #[wasm_bindgen(js_name = sortAndFilterByStart)]
    pub fn sort_and_filter_by_start(&self, annotations: JsValue) -> JsValue {
        let records = decode_records(&from_js(annotations, "sortAndFilterByStart"));
        to_js(&sort_and_filter_by_start(&records), "sortAndFilterByStart")
    }

    // ========================================================================
    // Equivalence
    // ========================================================================

    #[wasm_bindgen(js_name = isNerAnnotationEquivalent)]
    pub fn is_ner_annotation_equivalent(&self, a: JsValue, b: JsValue) -> bool {
        let ctx = "isNerAnnotationEquivalent";
        both(record(a, ctx), record(b, ctx), is_ner_annotation_equivalent)
    }

    #[wasm_bindgen(js_name = isZoneAnnotationEquivalent)]
    pub fn is_zone_annotation_equivalent(&self, a: JsValue, b: JsValue) -> bool {
        let ctx = "isZoneAnnotationEquivalent";
        both(record(a, ctx), record(b, ctx), is_zone_annotation_equivalent)
    }

    #[wasm_bindgen(js_name = isClassificationAnnotationEquivalent)]
    pub fn is_classification_annotation_equivalent(&self, a: JsValue, b: JsValue) -> bool {
        let ctx = "isClassificationAnnotationEquivalent";
        both(record(a, ctx), record(b, ctx), is_classification_annotation_equivalent)
    }

    #[wasm_bindgen(js_name = isPredictionEquivalentToAnnotation)]
    pub fn is_prediction_equivalent_to_annotation(&self, a: JsValue, b: JsValue) -> bool {
        let ctx = "isPredictionEquivalentToAnnotation";
        both(record(a, ctx), record(b, ctx), is_prediction_equivalent_to_annotation)
    }

    #[wasm_bindgen(js_name = isEntitiesRelationEquivalent)]
    pub fn is_entities_relation_equivalent(&self, a: JsValue, b: JsValue) -> bool {
        let ctx = "isEntitiesRelationEquivalent";
        both(relation(a, ctx), relation(b, ctx), is_entities_relation_equivalent)
    }

    // ========================================================================
    // Reconciliation
    // ========================================================================

    /// Display index of the annotation matching `prediction`, or `undefined`
    #[wasm_bindgen(js_name = findEquivalentAnnotation)]
    pub fn find_equivalent_annotation(&self, annotations: JsValue, prediction: JsValue) -> Option<usize> {
        let ctx = "findEquivalentAnnotation";
        let prediction = record(prediction, ctx)?;
        let annotations = decode_records_positional(&from_js(annotations, ctx));
        find_equivalent_annotation(&annotations, &prediction)
    }

    #[wasm_bindgen(js_name = predictionStatus)]
    pub fn prediction_status(&self, annotations: JsValue, prediction: JsValue) -> JsValue {
        let ctx = "predictionStatus";
        let annotations = decode_records_positional(&from_js(annotations, ctx));
        let status = match record(prediction, ctx) {
            Some(prediction) => prediction_status(&annotations, &prediction),
            None => PredictionStatus::Pending,
        };
        to_js(&status, ctx)
    }

    #[wasm_bindgen(js_name = reconcileSpans)]
    pub fn reconcile_spans(&self, annotations: JsValue, predictions: JsValue) -> JsValue {
        let ctx = "reconcileSpans";
        let annotations = decode_records_positional(&from_js(annotations, ctx));
        let predictions = decode_records_positional(&from_js(predictions, ctx));
        to_js(&reconcile_spans(&annotations, &predictions), ctx)
    }

    #[wasm_bindgen(js_name = dedupeRelations)]
    pub fn dedupe_relations(&self, relations: JsValue) -> JsValue {
        let ctx = "dedupeRelations";
        let relations: Vec<RelationRecord> = match from_js(relations, ctx) {
            Value::Array(items) => items.iter().filter_map(|v| RelationRecord::from_value(v).ok()).collect(),
            _ => Vec::new(),
        };
        to_js(&dedupe_relations(&relations), ctx)
    }

    // ========================================================================
    // Palette
    // ========================================================================

    /// Tasks with default colors filled in from the configured palette
    #[wasm_bindgen(js_name = assignColors)]
    pub fn assign_colors(&self, tasks: JsValue) -> JsValue {
        let ctx = "assignColors";
        let tasks: Vec<Task> = match serde_json::from_value(from_js(tasks, ctx)) {
            Ok(tasks) => tasks,
            Err(e) => {
                console_error(ctx, &format!("failed to read tasks: {}", e));
                Vec::new()
            }
        };
        to_js(&assign_colors(&tasks, &self.config.palette), ctx)
    }
}
