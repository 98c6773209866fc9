//! Browser-side tests for AnnotationEngine
//!
//! Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use annotator_core::AnnotationEngine;
use js_sys::JsString;
use serde::Serialize;
use serde_json::{json, Value};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn js(value: Value) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap()
}

fn rust(value: JsValue) -> Value {
    serde_wasm_bindgen::from_value(value).unwrap()
}

#[wasm_bindgen_test]
fn test_partition_highlight() {
    let engine = AnnotationEngine::new();
    let segments = rust(engine.partition(
        &JsString::from("Foo Bar"),
        js(json!([])),
        js(json!([{ "start": 0, "end": 3, "text": "Foo" }])),
    ));
    assert_eq!(segments[0]["value"], "Foo");
    assert_eq!(segments[0]["isHighlight"], true);
    assert_eq!(segments[1]["value"], " Bar");
}

#[wasm_bindgen_test]
fn test_partition_undefined_inputs() {
    let engine = AnnotationEngine::new();
    let segments = rust(engine.partition(&JsString::from("abc"), JsValue::UNDEFINED, JsValue::NULL));
    assert_eq!(segments.as_array().unwrap().len(), 1);
}

#[wasm_bindgen_test]
fn test_partition_surrogates_use_js_offsets() {
    let engine = AnnotationEngine::new();
    let segments = rust(engine.partition(
        &JsString::from("a😀b"),
        js(json!([{ "taskValue": "E", "start": 1, "end": 3, "annotationIndex": 0 }])),
        js(json!([])),
    ));
    assert_eq!(segments[1]["value"], "😀");
    assert_eq!(segments[1]["charAnnotations"][0]["isLastMark"], true);
}

#[wasm_bindgen_test]
fn test_find_overlapping_touching() {
    let engine = AnnotationEngine::new();
    let found = rust(engine.find_overlapping(
        js(json!([{ "value": "X", "ner": { "start": 0, "end": 5 } }])),
        5,
        10,
    ));
    assert_eq!(found.as_array().unwrap().len(), 1);
}

#[wasm_bindgen_test]
fn test_equivalence_malformed_is_false() {
    let engine = AnnotationEngine::new();
    assert!(!engine.is_ner_annotation_equivalent(js(json!({ "ner": {} })), js(json!({ "ner": {} }))));
    assert!(!engine.is_prediction_equivalent_to_annotation(JsValue::from(3), JsValue::from(3)));
}

#[wasm_bindgen_test]
fn test_find_equivalent_annotation() {
    let engine = AnnotationEngine::new();
    let annotations = js(json!([
        "broken",
        { "value": "PER", "ner": { "start": 0, "end": 4 } }
    ]));
    let prediction = js(json!({ "value": "PER", "ner": { "start": 0, "end": 4 } }));
    assert_eq!(engine.find_equivalent_annotation(annotations, prediction), Some(1));
}

#[wasm_bindgen_test]
fn test_with_config() {
    let engine = AnnotationEngine::with_config(js(json!({ "overlap": "strict" }))).unwrap();
    let found = rust(engine.find_overlapping(
        js(json!([{ "ner": { "start": 0, "end": 5 } }])),
        5,
        10,
    ));
    assert!(found.as_array().unwrap().is_empty());
    assert!(AnnotationEngine::with_config(js(json!({ "overlap": 3 }))).is_err());
}

#[wasm_bindgen_test]
fn test_assign_colors() {
    let engine = AnnotationEngine::with_config(js(json!({ "palette": ["red"] }))).unwrap();
    let tasks = rust(engine.assign_colors(js(json!([{ "value": "A" }, { "value": "B", "color": "blue" }]))));
    assert_eq!(tasks[0]["color"], "red");
    assert_eq!(tasks[1]["color"], "blue");
}

#[wasm_bindgen_test]
fn test_logger_installed() {
    annotator_core::init_logging();
    assert_eq!(log::max_level(), log::LevelFilter::Warn);
    // Goes to console.warn
    log::warn!("[Decode] dropped 1 malformed spans of 2");

    assert!(annotator_core::set_log_level("debug"));
    assert_eq!(log::max_level(), log::LevelFilter::Debug);
    assert!(!annotator_core::set_log_level("chatty"));
    assert_eq!(log::max_level(), log::LevelFilter::Debug);
    annotator_core::set_log_level("warn");
}

#[wasm_bindgen_test]
fn test_equivalence_shared_shape() {
    let engine = AnnotationEngine::new();
    assert!(engine.is_prediction_equivalent_to_annotation(
        js(json!({ "value": "X", "ner": { "start": 0, "end": 3 }, "text": "foo" })),
        js(json!({ "text": "foo" })),
    ));
    assert!(engine.is_zone_annotation_equivalent(
        js(json!({ "ner": { "start": 0, "end": 3 }, "zone": [{ "x": 0.1, "y": 0.2 }] })),
        js(json!({ "zone": [{ "x": 0.1, "y": 0.2 }] })),
    ));
}
