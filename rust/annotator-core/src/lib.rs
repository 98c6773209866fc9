//! AnnotatorCore: Span Segmentation + Annotation Equivalence
//!
//! A Rust/WASM implementation of the annotation tool's text engine.
//!
//! # Architecture
//!
//! ## Segmentation
//! - `segment/resolver.rs` - Which span annotations cover a code unit, with boundary flags
//! - `segment/partition.rs` - Folds text + spans + highlights into maximal render segments
//! - `text.rs` - TextBuffer: UTF-16 code unit view (offsets are persisted by the browser)
//!
//! ## Equivalence
//! - `equivalence/record.rs` - AnnotationRecord: raw object + decoded `Shape`s (NER, zone, text, relation)
//! - `equivalence/predicates.rs` - Per-shape equality + prediction/annotation dispatcher
//! - `equivalence/reconcile.rs` - Accepted-prediction lookup, span list merging, relation dedupe
//!
//! ## Authoring helpers
//! - `overlap.rs` - Sort-by-start and collision checks for new spans
//! - `palette.rs` - Default task colors
//!
//! ## Boundary
//! - `wasm.rs` - AnnotationEngine: camelCase methods over loose JS values
//! - `logger.rs` - `log` facade to the browser console, `setLogLevel`
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { AnnotationEngine, setLogLevel } from 'annotator-core';
//!
//! await init();
//! setLogLevel('debug'); // default 'warn'
//! const engine = new AnnotationEngine();
//!
//! const spans = engine.reconcileSpans(annotations, predictions);
//! const segments = engine.partition(text, spans, highlights);
//! // [{ value: "Foo", isHighlight: true, charAnnotations: [], start: 0, end: 3 }, ...]
//!
//! if (engine.findEquivalentAnnotation(annotations, prediction) === undefined) {
//!   // show the "validate prediction" affordance
//! }
//! ```

pub mod config;
pub mod decode;
pub mod equivalence;
pub mod error;
pub mod logger;
pub mod overlap;
pub mod palette;
pub mod segment;
pub mod text;
pub mod wasm;

// Public exports
pub use config::*;
pub use equivalence::*;
pub use error::{EngineError, Result};
pub use logger::{init_logging, set_log_level};
pub use overlap::*;
pub use palette::*;
pub use segment::*;
pub use text::*;
pub use wasm::AnnotationEngine;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook and console logger
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init_logging();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("annotator-core v{}", env!("CARGO_PKG_VERSION"))
}
