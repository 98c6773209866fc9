//! Segment Partitioner: text + spans + highlights → render-ready segments
//!
//! One left-to-right pass over the UTF-16 code units. Each unit gets its
//! covering set (via the resolver) and its highlight membership; consecutive
//! units with the same covering set (boundary flags ignored) and the same
//! highlight membership are folded into one run. Closed runs become segments.
//!
//! Within a run:
//! - `is_first_mark` comes from the run's first unit
//! - `is_last_mark` is OR-accumulated per task value, since an annotation's
//!   last unit need not be the run's last unit once runs merge
//! - `is_highlight` is OR-accumulated
//!
//! Cost is O(L × A): text length times concurrently active annotations.

use crate::config::EngineConfig;
use crate::segment::resolver::resolve_covering_annotations;
use crate::segment::types::{CharAnnotationRef, CoverKey, Highlight, Segment, SpanAnnotation};
use crate::text::TextBuffer;

// =============================================================================
// Public API
// =============================================================================

/// Partition `text` into maximal segments. Empty text yields no segments.
pub fn partition(text: &str, annotations: &[SpanAnnotation], highlights: &[Highlight]) -> Vec<Segment> {
    partition_buffer(&TextBuffer::new(text), annotations, highlights)
}

/// Partition an already-encoded buffer.
pub fn partition_buffer(
    buffer: &TextBuffer,
    annotations: &[SpanAnnotation],
    highlights: &[Highlight],
) -> Vec<Segment> {
    let segments = (0..buffer.len())
        .fold(Accumulator::default(), |acc, i| {
            let refs = resolve_covering_annotations(i, annotations);
            let highlighted = highlights.iter().any(|h| h.contains(i));
            acc.push(i, refs, highlighted, buffer)
        })
        .finish(buffer);

    log::trace!(
        "[Partitioner] {} units, {} spans, {} highlights -> {} segments",
        buffer.len(),
        annotations.len(),
        highlights.len(),
        segments.len()
    );
    segments
}

/// Partition honoring the engine's text length guard.
///
/// A text over `max_text_len` comes back as one bare segment so the UI can
/// still render it.
pub fn partition_with(
    config: &EngineConfig,
    text: &str,
    annotations: &[SpanAnnotation],
    highlights: &[Highlight],
) -> Vec<Segment> {
    partition_buffer_with(config, &TextBuffer::new(text), annotations, highlights)
}

/// `partition_with` over an already-encoded buffer.
pub fn partition_buffer_with(
    config: &EngineConfig,
    buffer: &TextBuffer,
    annotations: &[SpanAnnotation],
    highlights: &[Highlight],
) -> Vec<Segment> {
    match config.max_text_len {
        Some(max) if buffer.len() > max => {
            log::warn!(
                "[Partitioner] text of {} units exceeds limit {}, skipping segmentation",
                buffer.len(),
                max
            );
            vec![Segment {
                value: buffer.to_string_lossy(),
                is_highlight: false,
                char_annotations: Vec::new(),
                start: 0,
                end: buffer.len(),
            }]
        }
        _ => partition_buffer(buffer, annotations, highlights),
    }
}

// =============================================================================
// Fold state
// =============================================================================

/// The run being built
#[derive(Debug)]
struct Run {
    start: usize,
    end: usize,
    refs: Vec<CharAnnotationRef>,
    is_highlight: bool,
}

impl Run {
    fn open(index: usize, refs: Vec<CharAnnotationRef>, highlighted: bool) -> Self {
        Self {
            start: index,
            end: index + 1,
            refs,
            is_highlight: highlighted,
        }
    }

    /// A unit continues the run only if nothing visible changes
    fn accepts(&self, refs: &[CharAnnotationRef], highlighted: bool) -> bool {
        self.is_highlight == highlighted && same_cover(&self.refs, refs)
    }

    fn extend(mut self, refs: &[CharAnnotationRef], highlighted: bool) -> Self {
        for r in self.refs.iter_mut() {
            if refs.iter().any(|n| n.is_last_mark && n.task_value == r.task_value) {
                r.is_last_mark = true;
            }
        }
        self.is_highlight |= highlighted;
        self.end += 1;
        self
    }

    fn close(self, buffer: &TextBuffer) -> Segment {
        Segment {
            value: buffer.slice(self.start, self.end),
            is_highlight: self.is_highlight,
            char_annotations: self.refs,
            start: self.start,
            end: self.end,
        }
    }
}

#[derive(Debug, Default)]
struct Accumulator {
    segments: Vec<Segment>,
    run: Option<Run>,
}

impl Accumulator {
    fn push(
        mut self,
        index: usize,
        refs: Vec<CharAnnotationRef>,
        highlighted: bool,
        buffer: &TextBuffer,
    ) -> Self {
        self.run = Some(match self.run.take() {
            Some(run) if run.accepts(&refs, highlighted) => run.extend(&refs, highlighted),
            Some(run) => {
                self.segments.push(run.close(buffer));
                Run::open(index, refs, highlighted)
            }
            None => Run::open(index, refs, highlighted),
        });
        self
    }

    fn finish(mut self, buffer: &TextBuffer) -> Vec<Segment> {
        if let Some(run) = self.run.take() {
            self.segments.push(run.close(buffer));
        }
        self.segments
    }
}

/// Multiset equality over `(task_value, annotation_index, prediction_index)`.
fn same_cover(a: &[CharAnnotationRef], b: &[CharAnnotationRef]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut ka: Vec<CoverKey<'_>> = a.iter().map(CharAnnotationRef::key).collect();
    let mut kb: Vec<CoverKey<'_>> = b.iter().map(CharAnnotationRef::key).collect();
    ka.sort_unstable();
    kb.sort_unstable();
    ka == kb
}

// =============================================================================
// Tests
// =============================================================================
