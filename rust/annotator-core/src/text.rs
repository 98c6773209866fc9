//! TextBuffer: UTF-16 view of an item's text
//!
//! Annotation offsets are persisted by the browser, where strings are indexed
//! in UTF-16 code units. Every offset in this crate lives in that space; the
//! buffer never remaps to bytes, code points or graphemes.

// =============================================================================
// TextBuffer
// =============================================================================

/// Immutable text indexed by UTF-16 code unit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextBuffer {
    units: Vec<u16>,
}

impl TextBuffer {
    pub fn new(text: &str) -> Self {
        Self {
            units: text.encode_utf16().collect(),
        }
    }

    /// Build directly from code units (e.g. a `JsString` copied out of JS).
    pub fn from_units(units: Vec<u16>) -> Self {
        Self { units }
    }

    /// Length in UTF-16 code units
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn units(&self) -> &[u16] {
        &self.units
    }

    /// Decode `[start, end)` back into a `String`.
    ///
    /// Bounds are clamped to the buffer. A range that cuts a surrogate pair in
    /// half decodes the orphaned half as U+FFFD.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.units.len());
        let start = start.min(end);
        String::from_utf16_lossy(&self.units[start..end])
    }

    /// Whole buffer as a `String`.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.units)
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

// =============================================================================
// Tests
// =============================================================================
