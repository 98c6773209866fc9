//! AnnotationRecord: a stored annotation and the shapes it carries
//!
//! Stored annotations are flat objects whose shape is implied by which keys
//! are present (`ner`, `zone`, `text`, `src`/`dest`). A record may carry
//! several of them. `from_value` keeps the whole object and decodes a
//! `Shape` for every shape key that is well-formed; a malformed key only
//! loses its own shape. A record with no shape at all is a classification
//! record, compared by deep equality alone.
//!
//! Unknown keys stay in the object (and in each shape's `extra`), so deep
//! equality sees the whole record and serialization round-trips.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};

use crate::decode::as_offset;
use crate::error::{EngineError, Result};

// =============================================================================
// Shapes
// =============================================================================

/// Character span of a NER record, UTF-16 code units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NerSpan {
    pub start: usize,
    pub end: usize,
}

/// Span (NER) annotation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NerRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub ner: NerSpan,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A polygon vertex in normalized image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Polygon (zone) annotation. Points are ordered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub zone: Vec<Point>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Free-text annotation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRecord {
    pub text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Categorical annotation: just the object
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ClassificationRecord {
    pub fields: Map<String, Value>,
}

/// Labeled edge between two spans
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationRecord {
    pub src: NerRecord,
    pub dest: NerRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One decoded shape of a record
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Relation(RelationRecord),
    Ner(NerRecord),
    Zone(ZoneRecord),
    Text(TextRecord),
}

impl Shape {
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Relation(_) => "relation",
            Shape::Ner(_) => "ner",
            Shape::Zone(_) => "zone",
            Shape::Text(_) => "text",
        }
    }
}

/// Any annotation record: the raw object plus every well-formed shape it
/// carries, in `Shape` declaration order. No shape means classification.
///
/// Equality is deep equality over the object, with numbers compared by value
/// (`1 == 1.0`) the way a JS deep-equal sees them.
#[derive(Debug, Clone, Default)]
pub struct AnnotationRecord {
    fields: Map<String, Value>,
    shapes: Vec<Shape>,
}

// =============================================================================
// Constructors
// =============================================================================

impl NerRecord {
    pub fn new(value: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            value: Some(value.into()),
            ner: NerSpan { start, end },
            extra: Map::new(),
        }
    }

    /// Span without a label
    pub fn unlabeled(start: usize, end: usize) -> Self {
        Self {
            value: None,
            ner: NerSpan { start, end },
            extra: Map::new(),
        }
    }

    pub fn start(&self) -> usize {
        self.ner.start
    }

    pub fn end(&self) -> usize {
        self.ner.end
    }

    fn into_fields(self) -> Map<String, Value> {
        let mut fields = self.extra;
        fields.insert("ner".into(), json!({ "start": self.ner.start, "end": self.ner.end }));
        if let Some(value) = self.value {
            fields.insert("value".into(), Value::String(value));
        }
        fields
    }
}

impl ZoneRecord {
    pub fn new(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self {
            value: None,
            zone: points.into_iter().map(|(x, y)| Point { x, y }).collect(),
            extra: Map::new(),
        }
    }

    // Non-finite coordinates have no JSON form and become null
    fn into_fields(self) -> Map<String, Value> {
        let mut fields = self.extra;
        let points = self.zone.iter().map(|p| json!({ "x": p.x, "y": p.y })).collect();
        fields.insert("zone".into(), Value::Array(points));
        if let Some(value) = self.value {
            fields.insert("value".into(), Value::String(value));
        }
        fields
    }
}

impl TextRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            extra: Map::new(),
        }
    }

    fn into_fields(self) -> Map<String, Value> {
        let mut fields = self.extra;
        fields.insert("text".into(), Value::String(self.text));
        fields
    }
}

impl ClassificationRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl RelationRecord {
    pub fn new(src: NerRecord, dest: NerRecord, value: Option<&str>) -> Self {
        Self {
            src,
            dest,
            value: value.map(str::to_string),
            extra: Map::new(),
        }
    }

    fn into_fields(self) -> Map<String, Value> {
        let mut fields = self.extra;
        fields.insert("src".into(), Value::Object(self.src.into_fields()));
        fields.insert("dest".into(), Value::Object(self.dest.into_fields()));
        if let Some(value) = self.value {
            fields.insert("value".into(), Value::String(value));
        }
        fields
    }
}

impl AnnotationRecord {
    /// Decode every shape the object carries.
    pub fn from_object(fields: Map<String, Value>) -> Self {
        let shapes = [
            decode_shape(&fields, &["src", "dest"], RelationRecord::from_object).map(Shape::Relation),
            decode_shape(&fields, &["ner"], NerRecord::from_object).map(Shape::Ner),
            decode_shape(&fields, &["zone"], ZoneRecord::from_object).map(Shape::Zone),
            decode_shape(&fields, &["text"], TextRecord::from_object).map(Shape::Text),
        ]
        .into_iter()
        .flatten()
        .collect();
        Self { fields, shapes }
    }

    /// The raw object
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn as_ner(&self) -> Option<&NerRecord> {
        self.shapes.iter().find_map(|s| match s {
            Shape::Ner(r) => Some(r),
            _ => None,
        })
    }

    pub fn as_zone(&self) -> Option<&ZoneRecord> {
        self.shapes.iter().find_map(|s| match s {
            Shape::Zone(r) => Some(r),
            _ => None,
        })
    }

    pub fn as_text(&self) -> Option<&TextRecord> {
        self.shapes.iter().find_map(|s| match s {
            Shape::Text(r) => Some(r),
            _ => None,
        })
    }

    pub fn as_relation(&self) -> Option<&RelationRecord> {
        self.shapes.iter().find_map(|s| match s {
            Shape::Relation(r) => Some(r),
            _ => None,
        })
    }

    /// No shape: only deep equality can match it
    pub fn is_classification(&self) -> bool {
        self.shapes.is_empty()
    }

    /// The record's label, when it has a string one
    pub fn value(&self) -> Option<&str> {
        self.fields.get("value").and_then(Value::as_str)
    }

    /// Primary shape name, for logs
    pub fn kind(&self) -> &'static str {
        self.shapes.first().map_or("classification", Shape::kind)
    }
}

impl From<NerRecord> for AnnotationRecord {
    fn from(r: NerRecord) -> Self {
        AnnotationRecord::from_object(r.into_fields())
    }
}

impl From<ZoneRecord> for AnnotationRecord {
    fn from(r: ZoneRecord) -> Self {
        AnnotationRecord::from_object(r.into_fields())
    }
}

impl From<TextRecord> for AnnotationRecord {
    fn from(r: TextRecord) -> Self {
        AnnotationRecord::from_object(r.into_fields())
    }
}

impl From<ClassificationRecord> for AnnotationRecord {
    fn from(r: ClassificationRecord) -> Self {
        AnnotationRecord::from_object(r.fields)
    }
}

impl From<RelationRecord> for AnnotationRecord {
    fn from(r: RelationRecord) -> Self {
        AnnotationRecord::from_object(r.into_fields())
    }
}

// =============================================================================
// Deep equality
// =============================================================================

impl PartialEq for AnnotationRecord {
    fn eq(&self, other: &Self) -> bool {
        objects_eq(&self.fields, &other.fields)
    }
}

fn json_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x == y || x.as_f64() == y.as_f64(),
        (Value::Array(x), Value::Array(y)) => x.len() == y.len() && x.iter().zip(y).all(|(p, q)| json_eq(p, q)),
        (Value::Object(x), Value::Object(y)) => objects_eq(x, y),
        _ => a == b,
    }
}

fn objects_eq(a: &Map<String, Value>, b: &Map<String, Value>) -> bool {
    a.len() == b.len() && a.iter().all(|(k, v)| b.get(k).map_or(false, |w| json_eq(v, w)))
}

// =============================================================================
// Decoding
// =============================================================================

fn object(value: &Value) -> Result<&Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| EngineError::NotAnObject(EngineError::kind_of(value)))
}

/// The shape, when one of its keys is present and it decodes
fn decode_shape<T>(
    obj: &Map<String, Value>,
    keys: &[&str],
    decode: impl Fn(&Map<String, Value>) -> Result<T>,
) -> Option<T> {
    if !keys.iter().any(|k| obj.contains_key(*k)) {
        return None;
    }
    decode(obj)
        .map_err(|e| log::trace!("[Decode] {} key ignored: {}", keys[0], e))
        .ok()
}

/// `value` must be a string when present; null means absent.
fn label(obj: &Map<String, Value>) -> Result<Option<String>> {
    match obj.get("value") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(EngineError::invalid(
            "value",
            format!("expected string, got {}", EngineError::kind_of(other)),
        )),
    }
}

/// Everything except the keys the shape consumed
fn rest(obj: &Map<String, Value>, consumed: &[&str]) -> Map<String, Value> {
    obj.iter()
        .filter(|(k, _)| !consumed.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn finite(value: Option<&Value>, field: &'static str) -> Result<f64> {
    let v = value.ok_or(EngineError::MissingField(field))?;
    match v.as_f64() {
        Some(f) if f.is_finite() => Ok(f),
        _ => Err(EngineError::invalid(field, "expected a finite number")),
    }
}

impl NerRecord {
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::from_object(object(value)?)
    }

    fn from_object(obj: &Map<String, Value>) -> Result<Self> {
        let ner = obj.get("ner").ok_or(EngineError::MissingField("ner"))?;
        let ner = ner
            .as_object()
            .ok_or_else(|| EngineError::invalid("ner", "expected {start, end}"))?;
        let start = ner
            .get("start")
            .and_then(as_offset)
            .ok_or_else(|| EngineError::invalid("ner.start", "expected a non-negative integer"))?;
        let end = ner
            .get("end")
            .and_then(as_offset)
            .ok_or_else(|| EngineError::invalid("ner.end", "expected a non-negative integer"))?;

        Ok(Self {
            value: label(obj)?,
            ner: NerSpan { start, end },
            extra: rest(obj, &["value", "ner"]),
        })
    }
}

impl ZoneRecord {
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::from_object(object(value)?)
    }

    fn from_object(obj: &Map<String, Value>) -> Result<Self> {
        let zone = obj
            .get("zone")
            .ok_or(EngineError::MissingField("zone"))?
            .as_array()
            .ok_or_else(|| EngineError::invalid("zone", "expected an array of points"))?;

        let points = zone
            .iter()
            .map(|p| -> Result<Point> {
                let p = p
                    .as_object()
                    .ok_or_else(|| EngineError::invalid("zone", "expected {x, y} points"))?;
                Ok(Point {
                    x: finite(p.get("x"), "zone.x")?,
                    y: finite(p.get("y"), "zone.y")?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            value: label(obj)?,
            zone: points,
            extra: rest(obj, &["value", "zone"]),
        })
    }
}

impl TextRecord {
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::from_object(object(value)?)
    }

    fn from_object(obj: &Map<String, Value>) -> Result<Self> {
        let text = obj
            .get("text")
            .ok_or(EngineError::MissingField("text"))?
            .as_str()
            .ok_or_else(|| EngineError::invalid("text", "expected string"))?;
        Ok(Self {
            text: text.to_string(),
            extra: rest(obj, &["text"]),
        })
    }
}

impl RelationRecord {
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::from_object(object(value)?)
    }

    fn from_object(obj: &Map<String, Value>) -> Result<Self> {
        let src = NerRecord::from_value(obj.get("src").ok_or(EngineError::MissingField("src"))?)?;
        let dest = NerRecord::from_value(obj.get("dest").ok_or(EngineError::MissingField("dest"))?)?;
        Ok(Self {
            src,
            dest,
            value: label(obj)?,
            extra: rest(obj, &["src", "dest", "value"]),
        })
    }
}

impl AnnotationRecord {
    /// Keep a loose JSON object with its shapes. Only non-objects fail.
    pub fn from_value(value: &Value) -> Result<Self> {
        object(value).map(|obj| AnnotationRecord::from_object(obj.clone()))
    }
}

impl Serialize for AnnotationRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AnnotationRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        AnnotationRecord::from_value(&value).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for NerRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        NerRecord::from_value(&value).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for RelationRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        RelationRecord::from_value(&value).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Tests
// =============================================================================
