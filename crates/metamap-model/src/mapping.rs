//! Structured intermediate mapping results.

use serde_json::Value;

/// A value held by one mapping-object entry.
///
/// `Scalar` carries any plain JSON value, including arrays of plain values
/// (an image position triple is a scalar here). `Object` and `Sequence` are
/// reserved for nested mapping objects attached by the pipeline; the filler
/// relies on this distinction when checking value shapes against the
/// skeleton.
#[derive(Debug, Clone, PartialEq)]
pub enum MappingValue {
    Scalar(Value),
    Object(MappingObject),
    Sequence(Vec<MappingObject>),
}

impl MappingValue {
    /// Short shape label used in error reports.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Object(_) => "object",
            Self::Sequence(_) => "sequence",
        }
    }
}

/// The ordered result of applying one scope fragment to a record.
///
/// Entries keep insertion order, which follows the fragment's rule order.
/// The object only ever grows: `push` appends projected values during
/// mapping, `attach_object`/`attach_sequence` nest child results under it.
/// Entries are never removed or renamed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingObject {
    entries: Vec<(String, MappingValue)>,
}

impl MappingObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one projected entry. Keys are expected to be unique; the
    /// mapper guarantees this because fragment targets are object members.
    pub fn push(&mut self, key: impl Into<String>, value: MappingValue) {
        self.entries.push((key.into(), value));
    }

    /// Attach a nested mapping object as a named child entry.
    pub fn attach_object(&mut self, name: impl Into<String>, child: MappingObject) {
        self.entries.push((name.into(), MappingValue::Object(child)));
    }

    /// Attach an ordered sequence of mapping objects as a named child entry.
    pub fn attach_sequence(&mut self, name: impl Into<String>, children: Vec<MappingObject>) {
        self.entries
            .push((name.into(), MappingValue::Sequence(children)));
    }

    pub fn get(&self, key: &str) -> Option<&MappingValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MappingValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
