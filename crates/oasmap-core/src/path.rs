//! # Value Paths
//!
//! Locates a value inside a raw input tree as the chain of property names
//! and array indices walked from the root. Rendered as a JSON Pointer
//! (RFC 6901) in error messages, or `(root)` for the empty path.

use std::fmt;

use serde_json::Value;

/// One step from a container to one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A mapping key.
    Key(String),
    /// A sequence index.
    Index(usize),
}

/// Chain of segments from the root of the input tree to a value.
///
/// Paths are cheap to extend: [`ValuePath::key`] and [`ValuePath::index`]
/// return a new path and leave the parent untouched, so each recursion
/// level owns the path of the value it is working on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ValuePath(Vec<PathSegment>);

impl ValuePath {
    /// The empty path, designating the top-level value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of the child stored under `key`.
    pub fn key(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.to_string()));
        Self(segments)
    }

    /// Path of the sequence element at `index`.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Name to report for the value at this path: the last mapping key, the
    /// last index rendered as `[i]`, or `value` at the root.
    pub fn field_name(&self) -> String {
        match self.0.last() {
            Some(PathSegment::Key(key)) => key.clone(),
            Some(PathSegment::Index(i)) => format!("[{i}]"),
            None => "value".to_string(),
        }
    }

    /// JSON Pointer rendering; the root is the empty string.
    pub fn to_pointer(&self) -> String {
        let mut out = String::new();
        for segment in &self.0 {
            out.push('/');
            match segment {
                PathSegment::Key(key) => out.push_str(&key.replace('~', "~0").replace('/', "~1")),
                PathSegment::Index(i) => out.push_str(&i.to_string()),
            }
        }
        out
    }
}

impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "(root)")
        } else {
            write!(f, "{}", self.to_pointer())
        }
    }
}

/// Dynamic shape of a raw value, used to report type mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Sequence,
    Mapping,
}

impl ValueKind {
    /// Classify a raw value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Sequence,
            Value::Object(_) => Self::Mapping,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
