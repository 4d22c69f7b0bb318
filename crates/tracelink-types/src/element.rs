// Captured value and trace element types
// One trace element is a single captured value plus its logical capture time

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single value captured by the instrumentation layer.
///
/// The engine never interprets a captured value beyond equality and key
/// extraction, so the capture layer's identity notion is reified here:
/// references carry the stable object id the capture layer assigned,
/// primitives carry their canonical rendering, and observed nulls carry
/// nothing at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapturedValue {
    /// A null reference was observed.
    Null,
    /// A primitive value, identified by its canonical rendering.
    Primitive(String),
    /// A reference value with a capture-assigned stable object id.
    Reference {
        /// Stable id, unique per object within one capture session
        id: u64,
        /// Human-readable rendering of the referenced object
        render: String,
    },
}

impl CapturedValue {
    /// Captured primitive with its canonical rendering.
    pub fn primitive(render: impl Into<String>) -> Self {
        CapturedValue::Primitive(render.into())
    }

    /// Captured reference with its stable object id and rendering.
    pub fn reference(id: u64, render: impl Into<String>) -> Self {
        CapturedValue::Reference { id, render: render.into() }
    }

    /// The comparable identity key of this value.
    ///
    /// References are keyed by object id, primitives by content, and nulls
    /// by the explicit [`ValueKey::None`] variant, so identity-free values
    /// group with each other and never with value-bearing ones.
    pub fn key(&self) -> ValueKey {
        match self {
            CapturedValue::Null => ValueKey::None,
            CapturedValue::Primitive(render) => ValueKey::Content(render.clone()),
            CapturedValue::Reference { id, .. } => ValueKey::Identity(*id),
        }
    }
}

impl fmt::Display for CapturedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapturedValue::Null => write!(f, "null"),
            CapturedValue::Primitive(render) => write!(f, "{render}"),
            CapturedValue::Reference { render, .. } => write!(f, "{render}"),
        }
    }
}

/// Comparable key used to match trace elements across snapshot sides when
/// position alone is insufficient.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    /// The value exposes no natural identity (an observed null).
    None,
    /// Content identity of a primitive value.
    Content(String),
    /// Stable object identity of a reference value.
    Identity(u64),
}

/// One captured value together with its logical capture time.
///
/// `time` is assigned monotonically by the capture layer and is unique
/// within one snapshot side, though not necessarily contiguous.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraceElement {
    /// The captured value
    pub value: CapturedValue,
    /// Logical capture time
    pub time: i64,
}

impl TraceElement {
    /// Create a trace element from a captured value and its capture time.
    pub fn new(value: CapturedValue, time: i64) -> Self {
        TraceElement { value, time }
    }

    /// The identity key of the underlying value.
    pub fn key(&self) -> ValueKey {
        self.value.key()
    }
}

impl fmt::Display for TraceElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.value, self.time)
    }
}
