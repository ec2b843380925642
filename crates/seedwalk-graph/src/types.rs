use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque identifier of a UI state (a screen or UI configuration).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(String);

impl StateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for StateId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

pub type EventId = u64;

/// Keys that sit beside the payload once it is flattened.
const RESERVED_KEYS: [&str; 2] = ["id", "name"];

/// A user-triggerable event as recorded in the transition graph.
///
/// Only `id` is interpreted. Every other field is opaque payload that is
/// carried through to the generated seed tests untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl EventRecord {
    pub fn new(id: EventId) -> Self {
        Self {
            id,
            payload: Map::new(),
        }
    }

    /// Attach a payload field, builder style.
    ///
    /// The payload is flattened next to `id` (and `name` on an edge), so those
    /// keys are reserved and ignored here.
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        if !RESERVED_KEYS.contains(&key) {
            self.payload.insert(key.to_string(), value.into());
        }
        self
    }
}

/// An event together with the name it is registered under on its edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedEvent {
    pub name: String,
    #[serde(flatten)]
    pub record: EventRecord,
}

/// All events leading from one state to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub from: StateId,
    pub to: StateId,
    /// Named events on this edge, in registration order.
    #[serde(default)]
    pub events: Vec<NamedEvent>,
}

impl Transition {
    pub fn new(from: StateId, to: StateId) -> Self {
        Self {
            from,
            to,
            events: Vec::new(),
        }
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Insert an event, replacing any earlier event registered under the same name.
    pub fn upsert_event(&mut self, name: &str, record: EventRecord) {
        if let Some(existing) = self.events.iter_mut().find(|e| e.name == name) {
            existing.record = record;
        } else {
            self.events.push(NamedEvent {
                name: name.to_string(),
                record,
            });
        }
    }
}
