use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// Lifecycle status of an entity, parsed from the record's state string.
///
/// Hosts report states as free-form strings; anything unrecognized collapses
/// to `Unknown`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum LifecycleState {
    On,
    Off,
    Unavailable,
    #[default]
    Unknown,
}

/// A present-but-wrong-shaped entity attribute.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("attribute `{attribute}` is not {expected}")]
pub struct AttributeError {
    pub attribute: &'static str,
    pub expected: &'static str,
}

/// A single entity as reported by the host: a lifecycle state string plus an
/// open attribute map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub state: String,

    #[serde(default)]
    pub attributes: serde_json::Map<String, Value>,
}

impl EntityRecord {
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            attributes: serde_json::Map::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.state.parse().unwrap_or_default()
    }

    /// Current effect. Missing or non-string values read as the empty string.
    pub fn effect(&self) -> &str {
        self.attributes
            .get("effect")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// True when the entity advertises no effects at all. A malformed
    /// `effect_list` counts as non-empty here and fails later, in
    /// [`EntityRecord::effect_list`].
    pub fn effect_list_is_empty(&self) -> bool {
        match self.attributes.get("effect_list") {
            None => true,
            Some(Value::Array(list)) => list.is_empty(),
            Some(_) => false,
        }
    }

    /// Selectable effect names, in the order the host supplied them.
    pub fn effect_list(&self) -> Result<Vec<String>, AttributeError> {
        const MALFORMED: AttributeError = AttributeError {
            attribute: "effect_list",
            expected: "a list of strings",
        };

        match self.attributes.get("effect_list") {
            None => Ok(Vec::new()),
            Some(Value::Array(list)) => list
                .iter()
                .map(|v| v.as_str().map(str::to_owned).ok_or(MALFORMED))
                .collect(),
            Some(_) => Err(MALFORMED),
        }
    }
}

/// Host-owned mapping of entity id to record.
///
/// Read-only to the card and replaced wholesale on every host update. Ordered
/// so "first matching entity" operations are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    entities: BTreeMap<String, EntityRecord>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity_id: impl Into<String>, record: EntityRecord) {
        self.entities.insert(entity_id.into(), record);
    }

    pub fn get(&self, entity_id: &str) -> Option<&EntityRecord> {
        self.entities.get(entity_id)
    }

    pub fn entity_ids(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
