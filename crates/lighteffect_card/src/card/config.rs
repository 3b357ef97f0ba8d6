//! Configuration validation and defaulting.
//!
//! The host persists card configuration as a JSON object; validation is
//! deserialization into [`CardConfig`]. The render path only ever sees a
//! [`StrictCardConfig`], where both visibility flags hold concrete values.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// Default for `hide_if_off` when the author omits it.
pub const DEFAULT_HIDE_IF_OFF: bool = false;

/// Default for `hide_if_no_effects` when the author omits it.
pub const DEFAULT_HIDE_IF_NO_EFFECTS: bool = false;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The object does not match the recognized card schema.
    #[error("invalid lighteffect-card config: {0}")]
    Schema(#[source] serde_json::Error),
}

/// User-authored card configuration, as persisted by the host.
///
/// Base host-card fields (layout options and the like) are carried through
/// untouched in `base`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    /// Card type identifier, e.g. `custom:lighteffect-card`.
    #[serde(rename = "type")]
    pub card_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_if_off: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_if_no_effects: Option<bool>,

    #[serde(flatten)]
    pub base: serde_json::Map<String, Value>,
}

impl CardConfig {
    /// Validate a host-supplied JSON object against the card schema.
    ///
    /// Any field present with the wrong shape fails; this never partially
    /// accepts an invalid configuration.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        serde_json::from_value(value).map_err(ConfigError::Schema)
    }

    /// Minimal configuration for this card bound to `entity`.
    pub fn for_entity(entity: impl Into<String>) -> Self {
        Self {
            card_type: super::CARD_TYPE.to_owned(),
            entity: Some(entity.into()),
            ..Self::default()
        }
    }
}

/// Built-in defaults layered under every incoming configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardDefaults {
    pub hide_if_off: bool,
    pub hide_if_no_effects: bool,
}

impl Default for CardDefaults {
    fn default() -> Self {
        Self {
            hide_if_off: DEFAULT_HIDE_IF_OFF,
            hide_if_no_effects: DEFAULT_HIDE_IF_NO_EFFECTS,
        }
    }
}

/// Fully-defaulted configuration used by the render path.
///
/// Invariant: both visibility flags are concrete; `entity` may still be
/// absent, in which case the card renders nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrictCardConfig {
    #[serde(rename = "type")]
    pub card_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub hide_if_off: bool,
    pub hide_if_no_effects: bool,

    #[serde(flatten)]
    pub base: serde_json::Map<String, Value>,
}

impl StrictCardConfig {
    /// Defaults first, explicit fields second: a value the author wrote down
    /// is never overwritten by a default, and omitted fields always resolve
    /// to `defaults`, never to a stale previous value.
    pub fn merge(defaults: CardDefaults, config: CardConfig) -> Self {
        Self {
            card_type: config.card_type,
            entity: config.entity,
            title: config.title,
            hide_if_off: config.hide_if_off.unwrap_or(defaults.hide_if_off),
            hide_if_no_effects: config
                .hide_if_no_effects
                .unwrap_or(defaults.hide_if_no_effects),
            base: config.base,
        }
    }
}

impl From<CardConfig> for StrictCardConfig {
    fn from(config: CardConfig) -> Self {
        Self::merge(CardDefaults::default(), config)
    }
}
