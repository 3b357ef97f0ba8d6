//! Effect selector card for light entities.
//!
//! The card receives wholesale state snapshots from its host dashboard,
//! decides on every update cycle whether to render nothing, an empty card, or
//! the effect selector, and forwards user selections back to the host as
//! `light.turn_on` commands. Render failures are contained: a malformed
//! entity produces a diagnostic placeholder, never an error in the host's
//! render tree.

pub mod card;
pub mod hass;
pub mod registry;

pub use card::CardConfig;
pub use card::ConfigError;
pub use card::LightEffectCard;
pub use card::LightEffectCardEditor;
pub use card::Render;
pub use card::StrictCardConfig;
pub use hass::EntityRecord;
pub use hass::Hass;
pub use hass::Snapshot;
pub use registry::CardDescriptor;
pub use registry::CardRegistry;
