use std::fmt;

use super::state::Snapshot;

/// Host-supplied translation lookup.
pub trait Localize: Send + Sync {
    /// Resolve a translation key to display text.
    fn localize(&self, key: &str) -> String;
}

/// English fallback used when the host supplies no translations. Unknown keys
/// resolve to themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLocalizer;

impl Localize for DefaultLocalizer {
    fn localize(&self, key: &str) -> String {
        match key {
            "ui.card.light.effect" => "Effect",
            "ui.panel.lovelace.editor.card.generic.entity" => "Entity",
            "ui.panel.lovelace.editor.card.generic.title" => "Title",
            other => other,
        }
        .to_owned()
    }
}

/// Host context handed to card elements: the current state snapshot plus host
/// capabilities. Replaced wholesale by the host on every update, so an update
/// cycle never observes a partially-built context.
pub struct Hass {
    pub states: Snapshot,
    localizer: Box<dyn Localize>,
}

impl Hass {
    pub fn new(states: Snapshot) -> Self {
        Self {
            states,
            localizer: Box::new(DefaultLocalizer),
        }
    }

    /// Replace the built-in localizer with the host's own.
    pub fn with_localizer(mut self, localizer: Box<dyn Localize>) -> Self {
        self.localizer = localizer;
        self
    }

    pub fn localize(&self, key: &str) -> String {
        self.localizer.localize(key)
    }
}

impl fmt::Debug for Hass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hass")
            .field("states", &self.states)
            .finish_non_exhaustive()
    }
}
