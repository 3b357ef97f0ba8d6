//! Catalog of card elements the host's configuration UI can offer.
//!
//! Registration is explicit: the composition root registers each element once
//! at startup. Nothing registers itself as a side effect of being linked in.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

/// Catalog entry for one registered card element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardDescriptor {
    #[serde(rename = "type")]
    pub card_type: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Element registries reject duplicate definitions for the same type.
    #[error("card type `{0}` is already registered")]
    AlreadyRegistered(String),
}

#[derive(Debug, Default)]
pub struct CardRegistry {
    cards: BTreeMap<&'static str, CardDescriptor>,
}

impl CardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: CardDescriptor) -> Result<(), RegistryError> {
        if self.cards.contains_key(descriptor.card_type) {
            return Err(RegistryError::AlreadyRegistered(
                descriptor.card_type.to_owned(),
            ));
        }

        info!(card_type = descriptor.card_type, "registered custom card");
        self.cards.insert(descriptor.card_type, descriptor);
        Ok(())
    }

    pub fn get(&self, card_type: &str) -> Option<&CardDescriptor> {
        self.cards.get(card_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardDescriptor> {
        self.cards.values()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
