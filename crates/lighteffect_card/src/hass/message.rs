//! Card ↔ host traffic, split by direction: [`HostCommand`] flows from the
//! card to the host's service dispatcher, [`CardEvent`] notifies the host of
//! card-internal changes.

use tokio::sync::mpsc;

use crate::card::CardConfig;

/// Commands from the card to the host's service dispatcher.
///
/// Fire-and-forget: the card never blocks on or retries dispatch, and dispatch
/// failures surface through the host's own error channel. Eventual consistency
/// is restored by the next snapshot push.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    /// Turn the entity on with an explicit effect.
    TurnOnWithEffect { entity_id: String, effect: String },
}

impl HostCommand {
    /// The `(domain, service)` pair the host should invoke for this command.
    pub fn service(&self) -> (&'static str, &'static str) {
        match self {
            HostCommand::TurnOnWithEffect { .. } => ("light", "turn_on"),
        }
    }
}

/// Notifications from a card element back to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum CardEvent {
    /// The displayed effect changed underneath us (another client changed
    /// it); localization-sensitive siblings should re-evaluate.
    TranslationsUpdated,

    /// The editor produced a new configuration object.
    ConfigChanged { config: CardConfig },
}

/// Channel types for card→host traffic. Unbounded so the card never blocks
/// inside the host's update cycle.
pub type HostCommandSender = mpsc::UnboundedSender<HostCommand>;
pub type HostCommandReceiver = mpsc::UnboundedReceiver<HostCommand>;

pub type CardEventSender = mpsc::UnboundedSender<CardEvent>;
pub type CardEventReceiver = mpsc::UnboundedReceiver<CardEvent>;
