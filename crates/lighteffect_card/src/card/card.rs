use std::sync::Arc;

use tracing::debug;
use tracing::warn;

use super::config::CardConfig;
use super::config::ConfigError;
use super::config::StrictCardConfig;
use super::editor;
use super::editor::LightEffectCardEditor;
use super::render::CardView;
use super::render::DiagnosticRenderer;
use super::render::EffectSelect;
use super::render::ErrorCardRenderer;
use super::render::Render;
use super::CARD_NAME;
use super::LIGHT_DOMAINS;
use crate::hass::CardEvent;
use crate::hass::CardEventSender;
use crate::hass::EntityRecord;
use crate::hass::Hass;
use crate::hass::HostCommand;
use crate::hass::HostCommandSender;
use crate::hass::LifecycleState;
use crate::registry::CardDescriptor;

/// Translation key for the selector label.
const EFFECT_LABEL_KEY: &str = "ui.card.light.effect";

/// Registry descriptor for this card, for the composition root to register
/// with the host's element catalog.
pub fn descriptor() -> CardDescriptor {
    CardDescriptor {
        card_type: CARD_NAME,
        name: "Lighteffect Card",
        description: "Card with a selection box for the effects for a Light Entity",
    }
}

/// The lighteffect card controller.
///
/// Owns the strict configuration, the latest host context, and the displayed
/// effect. The host drives it through [`set_config`](Self::set_config),
/// [`set_hass`](Self::set_hass), [`render`](Self::render) and
/// [`effect_changed`](Self::effect_changed); everything runs synchronously
/// inside the host's update cycle.
pub struct LightEffectCard {
    config: Option<StrictCardConfig>,
    hass: Option<Arc<Hass>>,

    /// Last effect value the selector displayed. Empty until first resolved,
    /// reset whenever the bound entity changes.
    effect: String,

    commands: HostCommandSender,
    events: CardEventSender,
    diagnostics: Box<dyn DiagnosticRenderer>,
}

impl LightEffectCard {
    pub fn new(commands: HostCommandSender, events: CardEventSender) -> Self {
        Self {
            config: None,
            hass: None,
            effect: String::new(),
            commands,
            events,
            diagnostics: Box::new(ErrorCardRenderer),
        }
    }

    /// Replace the built-in diagnostic presentation with a host-provided one.
    pub fn with_diagnostic_renderer(mut self, renderer: Box<dyn DiagnosticRenderer>) -> Self {
        self.diagnostics = renderer;
        self
    }

    /// Editor element for this card, loading the editor module on first use.
    pub async fn config_element(events: CardEventSender) -> LightEffectCardEditor {
        editor::config_element(events).await
    }

    /// Minimal valid configuration pointing at the first entity in `hass`
    /// whose domain this card accepts.
    pub fn stub_config(hass: &Hass) -> CardConfig {
        let entity = hass
            .states
            .entity_ids()
            .find(|id| LIGHT_DOMAINS.contains(&domain(id)))
            .map(str::to_owned);

        CardConfig {
            card_type: super::CARD_TYPE.to_owned(),
            entity,
            ..CardConfig::default()
        }
    }

    /// Apply a new configuration object from the host.
    ///
    /// Validation failures are fatal to the apply; the previous configuration
    /// stays in place.
    pub fn set_config(&mut self, value: serde_json::Value) -> Result<(), ConfigError> {
        let strict = StrictCardConfig::from(CardConfig::from_value(value)?);

        // Swapping the bound entity invalidates the displayed effect, even if
        // both entities happen to report the same effect string.
        let previous = self.config.as_ref().and_then(|c| c.entity.as_deref());
        if previous != strict.entity.as_deref() {
            self.effect.clear();
        }

        self.config = Some(strict);
        Ok(())
    }

    /// Replace the host context. The host calls this whenever any entity
    /// state changes.
    pub fn set_hass(&mut self, hass: Arc<Hass>) {
        self.hass = Some(hass);
    }

    /// Effect value currently shown in the selector.
    pub fn displayed_effect(&self) -> &str {
        &self.effect
    }

    /// One update cycle: decide what to render from the current configuration
    /// and snapshot.
    pub fn render(&mut self) -> Render {
        let Some(hass) = self.hass.clone() else {
            return Render::Suppressed;
        };
        let Some(config) = self.config.as_ref() else {
            return Render::Suppressed;
        };
        let Some(entity_id) = config.entity.as_deref() else {
            return Render::Suppressed;
        };
        let Some(record) = hass.states.get(entity_id) else {
            return Render::Suppressed;
        };

        // An effect we did not pick means another client changed it. Accept
        // the snapshot as authoritative and tell dependent UI to re-evaluate.
        let effect = record.effect();
        if self.effect != effect {
            debug!(entity_id, effect, previous = %self.effect, "effect changed externally");
            self.effect = effect.to_owned();
            if self.events.send(CardEvent::TranslationsUpdated).is_err() {
                debug!("event channel closed, dropping translations-updated");
            }
        }

        match build_view(config, record, &hass, &self.effect) {
            Ok(render) => render,
            Err(e) => {
                let detail = format!("{e:#}");
                warn!(entity_id, error = %detail, "render failed, showing diagnostic card");
                Render::Failed(self.diagnostics.present("error", &detail, config))
            }
        }
    }

    /// Selection handler: the user picked `new_effect` in the selector.
    ///
    /// Optimistically records the choice, then issues a single turn-on
    /// command. Empty or unchanged selections are ignored. No rollback: the
    /// next snapshot push reconciles whatever the command actually did.
    pub fn effect_changed(&mut self, new_effect: &str) {
        if self.hass.is_none() {
            return;
        }
        let Some(entity_id) = self.config.as_ref().and_then(|c| c.entity.as_deref()) else {
            return;
        };
        if new_effect.is_empty() || self.effect == new_effect {
            return;
        }

        self.effect = new_effect.to_owned();
        debug!(entity_id, effect = new_effect, "issuing effect command");
        let command = HostCommand::TurnOnWithEffect {
            entity_id: entity_id.to_owned(),
            effect: new_effect.to_owned(),
        };
        if self.commands.send(command).is_err() {
            debug!("command channel closed, dropping effect command");
        }
    }
}

/// Active-path construction. Every failure in here is contained by the
/// caller's render boundary.
fn build_view(
    config: &StrictCardConfig,
    record: &EntityRecord,
    hass: &Hass,
    effect: &str,
) -> anyhow::Result<Render> {
    // Visibility policy runs before strict attribute decoding, so a hidden
    // card stays hidden even when its effect list is malformed.
    if (config.hide_if_off && record.lifecycle() == LifecycleState::Off)
        || (config.hide_if_no_effects && record.effect_list_is_empty())
    {
        return Ok(Render::Empty);
    }

    let options = record.effect_list()?;
    let header = config.title.clone().filter(|title| !title.is_empty());

    Ok(Render::Active(CardView {
        header,
        selector: EffectSelect {
            label: hass.localize(EFFECT_LABEL_KEY),
            value: effect.to_owned(),
            options,
        },
    }))
}

fn domain(entity_id: &str) -> &str {
    entity_id.split('.').next().unwrap_or_default()
}
