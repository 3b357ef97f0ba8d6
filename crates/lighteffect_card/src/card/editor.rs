//! Configuration editor for the card.
//!
//! The editor is loaded on demand: the first [`config_element`] call
//! initializes the editor module (its form schema), later calls reuse it and
//! only construct a fresh element.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::debug;

use super::config::CardConfig;
use super::config::ConfigError;
use super::LIGHT_DOMAINS;
use crate::hass::CardEvent;
use crate::hass::CardEventSender;
use crate::hass::Hass;

/// One field of the editor form, in the shape the host's generic form
/// builder understands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub required: bool,
    pub selector: Selector,
}

/// Selector kinds used by this card's form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Selector {
    Entity { domains: &'static [&'static str] },
    Text,
    Boolean,
}

/// Editor module state, built once on first load.
#[derive(Debug)]
pub struct EditorModule {
    schema: Vec<FormField>,
}

static MODULE: OnceCell<EditorModule> = OnceCell::const_new();

async fn load_module() -> &'static EditorModule {
    MODULE
        .get_or_init(|| async {
            debug!("loading editor module");
            EditorModule { schema: schema() }
        })
        .await
}

fn schema() -> Vec<FormField> {
    vec![
        FormField {
            name: "entity",
            required: true,
            selector: Selector::Entity {
                domains: LIGHT_DOMAINS,
            },
        },
        FormField {
            name: "title",
            required: false,
            selector: Selector::Text,
        },
        FormField {
            name: "hide_if_off",
            required: false,
            selector: Selector::Boolean,
        },
        FormField {
            name: "hide_if_no_effects",
            required: false,
            selector: Selector::Boolean,
        },
    ]
}

/// Create an editor element, loading the module on first use.
pub(super) async fn config_element(events: CardEventSender) -> LightEffectCardEditor {
    LightEffectCardEditor {
        module: load_module().await,
        hass: None,
        config: None,
        events,
    }
}

/// Form description the host feeds into its generic form builder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    pub fields: Vec<FormFieldView>,
    pub data: CardConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormFieldView {
    pub name: &'static str,
    pub label: String,
    pub required: bool,
    pub selector: Selector,
}

/// The editor element: renders the form schema and reports user edits back as
/// full configuration objects.
pub struct LightEffectCardEditor {
    module: &'static EditorModule,
    hass: Option<Arc<Hass>>,
    config: Option<CardConfig>,
    events: CardEventSender,
}

impl LightEffectCardEditor {
    pub fn set_hass(&mut self, hass: Arc<Hass>) {
        self.hass = Some(hass);
    }

    /// Asserts the configuration against the card schema before accepting it.
    pub fn set_config(&mut self, value: serde_json::Value) -> Result<(), ConfigError> {
        self.config = Some(CardConfig::from_value(value)?);
        Ok(())
    }

    /// Form description for the host, or `None` until both host context and
    /// configuration have arrived.
    pub fn render(&self) -> Option<FormView> {
        let hass = self.hass.as_ref()?;
        let config = self.config.as_ref()?;

        let fields = self
            .module
            .schema
            .iter()
            .map(|field| FormFieldView {
                name: field.name,
                label: compute_label(hass, field.name),
                required: field.required,
                selector: field.selector.clone(),
            })
            .collect();

        Some(FormView {
            fields,
            data: config.clone(),
        })
    }

    /// The user edited a field; hand the full new configuration object to
    /// whoever persists it.
    pub fn value_changed(&self, config: CardConfig) {
        if self.events.send(CardEvent::ConfigChanged { config }).is_err() {
            debug!("event channel closed, dropping config-changed");
        }
    }

    #[cfg(test)]
    fn module(&self) -> &'static EditorModule {
        self.module
    }
}

fn compute_label(hass: &Hass, name: &str) -> String {
    match name {
        "hide_if_off" => "Hide if Light Off?".to_owned(),
        "hide_if_no_effects" => "Hide if no Effects?".to_owned(),
        generic => hass.localize(&format!("ui.panel.lovelace.editor.card.generic.{generic}")),
    }
}
