use std::sync::Arc;

use lighteffect_card::card::DiagnosticRenderer;
use lighteffect_card::hass::CardEvent;
use lighteffect_card::hass::CardEventReceiver;
use lighteffect_card::hass::HostCommand;
use lighteffect_card::hass::HostCommandReceiver;
use lighteffect_card::CardConfig;
use lighteffect_card::EntityRecord;
use lighteffect_card::Hass;
use lighteffect_card::LightEffectCard;
use lighteffect_card::Render;
use lighteffect_card::Snapshot;
use serde_json::json;
use tokio::sync::mpsc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn card() -> (LightEffectCard, HostCommandReceiver, CardEventReceiver) {
    init_tracing();
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    (LightEffectCard::new(command_tx, event_tx), command_rx, event_rx)
}

fn kitchen(state: &str, attributes: serde_json::Value) -> Arc<Hass> {
    let record: EntityRecord =
        serde_json::from_value(json!({ "state": state, "attributes": attributes })).unwrap();
    let mut snapshot = Snapshot::new();
    snapshot.insert("light.kitchen", record);
    Arc::new(Hass::new(snapshot))
}

fn kitchen_config(extra: serde_json::Value) -> serde_json::Value {
    let mut config = json!({
        "type": "custom:lighteffect-card",
        "entity": "light.kitchen",
    });
    config
        .as_object_mut()
        .unwrap()
        .extend(extra.as_object().unwrap().clone());
    config
}

#[test]
fn test_suppressed_without_context_or_entity() {
    let (mut card, _commands, _events) = card();
    assert_eq!(card.render(), Render::Suppressed);

    // Config alone is not enough.
    card.set_config(kitchen_config(json!({}))).unwrap();
    assert_eq!(card.render(), Render::Suppressed);

    // Context without a bound entity is not enough either.
    let (mut card, _commands, _events) = self::card();
    card.set_config(json!({ "type": "custom:lighteffect-card" }))
        .unwrap();
    card.set_hass(kitchen("on", json!({})));
    assert_eq!(card.render(), Render::Suppressed);
}

#[test]
fn test_suppressed_when_entity_not_in_snapshot() {
    let (mut card, _commands, _events) = card();
    card.set_config(json!({
        "type": "custom:lighteffect-card",
        "entity": "light.bedroom",
        "hide_if_off": true,
    }))
    .unwrap();
    card.set_hass(kitchen("off", json!({})));

    // Unresolvable entity is a normal condition, not Empty and not an error.
    assert_eq!(card.render(), Render::Suppressed);
}

#[test]
fn test_hidden_when_off() {
    let (mut card, _commands, _events) = card();
    card.set_config(kitchen_config(json!({ "hide_if_off": true })))
        .unwrap();

    card.set_hass(kitchen("off", json!({})));
    assert_eq!(card.render(), Render::Empty);

    // Still hidden with a populated effect list.
    card.set_hass(kitchen(
        "off",
        json!({ "effect_list": ["rainbow", "solid"] }),
    ));
    assert_eq!(card.render(), Render::Empty);

    // Off without the flag renders normally.
    let (mut card, _commands, _events) = self::card();
    card.set_config(kitchen_config(json!({}))).unwrap();
    card.set_hass(kitchen("off", json!({})));
    assert!(matches!(card.render(), Render::Active(_)));
}

#[test]
fn test_hidden_when_no_effects() {
    let (mut card, _commands, _events) = card();
    card.set_config(kitchen_config(json!({ "hide_if_no_effects": true })))
        .unwrap();

    // Absent and present-but-empty lists both count as "no effects",
    // regardless of lifecycle status.
    card.set_hass(kitchen("on", json!({})));
    assert_eq!(card.render(), Render::Empty);
    card.set_hass(kitchen("off", json!({ "effect_list": [] })));
    assert_eq!(card.render(), Render::Empty);

    card.set_hass(kitchen("on", json!({ "effect_list": ["rainbow"] })));
    assert!(matches!(card.render(), Render::Active(_)));
}

#[test]
fn test_active_selector_contents() {
    let (mut card, _commands, _events) = card();
    card.set_config(kitchen_config(json!({}))).unwrap();
    card.set_hass(kitchen(
        "on",
        json!({ "effect": "rainbow", "effect_list": ["rainbow", "solid"] }),
    ));

    let Render::Active(view) = card.render() else {
        panic!("expected Active");
    };
    assert_eq!(view.header, None);
    assert_eq!(view.selector.label, "Effect");
    assert_eq!(view.selector.value, "rainbow");
    assert_eq!(view.selector.options, vec!["rainbow", "solid"]);
}

#[test]
fn test_header_only_for_non_empty_title() {
    let (mut card, _commands, _events) = card();
    card.set_config(kitchen_config(json!({ "title": "Kitchen" })))
        .unwrap();
    card.set_hass(kitchen("on", json!({ "effect_list": ["solid"] })));

    let Render::Active(view) = card.render() else {
        panic!("expected Active");
    };
    assert_eq!(view.header.as_deref(), Some("Kitchen"));

    card.set_config(kitchen_config(json!({ "title": "" }))).unwrap();
    let Render::Active(view) = card.render() else {
        panic!("expected Active");
    };
    assert_eq!(view.header, None);
}

#[test]
fn test_external_change_signals_once() {
    let (mut card, _commands, mut events) = card();
    card.set_config(kitchen_config(json!({}))).unwrap();

    let hass = kitchen("on", json!({ "effect": "rainbow", "effect_list": ["rainbow"] }));
    card.set_hass(hass.clone());
    card.render();

    // First cycle reconciles "" -> "rainbow" and fires the refresh signal.
    assert_eq!(card.displayed_effect(), "rainbow");
    assert_eq!(events.try_recv().unwrap(), CardEvent::TranslationsUpdated);

    // Re-applying the identical snapshot is quiet.
    card.set_hass(hass);
    card.render();
    assert!(events.try_recv().is_err());

    // A genuinely changed effect fires again.
    card.set_hass(kitchen(
        "on",
        json!({ "effect": "solid", "effect_list": ["rainbow", "solid"] }),
    ));
    card.render();
    assert_eq!(card.displayed_effect(), "solid");
    assert_eq!(events.try_recv().unwrap(), CardEvent::TranslationsUpdated);
}

#[test]
fn test_selection_round_trip() {
    let (mut card, mut commands, _events) = card();
    card.set_config(kitchen_config(json!({}))).unwrap();
    card.set_hass(kitchen(
        "on",
        json!({ "effect": "fade", "effect_list": ["fade", "strobe"] }),
    ));
    card.render();
    assert_eq!(card.displayed_effect(), "fade");

    card.effect_changed("strobe");
    assert_eq!(card.displayed_effect(), "strobe");
    assert_eq!(
        commands.try_recv().unwrap(),
        HostCommand::TurnOnWithEffect {
            entity_id: "light.kitchen".to_owned(),
            effect: "strobe".to_owned(),
        }
    );

    // Re-selecting the displayed effect, or selecting nothing, issues no
    // further commands.
    card.effect_changed("strobe");
    card.effect_changed("");
    assert!(commands.try_recv().is_err());
}

#[test]
fn test_render_failure_is_contained() {
    let (mut card, _commands, _events) = card();
    card.set_config(kitchen_config(json!({}))).unwrap();
    card.set_hass(kitchen("on", json!({ "effect_list": 42 })));

    let Render::Failed(diagnostic) = card.render() else {
        panic!("expected Failed");
    };
    assert_eq!(diagnostic.kind, "error");
    assert!(diagnostic.error.contains("effect_list"));
    assert_eq!(
        diagnostic.orig_config.entity.as_deref(),
        Some("light.kitchen")
    );

    // The next cycle with a well-formed snapshot is unaffected.
    card.set_hass(kitchen("on", json!({ "effect_list": ["rainbow"] })));
    assert!(matches!(card.render(), Render::Active(_)));
}

#[test]
fn test_hidden_wins_over_malformed_list() {
    let (mut card, _commands, _events) = card();
    card.set_config(kitchen_config(json!({ "hide_if_off": true })))
        .unwrap();
    card.set_hass(kitchen("off", json!({ "effect_list": 42 })));

    // Visibility policy is evaluated before the options are decoded.
    assert_eq!(card.render(), Render::Empty);
}

#[test]
fn test_host_diagnostic_renderer_is_used() {
    struct Upcase;
    impl DiagnosticRenderer for Upcase {
        fn present(
            &self,
            kind: &str,
            detail: &str,
            context: &lighteffect_card::StrictCardConfig,
        ) -> lighteffect_card::card::DiagnosticCard {
            lighteffect_card::card::DiagnosticCard {
                kind: kind.to_uppercase(),
                error: detail.to_uppercase(),
                orig_config: context.clone(),
            }
        }
    }

    init_tracing();
    let (command_tx, _commands) = mpsc::unbounded_channel();
    let (event_tx, _events) = mpsc::unbounded_channel();
    let mut card = LightEffectCard::new(command_tx, event_tx)
        .with_diagnostic_renderer(Box::new(Upcase));

    card.set_config(kitchen_config(json!({}))).unwrap();
    card.set_hass(kitchen("on", json!({ "effect_list": 42 })));

    let Render::Failed(diagnostic) = card.render() else {
        panic!("expected Failed");
    };
    assert_eq!(diagnostic.kind, "ERROR");
}

#[test]
fn test_invalid_config_keeps_previous() {
    let (mut card, _commands, _events) = card();
    card.set_config(kitchen_config(json!({}))).unwrap();
    card.set_hass(kitchen("on", json!({ "effect_list": ["rainbow"] })));

    let err = card
        .set_config(kitchen_config(json!({ "hide_if_off": "yes" })))
        .unwrap_err();
    assert!(err.to_string().starts_with("invalid lighteffect-card config:"));

    // Still renders from the previously applied configuration.
    assert!(matches!(card.render(), Render::Active(_)));
}

#[test]
fn test_entity_swap_resets_displayed_effect() {
    let (mut card, _commands, mut events) = card();
    card.set_config(kitchen_config(json!({}))).unwrap();

    let mut snapshot = Snapshot::new();
    let record: EntityRecord = serde_json::from_value(json!({
        "state": "on",
        "attributes": { "effect": "rainbow", "effect_list": ["rainbow"] },
    }))
    .unwrap();
    snapshot.insert("light.kitchen", record.clone());
    snapshot.insert("light.bedroom", record);
    card.set_hass(Arc::new(Hass::new(snapshot)));

    card.render();
    assert_eq!(events.try_recv().unwrap(), CardEvent::TranslationsUpdated);

    // Rebinding to an entity that reports the same effect string still
    // re-fires the refresh signal: the displayed effect was reset.
    card.set_config(json!({
        "type": "custom:lighteffect-card",
        "entity": "light.bedroom",
    }))
    .unwrap();
    assert_eq!(card.displayed_effect(), "");

    card.render();
    assert_eq!(card.displayed_effect(), "rainbow");
    assert_eq!(events.try_recv().unwrap(), CardEvent::TranslationsUpdated);
}

#[test]
fn test_stub_config_picks_first_light_entity() {
    let mut snapshot = Snapshot::new();
    snapshot.insert("fan.attic", EntityRecord::new("on"));
    snapshot.insert("light.kitchen", EntityRecord::new("on"));
    snapshot.insert("light.bedroom", EntityRecord::new("off"));
    let hass = Hass::new(snapshot);

    let stub = LightEffectCard::stub_config(&hass);
    assert_eq!(stub.card_type, "custom:lighteffect-card");
    assert_eq!(stub.entity.as_deref(), Some("light.bedroom"));

    // And it round-trips through validation.
    let value = serde_json::to_value(&stub).unwrap();
    CardConfig::from_value(value).unwrap();

    // No matching entity leaves the stub unbound.
    let mut snapshot = Snapshot::new();
    snapshot.insert("fan.attic", EntityRecord::new("on"));
    let stub = LightEffectCard::stub_config(&Hass::new(snapshot));
    assert_eq!(stub.entity, None);
}
