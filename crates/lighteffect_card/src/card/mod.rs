mod card;
mod config;
mod editor;
mod render;

/// Symbolic element type this card registers under.
pub const CARD_NAME: &str = "lighteffect-card";

/// Symbolic element type of the companion editor.
pub const CARD_EDITOR_NAME: &str = "lighteffect-card-editor";

/// `type` value in persisted configuration objects.
pub const CARD_TYPE: &str = "custom:lighteffect-card";

/// Entity domains this card accepts.
pub const LIGHT_DOMAINS: &[&str] = &["light"];

pub use card::descriptor;
pub use card::LightEffectCard;
pub use config::CardConfig;
pub use config::CardDefaults;
pub use config::ConfigError;
pub use config::StrictCardConfig;
pub use config::DEFAULT_HIDE_IF_NO_EFFECTS;
pub use config::DEFAULT_HIDE_IF_OFF;
pub use editor::FormField;
pub use editor::FormFieldView;
pub use editor::FormView;
pub use editor::LightEffectCardEditor;
pub use editor::Selector;
pub use render::CardView;
pub use render::DiagnosticCard;
pub use render::DiagnosticRenderer;
pub use render::EffectSelect;
pub use render::ErrorCardRenderer;
pub use render::Render;
