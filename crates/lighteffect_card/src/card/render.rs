//! Render-state enum and view payloads.
//!
//! The controller's update cycle produces exactly one [`Render`] value; the
//! host turns it into markup. `Failed` is the contained outcome of the Active
//! path, never a propagated error.

use serde::Serialize;

use super::config::StrictCardConfig;

/// Outcome of one update cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Render {
    /// Render nothing: no host context, no bound entity, or the entity is not
    /// in the snapshot.
    Suppressed,

    /// Render an empty container: the entity resolved but visibility policy
    /// hides the selector.
    Empty,

    /// Render the full card.
    Active(CardView),

    /// The Active path failed; a diagnostic placeholder renders in its place.
    Failed(DiagnosticCard),
}

/// Declarative payload for the Active state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    /// Header title, present only when configured non-empty.
    pub header: Option<String>,

    pub selector: EffectSelect,
}

/// The effect selection box: displayed value plus options in host order.
/// No reordering, no dedup; the host supplies a well-formed list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectSelect {
    pub label: String,
    pub value: String,
    pub options: Vec<String>,
}

/// Placeholder rendered when the Active path fails, carrying the error and
/// the configuration that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticCard {
    pub kind: String,
    pub error: String,
    pub orig_config: StrictCardConfig,
}

/// Host capability for presenting contained render failures.
///
/// The card depends only on this interface; [`ErrorCardRenderer`] is the
/// built-in presentation for hosts that do not supply their own.
pub trait DiagnosticRenderer: Send + Sync {
    fn present(&self, kind: &str, detail: &str, context: &StrictCardConfig) -> DiagnosticCard;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorCardRenderer;

impl DiagnosticRenderer for ErrorCardRenderer {
    fn present(&self, kind: &str, detail: &str, context: &StrictCardConfig) -> DiagnosticCard {
        DiagnosticCard {
            kind: kind.to_owned(),
            error: detail.to_owned(),
            orig_config: context.clone(),
        }
    }
}
