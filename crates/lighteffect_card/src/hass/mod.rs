mod context;
mod message;
mod state;

pub use context::DefaultLocalizer;
pub use context::Hass;
pub use context::Localize;
pub use message::CardEvent;
pub use message::CardEventReceiver;
pub use message::CardEventSender;
pub use message::HostCommand;
pub use message::HostCommandReceiver;
pub use message::HostCommandSender;
pub use state::AttributeError;
pub use state::EntityRecord;
pub use state::LifecycleState;
pub use state::Snapshot;
