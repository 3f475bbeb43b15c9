pub mod anchor;
pub mod catalog;
pub mod roster;
pub mod settings;
pub mod telemetry;
pub mod timer;

// Re-exports for convenience
pub use anchor::{AnchorState, TargetWindow, WindowAnchor, WindowProbe};
pub use catalog::SpellCatalog;
pub use roster::{Roster, RosterEntry, SpellSlot};
pub use settings::Settings;
pub use telemetry::{GameSnapshot, TelemetryPoller};
pub use timer::SpellTimer;
