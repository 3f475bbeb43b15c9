//! Live-client telemetry: snapshot models and the polling task
//!
//! The game client exposes a pull-only local HTTPS endpoint. The poller
//! fetches one snapshot per second with a hard request timeout and hands the
//! parsed document to the owning event loop over a channel. Failures are a
//! silent skip: before a match starts and after it ends the endpoint simply
//! is not there, which is the expected steady state rather than an error.

mod poller;
mod snapshot;

pub use poller::{FetchError, TelemetryPoller, DEFAULT_ENDPOINT};
pub use snapshot::{
    ActivePlayer, GameSnapshot, ParticipantRecord, SlotCooldowns, SpellSlotRecord, SummonerSpells,
};
