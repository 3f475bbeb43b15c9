//! Cooldown countdown state machine
//!
//! A [`SpellTimer`] owns the countdown for one summoner spell slot. It is a
//! pure state machine: the owning event loop drives it with `tick()` once per
//! wall-clock second, and user input maps to `activate`/`deduct`/`reset`.
//!
//! Conflict resolution with the polled feed is deliberate: while a countdown
//! is running, the locally observed state wins. Authoritative cooldown values
//! only land through [`SpellTimer::update_base_cooldown`], which is a no-op
//! unless the timer is idle.

mod spell_timer;

#[cfg(test)]
mod spell_timer_tests;

pub use spell_timer::SpellTimer;
