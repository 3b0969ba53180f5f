//! Generic structures, used by the engine but not specific to it.

pub mod luby;
pub mod minimal_pcg;
