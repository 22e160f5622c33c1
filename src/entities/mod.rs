//! Domain records held in per-session UI state.

pub(crate) mod medicine;
