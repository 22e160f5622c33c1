//! Transform adapters from the upstream API shape into UI-facing records.

pub(crate) mod medicine;
