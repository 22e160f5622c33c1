//! Output renderers: the raw JSON dump and the prescription PDF.

pub(crate) mod json;
pub(crate) mod pdf;
