use serde::Serialize;

/// Brand label used when the upstream concept carries no synonym.
pub(crate) const UNKNOWN_BRAND: &str = "Unknown Brand";

/// One candidate medicine returned by a lookup.
///
/// Immutable once constructed from the lookup response; lives only in session
/// state for the duration of one interaction and is discarded when a new
/// lookup supersedes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct MedicineRecord {
    /// Canonical drug name.
    pub name: String,
    /// RxCUI identifier, unique within one lookup response.
    pub code: String,
    /// Brand or synonym display label.
    pub brand: String,
}

impl MedicineRecord {
    /// Composed label shown in the single-choice selection list.
    pub(crate) fn label(&self) -> String {
        format!("{} - {}", self.name, self.brand)
    }
}
