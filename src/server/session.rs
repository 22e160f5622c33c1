//! Per-session UI state.

use std::time::Instant;

use crate::entities::medicine::MedicineRecord;

pub(crate) const MIN_LIMIT: usize = 1;
pub(crate) const MAX_LIMIT: usize = 20;
pub(crate) const DEFAULT_LIMIT: usize = 5;

/// State surviving across the discrete UI events of one interaction: the last
/// query, the fetched record list, the selected index, and the rendered PDF.
///
/// Lives only in memory, keyed by a per-session id; nothing outlives the
/// process. `touched` orders entries for eviction once the session map hits
/// its cap.
#[derive(Debug)]
pub(crate) struct SessionContext {
    pub query: String,
    pub limit: usize,
    pub records: Vec<MedicineRecord>,
    pub selected: Option<usize>,
    pub pdf: Option<Vec<u8>>,
    pub touched: Instant,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            query: String::new(),
            limit: 0,
            records: Vec::new(),
            selected: None,
            pdf: None,
            touched: Instant::now(),
        }
    }
}

impl SessionContext {
    /// A new query supersedes the previous list: the selection and any
    /// generated prescription are cleared.
    pub(crate) fn reset_for_query(&mut self, query: &str, limit: usize, records: Vec<MedicineRecord>) {
        self.query = query.to_string();
        self.limit = limit;
        self.records = records;
        self.selected = None;
        self.pdf = None;
        self.touch();
    }

    pub(crate) fn touch(&mut self) {
        self.touched = Instant::now();
    }
}
