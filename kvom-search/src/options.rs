use serde::{Deserialize, Serialize};

/// Page size used by [`Search::all`](crate::Search::all) when none is given.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Configuration for executing searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Results fetched per store round trip when collecting every match.
    pub page_size: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
