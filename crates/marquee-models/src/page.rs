use serde::{Deserialize, Serialize};

use crate::media::Title;

/// One normalized page of list results. `current_page <= total_pages` holds
/// whenever `total_pages > 0`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageResult {
    pub items: Vec<Title>,
    pub current_page: u32,
    pub total_pages: u32,
}

impl PageResult {
    /// The result of a query that never reached the remote service
    /// (e.g. an empty search string).
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            total_pages: 0,
        }
    }

    pub fn is_last(&self) -> bool {
        self.total_pages == 0 || self.current_page >= self.total_pages
    }
}
