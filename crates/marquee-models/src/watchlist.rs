use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::media::Title;

/// A saved title. The snapshot is taken at the time of adding and is not
/// refreshed against the remote service afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistEntry {
    #[serde(flatten)]
    pub title: Title,
    pub added_at: DateTime<Utc>,
}

impl WatchlistEntry {
    pub fn new(title: Title) -> Self {
        Self {
            title,
            added_at: Utc::now(),
        }
    }

    pub fn id(&self) -> u64 {
        self.title.id
    }
}
