use marquee_config::PathManager;
use marquee_models::{FilterState, Title, WatchlistEntry};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::store_storage::StoreStorage;

const RECENTLY_VIEWED_CAP: usize = 10;

/// The serializable store snapshot: filters, watchlist, recently-viewed
/// history, and the navigation flag.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreState {
    #[serde(default)]
    pub filters: FilterState,
    #[serde(default)]
    pub watchlist: Vec<WatchlistEntry>,
    #[serde(default)]
    pub recently_viewed: Vec<u64>,
    #[serde(default)]
    pub nav_open: bool,
    /// Bumped on every filter mutation so feed consumers can detect that
    /// their query key may have changed. Not persisted.
    #[serde(skip)]
    pub filter_generation: u64,
}

/// Single source of truth for user state. Every mutating operation persists
/// the whole snapshot; a failed write degrades to in-memory state for the
/// session and is only logged.
pub struct AppStore {
    state: StoreState,
    storage: StoreStorage,
}

impl AppStore {
    /// Rehydrate from the snapshot under the data directory.
    pub fn open(path_manager: &PathManager) -> Self {
        Self::with_storage(StoreStorage::new(path_manager.store_file()))
    }

    pub fn with_storage(storage: StoreStorage) -> Self {
        let state = storage.load();
        Self { state, storage }
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn filters(&self) -> &FilterState {
        &self.state.filters
    }

    pub fn filter_generation(&self) -> u64 {
        self.state.filter_generation
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.state.filters.search_query = query.into();
        self.filters_changed();
    }

    /// Ordering of the range is the caller's responsibility; the store does
    /// not clamp.
    pub fn set_year_range(&mut self, range: (u16, u16)) {
        self.state.filters.year_range = range;
        self.filters_changed();
    }

    pub fn toggle_genre(&mut self, genre_id: u64) {
        self.state.filters.toggle_genre(genre_id);
        self.filters_changed();
    }

    pub fn toggle_actor(&mut self, actor_id: &str) {
        self.state.filters.toggle_actor(actor_id);
        self.filters_changed();
    }

    pub fn clear_filters(&mut self) {
        self.state.filters = FilterState::default();
        self.filters_changed();
    }

    pub fn is_nav_open(&self) -> bool {
        self.state.nav_open
    }

    pub fn toggle_nav(&mut self) {
        self.state.nav_open = !self.state.nav_open;
        self.persist();
    }

    pub fn recently_viewed(&self) -> &[u64] {
        &self.state.recently_viewed
    }

    /// Move/push the id to the front, truncate to the cap.
    pub fn add_to_recently_viewed(&mut self, title_id: u64) {
        self.state.recently_viewed.retain(|&id| id != title_id);
        self.state.recently_viewed.insert(0, title_id);
        self.state.recently_viewed.truncate(RECENTLY_VIEWED_CAP);
        self.persist();
    }

    pub fn watchlist(&self) -> &[WatchlistEntry] {
        &self.state.watchlist
    }

    /// Insert a snapshot of the title if absent by id. Idempotent.
    pub fn add_to_watchlist(&mut self, title: Title) {
        if self.is_in_watchlist(title.id) {
            return;
        }
        self.state.watchlist.push(WatchlistEntry::new(title));
        self.persist();
    }

    /// Remove by id; no-op if absent.
    pub fn remove_from_watchlist(&mut self, title_id: u64) {
        let before = self.state.watchlist.len();
        self.state.watchlist.retain(|entry| entry.id() != title_id);
        if self.state.watchlist.len() != before {
            self.persist();
        }
    }

    pub fn is_in_watchlist(&self, title_id: u64) -> bool {
        self.state.watchlist.iter().any(|entry| entry.id() == title_id)
    }

    fn filters_changed(&mut self) {
        self.state.filter_generation = self.state.filter_generation.wrapping_add(1);
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(&self.state) {
            // Accepted risk: state degrades to in-memory only for this session
            warn!("Failed to persist store snapshot: {}", e);
        }
    }
}
