use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_START_YEAR: u16 = 1900;

/// Current calendar year, used as the default upper bound of the year range.
pub fn current_year() -> u16 {
    Utc::now().year() as u16
}

/// Active filter criteria. Selected genres/actors have set semantics
/// (toggling is symmetric difference); insertion order is irrelevant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterState {
    pub search_query: String,
    pub selected_genres: Vec<u64>,
    pub selected_actors: Vec<String>,
    pub year_range: (u16, u16),
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            selected_genres: Vec::new(),
            selected_actors: Vec::new(),
            year_range: (DEFAULT_START_YEAR, current_year()),
        }
    }
}

impl FilterState {
    /// Present → remove, absent → add.
    pub fn toggle_genre(&mut self, genre_id: u64) {
        if let Some(pos) = self.selected_genres.iter().position(|&id| id == genre_id) {
            self.selected_genres.remove(pos);
        } else {
            self.selected_genres.push(genre_id);
        }
    }

    pub fn toggle_actor(&mut self, actor_id: &str) {
        if let Some(pos) = self.selected_actors.iter().position(|id| id == actor_id) {
            self.selected_actors.remove(pos);
        } else {
            self.selected_actors.push(actor_id.to_string());
        }
    }
}

/// Which fetch mode the active filters select. Precedence: a nonempty search
/// query wins over selected genres; only the first selected genre is used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BrowseMode {
    Search(String),
    Genre(u64),
    Discover,
}

impl BrowseMode {
    pub fn from_filters(filters: &FilterState) -> Self {
        if !filters.search_query.trim().is_empty() {
            BrowseMode::Search(filters.search_query.clone())
        } else if let Some(&genre_id) = filters.selected_genres.first() {
            BrowseMode::Genre(genre_id)
        } else {
            BrowseMode::Discover
        }
    }
}
