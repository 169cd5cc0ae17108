use marquee_models::{BrowseMode, FilterState, PageResult, Title};
use marquee_tmdb::{PageQuery, TitleSource, TmdbError};
use tracing::{debug, warn};

/// Cache key for one accumulated list: fetch mode plus year bounds. Any
/// change of key invalidates everything fetched under the old key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub mode: BrowseMode,
    pub year_range: (u16, u16),
}

impl QueryKey {
    pub fn from_filters(filters: &FilterState) -> Self {
        Self {
            mode: BrowseMode::from_filters(filters),
            year_range: filters.year_range,
        }
    }
}

/// Receipt for one in-flight page fetch. Carries the generation the feed had
/// when the fetch started so late responses from a superseded key are
/// discarded on apply.
#[derive(Debug)]
pub struct PageTicket {
    query: PageQuery,
    generation: u64,
}

impl PageTicket {
    pub fn query(&self) -> &PageQuery {
        &self.query
    }
}

/// Accumulates pages for one query key into a flat, fetch-ordered title
/// list. At most one request is in flight at a time; page N+1 is never
/// requested before page N has been applied.
pub struct TitleFeed {
    key: QueryKey,
    items: Vec<Title>,
    next_page: u32,
    total_pages: Option<u32>,
    in_flight: bool,
    generation: u64,
    error: Option<TmdbError>,
}

impl TitleFeed {
    pub fn new(key: QueryKey) -> Self {
        Self {
            key,
            items: Vec::new(),
            next_page: 1,
            total_pages: None,
            in_flight: false,
            generation: 0,
            error: None,
        }
    }

    pub fn from_filters(filters: &FilterState) -> Self {
        Self::new(QueryKey::from_filters(filters))
    }

    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// Re-derive the key from the filters; a changed key resets the feed.
    pub fn sync_filters(&mut self, filters: &FilterState) {
        self.set_key(QueryKey::from_filters(filters));
    }

    pub fn set_key(&mut self, key: QueryKey) {
        if key != self.key {
            debug!("Query key changed, resetting feed: {:?}", key);
            self.key = key;
            self.reset();
        }
    }

    fn reset(&mut self) {
        self.items.clear();
        self.next_page = 1;
        self.total_pages = None;
        self.in_flight = false;
        self.error = None;
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn items(&self) -> &[Title] {
        &self.items
    }

    /// True until the last fetched page reported itself final. Before the
    /// first page arrives this is optimistically true.
    pub fn has_more(&self) -> bool {
        match self.total_pages {
            None => true,
            Some(0) => false,
            Some(total) => self.next_page <= total,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight && self.items.is_empty()
    }

    pub fn is_fetching_more(&self) -> bool {
        self.in_flight && !self.items.is_empty()
    }

    pub fn error(&self) -> Option<&TmdbError> {
        self.error.as_ref()
    }

    /// Start the next page fetch. Returns None while a fetch is in flight or
    /// once the last page has been reached (a silent boundary, not an
    /// error).
    pub fn begin_fetch(&mut self) -> Option<PageTicket> {
        if self.in_flight || !self.has_more() {
            return None;
        }

        self.in_flight = true;
        self.error = None;
        Some(PageTicket {
            query: PageQuery {
                mode: self.key.mode.clone(),
                year_range: self.key.year_range,
                page: self.next_page,
            },
            generation: self.generation,
        })
    }

    /// Apply the outcome of a fetch started with [`Self::begin_fetch`]. A
    /// response from a superseded key (the feed was rekeyed while the fetch
    /// was in flight) is discarded.
    pub fn apply_page(&mut self, ticket: PageTicket, result: Result<PageResult, TmdbError>) {
        if ticket.generation != self.generation {
            debug!(
                "Discarding stale page {} for superseded query key",
                ticket.query.page
            );
            return;
        }

        self.in_flight = false;
        match result {
            Ok(page) => {
                debug!(
                    "Applied page {}/{} ({} items)",
                    page.current_page,
                    page.total_pages,
                    page.items.len()
                );
                self.items.extend(page.items);
                self.total_pages = Some(page.total_pages);
                self.next_page = page.current_page.saturating_add(1);
            }
            Err(e) => {
                warn!("Page fetch failed: {}", e);
                self.error = Some(e);
            }
        }
    }

    /// Fetch and apply the next page from the source. Returns true when a
    /// page was appended; false on the no-more-pages boundary or on error
    /// (inspect [`Self::error`]).
    pub async fn fetch_next<S>(&mut self, source: &S) -> bool
    where
        S: TitleSource + ?Sized,
    {
        let Some(ticket) = self.begin_fetch() else {
            return false;
        };
        let result = source.fetch_page(ticket.query()).await;
        let fetched = result.is_ok();
        self.apply_page(ticket, result);
        fetched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use marquee_models::MediaType;
    use std::sync::Mutex;

    fn make_title(id: u64) -> Title {
        Title {
            id,
            title: format!("Title {}", id),
            poster_path: None,
            backdrop_path: None,
            overview: String::new(),
            release_date: None,
            vote_average: 7.0,
            vote_count: 10,
            genre_ids: Vec::new(),
            original_language: None,
            popularity: 1.0,
            media_type: MediaType::Movie,
        }
    }

    /// Serves deterministic pages: page N holds the single title with
    /// id N*100, and records every query it sees.
    struct ScriptedSource {
        total_pages: u32,
        log: Mutex<Vec<PageQuery>>,
    }

    impl ScriptedSource {
        fn new(total_pages: u32) -> Self {
            Self {
                total_pages,
                log: Mutex::new(Vec::new()),
            }
        }

        fn request_count(&self) -> usize {
            self.log.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TitleSource for ScriptedSource {
        async fn fetch_page(&self, query: &PageQuery) -> Result<PageResult, TmdbError> {
            self.log.lock().unwrap().push(query.clone());
            Ok(PageResult {
                items: vec![make_title(query.page as u64 * 100)],
                current_page: query.page,
                total_pages: self.total_pages,
            })
        }
    }

    struct FailingSource;

    #[async_trait]
    impl TitleSource for FailingSource {
        async fn fetch_page(&self, _query: &PageQuery) -> Result<PageResult, TmdbError> {
            Err(TmdbError::Status {
                status: 500,
                body: "boom".to_string(),
            })
        }
    }

    fn discover_feed() -> TitleFeed {
        TitleFeed::from_filters(&FilterState::default())
    }

    #[tokio::test]
    async fn walks_all_pages_in_order_then_stops() {
        let source = ScriptedSource::new(5);
        let mut feed = discover_feed();

        assert!(feed.fetch_next(&source).await);
        assert!(feed.has_more());
        for _ in 0..4 {
            assert!(feed.fetch_next(&source).await);
        }

        let ids: Vec<u64> = feed.items().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![100, 200, 300, 400, 500]);
        assert!(!feed.has_more());

        // Boundary: a further fetch is a silent no-op, no request is made
        assert!(!feed.fetch_next(&source).await);
        assert_eq!(source.request_count(), 5);
        assert!(feed.error().is_none());
    }

    #[tokio::test]
    async fn key_change_resets_accumulated_list() {
        let source = ScriptedSource::new(5);
        let mut filters = FilterState::default();
        let mut feed = TitleFeed::from_filters(&filters);

        feed.fetch_next(&source).await;
        assert_eq!(feed.items().len(), 1);

        filters.search_query = "batman".to_string();
        feed.sync_filters(&filters);

        // Reset happens before any new page arrives
        assert!(feed.items().is_empty());
        assert!(feed.has_more());
        assert!(!feed.is_loading());
    }

    #[tokio::test]
    async fn unchanged_filters_do_not_reset() {
        let source = ScriptedSource::new(5);
        let filters = FilterState::default();
        let mut feed = TitleFeed::from_filters(&filters);

        feed.fetch_next(&source).await;
        feed.sync_filters(&filters);
        assert_eq!(feed.items().len(), 1);
    }

    #[test]
    fn stale_response_is_discarded_after_rekey() {
        let mut filters = FilterState::default();
        let mut feed = TitleFeed::from_filters(&filters);

        let ticket = feed.begin_fetch().unwrap();

        // Filters change while the request is in flight
        filters.search_query = "dune".to_string();
        feed.sync_filters(&filters);

        feed.apply_page(
            ticket,
            Ok(PageResult {
                items: vec![make_title(1)],
                current_page: 1,
                total_pages: 9,
            }),
        );

        assert!(feed.items().is_empty());
        assert!(!feed.is_loading());

        // The new key starts cleanly at page 1
        let ticket = feed.begin_fetch().unwrap();
        assert_eq!(ticket.query().page, 1);
        assert_eq!(
            ticket.query().mode,
            BrowseMode::Search("dune".to_string())
        );
    }

    #[test]
    fn only_one_fetch_in_flight_per_key() {
        let mut feed = discover_feed();

        let first = feed.begin_fetch();
        assert!(first.is_some());
        assert!(feed.begin_fetch().is_none());

        feed.apply_page(
            first.unwrap(),
            Ok(PageResult {
                items: vec![make_title(1)],
                current_page: 1,
                total_pages: 3,
            }),
        );
        // Next page may start only after the previous one was applied
        let second = feed.begin_fetch().unwrap();
        assert_eq!(second.query().page, 2);
    }

    #[tokio::test]
    async fn fetch_error_is_surfaced_and_retryable() {
        let mut feed = discover_feed();

        assert!(!feed.fetch_next(&FailingSource).await);
        assert!(feed.error().is_some());
        assert!(feed.items().is_empty());

        // The next attempt is the retry affordance; it clears the error
        let source = ScriptedSource::new(1);
        assert!(feed.fetch_next(&source).await);
        assert!(feed.error().is_none());
        assert_eq!(feed.items().len(), 1);
    }

    #[test]
    fn empty_result_set_has_no_more_pages() {
        let mut feed = discover_feed();
        let ticket = feed.begin_fetch().unwrap();
        feed.apply_page(ticket, Ok(PageResult::empty()));

        assert!(!feed.has_more());
        assert!(feed.begin_fetch().is_none());
    }

    #[test]
    fn loading_signals_distinguish_first_page_from_more() {
        let mut feed = discover_feed();

        let ticket = feed.begin_fetch().unwrap();
        assert!(feed.is_loading());
        assert!(!feed.is_fetching_more());

        feed.apply_page(
            ticket,
            Ok(PageResult {
                items: vec![make_title(1)],
                current_page: 1,
                total_pages: 2,
            }),
        );
        assert!(!feed.is_loading());

        let _ticket = feed.begin_fetch().unwrap();
        assert!(!feed.is_loading());
        assert!(feed.is_fetching_more());
    }

    #[tokio::test]
    async fn year_range_is_part_of_the_key() {
        let source = ScriptedSource::new(3);
        let mut filters = FilterState::default();
        let mut feed = TitleFeed::from_filters(&filters);

        feed.fetch_next(&source).await;
        filters.year_range = (2000, 2005);
        feed.sync_filters(&filters);

        assert!(feed.items().is_empty());
        feed.fetch_next(&source).await;
        let logged = source.log.lock().unwrap();
        assert_eq!(logged.last().unwrap().year_range, (2000, 2005));
        assert_eq!(logged.last().unwrap().page, 1);
    }
}
