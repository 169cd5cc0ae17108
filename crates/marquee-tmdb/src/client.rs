use async_trait::async_trait;
use marquee_config::TmdbConfig;
use marquee_models::{
    BrowseMode, CastMember, Genre, MediaType, PageResult, Person, Title, TitleDetails,
};
use reqwest::Client;

use crate::api;
use crate::error::TmdbError;
use crate::traits::{PageQuery, TitleSource};

/// Thin client over the remote media service. Pure translation from domain
/// query parameters to normalized results; holds no query state.
#[derive(Clone)]
pub struct TmdbClient {
    http: Client,
    api_key: String,
    base_url: String,
    image_base_url: String,
    trending_window: String,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig) -> Self {
        Self {
            http: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            image_base_url: config.image_base_url.trim_end_matches('/').to_string(),
            trending_window: config.trending_window.clone(),
        }
    }

    pub async fn trending(&self, media_type: MediaType, page: u32) -> Result<PageResult, TmdbError> {
        api::trending(
            &self.http,
            &self.base_url,
            &self.api_key,
            media_type,
            &self.trending_window,
            page,
        )
        .await
    }

    pub async fn discover(&self, page: u32, year_range: (u16, u16)) -> Result<PageResult, TmdbError> {
        api::discover(&self.http, &self.base_url, &self.api_key, page, year_range).await
    }

    pub async fn discover_by_genre(
        &self,
        genre_id: u64,
        page: u32,
        year_range: (u16, u16),
    ) -> Result<PageResult, TmdbError> {
        api::discover_by_genre(
            &self.http,
            &self.base_url,
            &self.api_key,
            genre_id,
            page,
            year_range,
        )
        .await
    }

    pub async fn search(
        &self,
        query: &str,
        page: u32,
        year_range: (u16, u16),
    ) -> Result<PageResult, TmdbError> {
        api::search(
            &self.http,
            &self.base_url,
            &self.api_key,
            query,
            page,
            year_range,
        )
        .await
    }

    pub async fn title_details(
        &self,
        media_type: MediaType,
        id: u64,
    ) -> Result<TitleDetails, TmdbError> {
        match media_type {
            MediaType::Movie => {
                api::movie_details(&self.http, &self.base_url, &self.api_key, id).await
            }
            MediaType::Tv => {
                api::series_details(&self.http, &self.base_url, &self.api_key, id).await
            }
        }
    }

    pub async fn credits(
        &self,
        media_type: MediaType,
        id: u64,
    ) -> Result<Vec<CastMember>, TmdbError> {
        match media_type {
            MediaType::Movie => {
                api::movie_credits(&self.http, &self.base_url, &self.api_key, id).await
            }
            MediaType::Tv => {
                api::series_credits(&self.http, &self.base_url, &self.api_key, id).await
            }
        }
    }

    pub async fn genres(&self) -> Result<Vec<Genre>, TmdbError> {
        api::genre_catalog(&self.http, &self.base_url, &self.api_key).await
    }

    pub async fn person(&self, person_id: u64) -> Result<Person, TmdbError> {
        api::person(&self.http, &self.base_url, &self.api_key, person_id).await
    }

    pub async fn person_movie_credits(&self, person_id: u64) -> Result<Vec<Title>, TmdbError> {
        api::person_movie_credits(&self.http, &self.base_url, &self.api_key, person_id).await
    }

    /// CDN URL for a poster/backdrop path, or a placeholder when absent.
    pub fn image_url(&self, path: Option<&str>, size: &str) -> String {
        match path {
            Some(p) => format!("{}/{}{}", self.image_base_url, size, p),
            None => "/placeholder.svg".to_string(),
        }
    }
}

#[async_trait]
impl TitleSource for TmdbClient {
    async fn fetch_page(&self, query: &PageQuery) -> Result<PageResult, TmdbError> {
        match &query.mode {
            BrowseMode::Search(text) => self.search(text, query.page, query.year_range).await,
            BrowseMode::Genre(genre_id) => {
                self.discover_by_genre(*genre_id, query.page, query.year_range)
                    .await
            }
            BrowseMode::Discover => self.discover(query.page, query.year_range).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> TmdbClient {
        TmdbClient::new(&TmdbConfig {
            api_key: "test-key".to_string(),
            base_url: server.uri(),
            image_base_url: "https://image.tmdb.org/t/p".to_string(),
            trending_window: "week".to_string(),
        })
    }

    fn movie_json(id: u64, title: &str) -> serde_json::Value {
        json!({
            "id": id,
            "title": title,
            "poster_path": "/p.jpg",
            "backdrop_path": null,
            "overview": "",
            "release_date": "2004-06-01",
            "vote_average": 7.1,
            "vote_count": 100,
            "genre_ids": [28]
        })
    }

    #[tokio::test]
    async fn search_passes_year_bounds_and_only_hits_search_endpoint() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/movie"))
            .and(query_param("api_key", "test-key"))
            .and(query_param("query", "batman"))
            .and(query_param("primary_release_date.gte", "2000-01-01"))
            .and(query_param("primary_release_date.lte", "2005-12-31"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 1,
                "total_pages": 1,
                "results": [movie_json(268, "Batman")]
            })))
            .expect(1)
            .mount(&server)
            .await;

        // The discover adapter must never be consulted for a search query
        Mock::given(method("GET"))
            .and(path("/discover/movie"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 1, "total_pages": 1, "results": []
            })))
            .expect(0)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let query = PageQuery {
            mode: BrowseMode::Search("batman".to_string()),
            year_range: (2000, 2005),
            page: 1,
        };
        let page = client.fetch_page(&query).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "Batman");
        assert_eq!(page.items[0].media_type, MediaType::Movie);
    }

    #[tokio::test]
    async fn empty_search_short_circuits_without_request() {
        let server = MockServer::start().await;
        // No mocks mounted: any request would 404 and fail the fetch
        let client = test_client(&server);

        let page = client.search("   ", 1, (1900, 2024)).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn genre_mode_requests_discover_with_genre() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/discover/movie"))
            .and(query_param("with_genres", "28"))
            .and(query_param("page", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 3,
                "total_pages": 10,
                "results": [movie_json(1, "Die Hard")]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let query = PageQuery {
            mode: BrowseMode::Genre(28),
            year_range: (1900, 2024),
            page: 3,
        };
        let page = client.fetch_page(&query).await.unwrap();
        assert_eq!(page.current_page, 3);
        assert_eq!(page.total_pages, 10);
    }

    #[tokio::test]
    async fn trending_tv_maps_series_fields() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/trending/tv/week"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 1,
                "total_pages": 1,
                "results": [{
                    "id": 1399,
                    "name": "Game of Thrones",
                    "first_air_date": "2011-04-17",
                    "vote_average": 8.4,
                    "vote_count": 21000,
                    "genre_ids": [10765]
                }]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let page = client.trending(MediaType::Tv, 1).await.unwrap();
        assert_eq!(page.items[0].title, "Game of Thrones");
        assert_eq!(page.items[0].release_date.as_deref(), Some("2011-04-17"));
        assert_eq!(page.items[0].media_type, MediaType::Tv);
    }

    #[tokio::test]
    async fn series_details_without_runtime_yields_zero() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tv/100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 100,
                "name": "Some Show",
                "genres": [{"id": 18, "name": "Drama"}],
                "production_companies": []
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let details = client.title_details(MediaType::Tv, 100).await.unwrap();
        assert_eq!(details.runtime_minutes, 0);
        assert_eq!(details.title.title, "Some Show");
    }

    #[tokio::test]
    async fn remote_error_surfaces_status_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/movie/7"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.title_details(MediaType::Movie, 7).await.unwrap_err();
        match err {
            TmdbError::Status { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("Invalid API key"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[test]
    fn image_url_falls_back_to_placeholder() {
        let config = TmdbConfig {
            api_key: "k".to_string(),
            ..TmdbConfig::default()
        };
        let client = TmdbClient::new(&config);
        assert_eq!(
            client.image_url(Some("/abc.jpg"), "w500"),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
        assert_eq!(client.image_url(None, "original"), "/placeholder.svg");
    }
}
