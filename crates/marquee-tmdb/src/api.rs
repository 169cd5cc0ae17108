use marquee_models::{
    CastMember, Genre, MediaType, PageResult, Person, ProductionCompany, Title, TitleDetails,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::TmdbError;

#[derive(Debug, Deserialize)]
struct ListPage<T> {
    page: u32,
    total_pages: u32,
    #[serde(default)]
    results: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
struct MovieRecord {
    id: u64,
    title: String,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    #[serde(default)]
    overview: String,
    release_date: Option<String>,
    #[serde(default)]
    vote_average: f64,
    #[serde(default)]
    vote_count: u64,
    #[serde(default)]
    genre_ids: Vec<u64>,
    original_language: Option<String>,
    #[serde(default)]
    popularity: f64,
}

impl MovieRecord {
    fn into_title(self) -> Title {
        Title {
            id: self.id,
            title: self.title,
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            overview: self.overview,
            release_date: self.release_date,
            vote_average: self.vote_average,
            vote_count: self.vote_count,
            genre_ids: self.genre_ids,
            original_language: self.original_language,
            popularity: self.popularity,
            media_type: MediaType::Movie,
        }
    }
}

// Series list records use "name" and "first_air_date" where movies use
// "title" and "release_date".
#[derive(Debug, Default, Deserialize)]
struct ShowRecord {
    id: u64,
    name: String,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    #[serde(default)]
    overview: String,
    #[serde(rename = "first_air_date")]
    first_air_date: Option<String>,
    #[serde(default)]
    vote_average: f64,
    #[serde(default)]
    vote_count: u64,
    #[serde(default)]
    genre_ids: Vec<u64>,
    original_language: Option<String>,
    #[serde(default)]
    popularity: f64,
}

impl ShowRecord {
    fn into_title(self) -> Title {
        Title {
            id: self.id,
            title: self.name,
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            overview: self.overview,
            release_date: self.first_air_date,
            vote_average: self.vote_average,
            vote_count: self.vote_count,
            genre_ids: self.genre_ids,
            original_language: self.original_language,
            popularity: self.popularity,
            media_type: MediaType::Tv,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MovieDetailsRecord {
    id: u64,
    title: String,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    #[serde(default)]
    overview: String,
    release_date: Option<String>,
    #[serde(default)]
    vote_average: f64,
    #[serde(default)]
    vote_count: u64,
    #[serde(default)]
    genres: Vec<Genre>,
    original_language: Option<String>,
    #[serde(default)]
    popularity: f64,
    runtime: Option<u32>,
    tagline: Option<String>,
    status: Option<String>,
    #[serde(default)]
    budget: u64,
    #[serde(default)]
    revenue: u64,
    #[serde(default)]
    production_companies: Vec<ProductionCompany>,
}

impl MovieDetailsRecord {
    fn into_details(self) -> TitleDetails {
        let genre_ids = self.genres.iter().map(|g| g.id).collect();
        TitleDetails {
            title: Title {
                id: self.id,
                title: self.title,
                poster_path: self.poster_path,
                backdrop_path: self.backdrop_path,
                overview: self.overview,
                release_date: self.release_date,
                vote_average: self.vote_average,
                vote_count: self.vote_count,
                genre_ids,
                original_language: self.original_language,
                popularity: self.popularity,
                media_type: MediaType::Movie,
            },
            genres: self.genres,
            runtime_minutes: self.runtime.unwrap_or(0),
            tagline: self.tagline,
            status: self.status,
            budget: self.budget,
            revenue: self.revenue,
            production_companies: self.production_companies,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ShowDetailsRecord {
    id: u64,
    name: String,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    #[serde(default)]
    overview: String,
    #[serde(rename = "first_air_date")]
    first_air_date: Option<String>,
    #[serde(default)]
    vote_average: f64,
    #[serde(default)]
    vote_count: u64,
    #[serde(default)]
    genres: Vec<Genre>,
    original_language: Option<String>,
    #[serde(default)]
    popularity: f64,
    /// Per-episode runtimes; the first entry stands in for the movie runtime
    #[serde(default)]
    episode_run_time: Vec<u32>,
    tagline: Option<String>,
    status: Option<String>,
    #[serde(default)]
    production_companies: Vec<ProductionCompany>,
}

impl ShowDetailsRecord {
    fn into_details(self) -> TitleDetails {
        let genre_ids = self.genres.iter().map(|g| g.id).collect();
        let runtime_minutes = self.episode_run_time.first().copied().unwrap_or(0);
        TitleDetails {
            title: Title {
                id: self.id,
                title: self.name,
                poster_path: self.poster_path,
                backdrop_path: self.backdrop_path,
                overview: self.overview,
                release_date: self.first_air_date,
                vote_average: self.vote_average,
                vote_count: self.vote_count,
                genre_ids,
                original_language: self.original_language,
                popularity: self.popularity,
                media_type: MediaType::Tv,
            },
            genres: self.genres,
            runtime_minutes,
            tagline: self.tagline,
            status: self.status,
            budget: 0,
            revenue: 0,
            production_companies: self.production_companies,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreditsResponse {
    #[serde(default)]
    cast: Vec<CastMember>,
}

#[derive(Debug, Deserialize)]
struct GenreCatalog {
    genres: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
struct PersonMovieCredits {
    #[serde(default)]
    cast: Vec<MovieRecord>,
}

async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, TmdbError> {
    debug!("GET {}", redact_api_key(url));
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(TmdbError::status(status, body));
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

fn redact_api_key(url: &str) -> String {
    match url.split_once("api_key=") {
        Some((head, tail)) => {
            let rest = tail.split_once('&').map(|(_, r)| r).unwrap_or("");
            if rest.is_empty() {
                format!("{}api_key=***", head)
            } else {
                format!("{}api_key=***&{}", head, rest)
            }
        }
        None => url.to_string(),
    }
}

fn date_bounds(year_range: (u16, u16)) -> (String, String) {
    (
        format!("{:04}-01-01", year_range.0),
        format!("{:04}-12-31", year_range.1),
    )
}

fn into_page<T>(page: ListPage<T>, map: impl Fn(T) -> Title) -> PageResult {
    PageResult {
        items: page.results.into_iter().map(map).collect(),
        current_page: page.page,
        total_pages: page.total_pages,
    }
}

/// Weekly/daily trending titles for one media type.
pub async fn trending(
    client: &Client,
    base_url: &str,
    api_key: &str,
    media_type: MediaType,
    window: &str,
    page: u32,
) -> Result<PageResult, TmdbError> {
    let url = format!(
        "{}/trending/{}/{}?api_key={}&page={}",
        base_url,
        media_type.as_str(),
        window,
        api_key,
        page
    );

    match media_type {
        MediaType::Movie => {
            let list: ListPage<MovieRecord> = get_json(client, &url).await?;
            Ok(into_page(list, MovieRecord::into_title))
        }
        MediaType::Tv => {
            let list: ListPage<ShowRecord> = get_json(client, &url).await?;
            Ok(into_page(list, ShowRecord::into_title))
        }
    }
}

/// Popularity-sorted discovery within the release-year bounds.
pub async fn discover(
    client: &Client,
    base_url: &str,
    api_key: &str,
    page: u32,
    year_range: (u16, u16),
) -> Result<PageResult, TmdbError> {
    let (from, to) = date_bounds(year_range);
    let url = format!(
        "{}/discover/movie?api_key={}&sort_by=popularity.desc&primary_release_date.gte={}&primary_release_date.lte={}&page={}",
        base_url, api_key, from, to, page
    );
    let list: ListPage<MovieRecord> = get_json(client, &url).await?;
    Ok(into_page(list, MovieRecord::into_title))
}

pub async fn discover_by_genre(
    client: &Client,
    base_url: &str,
    api_key: &str,
    genre_id: u64,
    page: u32,
    year_range: (u16, u16),
) -> Result<PageResult, TmdbError> {
    let (from, to) = date_bounds(year_range);
    let url = format!(
        "{}/discover/movie?api_key={}&with_genres={}&primary_release_date.gte={}&primary_release_date.lte={}&page={}",
        base_url, api_key, genre_id, from, to, page
    );
    let list: ListPage<MovieRecord> = get_json(client, &url).await?;
    Ok(into_page(list, MovieRecord::into_title))
}

/// Full-text search within the release-year bounds. An empty or
/// whitespace-only query short-circuits to an empty page without
/// contacting the remote service.
pub async fn search(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
    page: u32,
    year_range: (u16, u16),
) -> Result<PageResult, TmdbError> {
    if query.trim().is_empty() {
        return Ok(PageResult::empty());
    }

    let (from, to) = date_bounds(year_range);
    let url = format!(
        "{}/search/movie?api_key={}&query={}&primary_release_date.gte={}&primary_release_date.lte={}&page={}",
        base_url,
        api_key,
        urlencoding::encode(query),
        from,
        to,
        page
    );
    let list: ListPage<MovieRecord> = get_json(client, &url).await?;
    Ok(into_page(list, MovieRecord::into_title))
}

pub async fn movie_details(
    client: &Client,
    base_url: &str,
    api_key: &str,
    movie_id: u64,
) -> Result<TitleDetails, TmdbError> {
    let url = format!("{}/movie/{}?api_key={}", base_url, movie_id, api_key);
    let record: MovieDetailsRecord = get_json(client, &url).await?;
    Ok(record.into_details())
}

pub async fn series_details(
    client: &Client,
    base_url: &str,
    api_key: &str,
    series_id: u64,
) -> Result<TitleDetails, TmdbError> {
    let url = format!("{}/tv/{}?api_key={}", base_url, series_id, api_key);
    let record: ShowDetailsRecord = get_json(client, &url).await?;
    Ok(record.into_details())
}

pub async fn movie_credits(
    client: &Client,
    base_url: &str,
    api_key: &str,
    movie_id: u64,
) -> Result<Vec<CastMember>, TmdbError> {
    let url = format!("{}/movie/{}/credits?api_key={}", base_url, movie_id, api_key);
    let credits: CreditsResponse = get_json(client, &url).await?;
    Ok(credits.cast)
}

pub async fn series_credits(
    client: &Client,
    base_url: &str,
    api_key: &str,
    series_id: u64,
) -> Result<Vec<CastMember>, TmdbError> {
    let url = format!("{}/tv/{}/credits?api_key={}", base_url, series_id, api_key);
    let credits: CreditsResponse = get_json(client, &url).await?;
    Ok(credits.cast)
}

pub async fn genre_catalog(
    client: &Client,
    base_url: &str,
    api_key: &str,
) -> Result<Vec<Genre>, TmdbError> {
    let url = format!("{}/genre/movie/list?api_key={}", base_url, api_key);
    let catalog: GenreCatalog = get_json(client, &url).await?;
    Ok(catalog.genres)
}

pub async fn person(
    client: &Client,
    base_url: &str,
    api_key: &str,
    person_id: u64,
) -> Result<Person, TmdbError> {
    let url = format!("{}/person/{}?api_key={}", base_url, person_id, api_key);
    get_json(client, &url).await
}

/// Movies the person appeared in, as list-shaped titles.
pub async fn person_movie_credits(
    client: &Client,
    base_url: &str,
    api_key: &str,
    person_id: u64,
) -> Result<Vec<Title>, TmdbError> {
    let url = format!(
        "{}/person/{}/movie_credits?api_key={}",
        base_url, person_id, api_key
    );
    let credits: PersonMovieCredits = get_json(client, &url).await?;
    Ok(credits
        .cast
        .into_iter()
        .map(MovieRecord::into_title)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_api_key() {
        assert_eq!(
            redact_api_key("https://x/movie?api_key=secret&page=1"),
            "https://x/movie?api_key=***&page=1"
        );
        assert_eq!(
            redact_api_key("https://x/movie?api_key=secret"),
            "https://x/movie?api_key=***"
        );
    }

    #[test]
    fn test_date_bounds() {
        let (from, to) = date_bounds((2000, 2005));
        assert_eq!(from, "2000-01-01");
        assert_eq!(to, "2005-12-31");
    }

    #[test]
    fn test_show_record_field_mapping() {
        let json = r#"{
            "id": 1399,
            "name": "Game of Thrones",
            "first_air_date": "2011-04-17",
            "vote_average": 8.4,
            "vote_count": 21000,
            "genre_ids": [10765, 18]
        }"#;
        let record: ShowRecord = serde_json::from_str(json).unwrap();
        let title = record.into_title();
        assert_eq!(title.title, "Game of Thrones");
        assert_eq!(title.release_date.as_deref(), Some("2011-04-17"));
        assert_eq!(title.media_type, MediaType::Tv);
    }

    #[test]
    fn test_show_details_runtime_defaults_to_zero() {
        let json = r#"{
            "id": 100,
            "name": "Some Show",
            "genres": [{"id": 18, "name": "Drama"}],
            "production_companies": []
        }"#;
        let record: ShowDetailsRecord = serde_json::from_str(json).unwrap();
        let details = record.into_details();
        assert_eq!(details.runtime_minutes, 0);
        assert_eq!(details.title.media_type, MediaType::Tv);
        assert_eq!(details.title.genre_ids, vec![18]);
    }

    #[test]
    fn test_show_details_runtime_takes_first_entry() {
        let json = r#"{
            "id": 100,
            "name": "Some Show",
            "episode_run_time": [55, 60],
            "genres": [],
            "production_companies": []
        }"#;
        let record: ShowDetailsRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.into_details().runtime_minutes, 55);
    }
}
