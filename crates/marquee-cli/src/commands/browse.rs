use crate::output::Output;
use color_eyre::Result;
use marquee_core::TitleFeed;
use marquee_models::current_year;

/// Apply any filter flags to the persisted store, then walk the feed.
pub async fn run_browse(
    query: Option<String>,
    genre: Option<u64>,
    from: Option<u16>,
    to: Option<u16>,
    pages: u32,
    clear: bool,
    output: &Output,
) -> Result<()> {
    let mut store = super::open_store()?;

    if clear {
        store.clear_filters();
    }

    if let Some(query) = query {
        store.set_search_query(query);
    }

    if let Some(genre_id) = genre {
        if !store.filters().selected_genres.contains(&genre_id) {
            store.toggle_genre(genre_id);
        }
    }

    if from.is_some() || to.is_some() {
        let range = (
            from.unwrap_or(store.filters().year_range.0),
            to.unwrap_or(store.filters().year_range.1),
        );
        if range.0 > range.1 {
            return Err(color_eyre::eyre::eyre!(
                "Invalid year range: {} > {}",
                range.0,
                range.1
            ));
        }
        if range.1 > current_year() {
            output.warn(format!("Year range reaches past {}", current_year()));
        }
        store.set_year_range(range);
    }

    let client = super::load_client()?;
    let mut feed = TitleFeed::from_filters(store.filters());

    for _ in 0..pages.max(1) {
        if !feed.fetch_next(&client).await {
            if let Some(e) = feed.error() {
                return Err(color_eyre::eyre::eyre!("Fetch failed: {}", e));
            }
            // No more pages
            break;
        }
    }

    if feed.items().is_empty() {
        output.info("No titles matched the current filters");
        return Ok(());
    }

    output.title_list(feed.items());
    if feed.has_more() {
        output.info(format!(
            "{} titles shown; more available (rerun with --pages)",
            feed.items().len()
        ));
    }
    Ok(())
}
