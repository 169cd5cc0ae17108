use crate::output::Output;
use color_eyre::Result;
use marquee_models::{MediaType, Title};
use serde_json::json;

pub async fn run_list(output: &Output) -> Result<()> {
    let store = super::open_store()?;

    if store.watchlist().is_empty() {
        output.info("Watchlist is empty");
        return Ok(());
    }

    let titles: Vec<Title> = store
        .watchlist()
        .iter()
        .map(|entry| entry.title.clone())
        .collect();
    output.title_list(&titles);
    Ok(())
}

/// Snapshot the title at the time of adding; the entry is never refreshed.
pub async fn run_add(id: u64, tv: bool, output: &Output) -> Result<()> {
    let mut store = super::open_store()?;
    if store.is_in_watchlist(id) {
        output.warn(format!("Title {} is already in the watchlist", id));
        return Ok(());
    }

    let client = super::load_client()?;
    let media_type = if tv { MediaType::Tv } else { MediaType::Movie };
    let details = client
        .title_details(media_type, id)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to fetch title {}: {}", id, e))?;

    let name = details.title.title.clone();
    store.add_to_watchlist(details.title);
    output.success(format!("Added \"{}\" to the watchlist", name));
    Ok(())
}

pub async fn run_remove(id: u64, output: &Output) -> Result<()> {
    let mut store = super::open_store()?;

    if !store.is_in_watchlist(id) {
        output.warn(format!("Title {} is not in the watchlist", id));
        return Ok(());
    }

    store.remove_from_watchlist(id);
    output.success(format!("Removed title {} from the watchlist", id));
    Ok(())
}

pub async fn run_recent(output: &Output) -> Result<()> {
    let store = super::open_store()?;

    if store.recently_viewed().is_empty() {
        output.info("No recently viewed titles");
        return Ok(());
    }

    if output.is_human() {
        for (index, id) in store.recently_viewed().iter().enumerate() {
            output.info(format!("{:>2}. {}", index + 1, id));
        }
    } else {
        output.json(&json!({
            "type": "recently_viewed",
            "ids": store.recently_viewed(),
        }));
    }
    Ok(())
}
