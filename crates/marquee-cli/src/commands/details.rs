use crate::output::Output;
use color_eyre::Result;
use marquee_models::MediaType;

pub async fn run_details(id: u64, tv: bool, output: &Output) -> Result<()> {
    let client = super::load_client()?;
    let media_type = if tv { MediaType::Tv } else { MediaType::Movie };

    let details = client
        .title_details(media_type, id)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to fetch details for {}: {}", id, e))?;

    // Viewing a detail screen records the title in history
    let mut store = super::open_store()?;
    store.add_to_recently_viewed(id);

    output.title_details(&details);
    Ok(())
}

pub async fn run_credits(id: u64, tv: bool, output: &Output) -> Result<()> {
    let client = super::load_client()?;
    let media_type = if tv { MediaType::Tv } else { MediaType::Movie };

    let cast = client
        .credits(media_type, id)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to fetch credits for {}: {}", id, e))?;

    if cast.is_empty() {
        output.info("No cast information available");
        return Ok(());
    }
    output.cast_list(&cast);
    Ok(())
}
