use crate::output::Output;
use color_eyre::Result;
use marquee_models::MediaType;
use serde_json::json;

pub async fn run_trending(tv: bool, output: &Output) -> Result<()> {
    let client = super::load_client()?;
    let media_type = if tv { MediaType::Tv } else { MediaType::Movie };

    let page = client
        .trending(media_type, 1)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to fetch trending titles: {}", e))?;

    output.title_list(&page.items);
    Ok(())
}

pub async fn run_genres(output: &Output) -> Result<()> {
    let client = super::load_client()?;
    let genres = client
        .genres()
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to fetch genre catalog: {}", e))?;

    output.genre_list(&genres);
    Ok(())
}

pub async fn run_person(person_id: u64, output: &Output) -> Result<()> {
    let client = super::load_client()?;

    let person = client
        .person(person_id)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to fetch person {}: {}", person_id, e))?;
    let movies = client
        .person_movie_credits(person_id)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to fetch credits for {}: {}", person_id, e))?;

    if output.is_human() {
        output.info(format!("{} (id {})", person.name, person.id));
        if let Some(department) = person.known_for_department.as_deref() {
            output.info(format!("Known for: {}", department));
        }
        if let Some(birthday) = person.birthday.as_deref() {
            output.info(format!("Born: {}", birthday));
        }
        if !person.biography.is_empty() {
            output.info("");
            output.info(&person.biography);
        }
        output.info("");
        output.title_list(&movies);
    } else {
        output.json(&json!({
            "type": "person",
            "person": serde_json::to_value(&person).unwrap_or_default(),
            "movies": serde_json::to_value(&movies).unwrap_or_default(),
        }));
    }
    Ok(())
}
