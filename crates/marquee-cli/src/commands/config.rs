use crate::output::Output;
use color_eyre::eyre::Context;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use marquee_config::{Config, PathManager};
use serde_json::json;

pub async fn run_show(output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    let config =
        Config::load_or_default(&config_file).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    if let Err(e) = config.validate() {
        output.error(format!("Configuration is not usable yet: {}", e));
    }

    let api_key_display = if config.tmdb.api_key.is_empty() {
        "(not set)".to_string()
    } else {
        redact(&config.tmdb.api_key)
    };

    if output.is_human() {
        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
        table.add_row(vec![
            Cell::new("Config file").add_attribute(comfy_table::Attribute::Bold),
            Cell::new(config_file.display()),
        ]);
        table.add_row(vec![
            Cell::new("Store file").add_attribute(comfy_table::Attribute::Bold),
            Cell::new(path_manager.store_file().display()),
        ]);
        table.add_row(vec![
            Cell::new("API key").add_attribute(comfy_table::Attribute::Bold),
            Cell::new(api_key_display),
        ]);
        table.add_row(vec![
            Cell::new("Base URL").add_attribute(comfy_table::Attribute::Bold),
            Cell::new(&config.tmdb.base_url),
        ]);
        table.add_row(vec![
            Cell::new("Image base URL").add_attribute(comfy_table::Attribute::Bold),
            Cell::new(&config.tmdb.image_base_url),
        ]);
        table.add_row(vec![
            Cell::new("Trending window").add_attribute(comfy_table::Attribute::Bold),
            Cell::new(&config.tmdb.trending_window),
        ]);
        println!("{}", table);
    } else {
        output.json(&json!({
            "type": "config",
            "config_file": config_file.display().to_string(),
            "store_file": path_manager.store_file().display().to_string(),
            "api_key": api_key_display,
            "base_url": config.tmdb.base_url,
            "image_base_url": config.tmdb.image_base_url,
            "trending_window": config.tmdb.trending_window,
        }));
    }
    Ok(())
}

/// Write a starter config file unless one already exists.
pub async fn run_init(output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    let config_file = path_manager.config_file();

    if config_file.exists() {
        output.warn(format!(
            "Config file already exists at {}",
            config_file.display()
        ));
        return Ok(());
    }

    let mut config = Config::default();
    config.tmdb.api_key = "YOUR_API_KEY".to_string();
    config
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))
        .wrap_err("Failed to write config file")?;

    output.success(format!("Wrote starter config to {}", config_file.display()));
    output.info("Set tmdb.api_key (or MARQUEE_TMDB_API_KEY) before fetching data");
    Ok(())
}

fn redact(key: &str) -> String {
    if key.len() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", &key[..4])
    }
}
