use clap::ValueEnum;
use comfy_table::{Cell, Table};
use marquee_models::{CastMember, Genre, Title, TitleDetails};
use owo_colors::OwoColorize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{} {}", "✓".green(), msg.as_ref()),
            _ => self.print_json(&json!({ "type": "success", "message": msg.as_ref() })),
        }
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        // Errors are shown even in quiet mode
        match self.format {
            OutputFormat::Human => eprintln!("{} {}", "✗".red(), msg.as_ref()),
            _ => self.print_json(&json!({ "type": "error", "message": msg.as_ref() })),
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{} {}", "⚠".yellow(), msg.as_ref()),
            _ => self.print_json(&json!({ "type": "warning", "message": msg.as_ref() })),
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{}", msg.as_ref()),
            _ => self.print_json(&json!({ "type": "info", "message": msg.as_ref() })),
        }
    }

    pub fn json(&self, data: &serde_json::Value) {
        self.print_json(data);
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(data).unwrap_or_default()),
            _ => println!("{}", serde_json::to_string_pretty(data).unwrap_or_default()),
        }
    }

    pub fn title_list(&self, titles: &[Title]) {
        match self.format {
            OutputFormat::Human => {
                if self.quiet {
                    return;
                }
                let mut table = Table::new();
                table.load_preset(comfy_table::presets::UTF8_FULL);
                table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
                table.set_header(vec![
                    Cell::new("ID").add_attribute(comfy_table::Attribute::Bold),
                    Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
                    Cell::new("Type").add_attribute(comfy_table::Attribute::Bold),
                    Cell::new("Released").add_attribute(comfy_table::Attribute::Bold),
                    Cell::new("Rating").add_attribute(comfy_table::Attribute::Bold),
                ]);
                for title in titles {
                    table.add_row(vec![
                        Cell::new(title.id),
                        Cell::new(&title.title),
                        Cell::new(title.media_type.as_str()),
                        Cell::new(title.release_date.as_deref().unwrap_or("-")),
                        Cell::new(format!("{:.1} ({})", title.vote_average, title.vote_count)),
                    ]);
                }
                println!("{}", table);
            }
            _ => {
                let value = serde_json::to_value(titles).unwrap_or_default();
                self.print_json(&json!({ "type": "titles", "titles": value }));
            }
        }
    }

    pub fn title_details(&self, details: &TitleDetails) {
        match self.format {
            OutputFormat::Human => {
                if self.quiet {
                    return;
                }
                println!("{}", details.title.title.bold());
                if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
                    println!("{}", tagline.italic());
                }
                println!();
                println!("ID:        {}", details.title.id);
                println!("Type:      {}", details.title.media_type.as_str());
                println!(
                    "Released:  {}",
                    details.title.release_date.as_deref().unwrap_or("-")
                );
                println!("Runtime:   {} min", details.runtime_minutes);
                println!(
                    "Rating:    {:.1} ({} votes)",
                    details.title.vote_average, details.title.vote_count
                );
                let genres: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
                println!("Genres:    {}", genres.join(", "));
                if let Some(status) = details.status.as_deref() {
                    println!("Status:    {}", status);
                }
                if !details.title.overview.is_empty() {
                    println!("\n{}", details.title.overview);
                }
            }
            _ => {
                let value = serde_json::to_value(details).unwrap_or_default();
                self.print_json(&json!({ "type": "details", "details": value }));
            }
        }
    }

    pub fn cast_list(&self, cast: &[CastMember]) {
        match self.format {
            OutputFormat::Human => {
                if self.quiet {
                    return;
                }
                let mut table = Table::new();
                table.load_preset(comfy_table::presets::UTF8_FULL);
                table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
                table.set_header(vec![
                    Cell::new("ID").add_attribute(comfy_table::Attribute::Bold),
                    Cell::new("Name").add_attribute(comfy_table::Attribute::Bold),
                    Cell::new("Character").add_attribute(comfy_table::Attribute::Bold),
                ]);
                for member in cast {
                    table.add_row(vec![
                        Cell::new(member.id),
                        Cell::new(&member.name),
                        Cell::new(member.character.as_deref().unwrap_or("-")),
                    ]);
                }
                println!("{}", table);
            }
            _ => {
                let value = serde_json::to_value(cast).unwrap_or_default();
                self.print_json(&json!({ "type": "cast", "cast": value }));
            }
        }
    }

    pub fn genre_list(&self, genres: &[Genre]) {
        match self.format {
            OutputFormat::Human => {
                if self.quiet {
                    return;
                }
                for genre in genres {
                    println!("{:>6}  {}", genre.id, genre.name);
                }
            }
            _ => {
                let value = serde_json::to_value(genres).unwrap_or_default();
                self.print_json(&json!({ "type": "genres", "genres": value }));
            }
        }
    }
}
