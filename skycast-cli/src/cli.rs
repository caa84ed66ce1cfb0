use std::{io, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use skycast_core::{
    Config, DashboardSession, FileStore, ReverseGeocoder, UNKNOWN_LOCATION, UnitSystem,
    WeatherGateway,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather dashboard in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the API key and display preferences.
    Configure,

    /// Show current weather and the 5-day forecast for a city.
    Show {
        /// City name; defaults to the configured default city.
        city: Option<String>,

        /// "metric" or "imperial"; defaults to the configured units.
        #[arg(long, short)]
        units: Option<UnitSystem>,

        /// Print the raw data as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show weather for coordinates, resolved to the nearest place name.
    Locate {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        #[arg(long, short)]
        units: Option<UnitSystem>,

        #[arg(long)]
        json: bool,
    },

    /// List or toggle favorite places.
    Favorites {
        #[command(subcommand)]
        action: Option<FavoritesAction>,
    },

    /// List or clear recent searches.
    Recent {
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum FavoritesAction {
    /// List favorite places.
    List,
    /// Add a place to favorites, or remove it if already there.
    Toggle { city: String },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, units, json } => {
                let config = load_config()?;
                let city = city.unwrap_or_else(|| config.default_city.clone());
                show(&config, &city, units, json).await
            }
            Command::Locate { lat, lon, units, json } => {
                let config = load_config()?;
                let city = locate_city(&config, lat, lon).await;
                show(&config, &city, units, json).await
            }
            Command::Favorites { action } => {
                let mut session = open_session(&load_config()?, None)?;
                match action.unwrap_or(FavoritesAction::List) {
                    FavoritesAction::List => print_list("Favorites", session.favorites()),
                    FavoritesAction::Toggle { city } => {
                        let added = session.toggle_favorite_city(&city)?;
                        let verb = if added { "Added" } else { "Removed" };
                        println!("{verb} {}", city.trim());
                    }
                }
                Ok(())
            }
            Command::Recent { clear } => {
                let mut session = open_session(&load_config()?, None)?;
                if clear {
                    session.clear_recent()?;
                    println!("Recent searches cleared");
                } else {
                    print_list("Recent searches", session.recent());
                }
                Ok(())
            }
        }
    }
}

fn load_config() -> anyhow::Result<Config> {
    Ok(Config::load()?.with_env_overrides())
}

fn open_session(
    config: &Config,
    units: Option<UnitSystem>,
) -> anyhow::Result<DashboardSession<FileStore>> {
    let gateway = Arc::new(WeatherGateway::from_config(config));
    let store = FileStore::open_default().context("Failed to open saved favorites")?;
    Ok(DashboardSession::new(gateway, store, units.unwrap_or(config.units)))
}

/// Place name for coordinates. An unresolved position is shown under the
/// "Unknown Location" name like any other city.
async fn locate_city(config: &Config, lat: f64, lon: f64) -> String {
    let city = ReverseGeocoder::from_config(config).city_name(lat, lon).await;
    if city == UNKNOWN_LOCATION {
        tracing::warn!(lat, lon, "Could not resolve a place name, showing {UNKNOWN_LOCATION}");
    } else {
        tracing::debug!(lat, lon, city = %city, "Resolved coordinates");
    }
    city
}

async fn show(
    config: &Config,
    city: &str,
    units: Option<UnitSystem>,
    json: bool,
) -> anyhow::Result<()> {
    let mut session = open_session(config, units)?;
    let bundle = session.search(city).await?.clone();
    tracing::debug!(city, source = ?bundle.source, unit = %bundle.unit, "Weather loaded");

    if json {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
    } else {
        let favorite = session.is_favorite(&bundle.snapshot.name);
        render::dashboard(&mut io::stdout().lock(), &bundle, favorite)?;
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_help_message("Leave empty to keep the current key; without a key SkyCast shows sample data")
        .without_confirmation()
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.api_key = Some(api_key.trim().to_string());
    }

    let unit_options = vec![UnitSystem::Metric, UnitSystem::Imperial];
    let starting = unit_options.iter().position(|u| *u == config.units).unwrap_or(0);
    config.units = Select::new("Units:", unit_options)
        .with_starting_cursor(starting)
        .prompt()?;

    config.lang = Text::new("Description language code:")
        .with_default(&config.lang)
        .prompt()?;

    config.default_city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()?;

    config.save()?;

    if !config.has_live_credential() {
        println!("No usable API key configured; weather will be sample data.");
    }
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        println!("{title}: none");
        return;
    }

    println!("{title}:");
    for item in items {
        println!("  {item}");
    }
}
