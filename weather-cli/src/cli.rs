use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::Text;
use weather_core::{
    Config,
    config::GEONAMES_USERNAME_ENV,
    controller::WeatherController,
    provider::{geocoder_from_config, weather_source_from_config},
    render::Report,
};

use crate::interactive;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather lookup with city suggestions")]
pub struct Cli {
    /// Base URL of the weather backend (overrides the config file).
    #[arg(long, global = true)]
    pub backend: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Type a city, pick a suggestion, see its forecast (the default).
    Interactive,

    /// Show the forecast for a city.
    Show {
        /// City name.
        city: String,
    },

    /// List place suggestions for a partial city name.
    Search {
        /// Partial city name.
        query: String,
    },

    /// Configure the GeoNames username and backend URL.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Interactive => interactive::run(&load_config(self.backend)?).await,
            Command::Show { city } => show(&load_config(self.backend)?, city).await,
            Command::Search { query } => search(&load_config(self.backend)?, &query).await,
            // Edit the file as stored, without the environment override, even when it is broken.
            Command::Configure => configure(editable_config(Config::load_file())),
        }
    }
}

fn load_config(backend: Option<String>) -> anyhow::Result<Config> {
    let mut config = Config::load()?;
    if let Some(url) = backend {
        config.backend_url = url;
    }
    tracing::debug!(
        backend = %config.backend_url,
        geonames = %config.geonames.url,
        "configuration loaded"
    );
    Ok(config)
}

/// Starting point for `configure`: the stored config, or defaults when it can't be read.
fn editable_config(loaded: anyhow::Result<Config>) -> Config {
    loaded.unwrap_or_else(|err| {
        tracing::warn!("ignoring unreadable config file: {err:#}");
        Config::default()
    })
}

async fn show(config: &Config, city: String) -> anyhow::Result<()> {
    let mut forecast = WeatherController::new(weather_source_from_config(config));
    forecast.load(city.as_str()).await;

    print!(
        "{}",
        Report {
            city: &city,
            state: forecast.state(),
        }
    );
    Ok(())
}

async fn search(config: &Config, query: &str) -> anyhow::Result<()> {
    let geocoder = geocoder_from_config(config)?;

    let places = geocoder
        .search(query)
        .await
        .with_context(|| format!("Failed to look up places matching '{query}'"))?;

    if places.is_empty() {
        println!("No places match '{query}'.");
    }
    for place in places {
        println!("{place} ({})", place.id);
    }
    Ok(())
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let username = Text::new("GeoNames username:")
        .with_default(config.geonames_username().unwrap_or_default())
        .with_help_message(&format!("{GEONAMES_USERNAME_ENV} overrides this value when set"))
        .prompt()?;

    let backend_url = Text::new("Weather backend URL:")
        .with_default(&config.backend_url)
        .prompt()?;

    config.geonames.username = Some(username.trim().to_string()).filter(|u| !u.is_empty());
    config.backend_url = backend_url.trim().to_string();
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["weather"]).expect("parses");
        assert!(cli.command.is_none());
        assert!(cli.backend.is_none());
    }

    #[test]
    fn backend_flag_is_global() {
        let cli = Cli::try_parse_from([
            "weather",
            "show",
            "Paris",
            "--backend",
            "http://weather.local",
        ])
        .expect("parses");

        assert_eq!(cli.backend.as_deref(), Some("http://weather.local"));
        assert!(matches!(cli.command, Some(Command::Show { ref city }) if city == "Paris"));
    }

    #[test]
    fn configure_starts_from_defaults_when_file_is_broken() {
        let broken = Config::from_toml("backend_url = [");
        assert!(broken.is_err());

        assert_eq!(editable_config(broken), Config::default());
    }

    #[test]
    fn configure_keeps_readable_file() {
        let stored = Config::from_toml("backend_url = \"http://weather.local\"").expect("parses");

        let config = editable_config(Ok(stored));
        assert_eq!(config.backend_url, "http://weather.local");
    }
}
