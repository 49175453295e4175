use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use weather_core::{Config, advice, lookup, provider_from_config};

use crate::server::{AppState, router};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather-based clothing advice service")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP service.
    Serve {
        /// Address to listen on.
        #[arg(long, default_value = "127.0.0.1:5000")]
        bind: SocketAddr,
    },

    /// Set the shared-secret token and provider API key.
    Configure,

    /// Look up the weather once and print clothing advice.
    Show {
        /// Address or location name.
        location: String,

        /// Calendar date, e.g. 2024-03-01.
        date: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve { bind } => {
                let config = load_config(self.config.as_ref())?;
                serve(&config, bind).await
            }
            Command::Configure => configure(self.config.as_ref()),
            Command::Show { location, date } => {
                let config = load_config(self.config.as_ref())?;
                show(&config, &location, &date).await
            }
        }
    }
}

/// File config with `WEATHER_*` environment overrides applied.
fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply_env_overrides()?;
    Ok(config)
}

async fn serve(config: &Config, bind: SocketAddr) -> anyhow::Result<()> {
    let api_token = config.api_token()?;
    let provider = provider_from_config(config)?;
    let state = AppState::new(api_token, Arc::from(provider));

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;
    tracing::info!("listening on http://{bind}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

fn configure(path: Option<&PathBuf>) -> anyhow::Result<()> {
    // Only file values are persisted; environment overrides stay out of the file.
    let mut config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(token) = prompt_secret("Shared-secret API token:", config.api_token.is_some())? {
        config.api_token = Some(token);
    }
    if let Some(key) = prompt_secret("Visual Crossing API key:", config.provider.api_key.is_some())? {
        config.provider.api_key = Some(key);
    }

    let saved_to = match path {
        Some(path) => {
            config.save_to(path)?;
            path.clone()
        }
        None => config.save()?,
    };

    println!("Configuration saved to {}", saved_to.display());
    Ok(())
}

/// Prompt for a secret. Empty input keeps the current value when one exists.
fn prompt_secret(prompt: &str, has_current: bool) -> anyhow::Result<Option<String>> {
    let mut question = Password::new(prompt)
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation();
    if has_current {
        question = question.with_help_message("leave empty to keep the current value");
    }

    let answer = question.prompt()?;
    Ok((!answer.is_empty()).then_some(answer))
}

async fn show(config: &Config, location: &str, date: &str) -> anyhow::Result<()> {
    let provider = provider_from_config(config)?;
    let weather = lookup(provider.as_ref(), location, date).await?;

    println!("{location} on {date}");
    println!("  temperature: {:.1} °C", weather.temp_c);
    println!("  conditions:  {}", weather.condition);
    println!("{}", advice(&weather.recommendations));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_defaults_to_local_port_5000() {
        let cli = Cli::try_parse_from(["weather", "serve"]).unwrap();
        match cli.command {
            Command::Serve { bind } => assert_eq!(bind, "127.0.0.1:5000".parse::<SocketAddr>().unwrap()),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["weather", "show", "Oslo", "2024-03-01", "--config", "/tmp/w.toml"])
            .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/w.toml")));
        assert!(matches!(cli.command, Command::Show { ref location, .. } if location == "Oslo"));
    }

    #[test]
    fn show_requires_date() {
        assert!(Cli::try_parse_from(["weather", "show", "Oslo"]).is_err());
    }

    #[test]
    fn bad_bind_address_is_rejected() {
        assert!(Cli::try_parse_from(["weather", "serve", "--bind", "nowhere"]).is_err());
    }
}
