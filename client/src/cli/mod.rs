//! # Command Line Front End
//!
//! `gbaka` exposes every client operation as a subcommand:
//!
//! ```text
//! gbaka account login awa@example.ci --password ...
//! gbaka stops near --at 5.3364,-4.0267 --radius 1500 --type gbaka
//! gbaka route plan --to 5.3599,-3.9870 --sort price --max-price 500
//! gbaka weather forecast --city Abidjan --hours 6 --transport
//! gbaka favorites toggle <stop-id>
//! ```
//!
//! Errors are printed as their user-facing message; `--json` switches every
//! listing to machine-readable output.

pub mod account;
pub mod community;
pub mod output;
pub mod transit;
pub mod trip;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::config::ClientConfig;
use crate::core::error::Result;
use crate::services::api::ApiClient;
use crate::services::auth::{AuthService, FirebaseIdentity};
use crate::services::session::{CredentialStore, FileCredentialStore};

use account::AccountCommand;
use community::{FavoritesCommand, HistoryCommand, ReportsCommand};
use transit::{LinesCommand, StopsCommand};
use trip::{RouteCommand, WeatherCommand};

#[derive(Parser, Debug)]
#[command(
    name = "gbaka",
    author,
    version,
    about = "GbakaMap: stops, lines and transport suggestions for Abidjan",
    long_about = "Finds stops and lines, plans trips with weather-aware transport \
                  suggestions (bus, gbaka, wôrô-wôrô, taxi, moto-taxi) and manages \
                  your favorites and community reports."
)]
pub struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Mirror logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign-in, sign-up and profile
    #[command(subcommand)]
    Account(AccountCommand),
    /// Stop search and details
    #[command(subcommand)]
    Stops(StopsCommand),
    /// Transport lines
    #[command(subcommand)]
    Lines(LinesCommand),
    /// Trip planning
    #[command(subcommand)]
    Route(RouteCommand),
    /// Weather and forecast
    #[command(subcommand)]
    Weather(WeatherCommand),
    /// Favorite stops
    #[command(subcommand)]
    Favorites(FavoritesCommand),
    /// Community reports
    #[command(subcommand)]
    Reports(ReportsCommand),
    /// Search history
    #[command(subcommand)]
    History(HistoryCommand),
}

impl Command {
    /// Name used for the command's trace span.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Account(_) => "account",
            Command::Stops(_) => "stops",
            Command::Lines(_) => "lines",
            Command::Route(_) => "route",
            Command::Weather(_) => "weather",
            Command::Favorites(_) => "favorites",
            Command::Reports(_) => "reports",
            Command::History(_) => "history",
        }
    }
}

/// Services shared by every command.
pub struct Context {
    pub api: Arc<ApiClient>,
    pub auth: AuthService,
    pub json: bool,
}

impl Context {
    pub fn new(config: &ClientConfig, json: bool) -> Self {
        let store: Arc<dyn CredentialStore> = Arc::new(FileCredentialStore::new(&config.session_file));
        let api = Arc::new(ApiClient::from_config(config).with_store(store.clone()));
        let identity = Arc::new(FirebaseIdentity::from_config(config));
        let auth = AuthService::new(identity, api.clone(), store);

        Self { api, auth, json }
    }

    /// Restore the stored session and make sure its token is fresh.
    pub async fn prepare(&self) {
        match self.auth.restore() {
            Ok(Some(_)) => {
                if self.auth.current_token().await.is_none() {
                    tracing::warn!("Stored session could not be refreshed");
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Could not read stored session"),
        }
    }
}

pub async fn run(ctx: &Context, command: Command) -> Result<()> {
    match command {
        Command::Account(command) => account::run(ctx, command).await,
        Command::Stops(command) => transit::run_stops(ctx, command).await,
        Command::Lines(command) => transit::run_lines(ctx, command).await,
        Command::Route(command) => trip::run_route(ctx, command).await,
        Command::Weather(command) => trip::run_weather(ctx, command).await,
        Command::Favorites(command) => community::run_favorites(ctx, command).await,
        Command::Reports(command) => community::run_reports(ctx, command).await,
        Command::History(command) => community::run_history(ctx, command).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use crate::suggestions::SortOrder;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_route_plan() {
        let cli = Cli::try_parse_from([
            "gbaka", "route", "plan", "--to", "5.3599,-3.9870", "--sort", "price", "--mode", "gbaka",
            "--mode", "taxi", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Command::Route(RouteCommand::Plan { from, to, sort, modes, .. }) => {
                assert!(from.is_none());
                assert_eq!(to.lat, 5.3599);
                assert_eq!(sort, SortOrder::Price);
                assert_eq!(modes.len(), 2);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_stops_near_with_negative_longitude() {
        let cli = Cli::try_parse_from(["gbaka", "stops", "near", "--at", "5.3364,-4.0267", "--type", "woro-woro"])
            .unwrap();
        assert_eq!(cli.command.name(), "stops");
        match cli.command {
            Command::Stops(StopsCommand::Near { at, transport_type, .. }) => {
                assert_eq!(at.map(|c| c.lon), Some(-4.0267));
                assert_eq!(transport_type, Some(shared::TransportType::WoroWoro));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unknown_sort_order_is_rejected() {
        assert!(Cli::try_parse_from(["gbaka", "route", "plan", "--to", "5.3,-4.0", "--sort", "cheapest"]).is_err());
    }
}
