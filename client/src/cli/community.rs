//! `gbaka favorites ...`, `gbaka reports ...` and `gbaka history ...`

use clap::Subcommand;
use lib_utils::validate_not_empty;
use shared::{Coordinates, NewHistoryEntry, NewReport, ReportStatus, ReportType, ReportsQuery};

use super::output::{print_favorites, print_json, print_reports};
use super::Context;
use crate::core::error::{AppError, Result};
use crate::core::ApiService;

#[derive(Subcommand, Debug)]
pub enum FavoritesCommand {
    /// Your favorite stops
    List,
    Add { stop_id: String },
    Remove { stop_id: String },
    /// Add the stop if missing, remove it otherwise
    Toggle { stop_id: String },
    /// Whether a stop is among your favorites
    Check { stop_id: String },
}

#[derive(Subcommand, Debug)]
pub enum ReportsCommand {
    /// Community reports
    List {
        /// pending, approved, rejected or resolved
        #[arg(long)]
        status: Option<ReportStatus>,
        #[arg(long = "stop")]
        stop_id: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Report a problem or a missing stop
    Create {
        /// missing_stop, incorrect_info, damage, safety_issue, new_line,
        /// schedule_change, duplicate_stop or other
        #[arg(long = "type")]
        report_type: ReportType,
        title: String,
        #[arg(long = "stop")]
        stop_id: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        /// Position as `lat,lon`
        #[arg(long, allow_hyphen_values = true)]
        at: Option<Coordinates>,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// Record a trip search
    Add {
        query: String,
        #[arg(long, allow_hyphen_values = true)]
        from: Coordinates,
        #[arg(long, allow_hyphen_values = true)]
        to: Coordinates,
    },
}

pub async fn run_favorites(ctx: &Context, command: FavoritesCommand) -> Result<()> {
    match command {
        FavoritesCommand::List => {
            let favorites = ctx.api.get_favorites().await?;
            if ctx.json {
                return print_json(&favorites);
            }
            print_favorites(&favorites);
            Ok(())
        }
        FavoritesCommand::Add { stop_id } => {
            let favorite = ctx.api.add_favorite(&stop_id).await?;
            println!("{} added to favorites", favorite.stop.name);
            Ok(())
        }
        FavoritesCommand::Remove { stop_id } => {
            ctx.api.remove_favorite(&stop_id).await?;
            println!("Removed from favorites");
            Ok(())
        }
        FavoritesCommand::Toggle { stop_id } => {
            let now_favorite = ctx.api.toggle_favorite(&stop_id).await?;
            println!(
                "{}",
                if now_favorite { "Added to favorites" } else { "Removed from favorites" }
            );
            Ok(())
        }
        FavoritesCommand::Check { stop_id } => {
            let favorite = ctx.api.is_favorite(&stop_id).await;
            if ctx.json {
                return print_json(&favorite);
            }
            println!("{}", if favorite { "yes" } else { "no" });
            Ok(())
        }
    }
}

pub async fn run_reports(ctx: &Context, command: ReportsCommand) -> Result<()> {
    match command {
        ReportsCommand::List {
            status,
            stop_id,
            page,
            limit,
        } => {
            let params = ReportsQuery {
                status,
                stop_id,
                page,
                limit,
            };
            let page = ctx.api.get_reports(&params).await?;
            if ctx.json {
                return print_json(&page);
            }
            print_reports(&page.reports);
            println!(
                "Page {}/{} ({} reports)",
                page.pagination.page, page.pagination.total_pages, page.pagination.total
            );
            Ok(())
        }
        ReportsCommand::Create {
            report_type,
            title,
            stop_id,
            description,
            image_url,
            at,
        } => {
            validate_not_empty(&title, "Title").map_err(AppError::Validation)?;
            let report = NewReport {
                stop_id,
                report_type,
                title: title.trim().to_string(),
                description,
                image_url,
                lat: at.map(|c| c.lat),
                lon: at.map(|c| c.lon),
            };
            let created = ctx.api.create_report(&report).await?;
            if ctx.json {
                return print_json(&created);
            }
            println!("Thanks for your report ({})", created.id);
            Ok(())
        }
    }
}

pub async fn run_history(ctx: &Context, command: HistoryCommand) -> Result<()> {
    match command {
        HistoryCommand::Add { query, from, to } => {
            let entry = NewHistoryEntry {
                query,
                from_lat: from.lat,
                from_lon: from.lon,
                to_lat: to.lat,
                to_lon: to.lon,
            };
            let saved = ctx.api.add_to_history(&entry).await?;
            if ctx.json {
                return print_json(&saved);
            }
            println!("Saved \"{}\"", saved.query);
            Ok(())
        }
    }
}
