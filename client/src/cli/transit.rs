//! `gbaka stops ...` and `gbaka lines ...`

use clap::{Subcommand, ValueEnum};
use lib_utils::validate_not_empty;
use shared::{BoundingBox, Coordinates, NewLine, StopUpdate, TransportType};

use super::output::{print_json, print_lines, print_stop_detail, print_stops};
use super::Context;
use crate::core::error::{AppError, Result};
use crate::core::ApiService;
use crate::location::{clamp_radius, resolve};
use crate::services::api::{LinesFormat, LinesQuery, NearbyQuery, StopsQuery, TransportLinesQuery};

/// Radius of a text search when none is given.
const SEARCH_RADIUS_M: u32 = 5000;

#[derive(Subcommand, Debug)]
pub enum StopsCommand {
    /// Stops around a point
    Near {
        /// Search centre as `lat,lon` (default: Abidjan)
        #[arg(long, allow_hyphen_values = true)]
        at: Option<Coordinates>,
        /// Radius in meters (100-10000)
        #[arg(long)]
        radius: Option<u32>,
        /// Only stops served by this mode
        #[arg(long = "type")]
        transport_type: Option<TransportType>,
        #[arg(long)]
        limit: Option<u32>,
        /// Bypass the server cache
        #[arg(long)]
        refresh: bool,
    },

    /// Details of one stop
    Show { id: String },

    /// Suggest a correction to a stop
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        shelter: Option<bool>,
        #[arg(long)]
        bench: Option<bool>,
        #[arg(long)]
        wheelchair: Option<bool>,
    },

    /// Text search around a point
    Search {
        query: String,
        #[arg(long, allow_hyphen_values = true)]
        at: Option<Coordinates>,
        #[arg(long)]
        radius: Option<u32>,
        /// Group results into clusters
        #[arg(long)]
        cluster: bool,
        #[arg(long)]
        zoom: Option<u8>,
        /// Free-form kind filter passed to the server
        #[arg(long)]
        kind: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum LinesCommand {
    /// List transport lines
    List {
        #[arg(long = "type")]
        transport_type: Option<TransportType>,
        /// Only active (true) or inactive (false) lines
        #[arg(long)]
        active: Option<bool>,
        #[arg(long)]
        include_stops: bool,
    },

    /// Add a line
    Create {
        name: String,
        #[arg(long = "type")]
        transport_type: TransportType,
        #[arg(long)]
        short_name: Option<String>,
        /// Hex color, e.g. `#FF6B00`
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        operator: Option<String>,
        #[arg(long)]
        fare: Option<f64>,
        #[arg(long)]
        route_ref: Option<String>,
        /// Stop id served by the line (repeatable)
        #[arg(long = "stop")]
        stops: Vec<String>,
    },

    /// Line overlay for a map area
    Map {
        #[arg(long, allow_hyphen_values = true)]
        north: f64,
        #[arg(long, allow_hyphen_values = true)]
        south: f64,
        #[arg(long, allow_hyphen_values = true)]
        east: f64,
        #[arg(long, allow_hyphen_values = true)]
        west: f64,
        /// Comma-separated line types
        #[arg(long, value_delimiter = ',')]
        types: Vec<String>,
        #[arg(long, value_enum)]
        format: Option<OverlayFormat>,
        #[arg(long)]
        refresh: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OverlayFormat {
    Map,
    Api,
    Geojson,
}

impl From<OverlayFormat> for LinesFormat {
    fn from(format: OverlayFormat) -> Self {
        match format {
            OverlayFormat::Map => LinesFormat::Map,
            OverlayFormat::Api => LinesFormat::Api,
            OverlayFormat::Geojson => LinesFormat::GeoJson,
        }
    }
}

pub async fn run_stops(ctx: &Context, command: StopsCommand) -> Result<()> {
    match command {
        StopsCommand::Near {
            at,
            radius,
            transport_type,
            limit,
            refresh,
        } => {
            let params = StopsQuery {
                center: resolve(at),
                radius: Some(clamp_radius(radius)),
                transport_type,
                limit,
                refresh,
            };
            let page = ctx.api.get_stops(&params).await?;
            if ctx.json {
                return print_json(&page);
            }
            println!(
                "{} of {} stops within {} m{}",
                page.count,
                page.total,
                page.radius,
                if page.from_cache { " (cached)" } else { "" }
            );
            print_stops(&page.stops);
            Ok(())
        }

        StopsCommand::Show { id } => {
            let stop = ctx.api.get_stop(&id).await?;
            let favorite = ctx.auth.is_authenticated() && ctx.api.is_favorite(&id).await;
            if ctx.json {
                return print_json(&stop);
            }
            print_stop_detail(&stop, favorite);
            Ok(())
        }

        StopsCommand::Update {
            id,
            name,
            shelter,
            bench,
            wheelchair,
        } => {
            let update = StopUpdate {
                name,
                shelter,
                bench,
                wheelchair,
            };
            let stop = ctx.api.update_stop(&id, &update).await?;
            if ctx.json {
                return print_json(&stop);
            }
            println!("Thanks, {} has been updated", stop.name);
            Ok(())
        }

        StopsCommand::Search {
            query,
            at,
            radius,
            cluster,
            zoom,
            kind,
        } => {
            validate_not_empty(&query, "Search text").map_err(AppError::Validation)?;
            let params = NearbyQuery {
                center: resolve(at),
                text: Some(query.trim().to_string()),
                radius: Some(radius.unwrap_or(SEARCH_RADIUS_M)),
                cluster,
                zoom,
                kind,
            };
            let response = ctx.api.search_nearby(&params).await?;
            if ctx.json {
                return print_json(&response);
            }
            print_stops(&response.stops());
            Ok(())
        }
    }
}

pub async fn run_lines(ctx: &Context, command: LinesCommand) -> Result<()> {
    match command {
        LinesCommand::List {
            transport_type,
            active,
            include_stops,
        } => {
            let params = LinesQuery {
                transport_type,
                active,
                include_stops,
            };
            let lines = ctx.api.get_lines(&params).await?;
            if ctx.json {
                return print_json(&lines);
            }
            print_lines(&lines);
            Ok(())
        }

        LinesCommand::Create {
            name,
            transport_type,
            short_name,
            color,
            operator,
            fare,
            route_ref,
            stops,
        } => {
            let line = NewLine {
                name,
                short_name,
                color,
                transport_type,
                operator,
                fare,
                route_ref,
                stop_ids: (!stops.is_empty()).then_some(stops),
            };
            let created = ctx.api.create_line(&line).await?;
            if ctx.json {
                return print_json(&created);
            }
            println!("Line {} created ({})", created.badge(), created.id);
            Ok(())
        }

        LinesCommand::Map {
            north,
            south,
            east,
            west,
            types,
            format,
            refresh,
        } => {
            let mut params = TransportLinesQuery::new(BoundingBox {
                north,
                south,
                east,
                west,
            });
            params.types = types;
            params.format = format.map(LinesFormat::from);
            params.refresh = refresh;

            let overlay = ctx.api.get_transport_lines(&params).await?;
            print_json(&overlay)
        }
    }
}
