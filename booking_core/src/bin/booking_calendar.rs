//! Booking Calendar command-line driver
//!
//! Drives the application store the way the web UI does and prints the
//! resulting state.
//!
//! # Usage
//!
//! ```bash
//! # Search stations
//! booking-calendar stations berlin
//!
//! # Show the week containing 2025-08-13 for station 1, one week later
//! booking-calendar week --station 1 --date 2025-08-13 --next 1
//!
//! # Booking detail and rescheduling
//! booking-calendar booking 104
//! booking-calendar reschedule 104 2026-01-10 2026-01-14
//! ```
//!
//! # Environment Variables
//!
//! - `BOOKING_API_BASE_URL`, `BOOKING_API_TIMEOUT_MS`, `BOOKING_USE_MOCK_API`:
//!   backend selection, used when neither `--config` nor a `booking.toml` in
//!   the standard locations is present
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use booking_core::db::{BookingConfig, RepositoryBuilder};
use booking_core::services::{booking_day_kind, week_subtitle, week_title, BookingStats};
use booking_core::store::{AppStore, LoadPhase, SessionState};
use booking_core::time::{add_weeks, format_date, format_date_long, parse_date, today};

#[derive(Debug, Parser)]
#[command(name = "booking-calendar", version, about = "Station booking calendar")]
struct Cli {
    /// Path to a booking.toml file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search stations by name or address
    Stations {
        /// Search text; omit to list all stations
        query: Option<String>,
    },
    /// Show one week of bookings for a station
    Week {
        #[arg(long)]
        station: String,
        /// Any date in the week (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Move forward this many weeks
        #[arg(long, conflicts_with = "prev")]
        next: Option<u32>,
        /// Move back this many weeks
        #[arg(long)]
        prev: Option<u32>,
    },
    /// Show booking detail
    Booking { id: String },
    /// Move a booking to new dates
    Reschedule {
        id: String,
        pickup: String,
        #[arg(value_name = "RETURN")]
        return_date: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();

    let builder = match &cli.config {
        Some(path) => {
            let file = BookingConfig::from_file(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            RepositoryBuilder::new().from_config_file(&file)
        }
        None => RepositoryBuilder::new()
            .from_default_sources()
            .context("Failed to load configuration")?,
    };
    let repository = builder.build()?;
    let store = AppStore::new(repository);
    info!("Store initialized");

    match cli.command {
        Command::Stations { query } => {
            let stations = store.search_stations(query.as_deref().unwrap_or("")).await;
            fail_on_error(&store)?;
            if stations.is_empty() {
                println!("No stations found");
            }
            for station in stations {
                println!("{:>3}  {:<14} {}", station.id, station.name, station.address);
            }
        }
        Command::Week {
            station,
            date,
            next,
            prev,
        } => {
            let stations = store.search_stations("").await;
            let Some(selected) = stations.into_iter().find(|s| s.id == station) else {
                bail!("Unknown station: {}", station);
            };

            // Set the week before selecting so only one load is issued.
            let mut anchor = date.unwrap_or_else(today);
            if let Some(n) = next {
                anchor = add_weeks(anchor, n as i32);
            }
            if let Some(n) = prev {
                anchor = add_weeks(anchor, -(n as i32));
            }
            store.set_current_week(anchor).await;
            store.set_selected_station(Some(selected)).await;
            wait_for_settled(&store).await;

            let state = store.state();
            if let Some(error) = &state.error {
                bail!("{}", error);
            }
            print_week(&state, today());
        }
        Command::Booking { id } => {
            store.load_booking_detail(&id).await;
            fail_on_error(&store)?;
            if let Some(detail) = store.state().selected_booking {
                let b = &detail.booking;
                println!("Booking {} ({})", b.id, b.status);
                println!("  Customer: {} <{}>", b.customer_name, detail.customer_email.as_deref().unwrap_or("-"));
                println!("  Station:  {} ({})", b.station_name, b.station_id);
                let long = |raw: &str| {
                    parse_date(raw)
                        .map(|d| format_date_long(d.date()))
                        .unwrap_or_else(|| raw.to_string())
                };
                println!("  Pickup:   {}", long(&b.pickup_date));
                println!("  Return:   {}", long(&b.return_date));
                println!("  Duration: {} days", b.duration);
                println!("  Vehicle:  {}", detail.vehicle_type.as_deref().unwrap_or("-"));
                if let Some(price) = detail.total_price {
                    println!("  Price:    €{}", price);
                }
            }
        }
        Command::Reschedule {
            id,
            pickup,
            return_date,
        } => {
            let accepted = store.reschedule_booking(&id, &pickup, &return_date).await;
            if !accepted {
                let reason = store.state().error.unwrap_or_default();
                bail!("Reschedule rejected: {}", reason);
            }
            println!("Booking {} moved to {} - {}", id, pickup, return_date);
        }
    }

    Ok(())
}

fn fail_on_error(store: &AppStore) -> anyhow::Result<()> {
    match store.state().error {
        Some(error) => bail!("{}", error),
        None => Ok(()),
    }
}

/// Wait until pending retries have either succeeded or given up.
async fn wait_for_settled(store: &AppStore) {
    let mut rx = store.subscribe();
    let _ = rx
        .wait_for(|s| matches!(s.phase(), LoadPhase::Loaded | LoadPhase::Errored | LoadPhase::Idle))
        .await;
}

fn print_week(state: &SessionState, today: NaiveDate) {
    let station = state
        .selected_station
        .as_ref()
        .map(|s| s.name.as_str())
        .unwrap_or("-");
    println!(
        "{} | {} ({})",
        station,
        week_title(state.current_week),
        week_subtitle(state.current_week)
    );

    let stats = BookingStats::from_bookings(state.week_bookings());
    println!(
        "{} bookings, {} customers",
        stats.total_bookings, stats.unique_customers
    );

    for day in state.calendar_days(today) {
        let marker = if day.is_today { " (today)" } else { "" };
        println!("\n{}{}", format_date(day.date), marker);
        for booking in &day.bookings {
            println!(
                "  [{}] {} - {} ({})",
                booking_day_kind(booking, day.date).label(),
                booking.customer_name,
                booking.id,
                booking.status
            );
        }
    }

    if state.is_empty() {
        println!("\nNo bookings this week");
    }
}
