// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use chrono::Local;
use clap::{Parser, Subcommand};
use roombook::{
    DEFAULT_NOW_REFRESH_SECS, DEFAULT_RECONCILE_SECS, ReservationStore, SharedNow, StoreConfig,
    spawn_now_refresher, spawn_reconciler,
};
use roombook_domain::{Reservation, ReservationRequest, weekday_label};
use roombook_remote::{HttpBackend, SearchQuery, SessionProfile};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;

/// Roombook - meeting room reservations from the command line
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the reservation service
    #[arg(long, default_value = "http://127.0.0.1:3000", env = "ROOMBOOK_API_BASE")]
    api_base: String,

    /// Room to include in the bookable universe (repeatable).
    /// Defaults to the built-in conference rooms when omitted.
    #[arg(long = "room")]
    rooms: Vec<String>,

    /// Employee id for login. Requests go unauthenticated when omitted.
    #[arg(long, env = "ROOMBOOK_EMP_ID")]
    emp_id: Option<String>,

    /// Password for login
    #[arg(long, env = "ROOMBOOK_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every reservation the service knows about
    List,
    /// Print reservations that have not ended and start within a week
    Upcoming,
    /// Run the live display board loop
    Board,
    /// Create a reservation
    Reserve(ReservationArgs),
    /// Edit an existing reservation
    Amend {
        /// The reservation id to edit
        #[arg(long)]
        id: i64,
        #[command(flatten)]
        fields: ReservationArgs,
    },
    /// Delete a reservation
    Cancel {
        /// The reservation id to delete
        #[arg(long)]
        id: i64,
    },
    /// Search the service by date range, room, and keyword
    Search {
        /// Start of the date range (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: String,
        /// End of the date range (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: String,
        /// Room substring filter
        #[arg(long)]
        place: Option<String>,
        /// Keyword matched against name, unit, reporter, and room
        #[arg(long)]
        q: Option<String>,
    },
}

/// Field set shared by reserve and amend.
#[derive(clap::Args, Debug)]
struct ReservationArgs {
    /// The meeting name
    #[arg(long)]
    name: String,
    /// The organizing unit
    #[arg(long, default_value = "")]
    unit: String,
    /// The calendar date (YYYY-MM-DD)
    #[arg(long)]
    date: String,
    /// The start time (HH:MM)
    #[arg(long)]
    start: String,
    /// The end time (HH:MM)
    #[arg(long)]
    end: String,
    /// The participants
    #[arg(long, default_value = "")]
    people: String,
    /// The reporter
    #[arg(long, default_value = "")]
    reporter: String,
    /// The room identifier
    #[arg(long)]
    place: String,
}

impl ReservationArgs {
    fn into_request(self, id: Option<i64>) -> ReservationRequest {
        ReservationRequest {
            id,
            name: self.name,
            unit: self.unit,
            date: self.date,
            start: self.start,
            end: self.end,
            people: self.people,
            reporter: self.reporter,
            place: self.place,
            attachments: Vec::new(),
        }
    }
}

fn print_rows(rows: &[Reservation]) {
    if rows.is_empty() {
        println!("(no reservations)");
        return;
    }
    for row in rows {
        let id: String = row.id().map_or_else(|| String::from("-"), |id| id.to_string());
        println!(
            "#{id}  {} ({})  {}  {}  {}",
            row.date_text(),
            weekday_label(row.date),
            row.time_label(),
            row.place,
            row.name
        );
    }
}

/// Runs the display board: reconciliation and the shared clock tick in
/// the background while the foreground reprints the active view.
async fn run_board(store: ReservationStore<HttpBackend>) -> ! {
    let store: Arc<Mutex<ReservationStore<HttpBackend>>> = Arc::new(Mutex::new(store));
    let now: SharedNow = SharedNow::new();

    let _reconciler = spawn_reconciler(
        Arc::clone(&store),
        Duration::from_secs(DEFAULT_RECONCILE_SECS),
    );
    let _refresher = spawn_now_refresher(now.clone(), Duration::from_secs(DEFAULT_NOW_REFRESH_SECS));

    let mut ticker = tokio::time::interval(Duration::from_secs(DEFAULT_NOW_REFRESH_SECS));
    loop {
        ticker.tick().await;
        let instant = now.get();
        let rows: Vec<Reservation> = store.lock().await.active_rows(instant);
        println!("== {} ==", instant.format("%Y-%m-%d %H:%M"));
        print_rows(&rows);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let backend: HttpBackend = HttpBackend::new(args.api_base.clone());
    if let (Some(emp_id), Some(password)) = (args.emp_id.as_deref(), args.password.as_deref()) {
        let profile: SessionProfile = backend.login(emp_id, password).await?;
        info!(subject = %profile.emp_id, name = %profile.name, "logged in");
    }

    let mut config: StoreConfig = StoreConfig::default();
    if !args.rooms.is_empty() {
        config.rooms = args.rooms.clone();
    }
    let mut store: ReservationStore<HttpBackend> = ReservationStore::new(backend, config);

    match args.command {
        Command::List => {
            store.reconcile().await?;
            print_rows(&store.admin_rows());
        }
        Command::Upcoming => {
            store.reconcile().await?;
            print_rows(&store.upcoming_rows(Local::now().naive_local()));
        }
        Command::Board => run_board(store).await,
        Command::Reserve(fields) => {
            store.reconcile().await?;
            let committed: Reservation = store
                .create(&fields.into_request(None), Local::now().naive_local())
                .await?;
            let id: i64 = committed.id().unwrap_or_default();
            println!(
                "reserved #{id}  {} {}  {}",
                committed.date_text(),
                committed.time_label(),
                committed.place
            );
        }
        Command::Amend { id, fields } => {
            store.reconcile().await?;
            let updated: Reservation = store
                .update(&fields.into_request(Some(id)), Local::now().naive_local())
                .await?;
            println!(
                "amended #{id}  {} {}  {}",
                updated.date_text(),
                updated.time_label(),
                updated.place
            );
        }
        Command::Cancel { id } => {
            store.remove(id).await?;
            println!("cancelled #{id}");
        }
        Command::Search { from, to, place, q } => {
            let hits: Vec<Reservation> = store
                .search(&SearchQuery {
                    from,
                    to,
                    place,
                    keyword: q,
                })
                .await?;
            print_rows(&hits);
        }
    }

    Ok(())
}
