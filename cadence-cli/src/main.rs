mod commands;
mod config;
mod render;
mod store;

use anyhow::Result;
use cadence_core::EventOps;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::edit::EditArgs;
use crate::commands::new::NewArgs;
use crate::config::Cadence;
use crate::store::JsonDirStore;

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Manage your events and recurring schedules from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an event, expanding a repeat rule into dated instances
    New(NewArgs),
    /// Show upcoming events as a day-grouped agenda
    List {
        /// Show events from this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Show events until this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Only show events belonging to this group
        #[arg(short, long)]
        group: Option<String>,

        /// Ignore the date window and show everything
        #[arg(short, long)]
        all: bool,
    },
    /// Edit one event, or a whole group with --all
    Edit(EditArgs),
    /// Delete one event, or a whole group with --all
    Delete {
        /// Id of the event to delete
        id: String,

        /// Delete every attached event in the group
        #[arg(long)]
        all: bool,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cadence = Cadence::load()?;
    let store = JsonDirStore::open(cadence.data_path())?;
    let ops = EventOps::new(store);

    match cli.command {
        Commands::New(args) => commands::new::run(&ops, &cadence, args).await,
        Commands::List {
            from,
            to,
            group,
            all,
        } => commands::list::run(&ops, from, to, group, all).await,
        Commands::Edit(args) => commands::edit::run(&ops, args).await,
        Commands::Delete { id, all, yes } => commands::delete::run(&ops, id, all, yes).await,
    }
}
