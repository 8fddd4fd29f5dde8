//! CLI command definitions for the `vetclinic` binary.
//!
//! Uses clap derive macros for argument parsing. The CLI follows a verb-noun
//! pattern (e.g., `vetclinic show animal <id>`, `vetclinic list appointments`).

pub mod animal;
pub mod appointment;
pub mod owner;
pub mod seed;
pub mod veterinarian;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use clap_complete::Shell;

use vetclinic_infra::config::DATA_DIR_ENV;
use vetclinic_types::animal::AnimalId;
use vetclinic_types::appointment::AppointmentId;
use vetclinic_types::owner::OwnerId;
use vetclinic_types::veterinarian::VeterinarianId;

/// Run the veterinary clinic service and manage its records.
#[derive(Parser)]
#[command(name = "vetclinic", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Data directory holding `config.toml` and the default database.
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    pub data_dir: Option<PathBuf>,

    /// SQLite URL, overriding `database_url` from the config file.
    #[arg(long, global = true, env = "VETCLINIC_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Export tracing spans through OpenTelemetry (stdout).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Host to bind to (default from config: 127.0.0.1).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (default from config: 5080).
        #[arg(short, long)]
        port: Option<u16>,

        /// Skip inserting the demo roster into an empty database.
        #[arg(long)]
        no_seed: bool,
    },

    /// Insert the demo roster if no veterinarian exists yet.
    Seed,

    /// Show details of a record.
    Show {
        #[command(subcommand)]
        resource: ShowResource,
    },

    /// List records.
    #[command(alias = "ls")]
    List {
        #[command(subcommand)]
        resource: ListResource,
    },

    /// Change an appointment's status (Scheduled, Completed, Cancelled).
    #[command(name = "set-status")]
    SetStatus {
        /// Appointment ID.
        appointment_id: AppointmentId,

        /// New status. Legacy values (InProgress, NoShow) are migrated.
        status: String,
    },

    /// Delete a record.
    #[command(alias = "rm")]
    Delete {
        #[command(subcommand)]
        resource: DeleteResource,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ShowResource {
    /// Show an animal and its owner.
    Animal { id: AnimalId },

    /// Show an appointment with animal, owner and veterinarian.
    Appointment { id: AppointmentId },

    /// Show an owner.
    Owner { id: OwnerId },

    /// Show a veterinarian.
    Vet { id: VeterinarianId },
}

#[derive(Subcommand)]
pub enum ListResource {
    /// A veterinarian's appointments overlapping a time window.
    Appointments {
        /// Veterinarian ID.
        #[arg(long)]
        vet: VeterinarianId,

        /// Window start (RFC 3339, e.g. 2025-03-14T00:00:00Z).
        #[arg(long)]
        from: DateTime<Utc>,

        /// Window end (RFC 3339).
        #[arg(long)]
        to: DateTime<Utc>,
    },
}

#[derive(Subcommand)]
pub enum DeleteResource {
    /// Delete an animal (refused while it has appointments).
    Animal {
        id: AnimalId,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}
