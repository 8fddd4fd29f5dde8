//! Veterinary clinic CLI and REST API entry point.
//!
//! Binary name: `vetclinic`
//!
//! Parses CLI arguments, loads configuration, opens the database, then
//! dispatches to the appropriate command handler or starts the REST API
//! server.

mod cli;
mod http;
mod state;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use clap_complete::generate;

use vetclinic_infra::config::{load_clinic_config, resolve_data_dir};
use vetclinic_infra::sqlite::seed::{SeedOutcome, seed_if_empty};
use vetclinic_observe::tracing_setup::{
    bootstrap_guard, init_tracing, shutdown_tracing, verbosity_directive,
};

use cli::{Cli, Commands, DeleteResource, ListResource, ShowResource};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need config, tracing or a database
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "vetclinic", &mut std::io::stdout());
        return Ok(());
    }

    let directive = verbosity_directive(cli.verbose, cli.quiet);
    let data_dir = cli.data_dir.clone().unwrap_or_else(resolve_data_dir);

    // The config decides whether OTel is on, so it loads before the global
    // subscriber exists.
    let config = {
        let _guard = bootstrap_guard(directive);
        load_clinic_config(&data_dir).await
    };

    init_tracing(directive, cli.otel || config.telemetry.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli, data_dir, config).await;
    shutdown_tracing();
    result
}

async fn run(
    cli: Cli,
    data_dir: std::path::PathBuf,
    config: vetclinic_types::config::ClinicConfig,
) -> Result<()> {
    let state = AppState::init(data_dir, config, cli.database_url).await?;
    let json = cli.json;

    match cli.command {
        Commands::Serve {
            host,
            port,
            no_seed,
        } => serve(state, host, port, no_seed).await?,

        Commands::Seed => cli::seed::seed(&state, json).await?,

        Commands::Show { resource } => match resource {
            ShowResource::Animal { id } => cli::animal::show_animal(&state, &id, json).await?,
            ShowResource::Appointment { id } => {
                cli::appointment::show_appointment(&state, &id, json).await?
            }
            ShowResource::Owner { id } => cli::owner::show_owner(&state, &id, json).await?,
            ShowResource::Vet { id } => {
                cli::veterinarian::show_veterinarian(&state, &id, json).await?
            }
        },

        Commands::List { resource } => match resource {
            ListResource::Appointments { vet, from, to } => {
                cli::appointment::list_appointments(&state, &vet, from, to, json).await?
            }
        },

        Commands::SetStatus {
            appointment_id,
            status,
        } => cli::appointment::set_status(&state, &appointment_id, &status, json).await?,

        Commands::Delete { resource } => match resource {
            DeleteResource::Animal { id, force } => {
                cli::animal::delete_animal(&state, &id, force, json).await?
            }
        },

        Commands::Completions { .. } => unreachable!("handled before state init"),
    }

    Ok(())
}

/// Seed an empty database (unless disabled), then serve until Ctrl+C or SIGTERM.
async fn serve(state: AppState, host: Option<String>, port: Option<u16>, no_seed: bool) -> Result<()> {
    if state.config.seed_on_startup && !no_seed {
        match seed_if_empty(&state.db_pool, Utc::now().date_naive()).await? {
            SeedOutcome::Inserted(rows) => tracing::info!(rows, "demo roster seeded"),
            SeedOutcome::AlreadySeeded => tracing::debug!("database already seeded"),
        }
    }

    let host = host.unwrap_or_else(|| state.config.server.host.clone());
    let port = port.unwrap_or(state.config.server.port);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!();
    println!(
        "  {} Veterinary clinic API listening on {}",
        console::style("●").green().bold(),
        console::style(format!("http://{addr}/api/v1")).cyan()
    );
    println!("  Press Ctrl+C to stop.");
    println!();
    tracing::info!(%addr, "server started");

    let db_pool = state.db_pool.clone();
    let router = http::router::build_router(state);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db_pool.close().await;
    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
