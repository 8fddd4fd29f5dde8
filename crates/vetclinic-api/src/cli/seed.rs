//! `vetclinic seed`: insert the demo roster into an empty database.

use anyhow::Result;
use chrono::Utc;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use vetclinic_infra::sqlite::seed::{SeedOutcome, seed_if_empty};

use crate::state::AppState;

pub async fn seed(state: &AppState, json: bool) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message("Seeding demo data...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let outcome = seed_if_empty(&state.db_pool, Utc::now().date_naive()).await;
    spinner.finish_and_clear();

    let rows = match outcome? {
        SeedOutcome::AlreadySeeded => None,
        SeedOutcome::Inserted(rows) => Some(rows),
    };

    if json {
        println!(
            "{}",
            serde_json::json!({"seeded": rows.is_some(), "rows": rows.unwrap_or(0)})
        );
        return Ok(());
    }

    match rows {
        Some(rows) => println!(
            "  {} Inserted {} demo rows.",
            style("✓").green().bold(),
            style(rows).bold()
        ),
        None => println!(
            "  {} Veterinarians already exist; nothing to seed.",
            style("i").blue().bold()
        ),
    }

    Ok(())
}
