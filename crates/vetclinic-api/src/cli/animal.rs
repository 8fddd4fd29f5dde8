//! Animal CLI commands: show, delete.

use anyhow::Result;
use console::style;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};

use vetclinic_types::animal::{AnimalId, AnimalWithOwner};

use crate::state::AppState;

/// Show an animal and its owner.
pub async fn show_animal(state: &AppState, id: &AnimalId, json: bool) -> Result<()> {
    let found = state.animals().get_by_id(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    print_animal(&found);
    Ok(())
}

fn print_animal(found: &AnimalWithOwner) {
    let animal = &found.animal;
    println!();
    println!("  {}", style(&animal.name).cyan().bold());
    println!();
    println!(
        "  {:<12} {}",
        style("Born:").bold(),
        animal.birth_date.format("%Y-%m-%d")
    );
    match &found.owner {
        Some(owner) => println!(
            "  {:<12} {} {}",
            style("Owner:").bold(),
            owner.name,
            style(format!("<{}>", owner.email)).dim()
        ),
        None => println!("  {:<12} {}", style("Owner:").bold(), style("unknown").dim()),
    }
    println!(
        "  {:<12} {}",
        style("ID:").bold(),
        style(animal.id.to_string()).dim()
    );
    println!();
}

/// Delete an animal after confirmation (skipped with `--force` or `--json`).
pub async fn delete_animal(state: &AppState, id: &AnimalId, force: bool, json: bool) -> Result<()> {
    let found = state.animals().get_by_id(id).await?;

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Permanently delete animal '{}'?",
                style(&found.animal.name).red().bold()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.red} {msg}")?);
    spinner.set_message(format!("Deleting {}...", found.animal.name));
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let result = state.animals().delete(id).await;
    spinner.finish_and_clear();
    result?;

    if json {
        println!("{}", serde_json::json!({"deleted": true, "id": id}));
    } else {
        println!(
            "  {} Animal '{}' deleted.",
            style("✓").red().bold(),
            found.animal.name
        );
    }

    Ok(())
}
