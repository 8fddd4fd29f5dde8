//! Appointment CLI commands: show, list a vet's schedule, set status.

use anyhow::Result;
use chrono::{DateTime, Utc};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use vetclinic_core::policy::status::{migrate_status, valid_statuses_message};
use vetclinic_types::appointment::{AppointmentId, AppointmentStatus};
use vetclinic_types::outcome::ServiceError;
use vetclinic_types::veterinarian::VeterinarianId;

use crate::state::AppState;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

fn status_cell(status: AppointmentStatus) -> Cell {
    match status {
        AppointmentStatus::Scheduled => Cell::new("● scheduled").fg(Color::Cyan),
        AppointmentStatus::Completed => Cell::new("✓ completed").fg(Color::Green),
        AppointmentStatus::Cancelled => Cell::new("✗ cancelled").fg(Color::DarkGrey),
        legacy => Cell::new(format!("◌ {legacy}")).fg(Color::Yellow),
    }
}

/// Show an appointment with its animal, owner and veterinarian.
pub async fn show_appointment(state: &AppState, id: &AppointmentId, json: bool) -> Result<()> {
    let details = state.appointments().get_by_id(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&details)?);
        return Ok(());
    }

    let appointment = &details.appointment;
    let unknown = || style("unknown").dim().to_string();

    println!();
    println!(
        "  {} {} - {}",
        style("Appointment").cyan().bold(),
        appointment.start_time().format(TIME_FORMAT),
        appointment.end_time().format("%H:%M")
    );
    println!();
    println!("  {:<14} {}", style("Status:").bold(), appointment.status);
    println!(
        "  {:<14} {}",
        style("Animal:").bold(),
        details
            .animal
            .as_ref()
            .map(|a| a.animal.name.clone())
            .unwrap_or_else(unknown)
    );
    println!(
        "  {:<14} {}",
        style("Owner:").bold(),
        details
            .animal
            .as_ref()
            .and_then(|a| a.owner.as_ref())
            .map(|o| format!("{} <{}>", o.name, o.email))
            .unwrap_or_else(unknown)
    );
    println!(
        "  {:<14} {}",
        style("Veterinarian:").bold(),
        details
            .veterinarian
            .as_ref()
            .map(|v| v.full_name())
            .unwrap_or_else(unknown)
    );
    if let Some(notes) = &appointment.notes {
        println!("  {:<14} {}", style("Notes:").bold(), notes);
    }
    println!(
        "  {:<14} {}",
        style("ID:").bold(),
        style(appointment.id.to_string()).dim()
    );
    println!();

    Ok(())
}

/// List a veterinarian's appointments overlapping `[from, to)`.
pub async fn list_appointments(
    state: &AppState,
    vet: &VeterinarianId,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    json: bool,
) -> Result<()> {
    let schedule = state
        .appointments()
        .list_by_veterinarian_and_range(vet, from, to)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&schedule)?);
        return Ok(());
    }

    if schedule.is_empty() {
        println!();
        println!(
            "  {} No appointments between {} and {}.",
            style("i").blue().bold(),
            from.format(TIME_FORMAT),
            to.format(TIME_FORMAT)
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Start").fg(Color::White),
        Cell::new("End").fg(Color::White),
        Cell::new("Animal").fg(Color::White),
        Cell::new("Owner").fg(Color::White),
        Cell::new("Status").fg(Color::White),
        Cell::new("ID").fg(Color::White),
    ]);

    for row in &schedule {
        table.add_row(vec![
            Cell::new(row.start_time.format(TIME_FORMAT)),
            Cell::new(row.end_time.format(TIME_FORMAT)),
            Cell::new(&row.animal_name).fg(Color::Cyan),
            Cell::new(&row.owner_name),
            status_cell(row.status),
            Cell::new(row.id).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} appointment{}",
        style(schedule.len()).bold(),
        if schedule.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Change an appointment's status, evaluated against the current time.
pub async fn set_status(
    state: &AppState,
    id: &AppointmentId,
    status: &str,
    json: bool,
) -> Result<()> {
    let requested: AppointmentStatus = status
        .parse()
        .map_err(|_| ServiceError::validation(valid_statuses_message()))?;

    state
        .appointments()
        .update_status(id, requested, Utc::now())
        .await?;

    let applied = migrate_status(requested);
    if json {
        println!(
            "{}",
            serde_json::json!({"id": id, "status": applied})
        );
    } else {
        println!(
            "  {} Appointment {} is now {}.",
            style("✓").green().bold(),
            style(id.to_string()).dim(),
            style(applied).cyan()
        );
    }

    Ok(())
}
