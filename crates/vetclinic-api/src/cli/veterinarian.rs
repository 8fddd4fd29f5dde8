//! Veterinarian CLI commands.

use anyhow::Result;
use console::style;

use vetclinic_types::veterinarian::VeterinarianId;

use crate::state::AppState;

pub async fn show_veterinarian(state: &AppState, id: &VeterinarianId, json: bool) -> Result<()> {
    let vet = state.veterinarians().get_by_id(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&vet)?);
        return Ok(());
    }

    let active = if vet.is_active {
        style("● active").green()
    } else {
        style("○ inactive").yellow()
    };

    println!();
    println!("  {} {}", style(vet.full_name()).cyan().bold(), active);
    println!();
    println!("  {:<16} {}", style("Email:").bold(), vet.email);
    if let Some(phone) = &vet.phone_number {
        println!("  {:<16} {}", style("Phone:").bold(), phone);
    }
    println!(
        "  {:<16} {}",
        style("Specialization:").bold(),
        vet.specialization.as_deref().unwrap_or("General practice")
    );
    println!(
        "  {:<16} {}",
        style("ID:").bold(),
        style(vet.id.to_string()).dim()
    );
    println!();

    Ok(())
}
