//! Owner CLI commands.

use anyhow::Result;
use console::style;

use vetclinic_types::owner::OwnerId;

use crate::state::AppState;

/// Show an owner's contact details.
pub async fn show_owner(state: &AppState, id: &OwnerId, json: bool) -> Result<()> {
    let owner = state.owners().get_by_id(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&owner)?);
        return Ok(());
    }

    println!();
    println!("  {}", style(&owner.name).cyan().bold());
    println!();
    println!("  {:<12} {}", style("Email:").bold(), owner.email);
    if let Some(phone) = &owner.phone_number {
        println!("  {:<12} {}", style("Phone:").bold(), phone);
    }
    if let Some(address) = &owner.address {
        println!("  {:<12} {}", style("Address:").bold(), address);
    }
    println!(
        "  {:<12} {}",
        style("ID:").bold(),
        style(owner.id.to_string()).dim()
    );
    println!();

    Ok(())
}
