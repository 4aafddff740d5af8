//! Companies command - list configured purchasing companies.

use console::style;

use super::config::load_config;

pub async fn run(config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if config.order.companies.is_empty() {
        println!("{} No purchasing companies configured.", style("ℹ").blue());
        println!();
        println!("Add entries to \"order.companies\" in the configuration file.");
        return Ok(());
    }

    println!("{}", style("Purchasing companies:").bold());
    for company in &config.order.companies {
        println!(
            "  {:<12} {} ({})",
            style(&company.key).cyan(),
            company.name,
            company.tax_id
        );
        let mut location = company.address.clone();
        if let Some(commune) = &company.commune {
            location.push_str(&format!(", {}", commune));
        }
        if let Some(city) = &company.city {
            location.push_str(&format!(", {}", city));
        }
        println!("  {:<12} {}", "", location);
    }

    Ok(())
}
