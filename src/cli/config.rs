use anyhow::Result;
use focus_guard::journal::service::{ConfigUpdate, JournalService};

/// Print the effective configuration as TOML.
pub fn show(service: &JournalService) -> Result<()> {
    let snapshot = service.config().snapshot();
    print!("{}", toml::to_string_pretty(&*snapshot)?);
    Ok(())
}

/// Persist a vault and/or carryover change.
pub fn set(service: &JournalService, vault: Option<String>, carryover: Option<bool>) -> Result<()> {
    if vault.is_none() && carryover.is_none() {
        anyhow::bail!("nothing to change: pass --vault and/or --carryover");
    }

    let view = service.update_config(ConfigUpdate { vault, carryover })?;
    let vault = if view.vault.is_empty() {
        "(not configured)"
    } else {
        view.vault.as_str()
    };
    println!("Vault:      {vault}");
    println!("Carryover:  {}", if view.carryover { "on" } else { "off" });
    if let Some(path) = service.config().path() {
        println!("Saved to {}", path.display());
    }
    Ok(())
}
