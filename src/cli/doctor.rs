//! CLI `doctor` command: check configuration and vault layout.

use anyhow::Result;
use focus_guard::journal::service::JournalService;
use focus_guard::store::NoteStore;

/// Print a health report for the configured vault.
pub fn doctor(service: &JournalService) -> Result<()> {
    let config = service.config();
    let snapshot = config.snapshot();

    println!("Focus Guard Health Report");
    println!("=========================");
    println!();
    match config.path() {
        Some(path) if path.exists() => println!("Config file:       {}", path.display()),
        Some(path) => println!("Config file:       {} (missing, using defaults)", path.display()),
        None => println!("Config file:       (in memory)"),
    }
    println!("Log level:         {}", snapshot.server.log_level);
    println!("Listen address:    {}:{}", snapshot.server.host, snapshot.server.port);
    println!(
        "Carryover:         {} ({} day window)",
        if snapshot.carryover.enabled { "on" } else { "off" },
        snapshot.carryover.window_days
    );
    println!("Streak lookback:   {} days", snapshot.streak.max_lookback_days);
    println!();

    let Some(vault) = snapshot.resolved_vault() else {
        println!("Vault:             (not configured)");
        println!("Run `focus-guard config set --vault <path>` to choose one.");
        return Ok(());
    };

    if !vault.is_dir() {
        println!("Vault:             {} (NOT FOUND)", vault.display());
        return Ok(());
    }
    println!("Vault:             {}", vault.display());

    let store = service.store()?;
    if store.root().is_dir() {
        println!("Notes directory:   {}", store.root().display());
    } else {
        println!(
            "Notes directory:   {} (will be created on first note)",
            store.root().display()
        );
    }
    println!("Daily notes:       {}", store.count_notes()?);

    let today = service.today();
    match store.read_note(today) {
        Ok(Some(_)) => println!("Today's note:      present ({today})"),
        Ok(None) => println!("Today's note:      not created yet ({today})"),
        Err(e) => println!("Today's note:      UNREADABLE ({e})"),
    }

    Ok(())
}
