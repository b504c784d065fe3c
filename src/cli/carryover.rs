use anyhow::Result;
use chrono::NaiveDate;
use focus_guard::journal::service::JournalService;

/// Print the tasks a note created on `today` would be seeded with.
pub fn carryover(service: &JournalService, today: NaiveDate) -> Result<()> {
    let snapshot = service.config().snapshot();
    if !snapshot.carryover.enabled {
        println!("Carryover is disabled.");
        return Ok(());
    }

    let tasks = service.carryover_preview(today)?;
    if tasks.is_empty() {
        println!(
            "Nothing to carry over from the last {} days.",
            snapshot.carryover.window_days
        );
        return Ok(());
    }

    println!(
        "{} task(s) would carry into {today}:",
        tasks.len()
    );
    for task in &tasks {
        println!("  - [ ] {task}");
    }
    Ok(())
}
