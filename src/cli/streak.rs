use anyhow::Result;
use chrono::NaiveDate;
use focus_guard::journal::service::JournalService;

/// Print the streak and the 7-day window.
pub fn streak(service: &JournalService, today: NaiveDate) -> Result<()> {
    let report = service.streak_report(today)?;

    println!("Streak");
    println!("{}", "=".repeat(40));
    let unit = if report.current_streak == 1 { "day" } else { "days" };
    println!("  Current streak:      {} {unit}", report.current_streak);
    println!();

    for day in &report.days {
        let mark = if day.done { "x" } else { " " };
        let today_marker = if day.is_today { "  <- today" } else { "" };
        println!("  {} {}  [{mark}]{today_marker}", day.label, day.date);
    }

    Ok(())
}
