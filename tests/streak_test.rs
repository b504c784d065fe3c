mod helpers;

use focus_guard::journal::streak::compute_streak;
use focus_guard::journal::template::{is_meaningful, NOTE_TEMPLATE};
use helpers::{ago, service_for, store_for, test_vault, today, write_note};

#[test]
fn template_only_notes_are_not_meaningful() {
    let vault = test_vault();
    write_note(vault.path(), 1, NOTE_TEMPLATE);
    write_note(vault.path(), 2, &format!("\n\n{}\n\n", NOTE_TEMPLATE.trim()));
    let store = store_for(vault.path());

    assert!(!is_meaningful(&store, ago(1)));
    assert!(!is_meaningful(&store, ago(2)));
    assert!(!is_meaningful(&store, ago(3)));
}

#[test]
fn streak_counts_consecutive_prior_days() {
    let vault = test_vault();
    for n in [1, 2, 3, 5, 6] {
        write_note(vault.path(), n, "- [x] worked out");
    }
    write_note(vault.path(), 4, NOTE_TEMPLATE);

    let report = service_for(vault.path()).streak_report(today()).unwrap();
    assert_eq!(report.current_streak, 3);
    let done: Vec<bool> = report.days.iter().map(|d| d.done).collect();
    assert_eq!(done, vec![true, true, false, true, true, true, false]);
}

#[test]
fn untouched_today_keeps_prior_streak() {
    let vault = test_vault();
    write_note(vault.path(), 1, "yesterday's log");
    // Opening today's note creates the blank template.
    let service = service_for(vault.path());
    service.get_or_create_today_note(today()).unwrap();

    let report = service.streak_report(today()).unwrap();
    assert_eq!(report.current_streak, 1);
    assert!(!report.days[6].done);
    assert!(report.days[6].is_today);
}

#[test]
fn configured_lookback_caps_the_walk() {
    let vault = test_vault();
    for n in 1..=20 {
        write_note(vault.path(), n, "entry");
    }
    let store = store_for(vault.path());
    assert_eq!(compute_streak(&store, today(), 5).current_streak, 5);

    let service = service_for(vault.path());
    service
        .config()
        .update(|c| c.streak.max_lookback_days = 12)
        .unwrap();
    assert_eq!(service.streak_report(today()).unwrap().current_streak, 12);
}
