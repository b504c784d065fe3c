mod helpers;

use focus_guard::config::{JournalConfig, SharedConfig};
use focus_guard::error::JournalError;
use focus_guard::journal::clock::SystemClock;
use focus_guard::journal::service::{ConfigUpdate, JournalService};
use focus_guard::journal::template::NOTE_TEMPLATE;
use focus_guard::store::NoteStore;
use helpers::{ago, service_for, store_for, test_vault, today, write_note};
use std::sync::Arc;

#[test]
fn creates_template_when_nothing_to_carry() {
    let vault = test_vault();
    let service = service_for(vault.path());

    let note = service.get_or_create_today_note(today()).unwrap();
    assert!(note.created);
    assert_eq!(note.carried_tasks, 0);
    assert_eq!(note.content, NOTE_TEMPLATE);

    let stored = store_for(vault.path()).read_note(today()).unwrap();
    assert_eq!(stored.as_deref(), Some(NOTE_TEMPLATE));
}

#[test]
fn splices_carried_tasks_before_first_checkbox() {
    let vault = test_vault();
    write_note(vault.path(), 1, "- [ ] x\n- [x] y");
    write_note(vault.path(), 3, "- [ ] y\n- [ ] z");

    let note = service_for(vault.path())
        .get_or_create_today_note(today())
        .unwrap();

    assert!(note.created);
    assert_eq!(note.carried_tasks, 2);
    assert_eq!(
        note.content,
        NOTE_TEMPLATE.replacen("- [ ]", "- [ ] x\n- [ ] z\n- [ ]", 1)
    );
    assert_eq!(note.content.matches("- [ ] x").count(), 1);
}

#[test]
fn existing_note_is_returned_untouched() {
    let vault = test_vault();
    write_note(vault.path(), 0, "already here");
    write_note(vault.path(), 1, "- [ ] would carry");

    let note = service_for(vault.path())
        .get_or_create_today_note(today())
        .unwrap();
    assert!(!note.created);
    assert_eq!(note.carried_tasks, 0);
    assert_eq!(note.content, "already here");
}

#[test]
fn disabled_carryover_creates_plain_template() {
    let vault = test_vault();
    write_note(vault.path(), 1, "- [ ] pending");
    let service = service_for(vault.path());
    service
        .update_config(ConfigUpdate {
            vault: None,
            carryover: Some(false),
        })
        .unwrap();

    assert!(service.carryover_preview(today()).unwrap().is_empty());
    let note = service.get_or_create_today_note(today()).unwrap();
    assert_eq!(note.carried_tasks, 0);
    assert_eq!(note.content, NOTE_TEMPLATE);
}

#[test]
fn save_and_read_historical_note() {
    let vault = test_vault();
    let service = service_for(vault.path());

    assert_eq!(service.read_note(ago(10)).unwrap(), None);
    service.save_note(ago(10), "looking back").unwrap();
    assert_eq!(
        service.read_note(ago(10)).unwrap().as_deref(),
        Some("looking back")
    );
}

#[test]
fn missing_vault_is_configuration_error() {
    let service = JournalService::new(
        SharedConfig::in_memory(JournalConfig::default()),
        Arc::new(SystemClock),
    );
    let today = service.today();

    assert!(matches!(
        service.streak_report(today),
        Err(JournalError::Configuration(_))
    ));
    assert!(matches!(
        service.get_or_create_today_note(today),
        Err(JournalError::Configuration(_))
    ));
    assert!(matches!(
        service.save_note(today, "x"),
        Err(JournalError::Configuration(_))
    ));
}

#[test]
fn vault_update_is_validated_and_persisted() {
    let vault = test_vault();
    let config_dir = test_vault();
    let config_path = config_dir.path().join("config.toml");
    let service = JournalService::new(
        SharedConfig::new(JournalConfig::default(), &config_path),
        Arc::new(SystemClock),
    );

    let err = service
        .update_config(ConfigUpdate {
            vault: Some(vault.path().join("missing").to_string_lossy().into_owned()),
            carryover: None,
        })
        .unwrap_err();
    assert!(matches!(err, JournalError::Configuration(_)));
    assert!(!config_path.exists());

    let view = service
        .update_config(ConfigUpdate {
            vault: Some(vault.path().to_string_lossy().into_owned()),
            carryover: None,
        })
        .unwrap();
    let expected_name = vault.path().file_name().unwrap().to_string_lossy().into_owned();
    assert_eq!(view.vault_name.as_deref(), Some(expected_name.as_str()));
    assert!(view.carryover);

    let reloaded = JournalConfig::load_from(&config_path).unwrap();
    assert_eq!(reloaded.storage.vault, vault.path().to_string_lossy());
}

#[test]
fn unwritable_notes_directory_surfaces_io_error() {
    let vault = test_vault();
    let blocker = vault.path().join("Progress");
    std::fs::write(&blocker, "not a directory").unwrap();
    let service = service_for(vault.path());

    let err = service.save_note(today(), "content").unwrap_err();
    match &err {
        JournalError::Io { path, source } => {
            assert!(path.starts_with(&blocker));
            let message = err.to_string();
            assert!(message.contains(&source.to_string()), "{message}");
            assert!(message.contains("Progress"), "{message}");
        }
        other => panic!("expected io error, got {other:?}"),
    }

    let err = service.get_or_create_today_note(today()).unwrap_err();
    assert!(matches!(err, JournalError::Io { .. }), "{err:?}");
    assert!(std::fs::metadata(&blocker).unwrap().is_file());
}
