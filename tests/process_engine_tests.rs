//! Tests for the external updater process adapter.
//!
//! These spawn `sh`, so they only run on Unix.

#![cfg(unix)]

mod common;

use common::write_updater_script;
use liftoff::process_engine::ProcessEngine;
use liftoff::update::{
    CheckOutcome, DownloadProgress, EngineEvent, UpdateEngine, UpdateInfo,
};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(10);

const UPDATER: &str = r#"
case "$1" in
  check)
    echo '{"event":"checking-for-update"}'
    echo '{"event":"update-available","version":"2.0.0","release_notes":"**Faster**"}'
    echo 'this line is not json'
    echo ''
    echo '{"event":"download-progress","percent":100.0,"transferred":10,"total":10}'
    echo '{"event":"update-downloaded","version":"2.0.0","release_notes":"**Faster**"}'
    ;;
  install)
    echo "$@" > "$(dirname "$0")/install-args"
    echo '{"event":"before-quit-for-update"}'
    ;;
esac
"#;

/// Collect events until `CheckFinished` (inclusive) or the sender closes.
fn collect_check(rx: &Receiver<EngineEvent>) -> Vec<EngineEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.recv_timeout(TIMEOUT) {
        let finished = matches!(event, EngineEvent::CheckFinished { .. });
        events.push(event);
        if finished {
            break;
        }
    }
    events
}

#[test]
fn test_check_forwards_events_in_order() {
    let (_dir, script) = write_updater_script(UPDATER);
    let (tx, rx) = mpsc::channel();
    let engine = ProcessEngine::new("sh", vec![script.display().to_string()], tx);

    engine.check_for_updates(7).unwrap();
    let events = collect_check(&rx);

    let info = UpdateInfo::new("2.0.0").with_release_notes("**Faster**");
    assert_eq!(
        events,
        vec![
            EngineEvent::CheckingForUpdate,
            EngineEvent::UpdateAvailable(info.clone()),
            EngineEvent::DownloadProgress(DownloadProgress {
                percent: 100.0,
                transferred: 10,
                total: 10,
            }),
            EngineEvent::UpdateDownloaded(info),
            EngineEvent::CheckFinished {
                generation: 7,
                outcome: CheckOutcome::UpdateFound("2.0.0".into()),
            },
        ]
    );
}

#[test]
fn test_up_to_date_outcome() {
    let (_dir, script) =
        write_updater_script(r#"echo '{"event":"update-not-available"}'"#);
    let (tx, rx) = mpsc::channel();
    let engine = ProcessEngine::new("sh", vec![script.display().to_string()], tx);

    engine.check_for_updates(1).unwrap();
    let events = collect_check(&rx);
    assert_eq!(
        events.last(),
        Some(&EngineEvent::CheckFinished {
            generation: 1,
            outcome: CheckOutcome::UpToDate,
        })
    );
}

#[test]
fn test_reported_error_is_not_duplicated_on_failed_exit() {
    let (_dir, script) = write_updater_script(
        r#"echo '{"event":"error","message":"feed unreachable"}'; exit 3"#,
    );
    let (tx, rx) = mpsc::channel();
    let engine = ProcessEngine::new("sh", vec![script.display().to_string()], tx);

    engine.check_for_updates(2).unwrap();
    let events = collect_check(&rx);
    assert_eq!(
        events,
        vec![
            EngineEvent::Error("feed unreachable".into()),
            EngineEvent::CheckFinished {
                generation: 2,
                outcome: CheckOutcome::Failed("feed unreachable".into()),
            },
        ]
    );
}

#[test]
fn test_silent_failed_exit_becomes_error_event() {
    let (_dir, script) = write_updater_script("exit 4");
    let (tx, rx) = mpsc::channel();
    let engine = ProcessEngine::new("sh", vec![script.display().to_string()], tx);

    engine.check_for_updates(3).unwrap();
    let events = collect_check(&rx);
    assert_eq!(events.len(), 2);
    assert!(matches!(&events[0], EngineEvent::Error(m) if m.contains("exited")));
    assert!(matches!(
        &events[1],
        EngineEvent::CheckFinished {
            generation: 3,
            outcome: CheckOutcome::Failed(_),
        }
    ));
}

#[test]
fn test_install_passes_silent_flag() {
    let (dir, script) = write_updater_script(UPDATER);
    let (tx, rx) = mpsc::channel();
    let engine = ProcessEngine::new("sh", vec![script.display().to_string()], tx);

    engine.quit_and_install(true).unwrap();
    assert_eq!(
        rx.recv_timeout(TIMEOUT).unwrap(),
        EngineEvent::BeforeQuitForUpdate
    );
    let args = std::fs::read_to_string(dir.path().join("install-args")).unwrap();
    assert_eq!(args.trim(), "install --silent");
}

#[test]
fn test_command_line_with_leading_args() {
    let (_dir, script) = write_updater_script(
        r#"[ "$1" = "--channel" ] && [ "$2" = "beta" ] && [ "$3" = "check" ] && echo '{"event":"update-not-available"}'"#,
    );
    let (tx, rx) = mpsc::channel();
    let command = format!("sh '{}' --channel beta", script.display());
    let engine = ProcessEngine::from_command_line(&command, tx).unwrap();

    engine.check_for_updates(1).unwrap();
    let events = collect_check(&rx);
    assert_eq!(events[0], EngineEvent::UpdateNotAvailable);
}
