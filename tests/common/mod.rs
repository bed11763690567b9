//! Shared integration test helpers for liftoff.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{scripted_service, write_updater_script};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a subset
//! of helpers is used per file.

#![allow(dead_code)]

use liftoff::config::UpdateConfig;
use liftoff::update::{
    Collaborators, ConfirmResponse, DialogError, Dialogs, EngineError, EngineEvent, Environment,
    HostApp, InstallationType, Notification, Notifier, Platform, UpdateEngine, UpdateService,
    VersionStore,
};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc::Sender;
use tempfile::TempDir;

/// Titles of every notification shown, in order
#[derive(Debug, Clone, Default)]
pub struct Shown(Rc<RefCell<Vec<String>>>);

impl Shown {
    pub fn titles(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

struct RecordingNotifier(Shown);

impl Notifier for RecordingNotifier {
    fn show(&self, notification: &Notification) {
        self.0.0.borrow_mut().push(notification.title.clone());
    }
}

struct FixedDialogs(ConfirmResponse);

impl Dialogs for FixedDialogs {
    fn show_information(&self, _title: &str, _body: &str) -> Result<(), DialogError> {
        Ok(())
    }

    fn confirm(&self, _title: &str, _body: &str) -> Result<ConfirmResponse, DialogError> {
        Ok(self.0)
    }
}

struct NoWindows;

impl HostApp for NoWindows {
    fn window_count(&self) -> usize {
        0
    }
    fn set_progress(&self, _fraction: Option<f64>) {}
    fn focus(&self) {}
    fn remove_shutdown_blockers(&self) {}
}

/// Engine that answers every command by posting a fixed event script to the
/// loop channel, the way an out-of-process engine would.
pub struct ScriptedEngine {
    pub events: Sender<EngineEvent>,
    pub on_check: Vec<EngineEvent>,
    pub on_install: Vec<EngineEvent>,
}

impl UpdateEngine for ScriptedEngine {
    fn check_for_updates(&self, generation: u64) -> Result<(), EngineError> {
        for event in &self.on_check {
            let _ = self.events.send(event.clone());
        }
        let _ = self.events.send(EngineEvent::CheckFinished {
            generation,
            outcome: liftoff::update::CheckOutcome::UpToDate,
        });
        Ok(())
    }

    fn quit_and_install(&self, _silent: bool) -> Result<(), EngineError> {
        for event in &self.on_install {
            let _ = self.events.send(event.clone());
        }
        Ok(())
    }
}

/// Started service driven by a [`ScriptedEngine`]
pub fn scripted_service(
    engine: ScriptedEngine,
    response: ConfirmResponse,
) -> (UpdateService, Shown) {
    let shown = Shown::default();
    let mut service = UpdateService::new(
        &UpdateConfig::default(),
        "1.0.0",
        VersionStore::in_memory(),
        Collaborators {
            engine: Some(Box::new(engine)),
            notifier: Box::new(RecordingNotifier(shown.clone())),
            dialogs: Box::new(FixedDialogs(response)),
            host: Box::new(NoWindows),
        },
    );
    service.start(
        &Environment::new(Platform::Windows, InstallationType::StandaloneBinary),
        false,
    );
    (service, shown)
}

/// Write a POSIX shell updater script into a fresh temp dir.
///
/// Run it as `sh <path>` rather than executing it directly, so the test does
/// not depend on the exec bit or race a just-closed file.
pub fn write_updater_script(body: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("updater.sh");
    std::fs::write(&path, body).expect("Failed to write updater script");
    (dir, path)
}
