//! Update engine backed by an external updater executable.
//!
//! The updater is invoked as `<command> check` and `<command> install
//! [--silent]`. It reports lifecycle events on stdout, one JSON object per
//! line:
//!
//! ```text
//! {"event":"checking-for-update"}
//! {"event":"update-available","version":"2.0.0","release_notes":"**Faster**"}
//! {"event":"download-progress","percent":42.0,"transferred":420,"total":1000}
//! {"event":"update-downloaded","version":"2.0.0"}
//! {"event":"error","message":"feed unreachable"}
//! ```
//!
//! A reader thread per invocation forwards events into the host loop's
//! channel; the service itself never sees the threads.

use liftoff_update::{
    CheckOutcome, DownloadProgress, EngineError, EngineEvent, UpdateEngine, UpdateInfo,
};
use serde::Deserialize;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Sender};

/// One line of updater output
#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
enum WireEvent {
    Error { message: String },
    CheckingForUpdate,
    UpdateAvailable(UpdateInfo),
    UpdateNotAvailable,
    DownloadProgress(DownloadProgress),
    BeforeQuitForUpdate,
    UpdateDownloaded(UpdateInfo),
}

impl From<WireEvent> for EngineEvent {
    fn from(event: WireEvent) -> Self {
        match event {
            WireEvent::Error { message } => EngineEvent::Error(message),
            WireEvent::CheckingForUpdate => EngineEvent::CheckingForUpdate,
            WireEvent::UpdateAvailable(info) => EngineEvent::UpdateAvailable(info),
            WireEvent::UpdateNotAvailable => EngineEvent::UpdateNotAvailable,
            WireEvent::DownloadProgress(progress) => EngineEvent::DownloadProgress(progress),
            WireEvent::BeforeQuitForUpdate => EngineEvent::BeforeQuitForUpdate,
            WireEvent::UpdateDownloaded(info) => EngineEvent::UpdateDownloaded(info),
        }
    }
}

/// Parse one stdout line. Blank lines yield `Ok(None)`.
pub fn parse_event_line(line: &str) -> Result<Option<EngineEvent>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let event: WireEvent = serde_json::from_str(line)?;
    Ok(Some(event.into()))
}

/// Engine that shells out to an updater executable
pub struct ProcessEngine {
    program: PathBuf,
    args: Vec<String>,
    events: Sender<EngineEvent>,
}

impl ProcessEngine {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>, events: Sender<EngineEvent>) -> Self {
        Self {
            program: program.into(),
            args,
            events,
        }
    }

    /// Build from a config command line such as `"/opt/app/updater --channel beta"`.
    pub fn from_command_line(
        command_line: &str,
        events: Sender<EngineEvent>,
    ) -> Result<Self, EngineError> {
        let mut words = shell_words::split(command_line)
            .map_err(|e| EngineError::Unavailable(format!("invalid engine command: {}", e)))?
            .into_iter();
        let program = words
            .next()
            .ok_or_else(|| EngineError::Unavailable("engine command is empty".to_string()))?;
        Ok(Self::new(program, words.collect(), events))
    }

    fn spawn(&self, extra: &[&str]) -> Result<Child, EngineError> {
        Command::new(&self.program)
            .args(&self.args)
            .args(extra)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                EngineError::Unavailable(format!(
                    "failed to start {}: {}",
                    self.program.display(),
                    e
                ))
            })
    }
}

/// Read events from `child` until it exits, forwarding each to `events`.
///
/// Returns the check outcome implied by the events seen. A non-zero exit
/// with no `error` event is reported as an error event.
fn forward_events(mut child: Child, events: &Sender<EngineEvent>) -> CheckOutcome {
    let mut outcome = CheckOutcome::Failed("updater produced no result".to_string());
    let mut saw_error = false;

    if let Some(stdout) = child.stdout.take() {
        for line in BufReader::new(stdout).lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    log::warn!("Failed to read updater output: {}", e);
                    break;
                }
            };
            let event = match parse_event_line(&line) {
                Ok(Some(event)) => event,
                Ok(None) => continue,
                Err(e) => {
                    log::warn!("Ignoring malformed updater output {:?}: {}", line, e);
                    continue;
                }
            };
            match &event {
                EngineEvent::UpdateAvailable(info) => {
                    outcome = CheckOutcome::UpdateFound(info.version.clone())
                }
                EngineEvent::UpdateNotAvailable => outcome = CheckOutcome::UpToDate,
                EngineEvent::Error(message) => {
                    saw_error = true;
                    outcome = CheckOutcome::Failed(message.clone());
                }
                _ => {}
            }
            if events.send(event).is_err() {
                // Host loop is gone; nothing left to report to.
                let _ = child.kill();
                break;
            }
        }
    }

    match child.wait() {
        Ok(status) if !status.success() && !saw_error => {
            let message = format!("updater exited with {}", status);
            let _ = events.send(EngineEvent::Error(message.clone()));
            outcome = CheckOutcome::Failed(message);
        }
        Ok(_) => {}
        Err(e) => log::warn!("Failed to wait for updater: {}", e),
    }
    outcome
}

/// Kill `child` and wait for it so no updater outlives a failed launch.
fn reap(child: &mut Child) {
    if let Err(e) = child.kill() {
        log::debug!("Updater already exited: {}", e);
    }
    if let Err(e) = child.wait() {
        log::warn!("Failed to reap updater: {}", e);
    }
}

/// Give `child` to its reader thread, reaping it if the thread is gone.
fn hand_off(child_tx: &Sender<Child>, child: Child) -> Result<(), EngineError> {
    match child_tx.send(child) {
        Ok(()) => Ok(()),
        Err(mpsc::SendError(mut child)) => {
            reap(&mut child);
            Err(EngineError::Command(
                "updater reader thread exited before the updater started".to_string(),
            ))
        }
    }
}

impl ProcessEngine {
    /// Start the reader thread, then the updater with `extra` arguments.
    ///
    /// The thread exists before the child does, so a thread spawn failure
    /// never leaves an unread updater running. `finish` runs on the reader
    /// thread with the outcome once the updater exits.
    fn launch(
        &self,
        extra: &[&str],
        thread_name: String,
        finish: impl FnOnce(CheckOutcome, &Sender<EngineEvent>) + Send + 'static,
    ) -> Result<(), EngineError> {
        let (child_tx, child_rx) = mpsc::channel::<Child>();
        let events = self.events.clone();
        std::thread::Builder::new()
            .name(thread_name)
            .spawn(move || {
                // Sender dropped without a child: the updater never started
                if let Ok(child) = child_rx.recv() {
                    let outcome = forward_events(child, &events);
                    finish(outcome, &events);
                }
            })
            .map_err(|e| EngineError::Command(format!("failed to spawn reader thread: {}", e)))?;

        let child = self.spawn(extra)?;
        hand_off(&child_tx, child)
    }
}

impl UpdateEngine for ProcessEngine {
    fn check_for_updates(&self, generation: u64) -> Result<(), EngineError> {
        self.launch(
            &["check"],
            format!("liftoff-check-{}", generation),
            move |outcome, events| {
                let _ = events.send(EngineEvent::CheckFinished {
                    generation,
                    outcome,
                });
            },
        )
    }

    fn quit_and_install(&self, silent: bool) -> Result<(), EngineError> {
        let args: &[&str] = if silent {
            &["install", "--silent"]
        } else {
            &["install"]
        };
        self.launch(args, "liftoff-install".into(), |_, _| {})
    }
}
