//! The update service façade.
//!
//! `UpdateService` is constructed once by the application bootstrap and owned
//! by it. It wires the engine adapter, the trigger scheduler, and the
//! notification/dialog flow together, and exposes the enable/disable/simulate
//! controls.
//!
//! Everything runs on the host's event-loop thread: engine events arrive via
//! [`UpdateService::handle_engine_event`], timer polls via
//! [`UpdateService::tick`].

mod completion;
mod events;
mod recent;

pub use completion::CompletionOutcome;
pub use recent::RecentUpdate;

use crate::engine::{EngineError, UpdateEngine};
use crate::environment::{Environment, Platform};
use crate::scheduler::TriggerScheduler;
use crate::simulate;
use crate::state::{ServiceState, UpdatePhase};
use crate::store::VersionStore;
use crate::ui::{Dialogs, HostApp, Notifier};
use liftoff_config::{ErrorPolicy, UpdateConfig};
use std::time::Instant;

/// External collaborators handed to the service at construction
pub struct Collaborators {
    /// Update engine; `None` when no engine is available
    pub engine: Option<Box<dyn UpdateEngine>>,
    pub notifier: Box<dyn Notifier>,
    pub dialogs: Box<dyn Dialogs>,
    pub host: Box<dyn HostApp>,
}

/// Why `request_update` did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `start` has not wired the service (or left it inert)
    NotStarted,
    Disabled,
    /// Another attempt is in flight or parked
    Busy,
    NoEngine,
}

/// Result of `request_update`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The engine accepted check number `generation`
    Issued { generation: u64 },
    Skipped(SkipReason),
    /// The engine refused to start the check
    Failed(EngineError),
}

/// Result of `start`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    Started {
        /// Outcome of the immediate trigger, when the host was already ready
        immediate_check: Option<RequestOutcome>,
        recent: RecentUpdate,
    },
    /// The environment is unsuitable; nothing was wired
    Inert(Vec<String>),
    AlreadyStarted,
}

/// Point-in-time view of the service for UIs and the CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatus {
    pub started: bool,
    pub enabled: bool,
    pub busy: bool,
    pub phase: UpdatePhase,
    pub generation: u64,
    pub last_update_size: u64,
    pub last_error: Option<String>,
    pub error_policy: ErrorPolicy,
}

type BeforeQuitListener = Box<dyn FnMut()>;

/// Coordinates update checks, notifications, and the install confirmation.
pub struct UpdateService {
    current_version: String,
    silent_notifications: bool,
    state: ServiceState,
    scheduler: TriggerScheduler,
    store: VersionStore,
    engine: Option<Box<dyn UpdateEngine>>,
    notifier: Box<dyn Notifier>,
    dialogs: Box<dyn Dialogs>,
    host: Box<dyn HostApp>,
    platform: Platform,
    /// Set once `start` has wired the engine handlers and triggers
    started: bool,
    before_quit_listeners: Vec<BeforeQuitListener>,
}

impl UpdateService {
    /// Create a service for the application running `current_version`.
    ///
    /// Pass the root crate's `env!("CARGO_PKG_VERSION")` so the version is the
    /// application's rather than this sub-crate's.
    pub fn new(
        config: &UpdateConfig,
        current_version: impl Into<String>,
        store: VersionStore,
        collaborators: Collaborators,
    ) -> Self {
        let Collaborators {
            engine,
            notifier,
            dialogs,
            host,
        } = collaborators;
        Self {
            current_version: current_version.into(),
            silent_notifications: config.silent_notifications,
            state: ServiceState::new(config.enabled, config.error_policy),
            scheduler: TriggerScheduler::new(config.check_interval()),
            store,
            engine,
            notifier,
            dialogs,
            host,
            platform: Platform::current(),
            started: false,
            before_quit_listeners: Vec::new(),
        }
    }

    /// Check the environment, then wire handlers, start the triggers, and
    /// report any update installed since the last launch.
    pub fn start(&mut self, environment: &Environment, host_ready: bool) -> StartOutcome {
        if self.started {
            return StartOutcome::AlreadyStarted;
        }

        let warnings = environment.unsuitability_warnings();
        if !warnings.is_empty() {
            for warning in &warnings {
                log::warn!("Auto-update disabled: {}", warning);
            }
            return StartOutcome::Inert(warnings);
        }

        log::info!(
            "Starting update service for v{} ({}, {})",
            self.current_version,
            environment.platform.name(),
            environment.installation.description()
        );
        self.platform = environment.platform;
        self.started = true;

        let immediate = self.scheduler.start(Instant::now(), host_ready);
        let immediate_check = immediate.then(|| self.request_update());
        let recent = self.check_recent_update();

        StartOutcome::Started {
            immediate_check,
            recent,
        }
    }

    /// Disarm the interval timer. State and the persisted record are kept.
    pub fn stop(&mut self) {
        self.scheduler.stop();
        log::info!("Update service stopped");
    }

    pub fn enable(&mut self) {
        self.state.enabled = true;
    }

    pub fn disable(&mut self) {
        self.state.enabled = false;
    }

    /// Application-activation trigger.
    pub fn on_activate(&mut self) -> Option<RequestOutcome> {
        if !self.started {
            return None;
        }
        Some(self.request_update())
    }

    /// Poll the interval timer; requests a check when it is due.
    pub fn tick(&mut self, now: Instant) -> Option<RequestOutcome> {
        if self.scheduler.tick(now) {
            Some(self.request_update())
        } else {
            None
        }
    }

    /// Register a callback for `before-quit-for-update`.
    pub fn on_before_quit(&mut self, listener: impl FnMut() + 'static) {
        self.before_quit_listeners.push(Box::new(listener));
    }

    /// Ask the engine for an update check unless disabled, busy, or engine-less.
    pub fn request_update(&mut self) -> RequestOutcome {
        if !self.started {
            log::warn!("Update check skipped: update service not started");
            return RequestOutcome::Skipped(SkipReason::NotStarted);
        }
        if !self.state.enabled {
            log::warn!("Update check skipped: updates are disabled");
            return RequestOutcome::Skipped(SkipReason::Disabled);
        }
        if self.state.is_busy() {
            log::warn!(
                "Update check skipped: an update is already in progress ({})",
                self.state.phase
            );
            return RequestOutcome::Skipped(SkipReason::Busy);
        }
        let Some(engine) = &self.engine else {
            log::warn!("Update check skipped: no update engine available");
            return RequestOutcome::Skipped(SkipReason::NoEngine);
        };

        let generation = self.state.begin_request();
        log::info!("Requesting update check #{}", generation);
        match engine.check_for_updates(generation) {
            Ok(()) => RequestOutcome::Issued { generation },
            Err(e) => {
                log::error!("Update check #{} could not start: {}", generation, e);
                self.state.transition(UpdatePhase::Idle);
                RequestOutcome::Failed(e)
            }
        }
    }

    /// Remove shutdown blockers and tell the engine to quit and install.
    ///
    /// Returns `true` when the engine accepted the command.
    pub fn quit_install_update(&mut self) -> bool {
        log::info!("Quitting to install update");
        self.host.remove_shutdown_blockers();
        self.state.transition(UpdatePhase::Installing);

        let Some(engine) = &self.engine else {
            log::warn!("Cannot install update: no update engine available");
            self.state.transition(UpdatePhase::Downloaded);
            return false;
        };
        match engine.quit_and_install(false) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Quit-and-install failed: {}", e);
                self.state.transition(UpdatePhase::Downloaded);
                false
            }
        }
    }

    /// Feed a synthetic downloaded release through the completion flow.
    pub fn simulate(&mut self) -> CompletionOutcome {
        let release =
            simulate::simulated_release(&self.current_version, &mut rand::thread_rng());
        log::info!(
            "Simulating downloaded update v{} ({} bytes)",
            release.info.version,
            release.size
        );
        self.state.last_update_size = release.size;
        self.on_update_downloaded(release.info)
    }

    pub fn status(&self) -> UpdateStatus {
        UpdateStatus {
            started: self.started,
            enabled: self.state.enabled,
            busy: self.state.is_busy(),
            phase: self.state.phase,
            generation: self.state.generation,
            last_update_size: self.state.last_update_size,
            last_error: self.state.last_error.clone(),
            error_policy: self.state.error_policy(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.enabled
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    pub fn state(&self) -> &ServiceState {
        &self.state
    }

    pub fn store(&self) -> &VersionStore {
        &self.store
    }

    pub fn scheduler(&self) -> &TriggerScheduler {
        &self.scheduler
    }

    pub fn current_version(&self) -> &str {
        &self.current_version
    }
}
