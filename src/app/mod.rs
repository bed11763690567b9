//! Application module for liftoff
//!
//! This module contains the application bootstrap:
//! - `App`: loads the config, builds the update service with the desktop
//!   collaborators, and dispatches to the selected run mode
//! - `UpdateLoop`: the host event loop driving the service

use crate::cli::{RunMode, RuntimeOptions};
use crate::config::Config;
use crate::dialogs::NativeDialogs;
use crate::host::{HeadlessHost, spawn_stdin_reader};
use crate::notifier::DesktopNotifier;
use crate::process_engine::ProcessEngine;
use crate::update::{
    Collaborators, CompletionOutcome, EngineEvent, Environment, StartOutcome, UpdateEngine,
    UpdateService, VersionStore,
};
use anyhow::Result;
use std::sync::mpsc::{self, Sender};
use std::time::{Duration, Instant};

mod event_loop;

pub use event_loop::{LoopExit, UpdateLoop, describe_status};

/// Main application entry point
pub struct App {
    config: Config,
    runtime_options: RuntimeOptions,
}

impl App {
    /// Create a new application
    pub fn new(runtime_options: RuntimeOptions) -> Result<Self> {
        let config = runtime_options.load_config()?;
        crate::debug::apply_config_level(config.log_level);
        Ok(Self {
            config,
            runtime_options,
        })
    }

    /// Run the application in the mode chosen on the command line
    pub fn run(self) -> Result<()> {
        match self.runtime_options.mode {
            RunMode::Run => self.run_loop(),
            RunMode::Simulate => self.run_simulate(),
        }
    }

    fn run_loop(self) -> Result<()> {
        let (engine_tx, engine_rx) = mpsc::channel();
        let (host_tx, host_rx) = mpsc::channel();
        let mut service = build_service(&self.config, engine_tx);

        if let Err(e) = spawn_stdin_reader(host_tx) {
            log::warn!("Host commands unavailable, stdin reader failed to start: {}", e);
        }

        match service.start(&Environment::detect(), true) {
            StartOutcome::Inert(warnings) => {
                for warning in warnings {
                    eprintln!("liftoff: auto-update disabled: {}", warning);
                }
            }
            StartOutcome::Started { recent, .. } => {
                log::info!("Update service started ({:?})", recent);
            }
            StartOutcome::AlreadyStarted => {}
        }

        let mut update_loop = UpdateLoop::new(service, engine_rx, host_rx);
        if let Some(secs) = self.runtime_options.exit_after {
            update_loop.set_deadline(Instant::now() + Duration::from_secs_f64(secs.max(0.0)));
        }
        update_loop.run();
        Ok(())
    }

    fn run_simulate(self) -> Result<()> {
        let (engine_tx, _engine_rx) = mpsc::channel();
        let mut service = build_service(&self.config, engine_tx);
        let outcome = service.simulate();
        let message = match outcome {
            CompletionOutcome::Installing => "install requested",
            CompletionOutcome::Deferred => "install deferred to next launch",
            CompletionOutcome::DialogFailed => "confirmation dialog could not be shown",
        };
        println!("Simulated update: {}", message);
        println!("{}", describe_status(&service.status()));
        Ok(())
    }
}

/// Build an update service wired to the desktop collaborators.
///
/// Engine events are sent on `engine_events`; the caller drains the matching
/// receiver on the loop thread.
pub fn build_service(config: &Config, engine_events: Sender<EngineEvent>) -> UpdateService {
    let store = VersionStore::open(config.version_state_path());

    let engine: Option<Box<dyn UpdateEngine>> = match config.updates.engine_command.as_deref() {
        Some(command) => match ProcessEngine::from_command_line(command, engine_events) {
            Ok(engine) => Some(Box::new(engine)),
            Err(e) => {
                log::warn!("Update engine disabled: {}", e);
                None
            }
        },
        None => {
            log::info!("No update engine configured (updates.engine_command)");
            None
        }
    };

    UpdateService::new(
        &config.updates,
        crate::VERSION,
        store,
        Collaborators {
            engine,
            notifier: Box::new(DesktopNotifier::new(config.app_id.as_str())),
            dialogs: Box::new(NativeDialogs::new()),
            host: Box::new(HeadlessHost),
        },
    )
}
