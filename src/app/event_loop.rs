//! Host event loop.
//!
//! Drains engine events and host commands on the calling thread and polls
//! the scheduler between them. Ends on `quit`, on a
//! `before-quit-for-update` event, when the deadline passes, or when both
//! channels are closed.

use crate::host::HostCommand;
use crate::update::{EngineEvent, UpdateService, UpdateStatus};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    QuitCommand,
    QuitForUpdate,
    Deadline,
    Disconnected,
}

pub struct UpdateLoop {
    service: UpdateService,
    engine_rx: Receiver<EngineEvent>,
    host_rx: Receiver<HostCommand>,
    quit_for_update: Rc<Cell<bool>>,
    deadline: Option<Instant>,
    host_open: bool,
}

impl UpdateLoop {
    pub fn new(
        mut service: UpdateService,
        engine_rx: Receiver<EngineEvent>,
        host_rx: Receiver<HostCommand>,
    ) -> Self {
        let quit_for_update = Rc::new(Cell::new(false));
        let flag = Rc::clone(&quit_for_update);
        service.on_before_quit(move || flag.set(true));
        Self {
            service,
            engine_rx,
            host_rx,
            quit_for_update,
            deadline: None,
            host_open: true,
        }
    }

    /// Stop the loop once `deadline` passes
    pub fn set_deadline(&mut self, deadline: Instant) {
        self.deadline = Some(deadline);
    }

    pub fn service(&self) -> &UpdateService {
        &self.service
    }

    pub fn into_service(self) -> UpdateService {
        self.service
    }

    /// Run until one of the exit conditions holds.
    pub fn run(&mut self) -> LoopExit {
        let exit = loop {
            if let Some(exit) = self.step(Instant::now()) {
                break exit;
            }
            match self.engine_rx.recv_timeout(POLL_INTERVAL) {
                Ok(event) => self.service.handle_engine_event(event),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    if !self.host_open {
                        break LoopExit::Disconnected;
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }
            }
        };
        log::info!("Update loop exiting: {:?}", exit);
        self.service.stop();
        exit
    }

    /// One non-blocking pass: pending engine events, host commands, timer.
    ///
    /// Once `before-quit-for-update` has been seen no further host command
    /// runs, so nothing can open a dialog while the engine is installing.
    fn step(&mut self, now: Instant) -> Option<LoopExit> {
        if self.quit_for_update.get() {
            return Some(LoopExit::QuitForUpdate);
        }
        if self.deadline.is_some_and(|deadline| now >= deadline) {
            return Some(LoopExit::Deadline);
        }

        while let Ok(event) = self.engine_rx.try_recv() {
            self.service.handle_engine_event(event);
        }
        if self.quit_for_update.get() {
            return Some(LoopExit::QuitForUpdate);
        }

        while self.host_open {
            match self.host_rx.try_recv() {
                Ok(HostCommand::Quit) => return Some(LoopExit::QuitCommand),
                Ok(command) => {
                    self.handle_host_command(command);
                    if self.quit_for_update.get() {
                        return Some(LoopExit::QuitForUpdate);
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => self.host_open = false,
            }
        }

        self.service.tick(now);
        None
    }

    fn handle_host_command(&mut self, command: HostCommand) {
        log::debug!("Host command: {:?}", command);
        match command {
            HostCommand::Check => {
                let outcome = self.service.request_update();
                log::info!("Manual check: {:?}", outcome);
            }
            HostCommand::Activate => {
                self.service.on_activate();
            }
            HostCommand::Enable => self.service.enable(),
            HostCommand::Disable => self.service.disable(),
            HostCommand::Simulate => {
                let outcome = self.service.simulate();
                log::info!("Simulated update: {:?}", outcome);
            }
            HostCommand::Status => println!("{}", describe_status(&self.service.status())),
            HostCommand::Quit => {}
        }
    }
}

/// One-line summary of the service state
pub fn describe_status(status: &UpdateStatus) -> String {
    let mut line = format!(
        "phase={} enabled={} busy={} checks={}",
        status.phase, status.enabled, status.busy, status.generation
    );
    if !status.started {
        line.push_str(" (not started)");
    }
    if status.last_update_size > 0 {
        line.push_str(&format!(" last_update_size={}", status.last_update_size));
    }
    if let Some(error) = &status.last_error {
        line.push_str(&format!(" last_error={:?}", error));
    }
    line.push_str(&format!(" policy={}", status.error_policy.display_name()));
    line
}
