//! Engine lifecycle event handling.

use super::UpdateService;
use crate::engine::{CheckOutcome, DownloadProgress, EngineEvent, UpdateInfo};
use crate::state::UpdatePhase;
use crate::ui::Notification;

impl UpdateService {
    /// React to one engine event. Events must be delivered in emission order.
    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        log::debug!("Engine event: {}", event.name());
        match event {
            EngineEvent::Error(message) => self.on_engine_error(message),
            EngineEvent::CheckingForUpdate => self.state.transition(UpdatePhase::Checking),
            EngineEvent::UpdateAvailable(info) => self.on_update_available(&info),
            EngineEvent::UpdateNotAvailable => {
                log::info!("Up to date (v{})", self.current_version);
                self.state.transition(UpdatePhase::Idle);
            }
            EngineEvent::DownloadProgress(progress) => self.on_download_progress(progress),
            EngineEvent::BeforeQuitForUpdate => {
                log::info!(
                    "Quitting for update; notifying {} listener(s)",
                    self.before_quit_listeners.len()
                );
                for listener in &mut self.before_quit_listeners {
                    listener();
                }
            }
            EngineEvent::UpdateDownloaded(info) => {
                self.on_update_downloaded(info);
            }
            EngineEvent::CheckFinished {
                generation,
                outcome,
            } => self.on_check_finished(generation, outcome),
        }
    }

    fn on_engine_error(&mut self, message: String) {
        log::error!("Update engine error: {}", message);
        self.state.record_error(message.as_str());
        let notification =
            Notification::new("Update failed", message).silent(self.silent_notifications);
        self.notifier.show(&notification);
    }

    fn on_update_available(&mut self, info: &UpdateInfo) {
        self.state.transition(UpdatePhase::Available);
        log::info!(
            "Update available: {} (current: {})",
            info.display_version(),
            self.current_version
        );
        let notification = Notification::new(
            "Update available",
            format!(
                "Version {} is available. You are running {}.",
                info.display_version(),
                self.current_version
            ),
        )
        .with_subtitle("Downloading in the background")
        .silent(self.silent_notifications);
        self.notifier.show(&notification);
    }

    fn on_download_progress(&mut self, progress: DownloadProgress) {
        self.state.transition(UpdatePhase::Downloading);
        self.state.last_update_size = progress.total;
        let fraction = progress.fraction();
        log::debug!(
            "Download progress {:.1}% ({}/{} bytes)",
            fraction * 100.0,
            progress.transferred,
            progress.total
        );
        if self.host.window_count() > 0 {
            self.host.set_progress(Some(fraction));
        }
    }

    fn on_check_finished(&mut self, generation: u64, outcome: CheckOutcome) {
        if !self.state.is_current(generation) {
            log::debug!(
                "Ignoring stale result of check #{} (current #{})",
                generation,
                self.state.generation
            );
            return;
        }
        // Still `Checking` means the engine ended the check without reporting
        // its result as a lifecycle event; settle the phase from the outcome.
        let unsettled = self.state.phase == UpdatePhase::Checking;
        match outcome {
            CheckOutcome::UpdateFound(version) => {
                log::info!("Check #{} found v{}", generation, version)
            }
            CheckOutcome::UpToDate => {
                log::info!("Check #{} found no update", generation);
                if unsettled {
                    self.state.transition(UpdatePhase::Idle);
                }
            }
            CheckOutcome::Failed(e) => {
                log::warn!("Check #{} failed: {}", generation, e);
                if unsettled {
                    self.on_engine_error(e);
                }
            }
        }
    }
}
