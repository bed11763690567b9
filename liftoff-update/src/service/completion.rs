//! Download-completion flow: notify, then ask before quitting to install.

use super::UpdateService;
use crate::engine::UpdateInfo;
use crate::release_notes;
use crate::state::UpdatePhase;
use crate::ui::{ConfirmResponse, Notification};

const CONFIRM_TITLE: &str = "Install update";
const CONFIRM_BODY: &str = "Are you sure you want to update?";

/// Terminal state of `on_update_downloaded`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// User confirmed; quit-and-install was issued
    Installing,
    /// User declined; the update waits for the next launch
    Deferred,
    /// The confirmation dialog could not be shown
    DialogFailed,
}

impl UpdateService {
    /// Handle a finished download.
    ///
    /// The service stays busy afterwards whatever the user answers, so a
    /// pending update is not re-offered on every timer tick.
    pub fn on_update_downloaded(&mut self, info: UpdateInfo) -> CompletionOutcome {
        log::info!("Update v{} downloaded", info.display_version());

        self.host.focus();
        self.state.transition(UpdatePhase::Downloaded);
        if self.host.window_count() > 0 {
            self.host.set_progress(None);
        }

        if let Some(notes) = info
            .release_notes
            .as_deref()
            .filter(|notes| !notes.trim().is_empty())
        {
            let plain = release_notes::to_plain_text(notes);
            if let Err(e) = self.store.set_last_release_notes(plain) {
                log::warn!("Failed to persist release notes: {}", e);
            }
        }

        let notification = Notification::new(
            "Update downloaded",
            format!(
                "Version {} is ready to install.",
                info.display_version()
            ),
        )
        .silent(self.silent_notifications);
        self.notifier.show(&notification);

        if self.platform.supports_dock_bounce() {
            self.host.bounce_dock();
        }

        match self.dialogs.confirm(CONFIRM_TITLE, CONFIRM_BODY) {
            Err(e) => {
                log::error!("Update confirmation dialog failed: {}", e);
                CompletionOutcome::DialogFailed
            }
            Ok(ConfirmResponse::Install) => {
                self.quit_install_update();
                CompletionOutcome::Installing
            }
            Ok(ConfirmResponse::Cancel) => {
                log::info!("Update v{} deferred by user", info.display_version());
                CompletionOutcome::Deferred
            }
        }
    }
}
