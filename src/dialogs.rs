//! Native message dialogs backed by `rfd`.

use liftoff_update::{ConfirmResponse, DialogError, Dialogs};
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

const INSTALL_LABEL: &str = "Install";
const CANCEL_LABEL: &str = "Cancel";

/// Shows blocking OS dialogs
#[derive(Debug, Default)]
pub struct NativeDialogs;

impl NativeDialogs {
    pub fn new() -> Self {
        Self
    }
}

/// Whether a windowing system is reachable. rfd would otherwise block or
/// silently return a default answer on a headless session.
fn display_available() -> bool {
    #[cfg(any(
        target_os = "linux",
        target_os = "dragonfly",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd"
    ))]
    {
        std::env::var_os("DISPLAY").is_some() || std::env::var_os("WAYLAND_DISPLAY").is_some()
    }
    #[cfg(not(any(
        target_os = "linux",
        target_os = "dragonfly",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd"
    )))]
    {
        true
    }
}

/// Map an rfd result from the install/cancel dialog onto a response.
pub fn confirm_response(result: &MessageDialogResult) -> ConfirmResponse {
    match result {
        MessageDialogResult::Ok | MessageDialogResult::Yes => ConfirmResponse::Install,
        MessageDialogResult::Custom(label) if label == INSTALL_LABEL => ConfirmResponse::Install,
        _ => ConfirmResponse::Cancel,
    }
}

impl Dialogs for NativeDialogs {
    fn show_information(&self, title: &str, body: &str) -> Result<(), DialogError> {
        if !display_available() {
            return Err(DialogError::Unavailable);
        }
        MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(title)
            .set_description(body)
            .set_buttons(MessageButtons::Ok)
            .show();
        Ok(())
    }

    fn confirm(&self, title: &str, body: &str) -> Result<ConfirmResponse, DialogError> {
        if !display_available() {
            return Err(DialogError::Unavailable);
        }
        let result = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(title)
            .set_description(body)
            .set_buttons(MessageButtons::OkCancelCustom(
                INSTALL_LABEL.to_string(),
                CANCEL_LABEL.to_string(),
            ))
            .show();
        Ok(confirm_response(&result))
    }
}
