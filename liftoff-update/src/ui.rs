//! Collaborator traits for everything user-facing.
//!
//! The service never renders anything itself. Desktop implementations live
//! in the root crate; tests substitute recording mocks.

/// A desktop notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub subtitle: Option<String>,
    pub body: String,
    /// Suppress the notification sound
    pub silent: bool,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            body: body.into(),
            silent: false,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }
}

/// Shows non-modal notifications
pub trait Notifier {
    fn show(&self, notification: &Notification);
}

/// Button chosen in the install confirmation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmResponse {
    Cancel = 0,
    Install = 1,
}

/// Errors raised while presenting a dialog
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialogError {
    /// No display/windowing system to show the dialog on
    #[error("no display available for dialog")]
    Unavailable,

    #[error("dialog failed: {0}")]
    Failed(String),
}

/// Modal dialogs
pub trait Dialogs {
    /// Informational dialog; returns once dismissed.
    fn show_information(&self, title: &str, body: &str) -> Result<(), DialogError>;

    /// Blocking install/cancel confirmation.
    fn confirm(&self, title: &str, body: &str) -> Result<ConfirmResponse, DialogError>;
}

/// The host application the service is embedded in
pub trait HostApp {
    /// Number of open windows
    fn window_count(&self) -> usize;

    /// Set the primary window's progress indicator (`None` clears it).
    fn set_progress(&self, fraction: Option<f64>);

    /// Bring the application to the foreground.
    fn focus(&self);

    /// Informational dock/taskbar bounce. Only called on platforms that support it.
    fn bounce_dock(&self) {}

    /// Drop close/quit handlers on the application and every window that
    /// would otherwise veto the restart.
    fn remove_shutdown_blockers(&self);
}
