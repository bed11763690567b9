//! Desktop notifications for update events.

use liftoff_update::{Notification, Notifier};

/// Shows notifications through the OS notification center
pub struct DesktopNotifier {
    app_name: String,
}

impl DesktopNotifier {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

/// Escape backslashes, quotes, and newlines for AppleScript string safety.
/// Order matters: escape backslashes FIRST, then quotes, then newlines.
pub fn escape_applescript(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

impl Notifier for DesktopNotifier {
    fn show(&self, notification: &Notification) {
        log::info!(
            "Notification: {} - {}",
            notification.title,
            notification.body
        );

        #[cfg(not(target_os = "macos"))]
        {
            use notify_rust::Notification as OsNotification;
            let summary = match &notification.subtitle {
                Some(subtitle) => format!("{} - {}", notification.title, subtitle),
                None => notification.title.clone(),
            };
            let mut os_notification = OsNotification::new();
            os_notification
                .summary(&summary)
                .body(&notification.body)
                .appname(&self.app_name)
                .timeout(notify_rust::Timeout::Milliseconds(8000));
            if !notification.silent {
                os_notification.sound_name("message-new-instant");
            }
            if let Err(e) = os_notification.show() {
                log::warn!("Failed to show notification: {}", e);
            }
        }

        #[cfg(target_os = "macos")]
        {
            let mut script = format!(
                r#"display notification "{}" with title "{}""#,
                escape_applescript(&notification.body),
                escape_applescript(&notification.title),
            );
            if let Some(subtitle) = &notification.subtitle {
                script.push_str(&format!(r#" subtitle "{}""#, escape_applescript(subtitle)));
            }
            if !notification.silent {
                script.push_str(r#" sound name "default""#);
            }
            if let Err(e) = std::process::Command::new("osascript")
                .arg("-e")
                .arg(&script)
                .spawn()
            {
                log::warn!("Failed to show notification for {}: {}", self.app_name, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_applescript() {
        assert_eq!(escape_applescript(r#"a "b" \c"#), r#"a \"b\" \\c"#);
        assert_eq!(escape_applescript("one\ntwo"), "one\\ntwo");
    }
}
