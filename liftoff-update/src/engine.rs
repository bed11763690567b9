//! External update engine interface.
//!
//! The engine owns feed queries, downloads, verification, and installation.
//! This crate only issues two commands (check, quit-and-install) and reacts
//! to the lifecycle events the engine emits, in emission order.

use serde::{Deserialize, Serialize};

/// Information about a release delivered by the engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateInfo {
    /// Semantic version of the incoming release
    pub version: String,
    /// Release notes as markdown, if the feed provided any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_notes: Option<String>,
}

impl UpdateInfo {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            release_notes: None,
        }
    }

    pub fn with_release_notes(mut self, notes: impl Into<String>) -> Self {
        self.release_notes = Some(notes.into());
        self
    }

    /// Version string with any leading `v` removed
    pub fn display_version(&self) -> &str {
        self.version.strip_prefix('v').unwrap_or(&self.version)
    }
}

/// Download progress payload
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DownloadProgress {
    /// Percentage complete, 0–100
    pub percent: f64,
    /// Bytes transferred so far
    pub transferred: u64,
    /// Total payload size in bytes
    pub total: u64,
}

impl DownloadProgress {
    /// Progress as a fraction in `0.0..=1.0`.
    ///
    /// Prefers the byte counts; falls back to `percent` when `total` is zero.
    pub fn fraction(&self) -> f64 {
        let raw = if self.total > 0 {
            self.transferred as f64 / self.total as f64
        } else {
            self.percent / 100.0
        };
        if raw.is_finite() { raw.clamp(0.0, 1.0) } else { 0.0 }
    }
}

/// Final result of a check issued with `check_for_updates`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The feed offered this version
    UpdateFound(String),
    /// Already on the latest version
    UpToDate,
    /// The check failed
    Failed(String),
}

/// Lifecycle events emitted by the engine
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Error(String),
    CheckingForUpdate,
    UpdateAvailable(UpdateInfo),
    UpdateNotAvailable,
    DownloadProgress(DownloadProgress),
    BeforeQuitForUpdate,
    UpdateDownloaded(UpdateInfo),
    /// Completion of the check identified by `generation`
    CheckFinished {
        generation: u64,
        outcome: CheckOutcome,
    },
}

impl EngineEvent {
    /// Short event name for logs
    pub fn name(&self) -> &'static str {
        match self {
            EngineEvent::Error(_) => "error",
            EngineEvent::CheckingForUpdate => "checking-for-update",
            EngineEvent::UpdateAvailable(_) => "update-available",
            EngineEvent::UpdateNotAvailable => "update-not-available",
            EngineEvent::DownloadProgress(_) => "download-progress",
            EngineEvent::BeforeQuitForUpdate => "before-quit-for-update",
            EngineEvent::UpdateDownloaded(_) => "update-downloaded",
            EngineEvent::CheckFinished { .. } => "check-finished",
        }
    }
}

/// Errors raised when a command cannot be handed to the engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The engine could not be started or reached
    #[error("update engine unavailable: {0}")]
    Unavailable(String),

    /// The engine rejected or failed the command
    #[error("update engine command failed: {0}")]
    Command(String),
}

/// Commands accepted by an update engine.
///
/// Both calls return promptly; the work happens asynchronously and is
/// reported back as [`EngineEvent`]s delivered to the service loop.
pub trait UpdateEngine {
    /// Start a check. The engine reports `EngineEvent::CheckFinished` with the
    /// same `generation` once the check resolves.
    fn check_for_updates(&self, generation: u64) -> Result<(), EngineError>;

    /// Quit the application and install the downloaded update.
    fn quit_and_install(&self, silent: bool) -> Result<(), EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_from_bytes() {
        let p = DownloadProgress {
            percent: 10.0,
            transferred: 512,
            total: 1024,
        };
        assert!((p.fraction() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fraction_falls_back_to_percent() {
        let p = DownloadProgress {
            percent: 25.0,
            transferred: 0,
            total: 0,
        };
        assert!((p.fraction() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fraction_clamped() {
        let p = DownloadProgress {
            percent: 250.0,
            transferred: 0,
            total: 0,
        };
        assert_eq!(p.fraction(), 1.0);
        let p = DownloadProgress {
            percent: f64::NAN,
            transferred: 0,
            total: 0,
        };
        assert_eq!(p.fraction(), 0.0);
    }

    #[test]
    fn test_display_version_strips_prefix() {
        assert_eq!(UpdateInfo::new("v2.1.0").display_version(), "2.1.0");
        assert_eq!(UpdateInfo::new("2.1.0").display_version(), "2.1.0");
    }
}
