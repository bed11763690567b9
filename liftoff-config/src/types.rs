use serde::{Deserialize, Serialize};

// ============================================================================
// Update Types
// ============================================================================

/// What the busy gate does after the engine reports an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Keep the gate closed: no further checks until the process restarts (default)
    #[default]
    HaltUntilRestart,
    /// Release the gate so the next trigger checks again
    RetryOnNextTrigger,
}

impl ErrorPolicy {
    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            ErrorPolicy::HaltUntilRestart => "Halt until restart",
            ErrorPolicy::RetryOnNextTrigger => "Retry on next trigger",
        }
    }

    /// Whether an engine error leaves the busy gate closed
    pub fn stays_busy_after_error(self) -> bool {
        matches!(self, ErrorPolicy::HaltUntilRestart)
    }
}

/// Configuration for automatic update coordination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateConfig {
    /// Whether update checks may be issued at all (toggled at runtime by enable/disable)
    #[serde(default = "crate::defaults::bool_true")]
    pub enabled: bool,

    /// Interval between timer-driven update checks, in milliseconds
    #[serde(default = "crate::defaults::check_interval_ms")]
    pub check_interval_ms: u64,

    /// Busy-gate behaviour after an engine error
    #[serde(default = "crate::defaults::error_policy")]
    pub error_policy: ErrorPolicy,

    /// Path to the external updater executable (None = no engine available)
    #[serde(default)]
    pub engine_command: Option<String>,

    /// Suppress the sound on update notifications
    #[serde(default = "crate::defaults::bool_false")]
    pub silent_notifications: bool,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            enabled: crate::defaults::bool_true(),
            check_interval_ms: crate::defaults::check_interval_ms(),
            error_policy: crate::defaults::error_policy(),
            engine_command: None,
            silent_notifications: crate::defaults::bool_false(),
        }
    }
}

impl UpdateConfig {
    /// The timer interval as a `Duration`
    pub fn check_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.check_interval_ms)
    }
}

// ============================================================================
// Logging
// ============================================================================

/// Log level for the debug log file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging (log file not created)
    Off,
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages (default)
    #[default]
    Info,
    /// Debug messages
    Debug,
    /// Most verbose
    Trace,
}

impl LogLevel {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}
