//! Update phase state machine.
//!
//! The busy gate is derived from the phase rather than stored separately:
//! anything other than `Idle` means an update attempt is in flight (or, for
//! `Downloaded` and `Failed`, parked until restart).
//!
//! ```text
//! Idle ──request/checking──▶ Checking ──available──▶ Available ──progress──▶ Downloading
//!   ▲                           │                                               │
//!   └──────not-available────────┘                                        downloaded
//!                                                                               ▼
//!                               Installing ◀──────confirm────────────── Downloaded
//! any ──error──▶ Failed (HaltUntilRestart) | Idle (RetryOnNextTrigger)
//! ```

use liftoff_config::ErrorPolicy;

/// Phase of the current update attempt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpdatePhase {
    #[default]
    Idle,
    Checking,
    Available,
    Downloading,
    Downloaded,
    Installing,
    Failed,
}

impl UpdatePhase {
    pub fn name(self) -> &'static str {
        match self {
            UpdatePhase::Idle => "idle",
            UpdatePhase::Checking => "checking",
            UpdatePhase::Available => "available",
            UpdatePhase::Downloading => "downloading",
            UpdatePhase::Downloaded => "downloaded",
            UpdatePhase::Installing => "installing",
            UpdatePhase::Failed => "failed",
        }
    }
}

impl std::fmt::Display for UpdatePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Mutable state owned by `UpdateService`
#[derive(Debug, Clone)]
pub struct ServiceState {
    /// Whether checks may be issued
    pub enabled: bool,
    /// Phase of the current attempt
    pub phase: UpdatePhase,
    /// Identifier of the most recently issued check; 0 before the first one
    pub generation: u64,
    /// Payload size reported by the last download progress (bytes)
    pub last_update_size: u64,
    /// Message of the last engine error
    pub last_error: Option<String>,
    error_policy: ErrorPolicy,
}

impl ServiceState {
    pub fn new(enabled: bool, error_policy: ErrorPolicy) -> Self {
        Self {
            enabled,
            phase: UpdatePhase::Idle,
            generation: 0,
            last_update_size: 0,
            last_error: None,
            error_policy,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.phase != UpdatePhase::Idle
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        self.error_policy
    }

    /// Move to `phase`, logging the transition.
    pub fn transition(&mut self, phase: UpdatePhase) {
        if self.phase != phase {
            log::debug!("Update phase {} -> {}", self.phase, phase);
        }
        self.phase = phase;
    }

    /// Allocate the identifier for a new check and enter `Checking`.
    pub fn begin_request(&mut self) -> u64 {
        self.generation += 1;
        self.transition(UpdatePhase::Checking);
        self.generation
    }

    /// Whether `generation` names the most recently issued check
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Record an engine error and apply the configured policy.
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
        if self.error_policy.stays_busy_after_error() {
            self.transition(UpdatePhase::Failed);
        } else {
            self.transition(UpdatePhase::Idle);
        }
    }
}
