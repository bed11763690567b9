//! Update coordination for desktop applications.
//!
//! Provides:
//! - `engine`: the external update engine interface (commands + lifecycle events)
//! - `environment`: platform and installation-type detection
//! - `store`: persisted last-seen version and release notes
//! - `state`: the update phase state machine behind the busy gate
//! - `scheduler`: startup, activation, and interval triggers
//! - `ui`: notification, dialog, and host-application collaborators
//! - `release_notes`: markdown → plain text sanitizing
//! - `service`: the `UpdateService` façade tying the above together
//! - `simulate`: synthetic releases for exercising the completion flow

pub mod engine;
pub mod environment;
pub mod release_notes;
pub mod scheduler;
pub mod service;
pub mod simulate;
pub mod state;
pub mod store;
pub mod ui;

pub use engine::{CheckOutcome, DownloadProgress, EngineError, EngineEvent, UpdateEngine, UpdateInfo};
pub use environment::{Environment, InstallationType, Platform};
pub use scheduler::TriggerScheduler;
pub use service::{
    Collaborators, CompletionOutcome, RecentUpdate, RequestOutcome, SkipReason, StartOutcome,
    UpdateService, UpdateStatus,
};
pub use state::{ServiceState, UpdatePhase};
pub use store::{StoreError, VersionRecord, VersionStore};
pub use ui::{ConfirmResponse, DialogError, Dialogs, HostApp, Notification, Notifier};
