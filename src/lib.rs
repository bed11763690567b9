// Library exports for testing and potential library use
//
// The update service is single-threaded: it lives on the host's event-loop
// thread and only receives work through channels drained by that loop.
// Background threads (engine readers, stdin) never touch service state.
//
// Sync-only shared state (the log bridge) uses `parking_lot::Mutex`.

/// Application version (root crate version, for use by sub-crates).
/// Sub-crates should receive this via parameter rather than using
/// `env!("CARGO_PKG_VERSION")` which resolves to the sub-crate's version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod app;
pub mod cli;
pub mod debug;
pub mod dialogs;
pub mod host;
pub mod notifier;
pub mod process_engine;

pub use liftoff_config as config;
pub use liftoff_update as update;
