//! "What changed since you last opened the app" report.

use super::UpdateService;
use semver::Version;

const NO_NOTES: &str = "No release notes were provided for this version.";

/// Result of `check_recent_update`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecentUpdate {
    /// Nothing stored yet; the current version was recorded
    FirstRun,
    /// Running the version last seen (or an older one)
    UpToDate,
    /// An update was installed since the last launch; its notes were shown
    Updated { from: String, to: String },
}

fn parse_version(raw: &str) -> Result<Version, semver::Error> {
    Version::parse(raw.strip_prefix('v').unwrap_or(raw))
}

impl UpdateService {
    /// Compare the running version with the persisted last-seen version and
    /// show the stored release notes when the app was updated.
    pub fn check_recent_update(&mut self) -> RecentUpdate {
        let current = self.current_version.clone();

        let Some(last) = self.store.last_seen_version().map(str::to_owned) else {
            log::info!("First run of v{}; recording as last seen version", current);
            if let Err(e) = self.store.set_last_seen_version(current.as_str()) {
                log::warn!("Failed to record last seen version: {}", e);
            }
            return RecentUpdate::FirstRun;
        };

        let current_version = match parse_version(&current) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("Cannot parse running version '{}': {}", current, e);
                return RecentUpdate::UpToDate;
            }
        };
        let updated = match parse_version(&last) {
            Ok(last_version) => current_version > last_version,
            Err(e) => {
                log::warn!(
                    "Stored version '{}' is not a semantic version ({}); treating it as older",
                    last,
                    e
                );
                true
            }
        };
        if !updated {
            return RecentUpdate::UpToDate;
        }

        log::info!("Updated from v{} to v{}", last, current);
        let notes = self
            .store
            .last_release_notes()
            .filter(|notes| !notes.trim().is_empty())
            .unwrap_or(NO_NOTES)
            .to_string();
        if let Err(e) = self
            .dialogs
            .show_information(&format!("Updated to v{}", current), &notes)
        {
            log::warn!("Could not show release notes: {}", e);
        }
        if let Err(e) = self.store.set_last_seen_version(current.as_str()) {
            log::warn!("Failed to record last seen version: {}", e);
        }

        RecentUpdate::Updated { from: last, to: current }
    }
}
