//! Synthetic releases for exercising the download-completion flow without
//! an engine round-trip.

use crate::engine::UpdateInfo;
use rand::Rng;
use rand::seq::SliceRandom;
use semver::Version;

const ADJECTIVES: &[&str] = &[
    "brave", "calm", "eager", "fuzzy", "gentle", "jolly", "lively", "nimble", "quiet", "rapid",
    "shiny", "tidy", "vivid", "witty", "zesty",
];

const NOUNS: &[&str] = &[
    "otter", "falcon", "maple", "comet", "harbor", "lantern", "meadow", "pebble", "quokka",
    "river", "sparrow", "tundra", "walrus", "yarrow", "zephyr",
];

/// Smallest and largest simulated payload sizes (bytes)
const PAYLOAD_RANGE: std::ops::RangeInclusive<u64> = 10 * 1024 * 1024..=200 * 1024 * 1024;

/// A fake downloaded release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedRelease {
    pub info: UpdateInfo,
    /// Simulated payload size in bytes
    pub size: u64,
}

/// Random `adjective-noun` name, e.g. `brave-otter`
pub fn project_name(rng: &mut impl Rng) -> String {
    let adjective = ADJECTIVES.choose(rng).copied().unwrap_or("brave");
    let noun = NOUNS.choose(rng).copied().unwrap_or("otter");
    format!("{adjective}-{noun}")
}

/// Next major version after `current` (`1.4.2` → `2.0.0`).
///
/// An unparsable `current` is treated as `0.0.0`.
pub fn next_major(current: &str) -> Version {
    let current = Version::parse(current.strip_prefix('v').unwrap_or(current)).unwrap_or_else(|e| {
        log::warn!("Cannot parse running version '{}': {}", current, e);
        Version::new(0, 0, 0)
    });
    Version::new(current.major + 1, 0, 0)
}

/// Build a simulated release newer than `current_version`.
pub fn simulated_release(current_version: &str, rng: &mut impl Rng) -> SimulatedRelease {
    let info = UpdateInfo::new(next_major(current_version).to_string())
        .with_release_notes(project_name(rng));
    SimulatedRelease {
        info,
        size: rng.gen_range(PAYLOAD_RANGE),
    }
}
