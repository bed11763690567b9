//! Default values for serde-deserialized configuration fields.

// ── Primitive helpers ──────────────────────────────────────────────────────

pub fn bool_false() -> bool {
    false
}

pub fn bool_true() -> bool {
    true
}

// ── Application ────────────────────────────────────────────────────────────

pub fn app_id() -> String {
    "liftoff".to_string()
}

// ── Update ─────────────────────────────────────────────────────────────────

/// Fixed check interval: 30 minutes.
pub fn check_interval_ms() -> u64 {
    30 * 60 * 1000 // 1_800_000
}

pub fn error_policy() -> crate::types::ErrorPolicy {
    crate::types::ErrorPolicy::HaltUntilRestart
}
