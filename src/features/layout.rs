//! Feature Layout - Centralized Feature Definition
//!
//! The classifier was trained against this exact column order. Any change to
//! the names or order must increment [`FEATURE_VERSION`], otherwise vectors
//! produced by one build would be silently misread by another.

use crc32fast::Hasher;
use once_cell::sync::Lazy;

/// Current feature layout version.
/// MUST be incremented when the layout changes.
pub const FEATURE_VERSION: u8 = 1;

/// Feature names in the exact order the model expects them.
/// This is the single source of truth for feature ordering.
pub const FEATURE_LAYOUT: &[&str] = &[
    "sleep",       // 0: Sleep duration (hours/day, 0-12)
    "study",       // 1: Study hours (hours/day, 0-12)
    "stress",      // 2: Stress level (0-10)
    "screen_time", // 3: Screen time (hours/day, 0-12)
    "activity",    // 4: Physical activity (minutes/day, 0-120)
    "appetite",    // 5: Appetite level (1-5)
    "social",      // 6: Social interaction level (0-10)
    "rested",      // 7: Felt rested today (encoded Yes/No)
    "relaxed",     // 8: Did relax today (encoded Yes/No)
];

/// Total number of features. Must match `FEATURE_LAYOUT.len()`.
pub const FEATURE_COUNT: usize = 9;

static LAYOUT_HASH: Lazy<u32> = Lazy::new(compute_layout_hash);

/// Compute the CRC32 hash of the feature layout.
/// Used to detect layout mismatches at runtime.
fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);
    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // separator
    }
    hasher.finalize()
}

/// Get the layout hash (computed once, inputs are const).
pub fn layout_hash() -> u32 {
    *LAYOUT_HASH
}

/// Error when a feature vector's layout doesn't match the current schema.
#[derive(Debug, Clone)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Feature layout mismatch: expected v{} (hash: {:08x}), got v{} (hash: {:08x})",
            self.expected_version, self.expected_hash, self.actual_version, self.actual_hash
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

/// Validate that incoming data matches the current layout.
pub fn validate_layout(version: u8, hash: u32) -> Result<(), LayoutMismatchError> {
    if version != FEATURE_VERSION || hash != layout_hash() {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: layout_hash(),
            actual_version: version,
            actual_hash: hash,
        });
    }
    Ok(())
}

/// Get feature index by name (O(n) but features are few).
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

/// Get feature name by index.
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}
