//! Snapshot schema versioning for `pwrwatch pipe` consumers.
//!
//! # Version History
//!
//! | Version | Changes |
//! |---------|---------|
//! | 1 | Initial snapshot layout |
//! | 2 | Added `total_source`, `over_threshold` and `sensors` |
//!
//! # Breaking Changes (require SNAPSHOT_VERSION bump)
//!
//! - Removing fields from `Snapshot`
//! - Changing field types
//! - Renaming fields without `#[serde(alias)]`
//! - Removing `ComponentKind` variants
//!
//! # Non-Breaking Changes (safe without version bump)
//!
//! - Adding new fields covered by `#[serde(default)]`
//! - Adding new enum variants

/// Current snapshot schema version. Bump when making breaking changes.
pub const SNAPSHOT_VERSION: u32 = 2;

/// Oldest schema a reader of this build still understands.
pub const MIN_SUPPORTED_VERSION: u32 = 1;

pub fn is_supported(version: u32) -> bool {
    (MIN_SUPPORTED_VERSION..=SNAPSHOT_VERSION).contains(&version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_range() {
        assert!(is_supported(SNAPSHOT_VERSION));
        assert!(is_supported(MIN_SUPPORTED_VERSION));
        assert!(!is_supported(0));
        assert!(!is_supported(SNAPSHOT_VERSION + 1));
    }
}
