//! Reference table directory resolution.

use std::path::PathBuf;

/// Environment variable for overriding the reference table directory.
pub const TABLES_ENV_VAR: &str = "PBP_TABLES_DIR";

/// Get the reference table directory.
///
/// Resolution order:
/// 1. `PBP_TABLES_DIR` environment variable
/// 2. `bp-tables/` directory relative to workspace root
pub fn tables_root() -> PathBuf {
    if let Ok(root) = std::env::var(TABLES_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../bp-tables")
}
