//! Project layout checks.

use std::path::Path;

pub const PRODUCTION_DIR: &str = "production";

pub const MISSING_PRODUCTION_MESSAGE: &str = "Missing production folder. After completing PCB, \
create manufacturing files in the production folder.";

/// A KiCad project ready for manufacture has a `production/` folder with
/// the fabrication outputs. Returns the problem, if any.
pub fn check_production_folder(root: &Path) -> Option<&'static str> {
    let production = root.join(PRODUCTION_DIR);
    tracing::debug!(path = %production.display(), "Checking production folder");
    if production.is_dir() {
        None
    } else {
        Some(MISSING_PRODUCTION_MESSAGE)
    }
}
