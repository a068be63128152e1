//! CLI configuration loading and merging.

use anyhow::Result;
use luver_core::{AppConfig, AppOverrides, LuisRc};
use std::path::Path;
use tracing::debug;

/// Resolve the application identity.
///
/// Configuration precedence:
/// 1. CLI arguments
/// 2. Config file (`--luisrc`, or `./.luisrc` when present)
pub fn resolve_app(working_dir: &Path, luisrc: Option<&Path>, overrides: AppOverrides) -> Result<AppConfig> {
    let rc = match luisrc {
        Some(path) => LuisRc::load(path, true)?,
        None => LuisRc::load(&LuisRc::default_path(working_dir), false)?,
    };
    let app = AppConfig::resolve(overrides, rc)?;
    debug!(?app, "Resolved application config");
    Ok(app)
}
