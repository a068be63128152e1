//! Application identity resolution.
//!
//! Values come from two places, highest precedence first:
//! 1. Command-line flags
//! 2. Local config file (`./.luisrc` or an explicit `--luisrc` path)

use crate::error::{SyncError, SyncResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default local config file name.
pub const LUISRC_FILE: &str = ".luisrc";

/// Contents of a `.luisrc` file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LuisRc {
    #[serde(default)]
    pub app_id: Option<String>,

    #[serde(default)]
    pub authoring_key: Option<String>,

    #[serde(default)]
    pub endpoint_base_path: Option<String>,
}

impl LuisRc {
    /// Load a config file.
    ///
    /// When `explicit` is false a missing file yields an empty config; a file
    /// the user named on the command line must exist.
    pub fn load(path: &Path, explicit: bool) -> SyncResult<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !explicit => {
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(SyncError::Config(format!("failed to read {}: {}", path.display(), e)));
            }
        };

        serde_json::from_str(&content)
            .map_err(|e| SyncError::Config(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// `./.luisrc` relative to `dir`.
    #[must_use]
    pub fn default_path(dir: &Path) -> PathBuf {
        dir.join(LUISRC_FILE)
    }
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct AppOverrides {
    pub app_id: Option<String>,
    pub authoring_key: Option<String>,
    pub region: Option<String>,
}

/// Resolved identity of the remote application. Built once per invocation.
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub app_id: String,
    pub authoring_key: String,
    pub endpoint_base_path: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("app_id", &self.app_id)
            .field("authoring_key", &"<redacted>")
            .field("endpoint_base_path", &self.endpoint_base_path)
            .finish()
    }
}

/// Authoring endpoint for an Azure region.
#[must_use]
pub fn endpoint_for_region(region: &str) -> String {
    format!("https://{region}.api.cognitive.microsoft.com/luis/api/v2.0")
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    pub fn resolve(overrides: AppOverrides, rc: LuisRc) -> SyncResult<Self> {
        let app_id = non_empty(overrides.app_id)
            .or_else(|| non_empty(rc.app_id))
            .ok_or_else(|| SyncError::Config("no application id (use --app-id or appId in .luisrc)".to_string()))?;
        let authoring_key = non_empty(overrides.authoring_key)
            .or_else(|| non_empty(rc.authoring_key))
            .ok_or_else(|| {
                SyncError::Config("no authoring key (use --authoring-key or authoringKey in .luisrc)".to_string())
            })?;
        let endpoint_base_path = non_empty(overrides.region)
            .map(|r| endpoint_for_region(&r))
            .or_else(|| non_empty(rc.endpoint_base_path));

        Ok(Self { app_id, authoring_key, endpoint_base_path })
    }

    /// Endpoint required by publishing.
    pub fn require_endpoint(&self) -> SyncResult<&str> {
        self.endpoint_base_path.as_deref().ok_or_else(|| {
            SyncError::Config("no endpointBasePath or region specified, cannot publish".to_string())
        })
    }
}
