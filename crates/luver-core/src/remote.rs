//! Authoring service operations, one external command each.

use crate::config::AppConfig;
use crate::error::{SyncError, SyncResult};
use crate::runner::{CommandOutput, CommandRunner};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Default authoring tool.
pub const DEFAULT_LUIS_PROGRAM: &str = "luis";

/// Marker the tool prints instead of failing when the app id is unknown.
const INVALID_APP_MARKER: &str = "is not a valid value for appId";

/// Application fields the converter needs to build an import file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppMetadata {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub culture: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
struct VersionInfo {
    version: String,
}

#[derive(Clone)]
pub struct AuthoringService {
    runner: Arc<dyn CommandRunner>,
    program: String,
}

impl AuthoringService {
    pub fn new(runner: Arc<dyn CommandRunner>, program: impl Into<String>) -> Self {
        Self { runner, program: program.into() }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    fn args(operation: &str, app: &AppConfig, version_id: Option<&str>) -> Vec<String> {
        let mut args: Vec<String> = operation.split(' ').map(str::to_string).collect();
        args.extend(["--appId".to_string(), app.app_id.clone()]);
        if let Some(version_id) = version_id {
            args.extend(["--versionId".to_string(), version_id.to_string()]);
        }
        args.extend(["--authoringKey".to_string(), app.authoring_key.clone()]);
        args
    }

    async fn invoke(&self, operation: &str, args: Vec<String>) -> SyncResult<CommandOutput> {
        let output = self.runner.run(&self.program, &args).await?;
        if !output.success() {
            return Err(SyncError::CommandFailed {
                program: self.program.clone(),
                operation: operation.to_string(),
                code: output.code,
                stderr: output.diagnostic(),
            });
        }
        Ok(output)
    }

    pub async fn get_application(&self, app: &AppConfig) -> SyncResult<AppMetadata> {
        let args = Self::args("get application", app, None);
        let output = self.runner.run(&self.program, &args).await?;
        if !output.success() || output.stdout.contains(INVALID_APP_MARKER) {
            debug!(app_id = %app.app_id, diagnostic = %output.diagnostic(), "Application lookup failed");
            return Err(SyncError::AppNotFound(app.app_id.clone()));
        }
        Ok(serde_json::from_str(&output.stdout)?)
    }

    /// Version ids in the order the service returns them.
    pub async fn list_versions(&self, app: &AppConfig) -> SyncResult<Vec<String>> {
        let output = self.invoke("list versions", Self::args("list versions", app, None)).await?;
        let versions: Vec<VersionInfo> = serde_json::from_str(&output.stdout)?;
        Ok(versions.into_iter().map(|v| v.version).collect())
    }

    /// Whether `version_id` exists remotely.
    ///
    /// Any failure of `get version` counts as "does not exist", including
    /// network and authentication failures.
    pub async fn version_exists(&self, app: &AppConfig, version_id: &str) -> bool {
        let args = Self::args("get version", app, Some(version_id));
        match self.runner.run(&self.program, &args).await {
            Ok(output) if output.success() => true,
            Ok(output) => {
                debug!(version_id, code = ?output.code, "get version failed, treating as absent");
                false
            }
            Err(e) => {
                debug!(version_id, error = %e, "get version did not run, treating as absent");
                false
            }
        }
    }

    pub async fn import_version(&self, app: &AppConfig, version_id: &str, input: &Path) -> SyncResult<()> {
        let mut args = Self::args("import version", app, Some(version_id));
        args.extend(["--in".to_string(), input.display().to_string()]);
        self.invoke("import version", args).await?;
        Ok(())
    }

    /// Exported application JSON, as printed by the tool.
    pub async fn export_version(&self, app: &AppConfig, version_id: &str) -> SyncResult<String> {
        let output = self.invoke("export version", Self::args("export version", app, Some(version_id))).await?;
        Ok(output.stdout)
    }

    pub async fn delete_version(&self, app: &AppConfig, version_id: &str) -> SyncResult<()> {
        let mut args = Self::args("delete version", app, Some(version_id));
        args.push("--force".to_string());
        self.invoke("delete version", args).await?;
        Ok(())
    }

    pub async fn train_version(&self, app: &AppConfig, version_id: &str) -> SyncResult<()> {
        self.invoke("train version", Self::args("train version", app, Some(version_id))).await?;
        Ok(())
    }

    /// Raw status payload. Parsing is left to the caller so a garbage body
    /// can be told apart from a failed command.
    pub async fn get_status(&self, app: &AppConfig, version_id: &str) -> SyncResult<String> {
        let output = self.invoke("get status", Self::args("get status", app, Some(version_id))).await?;
        Ok(output.stdout)
    }

    pub async fn publish_version(
        &self,
        app: &AppConfig,
        version_id: &str,
        endpoint_base_path: &str,
    ) -> SyncResult<serde_json::Value> {
        let mut args = Self::args("publish version", app, Some(version_id));
        args.extend(["--endpointBasePath".to_string(), endpoint_base_path.to_string()]);
        let output = self.invoke("publish version", args).await?;
        Ok(serde_json::from_str(&output.stdout)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> AppConfig {
        AppConfig { app_id: "app-1".to_string(), authoring_key: "key-1".to_string(), endpoint_base_path: None }
    }

    #[test]
    fn test_args_with_version() {
        let args = AuthoringService::args("train version", &app(), Some("2305011200"));
        assert_eq!(
            args,
            vec![
                "train", "version", "--appId", "app-1", "--versionId", "2305011200", "--authoringKey", "key-1"
            ]
        );
    }

    #[test]
    fn test_args_without_version() {
        let args = AuthoringService::args("list versions", &app(), None);
        assert_eq!(args, vec!["list", "versions", "--appId", "app-1", "--authoringKey", "key-1"]);
    }

    #[test]
    fn test_app_metadata_null_description() {
        let meta: AppMetadata =
            serde_json::from_str(r#"{"id": "x", "name": "Bot", "description": null, "culture": "en-us"}"#).unwrap();
        assert_eq!(meta.description, "");
        assert_eq!(meta.name, "Bot");
    }
}
