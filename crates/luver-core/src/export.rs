//! Remote version back to a local `.lu` file.

use crate::artifact::TransientArtifact;
use crate::config::AppConfig;
use crate::converter::ConverterBridge;
use crate::error::{SyncError, SyncResult};
use crate::progress::{ProgressEvent, ProgressSink};
use crate::remote::AuthoringService;
use std::path::PathBuf;
use tracing::{info, warn};

/// How `list versions` is ordered by the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VersionOrder {
    /// Oldest first, so the latest version is the last entry.
    #[default]
    OldestFirst,
    NewestFirst,
}

impl VersionOrder {
    #[must_use]
    pub fn latest(self, versions: &[String]) -> Option<&String> {
        match self {
            Self::OldestFirst => versions.last(),
            Self::NewestFirst => versions.first(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Destination `.lu` file.
    pub model: PathBuf,
    /// Version to export, latest when `None`.
    pub version_id: Option<String>,
    pub order: VersionOrder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub version_id: String,
    /// The `.lu` file actually written.
    pub model: PathBuf,
}

pub async fn export(
    service: &AuthoringService,
    converter: &ConverterBridge,
    app: &AppConfig,
    options: &ExportOptions,
    sink: &dyn ProgressSink,
) -> SyncResult<ExportReport> {
    let version_id = match &options.version_id {
        Some(v) => v.clone(),
        None => {
            sink.on_event(ProgressEvent::started(format!("Finding latest version of {}...", app.app_id)));
            let versions = service.list_versions(app).await?;
            options
                .order
                .latest(&versions)
                .cloned()
                .ok_or_else(|| SyncError::NoVersions(app.app_id.clone()))?
        }
    };

    sink.on_event(ProgressEvent::started(format!("Exporting version {version_id}...")));
    let exported = service.export_version(app, &version_id).await?;

    let artifact = TransientArtifact::beside(&options.model, &format!(".{version_id}.export.json"))?;
    std::fs::write(artifact.path(), exported)?;

    sink.on_event(ProgressEvent::started(format!("Converting to {}...", options.model.display())));
    let written = converter.to_lu(artifact.path(), &options.model).await?;
    drop(artifact);

    if written != options.model {
        warn!(requested = %options.model.display(), written = %written.display(), "Converter always writes .lu");
    }
    info!(version_id = %version_id, model = %written.display(), "Version exported");
    sink.on_event(ProgressEvent::finished(format!("Version {version_id} written to {}", written.display())));

    Ok(ExportReport { version_id, model: written })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versions() -> Vec<String> {
        vec!["0.1".to_string(), "2301010000".to_string(), "2305011200".to_string()]
    }

    #[test]
    fn test_latest_oldest_first() {
        assert_eq!(VersionOrder::OldestFirst.latest(&versions()).map(String::as_str), Some("2305011200"));
    }

    #[test]
    fn test_latest_newest_first() {
        assert_eq!(VersionOrder::NewestFirst.latest(&versions()).map(String::as_str), Some("0.1"));
    }

    #[test]
    fn test_latest_empty() {
        assert!(VersionOrder::default().latest(&[]).is_none());
    }
}
