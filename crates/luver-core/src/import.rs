use crate::artifact::{sibling_path, TransientArtifact};
use crate::config::AppConfig;
use crate::converter::ConverterBridge;
use crate::error::SyncResult;
use crate::progress::{ProgressEvent, ProgressSink};
use crate::remote::{AppMetadata, AuthoringService};
use std::path::{Path, PathBuf};
use tracing::info;

/// What `import_if_absent` did with the remote version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Version already existed and was left alone.
    Skipped,
    /// Version was created from the local model.
    Imported,
    /// Existing version was backed up, deleted, and imported again.
    Replaced { backup: PathBuf },
}

#[derive(Debug, Clone, Copy)]
pub struct ImportRequest<'a> {
    pub version_id: &'a str,
    pub model: &'a Path,
    pub metadata: &'a AppMetadata,
    pub force: bool,
}

/// Creates the remote version from the local model unless it already exists.
///
/// An existing version is presumed to already reflect the model and is not
/// diffed. With `force` it is backed up, deleted and imported again.
pub async fn import_if_absent(
    service: &AuthoringService,
    converter: &ConverterBridge,
    app: &AppConfig,
    request: ImportRequest<'_>,
    sink: &dyn ProgressSink,
) -> SyncResult<ImportOutcome> {
    let ImportRequest { version_id, model, metadata, force } = request;
    sink.on_event(ProgressEvent::started(format!("Checking if version {version_id} exists...")));
    let exists = service.version_exists(app, version_id).await;

    let mut backup = None;
    if exists {
        if !force {
            info!(version_id, "Version exists, skipping import");
            sink.on_event(ProgressEvent::warning(format!("Version {version_id} exists. Not updating...")));
            return Ok(ImportOutcome::Skipped);
        }
        backup = Some(replace_existing(service, app, version_id, model, sink).await?);
    } else {
        sink.on_event(ProgressEvent::notice(format!("Version {version_id} doesn't exist. Continuing...")));
    }

    // Dropping the guard removes the converted file on every path below.
    let artifact = TransientArtifact::beside(model, ".json")?;

    sink.on_event(ProgressEvent::started(format!("Converting {}...", model.display())));
    converter.to_import_json(model, metadata, version_id, artifact.path()).await?;
    sink.on_event(ProgressEvent::finished(format!("Converted {}.", model.display())));

    sink.on_event(ProgressEvent::started(format!("Importing version {version_id}...")));
    service.import_version(app, version_id, artifact.path()).await?;
    drop(artifact);

    info!(version_id, "Version imported");
    sink.on_event(ProgressEvent::finished(format!("Version {version_id} imported.")));

    Ok(match backup {
        Some(backup) => ImportOutcome::Replaced { backup },
        None => ImportOutcome::Imported,
    })
}

async fn replace_existing(
    service: &AuthoringService,
    app: &AppConfig,
    version_id: &str,
    model: &Path,
    sink: &dyn ProgressSink,
) -> SyncResult<PathBuf> {
    sink.on_event(ProgressEvent::warning(format!("Forcing re-import of version {version_id}...")));

    sink.on_event(ProgressEvent::started("Backing version up before delete..."));
    let exported = service.export_version(app, version_id).await?;
    let backup = sibling_path(model, &format!(".{version_id}.backup.json"));
    std::fs::write(&backup, exported)?;
    sink.on_event(ProgressEvent::finished(format!("Backup written to {}", backup.display())));

    service.delete_version(app, version_id).await?;
    info!(version_id, backup = %backup.display(), "Version deleted");
    sink.on_event(ProgressEvent::finished(format!("Version {version_id} deleted.")));

    Ok(backup)
}
