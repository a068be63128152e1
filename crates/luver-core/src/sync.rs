//! Update and export flows.

use crate::checksum::{fingerprint, legacy_fingerprint, tag_for};
use crate::config::AppConfig;
use crate::converter::{ConverterBridge, DEFAULT_LUDOWN_PROGRAM};
use crate::error::{SyncError, SyncResult};
use crate::export::{export, ExportOptions, ExportReport};
use crate::import::{import_if_absent, ImportOutcome, ImportRequest};
use crate::ledger::{VersionLedger, VersionRecord};
use crate::progress::{ProgressEvent, ProgressSink};
use crate::publish::publish;
use crate::remote::{AuthoringService, DEFAULT_LUIS_PROGRAM};
use crate::runner::CommandRunner;
use crate::training::{train_until_converged, PollSettings, TrainingReport};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Names (or paths) of the external tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPrograms {
    pub luis: String,
    pub ludown: String,
}

impl Default for ToolPrograms {
    fn default() -> Self {
        Self { luis: DEFAULT_LUIS_PROGRAM.to_string(), ludown: DEFAULT_LUDOWN_PROGRAM.to_string() }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateOptions {
    /// Local `.lu` model.
    pub model: PathBuf,
    pub publish: bool,
    /// Re-import a version that already exists.
    pub force: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReport {
    pub version: VersionRecord,
    pub import: ImportOutcome,
    pub training: TrainingReport,
    pub published: bool,
}

pub struct Synchronizer {
    service: AuthoringService,
    converter: ConverterBridge,
    ledger: VersionLedger,
    poll: PollSettings,
}

impl Synchronizer {
    /// Synchronizer keeping its ledger in `working_dir`.
    pub fn new(runner: Arc<dyn CommandRunner>, programs: ToolPrograms, working_dir: &Path) -> Self {
        Self {
            service: AuthoringService::new(Arc::clone(&runner), programs.luis),
            converter: ConverterBridge::new(runner, programs.ludown),
            ledger: VersionLedger::in_dir(working_dir),
            poll: PollSettings::default(),
        }
    }

    #[must_use]
    pub fn with_poll_settings(mut self, poll: PollSettings) -> Self {
        self.poll = poll;
        self
    }

    #[must_use]
    pub fn ledger(&self) -> &VersionLedger {
        &self.ledger
    }

    pub async fn update(
        &self,
        app: &AppConfig,
        options: &UpdateOptions,
        sink: &dyn ProgressSink,
    ) -> SyncResult<UpdateReport> {
        self.update_at(app, options, Utc::now(), sink).await
    }

    /// Update with an explicit clock, which picks the tag for a changed model.
    pub async fn update_at(
        &self,
        app: &AppConfig,
        options: &UpdateOptions,
        now: DateTime<Utc>,
        sink: &dyn ProgressSink,
    ) -> SyncResult<UpdateReport> {
        let model = options.model.as_path();
        if !model.is_file() {
            return Err(SyncError::ModelNotFound(model.to_path_buf()));
        }
        if options.publish {
            app.require_endpoint()?;
        }

        sink.on_event(ProgressEvent::started(format!("Getting app id {}...", app.app_id)));
        let metadata = self.service.get_application(app).await?;
        info!(app_id = %app.app_id, name = %metadata.name, culture = %metadata.culture, "Application found");

        sink.on_event(ProgressEvent::started("Calculating hash..."));
        let version = self.tag_model(model, now, sink)?;
        let version_id = version.tag.as_str();

        let import = import_if_absent(
            &self.service,
            &self.converter,
            app,
            ImportRequest { version_id, model, metadata: &metadata, force: options.force },
            sink,
        )
        .await?;

        let training = train_until_converged(&self.service, app, version_id, self.poll, sink).await?;

        if options.publish {
            publish(&self.service, app, version_id, sink).await?;
        } else {
            sink.on_event(ProgressEvent::notice("Skipping publish. Use --publish option to include publish."));
        }

        sink.on_event(ProgressEvent::finished("All done."));
        Ok(UpdateReport { version, import, training, published: options.publish })
    }

    /// Fingerprints the model, picks its tag and records the pair before any
    /// remote change is made.
    fn tag_model(&self, model: &Path, now: DateTime<Utc>, sink: &dyn ProgressSink) -> SyncResult<VersionRecord> {
        let content = std::fs::read(model)?;
        let hash = fingerprint(&content);
        let legacy_hash = legacy_fingerprint(&content);
        let tag = tag_for(now);
        sink.on_event(ProgressEvent::finished(format!("Hash {hash} and tag {tag} generated")));

        let previous = self.ledger.load()?;
        let record = VersionRecord::reconcile(hash, &legacy_hash, tag, previous.as_ref());
        if let Some(prev) = previous.as_ref().filter(|p| p.describes(&record.hash, &legacy_hash)) {
            sink.on_event(ProgressEvent::notice(format!(
                "Found old version with hash {}. Using version {}",
                prev.hash, prev.tag
            )));
        }

        self.ledger.persist(&record)?;
        info!(tag = %record.tag, hash = %record.hash, ledger = %self.ledger.path().display(), "Version recorded");
        Ok(record)
    }

    pub async fn export(
        &self,
        app: &AppConfig,
        options: &ExportOptions,
        sink: &dyn ProgressSink,
    ) -> SyncResult<ExportReport> {
        export(&self.service, &self.converter, app, options, sink).await
    }
}
