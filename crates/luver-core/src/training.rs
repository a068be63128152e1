//! Training convergence.
//!
//! Training on the authoring service is asynchronous: `train version` only
//! queues the work, and the per-part status has to be polled until every
//! part reports trained. A part can also fall back to "needs training" when
//! the service reschedules, in which case training is triggered again, a
//! bounded number of times.

use crate::config::AppConfig;
use crate::error::{SyncError, SyncResult};
use crate::progress::{ProgressEvent, ProgressSink};
use crate::remote::AuthoringService;
use crate::status::{TrainingStatus, Verdict};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Retraining attempts allowed after the first `train version`.
pub const DEFAULT_MAX_RETRIES: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Wait after triggering training, before the first poll.
    pub settle_delay: Duration,
    /// Wait between polls.
    pub poll_delay: Duration,
    pub max_retries: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_secs(5),
            poll_delay: Duration::from_secs(5),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl PollSettings {
    /// No waiting at all. Meant for scripted runners.
    #[must_use]
    pub fn immediate() -> Self {
        Self { settle_delay: Duration::ZERO, poll_delay: Duration::ZERO, ..Self::default() }
    }
}

/// Counters from a converged run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrainingReport {
    /// `train version` commands issued.
    pub train_commands: u32,
    /// `get status` commands issued.
    pub polls: u32,
    pub retries: u32,
}

/// Non-terminal phases. Convergence returns `Ok`, failure returns `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Triggered,
    Polling,
    NeedsRetry,
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Trains `version_id` until every part is trained.
///
/// Fails with [`SyncError::UnparseableStatus`] the first time the status
/// payload cannot be read; that is never retried. Fails with
/// [`SyncError::TrainingFailed`] once needs-retrain has been seen more than
/// `max_retries` times.
pub async fn train_until_converged(
    service: &AuthoringService,
    app: &AppConfig,
    version_id: &str,
    settings: PollSettings,
    sink: &dyn ProgressSink,
) -> SyncResult<TrainingReport> {
    sink.on_event(ProgressEvent::started(format!("Training {version_id}...")));

    let mut report = TrainingReport::default();
    let mut phase = Phase::Triggered;

    loop {
        phase = match phase {
            Phase::Triggered => {
                if report.retries > 0 {
                    sink.on_event(ProgressEvent::warning(format!(
                        "Retry {}/{}: training {version_id}",
                        report.retries, settings.max_retries
                    )));
                }
                service.train_version(app, version_id).await?;
                report.train_commands += 1;
                pause(settings.settle_delay).await;
                Phase::Polling
            }
            Phase::Polling => {
                let payload = service.get_status(app, version_id).await?;
                report.polls += 1;

                let status = TrainingStatus::parse(&payload).inspect_err(|e| {
                    error!(version_id, error = %e, "Unreadable training status");
                })?;
                let verdict = status.verdict();
                debug!(
                    version_id,
                    poll = report.polls,
                    codes = ?status.parts().iter().map(|p| p.code).collect::<Vec<_>>(),
                    ?verdict,
                    "Training status"
                );

                match verdict {
                    Verdict::Done => {
                        info!(version_id, polls = report.polls, retries = report.retries, "Training converged");
                        sink.on_event(ProgressEvent::finished("Done training."));
                        return Ok(report);
                    }
                    Verdict::NeedsRetrain => Phase::NeedsRetry,
                    Verdict::InProgress | Verdict::Pending => {
                        pause(settings.poll_delay).await;
                        Phase::Polling
                    }
                }
            }
            Phase::NeedsRetry => {
                report.retries += 1;
                if report.retries > settings.max_retries {
                    error!(version_id, train_commands = report.train_commands, "Training did not converge");
                    return Err(SyncError::TrainingFailed { attempts: report.train_commands });
                }
                warn!(version_id, retry = report.retries, "Model training needs re-train");
                sink.on_event(ProgressEvent::warning("Model training needs re-train. Trying again."));
                Phase::Triggered
            }
        };
    }
}
