//! Training status reported by the authoring service.

use crate::error::{SyncError, SyncResult};
use serde::Deserialize;

/// Per-part training status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    UpToDate,
    NeedsTraining,
    Trained,
    Training,
    /// Any code the loop has no rule for (e.g. queued).
    Other(i64),
}

impl From<i64> for StatusCode {
    fn from(code: i64) -> Self {
        match code {
            0 => Self::UpToDate,
            1 => Self::NeedsTraining,
            2 => Self::Trained,
            3 => Self::Training,
            other => Self::Other(other),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPart {
    #[serde(default)]
    model_id: Option<String>,
    details: RawDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDetails {
    status_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartStatus {
    pub model_id: Option<String>,
    pub code: StatusCode,
}

/// What one poll tells the training loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Done,
    InProgress,
    NeedsRetrain,
    /// Parsed, but nothing to act on yet.
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingStatus {
    parts: Vec<PartStatus>,
}

impl TrainingStatus {
    #[must_use]
    pub fn new(parts: Vec<PartStatus>) -> Self {
        Self { parts }
    }

    /// Parses a `get status` payload. Anything that is not the expected JSON
    /// array (an error page, an auth failure message) is
    /// [`SyncError::UnparseableStatus`].
    pub fn parse(payload: &str) -> SyncResult<Self> {
        let raw: Vec<RawPart> = serde_json::from_str(payload).map_err(|e| {
            SyncError::UnparseableStatus(format!("{e}: {}", payload.trim()))
        })?;
        Ok(Self::new(
            raw.into_iter()
                .map(|p| PartStatus { model_id: p.model_id, code: StatusCode::from(p.details.status_id) })
                .collect(),
        ))
    }

    #[must_use]
    pub fn parts(&self) -> &[PartStatus] {
        &self.parts
    }

    pub fn is_done(&self) -> bool {
        self.parts.iter().all(|p| matches!(p.code, StatusCode::UpToDate | StatusCode::Trained))
    }

    pub fn needs_retrain(&self) -> bool {
        self.parts.iter().all(|p| {
            matches!(p.code, StatusCode::UpToDate | StatusCode::NeedsTraining | StatusCode::Trained)
        })
    }

    pub fn in_progress(&self) -> bool {
        self.parts.iter().any(|p| p.code == StatusCode::Training)
    }

    /// Done wins over in-progress, which wins over needs-retrain.
    pub fn verdict(&self) -> Verdict {
        if self.is_done() {
            Verdict::Done
        } else if self.in_progress() {
            Verdict::InProgress
        } else if self.needs_retrain() {
            Verdict::NeedsRetrain
        } else {
            Verdict::Pending
        }
    }
}
