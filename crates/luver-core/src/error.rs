use std::path::PathBuf;
use thiserror::Error;

pub type SyncResult<T> = std::result::Result<T, SyncError>;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("model {} not found", .0.display())]
    ModelNotFound(PathBuf),

    #[error("application {0} not found")]
    AppNotFound(String),

    #[error("converter reported a problem: {0}")]
    Conversion(String),

    #[error("unexpected training status response: {0}")]
    UnparseableStatus(String),

    #[error("training did not converge after {attempts} attempts")]
    TrainingFailed { attempts: u32 },

    #[error("`{program} {operation}` failed with exit code {code:?}: {stderr}")]
    CommandFailed { program: String, operation: String, code: Option<i32>, stderr: String },

    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("application {0} has no versions")]
    NoVersions(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_message_names_operation() {
        let err = SyncError::CommandFailed {
            program: "luis".to_string(),
            operation: "train version".to_string(),
            code: Some(1),
            stderr: "boom".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("luis train version"));
        assert!(msg.contains("boom"));
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        match SyncError::from(io_err) {
            SyncError::Io(_) => {}
            other => panic!("Expected Io error variant, got {other:?}"),
        }
    }
}
