/// User-facing progress, separate from diagnostic logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A step is about to run.
    Started { message: String },
    /// A step completed.
    Finished { message: String },
    /// Something the user should know that is not a problem.
    Notice { message: String },
    /// Recoverable trouble, e.g. a training retry.
    Warning { message: String },
}

impl ProgressEvent {
    pub fn started(message: impl Into<String>) -> Self {
        Self::Started { message: message.into() }
    }

    pub fn finished(message: impl Into<String>) -> Self {
        Self::Finished { message: message.into() }
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Self::Notice { message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::Warning { message: message.into() }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Started { message }
            | Self::Finished { message }
            | Self::Notice { message }
            | Self::Warning { message } => message,
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn on_event(&self, event: ProgressEvent);
}
