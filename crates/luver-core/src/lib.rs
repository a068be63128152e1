//! Luver Core
//!
//! Keeps a local `.lu` language-understanding model and its remote authoring
//! application in step:
//! - Tagging model content and remembering the tag between runs (`VersionLedger`)
//! - Importing a version only when it is not already on the service
//! - Training until the service reports convergence, with bounded retry
//! - Publishing, and exporting a remote version back to `.lu`
//!
//! The service and the converter are command-line tools reached through
//! [`CommandRunner`].

pub mod artifact;
pub mod checksum;
pub mod config;
pub mod converter;
pub mod error;
pub mod export;
pub mod import;
pub mod ledger;
pub mod progress;
pub mod publish;
pub mod remote;
pub mod runner;
pub mod status;
pub mod sync;
pub mod training;

pub use artifact::TransientArtifact;
pub use checksum::{fingerprint, legacy_fingerprint, tag_for};
pub use config::{endpoint_for_region, AppConfig, AppOverrides, LuisRc};
pub use converter::ConverterBridge;
pub use error::{SyncError, SyncResult};
pub use export::{ExportOptions, ExportReport, VersionOrder};
pub use import::{import_if_absent, ImportOutcome, ImportRequest};
pub use ledger::{VersionLedger, VersionRecord};
pub use progress::{ProgressEvent, ProgressSink};
pub use publish::publish;
pub use remote::{AppMetadata, AuthoringService};
pub use runner::{CommandOutput, CommandRunner, ProcessRunner};
pub use status::{StatusCode, TrainingStatus, Verdict};
pub use sync::{Synchronizer, ToolPrograms, UpdateOptions, UpdateReport};
pub use training::{train_until_converged, PollSettings, TrainingReport};
