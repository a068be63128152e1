//! Command type definitions shared between main.rs and tests.

use clap::{Args, ValueEnum};
use luver_core::{AppOverrides, PollSettings, ToolPrograms, VersionOrder};
use std::path::PathBuf;
use std::time::Duration;

/// Flags identifying the remote application, shared by every command.
#[derive(Args, Debug, Clone)]
pub struct AppArgs {
    /// The LUIS application id
    #[arg(long)]
    pub app_id: Option<String>,

    /// LUIS authoring key
    #[arg(long)]
    pub authoring_key: Option<String>,

    /// The .luisrc file to use, e.g. one per environment
    #[arg(long)]
    pub luisrc: Option<PathBuf>,

    /// Authoring tool to run
    #[arg(long, default_value = "luis")]
    pub luis_bin: String,

    /// Model converter to run
    #[arg(long, default_value = "ludown")]
    pub ludown_bin: String,
}

impl AppArgs {
    pub fn programs(&self) -> ToolPrograms {
        ToolPrograms { luis: self.luis_bin.clone(), ludown: self.ludown_bin.clone() }
    }
}

#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    /// The .lu file supporting the application
    #[arg(long)]
    pub model: PathBuf,

    /// The region where the app is deployed (e.g. westus)
    #[arg(long)]
    pub region: Option<String>,

    /// Publish the new version of the application
    #[arg(long)]
    pub publish: bool,

    /// Back up, delete and re-import the version if it already exists
    #[arg(long)]
    pub force: bool,

    /// Seconds to wait after triggering training and between status polls
    #[arg(long, default_value_t = 5)]
    pub poll_interval: u64,

    #[command(flatten)]
    pub app: AppArgs,
}

impl UpdateArgs {
    pub fn overrides(&self) -> AppOverrides {
        AppOverrides {
            app_id: self.app.app_id.clone(),
            authoring_key: self.app.authoring_key.clone(),
            region: self.region.clone(),
        }
    }

    pub fn poll_settings(&self) -> PollSettings {
        let delay = Duration::from_secs(self.poll_interval);
        PollSettings { settle_delay: delay, poll_delay: delay, ..PollSettings::default() }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// The destination .lu file
    #[arg(long)]
    pub model: PathBuf,

    /// The version id to export (defaults to the latest)
    #[arg(long)]
    pub version_id: Option<String>,

    /// How the service orders `list versions`
    #[arg(long, value_enum, default_value_t = VersionsOrder::OldestFirst)]
    pub versions_order: VersionsOrder,

    #[command(flatten)]
    pub app: AppArgs,
}

impl ExportArgs {
    pub fn overrides(&self) -> AppOverrides {
        AppOverrides { app_id: self.app.app_id.clone(), authoring_key: self.app.authoring_key.clone(), region: None }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionsOrder {
    OldestFirst,
    NewestFirst,
}

impl From<VersionsOrder> for VersionOrder {
    fn from(order: VersionsOrder) -> Self {
        match order {
            VersionsOrder::OldestFirst => Self::OldestFirst,
            VersionsOrder::NewestFirst => Self::NewestFirst,
        }
    }
}
