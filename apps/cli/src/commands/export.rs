//! Export command implementation.

use crate::commands::types::ExportArgs;
use crate::config::resolve_app;
use crate::progress::TerminalProgress;
use anyhow::{Context, Result};
use luver_core::{ExportOptions, ProcessRunner, Synchronizer};
use std::sync::Arc;

pub async fn execute(args: ExportArgs) -> Result<()> {
    let working_dir = std::env::current_dir().context("Failed to read current directory")?;
    let app = resolve_app(&working_dir, args.app.luisrc.as_deref(), args.overrides())?;

    let runner = Arc::new(ProcessRunner::new(working_dir.clone()));
    let sync = Synchronizer::new(runner, args.app.programs(), &working_dir);
    let options =
        ExportOptions { model: args.model, version_id: args.version_id, order: args.versions_order.into() };

    sync.export(&app, &options, &TerminalProgress).await?;
    Ok(())
}
