//! Update command implementation.

use crate::commands::types::UpdateArgs;
use crate::config::resolve_app;
use crate::progress::TerminalProgress;
use anyhow::{Context, Result};
use luver_core::{ProcessRunner, Synchronizer, UpdateOptions};
use std::sync::Arc;
use tracing::info;

pub async fn execute(args: UpdateArgs) -> Result<()> {
    let working_dir = std::env::current_dir().context("Failed to read current directory")?;
    let app = resolve_app(&working_dir, args.app.luisrc.as_deref(), args.overrides())?;

    let runner = Arc::new(ProcessRunner::new(working_dir.clone()));
    let sync = Synchronizer::new(runner, args.app.programs(), &working_dir).with_poll_settings(args.poll_settings());
    let options = UpdateOptions { model: args.model, publish: args.publish, force: args.force };

    let report = sync.update(&app, &options, &TerminalProgress).await?;
    info!(
        version = %report.version.tag,
        import = ?report.import,
        train_commands = report.training.train_commands,
        polls = report.training.polls,
        published = report.published,
        "Update finished"
    );
    Ok(())
}
