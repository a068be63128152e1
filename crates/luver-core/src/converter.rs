//! Bridge to the `.lu` <-> import JSON converter.

use crate::artifact::{file_stem, parent_dir};
use crate::error::{SyncError, SyncResult};
use crate::remote::AppMetadata;
use crate::runner::{CommandOutput, CommandRunner};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default converter tool.
pub const DEFAULT_LUDOWN_PROGRAM: &str = "ludown";

fn file_name(path: &Path) -> String {
    path.file_name().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
}

#[derive(Clone)]
pub struct ConverterBridge {
    runner: Arc<dyn CommandRunner>,
    program: String,
}

impl ConverterBridge {
    pub fn new(runner: Arc<dyn CommandRunner>, program: impl Into<String>) -> Self {
        Self { runner, program: program.into() }
    }

    /// The converter is expected to stay silent. Anything it prints is a
    /// parse warning or error about the model, and the output must not be
    /// trusted.
    fn check(&self, operation: &str, output: &CommandOutput) -> SyncResult<()> {
        if !output.success() {
            return Err(SyncError::CommandFailed {
                program: self.program.clone(),
                operation: operation.to_string(),
                code: output.code,
                stderr: output.diagnostic(),
            });
        }
        let diagnostic = output.diagnostic();
        if !diagnostic.is_empty() {
            return Err(SyncError::Conversion(diagnostic));
        }
        Ok(())
    }

    /// Converts `model` into an import file written to `output`.
    pub async fn to_import_json(
        &self,
        model: &Path,
        app: &AppMetadata,
        version_id: &str,
        output: &Path,
    ) -> SyncResult<()> {
        let args = vec![
            "parse".to_string(),
            "ToLuis".to_string(),
            "--in".to_string(),
            model.display().to_string(),
            "--luis_name".to_string(),
            app.name.clone(),
            "--luis_desc".to_string(),
            app.description.clone(),
            "--luis_versionId".to_string(),
            version_id.to_string(),
            "--luis_culture".to_string(),
            app.culture.clone(),
            "-o".to_string(),
            parent_dir(output).display().to_string(),
            "--out".to_string(),
            file_name(output),
        ];
        let result = self.runner.run(&self.program, &args).await?;
        self.check("parse ToLuis", &result)
    }

    /// Converts an exported JSON file back into `.lu` text, without the
    /// generated header.
    ///
    /// The converter only takes a directory and a base name and always adds
    /// the `.lu` extension, so the file written is `model` with its extension
    /// replaced. That path is returned.
    pub async fn to_lu(&self, input: &Path, model: &Path) -> SyncResult<PathBuf> {
        let args = vec![
            "refresh".to_string(),
            "-i".to_string(),
            input.display().to_string(),
            "-o".to_string(),
            parent_dir(model).display().to_string(),
            "-n".to_string(),
            file_stem(model),
            "--skip_header".to_string(),
        ];
        let result = self.runner.run(&self.program, &args).await?;
        self.check("refresh", &result)?;
        Ok(lu_output_path(model))
    }
}

/// Where `refresh` puts the text for `model`.
fn lu_output_path(model: &Path) -> PathBuf {
    model.with_extension("lu")
}
