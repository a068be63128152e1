use crate::error::SyncResult;
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use tracing::{debug, warn};

/// A converter or export output that must not outlive the step that made it.
///
/// The file gets a name of its own next to the model, so it can never alias
/// the model or a file the user keeps beside it. It is removed when the value
/// is dropped, so every early return through `?` cleans up as well.
#[derive(Debug)]
pub struct TransientArtifact {
    path: Option<TempPath>,
}

impl TransientArtifact {
    /// Reserves `<dir>/<model stem>.<random><suffix>` in the model's directory.
    pub fn beside(model: &Path, suffix: &str) -> SyncResult<Self> {
        let path = tempfile::Builder::new()
            .prefix(&format!("{}.", file_stem(model)))
            .suffix(suffix)
            .tempfile_in(parent_dir(model))?
            .into_temp_path();
        debug!(path = %path.display(), "Reserved transient artifact");
        Ok(Self { path: Some(path) })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.path.as_deref().unwrap_or_else(|| Path::new(""))
    }
}

impl Drop for TransientArtifact {
    fn drop(&mut self) {
        let Some(path) = self.path.take() else { return };
        let shown = path.display().to_string();
        match path.close() {
            Ok(()) => debug!(path = %shown, "Removed transient artifact"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %shown, error = %e, "Failed to remove transient artifact"),
        }
    }
}

/// Directory holding `path`, `.` for a bare file name.
pub(crate) fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
}

/// `<dir>/<model stem><suffix>` next to the model file.
#[must_use]
pub fn sibling_path(model: &Path, suffix: &str) -> PathBuf {
    model.with_file_name(format!("{}{suffix}", file_stem(model)))
}
