use std::path::Path;

use crate::domain::AppError;

/// Folder-to-zip archiving.
pub trait Archiver {
    /// Recursively zip `src_dir` into the archive at `dest`.
    ///
    /// Stored paths are relative to `src_dir`, no leading segments.
    fn zip_dir(&self, src_dir: &Path, dest: &Path) -> Result<(), AppError>;
}
