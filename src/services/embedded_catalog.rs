//! Skeleton template catalog embedded in the binary.

use include_dir::{Dir, include_dir};

use crate::domain::AppError;
use crate::ports::{TemplateCatalog, TemplateSource};

static SKELETON_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/skeleton");

/// Catalog backed by the `src/skeleton/` tree compiled into the binary.
///
/// Templates that are not valid UTF-8 (icons) are loaded as binary and
/// bypass the token engine.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedTemplateCatalog;

impl EmbeddedTemplateCatalog {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateCatalog for EmbeddedTemplateCatalog {
    fn load(&self, source: &str) -> Result<TemplateSource, AppError> {
        let file = SKELETON_DIR
            .get_file(source)
            .ok_or_else(|| AppError::TemplateNotFound(source.to_string()))?;

        Ok(TemplateSource {
            content: file.contents().to_vec(),
            is_binary: file.contents_utf8().is_none(),
        })
    }
}
