//! In-memory staging store for one generation run.
//!
//! Files are collected here before anything touches the real
//! filesystem; the store is keyed by target path and the only mutation
//! surface is the explicit create/append/replace operations.

use crate::domain::{AppError, TagStore, tokens};
use crate::ports::TemplateCatalog;

/// One staged file awaiting resolution and materialization.
#[derive(Debug, Clone)]
pub struct StagedFile {
    /// Path relative to the package root; identity within the store.
    pub target: String,
    /// Catalog path this content originated from; `None` for synthesized content.
    pub source: Option<String>,
    /// Full buffer, possibly still containing unresolved tokens.
    pub content: Vec<u8>,
    /// Opaque bytes that bypass the token engine.
    pub is_binary: bool,
}

/// Ordered collection of staged files, keyed by target path.
#[derive(Debug, Default)]
pub struct FileStagingStore {
    files: Vec<StagedFile>,
}

impl FileStagingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a catalog template at `target`. Staging the same target
    /// twice is an error; appending is a separate operation.
    pub fn add_file<C: TemplateCatalog>(
        &mut self,
        catalog: &C,
        source: &str,
        target: &str,
    ) -> Result<(), AppError> {
        if self.has_file(target) {
            return Err(AppError::DuplicateTarget(target.to_string()));
        }
        let template = catalog.load(source)?;
        self.files.push(StagedFile {
            target: target.to_string(),
            source: Some(source.to_string()),
            content: template.content,
            is_binary: template.is_binary,
        });
        Ok(())
    }

    /// Stage caller-built text content with no template source.
    pub fn add_synthesized(&mut self, target: &str, text: &str) -> Result<(), AppError> {
        if self.has_file(target) {
            return Err(AppError::DuplicateTarget(target.to_string()));
        }
        self.files.push(StagedFile {
            target: target.to_string(),
            source: None,
            content: text.as_bytes().to_vec(),
            is_binary: false,
        });
        Ok(())
    }

    /// Append text to an already-staged target.
    pub fn append(&mut self, target: &str, text: &str) -> Result<(), AppError> {
        let file = self.find_mut(target)?;
        file.content.extend_from_slice(text.as_bytes());
        Ok(())
    }

    /// Replace the content of an already-staged target wholesale.
    pub fn replace(&mut self, target: &str, text: &str) -> Result<(), AppError> {
        let file = self.find_mut(target)?;
        file.content = text.as_bytes().to_vec();
        file.is_binary = false;
        Ok(())
    }

    pub fn has_file(&self, target: &str) -> bool {
        self.files.iter().any(|f| f.target == target)
    }

    /// All staged files in staging order.
    pub fn files(&self) -> &[StagedFile] {
        &self.files
    }

    /// Read back a staged target's content as text.
    pub fn text(&self, target: &str) -> Result<String, AppError> {
        let file = self
            .files
            .iter()
            .find(|f| f.target == target)
            .ok_or_else(|| AppError::StagedFileMissing(target.to_string()))?;
        String::from_utf8(file.content.clone())
            .map_err(|_| AppError::invalid_input(format!("Staged file '{target}' is not text")))
    }

    /// Run the token engine over every non-binary record in place.
    ///
    /// Aborts on the first failure, before anything reaches the real
    /// filesystem.
    pub fn resolve_all(&mut self, tags: &TagStore) -> Result<(), AppError> {
        for file in &mut self.files {
            if file.is_binary {
                continue;
            }
            let text = String::from_utf8(std::mem::take(&mut file.content)).map_err(|_| {
                AppError::invalid_input(format!("Staged file '{}' is not text", file.target))
            })?;
            file.content = tokens::resolve(&text, tags, &file.target)?.into_bytes();
        }
        Ok(())
    }

    fn find_mut(&mut self, target: &str) -> Result<&mut StagedFile, AppError> {
        self.files
            .iter_mut()
            .find(|f| f.target == target)
            .ok_or_else(|| AppError::StagedFileMissing(target.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::TemplateSource;

    struct FakeCatalog;

    impl TemplateCatalog for FakeCatalog {
        fn load(&self, source: &str) -> Result<TemplateSource, AppError> {
            match source {
                "greeting.txt" => Ok(TemplateSource {
                    content: b"hello ##name##\n".to_vec(),
                    is_binary: false,
                }),
                "icon.png" => Ok(TemplateSource {
                    content: vec![0x89, 0x50, 0x4e, 0x47],
                    is_binary: true,
                }),
                other => Err(AppError::TemplateNotFound(other.to_string())),
            }
        }
    }

    #[test]
    fn add_file_reads_template_content() {
        let mut store = FileStagingStore::new();
        store.add_file(&FakeCatalog, "greeting.txt", "docs/greeting.txt").unwrap();

        assert!(store.has_file("docs/greeting.txt"));
        assert_eq!(store.text("docs/greeting.txt").unwrap(), "hello ##name##\n");
        assert_eq!(store.files()[0].source.as_deref(), Some("greeting.txt"));
    }

    #[test]
    fn missing_template_fails_staging() {
        let mut store = FileStagingStore::new();
        assert!(matches!(
            store.add_file(&FakeCatalog, "absent.txt", "x"),
            Err(AppError::TemplateNotFound(_))
        ));
        assert!(!store.has_file("x"));
    }

    #[test]
    fn duplicate_target_is_an_error() {
        let mut store = FileStagingStore::new();
        store.add_file(&FakeCatalog, "greeting.txt", "a.txt").unwrap();

        assert!(matches!(
            store.add_file(&FakeCatalog, "greeting.txt", "a.txt"),
            Err(AppError::DuplicateTarget(target)) if target == "a.txt"
        ));
        assert!(matches!(
            store.add_synthesized("a.txt", "again"),
            Err(AppError::DuplicateTarget(_))
        ));
    }

    #[test]
    fn append_concatenates_in_call_order() {
        let mut store = FileStagingStore::new();
        store.add_synthesized("registry.php", "<?php\n").unwrap();
        store.append("registry.php", "first\n").unwrap();
        store.append("registry.php", "second\n").unwrap();

        assert_eq!(store.text("registry.php").unwrap(), "<?php\nfirst\nsecond\n");
    }

    #[test]
    fn append_to_unstaged_target_fails() {
        let mut store = FileStagingStore::new();
        assert!(matches!(
            store.append("never.txt", "x"),
            Err(AppError::StagedFileMissing(target)) if target == "never.txt"
        ));
    }

    #[test]
    fn replace_swaps_content_wholesale() {
        let mut store = FileStagingStore::new();
        store.add_synthesized("composer.json", "{}").unwrap();
        store.replace("composer.json", "{\n  \"name\": \"acme/demo\"\n}\n").unwrap();

        assert_eq!(store.text("composer.json").unwrap(), "{\n  \"name\": \"acme/demo\"\n}\n");
    }

    #[test]
    fn resolve_all_skips_binary_records() {
        let mut store = FileStagingStore::new();
        store.add_file(&FakeCatalog, "greeting.txt", "greeting.txt").unwrap();
        store.add_file(&FakeCatalog, "icon.png", "public/icon.png").unwrap();

        let mut tags = TagStore::new();
        tags.set("name", "acme");
        store.resolve_all(&tags).unwrap();

        assert_eq!(store.text("greeting.txt").unwrap(), "hello acme\n");
        assert_eq!(store.files()[1].content, vec![0x89, 0x50, 0x4e, 0x47]);
    }

    #[test]
    fn resolve_all_fails_on_unknown_tag() {
        let mut store = FileStagingStore::new();
        store.add_file(&FakeCatalog, "greeting.txt", "greeting.txt").unwrap();

        let err = store.resolve_all(&TagStore::new()).unwrap_err();
        assert!(matches!(err, AppError::UnresolvedReference { tag, .. } if tag == "name"));
    }
}
