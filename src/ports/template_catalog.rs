use crate::domain::AppError;

/// A template loaded from the skeleton catalog.
#[derive(Debug, Clone)]
pub struct TemplateSource {
    /// Raw template bytes, possibly containing unresolved tokens.
    pub content: Vec<u8>,
    /// Opaque bytes that must bypass the token engine.
    pub is_binary: bool,
}

/// Read access to the fixed set of skeleton templates.
pub trait TemplateCatalog {
    /// Load a template by catalog path.
    fn load(&self, source: &str) -> Result<TemplateSource, AppError>;

    /// Load a template that is expected to be text.
    fn load_text(&self, source: &str) -> Result<String, AppError> {
        let template = self.load(source)?;
        if template.is_binary {
            return Err(AppError::invalid_input(format!("Template '{source}' is not text")));
        }
        String::from_utf8(template.content)
            .map_err(|_| AppError::invalid_input(format!("Template '{source}' is not valid UTF-8")))
    }
}
