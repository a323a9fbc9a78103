use crate::ports::{Archiver, MessageSink, TemplateCatalog};

/// Application context holding the collaborators for command execution.
pub struct AppContext<C: TemplateCatalog, A: Archiver, M: MessageSink> {
    catalog: C,
    archiver: A,
    messages: M,
}

impl<C: TemplateCatalog, A: Archiver, M: MessageSink> AppContext<C, A, M> {
    /// Create a new application context.
    pub fn new(catalog: C, archiver: A, messages: M) -> Self {
        Self { catalog, archiver, messages }
    }

    /// Get a reference to the template catalog.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Get a reference to the archiver.
    pub fn archiver(&self) -> &A {
        &self.archiver
    }

    /// Get a reference to the message sink.
    pub fn messages(&self) -> &M {
        &self.messages
    }
}
