mod archiver;
mod message_sink;
mod template_catalog;

pub use archiver::Archiver;
pub use message_sink::{Level, MemoryMessageSink, Message, MessageSink};
pub use template_catalog::{TemplateCatalog, TemplateSource};
