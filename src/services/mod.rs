mod console_sink;
mod embedded_catalog;
mod zip_archiver;

pub use console_sink::ConsoleMessageSink;
pub use embedded_catalog::EmbeddedTemplateCatalog;
pub use zip_archiver::ZipArchiver;
