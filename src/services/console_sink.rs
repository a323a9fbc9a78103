use crate::ports::{Level, MessageSink};

/// Sink that prints progress to stdout and problems to stderr.
#[derive(Debug, Clone, Default)]
pub struct ConsoleMessageSink;

impl ConsoleMessageSink {
    pub fn new() -> Self {
        Self
    }
}

impl MessageSink for ConsoleMessageSink {
    fn push(&self, level: Level, text: &str) {
        match level {
            Level::Info => println!("{text}"),
            Level::Warning => eprintln!("Warning: {text}"),
            Level::Error => eprintln!("Error: {text}"),
        }
    }
}
