use std::sync::Mutex;

/// Severity of a user-facing progress message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

/// One leveled progress message.
#[derive(Debug, Clone)]
pub struct Message {
    pub level: Level,
    pub text: String,
}

/// Append-only sink for user-facing progress messages.
///
/// Every pipeline milestone and every fatal error is reported here,
/// independent of the returned `Result`.
pub trait MessageSink {
    fn push(&self, level: Level, text: &str);

    fn info(&self, text: &str) {
        self.push(Level::Info, text);
    }

    fn warning(&self, text: &str) {
        self.push(Level::Warning, text);
    }

    fn error(&self, text: &str) {
        self.push(Level::Error, text);
    }
}

/// In-memory sink used by library callers and tests.
#[derive(Debug, Default)]
pub struct MemoryMessageSink {
    messages: Mutex<Vec<Message>>,
}

impl MemoryMessageSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all collected messages in append order.
    pub fn messages(&self) -> Vec<Message> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    /// Message texts only, for assertion convenience.
    pub fn texts(&self) -> Vec<String> {
        self.messages().into_iter().map(|m| m.text).collect()
    }
}

impl MessageSink for MemoryMessageSink {
    fn push(&self, level: Level, text: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(Message { level, text: text.to_string() });
        }
    }
}
