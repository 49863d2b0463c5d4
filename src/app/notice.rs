use std::collections::VecDeque;
use std::time::{Duration, Instant};

const MAX_NOTICES: usize = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
    expires: Instant,
}

/// Transient status messages shown over the UI until they expire.
#[derive(Debug)]
pub struct Notices {
    queue: VecDeque<Notice>,
    ttl: Duration,
}

impl Notices {
    pub fn new(ttl: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            ttl,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, severity: Severity) {
        let message = message.into();
        // Same text again only refreshes the existing notice.
        self.queue.retain(|n| n.message != message);
        self.queue.push_back(Notice {
            message,
            severity,
            expires: Instant::now() + self.ttl,
        });
        while self.queue.len() > MAX_NOTICES {
            self.queue.pop_front();
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Info);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Warning);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Error);
    }

    /// Drop notices that expired by `now`.
    pub fn expire(&mut self, now: Instant) {
        self.queue.retain(|n| n.expires > now);
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.queue.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
