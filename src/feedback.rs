//! Rehearsal feedback - ordered messages handed to the UI after a run
//!
//! A `Feedback` value is built once per comparator run or early abort and is
//! never mutated after hand-off.

use serde::{Deserialize, Serialize};

/// Severity of one feedback line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    Success,
    Info,
    Error,
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageKind::Success => write!(f, "Success"),
            MessageKind::Info => write!(f, "Info"),
            MessageKind::Error => write!(f, "Error"),
        }
    }
}

/// One line of feedback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackMessage {
    pub kind: MessageKind,
    pub message: String,
}

/// Ordered, append-only list of feedback lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    messages: Vec<FeedbackMessage>,
}

impl Feedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line
    pub fn add(&mut self, kind: MessageKind, message: impl Into<String>) {
        self.messages.push(FeedbackMessage {
            kind,
            message: message.into(),
        });
    }

    pub fn messages(&self) -> &[FeedbackMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Lines of the given kind, for tests and summaries
    pub fn of_kind(&self, kind: MessageKind) -> impl Iterator<Item = &FeedbackMessage> {
        self.messages.iter().filter(move |m| m.kind == kind)
    }

    /// Whether any Error line was recorded
    pub fn has_errors(&self) -> bool {
        self.of_kind(MessageKind::Error).next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_order_is_preserved() {
        let mut f = Feedback::new();
        f.add(MessageKind::Error, "first");
        f.add(MessageKind::Info, "second");

        let kinds: Vec<MessageKind> = f.messages().iter().map(|m| m.kind).collect();
        assert_eq!(kinds, vec![MessageKind::Error, MessageKind::Info]);
        assert!(f.has_errors());
        assert_eq!(f.len(), 2);
    }

    #[test]
    fn test_kind_filter() {
        let mut f = Feedback::new();
        f.add(MessageKind::Success, "ok");
        assert_eq!(f.of_kind(MessageKind::Success).count(), 1);
        assert_eq!(f.of_kind(MessageKind::Error).count(), 0);
        assert!(!f.has_errors());
    }
}
