//! Append-only session transcript, shown newest-first

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub question: String,
    pub answer: String,
    pub asked_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.entries.push(TranscriptEntry {
            question: question.into(),
            answer: answer.into(),
            asked_at: Utc::now(),
        });
    }

    /// Entries for display, newest first.
    pub fn newest_first(&self) -> impl Iterator<Item = &TranscriptEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
