use chrono::Local;
use serde::{Deserialize, Serialize};

/// Timestamp layout for `JournalEntry::date`, local time to the minute.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Moods offered by the mood picker. The store accepts any label.
pub const MOODS: [&str; 6] = [
    "😊 Happy",
    "😢 Sad",
    "😐 Neutral",
    "😡 Angry",
    "😴 Tired",
    "😌 Grateful",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub date: String,
    pub mood: String,
    pub note: String,
}

impl JournalEntry {
    pub fn new(date: impl Into<String>, mood: impl Into<String>, note: impl Into<String>) -> Self {
        JournalEntry {
            date: date.into(),
            mood: mood.into(),
            note: note.into(),
        }
    }

    /// Builds an entry stamped with the current local time.
    pub fn now(mood: impl Into<String>, note: impl Into<String>) -> Self {
        Self::new(Local::now().format(DATE_FORMAT).to_string(), mood, note)
    }
}
