use crate::journal_entry::JournalEntry;

const SEPARATOR_WIDTH: usize = 50;

/// Entries whose mood and date contain the given substrings, in order.
///
/// Matching is case-sensitive. An empty substring matches everything.
pub fn filter(entries: &[JournalEntry], mood: &str, date: &str) -> Vec<JournalEntry> {
    entries
        .iter()
        .filter(|e| {
            (mood.is_empty() || e.mood.contains(mood)) && (date.is_empty() || e.date.contains(date))
        })
        .cloned()
        .collect()
}

/// Count of entries per mood label, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoodTally {
    counts: Vec<(String, u64)>,
}

impl MoodTally {
    pub fn get(&self, mood: &str) -> u64 {
        self.counts
            .iter()
            .find(|(label, _)| label == mood)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(label, count)| (label.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    fn record(&mut self, mood: &str) {
        match self.counts.iter_mut().find(|(label, _)| label == mood) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((mood.to_string(), 1)),
        }
    }
}

/// Labels are compared verbatim: "Happy" and "happy " are different moods.
pub fn aggregate_by_mood(entries: &[JournalEntry]) -> MoodTally {
    let mut tally = MoodTally::default();
    for entry in entries {
        tally.record(&entry.mood);
    }
    tally
}

/// Flat text rendering shared by the entry viewer and file export.
pub fn export_text(entries: &[JournalEntry]) -> String {
    let separator = "-".repeat(SEPARATOR_WIDTH);
    entries
        .iter()
        .map(|e| format!("{} | {}\n{}\n{}\n", e.date, e.mood, e.note, separator))
        .collect()
}
