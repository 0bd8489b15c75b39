//! Mood filter over the entry snapshot.

use crate::entry::Entry;

/// Entries whose mood equals `mood` exactly, in original order.
///
/// `None` keeps every entry. An unmatched mood yields an empty vector.
pub fn filter_entries<'a>(entries: &'a [Entry], mood: Option<&str>) -> Vec<&'a Entry> {
    match mood {
        None => entries.iter().collect(),
        Some(tag) => entries.iter().filter(|e| e.mood == tag).collect(),
    }
}

/// Filter bar click: the active mood toggles off, any other mood becomes active.
pub fn toggle_filter(current: Option<&str>, clicked: &str) -> Option<String> {
    if current == Some(clicked) {
        None
    } else {
        Some(clicked.to_string())
    }
}

/// Number of entries per mood label, in order of first appearance.
pub fn mood_counts(entries: &[Entry]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for e in entries {
        if let Some(slot) = counts.iter_mut().find(|(m, _)| *m == e.mood) {
            slot.1 += 1;
        } else {
            counts.push((e.mood.clone(), 1));
        }
    }
    counts
}
