//! Deterministic sample journal, for running the viewer without a backend.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::entry::{Entry, Mood};

const MOMENTS: &[&str] = &[
    "Morning coffee on the balcony before anyone else woke up.",
    "Finally finished the report. Head is buzzing.",
    "Long walk by the river, the light was unreal.",
    "Missed the last train home again.",
    "Dinner with old friends, laughed until it hurt.",
    "Couldn't sleep. Too many tabs open in my head.",
    "Got the message I was waiting for!",
    "Rainy afternoon, new book, no plans.",
    "Argued about nothing. Regret it already.",
    "Cooked something new and it actually worked.",
];

const MEALS: &[&str] = &["breakfast", "lunch", "dinner", "snack"];

fn mix(i: u64) -> u64 {
    // splitmix64
    let mut z = i.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn demo_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// `n` sample entries, newest first. The same `n` always yields the same journal.
pub fn demo_entries(n: usize) -> Vec<Entry> {
    let epoch = demo_epoch();
    (0..n)
        .map(|i| {
            let h = mix(i as u64);
            // Every 13th entry carries a custom mood label
            let mood = if i % 13 == 12 {
                "Grateful".to_string()
            } else {
                Mood::ALL[(h % Mood::ALL.len() as u64) as usize].label().to_string()
            };
            let minutes_back = i as i64 * 7 * 60 + (h >> 20) as i64 % 300;
            let mut entry = Entry::new(format!("demo-{i:04}"), mood, epoch - Duration::minutes(minutes_back))
                .with_content(MOMENTS[(h >> 8) as usize % MOMENTS.len()]);
            if (h >> 40) % 4 == 0 {
                entry.meal_type = Some(MEALS[(h >> 44) as usize % MEALS.len()].to_string());
            }
            entry
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_and_sized() {
        assert!(demo_entries(0).is_empty());
        let a = demo_entries(50);
        assert_eq!(a.len(), 50);
        assert_eq!(a, demo_entries(50));
    }

    #[test]
    fn newest_first_and_unique_ids() {
        let entries = demo_entries(200);
        assert!(entries.windows(2).all(|w| w[0].created_at > w[1].created_at));
        let mut ids: Vec<_> = entries.iter().map(|e| e.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn includes_custom_moods() {
        let entries = demo_entries(26);
        assert!(entries.iter().any(|e| e.known_mood().is_none()));
        assert!(entries.iter().any(|e| e.known_mood().is_some()));
    }
}
