//! Journal entry record and the known mood labels.
//!
//! Entries are owned by the storage layer; the galaxy only reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of an entry, stable across renders.
pub type EntryId = String;

/// One journal record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    #[serde(default)]
    pub content: String,
    /// Mood label. Known labels are listed in [`Mood`]; anything else
    /// (including the empty string) is a custom label.
    #[serde(default)]
    pub mood: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<String>,
}

impl Entry {
    pub fn new(id: impl Into<EntryId>, mood: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            content: String::new(),
            mood: mood.into(),
            created_at,
            image_url: None,
            meal_type: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// The known mood for this entry, if its label is one.
    pub fn known_mood(&self) -> Option<Mood> {
        Mood::from_label(&self.mood)
    }
}

/// The moods offered by the entry composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Joy,
    Calm,
    Neutral,
    Tired,
    Stressed,
    Angry,
    Crying,
    Excited,
    Sick,
    Proud,
    Love,
}

impl Mood {
    pub const ALL: [Mood; 11] = [
        Mood::Joy,
        Mood::Calm,
        Mood::Neutral,
        Mood::Tired,
        Mood::Stressed,
        Mood::Angry,
        Mood::Crying,
        Mood::Excited,
        Mood::Sick,
        Mood::Proud,
        Mood::Love,
    ];

    /// Case-sensitive, exact label match.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.label() == label)
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Joy => "Joy",
            Mood::Calm => "Calm",
            Mood::Neutral => "Neutral",
            Mood::Tired => "Tired",
            Mood::Stressed => "Stressed",
            Mood::Angry => "Angry",
            Mood::Crying => "Crying",
            Mood::Excited => "Excited",
            Mood::Sick => "Sick",
            Mood::Proud => "Proud",
            Mood::Love => "Love",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Joy => "🥰",
            Mood::Calm => "🌿",
            Mood::Neutral => "😶",
            Mood::Tired => "😴",
            Mood::Stressed => "🤯",
            Mood::Angry => "🤬",
            Mood::Crying => "😭",
            Mood::Excited => "🎉",
            Mood::Sick => "🤢",
            Mood::Proud => "😎",
            Mood::Love => "❤️",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for m in Mood::ALL {
            assert_eq!(Mood::from_label(m.label()), Some(m));
        }
    }

    #[test]
    fn labels_are_case_sensitive() {
        assert_eq!(Mood::from_label("joy"), None);
        assert_eq!(Mood::from_label(""), None);
        assert_eq!(Mood::from_label("Grateful"), None);
    }

    #[test]
    fn deserializes_with_missing_optional_fields() {
        let json = r#"{"id":"a1","created_at":"2024-05-01T08:30:00Z"}"#;
        let e: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(e.id, "a1");
        assert_eq!(e.mood, "");
        assert!(e.image_url.is_none());
        assert!(e.known_mood().is_none());
    }

    #[test]
    fn deserializes_full_record() {
        let json = r#"{
            "id": "b2",
            "content": "sunset walk",
            "mood": "Calm",
            "created_at": "2024-05-02T19:00:00+02:00",
            "image_url": "https://img.example/b2.jpg",
            "meal_type": "dinner"
        }"#;
        let e: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(e.known_mood(), Some(Mood::Calm));
        assert_eq!(e.meal_type.as_deref(), Some("dinner"));
        assert_eq!(e.created_at.to_rfc3339(), "2024-05-02T17:00:00+00:00");
    }
}
