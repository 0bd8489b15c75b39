//! Entry snapshot loading.
//!
//! A snapshot is a JSON array of entries, read once per view activation from a
//! file or an `http(s)://` URL. The galaxy never polls or subscribes.

use std::path::PathBuf;

use url::Url;

use crate::entry::Entry;
use crate::error::GalaxyError;

/// Where a snapshot comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum EntrySource {
    File(PathBuf),
    Remote(Url),
}

impl EntrySource {
    /// `http://` and `https://` locations are remote, anything else is a path.
    pub fn parse(location: &str) -> Result<Self, GalaxyError> {
        let trimmed = location.trim();
        if trimmed.is_empty() {
            return Err(GalaxyError::new("read", "empty entry location"));
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            let url = Url::parse(trimmed)
                .map_err(|e| GalaxyError::new("fetch", format!("Invalid URL: {}", e)))?;
            Ok(Self::Remote(url))
        } else {
            Ok(Self::File(PathBuf::from(trimmed)))
        }
    }

    /// Read and parse the snapshot, newest entry first.
    pub fn load(&self) -> Result<Vec<Entry>, GalaxyError> {
        let body = match self {
            Self::File(path) => std::fs::read_to_string(path).map_err(|e| {
                GalaxyError::new("read", format!("{}: {}", path.display(), e))
            })?,
            Self::Remote(url) => fetch_text(url)?,
        };
        let mut entries = parse_entries(&body)?;
        sort_newest_first(&mut entries);
        log::info!("loaded {} entries from {}", entries.len(), self);
        Ok(entries)
    }
}

impl std::fmt::Display for EntrySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(p) => write!(f, "{}", p.display()),
            Self::Remote(u) => write!(f, "{}", u),
        }
    }
}

/// Shorthand for `EntrySource::parse(location)?.load()`.
pub fn load_entries(location: &str) -> Result<Vec<Entry>, GalaxyError> {
    EntrySource::parse(location)?.load()
}

/// Parse a JSON array of entries.
pub fn parse_entries(json: &str) -> Result<Vec<Entry>, GalaxyError> {
    Ok(serde_json::from_str(json)?)
}

/// Newest first by `created_at`; equal timestamps keep their order.
pub fn sort_newest_first(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

fn fetch_text(url: &Url) -> Result<String, GalaxyError> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("mood-galaxy/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(15))
        .build()
        .map_err(|e| GalaxyError::new("fetch", format!("Client error: {}", e)))?;

    let response = client
        .get(url.as_str())
        .header("Accept", "application/json")
        .send()
        .map_err(|e| GalaxyError::new("fetch", format!("Request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(GalaxyError::new("fetch", format!("HTTP {} from {}", status, url)));
    }

    Ok(response.text()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"[
        {"id": "old", "mood": "Calm", "content": "tea", "created_at": "2024-03-01T09:00:00Z"},
        {"id": "new", "mood": "Joy", "content": "beach", "created_at": "2024-03-05T09:00:00Z",
         "image_url": "https://img.example/beach.jpg"},
        {"id": "mid", "mood": "Custom feeling", "created_at": "2024-03-03T09:00:00Z"},
        {"id": "mid2", "created_at": "2024-03-03T09:00:00Z"}
    ]"#;

    #[test]
    fn classifies_locations() {
        assert!(matches!(
            EntrySource::parse("https://api.example/entries").unwrap(),
            EntrySource::Remote(_)
        ));
        assert_eq!(
            EntrySource::parse(" data/entries.json ").unwrap(),
            EntrySource::File(PathBuf::from("data/entries.json"))
        );
        assert_eq!(EntrySource::parse("").unwrap_err().phase, "read");
        assert_eq!(EntrySource::parse("http://[::1").unwrap_err().phase, "fetch");
    }

    #[test]
    fn parses_and_orders_newest_first() {
        let mut entries = parse_entries(SNAPSHOT).unwrap();
        sort_newest_first(&mut entries);
        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "mid2", "old"]);
        assert_eq!(entries[0].image_url.as_deref(), Some("https://img.example/beach.jpg"));
        assert_eq!(entries[2].mood, "");
    }

    #[test]
    fn malformed_snapshot_is_parse_error() {
        assert_eq!(parse_entries("{not json").unwrap_err().phase, "parse");
        assert_eq!(parse_entries(r#"[{"id": 1}]"#).unwrap_err().phase, "parse");
    }

    #[test]
    fn empty_snapshot_is_valid() {
        assert!(parse_entries("[]").unwrap().is_empty());
    }

    #[test]
    fn loads_from_file() {
        let path = std::env::temp_dir().join(format!("mood-galaxy-{}.json", std::process::id()));
        std::fs::write(&path, SNAPSHOT).unwrap();
        let entries = load_entries(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].id, "new");
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = load_entries("/definitely/not/here/entries.json").unwrap_err();
        assert_eq!(err.phase, "read");
    }
}
