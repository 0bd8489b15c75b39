/// Error raised while loading entries or configuration.
///
/// `phase` names the stage that failed: `"read"`, `"fetch"`, `"parse"` or
/// `"config"`.
#[derive(Debug, Clone, PartialEq)]
pub struct GalaxyError {
    pub message: String,
    pub phase: &'static str,
}

impl GalaxyError {
    pub fn new(phase: &'static str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            phase,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new("config", message)
    }
}

impl std::fmt::Display for GalaxyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.phase, self.message)
    }
}

impl std::error::Error for GalaxyError {}

impl From<std::io::Error> for GalaxyError {
    fn from(e: std::io::Error) -> Self {
        Self::new("read", e.to_string())
    }
}

impl From<serde_json::Error> for GalaxyError {
    fn from(e: serde_json::Error) -> Self {
        Self::new("parse", e.to_string())
    }
}

impl From<reqwest::Error> for GalaxyError {
    fn from(e: reqwest::Error) -> Self {
        Self::new("fetch", e.to_string())
    }
}
