use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest file name the store accepts, in characters.
pub const MAX_FILE_NAME_LEN: usize = 260;

/// Identifier of an imported file. Owns exactly one summary and its stored rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileName(String);

impl FileName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the name is empty or only whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Unicode lowercase form used for case-insensitive matching.
    pub fn folded(&self) -> String {
        self.0.to_lowercase()
    }

    /// Reduce an upload name (possibly a path) to its final component.
    ///
    /// Both `/` and `\` count as separators so names coming from either
    /// platform sanitize the same way.
    pub fn sanitize(raw: &str) -> Self {
        let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
        Self(base.to_string())
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for FileName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for FileName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for FileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(FileName::sanitize("data/2024/t.csv").as_str(), "t.csv");
        assert_eq!(FileName::sanitize(r"C:\uploads\t.csv").as_str(), "t.csv");
        assert_eq!(FileName::sanitize("t.csv").as_str(), "t.csv");
    }

    #[test]
    fn test_sanitize_trailing_separator_is_blank() {
        assert!(FileName::sanitize("uploads/").is_blank());
        assert!(FileName::sanitize("   ").is_blank());
    }

    #[test]
    fn test_folded_is_unicode_lowercase() {
        assert_eq!(FileName::from("Report-ÄÖ.CSV").folded(), "report-äö.csv");
    }
}
