use chrono::{DateTime, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::types::DisplayConfig;

/// Placeholder shown when a record carries no description.
pub const DEFAULT_DESCRIPTION: &str = "No description available";

/// Language label used when a record carries none.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// One repository in the catalog. Every field other than `name` is optional
/// on the wire; `null` and missing keys both degrade to the defaults below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRecord {
    #[serde(default, deserialize_with = "nullable")]
    #[schemars(with = "String")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schemars(with = "Vec<String>")]
    pub topics: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schemars(with = "u64")]
    pub stars: u64,
    #[serde(default, deserialize_with = "nullable")]
    #[schemars(with = "u64")]
    pub forks: u64,
    /// ISO-8601 timestamp or plain `YYYY-MM-DD` date.
    #[serde(default, alias = "updated", alias = "updated_at")]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schemars(with = "String")]
    pub url: String,
}

/// Treat an explicit JSON `null` like a missing key.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl RepositoryRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Primary language, or `"Unknown"` when absent or blank.
    pub fn language(&self) -> &str {
        match self.language.as_deref() {
            Some(lang) if !lang.trim().is_empty() => lang,
            _ => UNKNOWN_LANGUAGE,
        }
    }

    /// Whether the record names a language at all.
    pub fn has_language(&self) -> bool {
        self.language.as_deref().is_some_and(|l| !l.trim().is_empty())
    }

    /// Description text, or the placeholder when absent or blank.
    pub fn description(&self) -> &str {
        match self.description.as_deref() {
            Some(desc) if !desc.trim().is_empty() => desc,
            _ => DEFAULT_DESCRIPTION,
        }
    }

    /// Topics joined with single spaces.
    pub fn topics_joined(&self) -> String {
        self.topics.join(" ")
    }

    /// Calendar date of the last update, ignoring time-of-day.
    pub fn updated_date(&self) -> Option<NaiveDate> {
        let raw = self.updated_at.as_deref()?.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.date_naive());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }

    /// Update date formatted for cards, e.g. `Nov 2, 2025`.
    pub fn updated_display(&self) -> String {
        match self.updated_date() {
            Some(date) => date.format("%b %-d, %Y").to_string(),
            None => "unknown".into(),
        }
    }

    /// Link that opens the repository in a browser editor, built by swapping
    /// the first occurrence of the host.
    pub fn editor_url(&self, display: &DisplayConfig) -> String {
        self.url
            .replacen(&display.editor_host_from, &display.editor_host_to, 1)
    }

    /// Hex colour for the record's language.
    pub fn language_color<'a>(&self, display: &'a DisplayConfig) -> &'a str {
        display
            .language_colors
            .get(self.language())
            .map(String::as_str)
            .unwrap_or(&display.fallback_color)
    }
}
