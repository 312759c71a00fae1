use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub source: SourceConfig,
    pub hero: HeroConfig,
    pub tween: TweenConfig,
    pub activity: ActivityConfig,
    pub display: DisplayConfig,
    pub contact: ContactConfig,
    pub fps: FpsConfig,
}

/// Where the catalog document comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// A file path or an http(s) URL.
    pub location: String,
    /// Append a `t=<millis>` query parameter to URL fetches.
    pub cache_bust: bool,
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: "repos.json".into(),
            cache_bust: true,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub phrases: Vec<String>,
    pub type_ms: u64,
    pub delete_ms: u64,
    pub pause_full_ms: u64,
    pub pause_empty_ms: u64,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            phrases: vec![
                "Python GUI Developer".into(),
                "Automation Specialist".into(),
                "Desktop App Creator".into(),
                "Problem Solver".into(),
                "Code Architect".into(),
            ],
            type_ms: 100,
            delete_ms: 50,
            pause_full_ms: 2000,
            pause_empty_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TweenConfig {
    pub duration_ms: u64,
    pub tick_ms: u64,
    /// Fixed delay before skill bars start, used in place of visibility detection.
    pub reveal_delay_ms: u64,
}

impl Default for TweenConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            tick_ms: 16,
            reveal_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityConfig {
    pub days: usize,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self { days: 84 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Language whose share feeds the third stat counter.
    pub highlight_language: String,
    pub language_colors: BTreeMap<String, String>,
    pub fallback_color: String,
    pub editor_host_from: String,
    pub editor_host_to: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let language_colors = [
            ("Python", "#3776ab"),
            ("CSS", "#1572B6"),
            ("JavaScript", "#F7DF1E"),
            ("HTML", "#E34F26"),
            ("TypeScript", "#3178C6"),
            ("PHP", "#777BB4"),
            ("C", "#A8B9CC"),
            ("C++", "#f34b7d"),
            ("Java", "#b07219"),
            ("Go", "#00ADD8"),
            ("Rust", "#dea584"),
        ]
        .into_iter()
        .map(|(lang, color)| (lang.to_string(), color.to_string()))
        .collect();

        Self {
            highlight_language: "Python".into(),
            language_colors,
            fallback_color: "#999999".into(),
            editor_host_from: "github.com".into(),
            editor_host_to: "github.dev".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub sending_ms: u64,
    pub reset_ms: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            sending_ms: 2000,
            reset_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FpsConfig {
    /// Frame cadence of the sampler when driven by the scheduler.
    pub frame_ms: u64,
}

impl Default for FpsConfig {
    fn default() -> Self {
        Self { frame_ms: 16 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: FolioConfig = toml::from_str(
            r#"
            [hero]
            phrases = ["A", "BB"]

            [activity]
            days = 28
            "#,
        )
        .unwrap();
        assert_eq!(cfg.hero.phrases, vec!["A", "BB"]);
        assert_eq!(cfg.hero.type_ms, 100);
        assert_eq!(cfg.activity.days, 28);
        assert_eq!(cfg.source.location, "repos.json");
        assert_eq!(cfg.display.language_colors["Rust"], "#dea584");
    }

    #[test]
    fn default_round_trips_through_toml() {
        let text = toml::to_string_pretty(&FolioConfig::default()).unwrap();
        let back: FolioConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.tween.duration_ms, 2000);
        assert_eq!(back.display.editor_host_to, "github.dev");
    }
}
