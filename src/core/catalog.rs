use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};

use super::activity::ActivityGrid;
use super::filter::{FilterState, recompute};
use super::repo::{RepositoryRecord, nullable};
use super::view::ids;
use crate::config::types::SourceConfig;
use crate::error::{FolioError, Result};

/// The JSON document the catalog is loaded from. Missing or `null` keys
/// default to empty/zero rather than failing the load.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogDocument {
    #[serde(deserialize_with = "lenient_records")]
    #[schemars(with = "Vec<RepositoryRecord>")]
    pub repositories: Vec<RepositoryRecord>,
    #[serde(deserialize_with = "nullable")]
    #[schemars(with = "ProfileStats")]
    pub stats: ProfileStats,
    #[serde(deserialize_with = "nullable")]
    #[schemars(with = "Vec<LanguageStat>")]
    pub language_stats: Vec<LanguageStat>,
    #[serde(deserialize_with = "nullable")]
    #[schemars(with = "Vec<TimelineEntry>")]
    pub timeline: Vec<TimelineEntry>,
    #[serde(deserialize_with = "nullable")]
    #[schemars(with = "Vec<Skill>")]
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileStats {
    #[serde(deserialize_with = "nullable")]
    #[schemars(with = "u64")]
    pub total_repos: u64,
    #[serde(deserialize_with = "nullable")]
    #[schemars(with = "u64")]
    pub followers: u64,
    #[serde(deserialize_with = "nullable")]
    #[schemars(with = "u64")]
    pub years_active: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LanguageStat {
    #[serde(deserialize_with = "nullable")]
    #[schemars(with = "String")]
    pub language: String,
    #[serde(deserialize_with = "nullable")]
    #[schemars(with = "f64")]
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TimelineEntry {
    #[serde(deserialize_with = "nullable")]
    #[schemars(with = "String")]
    pub date: String,
    #[serde(deserialize_with = "nullable")]
    #[schemars(with = "String")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    #[schemars(with = "String")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Skill {
    #[serde(deserialize_with = "nullable")]
    #[schemars(with = "String")]
    pub name: String,
    /// Proficiency percentage; clamped to 0..=100 when animated.
    #[serde(deserialize_with = "nullable")]
    #[schemars(with = "f64")]
    pub level: f64,
}

/// Decode `repositories` one element at a time. A malformed entry is logged
/// and skipped; the rest of the list survives.
fn lenient_records<'de, D>(deserializer: D) -> std::result::Result<Vec<RepositoryRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<serde_json::Value> = nullable(deserializer)?;
    Ok(raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed repository record");
                None
            }
        })
        .collect())
}

impl CatalogDocument {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse the document from its source. One attempt, no retries.
    pub fn fetch(source: &CatalogSource, config: &SourceConfig) -> Result<Self> {
        let text = match source {
            CatalogSource::File(path) => {
                std::fs::read_to_string(path).map_err(|source| FolioError::Io {
                    path: path.clone(),
                    source,
                })?
            }
            CatalogSource::Url(url) => fetch_url(url, config)?,
        };
        Self::from_json(&text)
    }
}

/// Where a catalog document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    /// `http://` and `https://` locations are URLs; anything else is a path.
    pub fn parse(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            CatalogSource::Url(location.to_string())
        } else {
            CatalogSource::File(PathBuf::from(location))
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Url(url) => f.write_str(url),
        }
    }
}

/// Append a `t=<millis>` parameter so intermediaries never serve a stale copy.
pub fn cache_busted(url: &str, millis: i64) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{}{}t={}", url, sep, millis)
}

fn fetch_url(url: &str, config: &SourceConfig) -> Result<String> {
    let url = if config.cache_bust {
        cache_busted(url, Utc::now().timestamp_millis())
    } else {
        url.to_string()
    };
    let fetch_err = |source: reqwest::Error| FolioError::Fetch {
        url: url.clone(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(fetch_err)?;

    debug!(%url, "fetching catalog");
    let response = client.get(&url).send().map_err(fetch_err)?;
    if !response.status().is_success() {
        return Err(FolioError::Status {
            url: url.clone(),
            status: response.status().as_u16(),
        });
    }
    response.text().map_err(fetch_err)
}

/// Aggregates computed once per catalog load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub total_repos: usize,
    pub total_stars: u64,
    pub total_forks: u64,
    pub distinct_languages: usize,
}

/// The in-memory, ordered list of repositories backing the project grid,
/// plus the profile data loaded alongside it.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<RepositoryRecord>,
    stats: ProfileStats,
    language_stats: Vec<LanguageStat>,
    timeline: Vec<TimelineEntry>,
    skills: Vec<Skill>,
    summary: CatalogSummary,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from a literal list of records.
    pub fn from_records(records: Vec<RepositoryRecord>) -> Self {
        Self::from_document(CatalogDocument {
            repositories: records,
            ..Default::default()
        })
    }

    /// Build from a parsed document. Unnamed records are dropped, and only
    /// the first record with a given name is kept. Skills whose widget ids
    /// collide keep only the first.
    pub fn from_document(doc: CatalogDocument) -> Self {
        let mut seen = HashSet::new();
        let records: Vec<RepositoryRecord> = doc
            .repositories
            .into_iter()
            .filter(|record| {
                if record.name.trim().is_empty() {
                    warn!("dropping repository record without a name");
                    return false;
                }
                if !seen.insert(record.name.clone()) {
                    warn!(name = %record.name, "dropping duplicate repository record");
                    return false;
                }
                true
            })
            .collect();

        let mut widget_ids = HashSet::new();
        let skills: Vec<Skill> = doc
            .skills
            .into_iter()
            .filter(|skill| {
                let keep = widget_ids.insert(ids::skill(&skill.name));
                if !keep {
                    warn!(name = %skill.name, "dropping skill that collides with an earlier one");
                }
                keep
            })
            .collect();

        let mut catalog = Self {
            records,
            stats: doc.stats,
            language_stats: doc.language_stats,
            timeline: doc.timeline,
            skills,
            summary: CatalogSummary::default(),
        };
        catalog.summary = catalog.compute_summary();
        catalog
    }

    /// Load from a source. Any failure is logged and yields an empty catalog;
    /// the caller may call this again to retry.
    pub fn load(source: &CatalogSource, config: &SourceConfig) -> Self {
        match CatalogDocument::fetch(source, config) {
            Ok(doc) => {
                let catalog = Self::from_document(doc);
                info!(
                    source = %source,
                    repos = catalog.len(),
                    stars = catalog.summary.total_stars,
                    "loaded catalog"
                );
                catalog
            }
            Err(e) => {
                warn!(source = %source, error = %e, "catalog load failed, using empty catalog");
                Self::empty()
            }
        }
    }

    pub fn records(&self) -> &[RepositoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&RepositoryRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Records matching the filter, in catalog order.
    pub fn visible(&self, filter: &FilterState) -> Vec<&RepositoryRecord> {
        recompute(&self.records, filter)
    }

    pub fn summary(&self) -> &CatalogSummary {
        &self.summary
    }

    pub fn total_stars(&self) -> u64 {
        self.records.iter().map(|r| r.stars).sum()
    }

    /// Number of distinct language labels among records that name one.
    pub fn distinct_languages(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.has_language())
            .map(|r| r.language())
            .collect::<BTreeSet<_>>()
            .len()
    }

    pub fn stats(&self) -> &ProfileStats {
        &self.stats
    }

    pub fn timeline(&self) -> &[TimelineEntry] {
        &self.timeline
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    /// Language shares from the document, or derived from the records when
    /// the document carries none.
    pub fn language_distribution(&self) -> Vec<LanguageStat> {
        if !self.language_stats.is_empty() {
            return self.language_stats.clone();
        }

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in self.records.iter().filter(|r| r.has_language()) {
            *counts.entry(record.language()).or_default() += 1;
        }
        let total: usize = counts.values().sum();
        if total == 0 {
            return Vec::new();
        }

        let mut stats: Vec<LanguageStat> = counts
            .into_iter()
            .map(|(language, count)| LanguageStat {
                language: language.to_string(),
                percentage: (count as f64 * 1000.0 / total as f64).round() / 10.0,
            })
            .collect();
        stats.sort_by(|a, b| {
            b.percentage
                .total_cmp(&a.percentage)
                .then_with(|| a.language.cmp(&b.language))
        });
        stats
    }

    /// Rounded share of one language, 0 when it does not appear.
    pub fn language_percentage(&self, language: &str) -> u32 {
        self.language_distribution()
            .iter()
            .find(|s| s.language.eq_ignore_ascii_case(language))
            .map(|s| s.percentage.round().max(0.0) as u32)
            .unwrap_or(0)
    }

    /// Trailing activity grid ending at `today`.
    pub fn activity(&self, today: NaiveDate, days: usize) -> ActivityGrid {
        ActivityGrid::build(&self.records, today, days)
    }

    fn compute_summary(&self) -> CatalogSummary {
        CatalogSummary {
            total_repos: self.records.len(),
            total_stars: self.total_stars(),
            total_forks: self.records.iter().map(|r| r.forks).sum(),
            distinct_languages: self.distinct_languages(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DOC: &str = r#"{
        "repositories": [
            {"name": "shortener", "language": "JavaScript", "topics": ["url-shortener"], "stars": 4, "forks": 1},
            {"name": "clipboard-manager", "language": "Python", "stars": 7},
            {"name": "media-organizer", "language": "Python", "stars": null},
            {"name": "notes", "language": null, "stars": 2}
        ],
        "stats": {"totalRepos": 24, "followers": 9, "yearsActive": 7},
        "skills": [{"name": "Python", "level": 90}]
    }"#;

    fn record(name: &str, language: Option<&str>, stars: u64) -> RepositoryRecord {
        RepositoryRecord {
            name: name.into(),
            language: language.map(Into::into),
            stars,
            ..Default::default()
        }
    }

    #[test]
    fn document_with_missing_keys_parses() {
        let doc = CatalogDocument::from_json(r#"{"repositories": [{"name": "a"}]}"#).unwrap();
        assert_eq!(doc.repositories.len(), 1);
        assert_eq!(doc.stats, ProfileStats::default());
        assert!(doc.language_stats.is_empty());

        let empty = CatalogDocument::from_json("{}").unwrap();
        assert!(empty.repositories.is_empty());

        let nulls = CatalogDocument::from_json(r#"{"repositories": null, "stats": null}"#).unwrap();
        assert!(nulls.repositories.is_empty());
    }

    #[test]
    fn nested_nulls_default_to_zero() {
        let doc = CatalogDocument::from_json(
            r#"{
                "stats": {"totalRepos": 3, "followers": null, "yearsActive": null},
                "languageStats": [{"language": "Rust", "percentage": null}],
                "timeline": [{"date": "2024", "title": null}],
                "skills": [{"name": "Rust", "level": null}]
            }"#,
        )
        .unwrap();
        assert_eq!(doc.stats.total_repos, 3);
        assert_eq!(doc.stats.followers, 0);
        assert_eq!(doc.language_stats[0].percentage, 0.0);
        assert_eq!(doc.timeline[0].title, "");
        assert_eq!(doc.skills[0].level, 0.0);
    }

    #[test]
    fn malformed_record_is_skipped_not_fatal() {
        let doc = CatalogDocument::from_json(
            r#"{"repositories": [{"name": "a"}, {"name": "b", "topics": "cli"}, 7, {"name": "c", "stars": 2}]}"#,
        )
        .unwrap();
        let names: Vec<_> = doc.repositories.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn colliding_skills_keep_the_first() {
        let skill = |name: &str, level| Skill {
            name: name.into(),
            level,
        };
        let catalog = Catalog::from_document(CatalogDocument {
            skills: vec![
                skill("UI/UX", 80.0),
                skill("UI UX", 40.0),
                skill("Rust", 70.0),
                skill("Rust", 10.0),
            ],
            ..Default::default()
        });
        let names: Vec<_> = catalog.skills().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["UI/UX", "Rust"]);
    }

    #[test]
    fn aggregates_are_pure_and_repeatable() {
        let catalog = Catalog::from_document(CatalogDocument::from_json(DOC).unwrap());
        assert_eq!(catalog.total_stars(), 13);
        assert_eq!(catalog.total_stars(), catalog.total_stars());
        assert_eq!(catalog.distinct_languages(), 2);
        assert_eq!(catalog.distinct_languages(), catalog.distinct_languages());
        assert_eq!(catalog.summary().total_stars, catalog.total_stars());
        assert_eq!(catalog.summary().total_forks, 1);
        assert_eq!(catalog.stats().followers, 9);
    }

    #[test]
    fn empty_catalog_is_not_an_error() {
        let catalog = Catalog::from_records(vec![]);
        assert!(catalog.is_empty());
        assert_eq!(catalog.total_stars(), 0);
        assert_eq!(catalog.distinct_languages(), 0);
        assert!(catalog.visible(&FilterState::default()).is_empty());
        assert!(catalog.language_distribution().is_empty());
    }

    #[test]
    fn unnamed_and_duplicate_records_are_dropped() {
        let catalog = Catalog::from_records(vec![
            record("a", None, 1),
            record("", None, 5),
            record("a", None, 9),
            record("b", None, 2),
        ]);
        let names: Vec<_> = catalog.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(catalog.total_stars(), 3);
    }

    #[test]
    fn load_missing_file_falls_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let source = CatalogSource::File(dir.path().join("repos.json"));
        let catalog = Catalog::load(&source, &SourceConfig::default());
        assert!(catalog.is_empty());
    }

    #[test]
    fn load_malformed_file_falls_back_to_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let source = CatalogSource::File(file.path().to_path_buf());
        assert!(CatalogDocument::fetch(&source, &SourceConfig::default()).is_err());
        assert!(Catalog::load(&source, &SourceConfig::default()).is_empty());
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", DOC).unwrap();
        let source = CatalogSource::File(file.path().to_path_buf());
        let catalog = Catalog::load(&source, &SourceConfig::default());
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.records()[0].name, "shortener");
        assert_eq!(catalog.skills()[0].name, "Python");
    }

    #[test]
    fn source_parse_distinguishes_urls() {
        assert_eq!(
            CatalogSource::parse("https://example.com/repos.json"),
            CatalogSource::Url("https://example.com/repos.json".into())
        );
        assert_eq!(
            CatalogSource::parse("data/repos.json"),
            CatalogSource::File(PathBuf::from("data/repos.json"))
        );
    }

    #[test]
    fn cache_bust_appends_parameter() {
        assert_eq!(cache_busted("https://x/repos.json", 42), "https://x/repos.json?t=42");
        assert_eq!(cache_busted("https://x/repos.json?v=2", 42), "https://x/repos.json?v=2&t=42");
    }

    #[test]
    fn derived_language_distribution() {
        let catalog = Catalog::from_records(vec![
            record("a", Some("Python"), 0),
            record("b", Some("Python"), 0),
            record("c", Some("Rust"), 0),
            record("d", None, 0),
        ]);
        let dist = catalog.language_distribution();
        assert_eq!(dist.len(), 2);
        assert_eq!(dist[0].language, "Python");
        assert_eq!(dist[0].percentage, 66.7);
        assert_eq!(dist[1].percentage, 33.3);
        assert_eq!(catalog.language_percentage("python"), 67);
        assert_eq!(catalog.language_percentage("Go"), 0);
    }

    #[test]
    fn document_language_stats_take_precedence() {
        let doc = CatalogDocument {
            repositories: vec![record("a", Some("Rust"), 0)],
            language_stats: vec![LanguageStat {
                language: "Python".into(),
                percentage: 72.4,
            }],
            ..Default::default()
        };
        let catalog = Catalog::from_document(doc);
        assert_eq!(catalog.language_percentage("Python"), 72);
        assert_eq!(catalog.language_percentage("Rust"), 0);
    }
}
