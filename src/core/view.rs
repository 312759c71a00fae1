use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Serialize;

use super::catalog::Catalog;
use super::filter::{FilterState, Filterable};
use super::repo::RepositoryRecord;
use crate::config::types::DisplayConfig;

/// Well-known widget ids.
pub mod ids {
    pub const TYPING_TEXT: &str = "typing-text";
    pub const FPS_VALUE: &str = "fps-value";
    pub const PROJECTS_GRID: &str = "projects-grid";
    pub const CONTACT_BUTTON: &str = "contact-button";
    pub const STAT_TOTAL_REPOS: &str = "stat-total-repos";
    pub const STAT_YEARS_ACTIVE: &str = "stat-years-active";
    pub const STAT_HIGHLIGHT: &str = "stat-highlight";
    pub const TOTAL_STARS: &str = "total-stars";
    pub const TOTAL_LANGUAGES: &str = "total-languages";
    pub const TOTAL_FOLLOWERS: &str = "total-followers";

    /// Widget id of the skill bar for a named skill.
    pub fn skill(name: &str) -> String {
        let slug: String = name
            .chars()
            .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
            .collect();
        format!("skill-{}", slug)
    }
}

pub const EMPTY_TITLE: &str = "No Repositories Found";
pub const EMPTY_HINT: &str = "The catalog is empty or could not be loaded. Regenerate repos.json and try again.";

/// One named display slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Widget {
    pub text: String,
    /// Set once a reveal animation has been started for this widget.
    pub triggered: bool,
}

/// The set of mounted widgets. Lookups return `None` for anything not
/// mounted, and every feature treats that as a normal branch.
#[derive(Debug, Clone, Default)]
pub struct Surface {
    widgets: BTreeMap<String, Widget>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a widget, keeping its state if it already exists.
    pub fn mount(&mut self, id: &str) -> &mut Widget {
        self.widgets.entry(id.to_string()).or_default()
    }

    pub fn unmount(&mut self, id: &str) -> bool {
        self.widgets.remove(id).is_some()
    }

    pub fn is_mounted(&self, id: &str) -> bool {
        self.widgets.contains_key(id)
    }

    pub fn widget(&self, id: &str) -> Option<&Widget> {
        self.widgets.get(id)
    }

    pub fn widget_mut(&mut self, id: &str) -> Option<&mut Widget> {
        self.widgets.get_mut(id)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.widgets.get(id).map(|w| w.text.as_str())
    }

    /// Returns false when the widget is not mounted.
    pub fn set_text(&mut self, id: &str, text: impl Into<String>) -> bool {
        match self.widgets.get_mut(id) {
            Some(widget) => {
                widget.text = text.into();
                true
            }
            None => false,
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.widgets.keys().map(String::as_str)
    }
}

/// A rendered project card. The `data_*` attributes are lowercased copies
/// the filter engine can read back without the source record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectCard {
    pub name: String,
    pub language: String,
    pub language_color: String,
    pub description: String,
    pub topics: Vec<String>,
    pub stars: u64,
    pub forks: u64,
    pub updated: String,
    pub url: String,
    pub editor_url: String,
    #[serde(skip)]
    pub data_name: String,
    #[serde(skip)]
    pub data_language: String,
    #[serde(skip)]
    pub data_topics: String,
    #[serde(skip)]
    pub data_description: String,
}

impl ProjectCard {
    pub fn from_record(record: &RepositoryRecord, display: &DisplayConfig) -> Self {
        Self {
            name: record.name.clone(),
            language: record.language().to_string(),
            language_color: record.language_color(display).to_string(),
            description: record.description().to_string(),
            topics: record.topics.clone(),
            stars: record.stars,
            forks: record.forks,
            updated: record.updated_display(),
            url: record.url.clone(),
            editor_url: record.editor_url(display),
            data_name: record.name.to_lowercase(),
            data_language: record.language().to_lowercase(),
            data_topics: record.topics_joined().to_lowercase(),
            data_description: record.filter_description().to_lowercase(),
        }
    }
}

impl Filterable for ProjectCard {
    fn filter_name(&self) -> &str {
        &self.data_name
    }

    fn filter_language(&self) -> &str {
        &self.data_language
    }

    fn filter_topics(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.data_topics)
    }

    fn filter_description(&self) -> &str {
        &self.data_description
    }
}

/// What the projects grid shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum GridView {
    /// The catalog itself has no records.
    Empty { title: String, hint: String },
    /// Records exist but the filter hides all of them.
    NoMatches { filter: FilterState },
    Cards { cards: Vec<ProjectCard> },
}

impl GridView {
    pub fn cards(&self) -> &[ProjectCard] {
        match self {
            GridView::Cards { cards } => cards,
            _ => &[],
        }
    }
}

/// Map the visible subset of the catalog onto the grid.
pub fn render_grid(catalog: &Catalog, filter: &FilterState, display: &DisplayConfig) -> GridView {
    if catalog.is_empty() {
        return GridView::Empty {
            title: EMPTY_TITLE.into(),
            hint: EMPTY_HINT.into(),
        };
    }
    let cards: Vec<ProjectCard> = catalog
        .visible(filter)
        .into_iter()
        .map(|record| ProjectCard::from_record(record, display))
        .collect();
    if cards.is_empty() {
        GridView::NoMatches {
            filter: filter.clone(),
        }
    } else {
        GridView::Cards { cards }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::recompute;

    fn records() -> Vec<RepositoryRecord> {
        vec![
            RepositoryRecord {
                name: "Shortener".into(),
                language: Some("JavaScript".into()),
                topics: vec!["url-shortener".into()],
                url: "https://github.com/octo/shortener".into(),
                ..Default::default()
            },
            RepositoryRecord {
                name: "rpg".into(),
                language: Some("Python".into()),
                description: Some("Random password generator".into()),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn empty_catalog_renders_placeholder() {
        let grid = render_grid(&Catalog::empty(), &FilterState::default(), &DisplayConfig::default());
        match &grid {
            GridView::Empty { title, .. } => assert_eq!(title, EMPTY_TITLE),
            other => panic!("expected placeholder, got {:?}", other),
        }
        assert!(grid.cards().is_empty());
    }

    #[test]
    fn filter_hiding_everything_is_distinct_from_empty() {
        let catalog = Catalog::from_records(records());
        let filter = FilterState::new("rust", "");
        let grid = render_grid(&catalog, &filter, &DisplayConfig::default());
        assert_eq!(grid, GridView::NoMatches { filter });
    }

    #[test]
    fn cards_carry_defaults_and_links() {
        let catalog = Catalog::from_records(records());
        let grid = render_grid(&catalog, &FilterState::default(), &DisplayConfig::default());
        let cards = grid.cards();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].editor_url, "https://github.dev/octo/shortener");
        assert_eq!(cards[0].description, "No description available");
        assert_eq!(cards[0].data_name, "shortener");
        assert_eq!(cards[1].language_color, "#3776ab");
    }

    #[test]
    fn rendered_cards_refilter_like_records() {
        let display = DisplayConfig::default();
        let recs = records();
        let cards: Vec<ProjectCard> = recs.iter().map(|r| ProjectCard::from_record(r, &display)).collect();
        for filter in [
            FilterState::new("script", ""),
            FilterState::new("all", "SHORT"),
            FilterState::new("all", "password"),
            FilterState::new("python", "available"),
        ] {
            let from_records: Vec<_> = recompute(&recs, &filter).iter().map(|r| r.name.clone()).collect();
            let from_cards: Vec<_> = recompute(&cards, &filter).iter().map(|c| c.name.clone()).collect();
            assert_eq!(from_records, from_cards, "filter {:?}", filter);
        }
    }

    #[test]
    fn surface_lookups_are_optional() {
        let mut surface = Surface::new();
        assert!(!surface.set_text(ids::TYPING_TEXT, "hi"));
        surface.mount(ids::TYPING_TEXT);
        assert!(surface.set_text(ids::TYPING_TEXT, "hi"));
        assert_eq!(surface.text(ids::TYPING_TEXT), Some("hi"));
        assert!(surface.unmount(ids::TYPING_TEXT));
        assert_eq!(surface.text(ids::TYPING_TEXT), None);
    }

    #[test]
    fn skill_ids_are_slugs() {
        assert_eq!(ids::skill("C++ / Qt"), "skill-c-----qt");
        assert_eq!(ids::skill("Python"), "skill-python");
    }
}
