use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::repo::RepositoryRecord;

/// The category token that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// Anything the filter engine can test: catalog records, or rendered cards
/// read back through their data attributes.
pub trait Filterable {
    fn filter_name(&self) -> &str;
    fn filter_language(&self) -> &str;
    fn filter_topics(&self) -> Cow<'_, str>;
    fn filter_description(&self) -> &str;
}

impl Filterable for RepositoryRecord {
    fn filter_name(&self) -> &str {
        &self.name
    }

    fn filter_language(&self) -> &str {
        self.language()
    }

    fn filter_topics(&self) -> Cow<'_, str> {
        Cow::Owned(self.topics_joined())
    }

    /// The raw description; the placeholder text is never searchable.
    fn filter_description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

/// User-chosen category and search text. Both tests are AND-combined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub active_category: String,
    pub search_query: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            active_category: ALL_CATEGORIES.into(),
            search_query: String::new(),
        }
    }
}

impl FilterState {
    pub fn new(category: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            active_category: category.into(),
            search_query: query.into(),
        }
    }

    /// Test whether an item matches this filter in-memory.
    pub fn matches<T: Filterable + ?Sized>(&self, item: &T) -> bool {
        self.matches_category(item) && self.matches_search(item)
    }

    /// Category containment against language or joined topics. Containment,
    /// not equality: `"script"` selects `"JavaScript"`.
    pub fn matches_category<T: Filterable + ?Sized>(&self, item: &T) -> bool {
        if self.shows_all_categories() {
            return true;
        }
        let needle = self.active_category.to_lowercase();
        contains_ci(item.filter_language(), &needle) || contains_ci(&item.filter_topics(), &needle)
    }

    /// Free-text match against name, joined topics, or description.
    pub fn matches_search<T: Filterable + ?Sized>(&self, item: &T) -> bool {
        if self.search_query.is_empty() {
            return true;
        }
        let needle = self.search_query.to_lowercase();
        contains_ci(item.filter_name(), &needle)
            || contains_ci(&item.filter_topics(), &needle)
            || contains_ci(item.filter_description(), &needle)
    }

    /// Returns true if neither a category nor a query is set.
    pub fn is_default(&self) -> bool {
        self.shows_all_categories() && self.search_query.is_empty()
    }

    fn shows_all_categories(&self) -> bool {
        self.active_category.eq_ignore_ascii_case(ALL_CATEGORIES)
    }
}

/// Stable filter: the matching subset in input order.
pub fn recompute<'a, T: Filterable>(items: &'a [T], state: &FilterState) -> Vec<&'a T> {
    items.iter().filter(|item| state.matches(*item)).collect()
}

/// `needle` must already be lowercased.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
