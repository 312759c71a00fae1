use std::collections::HashMap;

use tracing::{debug, info};

use super::animator::{Animator, Bound, FpsSampler, Tween, Typewriter, TypewriterTiming};
use super::catalog::{Catalog, CatalogSource};
use super::contact::{ContactMessage, FormPhase, Submission};
use super::filter::FilterState;
use super::repo::RepositoryRecord;
use super::scheduler::{Millis, Scheduler, TaskId};
use super::view::{GridView, Surface, ids, render_grid};
use crate::config::types::FolioConfig;
use crate::error::{FolioError, Result};

/// The application context. Owns every piece of runtime state and hands
/// each subsystem only the part it needs: the filter engine sees the catalog
/// and the filter state, animators see the widget surface.
pub struct App {
    config: FolioConfig,
    catalog: Catalog,
    filter: FilterState,
    surface: Surface,
    scheduler: Scheduler<Surface>,
    tweens: Vec<TaskId>,
    contact: Option<TaskId>,
    /// Tasks writing into each widget, cancelled when the widget goes away.
    bindings: HashMap<String, Vec<TaskId>>,
}

impl App {
    pub fn new(config: FolioConfig, catalog: Catalog) -> Self {
        Self {
            config,
            catalog,
            filter: FilterState::default(),
            surface: Surface::new(),
            scheduler: Scheduler::new(),
            tweens: Vec::new(),
            contact: None,
            bindings: HashMap::new(),
        }
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    /// Mount the standard widgets and start the page: overview numbers are
    /// written once, counters start now, skill bars after the reveal delay,
    /// and the typewriter and FPS sampler run until their widgets go away.
    pub fn start(&mut self) {
        for id in [
            ids::TYPING_TEXT,
            ids::FPS_VALUE,
            ids::PROJECTS_GRID,
            ids::CONTACT_BUTTON,
            ids::STAT_TOTAL_REPOS,
            ids::STAT_YEARS_ACTIVE,
            ids::STAT_HIGHLIGHT,
            ids::TOTAL_STARS,
            ids::TOTAL_LANGUAGES,
            ids::TOTAL_FOLLOWERS,
        ] {
            self.surface.mount(id);
        }
        let skill_ids: Vec<String> = self
            .catalog
            .skills()
            .iter()
            .map(|s| ids::skill(&s.name))
            .collect();
        for id in &skill_ids {
            self.surface.mount(id);
        }
        self.surface
            .set_text(ids::CONTACT_BUTTON, FormPhase::Idle.label());

        self.write_overview();
        self.start_typewriter();
        self.start_fps();
        self.reveal_counters();
        self.reveal_skills(self.config.tween.reveal_delay_ms);
    }

    /// Replace the catalog, e.g. after a manual refresh. Filter state is kept.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.write_overview();
    }

    /// Load the catalog again from a source. One attempt; failure leaves an
    /// empty catalog, exactly like the first load.
    pub fn reload(&mut self, source: &CatalogSource) {
        let catalog = Catalog::load(source, &self.config.source);
        self.replace_catalog(catalog);
    }

    pub fn set_category(&mut self, category: impl Into<String>) -> Vec<&RepositoryRecord> {
        self.filter.active_category = category.into();
        debug!(category = %self.filter.active_category, "category changed");
        self.visible()
    }

    pub fn set_query(&mut self, query: impl Into<String>) -> Vec<&RepositoryRecord> {
        self.filter.search_query = query.into();
        debug!(query = %self.filter.search_query, "search changed");
        self.visible()
    }

    pub fn visible(&self) -> Vec<&RepositoryRecord> {
        self.catalog.visible(&self.filter)
    }

    pub fn grid(&self) -> GridView {
        render_grid(&self.catalog, &self.filter, &self.config.display)
    }

    pub fn start_typewriter(&mut self) -> Option<TaskId> {
        if !self.surface.is_mounted(ids::TYPING_TEXT) {
            return None;
        }
        let typewriter = Typewriter::new(
            self.config.hero.phrases.clone(),
            TypewriterTiming::from(&self.config.hero),
        );
        Some(self.spawn_bound(typewriter, ids::TYPING_TEXT, 0))
    }

    pub fn start_fps(&mut self) -> Option<TaskId> {
        if !self.surface.is_mounted(ids::FPS_VALUE) {
            return None;
        }
        let sampler = FpsSampler::new(self.config.fps.frame_ms);
        Some(self.spawn_bound(sampler, ids::FPS_VALUE, 0))
    }

    /// Start a reveal tween on a widget the first time it becomes visible.
    /// Returns false if the widget is missing or was already revealed.
    pub fn reveal(&mut self, id: &str, tween: Tween, delay: Millis) -> bool {
        let Some(widget) = self.surface.widget_mut(id) else {
            return false;
        };
        if widget.triggered {
            return false;
        }
        widget.triggered = true;
        let task = self.spawn_bound(tween, id, delay);
        self.tweens.push(task);
        true
    }

    /// Start the three stat counters. The third shows the rounded share of
    /// the configured highlight language.
    pub fn reveal_counters(&mut self) -> usize {
        let stats = self.catalog.stats().clone();
        let highlight = self
            .catalog
            .language_percentage(&self.config.display.highlight_language);
        let cfg = self.config.tween.clone();
        [
            (ids::STAT_TOTAL_REPOS, clamp_u32(stats.total_repos)),
            (ids::STAT_YEARS_ACTIVE, clamp_u32(stats.years_active)),
            (ids::STAT_HIGHLIGHT, highlight),
        ]
        .into_iter()
        .filter(|(id, target)| self.reveal(id, Tween::counter(*target, &cfg), 0))
        .count()
    }

    pub fn reveal_skills(&mut self, delay: Millis) -> usize {
        let skills = self.catalog.skills().to_vec();
        let cfg = self.config.tween.clone();
        skills
            .iter()
            .filter(|skill| self.reveal(&ids::skill(&skill.name), Tween::skill_bar(skill.level, &cfg), delay))
            .count()
    }

    /// True while any reveal tween is still animating.
    pub fn tweens_running(&self) -> bool {
        self.tweens.iter().any(|id| self.scheduler.is_live(*id))
    }

    /// Submit the contact form. Rejected while a previous submission is
    /// still cycling through its phases.
    pub fn submit_contact(&mut self, message: ContactMessage) -> Result<TaskId> {
        if self.contact_pending() {
            return Err(FolioError::FormBusy);
        }
        let submission = Submission::new(message, &self.config.contact)?;
        self.surface.mount(ids::CONTACT_BUTTON);
        let task = self.spawn_bound(submission, ids::CONTACT_BUTTON, 0);
        self.contact = Some(task);
        Ok(task)
    }

    pub fn contact_pending(&self) -> bool {
        self.contact.is_some_and(|id| self.scheduler.is_live(id))
    }

    /// Remove a widget and cancel every task bound to it.
    pub fn remove_widget(&mut self, id: &str) -> bool {
        for task in self.bindings.remove(id).unwrap_or_default() {
            self.scheduler.cancel(task);
        }
        self.surface.unmount(id)
    }

    fn spawn_bound<A: Animator + 'static>(&mut self, animator: A, id: &str, delay: Millis) -> TaskId {
        let task = self.scheduler.spawn(Box::new(Bound::new(animator, id)), delay);
        let scheduler = &self.scheduler;
        let tasks = self.bindings.entry(id.to_string()).or_default();
        tasks.retain(|t| scheduler.is_live(*t));
        tasks.push(task);
        task
    }

    /// Run everything due at or before `now`.
    pub fn advance(&mut self, now: Millis) -> usize {
        self.scheduler.advance(now, &mut self.surface)
    }

    pub fn next_fire(&mut self) -> Option<Millis> {
        self.scheduler.next_fire()
    }

    pub fn now(&self) -> Millis {
        self.scheduler.now()
    }

    pub fn cancel(&mut self, task: TaskId) -> bool {
        self.scheduler.cancel(task)
    }

    fn write_overview(&mut self) {
        let summary = self.catalog.summary().clone();
        let followers = self.catalog.stats().followers;
        self.surface
            .set_text(ids::TOTAL_STARS, summary.total_stars.to_string());
        self.surface
            .set_text(ids::TOTAL_LANGUAGES, summary.distinct_languages.to_string());
        self.surface
            .set_text(ids::TOTAL_FOLLOWERS, followers.to_string());
        let grid_label = match self.grid() {
            GridView::Empty { title, .. } => title,
            GridView::NoMatches { .. } => "no matches".to_string(),
            GridView::Cards { cards } => format!("{} projects", cards.len()),
        };
        self.surface.set_text(ids::PROJECTS_GRID, grid_label);
        info!(
            repos = summary.total_repos,
            stars = summary.total_stars,
            languages = summary.distinct_languages,
            "overview updated"
        );
    }
}

fn clamp_u32(n: u64) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
