use owo_colors::{OwoColorize, Style};

use folio::config::types::DisplayConfig;
use folio::core::activity::{ActivityGrid, ActivityLevel};
use folio::core::animator::FpsClass;
use folio::core::catalog::{CatalogSummary, LanguageStat, ProfileStats, Skill, TimelineEntry};
use folio::core::theme::Theme;
use folio::core::view::{GridView, ProjectCard, Surface, ids};

const BAR_WIDTH: usize = 20;

/// Terminal styles for the active theme. With colour off every style is a
/// pass-through.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    theme: Theme,
    colored: bool,
}

impl Palette {
    pub fn new(theme: Theme, colored: bool) -> Self {
        Self { theme, colored }
    }

    pub fn plain() -> Self {
        Self::new(Theme::Dark, false)
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.colored {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn accent(&self, text: &str) -> String {
        let style = match self.theme {
            Theme::Dark => Style::new().cyan().bold(),
            Theme::Light => Style::new().blue().bold(),
        };
        self.paint(text, style)
    }

    pub fn strong(&self, text: &str) -> String {
        self.paint(text, Style::new().bold())
    }

    pub fn muted(&self, text: &str) -> String {
        let style = match self.theme {
            Theme::Dark => Style::new().dimmed(),
            Theme::Light => Style::new().bright_black(),
        };
        self.paint(text, style)
    }

    /// Paint with a `#rrggbb` colour, falling back to muted for bad input.
    pub fn hex(&self, text: &str, color: &str) -> String {
        match parse_hex(color) {
            Some((r, g, b)) => self.paint(text, Style::new().truecolor(r, g, b)),
            None => self.muted(text),
        }
    }

    fn level(&self, text: &str, level: ActivityLevel) -> String {
        let style = match level {
            ActivityLevel::Inactive => Style::new().dimmed(),
            ActivityLevel::Active => Style::new().green(),
            ActivityLevel::VeryActive => Style::new().bright_green().bold(),
        };
        self.paint(text, style)
    }

    fn fps(&self, text: &str, class: FpsClass) -> String {
        let style = match class {
            FpsClass::Good => Style::new().green(),
            FpsClass::Fair => Style::new().yellow(),
            FpsClass::Poor => Style::new().red(),
        };
        self.paint(text, style)
    }
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Horizontal bar for a 0–100 percentage.
pub fn bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Render one project card as a short block.
pub fn render_card(card: &ProjectCard, palette: &Palette) -> String {
    let mut lines = Vec::with_capacity(4);
    lines.push(format!(
        "{}  {} {}  ★ {}  ⑂ {}  {}",
        palette.accent(&card.name),
        palette.hex("●", &card.language_color),
        card.language,
        card.stars,
        card.forks,
        palette.muted(&card.updated),
    ));
    lines.push(format!("  {}", card.description));
    if !card.topics.is_empty() {
        let tags: Vec<String> = card.topics.iter().map(|t| format!("#{}", t)).collect();
        lines.push(format!("  {}", palette.muted(&tags.join(" "))));
    }
    if !card.url.is_empty() {
        lines.push(format!(
            "  {}  {}",
            card.url,
            palette.muted(&format!("(edit: {})", card.editor_url))
        ));
    }
    lines.join("\n")
}

pub fn render_grid(grid: &GridView, palette: &Palette) -> String {
    match grid {
        GridView::Empty { title, hint } => {
            format!("{}\n{}", palette.strong(title), palette.muted(hint))
        }
        GridView::NoMatches { filter } => palette.muted(&format!(
            "No projects match category '{}' and search '{}'",
            filter.active_category, filter.search_query
        )),
        GridView::Cards { cards } => cards
            .iter()
            .map(|card| render_card(card, palette))
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

pub fn render_overview(
    summary: &CatalogSummary,
    stats: &ProfileStats,
    highlight: (&str, u32),
    palette: &Palette,
) -> String {
    let row = |label: &str, value: String| format!("  {:<16} {}", label, palette.strong(&value));
    [
        palette.accent("Overview"),
        row("Repositories", stats.total_repos.to_string()),
        row("Years active", stats.years_active.to_string()),
        row(highlight.0, format!("{}%", highlight.1)),
        row("Stars", summary.total_stars.to_string()),
        row("Forks", summary.total_forks.to_string()),
        row("Languages", summary.distinct_languages.to_string()),
        row("Followers", stats.followers.to_string()),
    ]
    .join("\n")
}

pub fn render_languages(langs: &[LanguageStat], display: &DisplayConfig, palette: &Palette) -> String {
    let mut out = vec![palette.accent("Languages")];
    if langs.is_empty() {
        out.push(format!("  {}", palette.muted("none")));
    }
    for stat in langs {
        let color = display
            .language_colors
            .get(&stat.language)
            .unwrap_or(&display.fallback_color);
        out.push(format!(
            "  {:<16} {:>5.1}% {}",
            stat.language,
            stat.percentage,
            palette.hex(&bar(stat.percentage), color)
        ));
    }
    out.join("\n")
}

pub fn render_skills(skills: &[Skill], palette: &Palette) -> String {
    let mut out = vec![palette.accent("Skills")];
    if skills.is_empty() {
        out.push(format!("  {}", palette.muted("none")));
    }
    for skill in skills {
        out.push(format!(
            "  {:<16} {} {:>3.0}%",
            skill.name,
            bar(skill.level),
            skill.level.clamp(0.0, 100.0)
        ));
    }
    out.join("\n")
}

pub fn render_timeline(entries: &[TimelineEntry], palette: &Palette) -> String {
    let mut out = vec![palette.accent("Timeline")];
    if entries.is_empty() {
        out.push(format!("  {}", palette.muted("none")));
    }
    for entry in entries {
        out.push(format!("  {:<10} {}", palette.muted(&entry.date), palette.strong(&entry.title)));
        if !entry.description.is_empty() {
            out.push(format!("  {:<10} {}", "", entry.description));
        }
    }
    out.join("\n")
}

fn level_glyph(level: ActivityLevel) -> &'static str {
    match level {
        ActivityLevel::Inactive => "·",
        ActivityLevel::Active => "▪",
        ActivityLevel::VeryActive => "■",
    }
}

/// Render the activity grid as weekday rows by week columns, oldest left.
pub fn render_activity(grid: &ActivityGrid, palette: &Palette) -> String {
    let days = grid.days();
    let (Some(first), Some(last)) = (days.first(), days.last()) else {
        return palette.muted("No activity window");
    };
    let weeks: Vec<_> = grid.weeks().collect();
    let mut out = vec![format!(
        "{} to {}",
        first.date.format("%b %-d"),
        last.date.format("%b %-d, %Y")
    )];
    for row in 0..7 {
        let cells: Vec<String> = weeks
            .iter()
            .filter_map(|week| week.get(row))
            .map(|day| palette.level(level_glyph(day.level), day.level))
            .collect();
        if !cells.is_empty() {
            out.push(cells.join(" "));
        }
    }
    out.push(format!(
        "{} updates on {} days",
        grid.total_updates(),
        grid.active_days()
    ));
    out.join("\n")
}

/// Final frame of the dashboard, read back from the widget surface.
pub fn render_dashboard(surface: &Surface, highlight: &str, skills: &[Skill], palette: &Palette) -> String {
    let text = |id: &str| surface.text(id).unwrap_or("").to_string();
    let row = |label: &str, value: String| format!("  {:<16} {}", label, palette.strong(&value));
    let mut out = vec![
        palette.accent("Dashboard"),
        row("Repositories", text(ids::STAT_TOTAL_REPOS)),
        row("Years active", text(ids::STAT_YEARS_ACTIVE)),
        row(highlight, format!("{}%", text(ids::STAT_HIGHLIGHT))),
        row("Stars", text(ids::TOTAL_STARS)),
        row("Languages", text(ids::TOTAL_LANGUAGES)),
        row("Followers", text(ids::TOTAL_FOLLOWERS)),
        row("Projects", text(ids::PROJECTS_GRID)),
    ];
    let fps = text(ids::FPS_VALUE);
    let fps = match fps.parse::<u32>() {
        Ok(value) => palette.fps(&fps, FpsClass::from_fps(value)),
        Err(_) => palette.muted(&fps),
    };
    out.push(format!("  {:<16} {}", "FPS", fps));
    for skill in skills {
        let value = text(&ids::skill(&skill.name));
        let percent = value.trim_end_matches('%').parse::<f64>().unwrap_or(0.0);
        out.push(format!("  {:<16} {} {:>4}", skill.name, bar(percent), value));
    }
    out.join("\n")
}

/// One-line live status for the dashboard redraw.
pub fn render_status_line(surface: &Surface, highlight: &str, palette: &Palette) -> String {
    let text = |id: &str| surface.text(id).unwrap_or("").to_string();
    format!(
        "repos {}  years {}  {} {}%  fps {}",
        palette.strong(&text(ids::STAT_TOTAL_REPOS)),
        palette.strong(&text(ids::STAT_YEARS_ACTIVE)),
        highlight,
        palette.strong(&text(ids::STAT_HIGHLIGHT)),
        palette.muted(&text(ids::FPS_VALUE)),
    )
}
