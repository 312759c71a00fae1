use serde::Serialize;

use folio::core::catalog::{CatalogSummary, LanguageStat, ProfileStats, Skill, TimelineEntry};

use crate::cli::{OutputFormat, Session, display};

#[derive(Serialize)]
struct Highlight<'a> {
    language: &'a str,
    percentage: u32,
}

#[derive(Serialize)]
struct StatsReport<'a> {
    summary: &'a CatalogSummary,
    stats: &'a ProfileStats,
    highlight: Highlight<'a>,
    languages: Vec<LanguageStat>,
    skills: &'a [Skill],
    timeline: &'a [TimelineEntry],
}

pub fn run(session: &Session) -> anyhow::Result<()> {
    let catalog = session.load_catalog();
    let display_cfg = &session.config.display;
    let language = display_cfg.highlight_language.as_str();
    let report = StatsReport {
        summary: catalog.summary(),
        stats: catalog.stats(),
        highlight: Highlight {
            language,
            percentage: catalog.language_percentage(language),
        },
        languages: catalog.language_distribution(),
        skills: catalog.skills(),
        timeline: catalog.timeline(),
    };

    match session.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(std::io::stdout(), &report)?;
            println!();
        }
        _ => {
            let palette = &session.palette;
            let sections = [
                display::render_overview(
                    report.summary,
                    report.stats,
                    (language, report.highlight.percentage),
                    palette,
                ),
                display::render_languages(&report.languages, display_cfg, palette),
                display::render_skills(report.skills, palette),
                display::render_timeline(report.timeline, palette),
            ];
            println!("{}", sections.join("\n\n"));
        }
    }

    Ok(())
}
