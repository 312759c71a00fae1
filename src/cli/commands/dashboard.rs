use std::collections::BTreeMap;
use std::io::Write;

use folio::core::app::App;
use folio::core::view::ids;

use crate::cli::live::{Pace, drive};
use crate::cli::{OutputFormat, Session, display};

#[derive(clap::Args)]
pub struct DashboardArgs {
    /// Run on simulated time and print only the final frame
    #[arg(long)]
    pub instant: bool,
}

pub fn run(args: DashboardArgs, session: &Session) -> anyhow::Result<()> {
    let mut app = App::new(session.config.clone(), session.load_catalog());
    app.start();
    app.remove_widget(ids::TYPING_TEXT);

    let pace = Pace::from_flag(args.instant);
    let redraw = pace == Pace::Real && session.format == OutputFormat::Human;
    let highlight = session.config.display.highlight_language.clone();
    let mut out = std::io::stdout();
    let mut last = String::new();
    drive(&mut app, pace, |app| {
        if redraw {
            let line = display::render_status_line(app.surface(), &highlight, &session.palette);
            if line != last {
                write!(out, "\r\x1b[2K{}", line)?;
                out.flush()?;
                last = line;
            }
        }
        Ok(app.tweens_running())
    })?;
    if redraw {
        writeln!(out)?;
    }

    match session.format {
        OutputFormat::Json => {
            let widgets: BTreeMap<&str, &str> = app
                .surface()
                .ids()
                .filter_map(|id| app.surface().text(id).map(|text| (id, text)))
                .collect();
            serde_json::to_writer_pretty(&mut out, &widgets)?;
            writeln!(out)?;
        }
        _ => {
            writeln!(
                out,
                "{}",
                display::render_dashboard(app.surface(), &highlight, app.catalog().skills(), &session.palette)
            )?;
        }
    }
    Ok(())
}
