use std::io::Write;

use serde_json::json;

use folio::core::app::App;
use folio::core::catalog::Catalog;
use folio::core::view::ids;

use crate::cli::live::{Pace, drive};
use crate::cli::output::output_frame;
use crate::cli::{OutputFormat, Session};

#[derive(clap::Args)]
pub struct HeroArgs {
    /// Stop after this many phrases have been typed and erased (0 runs forever)
    #[arg(long, default_value_t = 1)]
    pub cycles: usize,

    /// Run on simulated time instead of sleeping
    #[arg(long)]
    pub instant: bool,
}

pub fn run(args: HeroArgs, session: &Session) -> anyhow::Result<()> {
    let mut app = App::new(session.config.clone(), Catalog::empty());
    app.surface_mut().mount(ids::TYPING_TEXT);
    app.start_typewriter();

    let mut out = std::io::stdout();
    let mut last = String::new();
    let mut completed = 0;
    drive(&mut app, Pace::from_flag(args.instant), |app| {
        let text = app.surface().text(ids::TYPING_TEXT).unwrap_or("");
        if text == last {
            return Ok(true);
        }
        if text.is_empty() {
            completed += 1;
        }
        last = text.to_string();
        match session.format {
            OutputFormat::Json => output_frame(&json!({ "at": app.now(), "text": text }), &mut out)?,
            _ => {
                write!(out, "\r\x1b[2K{} {}", session.palette.accent(">"), text)?;
                out.flush()?;
            }
        }
        Ok(args.cycles == 0 || completed < args.cycles)
    })?;

    if session.format != OutputFormat::Json {
        writeln!(out)?;
    }
    Ok(())
}
