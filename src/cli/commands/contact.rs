use std::io::Write;

use serde_json::json;

use folio::core::app::App;
use folio::core::catalog::Catalog;
use folio::core::contact::ContactMessage;
use folio::core::view::ids;

use crate::cli::live::{Pace, drive};
use crate::cli::output::output_frame;
use crate::cli::{OutputFormat, Session};

#[derive(clap::Args)]
pub struct ContactArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub message: String,

    /// Run on simulated time instead of sleeping
    #[arg(long)]
    pub instant: bool,
}

pub fn run(args: ContactArgs, session: &Session) -> anyhow::Result<()> {
    let mut app = App::new(session.config.clone(), Catalog::empty());
    app.submit_contact(ContactMessage {
        name: args.name,
        email: args.email,
        message: args.message,
    })?;

    let mut out = std::io::stdout();
    let mut last = String::new();
    drive(&mut app, Pace::from_flag(args.instant), |app| {
        let label = app.surface().text(ids::CONTACT_BUTTON).unwrap_or("");
        if label != last {
            last = label.to_string();
            match session.format {
                OutputFormat::Json => output_frame(&json!({ "at": app.now(), "button": label }), &mut out)?,
                _ => writeln!(out, "{}", session.palette.strong(label))?,
            }
        }
        Ok(app.contact_pending())
    })?;
    Ok(())
}
