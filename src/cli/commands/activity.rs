use chrono::{Local, NaiveDate};

use crate::cli::{OutputFormat, Session, display};

#[derive(clap::Args)]
pub struct ActivityArgs {
    /// Number of trailing days to show (defaults to config)
    #[arg(long)]
    pub days: Option<usize>,

    /// Last day of the window, as YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

pub fn run(args: ActivityArgs, session: &Session) -> anyhow::Result<()> {
    let catalog = session.load_catalog();
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let days = args.days.unwrap_or(session.config.activity.days);
    let grid = catalog.activity(today, days);

    match session.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(std::io::stdout(), &grid)?;
            println!();
        }
        _ => {
            println!("{}", display::render_activity(&grid, &session.palette));
        }
    }

    Ok(())
}
