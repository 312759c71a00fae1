use folio::core::app::App;
use folio::core::filter::ALL_CATEGORIES;

use crate::cli::Session;
use crate::cli::output::output_grid;

#[derive(clap::Args)]
pub struct ProjectsArgs {
    /// Category: a language or topic fragment, or "all"
    #[arg(long, default_value = ALL_CATEGORIES)]
    pub category: String,

    /// Case-insensitive search over name, topics and description
    #[arg(long, default_value = "")]
    pub search: String,
}

pub fn run(args: ProjectsArgs, session: &Session) -> anyhow::Result<()> {
    let mut app = App::new(session.config.clone(), session.load_catalog());
    app.set_category(args.category);
    app.set_query(args.search);

    let grid = app.grid();
    output_grid(&grid, session.format, &session.palette, &mut std::io::stdout())
}
