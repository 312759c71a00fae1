pub mod commands;
pub mod display;
pub mod live;
pub mod output;

use std::time::Duration;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use folio::config::types::FolioConfig;
use folio::core::catalog::{Catalog, CatalogSource};
use folio::core::theme::ThemeStore;
use display::Palette;

/// Environment variable holding a tracing filter, e.g. `folio=debug`.
pub const LOG_ENV: &str = "FOLIO_LOG";

#[derive(Parser)]
#[command(name = "folio", about = "Your repos, on display.", version)]
pub struct Cli {
    /// Catalog document: a path or an http(s) URL (defaults to config)
    #[arg(long, global = true)]
    pub source: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List projects, filtered by category and search text
    Projects(commands::projects::ProjectsArgs),
    /// Show catalog totals, languages, skills and timeline
    Stats,
    /// Show the update activity grid
    Activity(commands::activity::ActivityArgs),
    /// Run the hero typewriter
    Hero(commands::hero::HeroArgs),
    /// Animate stat counters, skill bars and the fps meter
    Dashboard(commands::dashboard::DashboardArgs),
    /// Show or change the persisted theme
    Theme(commands::theme::ThemeArgs),
    /// Send a message through the (simulated) contact form
    Contact(commands::contact::ContactArgs),
    /// Show current configuration
    Config,
    /// Print the JSON schema of the catalog document
    Schema,
}

#[derive(Debug, Clone, Copy, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Names,
}

/// Shared state resolved once per invocation.
pub struct Session {
    pub config: FolioConfig,
    pub source: CatalogSource,
    pub format: OutputFormat,
    pub palette: Palette,
}

impl Session {
    pub fn new(cli: &Cli) -> anyhow::Result<Self> {
        let config = folio::config::load_config()?;
        let location = cli
            .source
            .clone()
            .unwrap_or_else(|| config.source.location.clone());
        let colored = !cli.no_color && std::env::var_os("NO_COLOR").is_none();
        let theme = ThemeStore::open_default().load();
        Ok(Self {
            source: CatalogSource::parse(&location),
            palette: Palette::new(theme, colored),
            format: cli.format,
            config,
        })
    }

    /// Load the catalog behind a spinner. Never fails: a bad source yields
    /// an empty catalog.
    pub fn load_catalog(&self) -> Catalog {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(format!("loading {}", self.source));
        spinner.enable_steady_tick(Duration::from_millis(80));
        let catalog = Catalog::load(&self.source, &self.config.source);
        spinner.finish_and_clear();
        catalog
    }
}

/// Install the stderr subscriber. `FOLIO_LOG` wins over `--verbose`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Dispatch a CLI command.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let session = Session::new(&cli)?;
    match cli.command {
        Some(Commands::Projects(args)) => commands::projects::run(args, &session),
        Some(Commands::Stats) => commands::stats::run(&session),
        Some(Commands::Activity(args)) => commands::activity::run(args, &session),
        Some(Commands::Hero(args)) => commands::hero::run(args, &session),
        Some(Commands::Dashboard(args)) => commands::dashboard::run(args, &session),
        Some(Commands::Theme(args)) => commands::theme::run(args, &session),
        Some(Commands::Contact(args)) => commands::contact::run(args, &session),
        Some(Commands::Config) => commands::config::run(&session),
        Some(Commands::Schema) => commands::schema::run(),
        None => {
            // No subcommand: print help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}
