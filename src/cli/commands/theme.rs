use serde_json::json;

use folio::core::theme::{Theme, ThemeStore};

use crate::cli::{OutputFormat, Session};

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ThemeAction {
    #[default]
    Show,
    Toggle,
    Dark,
    Light,
}

#[derive(clap::Args)]
pub struct ThemeArgs {
    #[arg(value_enum, default_value = "show")]
    pub action: ThemeAction,
}

pub fn run(args: ThemeArgs, session: &Session) -> anyhow::Result<()> {
    let store = ThemeStore::open_default();
    let theme = match args.action {
        ThemeAction::Show => store.load(),
        ThemeAction::Toggle => store.toggle()?,
        ThemeAction::Dark => {
            store.save(Theme::Dark)?;
            Theme::Dark
        }
        ThemeAction::Light => {
            store.save(Theme::Light)?;
            Theme::Light
        }
    };

    match session.format {
        OutputFormat::Json => {
            let value = json!({ "theme": theme, "path": store.path() });
            serde_json::to_writer_pretty(std::io::stdout(), &value)?;
            println!();
        }
        _ => println!("{}", theme.as_str()),
    }

    Ok(())
}
