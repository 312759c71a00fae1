use crate::cli::{OutputFormat, Session};

pub fn run(session: &Session) -> anyhow::Result<()> {
    let cfg = &session.config;

    match session.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(std::io::stdout(), cfg)?;
            println!();
        }
        _ => {
            // Human-readable: just use TOML format
            let toml_str = toml::to_string_pretty(cfg)?;
            println!("{}", toml_str);
        }
    }

    Ok(())
}
