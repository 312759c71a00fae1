use std::io::Write;

use folio::core::view::GridView;
use crate::cli::OutputFormat;
use crate::cli::display::{self, Palette};

/// Write the projects grid in the requested output format.
pub fn output_grid(
    grid: &GridView,
    format: OutputFormat,
    palette: &Palette,
    writer: &mut dyn Write,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, grid)?;
            writeln!(writer)?;
        }
        OutputFormat::Names => {
            for card in grid.cards() {
                writeln!(writer, "{}", card.name)?;
            }
        }
        OutputFormat::Human => {
            writeln!(writer, "{}", display::render_grid(grid, palette))?;
        }
    }
    Ok(())
}

/// Write one JSON value per line, for streaming animation frames.
pub fn output_frame<T: serde::Serialize>(value: &T, writer: &mut dyn Write) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}
