//! Rendering of quotes for the console.

use anyhow::Result;
use orderbook::Quote;
use std::io::Write;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// `<ts> <S|B> <amount|NA>`
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Writes one quote as a single line.
pub fn write_quote<W: Write>(out: &mut W, quote: &Quote, format: Format) -> Result<()> {
    match format {
        Format::Text => writeln!(out, "{quote}")?,
        Format::Json => {
            serde_json::to_writer(&mut *out, quote)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
