//! Pricer
//!
//! Replays an order book feed and, whenever the book can (or just stopped
//! being able to) fill the target size, prints what buying or selling it
//! right now would cost or bring in.

use anyhow::Result;
use clap::Parser;
use orderbook::OrderBook;
use pricer::{open_input, replay, Format};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pricer")]
#[command(about = "Prices a fixed target size against a replayed order book feed")]
struct Cli {
    /// Quantity to value on every book change
    #[arg(value_parser = clap::value_parser!(i64).range(1..))]
    target_size: i64,
    /// Feed file, `-` for standard input
    #[arg(default_value = "pricer.in")]
    input: PathBuf,
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let input = open_input(&cli.input)?;
    info!(target_size = cli.target_size, input = %cli.input.display(), "replaying feed");

    let mut book = OrderBook::new(cli.target_size);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let stats = replay(&mut book, input, &mut out, cli.format)?;

    info!(
        lines = stats.lines,
        adds = stats.adds,
        reduces = stats.reduces,
        ignored = stats.ignored,
        quotes = stats.quotes,
        "replay finished"
    );
    info!(
        bid_orders = book.bids().len(),
        bid_levels = book.bids().level_count(),
        ask_orders = book.asks().len(),
        ask_levels = book.asks().level_count(),
        "final book"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn input_defaults_to_pricer_in() {
        let cli = Cli::try_parse_from(["pricer", "200"]).unwrap();
        assert_eq!(cli.target_size, 200);
        assert_eq!(cli.input, PathBuf::from("pricer.in"));
        assert_eq!(cli.format, Format::Text);
    }

    #[test]
    fn target_size_required_and_positive() {
        assert!(Cli::try_parse_from(["pricer"]).is_err());
        assert!(Cli::try_parse_from(["pricer", "0"]).is_err());
        assert!(Cli::try_parse_from(["pricer", "abc"]).is_err());
    }

    #[test]
    fn json_format_and_path() {
        let cli = Cli::try_parse_from(["pricer", "1", "feed.txt", "--format", "json"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("feed.txt"));
        assert_eq!(cli.format, Format::Json);
    }
}
