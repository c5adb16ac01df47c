//! Drives a feed through an order book and writes the resulting quotes.

use crate::feed::{FeedError, FeedEvent};
use crate::output::{write_quote, Format};
use anyhow::{Context, Result};
use orderbook::OrderBook;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Counters for one replay run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReplayStats {
    pub lines: u64,
    pub adds: u64,
    pub reduces: u64,
    /// Blank, malformed or unrecognised lines
    pub ignored: u64,
    pub quotes: u64,
}

/// Opens the feed, `-` meaning standard input.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path)
        .with_context(|| format!("can't open input file {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Applies every line of `input` to `book` in order, writing each quote to `out`.
///
/// Lines that do not decode are logged and skipped. Read and write
/// failures abort the run.
pub fn replay<R: BufRead, W: Write>(
    book: &mut OrderBook,
    input: R,
    out: &mut W,
    format: Format,
) -> Result<ReplayStats> {
    let mut stats = ReplayStats::default();

    for (n, line) in input.lines().enumerate() {
        let line_no = n + 1;
        let line = line.with_context(|| format!("reading input line {line_no}"))?;
        stats.lines += 1;

        if line.trim().is_empty() {
            stats.ignored += 1;
            continue;
        }

        let event = match line.parse::<FeedEvent>() {
            Ok(event) => event,
            Err(e @ FeedError::UnknownMessageType(_)) => {
                debug!(line = line_no, error = %e, "skipping line");
                stats.ignored += 1;
                continue;
            }
            Err(e) => {
                warn!(line = line_no, error = %e, "skipping malformed line");
                stats.ignored += 1;
                continue;
            }
        };

        match event {
            FeedEvent::Add { .. } => stats.adds += 1,
            FeedEvent::Reduce { .. } => stats.reduces += 1,
        }

        if let Some(quote) = event.apply_to(book) {
            write_quote(out, &quote, format).context("writing quote")?;
            stats.quotes += 1;
        }
    }

    out.flush().context("flushing output")?;
    Ok(stats)
}
