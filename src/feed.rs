//! Decoding of feed lines into book events.
//!
//! Fields are separated by whitespace:
//! - `<ts> A <order-id> <B|S> <price> <size>`
//! - `<ts> R <order-id> <size>`
//!
//! Fields past the expected ones are ignored.

use orderbook::{parse_ticks, OrderBook, OrderId, Qty, Quote, Side, Tick};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeedError {
    #[error("expected at least 3 fields, found {0}")]
    TooFewFields(usize),
    #[error("unknown message type `{0}`")]
    UnknownMessageType(String),
    #[error("missing {0} field")]
    MissingField(&'static str),
    #[error("invalid side `{0}`, expected B or S")]
    InvalidSide(String),
    #[error("invalid price `{0}`")]
    InvalidPrice(String),
    #[error("invalid quantity `{0}`")]
    InvalidQuantity(String),
}

/// One decoded feed message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedEvent {
    Add { side: Side, tick: Tick },
    Reduce { ts: String, id: OrderId, qty: Qty },
}

impl FeedEvent {
    /// Applies the event to the book, returning the quote it triggers.
    pub fn apply_to(self, book: &mut OrderBook) -> Option<Quote> {
        match self {
            FeedEvent::Add { side, tick } => book.add_order(side, tick),
            FeedEvent::Reduce { ts, id, qty } => book.reduce_order(&ts, &id, qty),
        }
    }
}

fn parse_side(s: &str) -> Result<Side, FeedError> {
    match s {
        "B" => Ok(Side::Bid),
        "S" => Ok(Side::Ask),
        _ => Err(FeedError::InvalidSide(s.to_string())),
    }
}

fn parse_qty(s: &str) -> Result<Qty, FeedError> {
    match s.parse::<Qty>() {
        Ok(qty) if qty > 0 => Ok(qty),
        _ => Err(FeedError::InvalidQuantity(s.to_string())),
    }
}

impl FromStr for FeedEvent {
    type Err = FeedError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            return Err(FeedError::TooFewFields(fields.len()));
        }
        let (ts, message, id) = (fields[0], fields[1], fields[2]);
        let field = |i: usize, name: &'static str| {
            fields.get(i).copied().ok_or(FeedError::MissingField(name))
        };

        match message {
            "A" => {
                let side = parse_side(field(3, "side")?)?;
                let price = field(4, "price")?;
                let px_ticks =
                    parse_ticks(price).ok_or_else(|| FeedError::InvalidPrice(price.to_string()))?;
                let qty = parse_qty(field(5, "size")?)?;
                Ok(FeedEvent::Add {
                    side,
                    tick: Tick::new(ts, id, px_ticks, qty),
                })
            }
            "R" => Ok(FeedEvent::Reduce {
                ts: ts.to_string(),
                id: id.into(),
                qty: parse_qty(field(3, "size")?)?,
            }),
            other => Err(FeedError::UnknownMessageType(other.to_string())),
        }
    }
}
