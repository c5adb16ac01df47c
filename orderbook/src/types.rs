// Prices are integer ticks of one hundredth of the currency unit.
// Sizes are integer lots. Amounts are size * price, also in ticks.
use serde::{Serialize, Serializer};
use std::fmt;

pub type Price = i64;
pub type Qty = i64;
pub type Amount = i64;

/// Ticks per currency unit.
pub const PRICE_SCALE: i64 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    Bid,
    Ask,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct OrderId(pub String);

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        OrderId(s.to_string())
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        OrderId(s)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A resting order. Only `qty` changes after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Tick {
    pub ts: String, // opaque feed timestamp
    pub id: OrderId,
    pub px_ticks: Price,
    pub qty: Qty,
}

impl Tick {
    pub fn new(ts: impl Into<String>, id: impl Into<OrderId>, px_ticks: Price, qty: Qty) -> Self {
        Self {
            ts: ts.into(),
            id: id.into(),
            px_ticks,
            qty,
        }
    }
}

/// Which hypothetical execution a quote values.
/// `Sell` consumes bids, `Buy` consumes asks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Sell,
    Buy,
}

impl Direction {
    /// The book side this direction executes against.
    pub fn consumes(self) -> Side {
        match self {
            Direction::Sell => Side::Bid,
            Direction::Buy => Side::Ask,
        }
    }

    /// Feed code for the direction: `S` or `B`.
    pub fn code(self) -> &'static str {
        match self {
            Direction::Sell => "S",
            Direction::Buy => "B",
        }
    }
}

impl Side {
    /// The valuation affected by liquidity changes on this side.
    pub fn valued_by(self) -> Direction {
        match self {
            Side::Bid => Direction::Sell,
            Side::Ask => Direction::Buy,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuoteValue {
    /// Total for the target size, in ticks.
    Amount(Amount),
    /// Target size cannot be filled from the resting side, or fills for nothing.
    Unavailable,
}

impl QuoteValue {
    pub fn amount(self) -> Option<Amount> {
        match self {
            QuoteValue::Amount(a) => Some(a),
            QuoteValue::Unavailable => None,
        }
    }
}

// "NA" for unavailable, else the amount with two decimals
impl fmt::Display for QuoteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteValue::Amount(a) => f.write_str(&format_ticks(*a)),
            QuoteValue::Unavailable => f.write_str("NA"),
        }
    }
}

// JSON form: decimal string, or null when unavailable
impl Serialize for QuoteValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            QuoteValue::Amount(a) => serializer.serialize_str(&format_ticks(*a)),
            QuoteValue::Unavailable => serializer.serialize_none(),
        }
    }
}

/// One emission of the book.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub timestamp: String,
    pub direction: Direction,
    #[serde(rename = "amount")]
    pub value: QuoteValue,
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.timestamp, self.direction, self.value)
    }
}

/// Renders a tick amount with exactly two decimals, e.g. `123456` -> `1234.56`.
pub fn format_ticks(ticks: i64) -> String {
    let sign = if ticks < 0 { "-" } else { "" };
    let abs = ticks.unsigned_abs();
    let scale = PRICE_SCALE as u64;
    format!("{}{}.{:02}", sign, abs / scale, abs % scale)
}

/// Parses an unsigned decimal with at most two fractional digits into ticks.
/// `"44.1"` -> `4410`, `"7"` -> `700`, `".5"` -> `50`.
pub fn parse_ticks(s: &str) -> Option<Price> {
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if frac_part.len() > 2 {
        return None;
    }
    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }

    let whole: i64 = if int_part.is_empty() { 0 } else { int_part.parse().ok()? };
    let mut frac: i64 = if frac_part.is_empty() { 0 } else { frac_part.parse().ok()? };
    if frac_part.len() == 1 {
        frac *= 10;
    }
    whole.checked_mul(PRICE_SCALE)?.checked_add(frac)
}
