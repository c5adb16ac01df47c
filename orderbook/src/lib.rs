//! Order book replay engine with target-size valuation.
//!
//! Core features:
//! - Price-time ordered bid/ask sides (best price first, then FIFO)
//! - Add and reduce-by-id, with reduce searching bids before asks
//! - After every mutation, the cost of buying or proceeds of selling a
//!   fixed target size against the opposite resting liquidity
//! - Quotes emitted only on relevant availability transitions
//!
//! The two sides never trade against each other.

pub mod types;

pub use types::{
    format_ticks, parse_ticks, Amount, Direction, OrderId, Price, Qty, Quote, QuoteValue, Side,
    Tick, PRICE_SCALE,
};
pub mod price_levels;
pub use price_levels::PriceLevels;

use tracing::{debug, warn};

/// Order book valuing a fixed target size after each change.
///
/// Each direction is either available (the consumed side tracks at least
/// `target_size` lots) or unavailable. A quote is emitted whenever the
/// direction is available after a change, and once more, as
/// [`QuoteValue::Unavailable`], when it stops being available.
///
/// Not thread-safe - wrap in a lock for concurrent access.
pub struct OrderBook {
    target_size: Qty,
    /// Buy interest, highest price first
    bids: PriceLevels,
    /// Sell interest, lowest price first
    asks: PriceLevels,
    /// Last emitted sell valuation
    last_sell: QuoteValue,
    /// Last emitted buy valuation
    last_buy: QuoteValue,
}

impl OrderBook {
    /// Creates an empty book valuing `target_size` lots.
    ///
    /// # Panics
    /// If `target_size` is not positive.
    pub fn new(target_size: Qty) -> Self {
        assert!(target_size > 0, "target size must be positive");
        Self {
            target_size,
            bids: PriceLevels::new(Side::Bid),
            asks: PriceLevels::new(Side::Ask),
            last_sell: QuoteValue::Unavailable,
            last_buy: QuoteValue::Unavailable,
        }
    }

    pub fn target_size(&self) -> Qty {
        self.target_size
    }

    pub fn bids(&self) -> &PriceLevels {
        &self.bids
    }

    pub fn asks(&self) -> &PriceLevels {
        &self.asks
    }

    pub fn side(&self, side: Side) -> &PriceLevels {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut PriceLevels {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }

    /// Resting quantity on one side.
    pub fn total_qty(&self, side: Side) -> Qty {
        self.side(side).total_qty()
    }

    /// Returns current best bid price (highest buy price).
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best_price()
    }

    /// Returns current best ask price (lowest sell price).
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best_price()
    }

    /// The last valuation emitted for a direction.
    pub fn last_quote(&self, direction: Direction) -> QuoteValue {
        match direction {
            Direction::Sell => self.last_sell,
            Direction::Buy => self.last_buy,
        }
    }

    /// Rests a tick on one side and re-values the direction consuming it.
    ///
    /// Ids are not checked for uniqueness. Ticks with a non-positive size
    /// are dropped without touching the book.
    pub fn add_order(&mut self, side: Side, tick: Tick) -> Option<Quote> {
        if tick.qty <= 0 {
            warn!(order_id = %tick.id, qty = tick.qty, "ignoring add with non-positive size");
            return None;
        }

        let ts = tick.ts.clone();
        debug!(?side, order_id = %tick.id, px_ticks = tick.px_ticks, qty = tick.qty, "add");
        self.side_mut(side).push(tick);
        self.revalue(side.valued_by(), ts)
    }

    /// Takes `qty` lots off the resting order `id`, bids searched first.
    ///
    /// The side total drops by the requested `qty`, floored at zero.
    /// Unknown ids and non-positive quantities leave the book untouched
    /// and never emit.
    pub fn reduce_order(&mut self, ts: &str, id: &OrderId, qty: Qty) -> Option<Quote> {
        if qty <= 0 {
            warn!(order_id = %id, qty, "ignoring reduce with non-positive size");
            return None;
        }

        let side = [Side::Bid, Side::Ask]
            .into_iter()
            .find(|&side| self.side_mut(side).reduce(id, qty).is_some());

        match side {
            Some(side) => {
                debug!(?side, order_id = %id, qty, "reduce");
                self.revalue(side.valued_by(), ts.to_string())
            }
            None => {
                debug!(order_id = %id, "reduce for unknown order id");
                None
            }
        }
    }

    /// Recomputes one direction and decides whether it is worth a quote.
    ///
    /// A fillable target always quotes. A zero amount quotes as
    /// unavailable and, like an unfillable target, arms no later
    /// unavailable quote.
    fn revalue(&mut self, direction: Direction, timestamp: String) -> Option<Quote> {
        let fill = self.side(direction.consumes()).fill_cost(self.target_size);
        let value = match fill {
            Some(amount) if amount > 0 => QuoteValue::Amount(amount),
            _ => QuoteValue::Unavailable,
        };

        let last = match direction {
            Direction::Sell => &mut self.last_sell,
            Direction::Buy => &mut self.last_buy,
        };
        let emit = fill.is_some() || last.amount().is_some();
        *last = value;

        emit.then(|| Quote {
            timestamp,
            direction,
            value,
        })
    }
}
