use crate::types::{Amount, OrderId, Price, Qty, Side, Tick};
use std::collections::{BTreeMap, HashMap, VecDeque};

// Structured price levels based, FIFO tracking with BTreeMap
// side determines which end of the map is the best
// - Asks: lowest price is best (front of map)
// - Bids: highest price is best (back of map)
pub struct PriceLevels {
    /// Bid or ask?
    side: Side,
    /// price ticks mapped to the resting ticks at that price, arrival order
    levels: BTreeMap<Price, VecDeque<Tick>>,
    /// order id -> how many ticks with that id rest at each price
    index: HashMap<OrderId, BTreeMap<Price, usize>>,
    /// number of resting ticks
    ticks: usize,
    /// running total: sizes added minus sizes requested by reduces, floored at 0.
    /// Never above the resting sum.
    total_qty: Qty,
}

impl PriceLevels {
    /// Creates empty price levels for given side
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
            index: HashMap::new(),
            ticks: 0,
            total_qty: 0,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Adds a tick at its price level behind everything already there.
    /// Ids are not checked for uniqueness.
    pub fn push(&mut self, tick: Tick) {
        self.total_qty = self.total_qty.saturating_add(tick.qty);
        self.ticks += 1;
        *self
            .index
            .entry(tick.id.clone())
            .or_default()
            .entry(tick.px_ticks)
            .or_insert(0) += 1;
        self.levels
            .entry(tick.px_ticks)
            .or_default()
            .push_back(tick);
    }

    /// Takes `qty` off the tick with this id.
    ///
    /// With a repeated id the lowest-priced, earliest tick is hit first.
    /// A tick whose remaining size is `<= qty` leaves the book entirely,
    /// otherwise it shrinks in place and keeps its queue position.
    /// The running total drops by the full requested `qty`, floored at
    /// zero, even when the tick held less.
    /// Returns None if the id is not resting on this side.
    pub fn reduce(&mut self, id: &OrderId, qty: Qty) -> Option<()> {
        let locations = self.index.get_mut(id)?;
        let px = *locations.keys().next()?;
        let queue = self.levels.get_mut(&px)?;
        let pos = queue.iter().position(|t| &t.id == id)?;

        if queue[pos].qty <= qty {
            queue.remove(pos);
            self.ticks -= 1;
            if let Some(count) = locations.get_mut(&px) {
                *count -= 1;
                if *count == 0 {
                    locations.remove(&px);
                }
            }
            if locations.is_empty() {
                self.index.remove(id);
            }
        } else {
            queue[pos].qty -= qty;
        }

        if queue.is_empty() {
            // drop empty levels so best_price stays exact
            self.levels.remove(&px);
        }
        self.total_qty = self.total_qty.saturating_sub(qty).max(0);
        Some(())
    }

    /// Tracked quantity on this side, see [`PriceLevels::reduce`].
    pub fn total_qty(&self) -> Qty {
        self.total_qty
    }

    /// Number of resting ticks.
    pub fn len(&self) -> usize {
        self.ticks
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of distinct prices.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Looks up a resting tick by id, lowest price first for repeated ids.
    pub fn get(&self, id: &OrderId) -> Option<&Tick> {
        let px = self.index.get(id)?.keys().next()?;
        self.levels.get(px)?.iter().find(|t| &t.id == id)
    }

    /// Returns the best price for the side without removing anything
    /// For asks: the lowest price (whatever is first in the BTree)
    /// For bids: the highest price (whatever is last in the BTree)
    /// Returns None if no price levels currently exist
    pub fn best_price(&self) -> Option<Price> {
        match self.side {
            Side::Ask => self.levels.first_key_value().map(|(px, _)| *px),
            Side::Bid => self.levels.last_key_value().map(|(px, _)| *px),
        }
    }

    /// Every resting tick, best price first, FIFO within a price.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &Tick> + '_> {
        match self.side {
            Side::Ask => Box::new(self.levels.values().flatten()),
            Side::Bid => Box::new(self.levels.values().rev().flatten()),
        }
    }

    /// Total of size * price for taking `target` lots off this side,
    /// best prices first. None if the tracked total is below `target`.
    /// The amount saturates at `Amount::MAX`.
    pub fn fill_cost(&self, target: Qty) -> Option<Amount> {
        if self.total_qty < target {
            return None;
        }

        let mut needed = target;
        let mut amount: Amount = 0;
        for tick in self.iter() {
            let take = needed.min(tick.qty);
            amount = amount.saturating_add(take.saturating_mul(tick.px_ticks));
            needed -= take;
            if needed == 0 {
                break;
            }
        }
        Some(amount)
    }
}
