//! Feed driver for the target-size pricer.
//!
//! Decodes feed lines, applies them to an [`orderbook::OrderBook`] and
//! renders the quotes it emits.

pub mod feed;
pub mod output;
pub mod replay;

pub use feed::{FeedError, FeedEvent};
pub use output::{write_quote, Format};
pub use replay::{open_input, replay, ReplayStats};
