//! Domain types for the ledger

pub mod action;
pub mod candle;
pub mod event;
pub mod trade;

pub use action::{Action, Side};
pub use candle::{parse_timestamp, Candle};
pub use event::Event;
pub use trade::TradePair;
