//! Auth wire types and the backend implementations behind them.

pub mod api;
pub mod types;
