//! Configuration primitives and the unified error type shared across the salechart workspace.
#![warn(missing_docs)]

mod config;
mod error;

pub use config::{ChartConfig, DEFAULT_NUM_TICKS, DisplayUnits, MAX_DISPLAY_DECIMALS, PollConfig};
pub use error::ChartError;
