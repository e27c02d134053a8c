//! Configuration types shared by the resampler and the refresh orchestrator.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ChartError;

/// Number of uniform intervals per sampling domain used by default.
pub const DEFAULT_NUM_TICKS: u32 = 200;

/// Largest decimal shift supported when converting base units to display units.
pub const MAX_DISPLAY_DECIMALS: u32 = 28;

/// Conversion from base units (e.g. wei) to the numbers handed to a plotter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayUnits {
    /// Decimal places between base units and display units (18 for wei → ether).
    pub decimals: u32,
    /// Round the display target to a whole number (half away from zero).
    pub round_target: bool,
}

impl Default for DisplayUnits {
    fn default() -> Self {
        Self {
            decimals: 18,
            round_target: true,
        }
    }
}

/// Optional periodic refresh in addition to externally supplied triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    /// Base delay between polls in milliseconds.
    pub interval_ms: u64,
    /// Random jitter percentage [0, 100] added to each delay.
    pub jitter_percent: u8,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: 15_000,
            jitter_percent: 10,
        }
    }
}

/// Global configuration for a `SaleChart` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Uniform intervals per domain in the dual-domain resampler.
    pub num_ticks: u32,
    /// Display-unit conversion applied to published datasets.
    pub display: DisplayUnits,
    /// Timeout for individual connector calls.
    pub provider_timeout: Duration,
    /// Optional polling timer used by the refresher task.
    pub poll: Option<PollConfig>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            num_ticks: DEFAULT_NUM_TICKS,
            display: DisplayUnits::default(),
            provider_timeout: Duration::from_secs(5),
            poll: None,
        }
    }
}

impl ChartConfig {
    /// Check value ranges that the resampler and formatter rely on.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `num_ticks` is zero, when `display.decimals`
    /// exceeds [`MAX_DISPLAY_DECIMALS`], when the provider timeout is zero, or
    /// when the poll jitter is above 100 percent or its interval is zero.
    pub fn validate(&self) -> Result<(), ChartError> {
        if self.num_ticks == 0 {
            return Err(ChartError::InvalidArg("num_ticks must be positive".into()));
        }
        if self.display.decimals > MAX_DISPLAY_DECIMALS {
            return Err(ChartError::InvalidArg(format!(
                "display decimals {} exceed maximum {MAX_DISPLAY_DECIMALS}",
                self.display.decimals
            )));
        }
        if self.provider_timeout.is_zero() {
            return Err(ChartError::InvalidArg(
                "provider_timeout must be non-zero".into(),
            ));
        }
        if let Some(poll) = &self.poll {
            if poll.interval_ms == 0 {
                return Err(ChartError::InvalidArg(
                    "poll interval must be non-zero".into(),
                ));
            }
            if poll.jitter_percent > 100 {
                return Err(ChartError::InvalidArg(format!(
                    "poll jitter {}% is above 100%",
                    poll.jitter_percent
                )));
            }
        }
        Ok(())
    }
}
