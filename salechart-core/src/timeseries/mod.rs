//! Time-series utilities behind the sale chart.
//!
//! Modules include:
//! - `lookup`: backward-fill lookup over raised observations
//! - `resample`: dual-domain resampling, trailing anchor and merge
//! - `format`: base-unit to display-unit conversion
/// Display-unit formatting of chart points.
pub mod format;
/// Backward-fill lookup over a sparse raised series.
pub mod lookup;
/// Dual-domain resampler producing the merged chart dataset.
pub mod resample;
/// Millisecond helpers shared by curves and the resampler.
pub mod util;
