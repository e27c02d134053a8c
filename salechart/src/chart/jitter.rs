use rand::Rng;

use salechart_core::PollConfig;

/// `base_ms` plus a uniform random extra below `jitter_percent` percent of it.
///
/// The extra is always zero when the band rounds down to nothing.
pub fn jitter_wait(base_ms: u64, jitter_percent: u32) -> u64 {
    let band = (base_ms.saturating_mul(u64::from(jitter_percent)) / 100).max(1);
    base_ms.saturating_add(rand::rng().random_range(0..band))
}

/// Delay before the next poll; `None` when polling is off.
pub fn next_poll_delay(poll: Option<PollConfig>) -> Option<std::time::Duration> {
    poll.map(|p| {
        std::time::Duration::from_millis(jitter_wait(
            p.interval_ms,
            u32::from(p.jitter_percent.min(100)),
        ))
    })
}
