pub mod gate;
pub mod jitter;
pub mod refresh;
pub mod refresher;
