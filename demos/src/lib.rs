//! Shared setup for the salechart demos.

pub mod common;
