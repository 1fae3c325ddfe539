//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time/ticks (fixed-period scheduling with pause/resume)

pub mod time;

pub use time::TickTimer;
