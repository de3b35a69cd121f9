//! Platform abstraction layer
//!
//! Turns raw keyboard codes and touch gestures into simulation input. The
//! browser or window layer owns a single `IntentState` for the whole session
//! and feeds it from its event listeners.

pub mod input;

pub use input::{Intent, IntentState, SwipeTracker};
