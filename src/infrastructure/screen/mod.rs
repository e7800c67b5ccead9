//! Screen bounds lookup adapters.

pub mod sway;

pub use sway::SwayScreenLookup;
