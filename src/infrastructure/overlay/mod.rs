//! Region selection adapters.

pub mod slurp;

pub use slurp::SlurpOverlay;
