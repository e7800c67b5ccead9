//! Plan records extracted from captured text.

pub mod record;

pub use record::{validate_candidates, PlanCandidate, PlanRecord};
