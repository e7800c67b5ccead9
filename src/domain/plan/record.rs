//! Plan records and extraction candidates

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A structured plan extracted from captured text.
/// Created at extraction success, handed off by value, never retained
/// by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRecord {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub details: String,
}

/// A raw plan candidate as returned by the extraction service, before
/// field validation. All fields are optional; a candidate becomes a
/// `PlanRecord` only if it validates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanCandidate {
    pub title: Option<String>,
    pub location: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub details: Option<String>,
}

impl PlanCandidate {
    /// Validate this candidate into a `PlanRecord`.
    ///
    /// Required: a non-empty title and parseable start/end timestamps.
    /// Invalid candidates yield `None` and are skipped; they never
    /// abort the batch they arrived in.
    pub fn validate(self) -> Option<PlanRecord> {
        let title = self.title.map(|t| t.trim().to_string())?;
        if title.is_empty() {
            return None;
        }

        let start_time = parse_timestamp(self.start_time.as_deref()?)?;
        let end_time = parse_timestamp(self.end_time.as_deref()?)?;

        Some(PlanRecord {
            id: Uuid::new_v4(),
            title,
            location: self.location.unwrap_or_default(),
            start_time,
            end_time,
            details: self.details.unwrap_or_default(),
        })
    }
}

/// Parse a service timestamp. The service localizes times using the
/// request timezone, so values are naive local datetimes; RFC 3339
/// offsets are accepted and stripped.
fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }

    const FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Validate a batch of candidates, silently dropping invalid entries.
pub fn validate_candidates(candidates: Vec<PlanCandidate>) -> Vec<PlanRecord> {
    candidates
        .into_iter()
        .filter_map(PlanCandidate::validate)
        .collect()
}
