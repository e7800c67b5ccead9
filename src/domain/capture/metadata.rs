//! Persisted capture metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::plan::PlanRecord;

/// Metadata saved beside a capture image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureMetadata {
    pub id: Uuid,
    pub title: String,
    pub timestamp: DateTime<Utc>,
    pub extracted_text: String,
    pub plans: Vec<PlanRecord>,
}

impl CaptureMetadata {
    /// Create metadata for a fresh capture, titled after the first plan
    /// when one exists.
    pub fn new(extracted_text: String, plans: Vec<PlanRecord>) -> Self {
        let title = plans
            .first()
            .map(|p| p.title.clone())
            .unwrap_or_else(|| "Capture".to_string());

        Self {
            id: Uuid::new_v4(),
            title,
            timestamp: Utc::now(),
            extracted_text,
            plans,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn plan(title: &str) -> PlanRecord {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        PlanRecord {
            id: Uuid::new_v4(),
            title: title.to_string(),
            location: String::new(),
            start_time: start,
            end_time: start,
            details: String::new(),
        }
    }

    #[test]
    fn titled_after_first_plan() {
        let metadata = CaptureMetadata::new("text".into(), vec![plan("Lunch"), plan("Dinner")]);
        assert_eq!(metadata.title, "Lunch");
    }

    #[test]
    fn default_title_without_plans() {
        let metadata = CaptureMetadata::new("text".into(), vec![]);
        assert_eq!(metadata.title, "Capture");
    }

    #[test]
    fn serde_round_trip() {
        let metadata = CaptureMetadata::new("some text".into(), vec![plan("Lunch")]);
        let json = serde_json::to_string(&metadata).unwrap();
        let back: CaptureMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, metadata);
    }
}
