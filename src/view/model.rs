use super::View;
use crate::analysis::Statistics;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Placeholder shown while the narrative request is in flight.
pub const NARRATIVE_PENDING: &str = "AI is thinking...";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "text", rename_all = "snake_case")]
pub enum Narrative {
    Pending,
    Ready(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionSummary {
    pub token: u64,
    pub source: String,
    pub succeeded: bool,
    pub completed_at: DateTime<Utc>,
}

/// Page state shared by every request. `None` means the region is hidden.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewModel {
    pub original_image: Option<String>,
    pub labeled_image: Option<String>,
    pub statistics: Option<Statistics>,
    pub narrative: Option<Narrative>,
    pub error: Option<String>,
    pub last_submission: Option<SubmissionSummary>,
}

impl View for ViewModel {
    fn reset(&mut self) {
        let last_submission = self.last_submission.take();
        *self = Self {
            last_submission,
            ..Self::default()
        };
    }

    fn show_original_image(&mut self, data_uri: String) {
        self.original_image = Some(data_uri);
    }

    fn show_labeled_image(&mut self, data_uri: String) {
        self.labeled_image = Some(data_uri);
    }

    fn show_statistics(&mut self, statistics: Statistics) {
        self.statistics = Some(statistics);
    }

    fn show_narrative_pending(&mut self) {
        self.narrative = Some(Narrative::Pending);
    }

    fn show_narrative(&mut self, text: String) {
        self.narrative = Some(Narrative::Ready(text));
    }

    fn show_error(&mut self, message: String) {
        // A failed narrative call must not leave the placeholder behind.
        if self.narrative == Some(Narrative::Pending) {
            self.narrative = None;
        }
        self.error = Some(message);
    }

    fn record_submission(&mut self, summary: SubmissionSummary) {
        self.last_submission = Some(summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stats() -> Statistics {
        Statistics {
            people: 4,
            chairs: 6,
            chairs_taken: 3,
            empty_chairs: 3,
            min_occupancy: 50.0,
            max_occupancy: 66.67,
        }
    }

    #[test]
    fn test_error_keeps_rendered_statistics() {
        let mut view = ViewModel::default();
        view.show_statistics(stats());
        view.show_narrative_pending();

        view.show_error("Error: Narrative API Error: 500".to_string());

        assert_eq!(view.statistics, Some(stats()));
        assert_eq!(view.narrative, None);
        assert_eq!(
            view.error.as_deref(),
            Some("Error: Narrative API Error: 500")
        );
    }

    #[test]
    fn test_error_keeps_finished_narrative() {
        let mut view = ViewModel::default();
        view.show_narrative("Plenty of space near the window.".to_string());
        view.show_error("Error: late failure".to_string());

        assert_eq!(
            view.narrative,
            Some(Narrative::Ready("Plenty of space near the window.".to_string()))
        );
    }

    #[test]
    fn test_reset_hides_regions_but_keeps_history() {
        let mut view = ViewModel::default();
        view.show_statistics(stats());
        view.show_error("Error: boom".to_string());
        view.record_submission(SubmissionSummary {
            token: 1,
            source: "upload hall.jpg".to_string(),
            succeeded: false,
            completed_at: Utc::now(),
        });

        view.reset();

        assert_eq!(view.statistics, None);
        assert_eq!(view.error, None);
        assert_eq!(view.last_submission.map(|s| s.token), Some(1));
    }

    #[test]
    fn test_narrative_serializes_with_state_tag() {
        let json = serde_json::to_value(Narrative::Ready("Few seats.".to_string())).unwrap();
        assert_eq!(json, serde_json::json!({"state": "ready", "text": "Few seats."}));

        let json = serde_json::to_value(Narrative::Pending).unwrap();
        assert_eq!(json, serde_json::json!({"state": "pending"}));
    }
}
