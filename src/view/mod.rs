mod html;
mod model;

pub use html::render_page;
pub use model::*;

use crate::analysis::Statistics;

/// Display regions a submission writes into.
///
/// Each `show_*` call makes its region visible; `reset` hides all of them.
pub trait View: Send {
    fn reset(&mut self);

    fn show_original_image(&mut self, data_uri: String);

    fn show_labeled_image(&mut self, data_uri: String);

    fn show_statistics(&mut self, statistics: Statistics);

    fn show_narrative_pending(&mut self);

    fn show_narrative(&mut self, text: String);

    fn show_error(&mut self, message: String);

    fn record_submission(&mut self, summary: SubmissionSummary);
}
