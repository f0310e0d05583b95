use super::payload::{ImageSource, build_payload};
use crate::{
    Error, Result,
    analysis::{AnalysisService, data_uri, jpeg_data_uri},
    gallery::AssetFetcher,
    view::{SubmissionSummary, View},
};
use chrono::Utc;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

/// Runs submissions against the remote service and writes the outcome into a
/// shared view. Only the most recent submission may touch the view.
pub struct SubmissionController<V: View> {
    service: Arc<dyn AnalysisService>,
    fetcher: Arc<dyn AssetFetcher>,
    view: Arc<Mutex<V>>,
    latest: AtomicU64,
}

impl<V: View> SubmissionController<V> {
    pub fn new(
        service: Arc<dyn AnalysisService>,
        fetcher: Arc<dyn AssetFetcher>,
        view: Arc<Mutex<V>>,
    ) -> Self {
        Self {
            service,
            fetcher,
            view,
            latest: AtomicU64::new(0),
        }
    }

    pub fn view(&self) -> Arc<Mutex<V>> {
        Arc::clone(&self.view)
    }

    /// Token of the newest submission, 0 before the first one.
    pub fn latest_token(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Analyzes one image and renders the result. Failures end up in the
    /// view's error region; nothing is returned to the caller.
    pub async fn submit(&self, source: ImageSource) {
        let token = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let label = source.to_string();
        info!("Submission #{} started ({})", token, label);

        let outcome = self.run(token, source).await;
        let succeeded = outcome.is_ok();

        let rendered = match outcome {
            Ok(()) => Ok(()),
            Err(Error::Superseded { latest, .. }) => {
                debug!("Submission #{} dropped, #{} is newer", token, latest);
                return;
            }
            Err(e) => {
                error!("Submission #{} failed: {}", token, e);
                let message = e.user_message();
                self.render(token, move |view| view.show_error(message))
                    .await
            }
        };

        let summary = SubmissionSummary {
            token,
            source: label,
            succeeded,
            completed_at: Utc::now(),
        };
        if rendered.is_ok()
            && self
                .render(token, move |view| view.record_submission(summary))
                .await
                .is_ok()
        {
            info!("Submission #{} finished (succeeded: {})", token, succeeded);
        }
    }

    async fn run(&self, token: u64, source: ImageSource) -> Result<()> {
        self.render(token, |view| view.reset()).await?;

        let payload = build_payload(source, self.fetcher.as_ref()).await?;
        let original = data_uri(&payload.content_type, &payload.bytes);
        self.render(token, move |view| view.show_original_image(original))
            .await?;

        let analysis = self.service.analyze(&payload).await?;
        let labeled = jpeg_data_uri(&analysis.labeled_image);
        let statistics = analysis.statistics;
        self.render(token, move |view| {
            view.show_labeled_image(labeled);
            view.show_statistics(statistics);
            view.show_narrative_pending();
        })
        .await?;

        let narrative = self.service.narrate(&payload).await?;
        self.render(token, move |view| view.show_narrative(narrative.narrative))
            .await
    }

    fn ensure_latest(&self, token: u64) -> Result<()> {
        let latest = self.latest.load(Ordering::SeqCst);
        if token == latest {
            Ok(())
        } else {
            Err(Error::Superseded { token, latest })
        }
    }

    /// Applies `update` only while `token` is still the newest submission.
    /// The check happens under the view lock so a newer submission cannot
    /// slip in between.
    async fn render<F>(&self, token: u64, update: F) -> Result<()>
    where
        F: FnOnce(&mut V) + Send,
    {
        let mut view = self.view.lock().await;
        self.ensure_latest(token)?;
        update(&mut *view);
        Ok(())
    }
}
