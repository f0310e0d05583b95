use super::test_utils::analysis_result;
use async_trait::async_trait;
use occupancy_front::{
    Error, Result,
    analysis::{AnalysisResult, AnalysisService, ImagePayload, NarrativeResult},
    gallery::{AssetFetcher, FetchedAsset},
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Mock analysis service keyed by payload filename
#[derive(Default)]
pub struct MockAnalysisService {
    analyses: Mutex<HashMap<String, AnalysisResult>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    analysis_failures: HashMap<String, u16>,
    calls: Mutex<Vec<String>>,
    analysis_status: Option<u16>,
    narrative_status: Option<u16>,
}

impl MockAnalysisService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_analysis(self, filename: &str, result: AnalysisResult) -> Self {
        self.analyses
            .lock()
            .unwrap()
            .insert(filename.to_string(), result);
        self
    }

    pub fn failing_analysis(mut self, status: u16) -> Self {
        self.analysis_status = Some(status);
        self
    }

    /// Fails `analyze` with `status` for one filename only
    pub fn failing_analysis_for(mut self, filename: &str, status: u16) -> Self {
        self.analysis_failures.insert(filename.to_string(), status);
        self
    }

    pub fn failing_narrative(mut self, status: u16) -> Self {
        self.narrative_status = Some(status);
        self
    }

    /// Holds `analyze` for `filename` until the returned handle is notified
    pub fn gate(&self, filename: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(filename.to_string(), Arc::clone(&gate));
        gate
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn narrative_for(filename: &str) -> String {
        format!("Narrative for {}", filename)
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl AnalysisService for MockAnalysisService {
    async fn analyze(&self, payload: &ImagePayload) -> Result<AnalysisResult> {
        self.record(format!("analyze:{}", payload.filename));

        let gate = self.gates.lock().unwrap().get(&payload.filename).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let failure = self
            .analysis_failures
            .get(&payload.filename)
            .copied()
            .or(self.analysis_status);
        if let Some(status) = failure {
            return Err(Error::Analysis { status });
        }

        let result = self.analyses.lock().unwrap().get(&payload.filename).cloned();
        Ok(result.unwrap_or_else(|| analysis_result(3)))
    }

    async fn narrate(&self, payload: &ImagePayload) -> Result<NarrativeResult> {
        self.record(format!("narrate:{}", payload.filename));

        if let Some(status) = self.narrative_status {
            return Err(Error::Narrative { status });
        }

        Ok(NarrativeResult {
            narrative: Self::narrative_for(&payload.filename),
        })
    }
}

/// Mock gallery fetcher serving assets from memory
#[derive(Default)]
pub struct MockAssetFetcher {
    assets: HashMap<String, Vec<u8>>,
    fetched: Mutex<Vec<String>>,
}

impl MockAssetFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset(mut self, src: &str, bytes: &[u8]) -> Self {
        self.assets.insert(src.to_string(), bytes.to_vec());
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssetFetcher for MockAssetFetcher {
    async fn fetch(&self, src: &str) -> Result<FetchedAsset> {
        self.fetched.lock().unwrap().push(src.to_string());

        match self.assets.get(src) {
            Some(bytes) => Ok(FetchedAsset {
                content_type: Some("image/jpeg".to_string()),
                bytes: bytes.clone(),
            }),
            None => Err(Error::AssetFetch { status: 404 }),
        }
    }
}
