//! Hand-rolled collaborators for pipeline-level tests.
//!
//! Unlike the mockall doubles used in unit tests, these fakes honor the
//! filesystem contract of the real adapters: the fetcher writes bytes to its
//! destination path and the encoder creates its output file, so the
//! orchestrator's own `tokio::fs` reads work against them.

use async_trait::async_trait;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::reels::application::domain::entities::{Celebrity, Reel, ReelStatus};
use crate::reels::application::ports::outgoing::{
    ArtifactFetcher, CompletionRequest, EncodeError, EncodeJob, FetchError, ImageGenerationError,
    ImageGenerator, NewCelebrity, NewReel, ObjectStore, ObjectStoreError, ReelRepository,
    RepositoryError, SpeechError, SpeechSynthesizer, StockPhotoError, StockPhotoFinder,
    TextGenerationError, TextGenerator, VideoEncoder,
};

fn now() -> chrono::DateTime<chrono::FixedOffset> {
    chrono::Utc::now().fixed_offset()
}

// ============================================================================
// Text generation
// ============================================================================

/// Answers script requests and image-prompt requests with canned text,
/// telling them apart by their token budgets.
#[derive(Clone)]
pub struct ScriptedTextGenerator {
    script_completion: String,
    prompt_completion: String,
    pub requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedTextGenerator {
    pub fn new(script_completion: &str, prompt_completion: &str) -> Self {
        Self {
            script_completion: script_completion.to_string(),
            prompt_completion: prompt_completion.to_string(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn prompt_request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.max_tokens == 250)
            .count()
    }
}

#[async_trait]
impl TextGenerator for ScriptedTextGenerator {
    async fn complete(&self, request: CompletionRequest) -> Result<String, TextGenerationError> {
        let completion = if request.max_tokens == 250 {
            self.prompt_completion.clone()
        } else {
            self.script_completion.clone()
        };
        self.requests.lock().unwrap().push(request);
        Ok(completion)
    }
}

// ============================================================================
// Speech
// ============================================================================

#[derive(Clone)]
pub struct FakeSpeechSynthesizer {
    audio: Vec<u8>,
    pub calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl FakeSpeechSynthesizer {
    pub fn new(audio: &[u8]) -> Self {
        Self {
            audio: audio.to_vec(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for FakeSpeechSynthesizer {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, SpeechError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), voice.to_string()));
        Ok(self.audio.clone())
    }
}

// ============================================================================
// Image sourcing collaborators
// ============================================================================

#[derive(Clone)]
pub struct FakeStockPhotoFinder {
    fail: bool,
    pub queries: Arc<Mutex<Vec<String>>>,
}

impl FakeStockPhotoFinder {
    pub fn working() -> Self {
        Self {
            fail: false,
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl StockPhotoFinder for FakeStockPhotoFinder {
    async fn find(&self, query: &str) -> Result<String, StockPhotoError> {
        self.queries.lock().unwrap().push(query.to_string());
        if self.fail {
            return Err(StockPhotoError::Lookup("stock service down".to_string()));
        }
        Ok(format!("https://stock.test/{query}"))
    }
}

#[derive(Clone)]
pub struct FakeImageGenerator {
    fail: bool,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl FakeImageGenerator {
    pub fn working() -> Self {
        Self {
            fail: false,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl ImageGenerator for FakeImageGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ImageGenerationError> {
        let mut prompts = self.prompts.lock().unwrap();
        prompts.push(prompt.to_string());
        if self.fail {
            return Err(ImageGenerationError::Request("model overloaded".to_string()));
        }
        Ok(format!("https://images.test/generated-{}.png", prompts.len()))
    }
}

/// Writes `size` bytes to the destination so later `tokio::fs::read` calls
/// on the candidate paths see a real file.
#[derive(Clone)]
pub struct FakeArtifactFetcher {
    size: u64,
    pub fetched: Arc<Mutex<Vec<String>>>,
}

impl FakeArtifactFetcher {
    pub fn new(size: u64) -> Self {
        Self {
            size,
            fetched: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl ArtifactFetcher for FakeArtifactFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        self.fetched.lock().unwrap().push(url.to_string());
        tokio::fs::write(dest, vec![0u8; self.size as usize])
            .await
            .map_err(|e| FetchError::Io(e.to_string()))?;
        Ok(self.size)
    }
}

// ============================================================================
// Encoder
// ============================================================================

#[derive(Clone)]
pub struct FakeVideoEncoder {
    fail: bool,
    pub jobs: Arc<Mutex<Vec<EncodeJob>>>,
}

impl FakeVideoEncoder {
    pub fn working() -> Self {
        Self {
            fail: false,
            jobs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            jobs: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl VideoEncoder for FakeVideoEncoder {
    async fn compose(&self, job: &EncodeJob) -> Result<(), EncodeError> {
        self.jobs.lock().unwrap().push(job.clone());
        if self.fail {
            return Err(EncodeError::Encoder {
                status: "exit status: 1".to_string(),
                stderr: "moov atom not found".to_string(),
            });
        }
        tokio::fs::write(&job.output, b"not really an mp4")
            .await
            .map_err(|e| EncodeError::Spawn(e.to_string()))?;
        Ok(())
    }
}

// ============================================================================
// Object store
// ============================================================================

#[derive(Clone, Default)]
pub struct RecordingObjectStore {
    pub uploads: Arc<Mutex<Vec<(String, String, usize)>>>,
}

impl RecordingObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upload_with_content_type(&self, content_type: &str) -> Option<(String, usize)> {
        self.uploads
            .lock()
            .unwrap()
            .iter()
            .find(|(_, ct, _)| ct == content_type)
            .map(|(key, _, len)| (key.clone(), *len))
    }
}

#[async_trait]
impl ObjectStore for RecordingObjectStore {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        key: &str,
        content_type: &str,
    ) -> Result<String, ObjectStoreError> {
        self.uploads
            .lock()
            .unwrap()
            .push((key.to_string(), content_type.to_string(), bytes.len()));
        Ok(format!("https://storage.test/{key}"))
    }
}

// ============================================================================
// Repository
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemoryReelRepository {
    pub celebrities: Arc<Mutex<Vec<Celebrity>>>,
    pub reels: Arc<Mutex<Vec<Reel>>>,
}

impl InMemoryReelRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReelRepository for InMemoryReelRepository {
    async fn find_celebrity(
        &self,
        name: &str,
        sport: &str,
    ) -> Result<Option<Celebrity>, RepositoryError> {
        Ok(self
            .celebrities
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.name == name && c.sport == sport)
            .cloned())
    }

    async fn create_celebrity(&self, data: NewCelebrity) -> Result<Celebrity, RepositoryError> {
        let mut celebrities = self.celebrities.lock().unwrap();
        let celebrity = Celebrity {
            id: celebrities.len() as i32 + 1,
            name: data.name,
            sport: data.sport,
            description: data.description,
            created_at: now(),
        };
        celebrities.push(celebrity.clone());
        Ok(celebrity)
    }

    async fn create_reel(&self, data: NewReel) -> Result<Reel, RepositoryError> {
        let mut reels = self.reels.lock().unwrap();
        let reel = Reel {
            id: reels.len() as i32 + 1,
            celebrity_id: data.celebrity_id,
            title: data.title,
            description: Some(data.description),
            video_url: data.video_url,
            thumbnail_url: Some(data.thumbnail_url),
            status: data.status,
            created_at: now(),
            updated_at: now(),
        };
        reels.push(reel.clone());
        Ok(reel)
    }

    async fn set_reel_status(
        &self,
        reel_id: i32,
        status: ReelStatus,
    ) -> Result<Reel, RepositoryError> {
        let mut reels = self.reels.lock().unwrap();
        let reel = reels
            .iter_mut()
            .find(|r| r.id == reel_id)
            .ok_or(RepositoryError::ReelNotFound(reel_id))?;
        reel.status = status;
        reel.updated_at = now();
        Ok(reel.clone())
    }
}
