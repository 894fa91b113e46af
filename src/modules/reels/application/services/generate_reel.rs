//! Pipeline orchestrator.
//!
//! Stages run as a DAG: subject resolution and script generation are strictly
//! ordered, audio synthesis runs alongside image sourcing, then the audio
//! upload, video composition and thumbnail upload run together. The video
//! upload and the database insert close the run. The workspace lives for the
//! scope of one `run` call and is removed on every exit path.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::reels::application::domain::entities::{
    CelebritySummary, GeneratedReel, GenerationRequest, ReelStatus,
};
use crate::reels::application::domain::script;
use crate::reels::application::domain::stage::{PipelineStage, StageLog};
use crate::reels::application::domain::workspace::Workspace;
use crate::reels::application::ports::incoming::{GenerateReelError, GenerateReelUseCase};
use crate::reels::application::ports::outgoing::{
    EncodeJob, NewCelebrity, NewReel, ObjectStore, ReelRepository, RepositoryError,
    SpeechSynthesizer, TextGenerator, VideoEncoder,
};
use crate::reels::application::services::image_sourcing::{ImageSourcer, SourcingContext};
use crate::reels::application::services::script_generator::ScriptGenerator;

/// Knobs for one service instance. Defaults mirror the product's fixed
/// profile: 30-second reels built from three images.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub workspace_root: PathBuf,
    pub video_duration_secs: u32,
    pub image_count: usize,
    pub voice: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workspace_root: std::env::temp_dir(),
            video_duration_secs: 30,
            image_count: 3,
            voice: "onyx".to_string(),
        }
    }
}

/// Storage keys for one run's artifacts, namespaced by kind and tied together
/// by a shared random token.
#[derive(Debug, Clone, PartialEq)]
struct ArtifactKeys {
    audio: String,
    video: String,
    thumbnail: String,
}

fn artifact_keys(name: &str) -> ArtifactKeys {
    let token: [u8; 8] = rand::random();
    let token: String = token.iter().map(|b| format!("{b:02x}")).collect();
    let slug = script::slug(name);

    ArtifactKeys {
        audio: format!("audio/{token}-{slug}.mp3"),
        video: format!("videos/{token}-{slug}.mp4"),
        thumbnail: format!("thumbnails/{token}-{slug}.jpg"),
    }
}

fn mark(log: &mut StageLog, to: PipelineStage) {
    if let Err(err) = log.advance(to) {
        tracing::warn!(%err, "Stage transition rejected");
    }
}

pub struct GenerateReelService<T, S, V, O, R>
where
    T: TextGenerator,
    S: SpeechSynthesizer,
    V: VideoEncoder,
    O: ObjectStore,
    R: ReelRepository,
{
    script_generator: ScriptGenerator<T>,
    image_sourcer: ImageSourcer,
    speech: S,
    encoder: V,
    store: O,
    repository: R,
    config: PipelineConfig,
}

impl<T, S, V, O, R> GenerateReelService<T, S, V, O, R>
where
    T: TextGenerator,
    S: SpeechSynthesizer,
    V: VideoEncoder,
    O: ObjectStore,
    R: ReelRepository,
{
    pub fn new(
        script_generator: ScriptGenerator<T>,
        image_sourcer: ImageSourcer,
        speech: S,
        encoder: V,
        store: O,
        repository: R,
        config: PipelineConfig,
    ) -> Self {
        Self {
            script_generator,
            image_sourcer,
            speech,
            encoder,
            store,
            repository,
            config,
        }
    }

    /// Trust a supplied id outright; otherwise read-then-create. The pair is
    /// not transactional, so two concurrent identical requests can both
    /// create a row. That window is accepted.
    async fn resolve_celebrity(
        &self,
        request: &GenerationRequest,
    ) -> Result<CelebritySummary, RepositoryError> {
        if let Some(id) = request.celebrity_id {
            return Ok(CelebritySummary {
                id,
                name: request.name.clone(),
                sport: request.sport.clone(),
            });
        }

        if let Some(existing) = self
            .repository
            .find_celebrity(&request.name, &request.sport)
            .await?
        {
            tracing::debug!(celebrity_id = existing.id, "Reusing existing celebrity");
            return Ok(CelebritySummary {
                id: existing.id,
                name: existing.name,
                sport: existing.sport,
            });
        }

        let created = self
            .repository
            .create_celebrity(NewCelebrity {
                name: request.name.clone(),
                sport: request.sport.clone(),
                description: request.description.clone(),
            })
            .await?;
        tracing::info!(celebrity_id = created.id, "Created new celebrity");

        Ok(CelebritySummary {
            id: created.id,
            name: created.name,
            sport: created.sport,
        })
    }

    async fn run(
        &self,
        request: &GenerationRequest,
        log: &mut StageLog,
    ) -> Result<GeneratedReel, GenerateReelError> {
        request.validate()?;

        let workspace = Workspace::create(&self.config.workspace_root).map_err(|e| {
            GenerateReelError::Workspace {
                stage: PipelineStage::Start,
                detail: e.to_string(),
            }
        })?;

        let celebrity = self.resolve_celebrity(request).await.map_err(|source| {
            GenerateReelError::Repository {
                stage: PipelineStage::SubjectResolved,
                source,
            }
        })?;
        mark(log, PipelineStage::SubjectResolved);

        let reel_script = self
            .script_generator
            .generate(&celebrity.name, &celebrity.sport)
            .await?;
        mark(log, PipelineStage::ScriptReady);

        let keys = artifact_keys(&celebrity.name);
        let audio_path = workspace.audio_path();
        let video_path = workspace.video_path();

        // Audio synthesis and image sourcing are independent once the script
        // exists.
        let audio_task = async {
            let bytes = self
                .speech
                .synthesize(&reel_script.body, &self.config.voice)
                .await
                .map_err(GenerateReelError::Speech)?;
            tokio::fs::write(&audio_path, &bytes).await.map_err(|e| {
                GenerateReelError::Workspace {
                    stage: PipelineStage::AudioReady,
                    detail: e.to_string(),
                }
            })?;
            Ok::<_, GenerateReelError>(bytes)
        };
        let images_task = async {
            let ctx = SourcingContext {
                name: &celebrity.name,
                sport: &celebrity.sport,
                script: &reel_script.body,
                workspace: workspace.path(),
                target_count: self.config.image_count,
            };
            self.image_sourcer.source(&ctx).await.map_err(|err| {
                GenerateReelError::SourcingExhausted {
                    detail: err.to_string(),
                }
            })
        };
        let (audio_bytes, images) = tokio::try_join!(audio_task, images_task)?;
        mark(log, PipelineStage::AudioReady);
        mark(log, PipelineStage::ImagesReady);

        let thumbnail_src = match images.first() {
            Some(candidate) => candidate.path.clone(),
            None => {
                return Err(GenerateReelError::SourcingExhausted {
                    detail: "sourcing returned no images".to_string(),
                })
            }
        };

        // The first image doubles as the thumbnail. Its upload and the audio
        // upload ride alongside the CPU-heavy composition.
        let audio_upload = async {
            self.store
                .upload(audio_bytes, &keys.audio, "audio/mpeg")
                .await
                .map_err(|source| GenerateReelError::Storage {
                    stage: PipelineStage::AudioPublished,
                    source,
                })
        };
        let compose = async {
            let job = EncodeJob {
                images: images.iter().map(|c| c.path.clone()).collect(),
                audio: audio_path.clone(),
                output: video_path.clone(),
                duration_secs: self.config.video_duration_secs,
            };
            self.encoder
                .compose(&job)
                .await
                .map_err(GenerateReelError::Encode)
        };
        let thumbnail_upload = async {
            let bytes = tokio::fs::read(&thumbnail_src).await.map_err(|e| {
                GenerateReelError::Workspace {
                    stage: PipelineStage::ThumbnailPublished,
                    detail: e.to_string(),
                }
            })?;
            self.store
                .upload(bytes, &keys.thumbnail, "image/jpeg")
                .await
                .map_err(|source| GenerateReelError::Storage {
                    stage: PipelineStage::ThumbnailPublished,
                    source,
                })
        };
        let (audio_url, _, thumbnail_url) =
            tokio::try_join!(audio_upload, compose, thumbnail_upload)?;
        mark(log, PipelineStage::AudioPublished);
        mark(log, PipelineStage::VideoComposed);
        mark(log, PipelineStage::ThumbnailPublished);

        let video_bytes = tokio::fs::read(&video_path).await.map_err(|e| {
            GenerateReelError::Workspace {
                stage: PipelineStage::VideoPublished,
                detail: e.to_string(),
            }
        })?;
        let video_url = self
            .store
            .upload(video_bytes, &keys.video, "video/mp4")
            .await
            .map_err(|source| GenerateReelError::Storage {
                stage: PipelineStage::VideoPublished,
                source,
            })?;
        mark(log, PipelineStage::VideoPublished);

        let reel = self
            .repository
            .create_reel(NewReel {
                celebrity_id: celebrity.id,
                title: reel_script.title.clone(),
                description: reel_script.excerpt(255),
                video_url: video_url.clone(),
                thumbnail_url: thumbnail_url.clone(),
                status: ReelStatus::Completed,
            })
            .await
            .map_err(|source| GenerateReelError::Repository {
                stage: PipelineStage::RecordPersisted,
                source,
            })?;
        mark(log, PipelineStage::RecordPersisted);
        tracing::info!(reel_id = reel.id, "Reel persisted");

        Ok(GeneratedReel {
            title: reel_script.title,
            script: reel_script.body,
            audio_url,
            video_url,
            thumbnail_url,
            celebrity,
        })
    }
}

#[async_trait]
impl<T, S, V, O, R> GenerateReelUseCase for GenerateReelService<T, S, V, O, R>
where
    T: TextGenerator,
    S: SpeechSynthesizer,
    V: VideoEncoder,
    O: ObjectStore,
    R: ReelRepository,
{
    async fn execute(
        &self,
        request: GenerationRequest,
    ) -> Result<GeneratedReel, GenerateReelError> {
        tracing::info!(name = %request.name, sport = %request.sport, "Reel generation started");
        let mut log = StageLog::new();

        match self.run(&request, &mut log).await {
            Ok(reel) => {
                mark(&mut log, PipelineStage::Completed);
                tracing::info!(
                    title = %reel.title,
                    transitions = log.entries().len(),
                    "Reel generation completed"
                );
                Ok(reel)
            }
            Err(err) => {
                let reached = log.fail();
                tracing::error!(stage = %err.stage(), reached = %reached, %err, "Reel generation failed");
                Err(err)
            }
        }
    }
}
