//! Tiered image sourcing.
//!
//! Tiers are tried in strict priority order and evaluated as a
//! short-circuiting reduction: the first tier whose candidate count meets its
//! own acceptance threshold wins outright, later tiers are never touched.
//! Downloads inside one tier run concurrently and a failed download only
//! costs that one candidate.

use async_trait::async_trait;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::reels::application::domain::entities::{ImageCandidate, ImageProvenance};
use crate::reels::application::domain::script;
use crate::reels::application::ports::outgoing::{
    ArtifactFetcher, ImageGenerator, StockPhotoFinder, TextGenerator,
};
use crate::reels::application::services::script_generator::generate_image_prompts;

/// Stock and generic downloads below this are treated as error pages or
/// tracking pixels, not photographs.
const MIN_STOCK_IMAGE_BYTES: u64 = 10_000;
const MIN_GENERATED_IMAGE_BYTES: u64 = 1_000;

/// Per-run inputs shared by every tier.
#[derive(Debug, Clone, Copy)]
pub struct SourcingContext<'a> {
    pub name: &'a str,
    pub sport: &'a str,
    pub script: &'a str,
    pub workspace: &'a Path,
    pub target_count: usize,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SourcingError {
    #[error("Every image sourcing tier failed ({tiers} tiers attempted)")]
    Exhausted { tiers: usize },
}

// ============================================================================
// Tier Interface
// ============================================================================

/// One fallback strategy: produce validated local images for the run.
#[async_trait]
pub trait SourcingTier: Send + Sync {
    fn label(&self) -> ImageProvenance;

    /// Minimum candidate count for this tier's output to be accepted.
    fn accept_threshold(&self) -> usize;

    async fn produce(&self, ctx: &SourcingContext<'_>) -> Vec<ImageCandidate>;
}

async fn download_candidate(
    fetcher: &dyn ArtifactFetcher,
    url: &str,
    dest: PathBuf,
    provenance: ImageProvenance,
    min_bytes: u64,
) -> Option<ImageCandidate> {
    match fetcher.fetch(url, &dest).await {
        Ok(size) if size >= min_bytes => Some(ImageCandidate {
            path: dest,
            provenance,
            size_bytes: size,
        }),
        Ok(size) => {
            tracing::warn!(url, size, min_bytes, "Downloaded image below size floor, discarded");
            None
        }
        Err(err) => {
            tracing::warn!(url, %err, "Image download failed, candidate discarded");
            None
        }
    }
}

// ============================================================================
// Tier 1: stock photo search
// ============================================================================

pub struct StockPhotoTier {
    finder: Arc<dyn StockPhotoFinder>,
    fetcher: Arc<dyn ArtifactFetcher>,
}

impl StockPhotoTier {
    pub fn new(finder: Arc<dyn StockPhotoFinder>, fetcher: Arc<dyn ArtifactFetcher>) -> Self {
        Self { finder, fetcher }
    }

    fn queries(ctx: &SourcingContext<'_>) -> Vec<String> {
        let name = script::slug(ctx.name);
        let sport = script::slug(ctx.sport);

        let mut queries = vec![
            name.clone(),
            format!("{name}-{sport}-player"),
            format!("{sport}-{name}"),
        ];
        if ctx.target_count > queries.len() {
            queries.push(format!("{sport}-player"));
            queries.push(format!("{sport}-athlete"));
        }
        queries.truncate(ctx.target_count);
        queries
    }
}

#[async_trait]
impl SourcingTier for StockPhotoTier {
    fn label(&self) -> ImageProvenance {
        ImageProvenance::StockPhoto
    }

    fn accept_threshold(&self) -> usize {
        2
    }

    async fn produce(&self, ctx: &SourcingContext<'_>) -> Vec<ImageCandidate> {
        let downloads = Self::queries(ctx)
            .into_iter()
            .enumerate()
            .map(|(i, query)| async move {
                let url = match self.finder.find(&format!("{query},athlete")).await {
                    Ok(url) => url,
                    Err(err) => {
                        tracing::warn!(query, %err, "Stock photo lookup failed");
                        return None;
                    }
                };
                download_candidate(
                    self.fetcher.as_ref(),
                    &url,
                    ctx.workspace.join(format!("stock-{i}.jpg")),
                    ImageProvenance::StockPhoto,
                    MIN_STOCK_IMAGE_BYTES,
                )
                .await
            });

        join_all(downloads).await.into_iter().flatten().collect()
    }
}

// ============================================================================
// Tier 2: AI-generated images
// ============================================================================

pub struct GeneratedImageTier {
    prompter: Arc<dyn TextGenerator>,
    generator: Arc<dyn ImageGenerator>,
    fetcher: Arc<dyn ArtifactFetcher>,
}

impl GeneratedImageTier {
    pub fn new(
        prompter: Arc<dyn TextGenerator>,
        generator: Arc<dyn ImageGenerator>,
        fetcher: Arc<dyn ArtifactFetcher>,
    ) -> Self {
        Self {
            prompter,
            generator,
            fetcher,
        }
    }
}

#[async_trait]
impl SourcingTier for GeneratedImageTier {
    fn label(&self) -> ImageProvenance {
        ImageProvenance::AiGenerated
    }

    fn accept_threshold(&self) -> usize {
        1
    }

    async fn produce(&self, ctx: &SourcingContext<'_>) -> Vec<ImageCandidate> {
        // Prompts are only paid for once this tier is actually reached.
        let prompts =
            generate_image_prompts(self.prompter.as_ref(), ctx.name, ctx.sport, ctx.script).await;
        let count = prompts.len().clamp(2, 3);

        let downloads = (0..count).map(|i| {
            let prompt = prompts.get(i).unwrap_or(&prompts[0]).clone();
            async move {
                let url = match self.generator.generate(&prompt).await {
                    Ok(url) => url,
                    Err(err) => {
                        tracing::warn!(index = i, %err, "Image generation failed");
                        return None;
                    }
                };
                download_candidate(
                    self.fetcher.as_ref(),
                    &url,
                    ctx.workspace.join(format!("generated-{i}.png")),
                    ImageProvenance::AiGenerated,
                    MIN_GENERATED_IMAGE_BYTES,
                )
                .await
            }
        });

        join_all(downloads).await.into_iter().flatten().collect()
    }
}

// ============================================================================
// Tier 3: generic sport stock
// ============================================================================

pub struct GenericStockTier {
    finder: Arc<dyn StockPhotoFinder>,
    fetcher: Arc<dyn ArtifactFetcher>,
}

impl GenericStockTier {
    pub fn new(finder: Arc<dyn StockPhotoFinder>, fetcher: Arc<dyn ArtifactFetcher>) -> Self {
        Self { finder, fetcher }
    }
}

#[async_trait]
impl SourcingTier for GenericStockTier {
    fn label(&self) -> ImageProvenance {
        ImageProvenance::GenericStock
    }

    fn accept_threshold(&self) -> usize {
        1
    }

    async fn produce(&self, ctx: &SourcingContext<'_>) -> Vec<ImageCandidate> {
        let sport = script::slug(ctx.sport);
        let queries = [
            format!("{sport}-professional"),
            format!("{sport}-athlete"),
            format!("{sport}-star"),
        ];

        let downloads = queries.into_iter().enumerate().map(|(i, query)| async move {
            let url = match self.finder.find(&query).await {
                Ok(url) => url,
                Err(err) => {
                    tracing::warn!(query, %err, "Generic stock lookup failed");
                    return None;
                }
            };
            download_candidate(
                self.fetcher.as_ref(),
                &url,
                ctx.workspace.join(format!("generic-{i}.jpg")),
                ImageProvenance::GenericStock,
                MIN_STOCK_IMAGE_BYTES,
            )
            .await
        });

        join_all(downloads).await.into_iter().flatten().collect()
    }
}

// ============================================================================
// Tier 4: placeholder
// ============================================================================

/// Last resort: one generic sport photo, no size floor. If even this tier
/// produces nothing the run has zero images and must die.
pub struct PlaceholderTier {
    finder: Arc<dyn StockPhotoFinder>,
    fetcher: Arc<dyn ArtifactFetcher>,
}

impl PlaceholderTier {
    pub fn new(finder: Arc<dyn StockPhotoFinder>, fetcher: Arc<dyn ArtifactFetcher>) -> Self {
        Self { finder, fetcher }
    }
}

#[async_trait]
impl SourcingTier for PlaceholderTier {
    fn label(&self) -> ImageProvenance {
        ImageProvenance::Placeholder
    }

    fn accept_threshold(&self) -> usize {
        1
    }

    async fn produce(&self, ctx: &SourcingContext<'_>) -> Vec<ImageCandidate> {
        let query = format!("{},athlete", script::slug(ctx.sport));
        let url = match self.finder.find(&query).await {
            Ok(url) => url,
            Err(err) => {
                tracing::warn!(query, %err, "Placeholder lookup failed");
                return Vec::new();
            }
        };

        download_candidate(
            self.fetcher.as_ref(),
            &url,
            ctx.workspace.join("placeholder.jpg"),
            ImageProvenance::Placeholder,
            1,
        )
        .await
        .into_iter()
        .collect()
    }
}

// ============================================================================
// Sourcer
// ============================================================================

pub struct ImageSourcer {
    tiers: Vec<Box<dyn SourcingTier>>,
}

impl ImageSourcer {
    pub fn new(tiers: Vec<Box<dyn SourcingTier>>) -> Self {
        Self { tiers }
    }

    /// The production chain: stock search, AI generation, generic stock,
    /// placeholder.
    pub fn standard(
        finder: Arc<dyn StockPhotoFinder>,
        prompter: Arc<dyn TextGenerator>,
        generator: Arc<dyn ImageGenerator>,
        fetcher: Arc<dyn ArtifactFetcher>,
    ) -> Self {
        Self::new(vec![
            Box::new(StockPhotoTier::new(finder.clone(), fetcher.clone())),
            Box::new(GeneratedImageTier::new(prompter, generator, fetcher.clone())),
            Box::new(GenericStockTier::new(finder.clone(), fetcher.clone())),
            Box::new(PlaceholderTier::new(finder, fetcher)),
        ])
    }

    pub async fn source(
        &self,
        ctx: &SourcingContext<'_>,
    ) -> Result<Vec<ImageCandidate>, SourcingError> {
        for tier in &self.tiers {
            let candidates = tier.produce(ctx).await;
            if candidates.len() >= tier.accept_threshold() {
                tracing::info!(
                    tier = %tier.label(),
                    count = candidates.len(),
                    "Image tier accepted"
                );
                return Ok(candidates);
            }
            tracing::warn!(
                tier = %tier.label(),
                count = candidates.len(),
                needed = tier.accept_threshold(),
                "Image tier fell short, trying next tier"
            );
        }

        Err(SourcingError::Exhausted {
            tiers: self.tiers.len(),
        })
    }
}
