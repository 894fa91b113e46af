mod db;
mod fetcher;
mod image_generation;
mod object_store;
mod speech;
mod stock_photos;
mod text_generation;
mod video_encoder;

pub use db::{NewCelebrity, NewReel, ReelRepository, RepositoryError};
pub use fetcher::{ArtifactFetcher, FetchError};
pub use image_generation::{ImageGenerationError, ImageGenerator};
pub use object_store::{ObjectStore, ObjectStoreError};
pub use speech::{SpeechError, SpeechSynthesizer};
pub use stock_photos::{StockPhotoError, StockPhotoFinder};
pub use text_generation::{CompletionRequest, TextGenerationError, TextGenerator};
pub use video_encoder::{EncodeError, EncodeJob, VideoEncoder};

#[cfg(test)]
pub use fetcher::MockArtifactFetcher;
#[cfg(test)]
pub use image_generation::MockImageGenerator;
#[cfg(test)]
pub use speech::MockSpeechSynthesizer;
#[cfg(test)]
pub use stock_photos::MockStockPhotoFinder;
#[cfg(test)]
pub use text_generation::MockTextGenerator;
#[cfg(test)]
pub use video_encoder::MockVideoEncoder;
