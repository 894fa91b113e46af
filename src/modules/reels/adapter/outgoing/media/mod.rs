mod ffmpeg;
mod http_fetcher;
mod unsplash;

pub use ffmpeg::FfmpegEncoder;
pub use http_fetcher::HttpArtifactFetcher;
pub use unsplash::UnsplashSourceFinder;
