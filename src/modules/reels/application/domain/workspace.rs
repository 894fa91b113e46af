//! Per-run scratch directory.
//!
//! Every pipeline run owns exactly one workspace; intermediate files (images,
//! audio, video) live there and the whole directory disappears when the
//! workspace is dropped, on success and on failure alike.

use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a fresh workspace under `root`.
    pub fn create(root: &Path) -> io::Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("sportsreel-")
            .tempdir_in(root)?;
        tracing::debug!(path = %dir.path().display(), "Created workspace");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn audio_path(&self) -> PathBuf {
        self.file("audio.mp3")
    }

    pub fn video_path(&self) -> PathBuf {
        self.file("video.mp4")
    }
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("path", &self.dir.path())
            .finish()
    }
}
