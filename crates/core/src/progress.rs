//! Chapter completion tracking.
//!
//! The catalog only ever asks one question of a tracker: is this chapter
//! complete? Recording completion is left to the concrete implementations.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
    rc::Rc,
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use tokio::fs;

#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    #[error("Failed to access progress file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Corrupt progress file {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Answers whether a chapter has been completed.
///
/// Progress is keyed by chapter id alone. Chapter ids are only required to be
/// unique within a course, so a catalog that reuses an id across courses
/// shares completion between those chapters.
pub trait ProgressTracker {
    fn is_chapter_complete(&self, chapter_id: &str) -> bool;
}

impl<T: ProgressTracker + ?Sized> ProgressTracker for &T {
    fn is_chapter_complete(&self, chapter_id: &str) -> bool {
        (**self).is_chapter_complete(chapter_id)
    }
}

impl<T: ProgressTracker + ?Sized> ProgressTracker for Box<T> {
    fn is_chapter_complete(&self, chapter_id: &str) -> bool {
        (**self).is_chapter_complete(chapter_id)
    }
}

impl<T: ProgressTracker + ?Sized> ProgressTracker for Rc<T> {
    fn is_chapter_complete(&self, chapter_id: &str) -> bool {
        (**self).is_chapter_complete(chapter_id)
    }
}

impl<T: ProgressTracker + ?Sized> ProgressTracker for Arc<T> {
    fn is_chapter_complete(&self, chapter_id: &str) -> bool {
        (**self).is_chapter_complete(chapter_id)
    }
}

/// Tracker that never reports a chapter as complete
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressTracker for NoProgress {
    fn is_chapter_complete(&self, _chapter_id: &str) -> bool {
        false
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryProgress {
    completed: BTreeSet<String>,
}

impl InMemoryProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the chapter was not already complete
    pub fn mark_complete(&mut self, chapter_id: &str) -> bool {
        self.completed.insert(chapter_id.to_string())
    }

    /// Returns `true` if the chapter was previously complete
    pub fn mark_incomplete(&mut self, chapter_id: &str) -> bool {
        self.completed.remove(chapter_id)
    }

    pub fn clear(&mut self) {
        self.completed.clear();
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    pub fn completed(&self) -> impl Iterator<Item = &str> {
        self.completed.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for InMemoryProgress {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            completed: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl ProgressTracker for InMemoryProgress {
    fn is_chapter_complete(&self, chapter_id: &str) -> bool {
        self.completed.contains(chapter_id)
    }
}

/// Progress persisted as JSON on disk
#[derive(Debug)]
pub struct FileProgress {
    path: PathBuf,
    state: InMemoryProgress,
}

impl FileProgress {
    /// Load progress from `path`. A missing file yields empty progress.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, ProgressError> {
        let path = path.into();
        let state = match fs::read_to_string(&path).await {
            Ok(json) => serde_json::from_str(&json).map_err(|source| ProgressError::Json {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no progress file yet");
                InMemoryProgress::default()
            }
            Err(source) => return Err(ProgressError::Io { path, source }),
        };
        Ok(Self { path, state })
    }

    /// Write current progress to disk, creating parent directories
    pub async fn save(&self) -> Result<(), ProgressError> {
        let io_err = |source| ProgressError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(&self.state).map_err(|source| {
            ProgressError::Json {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, json).await.map_err(io_err)?;
        tracing::debug!(
            path = %self.path.display(),
            completed = self.state.completed_count(),
            "progress saved"
        );
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> &InMemoryProgress {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut InMemoryProgress {
        &mut self.state
    }
}

impl ProgressTracker for FileProgress {
    fn is_chapter_complete(&self, chapter_id: &str) -> bool {
        self.state.is_chapter_complete(chapter_id)
    }
}
