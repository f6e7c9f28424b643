use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown course level: {0:?}")]
pub struct ParseLevelError(pub String);

/// Exact, case-sensitive match against the serialized level names
impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub duration: String,
    pub level: Level,
    pub chapters: Vec<Chapter>,
}

impl Course {
    pub fn total_chapters(&self) -> usize {
        self.chapters.len()
    }

    /// Find a chapter of this course by id
    pub fn chapter(&self, chapter_id: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|ch| ch.id == chapter_id)
    }

    pub(crate) fn chapter_position(&self, chapter_id: &str) -> Option<usize> {
        self.chapters.iter().position(|ch| ch.id == chapter_id)
    }

    /// Case-insensitive substring match on title or description.
    /// `lower_query` must already be lowercased.
    pub(crate) fn matches_query(&self, lower_query: &str) -> bool {
        self.title.to_lowercase().contains(lower_query)
            || self.description.to_lowercase().contains(lower_query)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub number: u32,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub video_url: String,
    #[serde(default)]
    pub transcript: Vec<TranscriptEntry>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl Chapter {
    /// Transcript entry being spoken at `seconds` into the video.
    ///
    /// Returns the last entry whose timestamp is at or before the position,
    /// or `None` before the first entry.
    pub fn entry_at(&self, seconds: f64) -> Option<&TranscriptEntry> {
        let idx = self.transcript.partition_point(|entry| entry.time <= seconds);
        idx.checked_sub(1).map(|i| &self.transcript[i])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Offset from the start of the video, in seconds
    pub time: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseStats {
    pub total_chapters: usize,
    pub total_duration: String,
    pub level: Level,
    pub completed_chapters: usize,
}

impl CourseStats {
    pub fn completion_percent(&self) -> u32 {
        if self.total_chapters == 0 {
            return 0;
        }
        (self.completed_chapters * 100 / self.total_chapters) as u32
    }
}
