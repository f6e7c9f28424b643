//! Helixcourse Core Library
//!
//! Course catalog with chapter, transcript and resource data, lookup and
//! search queries, and pluggable chapter progress tracking.

pub mod catalog;
pub mod config;
pub mod error;
pub mod fixture;
pub mod format;
pub mod progress;
pub mod types;
pub mod validate;

// Re-export commonly used items at crate root
pub use catalog::CourseCatalog;
pub use config::{CatalogSource, Settings, get_data_dir, get_progress_path};
pub use error::{CatalogError, Result};
pub use fixture::{embedded_courses, load_fixture, parse_fixture, save_fixture};
pub use format::{
    format_chapter_readable, format_completion, format_course_line, format_course_readable,
    format_timestamp, format_transcript,
};
pub use progress::{FileProgress, InMemoryProgress, NoProgress, ProgressError, ProgressTracker};
pub use types::{
    Chapter, Course, CourseStats, Level, ParseLevelError, Resource, TranscriptEntry,
};
pub use validate::validate_courses;
