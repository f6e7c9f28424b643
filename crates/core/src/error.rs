use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Duplicate course id: {course_id}")]
    DuplicateCourse { course_id: String },

    #[error("Duplicate chapter id {chapter_id} in course {course_id}")]
    DuplicateChapter {
        course_id: String,
        chapter_id: String,
    },

    #[error(
        "Chapter {chapter_id} in course {course_id} is numbered {found}, expected {expected}"
    )]
    ChapterNumberMismatch {
        course_id: String,
        chapter_id: String,
        expected: u32,
        found: u32,
    },

    #[error("Invalid transcript timestamp {time} in chapter {chapter_id} of course {course_id}")]
    InvalidTimestamp {
        course_id: String,
        chapter_id: String,
        time: f64,
    },

    #[error(
        "Transcript of chapter {chapter_id} in course {course_id} is not strictly increasing at {time}s"
    )]
    TranscriptOutOfOrder {
        course_id: String,
        chapter_id: String,
        time: f64,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
