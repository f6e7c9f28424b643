use std::collections::HashSet;

use crate::{
    error::{CatalogError, Result},
    types::{Chapter, Course},
};

/// Check the structural invariants of a set of courses.
///
/// Course ids must be unique, chapter ids unique within a course, chapter
/// numbers contiguous from 1 in list order, and transcript timestamps finite,
/// non-negative and strictly increasing.
pub fn validate_courses(courses: &[Course]) -> Result<()> {
    let mut seen = HashSet::new();
    for course in courses {
        if !seen.insert(course.id.as_str()) {
            return Err(CatalogError::DuplicateCourse {
                course_id: course.id.clone(),
            });
        }
        validate_course(course)?;
    }
    Ok(())
}

fn validate_course(course: &Course) -> Result<()> {
    let mut chapter_ids = HashSet::new();
    for (position, chapter) in course.chapters.iter().enumerate() {
        if !chapter_ids.insert(chapter.id.as_str()) {
            return Err(CatalogError::DuplicateChapter {
                course_id: course.id.clone(),
                chapter_id: chapter.id.clone(),
            });
        }

        let expected = position as u32 + 1;
        if chapter.number != expected {
            return Err(CatalogError::ChapterNumberMismatch {
                course_id: course.id.clone(),
                chapter_id: chapter.id.clone(),
                expected,
                found: chapter.number,
            });
        }

        validate_transcript(&course.id, chapter)?;
    }
    Ok(())
}

fn validate_transcript(course_id: &str, chapter: &Chapter) -> Result<()> {
    let mut previous: Option<f64> = None;
    for entry in &chapter.transcript {
        if !entry.time.is_finite() || entry.time < 0.0 {
            return Err(CatalogError::InvalidTimestamp {
                course_id: course_id.to_string(),
                chapter_id: chapter.id.clone(),
                time: entry.time,
            });
        }
        if previous.is_some_and(|prev| entry.time <= prev) {
            return Err(CatalogError::TranscriptOutOfOrder {
                course_id: course_id.to_string(),
                chapter_id: chapter.id.clone(),
                time: entry.time,
            });
        }
        previous = Some(entry.time);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Level, TranscriptEntry};

    fn chapter(id: &str, number: u32, times: &[f64]) -> Chapter {
        Chapter {
            id: id.into(),
            number,
            title: id.into(),
            description: String::new(),
            duration: "10:00".into(),
            video_url: "#".into(),
            transcript: times
                .iter()
                .map(|&time| TranscriptEntry {
                    time,
                    text: "line".into(),
                })
                .collect(),
            resources: Vec::new(),
        }
    }

    fn course(id: &str, chapters: Vec<Chapter>) -> Course {
        Course {
            id: id.into(),
            title: id.into(),
            description: String::new(),
            instructor: "Team".into(),
            duration: "1h".into(),
            level: Level::Beginner,
            chapters,
        }
    }

    #[test]
    fn accepts_well_formed_courses() {
        let courses = vec![
            course("a", vec![chapter("ch1", 1, &[0.0, 10.0]), chapter("ch2", 2, &[])]),
            // chapter ids only need to be unique per course
            course("b", vec![chapter("ch1", 1, &[0.0])]),
        ];
        assert!(validate_courses(&courses).is_ok());
    }

    #[test]
    fn rejects_duplicate_course_id() {
        let courses = vec![course("a", vec![]), course("a", vec![])];
        let err = validate_courses(&courses).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCourse { course_id } if course_id == "a"));
    }

    #[test]
    fn rejects_duplicate_chapter_id_within_course() {
        let courses = vec![course("a", vec![chapter("ch1", 1, &[]), chapter("ch1", 2, &[])])];
        let err = validate_courses(&courses).unwrap_err();
        assert!(
            matches!(err, CatalogError::DuplicateChapter { chapter_id, .. } if chapter_id == "ch1")
        );
    }

    #[test]
    fn rejects_gap_in_chapter_numbers() {
        let courses = vec![course("a", vec![chapter("ch1", 1, &[]), chapter("ch3", 3, &[])])];
        let err = validate_courses(&courses).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::ChapterNumberMismatch {
                expected: 2,
                found: 3,
                ..
            }
        ));
    }

    #[test]
    fn rejects_numbering_from_zero() {
        let courses = vec![course("a", vec![chapter("ch0", 0, &[])])];
        assert!(matches!(
            validate_courses(&courses),
            Err(CatalogError::ChapterNumberMismatch { expected: 1, found: 0, .. })
        ));
    }

    #[test]
    fn rejects_duplicate_or_decreasing_timestamps() {
        let dup = vec![course("a", vec![chapter("ch1", 1, &[0.0, 10.0, 10.0])])];
        assert!(matches!(
            validate_courses(&dup),
            Err(CatalogError::TranscriptOutOfOrder { .. })
        ));

        let back = vec![course("a", vec![chapter("ch1", 1, &[20.0, 5.0])])];
        assert!(matches!(
            validate_courses(&back),
            Err(CatalogError::TranscriptOutOfOrder { .. })
        ));
    }

    #[test]
    fn rejects_negative_and_nan_timestamps() {
        let negative = vec![course("a", vec![chapter("ch1", 1, &[-1.0])])];
        assert!(matches!(
            validate_courses(&negative),
            Err(CatalogError::InvalidTimestamp { .. })
        ));

        let nan = vec![course("a", vec![chapter("ch1", 1, &[0.0, f64::NAN])])];
        assert!(matches!(
            validate_courses(&nan),
            Err(CatalogError::InvalidTimestamp { .. })
        ));
    }
}
