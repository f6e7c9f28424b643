//! In-memory course catalog.
//!
//! A [`CourseCatalog`] is built once from a list of courses and never changes
//! afterwards. The only mutable state is the "current course" pointer used by
//! chapter lookups.

use indexmap::IndexMap;

use crate::{
    config::CatalogSource,
    error::Result,
    fixture::{embedded_courses, load_fixture},
    progress::{NoProgress, ProgressTracker},
    types::{Chapter, Course, CourseStats, Level},
    validate::validate_courses,
};

#[derive(Debug)]
pub struct CourseCatalog<P = NoProgress> {
    courses: IndexMap<String, Course>,
    current: Option<usize>,
    progress: P,
}

impl CourseCatalog<NoProgress> {
    /// Catalog over the embedded courses without progress tracking
    pub fn embedded() -> Result<Self> {
        Self::new(embedded_courses()?, NoProgress)
    }
}

impl<P: ProgressTracker> CourseCatalog<P> {
    /// Build a catalog, keeping the given course order.
    ///
    /// Fails if the courses break any structural invariant (see
    /// [`validate_courses`]).
    pub fn new(courses: Vec<Course>, progress: P) -> Result<Self> {
        validate_courses(&courses)?;
        let courses: IndexMap<String, Course> = courses
            .into_iter()
            .map(|course| (course.id.clone(), course))
            .collect();
        tracing::debug!(courses = courses.len(), "course catalog built");
        Ok(Self {
            courses,
            current: None,
            progress,
        })
    }

    pub fn with_embedded(progress: P) -> Result<Self> {
        Self::new(embedded_courses()?, progress)
    }

    pub async fn from_source(source: &CatalogSource, progress: P) -> Result<Self> {
        tracing::info!(source = %source.name(), "loading course catalog");
        let courses = match source {
            CatalogSource::Embedded => embedded_courses()?,
            CatalogSource::File(path) => load_fixture(path).await?,
        };
        Self::new(courses, progress)
    }

    /// Select the course with `course_id` as current.
    /// An unknown id clears the selection.
    pub fn load_course(&mut self, course_id: &str) -> Option<&Course> {
        self.current = self.courses.get_index_of(course_id);
        match self.current {
            Some(_) => tracing::debug!(course_id, "course loaded"),
            None => tracing::debug!(course_id, "unknown course, selection cleared"),
        }
        self.current_course()
    }

    pub fn current_course(&self) -> Option<&Course> {
        self.current
            .and_then(|idx| self.courses.get_index(idx))
            .map(|(_, course)| course)
    }

    pub fn clear_current(&mut self) {
        self.current = None;
    }

    /// Chapter of the current course
    pub fn chapter(&self, chapter_id: &str) -> Option<&Chapter> {
        self.current_course()?.chapter(chapter_id)
    }

    /// Chapter following `chapter_id` in the current course
    pub fn next_chapter(&self, chapter_id: &str) -> Option<&Chapter> {
        let course = self.current_course()?;
        let pos = course.chapter_position(chapter_id)?;
        course.chapters.get(pos + 1)
    }

    /// Chapter preceding `chapter_id` in the current course
    pub fn previous_chapter(&self, chapter_id: &str) -> Option<&Chapter> {
        let course = self.current_course()?;
        let pos = course.chapter_position(chapter_id)?;
        pos.checked_sub(1).and_then(|prev| course.chapters.get(prev))
    }

    pub fn all_courses(&self) -> impl ExactSizeIterator<Item = &Course> + '_ {
        self.courses.values()
    }

    pub fn course_by_id(&self, course_id: &str) -> Option<&Course> {
        self.courses.get(course_id)
    }

    /// Courses whose title or description contains `query`, ignoring case.
    /// An empty query matches everything.
    pub fn search_courses(&self, query: &str) -> Vec<&Course> {
        let lower_query = query.to_lowercase();
        self.courses
            .values()
            .filter(|course| course.matches_query(&lower_query))
            .collect()
    }

    pub fn filter_courses_by_level(&self, level: Level) -> Vec<&Course> {
        self.courses
            .values()
            .filter(|course| course.level == level)
            .collect()
    }

    pub fn course_stats(&self, course_id: &str) -> Option<CourseStats> {
        let course = self.courses.get(course_id)?;
        let completed_chapters = course
            .chapters
            .iter()
            .filter(|ch| self.progress.is_chapter_complete(&ch.id))
            .count();

        Some(CourseStats {
            total_chapters: course.total_chapters(),
            total_duration: course.duration.clone(),
            level: course.level,
            completed_chapters,
        })
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn progress(&self) -> &P {
        &self.progress
    }

    pub fn progress_mut(&mut self) -> &mut P {
        &mut self.progress
    }

    pub fn into_progress(self) -> P {
        self.progress
    }
}
