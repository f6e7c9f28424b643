use crate::types::{Chapter, Course, CourseStats};

/// Format seconds as MM:SS timestamp
pub fn format_timestamp(seconds: f64) -> String {
    let mins = (seconds / 60.0) as u32;
    let secs = (seconds % 60.0) as u32;
    format!("{:02}:{:02}", mins, secs)
}

/// Format transcript entries with timestamps
pub fn format_transcript(chapter: &Chapter) -> String {
    chapter
        .transcript
        .iter()
        .map(|entry| format!("[{}] {}", format_timestamp(entry.time), entry.text.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line listing entry for a course
pub fn format_course_line(course: &Course) -> String {
    format!(
        "{} - {} ({}, {} chapters, {})",
        course.id,
        course.title,
        course.level,
        course.total_chapters(),
        course.duration
    )
}

/// Completion summary, e.g. `2/6 chapters complete (33%)`
pub fn format_completion(stats: &CourseStats) -> String {
    format!(
        "{}/{} chapters complete ({}%)",
        stats.completed_chapters,
        stats.total_chapters,
        stats.completion_percent()
    )
}

/// Format a course outline as human-readable markdown
pub fn format_course_readable(course: &Course, stats: &CourseStats) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", course.title));
    output.push_str(&format!(
        "**Duration:** {} | **Level:** {} | **Instructor:** {}\n\n",
        course.duration, course.level, course.instructor
    ));
    output.push_str(&course.description);
    output.push_str("\n\n");

    output.push_str(&format!(
        "## Chapters ({}/{} complete)\n\n",
        stats.completed_chapters, stats.total_chapters
    ));
    for chapter in &course.chapters {
        output.push_str(&format!(
            "{}. {} [{}] ({})\n",
            chapter.number, chapter.title, chapter.duration, chapter.id
        ));
    }

    output
}

/// Format a chapter with its transcript and resources as markdown
pub fn format_chapter_readable(chapter: &Chapter) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}. {}\n\n", chapter.number, chapter.title));
    output.push_str(&format!(
        "**Duration:** {} | **Video:** {}\n\n",
        chapter.duration, chapter.video_url
    ));
    output.push_str(&chapter.description);
    output.push_str("\n\n");

    if !chapter.transcript.is_empty() {
        output.push_str("## Transcript\n\n");
        output.push_str(&format_transcript(chapter));
        output.push_str("\n\n");
    }

    if !chapter.resources.is_empty() {
        output.push_str("## Resources\n\n");
        for resource in &chapter.resources {
            output.push_str(&format!("• {} <{}>\n", resource.name, resource.url));
        }
    }

    output
}
