use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use console::{Term, style};
use helixcourse_core::{
    Course, CourseCatalog, CourseStats, FileProgress, Level, Settings, format_chapter_readable,
    format_completion, format_course_line, format_course_readable, format_timestamp,
    save_fixture,
};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

mod logging;

type Catalog = CourseCatalog<FileProgress>;

/// CLI wrapper for Level enum (needed for clap ValueEnum)
#[derive(Clone, Copy, ValueEnum)]
enum CliLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl From<CliLevel> for Level {
    fn from(cli: CliLevel) -> Self {
        match cli {
            CliLevel::Beginner => Level::Beginner,
            CliLevel::Intermediate => Level::Intermediate,
            CliLevel::Advanced => Level::Advanced,
        }
    }
}

#[derive(Parser)]
#[command(name = "helixcourse")]
#[command(about = "Browse HelixCode courses, read chapter transcripts and track progress")]
struct Cli {
    /// Catalog JSON file. Defaults to $HELIXCOURSE_CATALOG, then the built-in catalog.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Progress file. Defaults to $HELIXCOURSE_PROGRESS, then the user data directory.
    #[arg(long, global = true)]
    progress: Option<PathBuf>,

    /// Log filter (e.g. "debug"). Defaults to $RUST_LOG, then "warn".
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all courses, optionally only those of one level
    List {
        #[arg(short, long)]
        level: Option<CliLevel>,
    },
    /// Search course titles and descriptions
    Search { query: String },
    /// Show a course outline
    Show { course: String },
    /// Show a chapter with its transcript and resources
    Chapter {
        course: String,
        chapter: String,

        /// Highlight the transcript line playing at this many seconds
        #[arg(long)]
        at: Option<f64>,
    },
    /// Show completion stats for a course
    Stats { course: String },
    /// Mark a chapter as complete
    Complete {
        course: String,
        chapter: String,

        /// Mark the chapter as not complete instead
        #[arg(long)]
        undo: bool,
    },
    /// Forget all recorded progress
    Reset,
    /// Write the catalog as JSON
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::resolve(cli.catalog, cli.progress, cli.log_level);
    logging::init(&settings.log_filter)?;

    if let Err(e) = run(cli.command, &settings).await {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(command: Command, settings: &Settings) -> Result<()> {
    let progress = FileProgress::load(&settings.progress_path).await?;
    let mut catalog = CourseCatalog::from_source(&settings.catalog, progress).await?;

    match command {
        Command::List { level } => {
            let courses: Vec<&Course> = match level {
                Some(level) => catalog.filter_courses_by_level(level.into()),
                None => catalog.all_courses().collect(),
            };
            print_course_list(&catalog, &courses);
        }
        Command::Search { query } => {
            let courses = catalog.search_courses(&query);
            print_course_list(&catalog, &courses);
        }
        Command::Show { course } => {
            let (course, stats) = course_with_stats(&catalog, &course)?;
            println!("{}", format_course_readable(course, &stats));
        }
        Command::Chapter {
            course,
            chapter,
            at,
        } => show_chapter(&mut catalog, &course, &chapter, at)?,
        Command::Stats { course } => {
            let (course, stats) = course_with_stats(&catalog, &course)?;
            println!(
                "\n{}  {}\n",
                style(&course.title).cyan().bold(),
                style(&course.id).dim()
            );
            println!(
                "{} {} | {} {}",
                style("Level:").dim(),
                stats.level,
                style("Duration:").dim(),
                stats.total_duration
            );
            print_completion_bar(&stats);
        }
        Command::Complete {
            course,
            chapter,
            undo,
        } => mark_chapter(&mut catalog, &course, &chapter, !undo).await?,
        Command::Reset => {
            let progress = catalog.progress_mut();
            let cleared = progress.state().completed_count();
            progress.state_mut().clear();
            progress.save().await?;
            println!(
                "{} Cleared {} completed chapters",
                style("✓").green().bold(),
                cleared
            );
        }
        Command::Export { path } => {
            save_fixture(catalog.all_courses(), &path).await?;
            println!(
                "{} {} {}",
                style("✓").green().bold(),
                style("Saved:").dim(),
                style(path.display()).cyan()
            );
        }
    }

    Ok(())
}

fn course_with_stats<'a>(
    catalog: &'a Catalog,
    course_id: &str,
) -> Result<(&'a Course, CourseStats)> {
    let course = catalog
        .course_by_id(course_id)
        .ok_or_else(|| anyhow!("Unknown course: {course_id}"))?;
    let stats = catalog
        .course_stats(course_id)
        .ok_or_else(|| anyhow!("Unknown course: {course_id}"))?;
    Ok((course, stats))
}

fn print_course_list(catalog: &Catalog, courses: &[&Course]) {
    if courses.is_empty() {
        println!("{}", style("No matching courses").dim());
        return;
    }
    for course in courses {
        let done = catalog
            .course_stats(&course.id)
            .map(|stats| stats.completion_percent())
            .unwrap_or(0);
        println!(
            "{} {}",
            format_course_line(course),
            style(format!("[{}%]", done)).dim()
        );
    }
}

fn show_chapter(
    catalog: &mut Catalog,
    course_id: &str,
    chapter_id: &str,
    at: Option<f64>,
) -> Result<()> {
    catalog
        .load_course(course_id)
        .ok_or_else(|| anyhow!("Unknown course: {course_id}"))?;
    let chapter = catalog
        .chapter(chapter_id)
        .ok_or_else(|| anyhow!("Unknown chapter {chapter_id} in course {course_id}"))?;

    println!("{}", format_chapter_readable(chapter));

    if let Some(seconds) = at {
        match chapter.entry_at(seconds) {
            Some(entry) => println!(
                "{} {} {}",
                style(format!("▶ [{}]", format_timestamp(entry.time)))
                    .yellow()
                    .bold(),
                entry.text,
                style(format!("(at {})", format_timestamp(seconds))).dim()
            ),
            None => println!("{}", style("▶ Nothing spoken yet").dim()),
        }
    }

    if let Some(prev) = catalog.previous_chapter(chapter_id) {
        println!("{} {} ({})", style("← Previous:").dim(), prev.title, prev.id);
    }
    if let Some(next) = catalog.next_chapter(chapter_id) {
        println!("{} {} ({})", style("→ Next:").dim(), next.title, next.id);
    }

    Ok(())
}

async fn mark_chapter(
    catalog: &mut Catalog,
    course_id: &str,
    chapter_id: &str,
    complete: bool,
) -> Result<()> {
    catalog
        .load_course(course_id)
        .ok_or_else(|| anyhow!("Unknown course: {course_id}"))?;
    let title = catalog
        .chapter(chapter_id)
        .map(|ch| ch.title.clone())
        .ok_or_else(|| anyhow!("Unknown chapter {chapter_id} in course {course_id}"))?;

    let progress = catalog.progress_mut();
    let changed = if complete {
        progress.state_mut().mark_complete(chapter_id)
    } else {
        progress.state_mut().mark_incomplete(chapter_id)
    };
    progress.save().await?;

    let verb = if complete { "complete" } else { "not complete" };
    let note = if changed { "" } else { " (unchanged)" };
    println!(
        "{} {} marked {}{}",
        style("✓").green().bold(),
        title,
        verb,
        style(note).dim()
    );

    if let Some(stats) = catalog.course_stats(course_id) {
        print_completion_bar(&stats);
    }
    Ok(())
}

/// Print the completion summary; the bar is only drawn on a terminal
fn print_completion_bar(stats: &CourseStats) {
    println!("{}", format_completion(stats));

    if Term::stdout().is_term() {
        let bar = ProgressBar::with_draw_target(
            Some(stats.total_chapters as u64),
            ProgressDrawTarget::stdout(),
        );
        bar.set_style(
            ProgressStyle::with_template("{bar:30.cyan/blue}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_position(stats.completed_chapters as u64);
        bar.abandon();
    }

    tracing::debug!(
        completed = stats.completed_chapters,
        total = stats.total_chapters,
        percent = stats.completion_percent(),
        "completion rendered"
    );
}
