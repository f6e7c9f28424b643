use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::{error::Result, types::Course};

/// Catalog shipped with the library
pub const EMBEDDED_CATALOG: &str = include_str!("../data/courses.json");

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogFixture {
    pub courses: Vec<Course>,
}

/// Parse a catalog document of the form `{ "courses": [...] }`
pub fn parse_fixture(json: &str) -> Result<Vec<Course>> {
    let fixture: CatalogFixture = serde_json::from_str(json)?;
    Ok(fixture.courses)
}

/// Courses from the embedded catalog document
pub fn embedded_courses() -> Result<Vec<Course>> {
    parse_fixture(EMBEDDED_CATALOG)
}

/// Load a catalog document from disk
pub async fn load_fixture(path: &Path) -> Result<Vec<Course>> {
    let json_content = fs::read_to_string(path).await?;
    let courses = parse_fixture(&json_content)?;
    tracing::debug!(path = %path.display(), courses = courses.len(), "fixture loaded");
    Ok(courses)
}

/// Write courses as a pretty-printed catalog document
pub async fn save_fixture<'a>(
    courses: impl IntoIterator<Item = &'a Course>,
    path: &Path,
) -> Result<()> {
    let fixture = CatalogFixture {
        courses: courses.into_iter().cloned().collect(),
    };
    let json = serde_json::to_string_pretty(&fixture)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, json).await?;
    tracing::debug!(path = %path.display(), courses = fixture.courses.len(), "fixture saved");
    Ok(())
}
