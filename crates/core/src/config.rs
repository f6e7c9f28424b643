use std::path::{Path, PathBuf};

pub const CATALOG_ENV_VAR: &str = "HELIXCOURSE_CATALOG";
pub const PROGRESS_ENV_VAR: &str = "HELIXCOURSE_PROGRESS";
pub const LOG_ENV_VAR: &str = "RUST_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Where the catalog data comes from
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CatalogSource {
    #[default]
    Embedded,
    File(PathBuf),
}

impl CatalogSource {
    pub fn name(&self) -> String {
        match self {
            CatalogSource::Embedded => "embedded".to_string(),
            CatalogSource::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub catalog: CatalogSource,
    pub progress_path: PathBuf,
    pub log_filter: String,
}

impl Settings {
    /// Resolve settings from the process environment.
    /// Explicit values win over environment variables, which win over defaults.
    pub fn resolve(
        catalog: Option<PathBuf>,
        progress: Option<PathBuf>,
        log_filter: Option<String>,
    ) -> Self {
        Self::resolve_with(catalog, progress, log_filter, |key| std::env::var(key).ok())
    }

    pub fn resolve_with(
        catalog: Option<PathBuf>,
        progress: Option<PathBuf>,
        log_filter: Option<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let catalog = catalog
            .or_else(|| non_empty(CATALOG_ENV_VAR).map(PathBuf::from))
            .map(CatalogSource::File)
            .unwrap_or_default();
        let progress_path = progress
            .or_else(|| non_empty(PROGRESS_ENV_VAR).map(PathBuf::from))
            .unwrap_or_else(|| get_progress_path(&get_data_dir()));
        let log_filter = log_filter
            .or_else(|| non_empty(LOG_ENV_VAR))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            catalog,
            progress_path,
            log_filter,
        }
    }
}

pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("helixcourse")
}

/// Get the path of the progress file inside a data directory
pub fn get_progress_path(data_dir: &Path) -> PathBuf {
    data_dir.join("progress.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_flags_or_env() {
        let settings = Settings::resolve_with(None, None, None, env_of(&[]));
        assert_eq!(settings.catalog, CatalogSource::Embedded);
        assert_eq!(settings.progress_path, get_progress_path(&get_data_dir()));
        assert_eq!(settings.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn env_overrides_defaults() {
        let env = env_of(&[
            (CATALOG_ENV_VAR, "/srv/courses.json"),
            (PROGRESS_ENV_VAR, "/srv/progress.json"),
            (LOG_ENV_VAR, "debug"),
        ]);
        let settings = Settings::resolve_with(None, None, None, env);
        assert_eq!(
            settings.catalog,
            CatalogSource::File(PathBuf::from("/srv/courses.json"))
        );
        assert_eq!(settings.progress_path, PathBuf::from("/srv/progress.json"));
        assert_eq!(settings.log_filter, "debug");
    }

    #[test]
    fn flags_override_env() {
        let env = env_of(&[(CATALOG_ENV_VAR, "/srv/courses.json"), (LOG_ENV_VAR, "debug")]);
        let settings = Settings::resolve_with(
            Some(PathBuf::from("local.json")),
            Some(PathBuf::from("p.json")),
            Some("trace".into()),
            env,
        );
        assert_eq!(settings.catalog, CatalogSource::File(PathBuf::from("local.json")));
        assert_eq!(settings.progress_path, PathBuf::from("p.json"));
        assert_eq!(settings.log_filter, "trace");
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let settings =
            Settings::resolve_with(None, None, None, env_of(&[(CATALOG_ENV_VAR, "  ")]));
        assert_eq!(settings.catalog, CatalogSource::Embedded);
    }
}
