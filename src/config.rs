use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Runtime configuration loaded from the environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    /// Filter directive installed when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // .env is optional

        let db_path = match std::env::var("PREP_DB") {
            Ok(path) if !path.trim().is_empty() => expand_home(path.trim()),
            _ => default_db_path(),
        };

        let log_level = std::env::var("PREP_LOG").unwrap_or_else(|_| "warn".to_string());
        let log_filter = filter_directive(log_level.trim());
        EnvFilter::try_new(&log_filter)
            .with_context(|| format!("PREP_LOG must be a valid log filter, got '{log_level}'"))?;

        Ok(Config { db_path, log_filter })
    }

    /// Installs the stderr tracing subscriber. `RUST_LOG` wins over `PREP_LOG`.
    pub fn init_logging(&self) {
        tracing_subscriber::registry()
            .with(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(&self.log_filter)),
            )
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// A bare level applies to this crate only; full directives pass through unchanged.
fn filter_directive(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("{}={}", env!("CARGO_PKG_NAME"), level)
    }
}

fn default_db_path() -> PathBuf {
    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "prep") {
        proj_dirs.data_dir().join("prep.db")
    } else {
        PathBuf::from("prep.db")
    }
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(dirs) = directories::BaseDirs::new() {
            return dirs.home_dir().join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home_leaves_absolute_paths() {
        assert_eq!(expand_home("/tmp/prep.db"), PathBuf::from("/tmp/prep.db"));
    }

    #[test]
    fn test_expand_home_resolves_tilde() {
        let expanded = expand_home("~/prep.db");
        assert!(expanded.ends_with("prep.db"));
        if directories::BaseDirs::new().is_some() {
            assert!(!expanded.to_string_lossy().starts_with('~'));
        }
    }

    #[test]
    fn test_bare_level_is_scoped_to_crate() {
        assert_eq!(filter_directive("debug"), "prep=debug");
        assert!(EnvFilter::try_new(filter_directive("debug")).is_ok());
    }

    #[test]
    fn test_full_directive_passes_through() {
        assert_eq!(filter_directive("prep=debug"), "prep=debug");
        assert_eq!(filter_directive("prep=info,rusqlite=warn"), "prep=info,rusqlite=warn");
    }

    #[test]
    fn test_default_db_path_file_name() {
        assert_eq!(default_db_path().file_name().unwrap(), "prep.db");
    }
}
