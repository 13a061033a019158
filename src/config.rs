use std::path::PathBuf;

/// Overrides the task file location when `--file` is not given.
pub const FILE_ENV: &str = "TASKER_FILE";

/// `tracing` filter directives for the binary, e.g. `tasker=debug`.
pub const LOG_ENV: &str = "TASKER_LOG";

pub const DEFAULT_FILE: &str = ".tasker/tasks.json";

pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
}

impl Config {
    /// Resolve from the command line first, then `TASKER_FILE`, then the default.
    pub fn resolve(cli_file: Option<PathBuf>) -> Self {
        Self::resolve_with(cli_file, std::env::var(FILE_ENV).ok())
    }

    fn resolve_with(cli_file: Option<PathBuf>, env_file: Option<String>) -> Self {
        let data_file = cli_file
            .or_else(|| env_file.filter(|s| !s.trim().is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE));
        Self { data_file }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_environment() {
        let cfg = Config::resolve_with(Some("a.json".into()), Some("b.json".into()));
        assert_eq!(cfg.data_file, PathBuf::from("a.json"));
    }

    #[test]
    fn environment_wins_over_default() {
        let cfg = Config::resolve_with(None, Some("b.json".into()));
        assert_eq!(cfg.data_file, PathBuf::from("b.json"));
    }

    #[test]
    fn blank_environment_falls_back_to_default() {
        let cfg = Config::resolve_with(None, Some("  ".into()));
        assert_eq!(cfg.data_file, PathBuf::from(DEFAULT_FILE));
        assert_eq!(Config::resolve_with(None, None).data_file, PathBuf::from(DEFAULT_FILE));
    }
}
