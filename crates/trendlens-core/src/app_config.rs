use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-level settings, loaded once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// YAML file with scoring overrides. A missing file means built-in defaults.
    pub scoring_path: PathBuf,
    /// Default `n` for top-trending selection.
    pub top_limit: usize,
    /// How many items `get_content_summary` reports as top trending.
    pub summary_top_limit: usize,
    /// Default number of hashtag topics returned by topic ranking.
    pub topic_limit: usize,
}
