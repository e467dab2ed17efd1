use std::fmt;

/// Everything the advisor library can fail with. Scoring itself never fails;
/// only the boundaries do (input files, config, the data dir, enrichment).
#[derive(Debug)]
pub enum AdvisorError {
    /// Input that is not JSON at all, or an enrichment reply with no usable array
    Parse(String),
    /// Unreadable TOML or values that fail `AdvisorConfig::validate`
    Config(String),
    /// Data dir could not be created, written or cleaned
    Storage(String),
    /// Enrichment backend failed or replied with nothing
    Ai(String),
    /// Reading quiz, metrics or config files
    Io(std::io::Error),
}

impl fmt::Display for AdvisorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdvisorError::Parse(msg) => write!(f, "parse error: {}", msg),
            AdvisorError::Config(msg) => write!(f, "config error: {}", msg),
            AdvisorError::Storage(msg) => write!(f, "storage error: {}", msg),
            AdvisorError::Ai(msg) => write!(f, "AI error: {}", msg),
            AdvisorError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for AdvisorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AdvisorError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AdvisorError {
    fn from(err: std::io::Error) -> Self {
        AdvisorError::Io(err)
    }
}

impl From<serde_json::Error> for AdvisorError {
    fn from(err: serde_json::Error) -> Self {
        AdvisorError::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for AdvisorError {
    fn from(err: toml::de::Error) -> Self {
        AdvisorError::Config(err.to_string())
    }
}
