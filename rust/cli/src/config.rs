use serde::{Deserialize, Serialize};
use std::fs;
use tilematch_engine::highscore::DEFAULT_HIGHSCORE_FILE;
use tilematch_engine::scoring::ScoreRules;

/// Largest supported number of distinct symbols.
pub const MAX_PAIRS: u16 = 512;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub pairs: u16,
    pub cols: u16,
    pub seed: Option<u64>,
    pub highscore_file: String,
    pub try_penalty: u32,
    pub seconds_per_point: u64,
}

impl Config {
    pub fn score_rules(&self) -> ScoreRules {
        ScoreRules {
            try_penalty: self.try_penalty,
            seconds_per_point: self.seconds_per_point,
            ..ScoreRules::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub pairs: ValueSource,
    pub cols: ValueSource,
    pub seed: ValueSource,
    pub highscore_file: ValueSource,
    pub try_penalty: ValueSource,
    pub seconds_per_point: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            pairs: ValueSource::Default,
            cols: ValueSource::Default,
            seed: ValueSource::Default,
            highscore_file: ValueSource::Default,
            try_penalty: ValueSource::Default,
            seconds_per_point: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        let rules = ScoreRules::default();
        Self {
            pairs: 8,
            cols: 4,
            seed: None,
            highscore_file: DEFAULT_HIGHSCORE_FILE.into(),
            try_penalty: rules.try_penalty,
            seconds_per_point: rules.seconds_per_point,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Resolves configuration from defaults, the `TILEMATCH_CONFIG` TOML file,
/// and `TILEMATCH_*` environment variables, in increasing precedence.
pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("TILEMATCH_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.pairs {
            cfg.pairs = v;
            sources.pairs = ValueSource::File;
        }
        if let Some(v) = f.cols {
            cfg.cols = v;
            sources.cols = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.highscore_file {
            cfg.highscore_file = v;
            sources.highscore_file = ValueSource::File;
        }
        if let Some(v) = f.try_penalty {
            cfg.try_penalty = v;
            sources.try_penalty = ValueSource::File;
        }
        if let Some(v) = f.seconds_per_point {
            cfg.seconds_per_point = v;
            sources.seconds_per_point = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("TILEMATCH_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(pairs) = std::env::var("TILEMATCH_PAIRS")
        && !pairs.is_empty()
    {
        cfg.pairs = pairs
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid pairs".into()))?;
        sources.pairs = ValueSource::Env;
    }
    if let Ok(file) = std::env::var("TILEMATCH_HIGHSCORE_FILE")
        && !file.is_empty()
    {
        cfg.highscore_file = file;
        sources.highscore_file = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    pairs: Option<u16>,
    #[serde(default)]
    cols: Option<u16>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    highscore_file: Option<String>,
    #[serde(default)]
    try_penalty: Option<u32>,
    #[serde(default)]
    seconds_per_point: Option<u64>,
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    validate_pairs(cfg.pairs)?;
    if cfg.cols == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: cols must be >=1".into(),
        ));
    }
    if cfg.highscore_file.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: highscore_file must not be empty".into(),
        ));
    }
    Ok(())
}

pub fn validate_pairs(pairs: u16) -> Result<(), ConfigError> {
    if !(2..=MAX_PAIRS).contains(&pairs) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: pairs must be between 2 and {}",
            MAX_PAIRS
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = Config::default();
        assert!(validate(&cfg).is_ok());
        assert_eq!(cfg.score_rules(), ScoreRules::default());
    }

    #[test]
    fn pairs_bounds_are_enforced() {
        assert!(validate_pairs(1).is_err());
        assert!(validate_pairs(2).is_ok());
        assert!(validate_pairs(MAX_PAIRS).is_ok());
        assert!(validate_pairs(MAX_PAIRS + 1).is_err());
    }

    #[test]
    fn zero_cols_is_invalid() {
        let cfg = Config {
            cols: 0,
            ..Config::default()
        };
        assert!(matches!(validate(&cfg), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn file_config_rejects_unknown_keys() {
        let parsed: Result<FileConfig, _> = toml::from_str("pairs = 4\nlevel = 3\n");
        assert!(parsed.is_err());
    }
}
