use crate::validation::parse_first_mover;
use jukugo_ai::Difficulty;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub difficulty: String,
    pub first: String,
    pub seed: Option<u64>,
    pub dictionary: Option<String>,
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
    pub difficulty: ValueSource,
    pub first: ValueSource,
    pub seed: ValueSource,
    pub dictionary: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            difficulty: ValueSource::Default,
            first: ValueSource::Default,
            seed: ValueSource::Default,
            dictionary: ValueSource::Default,
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
        Self {
            difficulty: "normal".into(),
            first: "human".into(),
            seed: None,
            dictionary: None,
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

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("JUKUGO_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.difficulty {
            cfg.difficulty = v;
            sources.difficulty = ValueSource::File;
        }
        if let Some(v) = f.first {
            cfg.first = v;
            sources.first = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.dictionary {
            cfg.dictionary = Some(v);
            sources.dictionary = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("JUKUGO_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed: {}", seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(difficulty) = std::env::var("JUKUGO_DIFFICULTY")
        && !difficulty.is_empty()
    {
        cfg.difficulty = difficulty;
        sources.difficulty = ValueSource::Env;
    }
    if let Ok(first) = std::env::var("JUKUGO_FIRST")
        && !first.is_empty()
    {
        cfg.first = first;
        sources.first = ValueSource::Env;
    }
    if let Ok(dict) = std::env::var("JUKUGO_DICTIONARY")
        && !dict.is_empty()
    {
        cfg.dictionary = Some(dict);
        sources.dictionary = ValueSource::Env;
    }

    validate(&mut cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    first: Option<String>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    dictionary: Option<String>,
}

fn validate(cfg: &mut Config) -> Result<(), ConfigError> {
    let difficulty: Difficulty = cfg.difficulty.parse().map_err(|_| {
        ConfigError::Invalid(format!(
            "Invalid configuration: unknown difficulty '{}'",
            cfg.difficulty
        ))
    })?;
    cfg.difficulty = difficulty.name().to_string();

    let first = parse_first_mover(&cfg.first).map_err(|e| {
        ConfigError::Invalid(format!(
            "Invalid configuration: first must be human or computer ({})",
            e
        ))
    })?;
    cfg.first = first.as_str().to_string();
    Ok(())
}
