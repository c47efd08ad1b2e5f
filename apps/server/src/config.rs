use reply_classifier::config::parse_temperature;
use reply_classifier::hub::DEFAULT_MODEL_ID;
use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub checkpoint_dir: PathBuf,
    pub temperature: f32,
    pub model_id: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?;

        let checkpoint_dir: PathBuf = env::var("CHECKPOINT_DIR")
            .unwrap_or_else(|_| "bert_out".to_string())
            .into();

        // Bad temperature strings recover locally, they are never fatal.
        let temperature = parse_temperature(env::var("TEMPERATURE").ok().as_deref());

        let model_id = env::var("MODEL_ID").unwrap_or_else(|_| DEFAULT_MODEL_ID.to_string());

        Ok(Config {
            port,
            checkpoint_dir,
            temperature,
            model_id,
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(var) => write!(f, "Invalid value for: {}", var),
        }
    }
}

impl std::error::Error for ConfigError {}
