use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Encoder service configuration
    pub encoder: EncoderConfig,

    /// Search configuration
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub default_top_k: usize,
    pub batch_size: usize,
    pub query_weights: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            encoder: EncoderConfig {
                base_url: "http://127.0.0.1:8080".to_string(),
                model: "sparta-msmarco-distilbert".to_string(),
                api_key: None,
            },
            search: SearchConfig {
                default_top_k: 100,
                batch_size: 16,
                query_weights: false,
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("ENCODER_BASE_URL") {
            config.encoder.base_url = base_url;
        }

        if let Ok(model) = std::env::var("ENCODER_MODEL") {
            config.encoder.model = model;
        }

        if let Ok(api_key) = std::env::var("ENCODER_API_KEY") {
            config.encoder.api_key = Some(api_key);
        }

        if let Ok(top_k) = std::env::var("DEFAULT_TOP_K") {
            config.search.default_top_k = top_k
                .parse()
                .map_err(|_| Error::Config(format!("Invalid DEFAULT_TOP_K: '{top_k}'")))?;
        }

        if let Ok(batch_size) = std::env::var("BATCH_SIZE") {
            config.search.batch_size = batch_size
                .parse()
                .map_err(|_| Error::Config(format!("Invalid BATCH_SIZE: '{batch_size}'")))?;
        }

        if let Ok(query_weights) = std::env::var("QUERY_WEIGHTS") {
            config.search.query_weights = matches!(query_weights.to_lowercase().as_str(), "1" | "true" | "yes");
        }

        if config.search.batch_size == 0 {
            return Err(Error::Config("BATCH_SIZE must be at least 1".to_string()));
        }

        Ok(config)
    }
}
