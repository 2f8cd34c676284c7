use std::{path::PathBuf, str::FromStr, time::Duration};

use serde::Deserialize;
use serde_with::serde_as;
use strum::{Display, EnumString};
use url::Url;

use crate::domain::search::{IndexCredentials, ModelSpec, SearchConfig, SearchError};

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub elasticsearch: ElasticsearchSettings,
    pub embedding: EmbeddingSettings,
    #[serde(default)]
    pub search: SearchConfig,
}

#[serde_as]
#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    pub static_dir: PathBuf,
}

#[serde_as]
#[derive(Deserialize, Clone)]
pub struct ElasticsearchSettings {
    pub url: Url,
    pub index: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub timeout_secs: u64,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ElasticsearchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Basic auth is only used when a username is configured.
    pub fn credentials(&self) -> Option<IndexCredentials> {
        self.username.as_ref().map(|username| IndexCredentials {
            username: username.clone(),
            password: self.password.clone().unwrap_or_default(),
        })
    }
}

#[serde_as]
#[derive(Deserialize, Clone)]
pub struct EmbeddingSettings {
    pub url: Url,
    pub model: String,
    pub pretrained: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub timeout_secs: u64,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub cache_capacity: u64,
}

impl EmbeddingSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn model_spec(&self) -> Result<ModelSpec, SearchError> {
        ModelSpec::new(&self.model, &self.pretrained)
    }
}

pub fn read_config() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("no current directory: {e}")))?;
    let config_directory = base_path.join("config");

    let environment = Environment::from_str(
        std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .as_str(),
    )
    .map_err(|e| config::ConfigError::Message(format!("Failed to parse APP_ENVIRONMENT: {e}")))?;
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(config::File::from(
            config_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("GIFCITIES")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Display, Debug, EnumString)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}
