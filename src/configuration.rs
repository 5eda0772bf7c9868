use crate::errors::ConfigurationError;
use config::{Config, FileFormat};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use std::env::var;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use url::Url;

pub const DEFAULT_COLLECTION: &str = "contact_requests_port";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Settings {
    pub application: Application,
    pub store: StoreSettings,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Application {
    pub host: String,
    pub port: u16,
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StoreSettings {
    #[serde_as(as = "DisplayFromStr")]
    pub store_type: StoreType,
    pub url: Option<String>,
    pub service_key: Option<String>,
    #[serde(default = "default_collection")]
    pub collection: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            store_type: StoreType::InMemory,
            url: None,
            service_key: None,
            collection: default_collection(),
        }
    }
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreType {
    #[default]
    InMemory,
    Remote,
}

impl Display for StoreType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreType::InMemory => write!(f, "in_memory"),
            StoreType::Remote => write!(f, "remote"),
        }
    }
}

impl FromStr for StoreType {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "remote" => Ok(StoreType::Remote),
            "in_memory" => Ok(StoreType::InMemory),
            &_ => Err(ConfigurationError::UnknownStoreType),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl StoreSettings {
    pub fn check_if_valid(&self) -> Result<(), ConfigurationError> {
        if self.collection.trim().is_empty() {
            return Err(ConfigurationError::MissingCollection);
        }
        match self.store_type {
            StoreType::InMemory => Ok(()),
            StoreType::Remote => {
                let (Some(url), Some(_)) = (non_empty(&self.url), non_empty(&self.service_key))
                else {
                    return Err(ConfigurationError::MissingStoreSettings);
                };
                Url::from_str(url)?;
                Ok(())
            }
        }
    }

    pub fn url_unchecked(&self) -> Result<Url, ConfigurationError> {
        let url = non_empty(&self.url).ok_or(ConfigurationError::MissingStoreSettings)?;
        Ok(Url::from_str(url)?)
    }

    pub fn service_key_unchecked(&self) -> String {
        non_empty(&self.service_key).unwrap_or_default().to_string()
    }
}

/// The possible runtime environment for our application.
#[derive(Debug, Eq, PartialEq)]
pub enum Environment {
    Dev,
    Prod,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            other => Err(format!(
                "{other} is not a supported environment. Use either `dev` or `prod`."
            )),
        }
    }
}

pub fn get_env() -> Result<Environment, config::ConfigError> {
    var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "dev".into())
        .try_into()
        .map_err(config::ConfigError::Message)
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let environment = get_env()?;
    let second_source = format!("configuration/{}", environment.as_str());
    let store_url = var("SUPABASE_URL")
        .or_else(|_| var("NEXT_PUBLIC_SUPABASE_URL"))
        .ok();
    let service_key = var("SUPABASE_SERVICE_ROLE_KEY").ok();
    let settings = Config::builder()
        .add_source(config::File::new("configuration/base", FileFormat::Yaml))
        .add_source(config::File::new(&second_source, FileFormat::Yaml).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .set_override_option("store.url", store_url)?
        .set_override_option("store.service_key", service_key)?
        .build()?;
    settings.try_deserialize::<Settings>()
}
