use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::store::UpdateMode;

#[derive(Deserialize, Debug)]
pub struct Settings{
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub jwt: JWTSettings
}

#[derive(Deserialize, Debug)]
pub struct ApplicationSettings{
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub update_mode: UpdateMode
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend{
    Mongo,
    Memory
}

#[derive(Deserialize, Debug)]
pub struct DatabaseSettings{
    pub backend: StoreBackend,
    pub uri: secrecy::SecretString,
    pub name: String,
    pub timeout_secs: u64
}

impl DatabaseSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Deserialize, Debug)]
pub struct JWTSettings{
    pub secret: secrecy::SecretString,
    pub access_expiry_hours: u64,
    pub refresh_expiry_hours: u64
}

impl Settings{
    // base.yaml first, then APP_DATABASE__NAME style overrides
    pub fn get() -> Result<Self, ConfigError>{
        Config::builder()
            .add_source(File::with_name("configuration/base.yaml"))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
            )
            .build()?
            .try_deserialize::<Settings>()
    }
}
