pub mod app_config;
pub mod config;
pub mod incidents;
pub mod locations;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use incidents::{ExtractionResult, IncidentDraft, LocationMatch};
pub use locations::{
    load_location_catalog, Location, LocationUpdate, LocationsFile, NewLocation,
    DEFAULT_STUB_PLACEHOLDER,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read location catalog {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse location catalog: {0}")]
    CatalogFileParse(#[source] serde_yaml::Error),

    #[error("invalid location catalog: {0}")]
    Validation(String),
}
