use super::config_error::ConfigError;
use super::data_error::DataError;
use super::engine_error::EngineError;
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WaveError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
}
