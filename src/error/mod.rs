mod config_error;
mod data_error;
mod engine_error;
mod wave_error;

pub use config_error::ConfigError;
pub use data_error::DataError;
pub use engine_error::EngineError;
pub use wave_error::WaveError;
