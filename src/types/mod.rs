mod config;
mod window;

pub use config::{DataConfig, EngineConfig, PipelineConfig, TrainingConfig};
pub use window::{LabeledWindows, PartitionSet, WindowParams, WindowSpec};
