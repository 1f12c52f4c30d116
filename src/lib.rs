pub mod config;
pub mod core;
pub mod domain;
pub mod functional;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::cli::LocalStorage;
pub use config::toml_config::FxConfig;
pub use self::core::{engine::FxEngine, pipeline::RecordPipeline};
pub use functional::{Narrow, SequenceExt, SetExt, Tagged, ValueKind};
pub use utils::error::{FxError, Result};
