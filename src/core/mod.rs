pub mod engine;
pub mod output;
pub mod pipeline;

pub use crate::domain::model::{FxOutput, Record};
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
