pub mod narrow;
pub mod sequence;
pub mod set;

pub use narrow::{Narrow, Tagged, ValueKind};
pub use sequence::SequenceExt;
pub use set::SetExt;
