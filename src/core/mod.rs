// Core algorithm exports
pub mod exclusions;
pub mod pairer;

pub use exclusions::ExclusionIndex;
pub use pairer::{Pairer, PairingError, SingletonPolicy};
