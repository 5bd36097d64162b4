// Model exports
pub mod domain;

pub use domain::{Member, Pair, PairingRound};
