//! Domain models for the disease prediction engine

mod crop;
mod disease;
mod prediction;
mod risk;
mod weather;

pub use crop::*;
pub use disease::*;
pub use prediction::*;
pub use risk::*;
pub use weather::*;
