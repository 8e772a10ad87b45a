// Market risk rating engine

pub mod curves;
pub mod engine;
pub mod scores;

pub use curves::*;
pub use engine::*;
pub use scores::*;

pub const MAX_RATING: u8 = 100;
