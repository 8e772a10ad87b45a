pub mod market_state;
pub mod market_metrics;
pub mod curator_config;

pub use market_state::*;
pub use market_metrics::*;
pub use curator_config::*;
