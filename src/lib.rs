pub mod config;
pub mod models;
pub mod risk;
pub mod services;
pub mod utils;
pub mod error;

pub use crate::config::{load_config_from_env, merge_config};
pub use error::types::*;
pub use models::{CuratorConfig, CuratorConfigOverrides, MarketMetrics, MarketState};
pub use risk::compute_metrics_for_market;
pub use utils::math::normalize01;
