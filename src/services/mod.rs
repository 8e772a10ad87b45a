pub mod market_rating_service;

pub use market_rating_service::*;
