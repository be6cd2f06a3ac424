//! Application use cases. The three gateways, built on ports.

mod counters;
pub mod exchange_service;
pub mod feed_service;
pub mod placeholders;
mod rows;
pub mod teaming_service;

pub use exchange_service::ExchangeService;
pub use feed_service::FeedService;
pub use teaming_service::TeamingService;
