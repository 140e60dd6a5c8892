pub mod analytics;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod service;
pub mod storage;

pub use analytics::{Alert, AlertLevel, FairnessReport, MonthlyFinancials};
pub use error::FairsplitError;
pub use service::FairsplitService;
pub use storage::in_memory::InMemoryStorage;

#[cfg(test)]
mod tests;
