//! Core domain types and collaborator abstractions

pub mod config;
pub mod connectivity;
pub mod dialog;
pub mod log;
pub mod rate;
pub mod rates;
pub mod store;

// Re-export main types for cleaner imports
pub use connectivity::{ConnectionStatus, ConnectivityChecker};
pub use dialog::DialogService;
pub use rate::{LoadResult, LoadSource, Rate};
pub use rates::{ApiResponse, RateProvider};
pub use store::RateStore;
