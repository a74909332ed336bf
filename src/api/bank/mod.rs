pub mod client;
pub mod models;
pub mod transport;

pub use client::BankClient;
pub use models::{ApiError, HistoryEntry, Role};
