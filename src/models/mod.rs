//! Display models shared by views and console commands

pub mod history;

pub use history::HistoryRow;
