pub mod card;
pub mod errors;
pub mod page;
pub mod table;

pub use card::{AlertKind, Card};
pub use errors::extract_error_message;
pub use page::Page;
pub use table::Table;

/// Mask a secret for display, one bullet per character
pub fn mask(secret: &str) -> String {
    "•".repeat(secret.chars().count())
}
