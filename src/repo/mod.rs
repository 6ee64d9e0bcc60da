/// Repository module
///
/// This module is the application's view of the document store. Every
/// function performs exactly one logical store operation on a pooled
/// connection, off the async runtime, and reports failures as a
/// `StoreError` category.
///
/// Lookups and identifier-addressed updates return `Option<T>`: `None` means
/// the identifier was well-formed but matched nothing.

mod user_repo;
mod card_repo;

// Re-export all repository functions
pub use user_repo::*;
pub use card_repo::*;
