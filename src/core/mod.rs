pub mod filter;
pub mod format;
pub mod library;
