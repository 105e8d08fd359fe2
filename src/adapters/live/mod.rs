//! Live adapters for real external interactions.

pub mod clock;
pub mod fetcher;
pub mod filesystem;
pub mod shell;
pub mod terminal;
