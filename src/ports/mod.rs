//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the rule tooling and an
//! external system (time, filesystem, shell, terminal, network).
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod fetcher;
pub mod filesystem;
pub mod shell;
pub mod terminal;

pub use clock::Clock;
pub use fetcher::{FetchFuture, Fetcher};
pub use filesystem::FileSystem;
pub use shell::{ShellExecutor, ShellOutput};
pub use terminal::Terminal;
