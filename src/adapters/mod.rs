//! Adapter implementations of the port traits.
//!
//! - `live`: real disk, process, terminal, and network I/O.
//! - `recording`: wraps another adapter and captures every interaction.
//! - `replaying`: serves interactions back from a cassette.

pub mod live;
pub mod recording;
pub mod replaying;
