//! Library components of the `pbp` command.

pub mod logging;
pub mod summary;
