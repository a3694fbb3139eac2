//! CLI library components for the `breastcan` binary.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
