//! CLI infrastructure for inspecting saved Q-tables
//!
//! The binary is glue around the library: it never trains, it only reads
//! snapshots written by a training loop and presents them.

pub mod commands;
pub mod output;
