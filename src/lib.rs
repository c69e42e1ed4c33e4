//! Tabular Q-learning core
//!
//! This crate provides:
//! - An action-value table with ε-greedy selection and Bellman updates
//! - A seedable agent wrapper exposing the per-step training API
//! - Snapshot persistence (MessagePack) behind a repository port
//! - CSV export of learned values for inspection

pub mod adapters;
pub mod cli;
pub mod error;
pub mod export;
pub mod identifiers;
pub mod logging;
pub mod ports;
pub mod q_learning;

pub use error::{Error, Result};
pub use identifiers::{ActionId, StateId};
pub use q_learning::{ActionValueTable, Hyperparameters, QLearner};
