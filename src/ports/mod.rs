//! Ports (trait boundaries) for external dependencies.
//!
//! The learning core owns these traits; storage adapters implement them.

pub mod repository;

pub use repository::TableRepository;
