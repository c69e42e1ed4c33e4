//! Tabular Q-learning
//!
//! An [`ActionValueTable`] stores Q(s, a) for a fixed, ordered action set,
//! selects actions ε-greedily and refines its estimates with the one-step
//! Bellman update
//!
//! ```text
//! Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
//! ```
//!
//! [`QLearner`] pairs a table with a seedable random source and is what an
//! external training loop drives: `choose_action(state)` each step, then
//! `learn(prev_state, prev_action, reward, new_state)` once the environment
//! has answered.
//!
//! ## Usage Example
//!
//! ```no_run
//! use qlearn::identifiers::action_set;
//! use qlearn::q_learning::{Hyperparameters, QLearner};
//!
//! let mut agent = QLearner::new(
//!     action_set(["left", "forward", "right"]),
//!     Hyperparameters::new(
//!         0.1, // epsilon (exploration)
//!         0.2, // alpha (learning rate)
//!         0.8, // gamma (discount)
//!     ),
//! )?;
//! # Ok::<(), qlearn::Error>(())
//! ```

pub mod agent;
pub mod config;
pub mod q_table;
pub mod serialization;

// Public re-exports
pub use agent::QLearner;
pub use config::Hyperparameters;
pub use q_table::{ActionValueTable, TableSummary};
pub use serialization::{QEntry, SavedQTable};
