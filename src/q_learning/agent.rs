//! Q-learning agent driving an action-value table
//!
//! The agent owns the table together with its random source and exposes the
//! step API an external training loop calls: pick an action for the current
//! state, act in the environment, then report the transition back.

use std::path::Path;

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    Result,
    error::Error,
    identifiers::{ActionId, StateId},
    ports::TableRepository,
    q_learning::{config::Hyperparameters, q_table::ActionValueTable},
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Q-learning agent (off-policy TD control)
///
/// # Examples
///
/// ```
/// use qlearn::identifiers::action_set;
/// use qlearn::q_learning::{Hyperparameters, QLearner};
///
/// let mut agent = QLearner::new(
///     action_set(["L", "R"]),
///     Hyperparameters::new(0.0, 0.5, 0.9),
/// )?
/// .with_seed(7);
///
/// let state = "s1".into();
/// let action = agent.choose_action(&state);
/// agent.learn(&state, &action, 10.0, &"s2".into())?;
/// assert_eq!(agent.value(&state, &action), 5.0);
/// # Ok::<(), qlearn::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct QLearner {
    table: ActionValueTable,
    rng: StdRng,
}

impl QLearner {
    /// Create an agent with an empty table.
    ///
    /// Uses `params.seed` for the random source when set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for an empty or duplicated
    /// action set or out-of-range hyperparameters.
    pub fn new(actions: Vec<ActionId>, params: Hyperparameters) -> Result<Self> {
        let table = ActionValueTable::new(actions, params)?;
        Ok(Self::from_table(table))
    }

    /// Wrap an existing table, e.g. one rebuilt from a snapshot.
    pub fn from_table(table: ActionValueTable) -> Self {
        let rng = build_rng(table.hyperparameters().seed);
        Self { table, rng }
    }

    /// Reseed the random source.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn table(&self) -> &ActionValueTable {
        &self.table
    }

    pub fn value(&self, state: &StateId, action: &ActionId) -> f64 {
        self.table.value(state, action)
    }

    /// ε-greedy selection with exploration enabled
    pub fn choose_action(&mut self, state: &StateId) -> ActionId {
        self.table.choose_action(state, true, &mut self.rng)
    }

    /// Greedy selection: exploration disabled, ties still broken at random
    pub fn choose_action_greedy(&mut self, state: &StateId) -> ActionId {
        self.table.choose_action(state, false, &mut self.rng)
    }

    /// Selection that also returns a read-only view of the table
    pub fn choose_action_with_table(
        &mut self,
        state: &StateId,
        explore: bool,
    ) -> (ActionId, &ActionValueTable) {
        self.table
            .choose_action_with_table(state, explore, &mut self.rng)
    }

    /// One-step Bellman update for an observed transition
    pub fn learn(
        &mut self,
        state: &StateId,
        action: &ActionId,
        reward: f64,
        next_state: &StateId,
    ) -> Result<f64> {
        self.table.learn(state, action, reward, next_state)
    }

    /// Persist the table through `repo`.
    ///
    /// A failure is logged and returned; the in-memory table is unaffected
    /// so training can carry on.
    pub fn save<R: TableRepository + ?Sized>(&self, repo: &R, base: &Path) -> Result<()> {
        repo.save(&self.table, base).inspect_err(|e| {
            log::warn!("Could not save Q-table to {}: {e}", base.display());
        })
    }

    /// Replace the table with the snapshot stored at `base`.
    ///
    /// On success returns the number of loaded entries. On any failure
    /// (missing file, corrupt data, different action set) the table is left
    /// empty, a warning is logged and the error is returned for the caller
    /// to surface or ignore.
    pub fn load<R: TableRepository + ?Sized>(&mut self, repo: &R, base: &Path) -> Result<usize> {
        match self.try_load(repo, base) {
            Ok(table) => {
                self.table = table;
                log::debug!(
                    "Restored {} entries over {} states from {}",
                    self.table.len(),
                    self.table.state_count(),
                    base.display()
                );
                Ok(self.table.len())
            }
            Err(e) => {
                log::warn!(
                    "Could not load Q-table from {}, starting empty: {e}",
                    base.display()
                );
                self.table.reset();
                Err(e)
            }
        }
    }

    fn try_load<R: TableRepository + ?Sized>(
        &self,
        repo: &R,
        base: &Path,
    ) -> Result<ActionValueTable> {
        let snapshot = repo.load(base)?;
        if snapshot.actions != self.table.actions() {
            return Err(Error::ActionSetMismatch {
                expected: self.table.actions().iter().map(ToString::to_string).collect(),
                found: snapshot.actions.iter().map(ToString::to_string).collect(),
            });
        }
        snapshot.into_table(*self.table.hyperparameters())
    }
}
