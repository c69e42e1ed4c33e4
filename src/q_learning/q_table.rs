//! Action-value table for tabular Q-learning

use std::collections::{BTreeSet, HashMap};

use rand::Rng;
use serde::Serialize;

use crate::{
    Result,
    error::Error,
    identifiers::{ActionId, StateId},
    q_learning::config::Hyperparameters,
};

/// Q-table mapping (state, action) pairs to estimated action-values
///
/// The action set is fixed at construction. A pair that was never stored
/// reads as 0.0; selection and learning materialise the full row of every
/// state they touch so later lookups for that state hit stored entries.
#[derive(Debug, Clone)]
pub struct ActionValueTable {
    /// Q-values: (state, action) -> Q-value
    q_values: HashMap<(StateId, ActionId), f64>,
    /// Ordered action set
    actions: Vec<ActionId>,
    params: Hyperparameters,
}

/// Aggregate view of a table, used for inspection output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSummary {
    pub actions: Vec<String>,
    pub states: usize,
    pub entries: usize,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub mean_value: Option<f64>,
}

impl ActionValueTable {
    /// Create an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the action set is empty or
    /// contains duplicates, or if a hyperparameter is out of range.
    pub fn new(actions: Vec<ActionId>, params: Hyperparameters) -> Result<Self> {
        Self::from_parts(actions, params, HashMap::new())
    }

    pub(crate) fn from_parts(
        actions: Vec<ActionId>,
        params: Hyperparameters,
        q_values: HashMap<(StateId, ActionId), f64>,
    ) -> Result<Self> {
        params.validate()?;
        if actions.is_empty() {
            return Err(Error::invalid_config("action set must not be empty"));
        }
        let mut seen = BTreeSet::new();
        for action in &actions {
            if !seen.insert(action) {
                return Err(Error::invalid_config(format!(
                    "duplicate action '{action}' in action set"
                )));
            }
        }
        Ok(Self {
            q_values,
            actions,
            params,
        })
    }

    pub fn actions(&self) -> &[ActionId] {
        &self.actions
    }

    pub fn hyperparameters(&self) -> &Hyperparameters {
        &self.params
    }

    /// Get Q-value for a state-action pair, 0.0 when absent
    pub fn value(&self, state: &StateId, action: &ActionId) -> f64 {
        self.q_values
            .get(&(state.clone(), action.clone()))
            .copied()
            .unwrap_or(0.0)
    }

    /// Values for `state` in action order, 0.0 for missing entries.
    pub fn row(&self, state: &StateId) -> Vec<f64> {
        self.actions
            .iter()
            .map(|action| self.value(state, action))
            .collect()
    }

    /// Whether every action has a stored entry for `state`.
    pub fn has_full_row(&self, state: &StateId) -> bool {
        self.actions
            .iter()
            .all(|action| self.q_values.contains_key(&(state.clone(), action.clone())))
    }

    fn ensure_row(&mut self, state: &StateId) {
        for action in &self.actions {
            self.q_values
                .entry((state.clone(), action.clone()))
                .or_insert(0.0);
        }
    }

    /// Maximum Q-value over the action set in a state
    pub fn max_value(&self, state: &StateId) -> f64 {
        self.actions
            .iter()
            .map(|action| self.value(state, action))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Every action whose value equals the row maximum, in action order.
    ///
    /// When all values are equal this is the whole action set.
    fn maximal_actions(&self, state: &StateId) -> Vec<&ActionId> {
        let mut best = Vec::with_capacity(self.actions.len());
        let mut max = f64::NEG_INFINITY;
        for action in &self.actions {
            let value = self.value(state, action);
            if value > max {
                max = value;
                best.clear();
                best.push(action);
            } else if value == max {
                best.push(action);
            }
        }
        best
    }

    fn random_action<R: Rng + ?Sized>(&self, rng: &mut R) -> ActionId {
        self.actions[rng.random_range(0..self.actions.len())].clone()
    }

    /// ε-greedy action selection with uniform tie-breaking
    ///
    /// Materialises the row for `state` first. With `explore` set, a uniform
    /// random action is returned with probability ε. Otherwise the choice is
    /// uniform among the actions sharing the maximal value.
    pub fn choose_action<R: Rng + ?Sized>(
        &mut self,
        state: &StateId,
        explore: bool,
        rng: &mut R,
    ) -> ActionId {
        self.ensure_row(state);

        if explore && rng.random::<f64>() < self.params.epsilon {
            return self.random_action(rng);
        }

        let best = self.maximal_actions(state);
        if best.is_empty() {
            // only reachable with NaN entries
            return self.random_action(rng);
        }
        best[rng.random_range(0..best.len())].clone()
    }

    /// Like [`Self::choose_action`], also handing back a read-only view of
    /// the whole table.
    pub fn choose_action_with_table<R: Rng + ?Sized>(
        &mut self,
        state: &StateId,
        explore: bool,
        rng: &mut R,
    ) -> (ActionId, &Self) {
        let action = self.choose_action(state, explore, rng);
        (action, &*self)
    }

    /// Greedy action without side effects, first action on ties.
    ///
    /// Returns `None` for a state with no stored entries.
    pub fn best_action(&self, state: &StateId) -> Option<&ActionId> {
        if !self
            .actions
            .iter()
            .any(|action| self.q_values.contains_key(&(state.clone(), action.clone())))
        {
            return None;
        }
        self.maximal_actions(state).into_iter().next()
    }

    /// Q-learning update: off-policy one-step TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// Both rows are materialised before the update. The bootstrap term is
    /// the plain row maximum of `next_state`; ties need no random draw since
    /// every tied candidate has the same value. Returns the stored value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAction`] without touching the table if
    /// `action` is not in the action set, and [`Error::NonFiniteValue`] if
    /// the update overflows; the stored entry then keeps its old value.
    pub fn learn(
        &mut self,
        state: &StateId,
        action: &ActionId,
        reward: f64,
        next_state: &StateId,
    ) -> Result<f64> {
        if !self.actions.contains(action) {
            return Err(Error::UnknownAction {
                action: action.to_string(),
            });
        }

        self.ensure_row(state);
        self.ensure_row(next_state);

        let max_next_q = self.max_value(next_state);
        let key = (state.clone(), action.clone());
        let current_q = self.q_values.get(&key).copied().unwrap_or(0.0);
        let td_target = reward + self.params.gamma * max_next_q;
        let new_q = current_q + self.params.alpha * (td_target - current_q);
        if !new_q.is_finite() {
            return Err(Error::NonFiniteValue {
                state: state.to_string(),
                action: action.to_string(),
                value: new_q,
            });
        }
        self.q_values.insert(key, new_q);

        log::trace!("Q({state}, {action}): {current_q} -> {new_q} (reward {reward})");
        Ok(new_q)
    }

    /// Distinct states with at least one stored entry, sorted.
    pub fn states(&self) -> Vec<&StateId> {
        self.q_values
            .keys()
            .map(|(state, _)| state)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn state_count(&self) -> usize {
        self.states().len()
    }

    /// Get total number of Q-values stored
    pub fn len(&self) -> usize {
        self.q_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }

    /// Drop every stored value, keeping actions and hyperparameters.
    pub fn reset(&mut self) {
        self.q_values.clear();
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&StateId, &ActionId, f64)> {
        self.q_values
            .iter()
            .map(|((state, action), value)| (state, action, *value))
    }

    pub fn summary(&self) -> TableSummary {
        let values = || self.q_values.values().copied();
        let entries = self.q_values.len();
        let (min_value, max_value, mean_value) = if entries == 0 {
            (None, None, None)
        } else {
            (
                Some(values().fold(f64::INFINITY, f64::min)),
                Some(values().fold(f64::NEG_INFINITY, f64::max)),
                Some(values().sum::<f64>() / entries as f64),
            )
        };
        TableSummary {
            actions: self.actions.iter().map(ToString::to_string).collect(),
            states: self.state_count(),
            entries,
            min_value,
            max_value,
            mean_value,
        }
    }
}
