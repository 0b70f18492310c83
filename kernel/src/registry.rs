//! State registry: interns state values into dense, stable identifiers.
//!
//! Identifiers are allocated append-only in registration order and are never
//! reused, so they double as indices into per-state arenas (see
//! `orbit_search::space::SearchSpace`). Registration is idempotent: equal
//! values always map to the identifier of their first registration.

use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::hash::BuildHasher;

use crate::digest::{canonical_hash, ContentHash, DOMAIN_STATE_FINGERPRINT};
use crate::task::model::{OperatorId, Task};
use crate::values::StateValues;

/// Dense state identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(u32);

impl StateId {
    /// Position in registration order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Interning store for [`StateValues`].
#[derive(Debug, Clone)]
pub struct StateRegistry {
    states: Vec<StateValues>,
    /// Value hash to the identifiers carrying it. Values live only in
    /// `states`.
    index: HashMap<u64, Vec<StateId>>,
    hasher: RandomState,
    initial: StateId,
}

impl StateRegistry {
    /// Create a registry holding the task's initial state as `#0`.
    #[must_use]
    pub fn new(task: &Task) -> Self {
        let mut registry = Self {
            states: Vec::new(),
            index: HashMap::new(),
            hasher: RandomState::new(),
            initial: StateId(0),
        };
        registry.initial = registry.register_state(task.initial_state().clone());
        registry
    }

    /// Intern `values`, returning the existing identifier if an equal state
    /// was registered before.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` distinct states are registered.
    pub fn register_state(&mut self, values: StateValues) -> StateId {
        let hash = self.hasher.hash_one(&values);
        if let Some(id) = self.find_hashed(hash, &values) {
            return id;
        }
        let id = StateId(u32::try_from(self.states.len()).expect("state registry overflow"));
        self.states.push(values);
        self.index.entry(hash).or_default().push(id);
        id
    }

    /// Look up an identifier previously returned by this registry.
    #[must_use]
    pub fn lookup_state(&self, id: StateId) -> &StateValues {
        &self.states[id.index()]
    }

    /// Identifier of an already-registered state, without registering.
    #[must_use]
    pub fn find(&self, values: &StateValues) -> Option<StateId> {
        self.find_hashed(self.hasher.hash_one(values), values)
    }

    fn find_hashed(&self, hash: u64, values: &StateValues) -> Option<StateId> {
        self.index
            .get(&hash)?
            .iter()
            .copied()
            .find(|id| self.states[id.index()] == *values)
    }

    /// The literal initial state of the task.
    #[must_use]
    pub fn initial_state(&self) -> StateId {
        self.initial
    }

    /// Register and return the state reached by applying `op` in `id`.
    ///
    /// The successor is the raw result of the operator; no canonicalization
    /// is applied here.
    pub fn successor_state(&mut self, task: &Task, id: StateId, op: OperatorId) -> StateId {
        let next = task.apply(op, self.lookup_state(id));
        self.register_state(next)
    }

    /// True iff both identifiers denote states with the same values.
    #[must_use]
    pub fn same_values(&self, a: StateId, b: StateId) -> bool {
        a == b || self.lookup_state(a).same_values(self.lookup_state(b))
    }

    /// Content fingerprint of a registered state.
    #[must_use]
    pub fn fingerprint(&self, id: StateId) -> ContentHash {
        canonical_hash(
            DOMAIN_STATE_FINGERPRINT,
            &self.lookup_state(id).identity_bytes(),
        )
    }

    /// All registered identifiers in registration order.
    pub fn state_ids(&self) -> impl Iterator<Item = StateId> {
        (0..self.states.len()).map(|i| StateId(u32::try_from(i).unwrap_or(u32::MAX)))
    }

    /// Number of distinct registered states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Never true after construction (the initial state is always present).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
