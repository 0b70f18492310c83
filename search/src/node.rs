//! Per-state search records and the mutable view used to update them.
//!
//! # Status lifecycle
//!
//! ```text
//! NEW --open_initial/open--> OPEN --close--> CLOSED
//!                             ^                 |
//!                             +-----reopen------+
//! any --mark_as_dead_end--> DEAD_END (terminal)
//! ```
//!
//! Every transition not drawn above is an invariant violation and panics.
//! `update_parent` rewrites provenance and costs of an OPEN or CLOSED node
//! without changing its status.

use orbit_kernel::registry::StateId;
use orbit_kernel::task::cost::{adjusted_cost, CostType};
use orbit_kernel::task::model::{Operator, OperatorId};

/// Search status of one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeStatus {
    #[default]
    New,
    Open,
    Closed,
    DeadEnd,
}

impl NodeStatus {
    /// Stable uppercase name, used in dumps.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
            Self::DeadEnd => "DEAD_END",
        }
    }
}

/// Owned per-state record stored in the search space arena.
///
/// Invariant: `creating_operator.is_none()` iff `parent_state_id.is_none()`
/// iff this record belongs to the initial state (or has never been opened).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchNodeInfo {
    pub status: NodeStatus,
    /// Cost-so-far under the ranking cost type.
    pub g: i64,
    /// True cumulative operator cost.
    pub real_g: i64,
    pub parent_state_id: Option<StateId>,
    pub creating_operator: Option<OperatorId>,
}

/// Copy of the parent data needed to open or update a child.
///
/// Taking a snapshot first lets the caller release its borrow of the parent
/// record before borrowing the child record from the same arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeSnapshot {
    pub state_id: StateId,
    pub g: i64,
    pub real_g: i64,
}

/// Short-lived mutable view of one state's record.
#[derive(Debug)]
pub struct SearchNode<'a> {
    state_id: StateId,
    info: &'a mut SearchNodeInfo,
    cost_type: CostType,
}

impl<'a> SearchNode<'a> {
    pub(crate) fn new(state_id: StateId, info: &'a mut SearchNodeInfo, cost_type: CostType) -> Self {
        Self {
            state_id,
            info,
            cost_type,
        }
    }

    #[must_use]
    pub fn state_id(&self) -> StateId {
        self.state_id
    }

    #[must_use]
    pub fn status(&self) -> NodeStatus {
        self.info.status
    }

    #[must_use]
    pub fn is_new(&self) -> bool {
        self.info.status == NodeStatus::New
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.info.status == NodeStatus::Open
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.info.status == NodeStatus::Closed
    }

    #[must_use]
    pub fn is_dead_end(&self) -> bool {
        self.info.status == NodeStatus::DeadEnd
    }

    #[must_use]
    pub fn g(&self) -> i64 {
        debug_assert!(self.info.g >= 0);
        self.info.g
    }

    #[must_use]
    pub fn real_g(&self) -> i64 {
        self.info.real_g
    }

    #[must_use]
    pub fn parent_state_id(&self) -> Option<StateId> {
        self.info.parent_state_id
    }

    #[must_use]
    pub fn creating_operator(&self) -> Option<OperatorId> {
        self.info.creating_operator
    }

    #[must_use]
    pub fn snapshot(&self) -> NodeSnapshot {
        NodeSnapshot {
            state_id: self.state_id,
            g: self.info.g,
            real_g: self.info.real_g,
        }
    }

    /// The `g` this node would get through `parent` and `op`.
    #[must_use]
    pub fn g_via(&self, parent: NodeSnapshot, op: &Operator) -> i64 {
        parent.g.saturating_add(adjusted_cost(op, self.cost_type))
    }

    /// Open the initial state's node.
    ///
    /// # Panics
    ///
    /// Panics unless the node is NEW.
    pub fn open_initial(&mut self) {
        assert_eq!(
            self.info.status,
            NodeStatus::New,
            "open_initial on {} in status {}",
            self.state_id,
            self.info.status.as_str()
        );
        *self.info = SearchNodeInfo {
            status: NodeStatus::Open,
            ..SearchNodeInfo::default()
        };
    }

    /// Open a NEW node reached from `parent` by operator `op_id`.
    ///
    /// # Panics
    ///
    /// Panics unless the node is NEW.
    pub fn open(&mut self, parent: NodeSnapshot, op_id: OperatorId, op: &Operator) {
        assert_eq!(
            self.info.status,
            NodeStatus::New,
            "open on {} in status {}",
            self.state_id,
            self.info.status.as_str()
        );
        self.info.status = NodeStatus::Open;
        self.set_parent(parent, op_id, op);
    }

    /// Re-admit an OPEN or CLOSED node through a cheaper path.
    ///
    /// # Panics
    ///
    /// Panics unless the node is OPEN or CLOSED.
    pub fn reopen(&mut self, parent: NodeSnapshot, op_id: OperatorId, op: &Operator) {
        self.assert_reached("reopen");
        // CLOSED is allowed for inconsistent heuristics.
        self.info.status = NodeStatus::Open;
        self.set_parent(parent, op_id, op);
    }

    /// Like [`Self::reopen`], but keeps the current status.
    ///
    /// # Panics
    ///
    /// Panics unless the node is OPEN or CLOSED.
    pub fn update_parent(&mut self, parent: NodeSnapshot, op_id: OperatorId, op: &Operator) {
        self.assert_reached("update_parent");
        self.set_parent(parent, op_id, op);
    }

    /// # Panics
    ///
    /// Panics unless the node is OPEN.
    pub fn close(&mut self) {
        assert_eq!(
            self.info.status,
            NodeStatus::Open,
            "close on {} in status {}",
            self.state_id,
            self.info.status.as_str()
        );
        self.info.status = NodeStatus::Closed;
    }

    pub fn mark_as_dead_end(&mut self) {
        self.info.status = NodeStatus::DeadEnd;
    }

    fn assert_reached(&self, transition: &str) {
        assert!(
            matches!(self.info.status, NodeStatus::Open | NodeStatus::Closed),
            "{transition} on {} in status {}",
            self.state_id,
            self.info.status.as_str()
        );
    }

    fn set_parent(&mut self, parent: NodeSnapshot, op_id: OperatorId, op: &Operator) {
        self.info.g = parent.g.saturating_add(adjusted_cost(op, self.cost_type));
        self.info.real_g = parent.real_g.saturating_add(op.cost);
        self.info.parent_state_id = Some(parent.state_id);
        self.info.creating_operator = Some(op_id);
    }
}
