use serde::Serialize;

use super::NodeId;

/// One directed arc of the residual graph.
///
/// Edges are always created in pairs: a forward edge carrying the requested
/// capacity and a reverse edge starting at zero. `reverse` is the position of
/// the partner inside `adjacency[to]`, so the pair can be updated without any
/// pointer between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Edge {
    pub(crate) to: NodeId,
    /// Residual capacity, mutated by the solver.
    pub(crate) capacity: i64,
    /// Capacity at creation time. Zero for reverse edges.
    pub(crate) initial_capacity: i64,
    pub(crate) reverse: usize,
}

impl Edge {
    pub(crate) const fn forward(to: NodeId, capacity: i64, reverse: usize) -> Self {
        Self {
            to,
            capacity,
            initial_capacity: capacity,
            reverse,
        }
    }

    pub(crate) const fn residual(to: NodeId, reverse: usize) -> Self {
        Self {
            to,
            capacity: 0,
            initial_capacity: 0,
            reverse,
        }
    }

    /// `true` for synthetic reverse edges (and zero-capacity forward edges,
    /// which can never carry flow of their own).
    pub(crate) const fn is_residual(&self) -> bool {
        self.initial_capacity == 0
    }

    /// Flow currently pushed through this edge.
    ///
    /// Only meaningful for non-residual edges; a reverse edge reports the
    /// negated flow of its partner.
    pub(crate) const fn flow(&self) -> i64 {
        self.initial_capacity - self.capacity
    }
}

/// Read-only snapshot of a real (non-residual) edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EdgeView {
    pub from: NodeId,
    pub to: NodeId,
    pub capacity: i64,
    pub flow: i64,
}
