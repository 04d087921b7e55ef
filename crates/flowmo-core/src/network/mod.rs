//! Residual flow network.
//!
//! # Overview
//!
//! Nodes are dense, zero-based indices handed out in creation order. Each
//! node owns a flat list of outgoing [`Edge`]s. Adding an edge `u → v`
//! appends a forward edge to `u`'s list and a zero-capacity reverse edge to
//! `v`'s list; each records the other's position so flow can be cancelled
//! without any shared references.
//!
//! ## Invariants
//!
//! - For every pair `(e, e′)`: `e.capacity + e′.capacity ==
//!   e.initial_capacity + e′.initial_capacity`.
//! - An edge is a synthetic residual edge iff `initial_capacity == 0`.
//! - Topology is append-only; only residual capacities change, and only
//!   inside [`Network::max_flow`] or [`Network::reset_flow`].
//!
//! ## Repeated computations
//!
//! [`Network::max_flow`] mutates residual capacities in place. Calling it
//! again without [`Network::reset_flow`] returns the *additional* flow that
//! the remaining residual capacity allows, which is usually zero.

mod dinic;
mod edge;
mod stats;

use std::collections::VecDeque;

use tracing::instrument;

use crate::error::{FlowError, NodeRole, Result};

pub(crate) use edge::Edge;
pub use edge::EdgeView;
pub use stats::NodeStats;

/// Dense node index.
pub type NodeId = usize;

/// A directed, capacitated graph stored as a residual adjacency arena.
#[derive(Debug, Clone, Default)]
pub struct Network {
    adjacency: Vec<Vec<Edge>>,
    /// Sum of initial capacities leaving each node.
    outgoing_capacity: Vec<i64>,
    /// Sum of initial capacities entering each node.
    incoming_capacity: Vec<i64>,
    edge_count: usize,
}

impl Network {
    /// Create an empty network.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and return its index.
    pub fn add_node(&mut self) -> NodeId {
        self.adjacency.push(Vec::new());
        self.outgoing_capacity.push(0);
        self.incoming_capacity.push(0);
        self.adjacency.len() - 1
    }

    /// Insert a forward edge `from → to` and its zero-capacity reverse.
    ///
    /// Parallel edges stay independent pairs. Self-loops are accepted; they
    /// never carry flow.
    ///
    /// # Errors
    ///
    /// - [`FlowError::NegativeCapacity`] if `capacity < 0`.
    /// - [`FlowError::NodeOutOfRange`] if either endpoint does not exist.
    /// - [`FlowError::CapacityOverflow`] if the combined incoming and
    ///   outgoing capacity of `from` or `to` would exceed `i64::MAX`.
    ///
    /// On error the network is unchanged.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, capacity: i64) -> Result<()> {
        if capacity < 0 {
            return Err(FlowError::NegativeCapacity { capacity });
        }
        self.check_node(from, NodeRole::From)?;
        self.check_node(to, NodeRole::To)?;

        self.check_edge_capacity(from, to, capacity)?;

        let forward_index = self.adjacency[from].len();
        // For a self-loop the reverse edge lands right after the forward one.
        let reverse_index = if from == to {
            forward_index + 1
        } else {
            self.adjacency[to].len()
        };

        self.adjacency[from].push(Edge::forward(to, capacity, reverse_index));
        self.adjacency[to].push(Edge::residual(from, forward_index));
        self.outgoing_capacity[from] += capacity;
        self.incoming_capacity[to] += capacity;
        self.edge_count += 1;

        Ok(())
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of `add_edge` calls that succeeded (reverse edges not counted).
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Compute the maximum flow from `source` to `sink` with Dinic's
    /// algorithm, leaving one maximum-flow assignment in the residual
    /// capacities.
    ///
    /// Returns `0` without touching the network when `source == sink`.
    ///
    /// # Errors
    ///
    /// [`FlowError::NodeOutOfRange`] if `source` or `sink` does not exist.
    #[instrument(skip(self), fields(nodes = self.node_count(), edges = self.edge_count))]
    pub fn max_flow(&mut self, source: NodeId, sink: NodeId) -> Result<i64> {
        dinic::max_flow(self, source, sink)
    }

    /// Total flow pushed out of `node` over its real edges.
    ///
    /// Zero before any computation.
    ///
    /// # Errors
    ///
    /// [`FlowError::NodeOutOfRange`] if `node` does not exist.
    pub fn flow_by_node(&self, node: NodeId) -> Result<i64> {
        self.outgoing_flow_by_node(node)
    }

    /// Realized flow over real edges leaving `node`.
    ///
    /// # Errors
    ///
    /// [`FlowError::NodeOutOfRange`] if `node` does not exist.
    pub fn outgoing_flow_by_node(&self, node: NodeId) -> Result<i64> {
        self.check_node(node, NodeRole::Node)?;
        Ok(self.adjacency[node]
            .iter()
            .filter(|edge| !edge.is_residual())
            .map(Edge::flow)
            .sum())
    }

    /// Realized flow over real edges entering `node`.
    ///
    /// Every real edge into `node` has its reverse stored in `node`'s own
    /// list, so the scan stays local to one adjacency list.
    ///
    /// # Errors
    ///
    /// [`FlowError::NodeOutOfRange`] if `node` does not exist.
    pub fn incoming_flow_by_node(&self, node: NodeId) -> Result<i64> {
        self.check_node(node, NodeRole::Node)?;
        Ok(self.adjacency[node]
            .iter()
            .map(|edge| &self.adjacency[edge.to][edge.reverse])
            .filter(|partner| !partner.is_residual())
            .map(Edge::flow)
            .sum())
    }

    /// Sum of initial capacities leaving `node`, independent of any flow.
    ///
    /// # Errors
    ///
    /// [`FlowError::NodeOutOfRange`] if `node` does not exist.
    pub fn outgoing_capacity_by_node(&self, node: NodeId) -> Result<i64> {
        self.check_node(node, NodeRole::Node)?;
        Ok(self.outgoing_capacity[node])
    }

    /// Sum of initial capacities entering `node`, independent of any flow.
    ///
    /// # Errors
    ///
    /// [`FlowError::NodeOutOfRange`] if `node` does not exist.
    pub fn incoming_capacity_by_node(&self, node: NodeId) -> Result<i64> {
        self.check_node(node, NodeRole::Node)?;
        Ok(self.incoming_capacity[node])
    }

    /// Capacity and flow aggregates for one node.
    ///
    /// # Errors
    ///
    /// [`FlowError::NodeOutOfRange`] if `node` does not exist.
    pub fn node_stats(&self, node: NodeId) -> Result<NodeStats> {
        Ok(NodeStats {
            incoming_capacity: self.incoming_capacity_by_node(node)?,
            outgoing_capacity: self.outgoing_capacity_by_node(node)?,
            incoming_flow: self.incoming_flow_by_node(node)?,
            outgoing_flow: self.outgoing_flow_by_node(node)?,
        })
    }

    /// [`NodeStats`] for every node, in index order.
    #[must_use]
    pub fn stats(&self) -> Vec<NodeStats> {
        (0..self.node_count())
            .filter_map(|node| self.node_stats(node).ok())
            .collect()
    }

    /// Real edges leaving `node`, with their current flow.
    ///
    /// # Errors
    ///
    /// [`FlowError::NodeOutOfRange`] if `node` does not exist.
    pub fn edges(&self, node: NodeId) -> Result<impl Iterator<Item = EdgeView> + '_> {
        self.check_node(node, NodeRole::Node)?;
        Ok(self.adjacency[node]
            .iter()
            .filter(|edge| !edge.is_residual())
            .map(move |edge| EdgeView {
                from: node,
                to: edge.to,
                capacity: edge.initial_capacity,
                flow: edge.flow(),
            }))
    }

    /// Restore every residual capacity to its initial value.
    ///
    /// Topology is left untouched, so a following [`Network::max_flow`]
    /// computes a fresh maximum.
    pub fn reset_flow(&mut self) {
        for edge in self.adjacency.iter_mut().flatten() {
            edge.capacity = edge.initial_capacity;
        }
    }

    /// Nodes reachable from `source` through positive residual capacity,
    /// in ascending index order.
    ///
    /// After a max-flow computation this is the source side of a minimum
    /// cut: every real edge leaving the set is saturated.
    ///
    /// # Errors
    ///
    /// [`FlowError::NodeOutOfRange`] if `source` does not exist.
    pub fn min_cut(&self, source: NodeId) -> Result<Vec<NodeId>> {
        self.check_node(source, NodeRole::Source)?;

        let mut reached = vec![false; self.node_count()];
        let mut queue = VecDeque::from([source]);
        reached[source] = true;

        while let Some(node) = queue.pop_front() {
            for edge in &self.adjacency[node] {
                if edge.capacity > 0 && !reached[edge.to] {
                    reached[edge.to] = true;
                    queue.push_back(edge.to);
                }
            }
        }

        Ok(reached
            .iter()
            .enumerate()
            .filter_map(|(node, &hit)| hit.then_some(node))
            .collect())
    }

    /// Combined initial capacity on the edges touching `node` in either
    /// direction. Zero for an index that does not exist yet.
    ///
    /// Bounds the flow any single computation can push out of `node`: its
    /// unused outgoing capacity plus the flow it already received.
    fn degree_capacity(&self, node: NodeId) -> i64 {
        match (
            self.outgoing_capacity.get(node),
            self.incoming_capacity.get(node),
        ) {
            (Some(outgoing), Some(incoming)) => outgoing + incoming,
            _ => 0,
        }
    }

    /// Check that a `from → to` edge of `capacity` keeps the degree capacity
    /// of both endpoints within `i64::MAX`. A self-loop counts twice.
    ///
    /// Endpoints need not exist yet; they are treated as fresh nodes.
    pub(crate) fn check_edge_capacity(
        &self,
        from: NodeId,
        to: NodeId,
        capacity: i64,
    ) -> Result<()> {
        let from_total = self
            .degree_capacity(from)
            .checked_add(capacity)
            .ok_or(FlowError::CapacityOverflow { node: from })?;
        let to_base = if from == to {
            from_total
        } else {
            self.degree_capacity(to)
        };
        to_base
            .checked_add(capacity)
            .ok_or(FlowError::CapacityOverflow { node: to })?;
        Ok(())
    }

    fn check_node(&self, node: NodeId, role: NodeRole) -> Result<()> {
        if node < self.node_count() {
            Ok(())
        } else {
            Err(FlowError::NodeOutOfRange {
                role,
                node,
                node_count: self.node_count(),
            })
        }
    }
}
