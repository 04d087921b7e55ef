//! Label-addressed front end over [`Network`].
//!
//! Callers name nodes with arbitrary non-empty strings. A node is created the
//! first time a label is used in [`Flowmo::add_edge`] or
//! [`Flowmo::add_node`]; queries for labels that were never registered fail
//! with [`FlowError::LabelNotFound`].

use std::collections::HashMap;

use serde::Serialize;
use tracing::instrument;

use crate::error::{FlowError, NodeRole, Result};
use crate::network::{EdgeView, Network, NodeId, NodeStats};

/// A flow network whose nodes are identified by string labels.
#[derive(Debug, Clone, Default)]
pub struct Flowmo {
    index_by_label: HashMap<String, NodeId>,
    /// Labels in node-index order.
    labels: Vec<String>,
    network: Network,
}

/// Per-node entry of a [`FlowReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledStats {
    pub label: String,
    #[serde(flatten)]
    pub stats: NodeStats,
}

/// Real edge with labelled endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledEdge {
    pub from: String,
    pub to: String,
    pub capacity: i64,
    pub flow: i64,
}

/// Serializable outcome of a max-flow computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowReport {
    pub source: String,
    pub sink: String,
    pub max_flow: i64,
    pub nodes: Vec<LabeledStats>,
    /// Source side of a minimum cut, in node-creation order.
    pub min_cut: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<LabeledEdge>,
}

impl Flowmo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `label`, returning its node index. Idempotent.
    ///
    /// # Errors
    ///
    /// [`FlowError::EmptyLabel`] if `label` is empty.
    pub fn add_node(&mut self, label: &str) -> Result<NodeId> {
        self.ensure_node(label, NodeRole::Node)
    }

    /// Add a directed edge between two labels, creating either node on first
    /// use. Parallel edges are kept as independent pairs.
    ///
    /// # Errors
    ///
    /// - [`FlowError::EmptyLabel`] if either label is empty.
    /// - [`FlowError::NegativeCapacity`] if `capacity < 0`.
    /// - [`FlowError::CapacityOverflow`] if the combined incoming and
    ///   outgoing capacity of either node would exceed `i64::MAX`.
    ///
    /// Labels are validated before any node is created, so a rejected edge
    /// leaves no trace.
    pub fn add_edge(&mut self, from: &str, to: &str, capacity: i64) -> Result<()> {
        if from.is_empty() {
            return Err(FlowError::EmptyLabel {
                role: NodeRole::From,
            });
        }
        if to.is_empty() {
            return Err(FlowError::EmptyLabel { role: NodeRole::To });
        }
        if capacity < 0 {
            return Err(FlowError::NegativeCapacity { capacity });
        }
        // Check against the indices the labels will have once created.
        let next = self.network.node_count();
        let from_index = self.node_id(from).unwrap_or(next);
        let to_index = self.node_id(to).unwrap_or(if to == from {
            from_index
        } else if from_index == next {
            next + 1
        } else {
            next
        });
        self.network
            .check_edge_capacity(from_index, to_index, capacity)?;

        let from_index = self.ensure_node(from, NodeRole::From)?;
        let to_index = self.ensure_node(to, NodeRole::To)?;
        self.network.add_edge(from_index, to_index, capacity)
    }

    /// Maximum flow from `source` to `sink`.
    ///
    /// Mutates residual capacities in place; see [`Network::max_flow`].
    ///
    /// # Errors
    ///
    /// [`FlowError::LabelNotFound`] if either label was never registered.
    #[instrument(skip(self))]
    pub fn max_flow(&mut self, source: &str, sink: &str) -> Result<i64> {
        let source_index = self.lookup(source, NodeRole::Source)?;
        let sink_index = self.lookup(sink, NodeRole::Sink)?;
        self.network.max_flow(source_index, sink_index)
    }

    /// Total outgoing flow of `node`.
    ///
    /// # Errors
    ///
    /// [`FlowError::LabelNotFound`] if `node` was never registered.
    pub fn flow_by_node(&self, node: &str) -> Result<i64> {
        self.network.flow_by_node(self.lookup(node, NodeRole::Node)?)
    }

    /// # Errors
    ///
    /// [`FlowError::LabelNotFound`] if `node` was never registered.
    pub fn incoming_flow_by_node(&self, node: &str) -> Result<i64> {
        self.network
            .incoming_flow_by_node(self.lookup(node, NodeRole::Node)?)
    }

    /// # Errors
    ///
    /// [`FlowError::LabelNotFound`] if `node` was never registered.
    pub fn outgoing_flow_by_node(&self, node: &str) -> Result<i64> {
        self.network
            .outgoing_flow_by_node(self.lookup(node, NodeRole::Node)?)
    }

    /// Capacity of the edges entering `node` that is in use by the current
    /// flow assignment. Zero before any computation.
    ///
    /// The installed capacity is [`Network::incoming_capacity_by_node`].
    ///
    /// # Errors
    ///
    /// [`FlowError::LabelNotFound`] if `node` was never registered.
    pub fn incoming_capacity_by_node(&self, node: &str) -> Result<i64> {
        self.incoming_flow_by_node(node)
    }

    /// Capacity of the edges leaving `node` that is in use by the current
    /// flow assignment. Zero before any computation.
    ///
    /// The installed capacity is [`Network::outgoing_capacity_by_node`].
    ///
    /// # Errors
    ///
    /// [`FlowError::LabelNotFound`] if `node` was never registered.
    pub fn outgoing_capacity_by_node(&self, node: &str) -> Result<i64> {
        self.outgoing_flow_by_node(node)
    }

    /// # Errors
    ///
    /// [`FlowError::LabelNotFound`] if `node` was never registered.
    pub fn node_stats(&self, node: &str) -> Result<NodeStats> {
        self.network.node_stats(self.lookup(node, NodeRole::Node)?)
    }

    /// Restore all residual capacities; see [`Network::reset_flow`].
    pub fn reset_flow(&mut self) {
        self.network.reset_flow();
    }

    /// Labels in node-creation order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn node_id(&self, label: &str) -> Option<NodeId> {
        self.index_by_label.get(label).copied()
    }

    #[must_use]
    pub fn label(&self, node: NodeId) -> Option<&str> {
        self.labels.get(node).map(String::as_str)
    }

    #[must_use]
    pub const fn network(&self) -> &Network {
        &self.network
    }

    /// Per-node statistics for every label, in creation order.
    #[must_use]
    pub fn stats(&self) -> Vec<LabeledStats> {
        self.labels
            .iter()
            .cloned()
            .zip(self.network.stats())
            .map(|(label, stats)| LabeledStats { label, stats })
            .collect()
    }

    /// Every real edge with labelled endpoints, grouped by source node.
    #[must_use]
    pub fn edges(&self) -> Vec<LabeledEdge> {
        (0..self.network.node_count())
            .filter_map(|node| self.network.edges(node).ok())
            .flatten()
            .map(|edge| self.labeled_edge(edge))
            .collect()
    }

    /// Snapshot the current flow assignment as a [`FlowReport`].
    ///
    /// `max_flow` is the value returned by the preceding
    /// [`Flowmo::max_flow`] call.
    ///
    /// # Errors
    ///
    /// [`FlowError::LabelNotFound`] if either label was never registered.
    pub fn report(&self, source: &str, sink: &str, max_flow: i64) -> Result<FlowReport> {
        let source_index = self.lookup(source, NodeRole::Source)?;
        self.lookup(sink, NodeRole::Sink)?;

        let min_cut = self
            .network
            .min_cut(source_index)?
            .into_iter()
            .map(|node| self.labels[node].clone())
            .collect();

        Ok(FlowReport {
            source: source.to_string(),
            sink: sink.to_string(),
            max_flow,
            nodes: self.stats(),
            min_cut,
            edges: self.edges(),
        })
    }

    fn labeled_edge(&self, edge: EdgeView) -> LabeledEdge {
        LabeledEdge {
            from: self.labels[edge.from].clone(),
            to: self.labels[edge.to].clone(),
            capacity: edge.capacity,
            flow: edge.flow,
        }
    }

    fn ensure_node(&mut self, label: &str, role: NodeRole) -> Result<NodeId> {
        if label.is_empty() {
            return Err(FlowError::EmptyLabel { role });
        }
        if let Some(&index) = self.index_by_label.get(label) {
            return Ok(index);
        }

        let index = self.network.add_node();
        self.index_by_label.insert(label.to_string(), index);
        self.labels.push(label.to_string());
        Ok(index)
    }

    fn lookup(&self, label: &str, role: NodeRole) -> Result<NodeId> {
        self.node_id(label).ok_or_else(|| FlowError::LabelNotFound {
            role,
            label: label.to_string(),
        })
    }
}
