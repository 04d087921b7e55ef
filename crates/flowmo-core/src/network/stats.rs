use serde::Serialize;

/// Capacity and flow aggregates for a single node.
///
/// Capacities sum the initial capacity of real edges and never change.
/// Flows sum `initial_capacity - capacity` over the same edges and reflect
/// the most recent max-flow computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NodeStats {
    pub incoming_capacity: i64,
    pub outgoing_capacity: i64,
    pub incoming_flow: i64,
    pub outgoing_flow: i64,
}

impl NodeStats {
    /// Flow entering minus flow leaving.
    ///
    /// Zero for every node other than the source and sink of a max-flow
    /// computation.
    #[must_use]
    pub const fn net_flow(&self) -> i64 {
        self.incoming_flow - self.outgoing_flow
    }

    /// `true` when no real edge touches the node.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.incoming_capacity == 0 && self.outgoing_capacity == 0
    }
}
