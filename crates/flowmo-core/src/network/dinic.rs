//! Dinic's maximum-flow algorithm over a [`Network`]'s residual arena.
//!
//! # Algorithm
//!
//! 1. **Level graph**: BFS from the source over edges with positive residual
//!    capacity, labelling each reached node with its distance. Stop when the
//!    sink is unreached.
//! 2. **Blocking flow**: repeated level-restricted DFS pushes from the
//!    source. An edge is eligible only if it has residual capacity and leads
//!    exactly one level deeper. Each node keeps a cursor into its edge list;
//!    an edge that cannot carry flow is skipped permanently for the rest of
//!    the phase.
//! 3. Sum every push; rebuild the level graph when a push returns zero.
//!
//! Each phase strictly increases the sink's level, so there are at most `V`
//! phases, and the cursors bound each phase to `O(VE)` work: `O(V²E)` total.
//!
//! Recursion depth is bounded by the sink's level, itself at most `V`.

use tracing::{debug, trace};

use super::{Edge, Network, NodeId};
use crate::error::{NodeRole, Result};

/// Level of a node the current BFS did not reach.
const UNREACHED: usize = usize::MAX;

/// Initial push request: more than any single path can carry, since every
/// node's total capacity fits in an `i64`.
const UNBOUNDED: i64 = i64::MAX;

pub(super) fn max_flow(network: &mut Network, source: NodeId, sink: NodeId) -> Result<i64> {
    network.check_node(source, NodeRole::Source)?;
    network.check_node(sink, NodeRole::Sink)?;

    if source == sink {
        return Ok(0);
    }

    let total = Dinic::new(&mut network.adjacency, source, sink).run();
    debug!(source, sink, total, "max flow computed");
    Ok(total)
}

struct Dinic<'a> {
    adjacency: &'a mut [Vec<Edge>],
    level: Vec<usize>,
    cursor: Vec<usize>,
    source: NodeId,
    sink: NodeId,
}

impl<'a> Dinic<'a> {
    fn new(adjacency: &'a mut [Vec<Edge>], source: NodeId, sink: NodeId) -> Self {
        let node_count = adjacency.len();
        Self {
            adjacency,
            level: vec![UNREACHED; node_count],
            cursor: vec![0; node_count],
            source,
            sink,
        }
    }

    fn run(&mut self) -> i64 {
        let mut total = 0;
        let mut phase = 0_usize;

        while self.build_level_graph() {
            phase += 1;
            self.cursor.fill(0);

            let mut phase_flow = 0;
            loop {
                let pushed = self.send_flow(self.source, UNBOUNDED);
                if pushed == 0 {
                    break;
                }
                trace!(phase, pushed, "augmenting path");
                phase_flow += pushed;
            }

            debug!(
                phase,
                sink_level = self.level[self.sink],
                phase_flow,
                "blocking flow complete"
            );
            total += phase_flow;
        }

        total
    }

    /// Label nodes by BFS distance from the source over positive-residual
    /// edges. Returns `true` if the sink was reached.
    fn build_level_graph(&mut self) -> bool {
        self.level.fill(UNREACHED);
        self.level[self.source] = 0;

        let mut queue = std::collections::VecDeque::from([self.source]);
        while let Some(node) = queue.pop_front() {
            let next_level = self.level[node] + 1;
            for edge in &self.adjacency[node] {
                if edge.capacity > 0 && self.level[edge.to] == UNREACHED {
                    self.level[edge.to] = next_level;
                    queue.push_back(edge.to);
                }
            }
        }

        self.level[self.sink] != UNREACHED
    }

    /// Push up to `limit` units from `node` toward the sink along one
    /// level-respecting path, committing the result on the way back up.
    fn send_flow(&mut self, node: NodeId, limit: i64) -> i64 {
        if node == self.sink {
            return limit;
        }

        while let Some(edge) = self.adjacency[node].get(self.cursor[node]) {
            let (to, capacity, reverse) = (edge.to, edge.capacity, edge.reverse);

            if capacity > 0 && self.is_next_level(node, to) {
                let pushed = self.send_flow(to, limit.min(capacity));
                if pushed > 0 {
                    let index = self.cursor[node];
                    self.adjacency[node][index].capacity -= pushed;
                    self.adjacency[to][reverse].capacity += pushed;
                    // Cursor stays put: the edge may still have capacity left.
                    return pushed;
                }
            }

            self.cursor[node] += 1;
        }

        0
    }

    fn is_next_level(&self, from: NodeId, to: NodeId) -> bool {
        let level = self.level[from];
        level != UNREACHED && self.level[to] == level + 1
    }
}
