//! Property tests for the max-flow engine.
//!
//! Small random networks are checked against a brute-force minimum cut
//! (max-flow/min-cut duality) and against the structural guarantees every
//! valid flow assignment must satisfy.

use flowmo_core::Network;
use proptest::prelude::*;

type EdgeList = Vec<(usize, usize, i64)>;

fn arb_network() -> impl Strategy<Value = (usize, EdgeList)> {
    (2_usize..7).prop_flat_map(|nodes| {
        (
            Just(nodes),
            prop::collection::vec((0..nodes, 0..nodes, 0_i64..20), 0..16),
        )
    })
}

fn arb_network_with_terminals() -> impl Strategy<Value = (usize, EdgeList, usize, usize)> {
    arb_network().prop_flat_map(|(nodes, edges)| (Just(nodes), Just(edges), 0..nodes, 0..nodes))
}

fn build(nodes: usize, edges: &[(usize, usize, i64)]) -> Network {
    let mut net = Network::new();
    for _ in 0..nodes {
        net.add_node();
    }
    for &(from, to, capacity) in edges {
        net.add_edge(from, to, capacity).expect("generated edges are valid");
    }
    net
}

/// Minimum over all `source`-containing, `sink`-excluding node subsets of
/// the capacity leaving the subset.
fn brute_force_min_cut(nodes: usize, edges: &[(usize, usize, i64)], source: usize, sink: usize) -> i64 {
    (0_u32..1 << nodes)
        .filter(|mask| mask & (1 << source) != 0 && mask & (1 << sink) == 0)
        .map(|mask| {
            edges
                .iter()
                .filter(|(from, to, _)| mask & (1 << from) != 0 && mask & (1 << to) == 0)
                .map(|(_, _, capacity)| capacity)
                .sum()
        })
        .min()
        .unwrap_or(0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn max_flow_equals_min_cut((nodes, edges, source, sink) in arb_network_with_terminals()) {
        prop_assume!(source != sink);
        let mut net = build(nodes, &edges);

        let flow = net.max_flow(source, sink).expect("valid terminals");
        prop_assert_eq!(flow, brute_force_min_cut(nodes, &edges, source, sink));
    }

    #[test]
    fn flow_bounded_by_terminal_capacity((nodes, edges, source, sink) in arb_network_with_terminals()) {
        prop_assume!(source != sink);
        let mut net = build(nodes, &edges);

        let flow = net.max_flow(source, sink).expect("valid terminals");
        prop_assert!(flow >= 0);
        prop_assert!(flow <= net.outgoing_capacity_by_node(source).expect("source exists"));
        prop_assert!(flow <= net.incoming_capacity_by_node(sink).expect("sink exists"));
    }

    #[test]
    fn flow_is_conserved_at_every_node((nodes, edges, source, sink) in arb_network_with_terminals()) {
        prop_assume!(source != sink);
        let mut net = build(nodes, &edges);
        let flow = net.max_flow(source, sink).expect("valid terminals");

        for node in 0..nodes {
            let stats = net.node_stats(node).expect("node exists");
            let expected = if node == source {
                -flow
            } else if node == sink {
                flow
            } else {
                0
            };
            prop_assert_eq!(stats.net_flow(), expected, "node {}", node);
            prop_assert_eq!(net.flow_by_node(node), net.outgoing_flow_by_node(node));
        }
    }

    #[test]
    fn edge_flows_respect_capacity((nodes, edges, source, sink) in arb_network_with_terminals()) {
        prop_assume!(source != sink);
        let mut net = build(nodes, &edges);
        net.max_flow(source, sink).expect("valid terminals");

        for node in 0..nodes {
            for edge in net.edges(node).expect("node exists") {
                prop_assert!(edge.flow >= 0 && edge.flow <= edge.capacity, "{:?}", edge);
            }
        }
    }

    #[test]
    fn min_cut_edges_are_saturated((nodes, edges, source, sink) in arb_network_with_terminals()) {
        prop_assume!(source != sink);
        let mut net = build(nodes, &edges);
        let flow = net.max_flow(source, sink).expect("valid terminals");

        let side = net.min_cut(source).expect("source exists");
        prop_assert!(!side.contains(&sink));

        let mut cut_capacity = 0;
        for &node in &side {
            for edge in net.edges(node).expect("node exists") {
                if !side.contains(&edge.to) {
                    prop_assert_eq!(edge.flow, edge.capacity);
                    cut_capacity += edge.capacity;
                }
            }
        }
        prop_assert_eq!(cut_capacity, flow);
    }

    #[test]
    fn second_run_finds_no_additional_flow((nodes, edges, source, sink) in arb_network_with_terminals()) {
        prop_assume!(source != sink);
        let mut net = build(nodes, &edges);
        let first = net.max_flow(source, sink).expect("valid terminals");

        prop_assert_eq!(net.max_flow(source, sink), Ok(0));

        net.reset_flow();
        prop_assert_eq!(net.max_flow(source, sink), Ok(first));
    }

    #[test]
    fn rerun_with_other_terminals_stays_valid(
        (nodes, edges, first_source, first_sink) in arb_network_with_terminals(),
        second in (0_usize..7, 0_usize..7),
    ) {
        let (second_source, second_sink) = (second.0 % nodes, second.1 % nodes);
        prop_assume!(first_source != first_sink && second_source != second_sink);
        let mut net = build(nodes, &edges);

        let first = net.max_flow(first_source, first_sink).expect("valid terminals");
        let second = net.max_flow(second_source, second_sink).expect("valid terminals");
        prop_assert!(first >= 0 && second >= 0);

        let signed = |node: usize, source: usize, sink: usize, value: i64| {
            if node == sink {
                value
            } else if node == source {
                -value
            } else {
                0
            }
        };
        for node in 0..nodes {
            let expected = signed(node, first_source, first_sink, first)
                + signed(node, second_source, second_sink, second);
            let stats = net.node_stats(node).expect("node exists");
            prop_assert_eq!(stats.net_flow(), expected, "node {}", node);

            for edge in net.edges(node).expect("node exists") {
                prop_assert!(edge.flow >= 0 && edge.flow <= edge.capacity, "{:?}", edge);
            }
        }
    }

    #[test]
    fn same_terminal_is_zero_and_untouched((nodes, edges) in arb_network(), node in 0_usize..7) {
        let node = node % nodes;
        let mut net = build(nodes, &edges);

        prop_assert_eq!(net.max_flow(node, node), Ok(0));
        for n in 0..nodes {
            prop_assert_eq!(net.flow_by_node(n), Ok(0));
        }
    }
}
