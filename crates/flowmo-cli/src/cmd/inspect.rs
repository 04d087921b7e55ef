//! `flowmo inspect`: per-node capacities of an edge list, without solving.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use flowmo_core::{Flowmo, LabeledStats};
use serde::Serialize;
use tracing::instrument;

use crate::cmd::solve::write_stats_table;
use crate::config::ReportConfig;
use crate::input::load_network;
use crate::output::{OutputMode, pretty_kv, render_mode};

/// Arguments for `flowmo inspect`.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Edge-list file (`FROM TO CAPACITY` per line), or `-` for stdin.
    pub input: PathBuf,
}

/// Report payload for `flowmo inspect`.
#[derive(Debug, Serialize)]
pub struct NetworkSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub total_capacity: i64,
    pub nodes: Vec<LabeledStats>,
}

impl NetworkSummary {
    fn from_flowmo(flowmo: &Flowmo, hide_idle_nodes: bool) -> Self {
        let network = flowmo.network();
        let mut nodes = flowmo.stats();
        let total_capacity = nodes.iter().map(|node| node.stats.outgoing_capacity).sum();
        if hide_idle_nodes {
            nodes.retain(|node| !node.stats.is_idle());
        }

        Self {
            node_count: network.node_count(),
            edge_count: network.edge_count(),
            total_capacity,
            nodes,
        }
    }
}

/// Execute `flowmo inspect`.
#[instrument(skip_all)]
pub fn run_inspect(
    args: &InspectArgs,
    output: OutputMode,
    report_cfg: &ReportConfig,
) -> anyhow::Result<()> {
    let flowmo = load_network(&args.input)?;
    let summary = NetworkSummary::from_flowmo(&flowmo, report_cfg.hide_idle_nodes);

    render_mode(output, &summary, render_inspect_text, render_inspect_pretty)
}

fn render_inspect_text(summary: &NetworkSummary, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "nodes\t{}", summary.node_count)?;
    writeln!(w, "edges\t{}", summary.edge_count)?;
    writeln!(w, "node\tin_cap\tout_cap")?;
    for node in &summary.nodes {
        writeln!(
            w,
            "{}\t{}\t{}",
            node.label, node.stats.incoming_capacity, node.stats.outgoing_capacity
        )?;
    }
    Ok(())
}

fn render_inspect_pretty(summary: &NetworkSummary, w: &mut dyn Write) -> io::Result<()> {
    pretty_kv(w, "nodes", summary.node_count.to_string())?;
    pretty_kv(w, "edges", summary.edge_count.to_string())?;
    pretty_kv(w, "capacity", summary.total_capacity.to_string())?;
    writeln!(w)?;
    write_stats_table(w, &summary.nodes)
}
