//! `flowmo solve`: maximum flow between two labels of an edge list.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use flowmo_core::{FlowReport, LabeledStats};
use tracing::{info, instrument};

use crate::config::ReportConfig;
use crate::input::load_network;
use crate::output::{OutputMode, pretty_kv, pretty_rule, pretty_section, render_mode};

/// Arguments for `flowmo solve`.
#[derive(Args, Debug)]
pub struct SolveArgs {
    /// Edge-list file (`FROM TO CAPACITY` per line), or `-` for stdin.
    pub input: PathBuf,

    /// Label of the source node.
    #[arg(long, short = 's')]
    pub source: String,

    /// Label of the sink node.
    #[arg(long, short = 't')]
    pub sink: String,

    /// Include per-edge flow in the report.
    #[arg(long)]
    pub edges: bool,
}

/// Execute `flowmo solve`.
#[instrument(skip_all, fields(source = %args.source, sink = %args.sink))]
pub fn run_solve(args: &SolveArgs, output: OutputMode, report_cfg: &ReportConfig) -> anyhow::Result<()> {
    let mut flowmo = load_network(&args.input)?;

    let value = flowmo.max_flow(&args.source, &args.sink)?;
    info!(max_flow = value, "solved");

    let mut report = flowmo.report(&args.source, &args.sink, value)?;
    shape_report(&mut report, args.edges || report_cfg.show_edges, report_cfg.hide_idle_nodes);

    render_mode(output, &report, render_solve_text, render_solve_pretty)
}

fn shape_report(report: &mut FlowReport, show_edges: bool, hide_idle_nodes: bool) {
    if !show_edges {
        report.edges.clear();
    }
    if hide_idle_nodes {
        report.nodes.retain(|node| !node.stats.is_idle());
    }
}

fn render_solve_text(report: &FlowReport, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "max_flow\t{}", report.max_flow)?;
    writeln!(w, "min_cut\t{}", report.min_cut.join(","))?;
    writeln!(w, "node\tin_cap\tout_cap\tin_flow\tout_flow")?;
    for node in &report.nodes {
        write_stats_text_row(w, node)?;
    }
    for edge in &report.edges {
        writeln!(
            w,
            "edge\t{}\t{}\t{}\t{}",
            edge.from, edge.to, edge.capacity, edge.flow
        )?;
    }
    Ok(())
}

fn render_solve_pretty(report: &FlowReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Max flow {} → {}", report.source, report.sink))?;
    pretty_kv(w, "max flow", report.max_flow.to_string())?;
    pretty_kv(w, "min cut", report.min_cut.join(", "))?;
    writeln!(w)?;

    write_stats_table(w, &report.nodes)?;

    if !report.edges.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Edges")?;
        for edge in &report.edges {
            writeln!(
                w,
                "{:<12} → {:<12} {:>10}/{:<10}",
                edge.from, edge.to, edge.flow, edge.capacity
            )?;
        }
    }
    Ok(())
}

/// Pretty per-node table shared with `flowmo inspect`.
pub fn write_stats_table(w: &mut dyn Write, nodes: &[LabeledStats]) -> io::Result<()> {
    writeln!(
        w,
        "{:<16} {:>10} {:>10} {:>10} {:>10}",
        "node", "in cap", "out cap", "in flow", "out flow"
    )?;
    pretty_rule(w)?;
    for node in nodes {
        write_stats_pretty_row(w, node)?;
    }
    Ok(())
}

fn write_stats_text_row(w: &mut dyn Write, node: &LabeledStats) -> io::Result<()> {
    let stats = &node.stats;
    writeln!(
        w,
        "{}\t{}\t{}\t{}\t{}",
        node.label,
        stats.incoming_capacity,
        stats.outgoing_capacity,
        stats.incoming_flow,
        stats.outgoing_flow
    )
}

fn write_stats_pretty_row(w: &mut dyn Write, node: &LabeledStats) -> io::Result<()> {
    let stats = &node.stats;
    writeln!(
        w,
        "{:<16} {:>10} {:>10} {:>10} {:>10}",
        node.label,
        stats.incoming_capacity,
        stats.outgoing_capacity,
        stats.incoming_flow,
        stats.outgoing_flow
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{build_network, parse_edges};

    fn diamond_report() -> FlowReport {
        let edges = parse_edges("a b 20\na c 10\nb c 5\nb d 10\nc d 15\nz y 0\n")
            .expect("valid input");
        let mut flowmo = build_network(&edges).expect("valid edges");
        let value = flowmo.max_flow("a", "d").expect("known labels");
        flowmo.report("a", "d", value).expect("known labels")
    }

    #[test]
    fn text_output_is_tab_separated() {
        let mut report = diamond_report();
        shape_report(&mut report, false, false);

        let mut buf = Vec::new();
        render_solve_text(&report, &mut buf).expect("render");
        let text = String::from_utf8(buf).expect("utf8");

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("max_flow\t25"));
        assert_eq!(lines.next(), Some("min_cut\ta,b"));
        assert!(text.contains("d\t25\t0\t25\t0"));
        assert!(!text.contains("edge\t"));
    }

    #[test]
    fn stats_rows_match_their_header() {
        let report = diamond_report();
        let d = &report.nodes[3];

        let mut text = Vec::new();
        write_stats_text_row(&mut text, d).expect("render");
        assert_eq!(String::from_utf8(text).expect("utf8"), "d\t25\t0\t25\t0\n");

        let mut pretty = Vec::new();
        write_stats_pretty_row(&mut pretty, d).expect("render");
        let pretty = String::from_utf8(pretty).expect("utf8");
        assert_eq!(
            pretty,
            format!("{:<16} {:>10} {:>10} {:>10} {:>10}\n", "d", 25, 0, 25, 0)
        );
        assert!(!pretty.contains('\t'));
    }

    #[test]
    fn shaping_hides_idle_nodes_and_keeps_edges() {
        let mut report = diamond_report();
        shape_report(&mut report, true, true);

        // `z` and `y` only share a zero-capacity edge.
        assert_eq!(report.nodes.len(), 4);
        assert_eq!(report.edges.len(), 5);
    }

    #[test]
    fn pretty_output_lists_every_node() {
        let report = diamond_report();
        let mut buf = Vec::new();
        render_solve_pretty(&report, &mut buf).expect("render");
        let text = String::from_utf8(buf).expect("utf8");

        assert!(text.starts_with("Max flow a → d"));
        for label in ["a", "b", "c", "d", "z", "y"] {
            assert!(text.lines().any(|line| line.starts_with(label)), "{label} missing");
        }
        assert!(text.contains("Edges"));
    }
}
