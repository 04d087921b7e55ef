//! Edge-list input.
//!
//! One edge per line: `FROM TO CAPACITY`, whitespace separated. Blank lines
//! and everything after a `#` are ignored.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use flowmo_core::Flowmo;
use tracing::{debug, instrument};

/// One parsed edge with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeSpec {
    pub line: usize,
    pub from: String,
    pub to: String,
    pub capacity: i64,
}

/// Read the whole input, treating `-` as stdin.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read edge list from stdin")?;
        return Ok(text);
    }

    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Parse an edge list.
///
/// Capacities are parsed as signed integers so that negative values reach
/// the network and are rejected there with a proper error code.
pub fn parse_edges(text: &str) -> Result<Vec<EdgeSpec>> {
    let mut edges = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let content = raw.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }

        let fields: Vec<&str> = content.split_whitespace().collect();
        let [from, to, capacity] = fields.as_slice() else {
            bail!(
                "line {line}: expected `FROM TO CAPACITY`, got {} field(s)",
                fields.len()
            );
        };

        let capacity = capacity
            .parse::<i64>()
            .with_context(|| format!("line {line}: invalid capacity {capacity:?}"))?;

        edges.push(EdgeSpec {
            line,
            from: (*from).to_string(),
            to: (*to).to_string(),
            capacity,
        });
    }

    Ok(edges)
}

/// Build a labelled network from parsed edges.
#[instrument(skip(edges), fields(edges = edges.len()))]
pub fn build_network(edges: &[EdgeSpec]) -> Result<Flowmo> {
    let mut flowmo = Flowmo::new();
    for edge in edges {
        flowmo
            .add_edge(&edge.from, &edge.to, edge.capacity)
            .with_context(|| format!("line {}", edge.line))?;
    }
    debug!(nodes = flowmo.labels().len(), "network built");
    Ok(flowmo)
}

/// Read, parse and build in one step.
pub fn load_network(path: &Path) -> Result<Flowmo> {
    let text = read_input(path)?;
    let edges = parse_edges(&text)?;
    build_network(&edges)
}
