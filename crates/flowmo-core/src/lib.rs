#![forbid(unsafe_code)]
//! flowmo-core library.
//!
//! Maximum flow over directed, capacitated graphs with Dinic's algorithm,
//! plus per-node capacity and flow reporting once a computation has run.
//!
//! # Layers
//!
//! - [`network::Network`]: index-addressed residual graph and solver.
//! - [`Flowmo`]: string-labelled front end that creates nodes on first use.
//!
//! # Conventions
//!
//! - **Errors**: every fallible operation returns [`error::Result`] with a
//!   [`FlowError`]; use [`FlowError::kind`] to branch on
//!   `InvalidArgument` vs `NotFound`.
//! - **Capacity**: [`network::Network`] capacity queries sum installed
//!   capacity. The labelled [`Flowmo`] capacity queries report the capacity
//!   in use by the current flow, so they read zero before a computation;
//!   [`NodeStats`] carries both figures.
//! - **Overflow**: an edge is rejected if either endpoint's combined
//!   incoming and outgoing capacity would exceed `i64::MAX`, which bounds
//!   every flow value, including repeated runs with different terminals.
//! - **Logging**: `tracing` macros (`debug!` per Dinic phase, `trace!` per
//!   augmenting path). Install a subscriber to see them.
//!
//! # Example
//!
//! ```
//! use flowmo_core::Flowmo;
//!
//! let mut f = Flowmo::new();
//! f.add_edge("a", "b", 1)?;
//! f.add_edge("a", "c", 1)?;
//! f.add_edge("c", "b", 1)?;
//!
//! assert_eq!(f.max_flow("a", "b")?, 2);
//! assert_eq!(f.incoming_flow_by_node("b")?, 2);
//! assert_eq!(f.outgoing_capacity_by_node("c")?, 1);
//! # Ok::<(), flowmo_core::FlowError>(())
//! ```

pub mod error;
pub mod flowmo;
pub mod network;

pub use error::{ErrorKind, FlowError, NodeRole};
pub use flowmo::{FlowReport, Flowmo, LabeledEdge, LabeledStats};
pub use network::{EdgeView, Network, NodeId, NodeStats};
