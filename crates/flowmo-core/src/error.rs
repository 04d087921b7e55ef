use std::fmt;

use crate::network::NodeId;

/// Coarse error classification shared by the index and label layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input: negative capacity, out-of-range index, empty label.
    InvalidArgument,
    /// A label that was never registered.
    NotFound,
}

impl ErrorKind {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidArgument => "E1001",
            Self::NotFound => "E2001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidArgument => "Invalid argument",
            Self::NotFound => "Node not found",
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InvalidArgument => None,
            Self::NotFound => Some("Add an edge touching the node before querying it."),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Which argument of an operation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    Source,
    Sink,
    From,
    To,
    Node,
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Source => "source",
            Self::Sink => "sink",
            Self::From => "from",
            Self::To => "to",
            Self::Node => "node",
        };
        f.write_str(name)
    }
}

/// Errors returned by network construction, max-flow and query operations.
///
/// Every variant is a deterministic input error detected before any state
/// is touched, so a failed call never leaves the network half-modified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("capacity must be non-negative, got {capacity}")]
    NegativeCapacity { capacity: i64 },

    #[error("{role} node {node} is out of range (node count {node_count})")]
    NodeOutOfRange {
        role: NodeRole,
        node: NodeId,
        node_count: usize,
    },

    #[error("{role} node label cannot be empty")]
    EmptyLabel { role: NodeRole },

    #[error("{role} label {label:?} not found")]
    LabelNotFound { role: NodeRole, label: String },

    #[error("adding this edge would overflow the total capacity of node {node}")]
    CapacityOverflow { node: NodeId },
}

impl FlowError {
    /// Classify the error into one of the two public kinds.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::LabelNotFound { .. } => ErrorKind::NotFound,
            Self::NegativeCapacity { .. }
            | Self::NodeOutOfRange { .. }
            | Self::EmptyLabel { .. }
            | Self::CapacityOverflow { .. } => ErrorKind::InvalidArgument,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = FlowError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_machine_friendly_and_unique() {
        let all = [ErrorKind::InvalidArgument, ErrorKind::NotFound];
        assert_ne!(all[0].code(), all[1].code());
        for kind in all {
            let code = kind.code();
            assert_eq!(code.len(), 5);
            assert!(code.starts_with('E'));
            assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn variants_map_to_kinds() {
        assert_eq!(
            FlowError::NegativeCapacity { capacity: -1 }.kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            FlowError::EmptyLabel {
                role: NodeRole::From
            }
            .kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            FlowError::LabelNotFound {
                role: NodeRole::Sink,
                label: "x".to_string()
            }
            .kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn messages_carry_offending_context() {
        let err = FlowError::NodeOutOfRange {
            role: NodeRole::Source,
            node: 7,
            node_count: 3,
        };
        assert_eq!(err.to_string(), "source node 7 is out of range (node count 3)");

        let err = FlowError::LabelNotFound {
            role: NodeRole::Node,
            label: "hub".to_string(),
        };
        assert_eq!(err.to_string(), "node label \"hub\" not found");
    }
}
