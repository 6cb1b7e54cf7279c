//! Graph Primitives
//!
//! The in-memory data model beneath a graph database client: nodes,
//! relationships and subgraph views, plus the rules for which values may be
//! stored as properties.
//!
//! # Architecture
//!
//! - Property values are cast into a canonical set (boolean, float, 64-bit
//!   integer, string, homogeneous list) before they are stored
//! - Nodes and relationships are shared handles compared by identity
//! - Graph views reference entities and compose with `| & - ^`, inducing
//!   endpoint nodes where relationships survive a difference
//!
//! Everything here is single-threaded: entities are `Rc` handles and their
//! properties live behind a `RefCell`.
//!
//! ## Example Usage
//!
//! ```rust
//! use graph_primitives::graph::{GraphView, Node, Relationship, Subgraph};
//!
//! let alice = Node::new(["Person"]).with_property("name", "Alice").unwrap();
//! let bob = Node::new(["Person"]).with_property("name", "Bob").unwrap();
//! let knows = Relationship::new(&alice, "KNOWS", &bob)
//!     .with_property("since", 1999)
//!     .unwrap();
//!
//! let graph = &knows | &GraphView::from_nodes([Node::new(["Robot"])]);
//! assert_eq!(graph.order(), 3);
//! assert_eq!(graph.size(), 1);
//!
//! // Removing bob keeps him: he is an endpoint of a surviving relationship
//! let rest = graph.difference(&bob);
//! assert!(rest.nodes().contains(&bob));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod graph;

// Re-export main types for convenience
pub use config::{CastConfig, ConfigError, ConfigResult};
pub use graph::{
    cast, cast_with, Candidate, Entity, EntitySetView, GraphError, GraphResult, GraphView, Label,
    Node, NodeId, PropertyContainer, PropertySet, PropertyValue, Relationship, RelationshipId,
    RelationshipType, Subgraph,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
