//! Property graph data model
//!
//! This module implements the client-side property graph model:
//! - Property casting into a small canonical value set
//! - Property sets where null means absent
//! - Nodes with labels and relationships with types, both with identity equality
//! - Graph views with set algebra and node induction

pub mod container;
pub mod entity_set;
pub mod error;
pub mod node;
pub mod property;
pub mod property_set;
pub mod relationship;
pub mod types;
pub mod view;

// Re-export main types
pub use container::{Entity, PropertyContainer};
pub use entity_set::EntitySetView;
pub use error::{GraphError, GraphResult};
pub use node::Node;
pub use property::{cast, cast_with, Candidate, PropertyValue};
pub use property_set::PropertySet;
pub use relationship::Relationship;
pub use types::{Label, NodeId, RelationshipId, RelationshipType};
pub use view::{GraphView, Subgraph};
