//! Nodes: labelled property containers
//!
//! Viewed as a graph, a node is the order-1, size-0 subgraph holding only
//! itself. It contributes no relationships, so its length is zero and
//! iterating it yields nothing.

use super::container::{Entity, PropertyContainer};
use super::error::GraphResult;
use super::property::Candidate;
use super::property_set::PropertySet;
use super::relationship::Relationship;
use super::types::{Label, NodeId};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

struct NodeData {
    container: PropertyContainer,
    labels: HashSet<Label>,
}

/// A node in the property graph
///
/// `Node` is a shared handle: clones refer to the same node, and property
/// changes made through any clone are visible through every view holding it.
/// Labels are fixed at construction.
#[derive(Clone)]
pub struct Node(Rc<NodeData>);

impl Node {
    /// Create a node with the given labels and no properties
    pub fn new<L, I>(labels: I) -> Self
    where
        L: Into<Label>,
        I: IntoIterator<Item = L>,
    {
        Self::from_parts(labels, PropertySet::new())
    }

    /// Create a node with labels and properties, casting every value
    pub fn new_with_properties<L, I, K, V, P>(labels: I, properties: P) -> GraphResult<Self>
    where
        L: Into<Label>,
        I: IntoIterator<Item = L>,
        K: Into<String>,
        V: Into<Candidate>,
        P: IntoIterator<Item = (K, V)>,
    {
        Ok(Self::from_parts(labels, PropertySet::from_pairs(properties)?))
    }

    fn from_parts<L, I>(labels: I, properties: PropertySet) -> Self
    where
        L: Into<Label>,
        I: IntoIterator<Item = L>,
    {
        Node(Rc::new(NodeData {
            container: PropertyContainer::with_properties(properties),
            labels: labels.into_iter().map(Into::into).collect(),
        }))
    }

    /// Set a property and hand the node back, for construction chains
    pub fn with_property(self, key: impl Into<String>, value: impl Into<Candidate>) -> GraphResult<Self> {
        self.set_property(key, value)?;
        Ok(self)
    }

    pub fn id(&self) -> NodeId {
        NodeId(self.0.container.id())
    }

    /// Get all labels
    pub fn labels(&self) -> &HashSet<Label> {
        &self.0.labels
    }

    /// Check if node has a specific label
    pub fn has_label(&self, label: &str) -> bool {
        self.0.labels.contains(label)
    }

    /// Get number of labels
    pub fn label_count(&self) -> usize {
        self.0.labels.len()
    }

    /// Always zero: a node has no relationships
    pub fn len(&self) -> usize {
        0
    }

    pub fn is_empty(&self) -> bool {
        true
    }

    pub fn iter(&self) -> std::iter::Empty<Relationship> {
        std::iter::empty()
    }

    fn sorted_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.0.labels.iter().map(Label::as_str).collect();
        labels.sort_unstable();
        labels
    }
}

impl Entity for Node {
    fn container(&self) -> &PropertyContainer {
        &self.0.container
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.0.container == other.0.container
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.container.hash(state);
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id().as_u64())
            .field("labels", &self.sorted_labels())
            .field("properties", &*self.properties())
            .finish()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Node labels={{{}}} properties={}>",
            self.sorted_labels().join(", "),
            *self.properties()
        )
    }
}
