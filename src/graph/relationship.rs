//! Relationships: typed, directed connections between nodes
//!
//! Viewed as a graph, a relationship is the size-1 subgraph holding itself
//! and its endpoint nodes. Its length is one and iterating it yields itself.
//!
//! Shapes are chosen by constructor rather than argument count:
//!
//! | Constructor                      | Endpoints          | Type    |
//! |----------------------------------|--------------------|---------|
//! | [`Relationship::empty`]          | none               | none    |
//! | [`Relationship::typed`]          | none               | given   |
//! | [`Relationship::between`]        | start, end         | none    |
//! | [`Relationship::new`]            | start, end         | given   |
//! | [`Relationship::chain`]          | every node, in order | given |

use super::container::{Entity, PropertyContainer};
use super::error::GraphResult;
use super::node::Node;
use super::property::Candidate;
use super::property_set::PropertySet;
use super::types::{RelationshipId, RelationshipType};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

struct RelationshipData {
    container: PropertyContainer,
    rel_type: Option<RelationshipType>,
    endpoints: Vec<Node>,
}

/// A relationship in the property graph
///
/// Like [`Node`], this is a shared handle with identity equality. Endpoints
/// and type are fixed at construction; properties stay mutable.
#[derive(Clone)]
pub struct Relationship(Rc<RelationshipData>);

impl Relationship {
    fn build(rel_type: Option<RelationshipType>, endpoints: Vec<Node>) -> Self {
        Relationship(Rc::new(RelationshipData {
            container: PropertyContainer::with_properties(PropertySet::new()),
            rel_type,
            endpoints,
        }))
    }

    /// A relationship with no endpoints and no type
    pub fn empty() -> Self {
        Self::build(None, Vec::new())
    }

    /// A typed relationship with no endpoints
    pub fn typed(rel_type: impl Into<RelationshipType>) -> Self {
        Self::build(Some(rel_type.into()), Vec::new())
    }

    /// An untyped relationship from `start` to `end`
    pub fn between(start: &Node, end: &Node) -> Self {
        Self::build(None, vec![start.clone(), end.clone()])
    }

    /// A typed relationship from `start` to `end`
    pub fn new(start: &Node, rel_type: impl Into<RelationshipType>, end: &Node) -> Self {
        Self::build(Some(rel_type.into()), vec![start.clone(), end.clone()])
    }

    /// A typed relationship threading through every node in order
    ///
    /// The first node is the start and the last is the end.
    pub fn chain<I>(rel_type: impl Into<RelationshipType>, nodes: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        Self::build(Some(rel_type.into()), nodes.into_iter().collect())
    }

    /// Set a property and hand the relationship back, for construction chains
    pub fn with_property(self, key: impl Into<String>, value: impl Into<Candidate>) -> GraphResult<Self> {
        self.set_property(key, value)?;
        Ok(self)
    }

    /// Merge several properties at once; nothing is stored if any value fails
    pub fn with_properties<K, V, P>(self, properties: P) -> GraphResult<Self>
    where
        K: Into<String>,
        V: Into<Candidate>,
        P: IntoIterator<Item = (K, V)>,
    {
        self.properties_mut().update(properties)?;
        Ok(self)
    }

    pub fn id(&self) -> RelationshipId {
        RelationshipId(self.0.container.id())
    }

    pub fn rel_type(&self) -> Option<&RelationshipType> {
        self.0.rel_type.as_ref()
    }

    pub fn endpoints(&self) -> &[Node] {
        &self.0.endpoints
    }

    /// First endpoint
    pub fn start(&self) -> Option<&Node> {
        self.0.endpoints.first()
    }

    /// Last endpoint
    pub fn end(&self) -> Option<&Node> {
        self.0.endpoints.last()
    }

    /// Check if this relationship goes FROM a specific node
    pub fn starts_from(&self, node: &Node) -> bool {
        self.start() == Some(node)
    }

    /// Check if this relationship goes TO a specific node
    pub fn ends_at(&self, node: &Node) -> bool {
        self.end() == Some(node)
    }

    /// Always one: a relationship is a graph of one edge
    pub fn len(&self) -> usize {
        1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> std::iter::Once<Relationship> {
        std::iter::once(self.clone())
    }
}

impl Entity for Relationship {
    fn container(&self) -> &PropertyContainer {
        &self.0.container
    }
}

impl PartialEq for Relationship {
    fn eq(&self, other: &Self) -> bool {
        self.0.container == other.0.container
    }
}

impl Eq for Relationship {}

impl Hash for Relationship {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.container.hash(state);
    }
}

impl fmt::Debug for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let endpoints: Vec<u64> = self.endpoints().iter().map(|n| n.id().as_u64()).collect();
        f.debug_struct("Relationship")
            .field("id", &self.id().as_u64())
            .field("endpoints", &endpoints)
            .field("type", &self.rel_type().map(RelationshipType::as_str))
            .field("properties", &*self.properties())
            .finish()
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let endpoints: Vec<String> = self.endpoints().iter().map(|n| n.id().to_string()).collect();
        let rel_type = self.rel_type().map_or("None", RelationshipType::as_str);
        write!(
            f,
            "<Relationship endpoints=({}) type={} properties={}>",
            endpoints.join(", "),
            rel_type,
            *self.properties()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PropertyValue;

    #[test]
    fn test_constructor_shapes() {
        let a = Node::new(["Person"]);
        let b = Node::new(["Person"]);
        let c = Node::new(["Person"]);

        let empty = Relationship::empty();
        assert!(empty.endpoints().is_empty());
        assert_eq!(empty.rel_type(), None);
        assert_eq!(empty.start(), None);

        let typed = Relationship::typed("KNOWS");
        assert!(typed.endpoints().is_empty());
        assert_eq!(typed.rel_type().unwrap().as_str(), "KNOWS");

        let between = Relationship::between(&a, &b);
        assert_eq!(between.endpoints(), &[a.clone(), b.clone()]);
        assert_eq!(between.rel_type(), None);

        let knows = Relationship::new(&a, "KNOWS", &b);
        assert_eq!(knows.start(), Some(&a));
        assert_eq!(knows.end(), Some(&b));
        assert_eq!(knows.rel_type(), Some(&RelationshipType::new("KNOWS")));

        let chain = Relationship::chain("NEXT", vec![a.clone(), b.clone(), c.clone()]);
        assert_eq!(chain.endpoints().len(), 3);
        assert_eq!(chain.start(), Some(&a));
        assert_eq!(chain.end(), Some(&c));
    }

    #[test]
    fn test_direction() {
        let a = Node::new(["Person"]);
        let b = Node::new(["Person"]);
        let rel = Relationship::new(&a, "FOLLOWS", &b);

        assert!(rel.starts_from(&a));
        assert!(rel.ends_at(&b));
        assert!(!rel.starts_from(&b));
        assert!(!rel.ends_at(&a));
    }

    #[test]
    fn test_relationship_properties() {
        let a = Node::new(["Person"]);
        let b = Node::new(["Person"]);
        let rel = Relationship::new(&a, "KNOWS", &b)
            .with_property("since", 1999)
            .unwrap()
            .with_properties([("strength", 0.9)])
            .unwrap();

        assert_eq!(rel.get_property("since"), Some(PropertyValue::Integer(1999)));
        assert_eq!(rel.get_property("strength"), Some(PropertyValue::Float(0.9)));
        assert_eq!(rel.property_count(), 2);
    }

    #[test]
    fn test_identity_equality() {
        let a = Node::new(["Person"]);
        let b = Node::new(["Person"]);
        let first = Relationship::new(&a, "KNOWS", &b);
        let second = Relationship::new(&a, "KNOWS", &b);

        assert_ne!(first, second);
        assert_eq!(first, first.clone());
    }

    #[test]
    fn test_relationship_is_single_edge() {
        let rel = Relationship::typed("KNOWS");
        assert_eq!(rel.len(), 1);
        assert!(!rel.is_empty());
        assert_eq!(rel.iter().collect::<Vec<_>>(), vec![rel.clone()]);
    }

    #[test]
    fn test_display() {
        let rel = Relationship::typed("KNOWS");
        assert_eq!(rel.to_string(), "<Relationship endpoints=() type=KNOWS properties={}>");
        assert_eq!(
            Relationship::empty().to_string(),
            "<Relationship endpoints=() type=None properties={}>"
        );
    }
}
