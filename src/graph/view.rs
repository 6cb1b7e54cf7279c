//! Graph views: subgraphs built from shared node and relationship handles
//!
//! A [`GraphView`] groups existing entities; it never copies them. Views are
//! treated primarily as edge collections: length, emptiness and iteration all
//! refer to relationships, not nodes.
//!
//! # Set algebra
//!
//! | Operation              | Relationships | Nodes                                   |
//! |------------------------|---------------|-----------------------------------------|
//! | union `\|`             | `A ∪ B`       | `A ∪ B`                                 |
//! | intersection `&`       | `A ∩ B`       | `A ∩ B`                                 |
//! | difference `-`         | `A − B`       | `(A − B) ∪ endpoints(result)`           |
//! | symmetric diff `^`     | `A △ B`       | `(A △ B) ∪ endpoints(result)`           |
//!
//! Difference and symmetric difference apply node induction: a relationship
//! that survives never loses its endpoints. Intersection does not induce, so
//! a surviving relationship may reference nodes missing from the result.
//!
//! Plain construction does not induce either. A view built with
//! [`GraphView::new`] holds exactly the nodes it was given.

use super::container::Entity;
use super::entity_set::EntitySetView;
use super::node::Node;
use super::relationship::Relationship;
use super::types::{Label, RelationshipType};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{BitAnd, BitOr, BitXor, Sub};
use tracing::trace;

/// A subgraph: a set of nodes and a set of relationships
#[derive(Debug, Clone)]
pub struct GraphView {
    nodes: EntitySetView<Node>,
    relationships: EntitySetView<Relationship>,
    order: usize,
    size: usize,
}

impl GraphView {
    /// Create a view over the given nodes and relationships
    ///
    /// Relationship endpoints are not added to the node set.
    pub fn new<N, R>(nodes: N, relationships: R) -> Self
    where
        N: IntoIterator<Item = Node>,
        R: IntoIterator<Item = Relationship>,
    {
        Self::from_sets(EntitySetView::new(nodes), EntitySetView::new(relationships))
    }

    /// Create a view holding only nodes
    pub fn from_nodes<N: IntoIterator<Item = Node>>(nodes: N) -> Self {
        Self::from_sets(EntitySetView::new(nodes), EntitySetView::empty())
    }

    pub fn from_sets(nodes: EntitySetView<Node>, relationships: EntitySetView<Relationship>) -> Self {
        let order = nodes.len();
        let size = relationships.len();
        GraphView {
            nodes,
            relationships,
            order,
            size,
        }
    }

    pub fn empty() -> Self {
        Self::from_sets(EntitySetView::empty(), EntitySetView::empty())
    }

    /// Number of nodes
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of relationships
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn nodes(&self) -> &EntitySetView<Node> {
        &self.nodes
    }

    pub fn relationships(&self) -> &EntitySetView<Relationship> {
        &self.relationships
    }

    /// Every property key used by any node or relationship in the view
    ///
    /// Computed on each call, so it reflects the entities' current properties.
    pub fn property_keys(&self) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();
        for node in &self.nodes {
            keys.extend(node.properties().keys().map(str::to_string));
        }
        for relationship in &self.relationships {
            keys.extend(relationship.properties().keys().map(str::to_string));
        }
        keys
    }

    /// Every label carried by any node in the view
    pub fn labels(&self) -> BTreeSet<Label> {
        self.nodes
            .iter()
            .flat_map(|node| node.labels().iter().cloned())
            .collect()
    }

    /// Distinct relationship types; `None` stands for untyped relationships
    pub fn types(&self) -> BTreeSet<Option<RelationshipType>> {
        self.relationships
            .iter()
            .map(|relationship| relationship.rel_type().cloned())
            .collect()
    }

    /// Number of relationships
    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    /// True when the view has no relationships, whatever its nodes
    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    /// Iterate over relationships
    pub fn iter(&self) -> indexmap::set::Iter<'_, Relationship> {
        self.relationships.iter()
    }

    fn union_with(&self, other: &GraphView) -> GraphView {
        let result = GraphView::from_sets(
            &self.nodes | &other.nodes,
            &self.relationships | &other.relationships,
        );
        trace!("Union produced view order={} size={}", result.order, result.size);
        result
    }

    fn intersection_with(&self, other: &GraphView) -> GraphView {
        let result = GraphView::from_sets(
            &self.nodes & &other.nodes,
            &self.relationships & &other.relationships,
        );
        trace!("Intersection produced view order={} size={}", result.order, result.size);
        result
    }

    fn difference_with(&self, other: &GraphView) -> GraphView {
        let relationships = &self.relationships - &other.relationships;
        let nodes = &(&self.nodes - &other.nodes) | &induced_nodes(&relationships);
        let result = GraphView::from_sets(nodes, relationships);
        trace!("Difference produced view order={} size={}", result.order, result.size);
        result
    }

    fn symmetric_difference_with(&self, other: &GraphView) -> GraphView {
        let relationships = &self.relationships ^ &other.relationships;
        let nodes = &(&self.nodes ^ &other.nodes) | &induced_nodes(&relationships);
        let result = GraphView::from_sets(nodes, relationships);
        trace!(
            "Symmetric difference produced view order={} size={}",
            result.order,
            result.size
        );
        result
    }
}

// Endpoints of every relationship; empty when there are no relationships.
fn induced_nodes(relationships: &EntitySetView<Relationship>) -> EntitySetView<Node> {
    relationships
        .iter()
        .flat_map(|relationship| relationship.endpoints().iter().cloned())
        .collect()
}

impl Default for GraphView {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for GraphView {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.relationships == other.relationships
    }
}

impl Eq for GraphView {}

impl Hash for GraphView {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.nodes.xor_hash() ^ self.relationships.xor_hash());
    }
}

impl fmt::Display for GraphView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<GraphView order={} size={}>", self.order, self.size)
    }
}

impl<'a> IntoIterator for &'a GraphView {
    type Item = &'a Relationship;
    type IntoIter = indexmap::set::Iter<'a, Relationship>;

    fn into_iter(self) -> Self::IntoIter {
        self.relationships.iter()
    }
}

impl From<&Node> for GraphView {
    fn from(node: &Node) -> Self {
        GraphView::from_nodes([node.clone()])
    }
}

impl From<&Relationship> for GraphView {
    fn from(relationship: &Relationship) -> Self {
        GraphView::new(relationship.endpoints().iter().cloned(), [relationship.clone()])
    }
}

/// Anything that can be seen as a graph view
///
/// Nodes and relationships are degenerate views of themselves, so they take
/// part in set algebra with each other and with full views.
pub trait Subgraph {
    fn as_graph_view(&self) -> Cow<'_, GraphView>;

    fn to_graph_view(&self) -> GraphView {
        self.as_graph_view().into_owned()
    }

    fn union<S: Subgraph + ?Sized>(&self, other: &S) -> GraphView {
        self.as_graph_view().union_with(&other.as_graph_view())
    }

    fn intersection<S: Subgraph + ?Sized>(&self, other: &S) -> GraphView {
        self.as_graph_view().intersection_with(&other.as_graph_view())
    }

    fn difference<S: Subgraph + ?Sized>(&self, other: &S) -> GraphView {
        self.as_graph_view().difference_with(&other.as_graph_view())
    }

    fn symmetric_difference<S: Subgraph + ?Sized>(&self, other: &S) -> GraphView {
        self.as_graph_view().symmetric_difference_with(&other.as_graph_view())
    }
}

impl Subgraph for GraphView {
    fn as_graph_view(&self) -> Cow<'_, GraphView> {
        Cow::Borrowed(self)
    }
}

impl Subgraph for Node {
    fn as_graph_view(&self) -> Cow<'_, GraphView> {
        Cow::Owned(GraphView::from(self))
    }
}

impl Subgraph for Relationship {
    fn as_graph_view(&self) -> Cow<'_, GraphView> {
        Cow::Owned(GraphView::from(self))
    }
}

macro_rules! subgraph_operators {
    ($($lhs:ty),*) => {
        $(
            impl<S: Subgraph> BitOr<&S> for &$lhs {
                type Output = GraphView;

                fn bitor(self, rhs: &S) -> GraphView {
                    self.union(rhs)
                }
            }

            impl<S: Subgraph> BitAnd<&S> for &$lhs {
                type Output = GraphView;

                fn bitand(self, rhs: &S) -> GraphView {
                    self.intersection(rhs)
                }
            }

            impl<S: Subgraph> Sub<&S> for &$lhs {
                type Output = GraphView;

                fn sub(self, rhs: &S) -> GraphView {
                    self.difference(rhs)
                }
            }

            impl<S: Subgraph> BitXor<&S> for &$lhs {
                type Output = GraphView;

                fn bitxor(self, rhs: &S) -> GraphView {
                    self.symmetric_difference(rhs)
                }
            }
        )*
    };
}

subgraph_operators!(GraphView, Node, Relationship);

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHasher;

    fn hash_of(view: &GraphView) -> u64 {
        let mut hasher = FxHasher::default();
        view.hash(&mut hasher);
        hasher.finish()
    }

    fn person(name: &str) -> Node {
        Node::new(["Person"]).with_property("name", name).unwrap()
    }

    #[test]
    fn test_counts_and_truthiness() {
        let a = person("Alice");
        let b = person("Bob");
        let nodes_only = GraphView::from_nodes([a.clone(), b.clone()]);

        assert_eq!(nodes_only.order(), 2);
        assert_eq!(nodes_only.size(), 0);
        assert_eq!(nodes_only.len(), 0);
        assert!(nodes_only.is_empty());

        let r = Relationship::new(&a, "KNOWS", &b);
        let with_edge = GraphView::new([a, b], [r.clone()]);
        assert!(!with_edge.is_empty());
        assert_eq!(with_edge.len(), 1);
        assert_eq!(with_edge.iter().collect::<Vec<_>>(), vec![&r]);
    }

    #[test]
    fn test_construction_does_not_induce() {
        let a = person("Alice");
        let b = person("Bob");
        let r = Relationship::new(&a, "KNOWS", &b);

        let view = GraphView::new([a.clone()], [r]);
        assert_eq!(view.order(), 1);
        assert!(!view.nodes().contains(&b));
    }

    #[test]
    fn test_derived_sets() {
        let a = Node::new(["Person"]).with_property("name", "Alice").unwrap();
        let b = Node::new(["Person", "Employee"]).with_property("age", 30).unwrap();
        let knows = Relationship::new(&a, "KNOWS", &b).with_property("since", 1999).unwrap();
        let untyped = Relationship::between(&b, &a);
        let view = GraphView::new([a, b], [knows, untyped]);

        assert_eq!(
            view.property_keys(),
            BTreeSet::from(["age".to_string(), "name".to_string(), "since".to_string()])
        );
        assert_eq!(view.labels(), BTreeSet::from([Label::new("Employee"), Label::new("Person")]));
        assert_eq!(
            view.types(),
            BTreeSet::from([None, Some(RelationshipType::new("KNOWS"))])
        );
    }

    #[test]
    fn test_property_keys_track_mutation() {
        let a = person("Alice");
        let view = GraphView::from(&a);
        a.set_property("age", 33).unwrap();
        assert!(view.property_keys().contains("age"));
    }

    #[test]
    fn test_equality_and_hash() {
        let a = person("Alice");
        let b = person("Bob");
        let r = Relationship::new(&a, "KNOWS", &b);

        let first = GraphView::new([a.clone(), b.clone()], [r.clone()]);
        let second = GraphView::new([b.clone(), a.clone()], [r.clone()]);
        assert_eq!(first, second);
        assert_eq!(hash_of(&first), hash_of(&second));

        let without_edge = GraphView::from_nodes([a, b]);
        assert_ne!(first, without_edge);
    }

    #[test]
    fn test_union() {
        let a = person("Alice");
        let b = person("Bob");
        let c = person("Carol");
        let r = Relationship::new(&a, "KNOWS", &b);

        let left = GraphView::new([a.clone(), b.clone()], [r.clone()]);
        let right = GraphView::from_nodes([b.clone(), c.clone()]);
        let union = &left | &right;

        assert_eq!(union, GraphView::new([a, b, c], [r]));
        assert_eq!(union, &right | &left);
    }

    #[test]
    fn test_union_associative() {
        let a = person("Alice");
        let b = person("Bob");
        let c = person("Carol");
        let r = Relationship::new(&a, "KNOWS", &b);
        let s = Relationship::new(&b, "KNOWS", &c);

        let x = GraphView::from(&r);
        let y = GraphView::from(&s);
        let z = GraphView::from(&c);
        assert_eq!(&(&x | &y) | &z, &x | &(&y | &z));
    }

    #[test]
    fn test_intersection_keeps_node_sets_independent() {
        let a = person("Alice");
        let b = person("Bob");
        let r = Relationship::new(&a, "KNOWS", &b);

        let left = GraphView::new([a.clone(), b.clone()], [r.clone()]);
        let right = GraphView::new([a.clone()], [r.clone()]);
        let result = &left & &right;

        assert_eq!(result.relationships(), &EntitySetView::new([r]));
        assert_eq!(result.nodes(), &EntitySetView::new([a]));
        assert!(!result.nodes().contains(&b));
    }

    #[test]
    fn test_difference_induces_endpoints() {
        let a = person("Alice");
        let b = person("Bob");
        let r = Relationship::new(&a, "KNOWS", &b);

        let left = GraphView::new([a.clone(), b.clone()], [r.clone()]);
        let right = GraphView::from_nodes([b.clone()]);
        let result = &left - &right;

        assert_eq!(result.nodes(), &EntitySetView::new([a, b]));
        assert_eq!(result.relationships(), &EntitySetView::new([r]));
    }

    #[test]
    fn test_difference_without_surviving_relationships() {
        let a = person("Alice");
        let b = person("Bob");
        let r = Relationship::new(&a, "KNOWS", &b);

        let left = GraphView::new([a.clone(), b.clone()], [r.clone()]);
        let right = GraphView::new([b], [r]);
        let result = &left - &right;

        assert!(result.is_empty());
        assert_eq!(result.nodes(), &EntitySetView::new([a]));
    }

    #[test]
    fn test_symmetric_difference_induces_endpoints() {
        let a = person("Alice");
        let b = person("Bob");
        let c = person("Carol");
        let r = Relationship::new(&a, "KNOWS", &b);
        let s = Relationship::new(&b, "KNOWS", &c);

        let left = GraphView::new([a.clone(), b.clone()], [r.clone()]);
        let right = GraphView::new([b.clone(), c.clone()], [r.clone(), s.clone()]);
        let result = &left ^ &right;

        // b sits in both node sets but is an endpoint of the surviving s
        assert_eq!(result.relationships(), &EntitySetView::new([s]));
        assert_eq!(result.nodes(), &EntitySetView::new([a, b, c]));
    }

    #[test]
    fn test_symmetric_difference_of_equal_views_is_empty() {
        let a = person("Alice");
        let b = person("Bob");
        let view = GraphView::from(&Relationship::new(&a, "KNOWS", &b));

        let result = &view ^ &view;
        assert_eq!(result, GraphView::empty());
        assert_eq!(result.order(), 0);
    }

    #[test]
    fn test_entities_compose_directly() {
        let a = person("Alice");
        let b = person("Bob");
        let c = person("Carol");
        let ab = Relationship::new(&a, "KNOWS", &b);
        let bc = Relationship::new(&b, "KNOWS", &c);

        let path = &ab | &bc;
        assert_eq!(path.order(), 3);
        assert_eq!(path.size(), 2);

        let with_loner = &path | &Node::new(["Person"]);
        assert_eq!(with_loner.order(), 4);

        let trimmed = &path - &b;
        assert_eq!(trimmed.size(), 2);
        assert!(trimmed.nodes().contains(&b));

        let just_a = &a & &path;
        assert_eq!(just_a, GraphView::from(&a));
    }

    #[test]
    fn test_entity_graph_views() {
        let a = person("Alice");
        let b = person("Bob");
        let r = Relationship::new(&a, "KNOWS", &b);

        assert_eq!(a.to_graph_view().order(), 1);
        assert_eq!(a.to_graph_view().size(), 0);
        assert_eq!(r.to_graph_view().order(), 2);
        assert_eq!(r.to_graph_view().size(), 1);
        assert_eq!(Relationship::empty().to_graph_view().order(), 0);
    }

    #[test]
    fn test_operands_untouched() {
        let a = person("Alice");
        let b = person("Bob");
        let left = GraphView::from_nodes([a.clone(), b.clone()]);
        let right = GraphView::from_nodes([b]);

        let _ = &left - &right;
        assert_eq!(left.order(), 2);
        assert_eq!(right.order(), 1);
    }

    #[test]
    fn test_display() {
        let view = GraphView::from_nodes([person("Alice")]);
        assert_eq!(view.to_string(), "<GraphView order=1 size=0>");
    }
}
