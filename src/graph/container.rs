//! Property containers and the entity abstraction
//!
//! A [`PropertyContainer`] owns exactly one [`PropertySet`] and has identity
//! semantics: two containers are equal only when they are the same instance,
//! no matter what properties they hold.

use super::error::{GraphError, GraphResult};
use super::property::{Candidate, PropertyValue};
use super::property_set::PropertySet;
use super::relationship::Relationship;
use super::types::next_entity_id;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Keyed property storage with instance identity
///
/// Properties sit behind a `RefCell` so that entities shared between many
/// views can still be updated through `&self`; every view sees the change.
pub struct PropertyContainer {
    id: u64,
    properties: RefCell<PropertySet>,
}

impl PropertyContainer {
    pub fn new() -> Self {
        Self::with_properties(PropertySet::new())
    }

    pub fn with_properties(properties: PropertySet) -> Self {
        PropertyContainer {
            id: next_entity_id(),
            properties: RefCell::new(properties),
        }
    }

    /// Process-unique identity of this container
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<PropertyValue> {
        self.properties.borrow().get(key).cloned()
    }

    /// Set a property value; the absent marker deletes the key
    pub fn set_property(&self, key: impl Into<String>, value: impl Into<Candidate>) -> GraphResult<()> {
        self.properties.borrow_mut().set(key, value)
    }

    /// Remove a property
    pub fn remove_property(&self, key: &str) -> Option<PropertyValue> {
        self.properties.borrow_mut().remove(key)
    }

    /// Check if property exists
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.borrow().contains_key(key)
    }

    /// Get number of properties
    pub fn property_count(&self) -> usize {
        self.properties.borrow().len()
    }

    /// Borrow the whole property set
    ///
    /// # Panics
    ///
    /// Panics if the set is currently borrowed mutably.
    pub fn properties(&self) -> Ref<'_, PropertySet> {
        self.properties.borrow()
    }

    /// Mutably borrow the whole property set
    ///
    /// # Panics
    ///
    /// Panics if the set is currently borrowed.
    pub fn properties_mut(&self) -> RefMut<'_, PropertySet> {
        self.properties.borrow_mut()
    }

    /// A bare container is not a graph, so it has nothing to iterate.
    pub fn iter(&self) -> GraphResult<std::vec::IntoIter<Relationship>> {
        Err(GraphError::NotIterable("PropertyContainer"))
    }
}

impl Default for PropertyContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for PropertyContainer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PropertyContainer {}

impl Hash for PropertyContainer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for PropertyContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyContainer")
            .field("id", &self.id)
            .field("properties", &*self.properties.borrow())
            .finish()
    }
}

/// A graph entity: a cheaply clonable handle onto a shared property container
///
/// Clones of a handle are the same entity. Equality and hashing follow the
/// container's identity.
pub trait Entity: Clone + Eq + Hash + fmt::Debug {
    fn container(&self) -> &PropertyContainer;

    fn get_property(&self, key: &str) -> Option<PropertyValue> {
        self.container().get_property(key)
    }

    fn set_property(&self, key: impl Into<String>, value: impl Into<Candidate>) -> GraphResult<()> {
        self.container().set_property(key, value)
    }

    fn remove_property(&self, key: &str) -> Option<PropertyValue> {
        self.container().remove_property(key)
    }

    fn has_property(&self, key: &str) -> bool {
        self.container().has_property(key)
    }

    fn property_count(&self) -> usize {
        self.container().property_count()
    }

    fn properties(&self) -> Ref<'_, PropertySet> {
        self.container().properties()
    }

    fn properties_mut(&self) -> RefMut<'_, PropertySet> {
        self.container().properties_mut()
    }
}
