use crate::error::TableError;
use object_model::{Object, ObjectIdentifier};
use std::collections::HashMap;

/// The set of live objects hosted by one running device.
///
/// Insertion order is preserved for enumeration; [`ObjectTable::identifiers`]
/// hands out a snapshot, so callers can keep iterating while the table is
/// mutated behind them.
#[derive(Default)]
pub struct ObjectTable {
    objects: HashMap<ObjectIdentifier, Object>,
    order: Vec<ObjectIdentifier>,
}

impl ObjectTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object. A second object with the same identifier is
    /// rejected and the table is left unchanged.
    pub fn add(&mut self, object: Object) -> Result<(), TableError> {
        let identifier = object.identifier().clone();
        if self.objects.contains_key(&identifier) {
            return Err(TableError::DuplicateObject(identifier));
        }
        tracing::debug!(object = %identifier, name = object.name(), "object added");
        self.order.push(identifier.clone());
        self.objects.insert(identifier, object);
        Ok(())
    }

    pub fn get(&self, identifier: &ObjectIdentifier) -> Option<&Object> {
        self.objects.get(identifier)
    }

    pub fn get_mut(&mut self, identifier: &ObjectIdentifier) -> Option<&mut Object> {
        self.objects.get_mut(identifier)
    }

    /// Insertion-order snapshot of the hosted identifiers.
    pub fn identifiers(&self) -> Vec<ObjectIdentifier> {
        self.order.clone()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
