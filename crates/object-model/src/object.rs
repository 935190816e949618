use crate::error::{ErrorCode, ExecutionError, Result};
use crate::schema::ObjectSchema;
use crate::value::Value;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Stable (type, instance) key of an addressable object. Immutable once
/// constructed; unique within one device's table.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ObjectIdentifier {
    object_type: String,
    instance: u32,
}

impl ObjectIdentifier {
    pub fn new(object_type: impl Into<String>, instance: u32) -> Self {
        Self {
            object_type: object_type.into(),
            instance,
        }
    }

    pub fn object_type(&self) -> &str {
        &self.object_type
    }

    pub fn instance(&self) -> u32 {
        self.instance
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.object_type, self.instance)
    }
}

/// A live object: identity, display name, the schema it was built from, and
/// the stored values of its property slots.
///
/// Property resolution goes through the schema, so reads of computed
/// properties never touch the value map.
pub struct Object {
    identifier: ObjectIdentifier,
    name: String,
    schema: Arc<ObjectSchema>,
    values: HashMap<String, Value>,
}

impl Object {
    pub(crate) fn new(
        identifier: ObjectIdentifier,
        name: impl Into<String>,
        schema: Arc<ObjectSchema>,
    ) -> Self {
        Self {
            identifier,
            name: name.into(),
            schema,
            values: HashMap::new(),
        }
    }

    pub fn identifier(&self) -> &ObjectIdentifier {
        &self.identifier
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Arc<ObjectSchema> {
        &self.schema
    }

    /// The stored value of a slot, if this instance holds one. Property
    /// handlers use this; callers normally go through [`Object::read_property`].
    pub fn value(&self, identifier: &str) -> Option<&Value> {
        self.values.get(identifier)
    }

    /// Store a slot value. Validation is the calling handler's business.
    pub fn set_value(&mut self, identifier: &str, value: Value) {
        self.values.insert(identifier.to_string(), value);
    }

    /// Read one property through its schema handler.
    pub fn read_property(
        &self,
        property: &str,
        array_index: Option<u32>,
    ) -> Result<Value> {
        let handler = self
            .schema
            .property(property)
            .ok_or(ExecutionError::property(ErrorCode::UnknownProperty))?;
        handler.read(self, array_index)
    }

    /// Write one property through its schema handler.
    pub fn write_property(
        &mut self,
        property: &str,
        value: Value,
        array_index: Option<u32>,
        priority: Option<u8>,
    ) -> Result<()> {
        self.write_property_internal(property, value, array_index, priority, false)
    }

    pub(crate) fn write_property_internal(
        &mut self,
        property: &str,
        value: Value,
        array_index: Option<u32>,
        priority: Option<u8>,
        direct: bool,
    ) -> Result<()> {
        let handler = match self.schema.property(property) {
            Some(handler) => Arc::clone(handler),
            None => return Err(ExecutionError::property(ErrorCode::UnknownProperty)),
        };
        handler.write(self, value, array_index, priority, direct)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("identifier", &self.identifier)
            .field("name", &self.name)
            .field("values", &self.values)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::random_analog_value_schema;

    fn sample() -> Object {
        Arc::new(random_analog_value_schema())
            .instantiate(ObjectIdentifier::new("analogValue", 7), "AV-7", Vec::new())
            .unwrap()
    }

    #[test]
    fn identifier_display() {
        let id = ObjectIdentifier::new("analogValue", 12);
        assert_eq!(id.to_string(), "analogValue:12");
        assert_eq!(id.object_type(), "analogValue");
        assert_eq!(id.instance(), 12);
    }

    #[test]
    fn unknown_property_is_reported_per_schema() {
        let mut object = sample();
        assert_eq!(
            object.read_property("maxPresValue", None),
            Err(ExecutionError::property(ErrorCode::UnknownProperty))
        );
        assert_eq!(
            object.write_property("maxPresValue", Value::Real(1.0), None, None),
            Err(ExecutionError::property(ErrorCode::UnknownProperty))
        );
    }

    #[test]
    fn read_resolves_through_schema_handler() {
        let object = sample();
        // presentValue is computed, never stored
        assert!(object.value("presentValue").is_none());
        match object.read_property("presentValue", None).unwrap() {
            Value::Real(v) => assert!((0.0..100.0).contains(&v)),
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[test]
    fn write_updates_stored_slot() {
        let mut object = sample();
        object
            .write_property(
                "eventMessageTexts",
                Value::Array(vec![Value::character_string("fault cleared")]),
                None,
                None,
            )
            .unwrap();
        assert_eq!(
            object.read_property("eventMessageTexts", Some(1)).unwrap(),
            Value::character_string("fault cleared")
        );
    }
}
