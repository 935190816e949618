use crate::error::{ModelError, Result};
use crate::object::{Object, ObjectIdentifier};
use crate::property::{
    ObjectNameProperty, ObjectTypeProperty, PropertyHandler, PropertySpec, RandomValueProperty,
    StoredProperty,
};
use crate::value::{Datatype, Value};
use std::sync::Arc;

/// The property-set template for one object type.
///
/// A new schema starts from the well-known base properties every object
/// carries; [`ObjectSchema::with_property`] then extends or overrides by
/// property identifier. Overriding replaces the read/write behavior for that
/// identifier and leaves every other property in place.
pub struct ObjectSchema {
    type_name: String,
    properties: Vec<Arc<dyn PropertyHandler>>,
}

impl ObjectSchema {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            properties: vec![
                Arc::new(ObjectNameProperty::new()),
                Arc::new(ObjectTypeProperty::new()),
                Arc::new(StoredProperty::new(
                    PropertySpec::new("description", Datatype::CharacterString)
                        .optional()
                        .mutable(),
                )),
            ],
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Add a property, replacing any existing entry with the same identifier.
    pub fn with_property(mut self, handler: impl PropertyHandler + 'static) -> Self {
        let handler: Arc<dyn PropertyHandler> = Arc::new(handler);
        let identifier = handler.spec().identifier.clone();
        match self
            .properties
            .iter_mut()
            .find(|existing| existing.spec().identifier == identifier)
        {
            Some(slot) => *slot = handler,
            None => self.properties.push(handler),
        }
        self
    }

    pub fn property(&self, identifier: &str) -> Option<&Arc<dyn PropertyHandler>> {
        self.properties
            .iter()
            .find(|handler| handler.spec().identifier == identifier)
    }

    pub fn properties(&self) -> impl Iterator<Item = &Arc<dyn PropertyHandler>> {
        self.properties.iter()
    }

    /// Build a live object from this schema. Initial values are applied as
    /// direct writes, so immutable-but-stored slots accept them while
    /// computed properties reject them; a rejected initial value is a
    /// configuration error, not a per-item one.
    pub fn instantiate(
        self: &Arc<Self>,
        identifier: ObjectIdentifier,
        name: impl Into<String>,
        initial_values: Vec<(String, Value)>,
    ) -> Result<Object, ModelError> {
        // the identifier's type half must be the schema's own
        if identifier.object_type() != self.type_name {
            return Err(ModelError::ObjectTypeMismatch {
                schema: self.type_name.clone(),
                identifier,
            });
        }
        let mut object = Object::new(identifier, name, Arc::clone(self));
        for (property, value) in initial_values {
            object
                .write_property_internal(&property, value, None, None, true)
                .map_err(|source| ModelError::InitialValueRejected { property, source })?;
        }
        Ok(object)
    }
}

/// The analogValue type: base properties plus a stored, writable
/// presentValue.
pub fn analog_value_schema() -> ObjectSchema {
    ObjectSchema::new("analogValue").with_property(StoredProperty::new(
        PropertySpec::new("presentValue", Datatype::Real).mutable(),
    ))
}

/// analogValue with presentValue recomputed on every read and an
/// eventMessageTexts array for operator messages.
pub fn random_analog_value_schema() -> ObjectSchema {
    analog_value_schema()
        .with_property(RandomValueProperty::new("presentValue"))
        .with_property(StoredProperty::new(
            PropertySpec::new(
                "eventMessageTexts",
                Datatype::Array(Box::new(Datatype::CharacterString)),
            )
            .mutable(),
        ))
}
