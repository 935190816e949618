use crate::error::{ModelError, Result};
use crate::object::{Object, ObjectIdentifier};
use crate::schema::ObjectSchema;
use crate::value::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Catalog mapping an object-type name to the schema used to instantiate
/// objects of that type.
///
/// An explicit value, not process-global state: each device (and each test)
/// builds its own registry at startup and passes it where objects are
/// constructed.
#[derive(Default, Clone)]
pub struct TypeRegistry {
    types: HashMap<String, Arc<ObjectSchema>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema under its type name. Re-registering replaces the
    /// schema for subsequently constructed instances; live objects keep the
    /// schema they were built from.
    pub fn register(&mut self, schema: ObjectSchema) {
        let type_name = schema.type_name().to_string();
        if self
            .types
            .insert(type_name.clone(), Arc::new(schema))
            .is_some()
        {
            tracing::debug!(%type_name, "object type re-registered");
        } else {
            tracing::debug!(%type_name, "object type registered");
        }
    }

    pub fn schema(&self, type_name: &str) -> Option<Arc<ObjectSchema>> {
        self.types.get(type_name).cloned()
    }

    /// Construct an object of a registered type. An unregistered type is a
    /// configuration error, fatal at bring-up.
    pub fn new_object(
        &self,
        type_name: &str,
        identifier: ObjectIdentifier,
        name: impl Into<String>,
        initial_values: Vec<(String, Value)>,
    ) -> Result<Object, ModelError> {
        let schema = self
            .schema(type_name)
            .ok_or_else(|| ModelError::UnknownObjectType(type_name.to_string()))?;
        schema.instantiate(identifier, name, initial_values)
    }
}
