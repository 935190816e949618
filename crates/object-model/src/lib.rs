//! object-model: the addressable object/property space of a field device
//!
//! Objects are identified by a (type, instance) pair and expose a set of
//! typed properties. Each property's read/write behavior comes from a
//! handler selected by the object type's schema, so a type can swap a stored
//! slot for a value computed on every read without touching its other
//! properties.

mod error;
pub use error::{ErrorClass, ErrorCode, ExecutionError, ModelError, Result};

mod value;
pub use value::{Datatype, Value};

mod property;
pub use property::{
    ObjectNameProperty, ObjectTypeProperty, PropertyHandler, PropertySpec, RandomValueProperty,
    StoredProperty,
};

mod object;
pub use object::{Object, ObjectIdentifier};

mod schema;
pub use schema::{analog_value_schema, random_analog_value_schema, ObjectSchema};

mod registry;
pub use registry::TypeRegistry;
