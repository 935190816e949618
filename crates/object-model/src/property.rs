use crate::error::{ErrorCode, ExecutionError, Result};
use crate::object::Object;
use crate::value::{Datatype, Value};
use rand::Rng;

/// Static description of one property slot on an object type.
#[derive(Clone, Debug)]
pub struct PropertySpec {
    pub identifier: String,
    pub datatype: Datatype,
    pub optional: bool,
    pub mutable: bool,
    pub default: Option<Value>,
}

impl PropertySpec {
    /// A required, immutable property with no default.
    pub fn new(identifier: impl Into<String>, datatype: Datatype) -> Self {
        Self {
            identifier: identifier.into(),
            datatype,
            optional: false,
            mutable: false,
            default: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn mutable(mut self) -> Self {
        self.mutable = true;
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }
}

/// Read/write behavior for one property slot.
///
/// Handlers are selected per schema entry, so an object type can replace the
/// behavior of a single property (a value computed on every read, a slot
/// derived from the object's identity) while its other properties keep the
/// stored-value semantics of [`StoredProperty`].
pub trait PropertyHandler: Send + Sync {
    fn spec(&self) -> &PropertySpec;

    /// Produce the current value. `array_index` on a non-array datatype is
    /// rejected with `propertyIsNotAnArray`.
    fn read(&self, object: &Object, array_index: Option<u32>) -> Result<Value>;

    /// Store a value. `direct` writes come from object construction and
    /// bypass the mutability check only; validation still applies.
    fn write(
        &self,
        object: &mut Object,
        value: Value,
        array_index: Option<u32>,
        priority: Option<u8>,
        direct: bool,
    ) -> Result<()>;
}

/// Standard stored-value semantics: reads return the object's slot (falling
/// back to the spec default, or the zero value for required properties),
/// writes validate against the datatype and update the slot.
#[derive(Clone, Debug)]
pub struct StoredProperty {
    spec: PropertySpec,
}

impl StoredProperty {
    pub fn new(spec: PropertySpec) -> Self {
        Self { spec }
    }

    fn current_array(&self, object: &Object) -> Result<Vec<Value>> {
        match object.value(&self.spec.identifier) {
            Some(Value::Array(items)) => Ok(items.clone()),
            Some(_) => Err(ExecutionError::property(ErrorCode::InvalidDataType)),
            None => match &self.spec.default {
                Some(Value::Array(items)) => Ok(items.clone()),
                _ => Ok(Vec::new()),
            },
        }
    }
}

impl PropertyHandler for StoredProperty {
    fn spec(&self) -> &PropertySpec {
        &self.spec
    }

    fn read(&self, object: &Object, array_index: Option<u32>) -> Result<Value> {
        if let Some(index) = array_index {
            if !self.spec.datatype.is_array() {
                return Err(ExecutionError::property(ErrorCode::PropertyIsNotAnArray));
            }
            let items = self.current_array(object)?;
            if index == 0 {
                // index zero addresses the element count
                return Ok(Value::Unsigned(items.len() as u64));
            }
            return items
                .get(index as usize - 1)
                .cloned()
                .ok_or(ExecutionError::property(ErrorCode::InvalidArrayIndex));
        }

        if let Some(value) = object.value(&self.spec.identifier) {
            return Ok(value.clone());
        }
        if let Some(default) = &self.spec.default {
            return Ok(default.clone());
        }
        if self.spec.optional {
            // present in the schema, absent from this instance
            Err(ExecutionError::property(ErrorCode::UnknownProperty))
        } else {
            Ok(self.spec.datatype.zero_value())
        }
    }

    fn write(
        &self,
        object: &mut Object,
        value: Value,
        array_index: Option<u32>,
        _priority: Option<u8>,
        direct: bool,
    ) -> Result<()> {
        if !direct && !self.spec.mutable {
            return Err(ExecutionError::property(ErrorCode::WriteAccessDenied));
        }

        if let Some(index) = array_index {
            let element = self
                .spec
                .datatype
                .element()
                .ok_or(ExecutionError::property(ErrorCode::PropertyIsNotAnArray))?;
            if !value.conforms_to(element) {
                return Err(ExecutionError::property(ErrorCode::InvalidDataType));
            }
            let mut items = self.current_array(object)?;
            if index == 0 || index as usize > items.len() {
                return Err(ExecutionError::property(ErrorCode::InvalidArrayIndex));
            }
            items[index as usize - 1] = value;
            object.set_value(&self.spec.identifier, Value::Array(items));
            return Ok(());
        }

        if !value.conforms_to(&self.spec.datatype) {
            return Err(ExecutionError::property(ErrorCode::InvalidDataType));
        }
        object.set_value(&self.spec.identifier, value);
        Ok(())
    }
}

/// A value computed fresh on every read: uniform in [0, 100). Writes are
/// always denied, direct ones included.
#[derive(Clone, Debug)]
pub struct RandomValueProperty {
    spec: PropertySpec,
}

impl RandomValueProperty {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            spec: PropertySpec::new(identifier, Datatype::Real).optional(),
        }
    }
}

impl PropertyHandler for RandomValueProperty {
    fn spec(&self) -> &PropertySpec {
        &self.spec
    }

    fn read(&self, object: &Object, array_index: Option<u32>) -> Result<Value> {
        if array_index.is_some() {
            return Err(ExecutionError::property(ErrorCode::PropertyIsNotAnArray));
        }
        let value = rand::thread_rng().gen_range(0.0..100.0);
        tracing::debug!(
            object = %object.identifier(),
            property = %self.spec.identifier,
            value,
            "computed random value"
        );
        Ok(Value::Real(value))
    }

    fn write(
        &self,
        _object: &mut Object,
        _value: Value,
        _array_index: Option<u32>,
        _priority: Option<u8>,
        _direct: bool,
    ) -> Result<()> {
        Err(ExecutionError::property(ErrorCode::WriteAccessDenied))
    }
}

/// Reads the object's display name. Backed by the object's identity field,
/// not by a stored slot.
#[derive(Clone, Debug)]
pub struct ObjectNameProperty {
    spec: PropertySpec,
}

impl ObjectNameProperty {
    pub fn new() -> Self {
        Self {
            spec: PropertySpec::new("objectName", Datatype::CharacterString),
        }
    }
}

impl Default for ObjectNameProperty {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyHandler for ObjectNameProperty {
    fn spec(&self) -> &PropertySpec {
        &self.spec
    }

    fn read(&self, object: &Object, array_index: Option<u32>) -> Result<Value> {
        if array_index.is_some() {
            return Err(ExecutionError::property(ErrorCode::PropertyIsNotAnArray));
        }
        Ok(Value::CharacterString(object.name().to_string()))
    }

    fn write(
        &self,
        _object: &mut Object,
        _value: Value,
        _array_index: Option<u32>,
        _priority: Option<u8>,
        _direct: bool,
    ) -> Result<()> {
        Err(ExecutionError::property(ErrorCode::WriteAccessDenied))
    }
}

/// Reads the type name half of the object identifier.
#[derive(Clone, Debug)]
pub struct ObjectTypeProperty {
    spec: PropertySpec,
}

impl ObjectTypeProperty {
    pub fn new() -> Self {
        Self {
            spec: PropertySpec::new("objectType", Datatype::CharacterString),
        }
    }
}

impl Default for ObjectTypeProperty {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyHandler for ObjectTypeProperty {
    fn spec(&self) -> &PropertySpec {
        &self.spec
    }

    fn read(&self, object: &Object, array_index: Option<u32>) -> Result<Value> {
        if array_index.is_some() {
            return Err(ExecutionError::property(ErrorCode::PropertyIsNotAnArray));
        }
        Ok(Value::CharacterString(
            object.identifier().object_type().to_string(),
        ))
    }

    fn write(
        &self,
        _object: &mut Object,
        _value: Value,
        _array_index: Option<u32>,
        _priority: Option<u8>,
        _direct: bool,
    ) -> Result<()> {
        Err(ExecutionError::property(ErrorCode::WriteAccessDenied))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectIdentifier;
    use crate::schema::ObjectSchema;
    use std::sync::Arc;

    fn test_object() -> Object {
        let schema = Arc::new(
            ObjectSchema::new("analogValue")
                .with_property(RandomValueProperty::new("presentValue"))
                .with_property(StoredProperty::new(
                    PropertySpec::new(
                        "eventMessageTexts",
                        Datatype::Array(Box::new(Datatype::CharacterString)),
                    )
                    .mutable(),
                )),
        );
        schema
            .instantiate(
                ObjectIdentifier::new("analogValue", 1),
                "AV-1",
                Vec::new(),
            )
            .unwrap()
    }

    #[test]
    fn random_reads_stay_in_range() {
        let object = test_object();
        let handler = RandomValueProperty::new("presentValue");
        for _ in 0..1000 {
            match handler.read(&object, None).unwrap() {
                Value::Real(v) => assert!((0.0..100.0).contains(&v)),
                other => panic!("unexpected value: {other:?}"),
            }
        }
    }

    #[test]
    fn random_rejects_array_index() {
        let object = test_object();
        let handler = RandomValueProperty::new("presentValue");
        assert_eq!(
            handler.read(&object, Some(1)),
            Err(ExecutionError::property(ErrorCode::PropertyIsNotAnArray))
        );
    }

    #[test]
    fn random_denies_every_write() {
        let mut object = test_object();
        let handler = RandomValueProperty::new("presentValue");
        let denied = ExecutionError::property(ErrorCode::WriteAccessDenied);
        for (value, index, priority, direct) in [
            (Value::Real(1.0), None, None, false),
            (Value::Real(50.0), Some(2), Some(8), false),
            (Value::Boolean(true), None, Some(16), false),
            (Value::Real(0.0), None, None, true),
        ] {
            assert_eq!(
                handler.write(&mut object, value, index, priority, direct),
                Err(denied)
            );
        }
    }

    #[test]
    fn stored_write_checks_mutability_before_value() {
        let mut object = test_object();
        let handler = StoredProperty::new(PropertySpec::new("description", Datatype::CharacterString));
        // an ill-typed value against an immutable slot still reports the
        // access failure, not the type failure
        assert_eq!(
            handler.write(&mut object, Value::Real(1.0), None, None, false),
            Err(ExecutionError::property(ErrorCode::WriteAccessDenied))
        );
    }

    #[test]
    fn stored_write_validates_datatype() {
        let mut object = test_object();
        let handler =
            StoredProperty::new(PropertySpec::new("description", Datatype::CharacterString).mutable());
        assert_eq!(
            handler.write(&mut object, Value::Real(1.0), None, None, false),
            Err(ExecutionError::property(ErrorCode::InvalidDataType))
        );
        handler
            .write(
                &mut object,
                Value::character_string("north wing"),
                None,
                None,
                false,
            )
            .unwrap();
        assert_eq!(
            handler.read(&object, None).unwrap(),
            Value::character_string("north wing")
        );
    }

    #[test]
    fn direct_write_bypasses_mutability_only() {
        let mut object = test_object();
        let handler = StoredProperty::new(PropertySpec::new("location", Datatype::CharacterString));
        handler
            .write(
                &mut object,
                Value::character_string("plant room"),
                None,
                None,
                true,
            )
            .unwrap();
        // datatype validation still applies on direct writes
        assert_eq!(
            handler.write(&mut object, Value::Unsigned(7), None, None, true),
            Err(ExecutionError::property(ErrorCode::InvalidDataType))
        );
    }

    #[test]
    fn stored_read_rejects_index_on_scalar() {
        let object = test_object();
        let handler = StoredProperty::new(PropertySpec::new("description", Datatype::CharacterString));
        assert_eq!(
            handler.read(&object, Some(1)),
            Err(ExecutionError::property(ErrorCode::PropertyIsNotAnArray))
        );
    }

    #[test]
    fn array_reads_and_writes_are_bounds_checked() {
        let mut object = test_object();
        let handler = StoredProperty::new(
            PropertySpec::new(
                "eventMessageTexts",
                Datatype::Array(Box::new(Datatype::CharacterString)),
            )
            .mutable(),
        );
        handler
            .write(
                &mut object,
                Value::Array(vec![
                    Value::character_string("alpha"),
                    Value::character_string("beta"),
                ]),
                None,
                None,
                false,
            )
            .unwrap();

        // index zero reads the element count
        assert_eq!(
            handler.read(&object, Some(0)).unwrap(),
            Value::Unsigned(2)
        );
        assert_eq!(
            handler.read(&object, Some(2)).unwrap(),
            Value::character_string("beta")
        );
        assert_eq!(
            handler.read(&object, Some(3)),
            Err(ExecutionError::property(ErrorCode::InvalidArrayIndex))
        );

        handler
            .write(
                &mut object,
                Value::character_string("gamma"),
                Some(2),
                None,
                false,
            )
            .unwrap();
        assert_eq!(
            handler.read(&object, Some(2)).unwrap(),
            Value::character_string("gamma")
        );
        // element writes cannot grow the array
        assert_eq!(
            handler.write(
                &mut object,
                Value::character_string("delta"),
                Some(3),
                None,
                false
            ),
            Err(ExecutionError::property(ErrorCode::InvalidArrayIndex))
        );
        // nor address the count pseudo-element
        assert_eq!(
            handler.write(
                &mut object,
                Value::character_string("delta"),
                Some(0),
                None,
                false
            ),
            Err(ExecutionError::property(ErrorCode::InvalidArrayIndex))
        );
    }

    #[test]
    fn element_writes_are_type_checked() {
        let mut object = test_object();
        let handler = StoredProperty::new(
            PropertySpec::new(
                "eventMessageTexts",
                Datatype::Array(Box::new(Datatype::CharacterString)),
            )
            .mutable(),
        );
        handler
            .write(
                &mut object,
                Value::Array(vec![Value::character_string("alpha")]),
                None,
                None,
                false,
            )
            .unwrap();
        assert_eq!(
            handler.write(&mut object, Value::Real(3.0), Some(1), None, false),
            Err(ExecutionError::property(ErrorCode::InvalidDataType))
        );
    }

    #[test]
    fn identity_backed_properties_read_object_fields() {
        let object = test_object();
        let name = ObjectNameProperty::new();
        let object_type = ObjectTypeProperty::new();
        assert_eq!(
            name.read(&object, None).unwrap(),
            Value::character_string("AV-1")
        );
        assert_eq!(
            object_type.read(&object, None).unwrap(),
            Value::character_string("analogValue")
        );
    }
}
