use crate::object::ObjectIdentifier;
use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T, E = ExecutionError> = core::result::Result<T, E>;

/// Broad category of a per-item service failure, as it appears on the wire.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorClass {
    Object,
    Property,
    Services,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorClass::Object => "object",
            ErrorClass::Property => "property",
            ErrorClass::Services => "services",
        };
        f.write_str(name)
    }
}

/// Specific reason a single read or write item could not be completed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCode {
    UnknownObject,
    UnknownProperty,
    PropertyIsNotAnArray,
    WriteAccessDenied,
    InvalidDataType,
    ValueOutOfRange,
    InvalidArrayIndex,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCode::UnknownObject => "unknownObject",
            ErrorCode::UnknownProperty => "unknownProperty",
            ErrorCode::PropertyIsNotAnArray => "propertyIsNotAnArray",
            ErrorCode::WriteAccessDenied => "writeAccessDenied",
            ErrorCode::InvalidDataType => "invalidDataType",
            ErrorCode::ValueOutOfRange => "valueOutOfRange",
            ErrorCode::InvalidArrayIndex => "invalidArrayIndex",
        };
        f.write_str(name)
    }
}

/// Structured per-item failure. Recovered locally by the dispatcher and
/// surfaced to the client as one result item, never escalated.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error, Serialize, Deserialize)]
#[error("{class}: {code}")]
pub struct ExecutionError {
    pub class: ErrorClass,
    pub code: ErrorCode,
}

impl ExecutionError {
    pub const fn new(class: ErrorClass, code: ErrorCode) -> Self {
        Self { class, code }
    }

    pub const fn object(code: ErrorCode) -> Self {
        Self::new(ErrorClass::Object, code)
    }

    pub const fn property(code: ErrorCode) -> Self {
        Self::new(ErrorClass::Property, code)
    }
}

/// Fatal configuration failures raised during device bring-up. These abort
/// startup; they are never reported as per-item results.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown object type: {0}")]
    UnknownObjectType(String),
    #[error("schema for {schema:?} cannot instantiate {identifier}")]
    ObjectTypeMismatch {
        schema: String,
        identifier: ObjectIdentifier,
    },
    #[error("initial value for {property:?} rejected: {source}")]
    InitialValueRejected {
        property: String,
        source: ExecutionError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_camel_case() {
        let err = ExecutionError::property(ErrorCode::PropertyIsNotAnArray);
        assert_eq!(err.to_string(), "property: propertyIsNotAnArray");
        assert_eq!(
            ExecutionError::object(ErrorCode::UnknownObject).to_string(),
            "object: unknownObject"
        );
    }

    #[test]
    fn serializes_to_wire_pair() {
        let err = ExecutionError::property(ErrorCode::WriteAccessDenied);
        let json = serde_json::to_value(err).unwrap();
        assert_eq!(json["class"], "property");
        assert_eq!(json["code"], "writeAccessDenied");
    }
}
