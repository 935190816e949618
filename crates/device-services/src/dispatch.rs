use crate::error::ServiceError;
use crate::table::ObjectTable;
use object_model::{ErrorCode, ExecutionError, ObjectIdentifier, Value};
use serde::{Deserialize, Serialize};

/// One item of a batched read request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadAccessSpec {
    pub object: ObjectIdentifier,
    pub property: String,
    #[serde(default)]
    pub array_index: Option<u32>,
}

/// One item of a batched write request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteAccessSpec {
    pub object: ObjectIdentifier,
    pub property: String,
    pub value: Value,
    #[serde(default)]
    pub array_index: Option<u32>,
    #[serde(default)]
    pub priority: Option<u8>,
}

pub type ReadResult = Result<Value, ExecutionError>;
pub type WriteResult = Result<(), ExecutionError>;

/// Resolve a batch of read items against one table. Every item produces a
/// result at its own position; a failed item never disturbs the rest. Only a
/// structurally malformed batch fails as a whole.
pub fn read_property_multiple(
    table: &ObjectTable,
    items: &[ReadAccessSpec],
) -> Result<Vec<ReadResult>, ServiceError> {
    if items.is_empty() {
        return Err(ServiceError::EmptyRequest);
    }
    let mut results = Vec::with_capacity(items.len());
    for item in items {
        let result = match table.get(&item.object) {
            Some(object) => object.read_property(&item.property, item.array_index),
            None => Err(ExecutionError::object(ErrorCode::UnknownObject)),
        };
        if let Err(err) = &result {
            tracing::debug!(
                object = %item.object,
                property = %item.property,
                %err,
                "read item failed"
            );
        }
        results.push(result);
    }
    Ok(results)
}

/// Resolve a batch of write items against one table, same discipline as
/// [`read_property_multiple`].
pub fn write_property_multiple(
    table: &mut ObjectTable,
    items: &[WriteAccessSpec],
) -> Result<Vec<WriteResult>, ServiceError> {
    if items.is_empty() {
        return Err(ServiceError::EmptyRequest);
    }
    let mut results = Vec::with_capacity(items.len());
    for item in items {
        let result = match table.get_mut(&item.object) {
            Some(object) => object.write_property(
                &item.property,
                item.value.clone(),
                item.array_index,
                item.priority,
            ),
            None => Err(ExecutionError::object(ErrorCode::UnknownObject)),
        };
        if let Err(err) = &result {
            tracing::debug!(
                object = %item.object,
                property = %item.property,
                %err,
                "write item failed"
            );
        }
        results.push(result);
    }
    Ok(results)
}
