use object_model::ObjectIdentifier;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Object table mutation failures. Fatal during bring-up, surfaced to the
/// administrative caller afterwards.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("duplicate object identifier: {0}")]
    DuplicateObject(ObjectIdentifier),
}

/// Batch-level failures. A batch only fails as a whole for structural
/// reasons; per-item errors travel inside the result sequence.
#[derive(Clone, Debug, Eq, PartialEq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceError {
    #[error("empty request batch")]
    EmptyRequest,
    #[error("communication is disabled")]
    CommunicationDisabled,
}

/// Link seam failures. The transport itself lives outside this crate; this
/// is the error surface its ports share.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("interface not found: {0}")]
    InterfaceNotFound(String),
    #[error("operation not supported on this port: {0}")]
    Unsupported(&'static str),
    #[error("I/O error: {0}")]
    Io(String),
}
