use crate::dispatch::{
    read_property_multiple, write_property_multiple, ReadAccessSpec, ReadResult, WriteAccessSpec,
    WriteResult,
};
use crate::error::{ServiceError, TableError};
use crate::link::LinkAddress;
use crate::metrics::ServiceMetrics;
use crate::table::ObjectTable;
use object_model::{Object, ObjectIdentifier};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Batched property access, the service pair a device advertises when it
/// answers multi-item reads and writes.
pub trait ReadWritePropertyMultipleServices {
    fn read_property_multiple(
        &self,
        items: &[ReadAccessSpec],
    ) -> Result<Vec<ReadResult>, ServiceError>;

    fn write_property_multiple(
        &self,
        items: &[WriteAccessSpec],
    ) -> Result<Vec<WriteResult>, ServiceError>;
}

/// Administrative enable/disable of request servicing. The control call
/// itself always works, disabled or not.
pub trait DeviceCommunicationControlServices {
    fn communication_enabled(&self) -> bool;
    fn set_communication_enabled(&self, enabled: bool);
}

/// Link-specific addressing a device exposes to its transport.
pub trait LinkAddressing {
    fn link_address(&self) -> LinkAddress;
}

/// One device's service endpoint: the object table behind a lock, composed
/// with whichever service capabilities the device advertises.
///
/// Capabilities are independent traits, so a device type that only answers
/// reads can implement that one trait over the same table without touching
/// the others. Each batch resolves under the table lock, so a concurrent
/// administrative add can never be observed half-applied within a batch.
pub struct Application {
    table: Mutex<ObjectTable>,
    address: LinkAddress,
    communication_enabled: AtomicBool,
    metrics: Option<ServiceMetrics>,
}

impl Application {
    pub fn new(table: ObjectTable, address: LinkAddress) -> Self {
        Self {
            table: Mutex::new(table),
            address,
            communication_enabled: AtomicBool::new(true),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: ServiceMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    fn table(&self) -> MutexGuard<'_, ObjectTable> {
        match self.table.lock() {
            Ok(guard) => guard,
            // items apply one at a time, so the table behind a poisoned
            // lock still holds whole items only
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn guard_communication(&self) -> Result<(), ServiceError> {
        if self.communication_enabled.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ServiceError::CommunicationDisabled)
        }
    }

    fn count_item_errors<T>(&self, results: &[Result<T, object_model::ExecutionError>]) {
        if let Some(metrics) = &self.metrics {
            let failed = results.iter().filter(|result| result.is_err()).count();
            metrics.item_errors.inc_by(failed as u64);
        }
    }

    /// Administrative mutation: host another object.
    pub fn add_object(&self, object: Object) -> Result<(), TableError> {
        self.table().add(object)
    }

    /// Insertion-order snapshot of the hosted identifiers.
    pub fn object_identifiers(&self) -> Vec<ObjectIdentifier> {
        self.table().identifiers()
    }

    pub fn object_count(&self) -> usize {
        self.table().len()
    }
}

impl ReadWritePropertyMultipleServices for Application {
    fn read_property_multiple(
        &self,
        items: &[ReadAccessSpec],
    ) -> Result<Vec<ReadResult>, ServiceError> {
        self.guard_communication()?;
        if let Some(metrics) = &self.metrics {
            metrics.read_batches.inc();
        }
        let results = read_property_multiple(&self.table(), items)?;
        self.count_item_errors(&results);
        Ok(results)
    }

    fn write_property_multiple(
        &self,
        items: &[WriteAccessSpec],
    ) -> Result<Vec<WriteResult>, ServiceError> {
        self.guard_communication()?;
        if let Some(metrics) = &self.metrics {
            metrics.write_batches.inc();
        }
        let results = write_property_multiple(&mut self.table(), items)?;
        self.count_item_errors(&results);
        Ok(results)
    }
}

impl DeviceCommunicationControlServices for Application {
    fn communication_enabled(&self) -> bool {
        self.communication_enabled.load(Ordering::SeqCst)
    }

    fn set_communication_enabled(&self, enabled: bool) {
        let was = self.communication_enabled.swap(enabled, Ordering::SeqCst);
        if was != enabled {
            tracing::info!(enabled, "communication control");
        }
    }
}

impl LinkAddressing for Application {
    fn link_address(&self) -> LinkAddress {
        self.address
    }
}
