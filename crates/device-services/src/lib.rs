//! device-services: one running device's object table and the services
//! answering batched property requests against it
//!
//! The dispatcher resolves every item of a batch independently and returns
//! one result per item in request order; a failed item never disturbs its
//! neighbors. Service capabilities (batched read/write, communication
//! control, link addressing) are independent traits composed by
//! [`Application`].

mod error;
pub use error::{LinkError, ServiceError, TableError};

mod table;
pub use table::ObjectTable;

mod dispatch;
pub use dispatch::{
    read_property_multiple, write_property_multiple, ReadAccessSpec, ReadResult, WriteAccessSpec,
    WriteResult,
};

mod services;
pub use services::{
    Application, DeviceCommunicationControlServices, LinkAddressing,
    ReadWritePropertyMultipleServices,
};

mod link;
pub use link::{respond, serve, LinkAddress, LinkPort, MockPort, ServiceRequest, ServiceResponse};

mod config;
pub use config::{bootstrap, load_config, DeviceConfig, ObjectEntry};

mod metrics;
pub use metrics::{MetricsHub, ServiceMetrics};
