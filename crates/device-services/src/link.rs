use crate::dispatch::{ReadAccessSpec, ReadResult, WriteAccessSpec, WriteResult};
use crate::error::{LinkError, ServiceError};
use crate::services::{
    Application, DeviceCommunicationControlServices, ReadWritePropertyMultipleServices,
};
use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// A device's address on its link.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LinkAddress(pub u8);

impl fmt::Display for LinkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A service request as delivered by the link layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceRequest {
    ReadPropertyMultiple(Vec<ReadAccessSpec>),
    WritePropertyMultiple(Vec<WriteAccessSpec>),
    CommunicationControl { enable: bool },
}

/// The device's answer, one per request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceResponse {
    ReadResults(Vec<ReadResult>),
    WriteResults(Vec<WriteResult>),
    Ack,
    Reject(ServiceError),
}

/// A minimal blocking port onto the link layer. Framing, addressing, and
/// retransmission live behind implementations of this trait.
pub trait LinkPort {
    /// Open a port by interface name (e.g., "mock0").
    fn open(name: &str) -> Result<Self, LinkError>
    where
        Self: Sized;

    /// Wait up to `timeout_ms` for the next request; `None` on idle.
    fn recv(&mut self, timeout_ms: Option<u64>) -> Result<Option<ServiceRequest>, LinkError>;

    /// Send one response.
    fn send(&mut self, response: &ServiceResponse) -> Result<(), LinkError>;
}

/// In-process port with a scriptable request queue, so service flows are
/// testable without a transport. Each port instance is independent.
pub struct MockPort {
    name: String,
    queued: VecDeque<ServiceRequest>,
    sent: Vec<ServiceResponse>,
}

impl MockPort {
    /// Script a request for the next [`LinkPort::recv`] call.
    pub fn queue(&mut self, request: ServiceRequest) {
        self.queued.push_back(request);
    }

    /// Every response sent so far, oldest first.
    pub fn sent(&self) -> &[ServiceResponse] {
        &self.sent
    }
}

impl LinkPort for MockPort {
    fn open(name: &str) -> Result<Self, LinkError> {
        Ok(Self {
            name: name.to_string(),
            queued: VecDeque::new(),
            sent: Vec::new(),
        })
    }

    fn recv(&mut self, timeout_ms: Option<u64>) -> Result<Option<ServiceRequest>, LinkError> {
        if let Some(request) = self.queued.pop_front() {
            return Ok(Some(request));
        }
        // idle: behave like a blocking recv that timed out
        if let Some(ms) = timeout_ms {
            std::thread::sleep(Duration::from_millis(ms));
        }
        Ok(None)
    }

    fn send(&mut self, response: &ServiceResponse) -> Result<(), LinkError> {
        let _ = &self.name;
        self.sent.push(response.clone());
        Ok(())
    }
}

/// Answer one request against an application's capabilities.
pub fn respond(app: &Application, request: ServiceRequest) -> ServiceResponse {
    match request {
        ServiceRequest::ReadPropertyMultiple(items) => {
            match app.read_property_multiple(&items) {
                Ok(results) => ServiceResponse::ReadResults(results),
                Err(err) => ServiceResponse::Reject(err),
            }
        }
        ServiceRequest::WritePropertyMultiple(items) => {
            match app.write_property_multiple(&items) {
                Ok(results) => ServiceResponse::WriteResults(results),
                Err(err) => ServiceResponse::Reject(err),
            }
        }
        ServiceRequest::CommunicationControl { enable } => {
            app.set_communication_enabled(enable);
            ServiceResponse::Ack
        }
    }
}

/// Poll a port and answer requests until `shutdown` is raised.
pub fn serve(
    app: &Application,
    port: &mut impl LinkPort,
    shutdown: &AtomicBool,
) -> Result<(), LinkError> {
    while !shutdown.load(Ordering::SeqCst) {
        match port.recv(Some(50))? {
            Some(request) => {
                let response = respond(app, request);
                port.send(&response)?;
            }
            None => continue,
        }
    }
    Ok(())
}
