use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};

#[derive(Clone)]
pub struct ServiceMetrics {
    pub read_batches: IntCounter,
    pub write_batches: IntCounter,
    pub item_errors: IntCounter,
    pub objects_loaded: IntGauge,
}

#[derive(Clone)]
pub struct MetricsHub {
    pub registry: Registry,
    pub svc: ServiceMetrics,
}

impl MetricsHub {
    pub fn new() -> Result<Self, String> {
        let registry = Registry::new();
        let read_batches = IntCounter::new("fp_read_batches", "Total read batches served")
            .map_err(|e| format!("metrics init error: {e}"))?;
        let write_batches = IntCounter::new("fp_write_batches", "Total write batches served")
            .map_err(|e| format!("metrics init error: {e}"))?;
        let item_errors =
            IntCounter::new("fp_item_errors", "Total per-item errors returned to clients")
                .map_err(|e| format!("metrics init error: {e}"))?;
        let objects_loaded = IntGauge::new("fp_objects_loaded", "Number of objects in the table")
            .map_err(|e| format!("metrics init error: {e}"))?;
        let svc = ServiceMetrics {
            read_batches,
            write_batches,
            item_errors,
            objects_loaded,
        };
        let _ = registry.register(Box::new(svc.read_batches.clone()));
        let _ = registry.register(Box::new(svc.write_batches.clone()));
        let _ = registry.register(Box::new(svc.item_errors.clone()));
        let _ = registry.register(Box::new(svc.objects_loaded.clone()));
        Ok(Self { registry, svc })
    }

    pub fn encode_text(&self) -> String {
        let mut buf = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buf) {
            return format!("error encoding metrics: {e}");
        }
        String::from_utf8(buf).unwrap_or_default()
    }
}
