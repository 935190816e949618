use anyhow::Result;
use clap::Parser;
use device_services::{
    bootstrap, load_config, serve, Application, LinkAddress, LinkPort, MetricsHub, MockPort,
    ObjectTable,
};
use object_model::{
    random_analog_value_schema, Datatype, ObjectIdentifier, ObjectSchema, PropertySpec,
    StoredProperty, TypeRegistry, Value,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "field-daemon")]
#[command(about = "Field device daemon serving batched property requests")]
struct Args {
    /// Path to the JSON device configuration
    #[arg(long)]
    config: PathBuf,

    /// Link address of this device
    #[arg(long, default_value_t = 1)]
    address: u8,

    /// Link interface name
    #[arg(long, default_value = "mock0")]
    interface: String,

    /// Instance number of the device object
    #[arg(long, default_value_t = 999)]
    instance: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();

    let args = Args::parse();

    info!("field-daemon starting");
    info!("link address: {}, interface: {}", args.address, args.interface);

    let config = load_config(&args.config)?;

    let mut registry = TypeRegistry::new();
    registry.register(random_analog_value_schema());
    registry.register(device_schema());

    let mut table = ObjectTable::new();
    let device = registry.new_object(
        "device",
        ObjectIdentifier::new("device", args.instance),
        "fieldpoint-server",
        vec![
            (
                "vendorName".to_string(),
                Value::character_string("Fieldpoint Controls"),
            ),
            (
                "modelName".to_string(),
                Value::character_string("fieldpoint-server"),
            ),
        ],
    )?;
    table.add(device)?;

    bootstrap(&registry, &mut table, &config)?;
    info!("object table: {:?}", table.identifiers());

    let hub = MetricsHub::new().map_err(|e| anyhow::anyhow!("metrics init failed: {e}"))?;
    hub.svc.objects_loaded.set(table.len() as i64);

    let app = Arc::new(
        Application::new(table, LinkAddress(args.address)).with_metrics(hub.svc.clone()),
    );

    let mut port = MockPort::open(&args.interface)?;
    let shutdown = Arc::new(AtomicBool::new(false));

    let serve_app = Arc::clone(&app);
    let serve_shutdown = Arc::clone(&shutdown);
    let server = tokio::task::spawn_blocking(move || serve(&serve_app, &mut port, &serve_shutdown));

    info!("running");
    tokio::signal::ctrl_c().await?;

    shutdown.store(true, Ordering::SeqCst);
    server.await??;

    info!(metrics = %hub.encode_text(), "final metrics");
    info!("field-daemon shutting down");
    Ok(())
}

/// The device object: identity and vendor information for this server.
fn device_schema() -> ObjectSchema {
    ObjectSchema::new("device")
        .with_property(StoredProperty::new(PropertySpec::new(
            "vendorName",
            Datatype::CharacterString,
        )))
        .with_property(StoredProperty::new(PropertySpec::new(
            "modelName",
            Datatype::CharacterString,
        )))
        .with_property(StoredProperty::new(
            PropertySpec::new("firmwareRevision", Datatype::CharacterString)
                .with_default(Value::CharacterString(String::from(env!(
                    "CARGO_PKG_VERSION"
                )))),
        ))
}

fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
