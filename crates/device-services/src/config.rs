use crate::table::ObjectTable;
use anyhow::Context;
use object_model::{ObjectIdentifier, TypeRegistry, Value};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Device configuration file: an ordered list of object descriptors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceConfig {
    pub object_list: Vec<ObjectEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectEntry {
    pub object_id: u32,
    pub object_name: String,
    pub value: f64,
}

pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<DeviceConfig> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading device config: {}", path.display()))?;
    let config: DeviceConfig = serde_json::from_str(&raw)
        .with_context(|| format!("decoding device config: {}", path.display()))?;
    Ok(config)
}

/// Populate a table from a configuration, one analogValue object per entry,
/// in list order. A duplicate instance id aborts bring-up; nothing in the
/// list is a per-item service error.
///
/// The configured `value` is reported but not applied: presentValue on
/// these objects is computed on every read.
pub fn bootstrap(
    registry: &TypeRegistry,
    table: &mut ObjectTable,
    config: &DeviceConfig,
) -> anyhow::Result<()> {
    for entry in &config.object_list {
        tracing::info!(
            object_id = entry.object_id,
            object_name = %entry.object_name,
            value = entry.value,
            "configuring object"
        );
        let identifier = ObjectIdentifier::new("analogValue", entry.object_id);
        let object = registry
            .new_object(
                "analogValue",
                identifier.clone(),
                &entry.object_name,
                vec![(
                    "eventMessageTexts".to_string(),
                    Value::Array(vec![
                        Value::character_string("to"),
                        Value::character_string("infinity"),
                        Value::character_string("and"),
                        Value::character_string("beyond"),
                    ]),
                )],
            )
            .with_context(|| format!("constructing object {identifier}"))?;
        table
            .add(object)
            .with_context(|| format!("adding object {identifier}"))?;
    }
    Ok(())
}
