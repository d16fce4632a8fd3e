//! # sensenet-sim
//!
//! A simulated sensenet node: in-memory implementations of the discovery
//! protocol's hardware collaborators plus a YAML-loadable node model, so
//! that every feature combination can be exercised without real hardware.
//!
//! ## Usage
//!
//! ```no_run
//! use sensenet_sim::{SimNode, RecordingSink};
//! use sensenet_discover::DiscoverRequest;
//!
//! let yaml = std::fs::read_to_string("node.yaml")?;
//! let node = SimNode::from_yaml(&yaml)?;
//! let mut sink = RecordingSink::default();
//! node.handle_discover_request(&mut sink, DiscoverRequest { sender: 1, page: Some(1) })?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use log::debug;
use sensenet_discover::{
    resolve_capabilities, CapabilityBits, DiscoverError, DiscoverRequest, DiscoverResponder,
    FirmwareInfo, FirmwareStore, Hardware, MessageSink, NodeConfig, OutgoingMessage, Topology,
    FIRMWARE_INFO_SIZE,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Offset of the firmware identity record inside the simulated
/// persistent byte store.
pub const FIRMWARE_INFO_OFFSET: usize = 16;

/// Default size of the simulated persistent byte store.
pub const CONFIG_STORE_SIZE: usize = 512;

// ============================================================================
// Error Types
// ============================================================================

/// Errors from building a simulated node.
#[derive(Debug, Error)]
pub enum SimError {
    /// Node model file could not be parsed.
    #[error("failed to parse node model: {0}")]
    Model(#[from] serde_yaml::Error),
}

// ============================================================================
// Collaborator Implementations
// ============================================================================

/// Simulated network topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimTopology {
    /// Parent node id.
    pub parent: u8,
    /// Hop count to the gateway.
    pub distance: u8,
}

impl Topology for SimTopology {
    fn parent_node_id(&self) -> u8 {
        self.parent
    }

    fn distance_to_gateway(&self) -> u8 {
        self.distance
    }
}

/// Simulated platform hardware. Readings set to `None` model a platform
/// that cannot supply them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimHardware {
    /// Milliseconds since boot.
    pub uptime_ms: u32,
    /// CPU supply voltage in millivolts.
    pub cpu_voltage_mv: Option<u16>,
    /// CPU clock frequency in 1/10 MHz steps.
    pub cpu_frequency: Option<u16>,
    /// Free RAM in bytes.
    pub free_memory: Option<u16>,
    /// Platform-unique hardware id.
    pub unique_id: Option<Vec<u8>>,
}

impl Default for SimHardware {
    fn default() -> Self {
        SimHardware {
            uptime_ms: 0,
            cpu_voltage_mv: Some(3300),
            cpu_frequency: Some(160),
            free_memory: Some(2048),
            unique_id: Some(vec![0x01, 0x02, 0x03, 0x04]),
        }
    }
}

impl Hardware for SimHardware {
    fn uptime_millis(&self) -> u32 {
        self.uptime_ms
    }

    fn cpu_voltage_mv(&self) -> Option<u16> {
        self.cpu_voltage_mv
    }

    fn cpu_frequency(&self) -> Option<u16> {
        self.cpu_frequency
    }

    fn free_memory(&self) -> Option<u16> {
        self.free_memory
    }

    fn unique_id(&self) -> Option<Vec<u8>> {
        self.unique_id.clone()
    }
}

/// Simulated persistent byte store, standing in for the EEPROM the real
/// firmware keeps its identity record in. The firmware record lives at a
/// fixed offset; a store too small to hold it models an unreadable block.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    bytes: Vec<u8>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        ConfigStore {
            bytes: vec![0xFF; CONFIG_STORE_SIZE],
        }
    }
}

impl ConfigStore {
    /// Create a store of the given size, filled with the erased-cell value.
    pub fn with_size(size: usize) -> Self {
        ConfigStore {
            bytes: vec![0xFF; size],
        }
    }

    /// Write the firmware identity record at its fixed offset.
    pub fn write_firmware_info(&mut self, info: &FirmwareInfo) {
        let end = FIRMWARE_INFO_OFFSET + FIRMWARE_INFO_SIZE;
        if self.bytes.len() >= end {
            self.bytes[FIRMWARE_INFO_OFFSET..end].copy_from_slice(&info.encode());
        }
    }
}

impl FirmwareStore for ConfigStore {
    fn firmware_info(&self) -> Result<FirmwareInfo, DiscoverError> {
        let end = FIRMWARE_INFO_OFFSET + FIRMWARE_INFO_SIZE;
        if self.bytes.len() < end {
            return Err(DiscoverError::ConfigRead(format!(
                "store holds {} bytes, record ends at {}",
                self.bytes.len(),
                end
            )));
        }
        FirmwareInfo::decode(&self.bytes[FIRMWARE_INFO_OFFSET..end])
    }
}

/// A message sink that records everything sent through it.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Messages in send order.
    pub messages: Vec<OutgoingMessage>,
}

impl MessageSink for RecordingSink {
    fn send(&mut self, message: OutgoingMessage) {
        self.messages.push(message);
    }
}

// ============================================================================
// Node Model
// ============================================================================

/// Firmware identity fields of a node model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FirmwareModel {
    /// Firmware type identifier.
    pub firmware_type: u16,
    /// Firmware version.
    pub version: u16,
    /// Number of firmware blocks.
    pub blocks: u16,
    /// Firmware image CRC.
    pub crc: u16,
}

impl From<FirmwareModel> for FirmwareInfo {
    fn from(model: FirmwareModel) -> Self {
        FirmwareInfo {
            firmware_type: model.firmware_type,
            version: model.version,
            blocks: model.blocks,
            crc: model.crc,
        }
    }
}

/// A complete simulated node description, loadable from YAML.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeModel {
    /// Display name, for logs only.
    pub name: String,
    /// Feature and transport configuration.
    pub config: NodeConfig,
    /// Simulated hardware readings.
    pub hardware: SimHardware,
    /// Simulated topology.
    pub topology: SimTopology,
    /// Firmware identity record; `None` leaves the store without a
    /// readable record.
    pub firmware: Option<FirmwareModel>,
}

// ============================================================================
// Simulated Node
// ============================================================================

/// A simulated node wiring a configuration and collaborator set into the
/// discovery responder.
#[derive(Debug)]
pub struct SimNode {
    caps: CapabilityBits,
    /// Simulated topology.
    pub topology: SimTopology,
    /// Simulated hardware.
    pub hardware: SimHardware,
    /// Simulated persistent store.
    pub store: ConfigStore,
}

impl SimNode {
    /// Build a node from a model.
    pub fn from_model(model: NodeModel) -> Self {
        let mut store = ConfigStore::default();
        // No record leaves erased cells, as on a never-flashed device.
        if let Some(firmware) = model.firmware {
            store.write_firmware_info(&firmware.into());
        }
        SimNode {
            caps: resolve_capabilities(&model.config),
            topology: model.topology,
            hardware: model.hardware,
            store,
        }
    }

    /// Parse a YAML node model and build a node from it.
    pub fn from_yaml(yaml: &str) -> Result<Self, SimError> {
        let model: NodeModel = serde_yaml::from_str(yaml)?;
        debug!("loaded node model '{}'", model.name);
        Ok(Self::from_model(model))
    }

    /// The node's resolved capability masks.
    pub fn capabilities(&self) -> &CapabilityBits {
        &self.caps
    }

    /// Answer one discovery request through the given sink.
    pub fn handle_discover_request(
        &self,
        sink: &mut dyn MessageSink,
        request: DiscoverRequest,
    ) -> Result<bool, DiscoverError> {
        let responder =
            DiscoverResponder::new(&self.caps, &self.topology, &self.hardware, &self.store);
        responder.respond(sink, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_store_round_trip() {
        let mut store = ConfigStore::default();
        let info = FirmwareInfo {
            firmware_type: 3,
            version: 17,
            blocks: 64,
            crc: 0x1234,
        };
        store.write_firmware_info(&info);
        assert_eq!(store.firmware_info().unwrap(), info);
    }

    #[test]
    fn test_undersized_store_fails_to_read() {
        let store = ConfigStore::with_size(FIRMWARE_INFO_OFFSET + 2);
        assert!(matches!(
            store.firmware_info(),
            Err(DiscoverError::ConfigRead(_))
        ));
    }

    #[test]
    fn test_node_model_yaml_round_trip() {
        let model = NodeModel {
            name: "bench".to_string(),
            firmware: Some(FirmwareModel {
                firmware_type: 1,
                version: 2,
                blocks: 3,
                crc: 4,
            }),
            ..NodeModel::default()
        };
        let yaml = serde_yaml::to_string(&model).unwrap();
        let parsed: NodeModel = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, model);
    }
}
