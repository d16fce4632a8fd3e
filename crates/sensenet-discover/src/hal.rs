//! Hardware collaborator interfaces.
//!
//! The encoder never talks to a platform directly; everything it needs at
//! request time comes through these narrow traits. Implementations are
//! selected at build time per platform (or simulated, see the
//! `sensenet-sim` crate). All calls are synchronous, non-blocking, and
//! side-effect free from the encoder's point of view.

use crate::constants::PAGE_DATA_FWCONFIG;
use crate::error::DiscoverError;

/// Size of the persisted firmware identity record in bytes.
pub const FIRMWARE_INFO_SIZE: usize = PAGE_DATA_FWCONFIG;

/// Firmware identity record persisted by the bootloader/OTA store.
///
/// Wire format (little-endian): type(2) + version(2) + blocks(2) + crc(2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FirmwareInfo {
    /// Firmware type identifier.
    pub firmware_type: u16,
    /// Firmware version.
    pub version: u16,
    /// Number of firmware blocks.
    pub blocks: u16,
    /// Firmware image CRC.
    pub crc: u16,
}

impl FirmwareInfo {
    /// Encode the record to its stored/wire bytes.
    pub fn encode(&self) -> [u8; FIRMWARE_INFO_SIZE] {
        let mut buf = [0u8; FIRMWARE_INFO_SIZE];
        buf[0..2].copy_from_slice(&self.firmware_type.to_le_bytes());
        buf[2..4].copy_from_slice(&self.version.to_le_bytes());
        buf[4..6].copy_from_slice(&self.blocks.to_le_bytes());
        buf[6..8].copy_from_slice(&self.crc.to_le_bytes());
        buf
    }

    /// Decode a record from stored bytes.
    pub fn decode(data: &[u8]) -> Result<Self, DiscoverError> {
        if data.len() < FIRMWARE_INFO_SIZE {
            return Err(DiscoverError::RecordTruncated {
                expected: FIRMWARE_INFO_SIZE,
                actual: data.len(),
            });
        }
        Ok(FirmwareInfo {
            firmware_type: u16::from_le_bytes([data[0], data[1]]),
            version: u16::from_le_bytes([data[2], data[3]]),
            blocks: u16::from_le_bytes([data[4], data[5]]),
            crc: u16::from_le_bytes([data[6], data[7]]),
        })
    }
}

/// Network topology as seen by this node.
pub trait Topology {
    /// Current uplink/parent node identifier.
    fn parent_node_id(&self) -> u8;

    /// Hop count to the network's gateway.
    fn distance_to_gateway(&self) -> u8;
}

/// Platform hardware readings.
///
/// Readings a platform cannot supply return `None`; the encoder writes the
/// wire sentinel in their place and continues.
pub trait Hardware {
    /// Milliseconds since boot.
    fn uptime_millis(&self) -> u32;

    /// CPU supply voltage in millivolts.
    fn cpu_voltage_mv(&self) -> Option<u16>;

    /// CPU clock frequency in 1/10 MHz steps.
    fn cpu_frequency(&self) -> Option<u16>;

    /// Free RAM in bytes.
    fn free_memory(&self) -> Option<u16>;

    /// Platform-unique hardware identifier, variable length.
    fn unique_id(&self) -> Option<Vec<u8>>;
}

/// Persistent firmware identity storage.
pub trait FirmwareStore {
    /// Read the firmware identity record.
    fn firmware_info(&self) -> Result<FirmwareInfo, DiscoverError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_firmware_info_wire_layout() {
        let info = FirmwareInfo {
            firmware_type: 0x0102,
            version: 0x0304,
            blocks: 0x0506,
            crc: 0x0708,
        };
        // each field little-endian
        assert_eq!(
            info.encode(),
            [0x02, 0x01, 0x04, 0x03, 0x06, 0x05, 0x08, 0x07]
        );
    }

    #[test]
    fn test_firmware_info_round_trip() {
        let info = FirmwareInfo {
            firmware_type: 7,
            version: 260,
            blocks: 120,
            crc: 0xBEEF,
        };
        assert_eq!(FirmwareInfo::decode(&info.encode()).unwrap(), info);
    }

    #[test]
    fn test_firmware_info_truncated() {
        let err = FirmwareInfo::decode(&[1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            DiscoverError::RecordTruncated {
                expected: FIRMWARE_INFO_SIZE,
                actual: 3
            }
        );
    }
}
