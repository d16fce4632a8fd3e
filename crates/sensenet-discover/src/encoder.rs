//! Page encoding.
//!
//! This module builds the framed discovery pages, following the fixed
//! byte layouts of the catalog. All multi-byte integers are serialized
//! least-significant-byte first, field by field, so the wire image is
//! identical across host endiannesses.

use bytes::BufMut;
use log::trace;

use crate::capability::CapabilityBits;
use crate::constants::*;
use crate::error::DiscoverError;
use crate::hal::{FirmwareStore, Hardware, Topology};
use crate::header::DiscoveryHeader;
use crate::pages::Page;

/// A framed discovery page: packed header plus page payload.
///
/// Instances live for one request only; they are filled, handed to the
/// transport, and discarded. The payload buffer is bounded by the link's
/// maximum and the encoded length is the exact number of bytes used,
/// never the buffer capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryMessage {
    header: DiscoveryHeader,
    data: [u8; MAX_PAGE_DATA],
    data_len: usize,
}

impl DiscoveryMessage {
    fn new(header: DiscoveryHeader) -> Self {
        DiscoveryMessage {
            header,
            data: [0u8; MAX_PAGE_DATA],
            data_len: 0,
        }
    }

    /// The packed header.
    pub fn header(&self) -> DiscoveryHeader {
        self.header
    }

    /// The payload bytes written for this page.
    pub fn data(&self) -> &[u8] {
        &self.data[..self.data_len]
    }

    /// Total encoded length: header size plus the exact payload bytes.
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.data_len
    }

    /// Serialize header-then-payload to wire bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        buf.put_slice(&self.header.encode());
        buf.put_slice(self.data());
        buf
    }
}

/// Encodes catalog pages from the resolved capabilities and the hardware
/// collaborators.
///
/// Encoding is a pure, bounded computation: no locks, no suspension
/// points, and byte-identical output for unchanged collaborator state.
pub struct PageEncoder<'a> {
    caps: &'a CapabilityBits,
    topology: &'a dyn Topology,
    hardware: &'a dyn Hardware,
    firmware: &'a dyn FirmwareStore,
}

impl<'a> PageEncoder<'a> {
    /// Create an encoder over the node's capabilities and collaborators.
    pub fn new(
        caps: &'a CapabilityBits,
        topology: &'a dyn Topology,
        hardware: &'a dyn Hardware,
        firmware: &'a dyn FirmwareStore,
    ) -> Self {
        PageEncoder {
            caps,
            topology,
            hardware,
            firmware,
        }
    }

    /// Encode one catalog page.
    ///
    /// The header fields (page id, version, page type, hardware class) are
    /// written before any payload byte. Only the firmware-config page can
    /// fail, when the persistent record is unreadable.
    pub fn encode_page(&self, page: Page) -> Result<DiscoveryMessage, DiscoverError> {
        let header = DiscoveryHeader::new(
            page.id(),
            HEADER_VERSION,
            page.page_type(),
            self.caps.hardware_class.into(),
        );
        let mut message = DiscoveryMessage::new(header);

        match page {
            Page::General => self.encode_general(&mut message),
            Page::FirmwareConfig => self.encode_firmware_config(&mut message)?,
            Page::HardwareParams => self.encode_hardware_params(&mut message),
            Page::HardwareId => self.encode_hardware_id(&mut message),
            // Reserved pages carry an empty payload for now.
            Page::TransportUplink | Page::Bootloader => {}
        }

        trace!(
            "encoded discovery page {} ({} bytes)",
            page.id(),
            message.encoded_len()
        );
        Ok(message)
    }

    /// Format: counts(1) + node_type(1) + parent(1) + distance(1) +
    /// features(1) + transports(1) + uptime_ms(4, LE)
    fn encode_general(&self, message: &mut DiscoveryMessage) {
        let data = &mut message.data;
        data[0] = (self.caps.transport_count << 4) | TOTAL_PAGES;
        data[1] = self.caps.node_type_mask;
        data[2] = self.topology.parent_node_id();
        data[3] = self.topology.distance_to_gateway();
        data[4] = self.caps.node_feature_mask;
        data[5] = self.caps.transport_mask;
        data[6..10].copy_from_slice(&self.hardware.uptime_millis().to_le_bytes());
        message.data_len = PAGE_DATA_GENERAL;
    }

    /// Format: the firmware identity record, verbatim (8 bytes, LE fields).
    fn encode_firmware_config(
        &self,
        message: &mut DiscoveryMessage,
    ) -> Result<(), DiscoverError> {
        let info = self.firmware.firmware_info()?;
        message.data[..PAGE_DATA_FWCONFIG].copy_from_slice(&info.encode());
        message.data_len = PAGE_DATA_FWCONFIG;
        Ok(())
    }

    /// Format: cpu_voltage(2, LE) + cpu_frequency(2, LE) + free_mem(2, LE).
    /// Readings the platform cannot supply are written as the sentinel.
    fn encode_hardware_params(&self, message: &mut DiscoveryMessage) {
        let voltage = self.hardware.cpu_voltage_mv().unwrap_or(READING_NOT_SUPPORTED);
        let frequency = self.hardware.cpu_frequency().unwrap_or(READING_NOT_SUPPORTED);
        let free_mem = self.hardware.free_memory().unwrap_or(READING_NOT_SUPPORTED);

        let data = &mut message.data;
        data[0..2].copy_from_slice(&voltage.to_le_bytes());
        data[2..4].copy_from_slice(&frequency.to_le_bytes());
        data[4..6].copy_from_slice(&free_mem.to_le_bytes());
        message.data_len = PAGE_DATA_HWPARAMS;
    }

    /// Format: platform-defined unique id bytes, truncated to the payload
    /// capacity. Platforms without a readable id send the header alone.
    fn encode_hardware_id(&self, message: &mut DiscoveryMessage) {
        if let Some(id) = self.hardware.unique_id() {
            let len = id.len().min(MAX_PAGE_DATA);
            message.data[..len].copy_from_slice(&id[..len]);
            message.data_len = len;
        }
    }
}
