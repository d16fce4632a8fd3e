//! Packed discovery header.
//!
//! Every catalog page starts with two bytes of packed header. Bit 0 is the
//! least significant bit of each byte:
//!
//! ```text
//! byte 0: bits[0:5) page id      bits[5:8) header format version
//! byte 1: bits[0:4) page type id bits[4:8) hardware class id
//! ```
//!
//! The header is always written before any payload byte, and a decoder
//! must read the page id and page type before interpreting the payload.

use crate::constants::HEADER_SIZE;

const PAGE_ID_MASK: u8 = 0x1F;
const VERSION_MASK: u8 = 0x07;
const VERSION_SHIFT: u8 = 5;
const PAGE_TYPE_MASK: u8 = 0x0F;
const HW_CLASS_MASK: u8 = 0x0F;
const HW_CLASS_SHIFT: u8 = 4;

/// The packed two-byte header carried by every framed discovery page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiscoveryHeader {
    page_id_version: u8,
    page_type_hw_class: u8,
}

impl DiscoveryHeader {
    /// Build a header from its four sub-fields. Out-of-range values are
    /// masked to their field width.
    pub fn new(page_id: u8, version: u8, page_type: u8, hardware_class: u8) -> Self {
        let mut header = DiscoveryHeader::default();
        header.set_page_id(page_id);
        header.set_version(version);
        header.set_page_type(page_type);
        header.set_hardware_class(hardware_class);
        header
    }

    /// Page identifier (0-31).
    pub fn page_id(&self) -> u8 {
        self.page_id_version & PAGE_ID_MASK
    }

    /// Set the page identifier.
    pub fn set_page_id(&mut self, page_id: u8) {
        self.page_id_version =
            (self.page_id_version & !PAGE_ID_MASK) | (page_id & PAGE_ID_MASK);
    }

    /// Header format version (0-7).
    pub fn version(&self) -> u8 {
        (self.page_id_version >> VERSION_SHIFT) & VERSION_MASK
    }

    /// Set the header format version.
    pub fn set_version(&mut self, version: u8) {
        self.page_id_version = (self.page_id_version & PAGE_ID_MASK)
            | ((version & VERSION_MASK) << VERSION_SHIFT);
    }

    /// Page type identifier (0-15), naming the payload schema independent
    /// of the page number.
    pub fn page_type(&self) -> u8 {
        self.page_type_hw_class & PAGE_TYPE_MASK
    }

    /// Set the page type identifier.
    pub fn set_page_type(&mut self, page_type: u8) {
        self.page_type_hw_class =
            (self.page_type_hw_class & !PAGE_TYPE_MASK) | (page_type & PAGE_TYPE_MASK);
    }

    /// Hardware class identifier (0-15).
    pub fn hardware_class(&self) -> u8 {
        (self.page_type_hw_class >> HW_CLASS_SHIFT) & HW_CLASS_MASK
    }

    /// Set the hardware class identifier.
    pub fn set_hardware_class(&mut self, hardware_class: u8) {
        self.page_type_hw_class = (self.page_type_hw_class & PAGE_TYPE_MASK)
            | ((hardware_class & HW_CLASS_MASK) << HW_CLASS_SHIFT);
    }

    /// Encode the header to its wire bytes.
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        [self.page_id_version, self.page_type_hw_class]
    }

    /// Decode a header from its wire bytes. Version-agnostic: the caller
    /// branches on [`version`](Self::version) for catalog differences.
    pub fn decode(bytes: [u8; HEADER_SIZE]) -> Self {
        DiscoveryHeader {
            page_id_version: bytes[0],
            page_type_hw_class: bytes[1],
        }
    }
}
