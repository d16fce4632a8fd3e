//! Page catalog.
//!
//! The catalog is a fixed, ordered table of discovery pages. Page 0 is the
//! legacy parent slot and is not a catalog entry: it has no header framing
//! and is served by the dispatcher's fallback path. Appending pages with
//! new identifiers is backward compatible; renumbering existing pages is a
//! header-version bump.

use crate::constants::*;

/// A catalog page (identifiers 1-6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// General capability summary.
    General,
    /// Firmware identity record.
    FirmwareConfig,
    /// Hardware parameters (voltage, frequency, free memory).
    HardwareParams,
    /// Platform-unique hardware identifier.
    HardwareId,
    /// Uplink transport parameters (reserved).
    TransportUplink,
    /// Bootloader info (reserved).
    Bootloader,
}

impl Page {
    /// Map a requested page number to a catalog entry.
    ///
    /// Returns `None` for page 0 (the legacy parent slot) and for any
    /// unknown identifier; both are answered by the legacy fallback, never
    /// by an error.
    pub fn from_request(page: u8) -> Option<Self> {
        match page {
            PAGE_ID_GENERAL => Some(Page::General),
            PAGE_ID_FWCONFIG => Some(Page::FirmwareConfig),
            PAGE_ID_HWPARAMS => Some(Page::HardwareParams),
            PAGE_ID_HWID => Some(Page::HardwareId),
            PAGE_ID_TRANSPORT_UPLINK => Some(Page::TransportUplink),
            PAGE_ID_BOOTLOADER => Some(Page::Bootloader),
            _ => None,
        }
    }

    /// Wire identifier for this page.
    pub fn id(&self) -> u8 {
        match self {
            Page::General => PAGE_ID_GENERAL,
            Page::FirmwareConfig => PAGE_ID_FWCONFIG,
            Page::HardwareParams => PAGE_ID_HWPARAMS,
            Page::HardwareId => PAGE_ID_HWID,
            Page::TransportUplink => PAGE_ID_TRANSPORT_UPLINK,
            Page::Bootloader => PAGE_ID_BOOTLOADER,
        }
    }

    /// Page type carried in the header for this page's payload schema.
    pub fn page_type(&self) -> u8 {
        match self {
            Page::General => PAGE_TYPE_GENERAL,
            Page::FirmwareConfig => PAGE_TYPE_FIRMWARE,
            Page::HardwareParams => PAGE_TYPE_HARDWARE,
            Page::HardwareId => PAGE_TYPE_HARDWARE_ID,
            Page::TransportUplink => PAGE_TYPE_TRANSPORT,
            Page::Bootloader => PAGE_TYPE_BOOTLOADER,
        }
    }

    /// Fixed payload size for this page, or `None` for the variable-length
    /// hardware id page.
    pub fn data_len(&self) -> Option<usize> {
        match self {
            Page::General => Some(PAGE_DATA_GENERAL),
            Page::FirmwareConfig => Some(PAGE_DATA_FWCONFIG),
            Page::HardwareParams => Some(PAGE_DATA_HWPARAMS),
            Page::HardwareId => None,
            Page::TransportUplink => Some(0),
            Page::Bootloader => Some(0),
        }
    }

    /// All catalog pages in identifier order.
    pub fn all() -> [Page; TOTAL_PAGES as usize] {
        [
            Page::General,
            Page::FirmwareConfig,
            Page::HardwareParams,
            Page::HardwareId,
            Page::TransportUplink,
            Page::Bootloader,
        ]
    }
}

/// Hardware platform class carried in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HardwareClass {
    /// Unknown/unlisted platform.
    #[default]
    Unknown,
    /// AVR (ATmega) platforms.
    Avr,
    /// ESP8266 platforms.
    Esp8266,
    /// SAMD platforms.
    Samd,
    /// RTL8710 platforms.
    Rtl8710,
    /// Raspberry Pi (Linux) platforms.
    Rpi,
    /// nRF24LE1 platforms (experimental).
    Nrf24le1,
}

impl From<u8> for HardwareClass {
    fn from(value: u8) -> Self {
        match value {
            HW_CLASS_AVR => HardwareClass::Avr,
            HW_CLASS_ESP8266 => HardwareClass::Esp8266,
            HW_CLASS_SAMD => HardwareClass::Samd,
            HW_CLASS_RTL8710 => HardwareClass::Rtl8710,
            HW_CLASS_RPI => HardwareClass::Rpi,
            HW_CLASS_NRF24LE1 => HardwareClass::Nrf24le1,
            _ => HardwareClass::Unknown,
        }
    }
}

impl From<HardwareClass> for u8 {
    fn from(value: HardwareClass) -> Self {
        match value {
            HardwareClass::Unknown => HW_CLASS_UNKNOWN,
            HardwareClass::Avr => HW_CLASS_AVR,
            HardwareClass::Esp8266 => HW_CLASS_ESP8266,
            HardwareClass::Samd => HW_CLASS_SAMD,
            HardwareClass::Rtl8710 => HW_CLASS_RTL8710,
            HardwareClass::Rpi => HW_CLASS_RPI,
            HardwareClass::Nrf24le1 => HW_CLASS_NRF24LE1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_matches_total_pages() {
        assert_eq!(Page::all().len(), TOTAL_PAGES as usize);
    }

    #[test]
    fn test_page_id_round_trip() {
        for page in Page::all() {
            assert_eq!(Page::from_request(page.id()), Some(page));
        }
    }

    #[test]
    fn test_parent_and_unknown_are_not_catalog_entries() {
        assert_eq!(Page::from_request(PAGE_ID_PARENT), None);
        assert_eq!(Page::from_request(7), None);
        assert_eq!(Page::from_request(99), None);
    }

    #[test]
    fn test_fixed_layouts_fit_the_link() {
        for page in Page::all() {
            if let Some(len) = page.data_len() {
                assert!(len <= MAX_PAGE_DATA);
            }
        }
    }

    #[test]
    fn test_hardware_class_round_trip() {
        for code in 0..=6u8 {
            assert_eq!(u8::from(HardwareClass::from(code)), code);
        }
        assert_eq!(HardwareClass::from(200), HardwareClass::Unknown);
    }
}
