//! Protocol constants
//!
//! These constants define the page identifiers, capability bit positions,
//! and other wire-level values used in the sensenet discovery protocol.

// ============================================================================
// Sizes
// ============================================================================

/// Maximum link payload in bytes. Every encoded page must fit inside this.
pub const MAX_PAYLOAD: usize = 25;
/// Size of the packed discovery header in bytes.
pub const HEADER_SIZE: usize = 2;
/// Maximum page payload (link payload minus the header).
pub const MAX_PAGE_DATA: usize = MAX_PAYLOAD - HEADER_SIZE;

/// Header format version emitted by this implementation.
///
/// Version 1 was the historical 5-page catalog (general/architecture
/// combined); version 2 is the granular catalog with firmware config,
/// hardware parameters, and hardware id split into their own pages.
pub const HEADER_VERSION: u8 = 2;

/// Number of catalog pages advertised in the GENERAL page. The legacy
/// parent slot (page 0) is not counted.
pub const TOTAL_PAGES: u8 = 6;

// ============================================================================
// Page Identifiers
// ============================================================================

/// Legacy parent reply. Not a framed page: the response is a single
/// unframed byte carrying the parent node id.
pub const PAGE_ID_PARENT: u8 = 0;
/// General capability summary.
pub const PAGE_ID_GENERAL: u8 = 1;
/// Firmware identity record.
pub const PAGE_ID_FWCONFIG: u8 = 2;
/// Hardware parameters (voltage, frequency, free memory).
pub const PAGE_ID_HWPARAMS: u8 = 3;
/// Platform-unique hardware identifier.
pub const PAGE_ID_HWID: u8 = 4;
/// Uplink transport parameters (reserved, empty payload).
pub const PAGE_ID_TRANSPORT_UPLINK: u8 = 5;
/// Bootloader info (reserved, empty payload).
pub const PAGE_ID_BOOTLOADER: u8 = 6;

// ============================================================================
// Page Type Identifiers
// ============================================================================
//
// A page type names the payload schema independent of the page number, so
// a decoder can survive catalog renumbering across header versions.

/// Legacy parent schema.
pub const PAGE_TYPE_PARENT: u8 = 0;
/// General capability summary schema.
pub const PAGE_TYPE_GENERAL: u8 = 1;
/// Hardware parameter schema.
pub const PAGE_TYPE_HARDWARE: u8 = 2;
/// Bootloader schema.
pub const PAGE_TYPE_BOOTLOADER: u8 = 3;
/// Transport parameter schema.
pub const PAGE_TYPE_TRANSPORT: u8 = 4;
/// Peripheral schema (reserved).
pub const PAGE_TYPE_PERIPHERY: u8 = 5;
/// Firmware identity schema.
pub const PAGE_TYPE_FIRMWARE: u8 = 6;
/// Unique hardware id schema.
pub const PAGE_TYPE_HARDWARE_ID: u8 = 7;

// ============================================================================
// Hardware Class Identifiers
// ============================================================================

/// Unknown/unlisted platform.
pub const HW_CLASS_UNKNOWN: u8 = 0;
/// AVR (ATmega) platforms.
pub const HW_CLASS_AVR: u8 = 1;
/// ESP8266 platforms.
pub const HW_CLASS_ESP8266: u8 = 2;
/// SAMD platforms.
pub const HW_CLASS_SAMD: u8 = 3;
/// RTL8710 platforms.
pub const HW_CLASS_RTL8710: u8 = 4;
/// Raspberry Pi (Linux) platforms.
pub const HW_CLASS_RPI: u8 = 5;
/// nRF24LE1 platforms (experimental).
pub const HW_CLASS_NRF24LE1: u8 = 6;

// ============================================================================
// Transport Availability Bits
// ============================================================================

/// Serial (RS-232) link compiled in.
pub const TRANSPORT_BIT_SERIAL: u8 = 0;
/// Network/IP link compiled in.
pub const TRANSPORT_BIT_TCPIP: u8 = 1;
/// nRF24 radio compiled in.
pub const TRANSPORT_BIT_NRF24: u8 = 2;
/// RFM69 radio compiled in.
pub const TRANSPORT_BIT_RFM69: u8 = 3;
/// RFM95 (LoRa) radio compiled in.
pub const TRANSPORT_BIT_RFM95: u8 = 4;
/// RS-485 bus compiled in.
pub const TRANSPORT_BIT_RS485: u8 = 5;

// ============================================================================
// Node Type Bits
// ============================================================================

/// Node has attached sensors.
pub const NODE_TYPE_BIT_SENSORS: u8 = 0;
/// Node repeats traffic for other nodes.
pub const NODE_TYPE_BIT_REPEATER: u8 = 1;
/// Node is a gateway to the controller.
pub const NODE_TYPE_BIT_GATEWAY: u8 = 2;
/// Node bridges two transports.
pub const NODE_TYPE_BIT_BRIDGE: u8 = 3;
/// Node is mains powered.
pub const NODE_TYPE_BIT_PSU: u8 = 4;
/// Node is battery powered.
pub const NODE_TYPE_BIT_BATTERY: u8 = 5;
/// Node is solar powered.
pub const NODE_TYPE_BIT_SOLAR: u8 = 6;

// ============================================================================
// Node Feature Bits
// ============================================================================

/// OTA firmware update supported.
pub const FEATURE_BIT_OTA_UPDATE: u8 = 0;
/// Remote reset supported.
pub const FEATURE_BIT_REMOTE_RESET: u8 = 1;
/// Node sleeps between transmissions.
pub const FEATURE_BIT_SLEEPING: u8 = 2;
/// Link-layer encryption enabled.
pub const FEATURE_BIT_ENCRYPTION: u8 = 3;
/// Inbound message buffering enabled.
pub const FEATURE_BIT_RX_QUEUE: u8 = 4;

// ============================================================================
// Signing Bits
// ============================================================================

/// Message signing enabled.
pub const SIGNING_BIT_ENABLED: u8 = 0;
/// Node requests signatures from peers.
pub const SIGNING_BIT_REQUEST_SIGNATURES: u8 = 1;
/// Node whitelisting enabled.
pub const SIGNING_BIT_WHITELISTING: u8 = 2;

// ============================================================================
// Uplink Transport Type Codes
// ============================================================================

/// Uplink over network/IP.
pub const UPLINK_TYPE_TCPIP: u8 = 0;
/// Uplink over RS-232 serial.
pub const UPLINK_TYPE_RS232: u8 = 1;
/// Uplink over RS-485 bus.
pub const UPLINK_TYPE_RS485: u8 = 2;
/// Uplink over nRF24 radio.
pub const UPLINK_TYPE_NRF24: u8 = 3;
/// Uplink over RFM69 radio.
pub const UPLINK_TYPE_RFM69: u8 = 4;
/// Uplink over RFM95 (LoRa) radio.
pub const UPLINK_TYPE_RFM95: u8 = 5;

// ============================================================================
// Serial Baud Rate Classes
// ============================================================================

/// Baud rate not in the known table.
pub const BAUD_CLASS_UNKNOWN: u8 = 0;
/// 9600 baud.
pub const BAUD_CLASS_9600: u8 = 1;
/// 19200 baud.
pub const BAUD_CLASS_19200: u8 = 2;
/// 38400 baud.
pub const BAUD_CLASS_38400: u8 = 3;
/// 57600 baud.
pub const BAUD_CLASS_57600: u8 = 4;
/// 115200 baud.
pub const BAUD_CLASS_115200: u8 = 5;

// ============================================================================
// Sentinels
// ============================================================================

/// Written in place of a 16-bit hardware reading the platform cannot supply.
pub const READING_NOT_SUPPORTED: u16 = 0xFFFF;
/// Undefined uplink parameter (channel, data rate, or power level).
pub const UPLINK_UNDEFINED: u8 = 0;

// ============================================================================
// Message Routing
// ============================================================================

/// Destination service id for node-internal traffic.
pub const SERVICE_ID_INTERNAL: u8 = 255;
/// Message class for internal protocol messages.
pub const MSG_CLASS_INTERNAL: u8 = 3;
/// Internal message type: discovery request.
pub const MSG_TYPE_DISCOVER_REQUEST: u8 = 20;
/// Internal message type: discovery response.
pub const MSG_TYPE_DISCOVER_RESPONSE: u8 = 21;

// ============================================================================
// Fixed Page Payload Sizes
// ============================================================================

/// GENERAL page payload size.
pub const PAGE_DATA_GENERAL: usize = 10;
/// FWCONFIG page payload size (the firmware identity record).
pub const PAGE_DATA_FWCONFIG: usize = 8;
/// HWPARAMS page payload size.
pub const PAGE_DATA_HWPARAMS: usize = 6;

// Fixed layouts are sized against the link at build time; there is no
// runtime length check in the encoder.
const _: () = assert!(PAGE_DATA_GENERAL <= MAX_PAGE_DATA);
const _: () = assert!(PAGE_DATA_FWCONFIG <= MAX_PAGE_DATA);
const _: () = assert!(PAGE_DATA_HWPARAMS <= MAX_PAGE_DATA);
