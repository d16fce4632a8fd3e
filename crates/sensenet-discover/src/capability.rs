//! Capability resolution.
//!
//! A node's build-time feature selection is expressed as an explicit
//! [`NodeConfig`] and folded once, at startup, into the packed
//! [`CapabilityBits`] that the page encoder broadcasts on request. The
//! resolution is a pure function: the same config always yields
//! bit-identical masks, and the result never changes while the node runs.
//! None of the masks carry secrets; they are sent in cleartext.

use crate::constants::*;
use crate::pages::HardwareClass;

/// Which link transports are compiled into this node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransportSet {
    /// Serial (RS-232) link.
    pub serial: bool,
    /// Network/IP link.
    pub tcpip: bool,
    /// nRF24 radio.
    pub nrf24: bool,
    /// RFM69 radio.
    pub rfm69: bool,
    /// RFM95 (LoRa) radio.
    pub rfm95: bool,
    /// RS-485 bus.
    pub rs485: bool,
}

impl TransportSet {
    /// Pack the set into its availability bitmask.
    pub fn mask(&self) -> u8 {
        bit(self.serial, TRANSPORT_BIT_SERIAL)
            | bit(self.tcpip, TRANSPORT_BIT_TCPIP)
            | bit(self.nrf24, TRANSPORT_BIT_NRF24)
            | bit(self.rfm69, TRANSPORT_BIT_RFM69)
            | bit(self.rfm95, TRANSPORT_BIT_RFM95)
            | bit(self.rs485, TRANSPORT_BIT_RS485)
    }

    /// Number of compiled-in transports.
    pub fn count(&self) -> u8 {
        self.mask().count_ones() as u8
    }
}

/// Node configuration: named feature toggles plus the small integer
/// parameters of the configured transports.
///
/// This replaces the original firmware's compile-time conditionals with a
/// runtime value, so every feature combination is testable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NodeConfig {
    /// Compiled-in transports.
    pub transports: TransportSet,

    /// Node has attached sensors.
    pub sensors: bool,
    /// Node repeats traffic for other nodes.
    pub repeater: bool,
    /// Node is a gateway to the controller.
    pub gateway: bool,
    /// Node bridges two transports.
    pub bridge: bool,

    /// Mains powered.
    pub psu: bool,
    /// Battery powered.
    pub battery: bool,
    /// Solar powered.
    pub solar: bool,

    /// OTA firmware update supported.
    pub ota_update: bool,
    /// Remote reset supported.
    pub remote_reset: bool,
    /// Node sleeps between transmissions.
    pub sleeping: bool,
    /// Link-layer encryption enabled.
    pub encryption: bool,
    /// Inbound message buffering enabled.
    pub rx_queue: bool,

    /// Message signing enabled.
    pub signing: bool,
    /// Node requests signatures from peers.
    pub request_signatures: bool,
    /// Node whitelisting enabled.
    pub whitelisting: bool,

    /// Serial/RS-485 baud rate.
    pub serial_baud_rate: u32,
    /// Listen port for the IP uplink.
    pub ip_port: u16,
    /// Radio channel (nRF24).
    pub radio_channel: u16,
    /// Radio data-rate code (nRF24: 1=250kbps, 2=1Mbps, 3=2Mbps).
    pub radio_data_rate: u8,
    /// Radio power-amplifier level code (nRF24: 1=min .. 4=max).
    pub radio_power_level: u8,
    /// Radio carrier frequency in MHz (RFM69/RFM95).
    pub radio_frequency: u16,

    /// Hardware platform class advertised in the header.
    pub hardware_class: HardwareClass,
}

impl Default for NodeConfig {
    fn default() -> Self {
        NodeConfig {
            transports: TransportSet::default(),
            sensors: true,
            repeater: false,
            gateway: false,
            bridge: false,
            psu: false,
            battery: false,
            solar: false,
            ota_update: false,
            remote_reset: true,
            sleeping: false,
            encryption: false,
            rx_queue: false,
            signing: false,
            request_signatures: false,
            whitelisting: false,
            serial_baud_rate: 115_200,
            ip_port: 5003,
            radio_channel: 76,
            radio_data_rate: 1,
            radio_power_level: 4,
            radio_frequency: 868,
            hardware_class: HardwareClass::Unknown,
        }
    }
}

/// Parameters of the uplink (next hop toward the gateway) transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UplinkParams {
    /// Uplink transport type code (`UPLINK_TYPE_*`).
    pub transport_type: u8,
    /// Data-rate code: baud class for serial links, radio data-rate code
    /// for nRF24, otherwise [`UPLINK_UNDEFINED`].
    pub data_rate: u8,
    /// Power-amplifier level code, or [`UPLINK_UNDEFINED`].
    pub power_level: u8,
    /// Channel: radio channel, IP port, or carrier frequency depending on
    /// the transport type.
    pub channel: u16,
}

/// Capability summary derived once from a [`NodeConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityBits {
    /// Bitmask of compiled-in transports (`TRANSPORT_BIT_*`).
    pub transport_mask: u8,
    /// Number of bits set in `transport_mask`.
    pub transport_count: u8,
    /// Node role and power-source bits (`NODE_TYPE_BIT_*`).
    pub node_type_mask: u8,
    /// Node feature bits (`FEATURE_BIT_*`).
    pub node_feature_mask: u8,
    /// Signing option bits (`SIGNING_BIT_*`).
    pub signing_mask: u8,
    /// Uplink transport parameters, `None` when no transport is compiled in.
    pub uplink: Option<UplinkParams>,
    /// Hardware platform class for the header.
    pub hardware_class: HardwareClass,
}

fn bit(flag: bool, position: u8) -> u8 {
    (flag as u8) << position
}

/// Map a serial baud rate to its wire class code.
pub fn baud_class(baud_rate: u32) -> u8 {
    match baud_rate {
        9_600 => BAUD_CLASS_9600,
        19_200 => BAUD_CLASS_19200,
        38_400 => BAUD_CLASS_38400,
        57_600 => BAUD_CLASS_57600,
        115_200 => BAUD_CLASS_115200,
        _ => BAUD_CLASS_UNKNOWN,
    }
}

fn resolve_uplink(config: &NodeConfig) -> Option<UplinkParams> {
    let t = &config.transports;
    // Priority order matches the original firmware: wired serial links
    // first, then IP, then the radios.
    if t.serial || t.rs485 {
        Some(UplinkParams {
            transport_type: if t.serial {
                UPLINK_TYPE_RS232
            } else {
                UPLINK_TYPE_RS485
            },
            data_rate: baud_class(config.serial_baud_rate),
            power_level: UPLINK_UNDEFINED,
            channel: UPLINK_UNDEFINED as u16,
        })
    } else if t.tcpip {
        Some(UplinkParams {
            transport_type: UPLINK_TYPE_TCPIP,
            data_rate: UPLINK_UNDEFINED,
            power_level: UPLINK_UNDEFINED,
            channel: config.ip_port,
        })
    } else if t.nrf24 {
        Some(UplinkParams {
            transport_type: UPLINK_TYPE_NRF24,
            data_rate: config.radio_data_rate,
            power_level: config.radio_power_level,
            channel: config.radio_channel,
        })
    } else if t.rfm69 || t.rfm95 {
        Some(UplinkParams {
            transport_type: if t.rfm69 {
                UPLINK_TYPE_RFM69
            } else {
                UPLINK_TYPE_RFM95
            },
            data_rate: UPLINK_UNDEFINED,
            power_level: UPLINK_UNDEFINED,
            channel: config.radio_frequency,
        })
    } else {
        None
    }
}

/// Fold a node configuration into its packed capability masks.
///
/// Deterministic and idempotent: absent flags resolve to zero bits, there
/// is no error path.
pub fn resolve_capabilities(config: &NodeConfig) -> CapabilityBits {
    let node_type_mask = bit(config.sensors, NODE_TYPE_BIT_SENSORS)
        | bit(config.repeater, NODE_TYPE_BIT_REPEATER)
        | bit(config.gateway, NODE_TYPE_BIT_GATEWAY)
        | bit(config.bridge, NODE_TYPE_BIT_BRIDGE)
        | bit(config.psu, NODE_TYPE_BIT_PSU)
        | bit(config.battery, NODE_TYPE_BIT_BATTERY)
        | bit(config.solar, NODE_TYPE_BIT_SOLAR);

    let node_feature_mask = bit(config.ota_update, FEATURE_BIT_OTA_UPDATE)
        | bit(config.remote_reset, FEATURE_BIT_REMOTE_RESET)
        | bit(config.sleeping, FEATURE_BIT_SLEEPING)
        | bit(config.encryption, FEATURE_BIT_ENCRYPTION)
        | bit(config.rx_queue, FEATURE_BIT_RX_QUEUE);

    let signing_mask = bit(config.signing, SIGNING_BIT_ENABLED)
        | bit(config.request_signatures, SIGNING_BIT_REQUEST_SIGNATURES)
        | bit(config.whitelisting, SIGNING_BIT_WHITELISTING);

    CapabilityBits {
        transport_mask: config.transports.mask(),
        transport_count: config.transports.count(),
        node_type_mask,
        node_feature_mask,
        signing_mask,
        uplink: resolve_uplink(config),
        hardware_class: config.hardware_class,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_resolves_to_zero_masks() {
        let config = NodeConfig {
            sensors: false,
            remote_reset: false,
            ..NodeConfig::default()
        };
        let caps = resolve_capabilities(&config);
        assert_eq!(caps.transport_mask, 0);
        assert_eq!(caps.transport_count, 0);
        assert_eq!(caps.node_type_mask, 0);
        assert_eq!(caps.node_feature_mask, 0);
        assert_eq!(caps.signing_mask, 0);
        assert_eq!(caps.uplink, None);
    }

    #[test]
    fn test_node_type_mask_bits() {
        // sensors + PSU, everything else off
        let config = NodeConfig {
            sensors: true,
            psu: true,
            ..NodeConfig::default()
        };
        let caps = resolve_capabilities(&config);
        assert_eq!(caps.node_type_mask, 0b0010001);
    }

    #[test]
    fn test_transport_mask_and_count_agree() {
        let config = NodeConfig {
            transports: TransportSet {
                serial: true,
                nrf24: true,
                rs485: true,
                ..TransportSet::default()
            },
            ..NodeConfig::default()
        };
        let caps = resolve_capabilities(&config);
        assert_eq!(caps.transport_mask, 0b100101);
        assert_eq!(caps.transport_count, 3);
    }

    #[test]
    fn test_feature_and_signing_masks() {
        let config = NodeConfig {
            ota_update: true,
            remote_reset: true,
            sleeping: false,
            encryption: true,
            rx_queue: true,
            signing: true,
            whitelisting: true,
            ..NodeConfig::default()
        };
        let caps = resolve_capabilities(&config);
        assert_eq!(caps.node_feature_mask, 0b11011);
        assert_eq!(caps.signing_mask, 0b101);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let config = NodeConfig {
            transports: TransportSet {
                tcpip: true,
                rfm69: true,
                ..TransportSet::default()
            },
            gateway: true,
            psu: true,
            signing: true,
            ..NodeConfig::default()
        };
        assert_eq!(resolve_capabilities(&config), resolve_capabilities(&config));
    }

    #[test]
    fn test_uplink_priority_serial_over_radio() {
        let config = NodeConfig {
            transports: TransportSet {
                serial: true,
                nrf24: true,
                ..TransportSet::default()
            },
            serial_baud_rate: 57_600,
            ..NodeConfig::default()
        };
        let uplink = resolve_capabilities(&config).uplink.unwrap();
        assert_eq!(uplink.transport_type, UPLINK_TYPE_RS232);
        assert_eq!(uplink.data_rate, BAUD_CLASS_57600);
        assert_eq!(uplink.power_level, UPLINK_UNDEFINED);
    }

    #[test]
    fn test_uplink_radio_parameters() {
        let config = NodeConfig {
            transports: TransportSet {
                nrf24: true,
                ..TransportSet::default()
            },
            radio_channel: 101,
            radio_data_rate: 2,
            radio_power_level: 3,
            ..NodeConfig::default()
        };
        let uplink = resolve_capabilities(&config).uplink.unwrap();
        assert_eq!(uplink.transport_type, UPLINK_TYPE_NRF24);
        assert_eq!(uplink.channel, 101);
        assert_eq!(uplink.data_rate, 2);
        assert_eq!(uplink.power_level, 3);
    }

    #[test]
    fn test_baud_class_table() {
        assert_eq!(baud_class(9_600), BAUD_CLASS_9600);
        assert_eq!(baud_class(115_200), BAUD_CLASS_115200);
        assert_eq!(baud_class(31_250), BAUD_CLASS_UNKNOWN);
    }
}
