//! Request dispatch.
//!
//! The dispatcher is the externally callable entry point: it maps one
//! incoming discovery request to one outgoing response message. Requests
//! for catalog pages get the framed header+payload form; page 0, an
//! omitted page, and any unrecognized page get the legacy reply — a
//! single unframed byte carrying the parent node id. A decoder therefore
//! cannot assume every discovery response starts with a two-byte header.

use log::debug;

use crate::capability::CapabilityBits;
use crate::constants::*;
use crate::encoder::PageEncoder;
use crate::error::DiscoverError;
use crate::hal::{FirmwareStore, Hardware, Topology};
use crate::pages::Page;

/// An incoming discovery request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoverRequest {
    /// Requesting node id (the response is addressed back to it).
    pub sender: u8,
    /// Requested page number, `None` when the request carried no page.
    pub page: Option<u8>,
}

/// How a request will be answered.
///
/// The choice is a pure function of the requested page number; making it
/// an explicit state keeps the backward-compatibility contract visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// A recognized catalog page: framed header + payload.
    CatalogPage(Page),
    /// The legacy parent reply: one unframed byte, no header.
    LegacyFallback,
}

impl ResponseMode {
    /// Select the response mode for a requested page number.
    pub fn for_request(page: Option<u8>) -> Self {
        match page.and_then(Page::from_request) {
            Some(page) => ResponseMode::CatalogPage(page),
            None => ResponseMode::LegacyFallback,
        }
    }
}

/// An outgoing message handed to the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    /// Sending node id.
    pub sender: u8,
    /// Destination service id on the receiving node.
    pub destination_service: u8,
    /// Message class.
    pub class: u8,
    /// Message type within the class.
    pub message_type: u8,
    /// Whether an acknowledgement is requested.
    pub ack_requested: bool,
    /// Encoded payload.
    pub payload: Vec<u8>,
}

/// Transport-layer seam: builds and sends one message.
pub trait MessageSink {
    /// Hand a finished message to the transport.
    fn send(&mut self, message: OutgoingMessage);
}

/// Answers discovery requests for one node.
pub struct DiscoverResponder<'a> {
    topology: &'a dyn Topology,
    encoder: PageEncoder<'a>,
}

impl<'a> DiscoverResponder<'a> {
    /// Create a responder over the node's capabilities and collaborators.
    pub fn new(
        caps: &'a CapabilityBits,
        topology: &'a dyn Topology,
        hardware: &'a dyn Hardware,
        firmware: &'a dyn FirmwareStore,
    ) -> Self {
        DiscoverResponder {
            topology,
            encoder: PageEncoder::new(caps, topology, hardware, firmware),
        }
    }

    /// Answer one discovery request.
    ///
    /// Returns `Ok(true)` when a response was handed to the sink. The only
    /// failure is an unreadable firmware-config record; unsupported pages
    /// silently degrade to the legacy fallback instead.
    pub fn respond(
        &self,
        sink: &mut dyn MessageSink,
        request: DiscoverRequest,
    ) -> Result<bool, DiscoverError> {
        let mode = ResponseMode::for_request(request.page);
        let payload = match mode {
            ResponseMode::CatalogPage(page) => self.encoder.encode_page(page)?.to_bytes(),
            ResponseMode::LegacyFallback => vec![self.topology.parent_node_id()],
        };

        debug!(
            "discovery request from {} for page {:?}: {:?}, {} bytes",
            request.sender,
            request.page,
            mode,
            payload.len()
        );

        sink.send(OutgoingMessage {
            sender: request.sender,
            destination_service: SERVICE_ID_INTERNAL,
            class: MSG_CLASS_INTERNAL,
            message_type: MSG_TYPE_DISCOVER_RESPONSE,
            ack_requested: false,
            payload,
        });
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{resolve_capabilities, NodeConfig};
    use crate::hal::FirmwareInfo;

    struct TestTopology;

    impl Topology for TestTopology {
        fn parent_node_id(&self) -> u8 {
            7
        }
        fn distance_to_gateway(&self) -> u8 {
            1
        }
    }

    struct TestHardware;

    impl Hardware for TestHardware {
        fn uptime_millis(&self) -> u32 {
            5000
        }
        fn cpu_voltage_mv(&self) -> Option<u16> {
            Some(5000)
        }
        fn cpu_frequency(&self) -> Option<u16> {
            Some(160)
        }
        fn free_memory(&self) -> Option<u16> {
            Some(812)
        }
        fn unique_id(&self) -> Option<Vec<u8>> {
            None
        }
    }

    struct TestFirmware;

    impl FirmwareStore for TestFirmware {
        fn firmware_info(&self) -> Result<FirmwareInfo, DiscoverError> {
            Ok(FirmwareInfo::default())
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        messages: Vec<OutgoingMessage>,
    }

    impl MessageSink for RecordingSink {
        fn send(&mut self, message: OutgoingMessage) {
            self.messages.push(message);
        }
    }

    fn respond(page: Option<u8>) -> OutgoingMessage {
        let config = NodeConfig::default();
        let caps = resolve_capabilities(&config);
        let topology = TestTopology;
        let hardware = TestHardware;
        let firmware = TestFirmware;
        let responder = DiscoverResponder::new(&caps, &topology, &hardware, &firmware);
        let mut sink = RecordingSink::default();
        let produced = responder
            .respond(&mut sink, DiscoverRequest { sender: 12, page })
            .unwrap();
        assert!(produced);
        assert_eq!(sink.messages.len(), 1);
        sink.messages.pop().unwrap()
    }

    #[test]
    fn test_response_mode_selection() {
        assert_eq!(
            ResponseMode::for_request(Some(PAGE_ID_GENERAL)),
            ResponseMode::CatalogPage(Page::General)
        );
        assert_eq!(
            ResponseMode::for_request(Some(PAGE_ID_PARENT)),
            ResponseMode::LegacyFallback
        );
        assert_eq!(
            ResponseMode::for_request(Some(99)),
            ResponseMode::LegacyFallback
        );
        assert_eq!(ResponseMode::for_request(None), ResponseMode::LegacyFallback);
    }

    #[test]
    fn test_catalog_page_response_is_framed() {
        let message = respond(Some(PAGE_ID_GENERAL));
        assert_eq!(message.payload.len(), HEADER_SIZE + PAGE_DATA_GENERAL);
        // header byte 0: page id 1, version 2
        assert_eq!(message.payload[0], (HEADER_VERSION << 5) | PAGE_ID_GENERAL);
        assert_eq!(message.message_type, MSG_TYPE_DISCOVER_RESPONSE);
        assert_eq!(message.destination_service, SERVICE_ID_INTERNAL);
        assert_eq!(message.class, MSG_CLASS_INTERNAL);
        assert!(!message.ack_requested);
        assert_eq!(message.sender, 12);
    }

    #[test]
    fn test_page_zero_gets_legacy_reply() {
        let message = respond(Some(PAGE_ID_PARENT));
        // one unframed byte: the parent node id
        assert_eq!(message.payload, vec![7]);
    }

    #[test]
    fn test_unknown_page_gets_legacy_reply() {
        let message = respond(Some(99));
        assert_eq!(message.payload, vec![7]);
    }

    #[test]
    fn test_omitted_page_gets_legacy_reply() {
        let message = respond(None);
        assert_eq!(message.payload, vec![7]);
    }
}
