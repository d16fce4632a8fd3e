//! Sensenet Discovery Protocol
//!
//! This crate provides types and utilities for the sensenet self-description
//! (discovery) protocol. A coordinator asks a node "what are you?" and the
//! node answers with one of a small set of fixed-layout pages, each of which
//! fits inside the link's 25-byte payload limit.
//!
//! # Protocol Overview
//!
//! Every catalog page starts with a packed two-byte header followed by a
//! page-specific payload:
//!
//! ```text
//! +-----------------------+-----------------------+------------------+
//! | page_id(5) version(3) | type_id(4) hw_class(4)| data[0..len]     |
//! +-----------------------+-----------------------+------------------+
//! ```
//!
//! The one exception is the legacy parent reply (page 0 and any page the
//! node does not recognize), which is a single unframed byte carrying the
//! parent node id. Older controllers only understand that form, so the
//! asymmetry is part of the wire contract.
//!
//! # Example
//!
//! ```rust,ignore
//! use sensenet_discover::{DiscoverResponder, DiscoverRequest, resolve_capabilities};
//!
//! let caps = resolve_capabilities(&config);
//! let responder = DiscoverResponder::new(&caps, &topology, &hardware, &firmware);
//! responder.respond(&mut sink, DiscoverRequest { sender: 12, page: Some(1) })?;
//! ```

mod capability;
mod constants;
mod dispatcher;
mod encoder;
mod error;
mod hal;
mod header;
mod pages;

pub use capability::*;
pub use constants::*;
pub use dispatcher::*;
pub use encoder::*;
pub use error::*;
pub use hal::*;
pub use header::*;
pub use pages::*;
