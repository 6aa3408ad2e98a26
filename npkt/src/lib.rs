#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

//! Extensible protocol-number registries and layered packet dissection.
//!
//! Protocol-number fields (EtherType, IP protocol, ICMP type/code, ports,
//! ...) are open code spaces: standards bodies keep assigning, vendors keep
//! squatting. This crate models each such field as an open enumeration — a
//! newtype over the raw wire integer with named constants, backed by a
//! runtime-extensible [`Registry`] whose lookup is total (unrecognized
//! values resolve to a synthetic `"unknown"` entry instead of failing).
//! Code spaces conditioned on a sibling field, like ICMP codes per ICMP
//! type, use the two-level [`ScopedRegistry`].
//!
//! The same identities drive [`dispatch`]: a [`dispatch::DecoderRegistry`]
//! maps each resolved number to the decoder of the encapsulated payload,
//! and [`dispatch::decode_chain`] walks a raw frame buffer into a chain of
//! typed layers with an explicit terminal reason.
//!
//! ```rust
//! use npkt::{Domain, NamedNum, Registry};
//! use npkt::ipv4::IpProtocol;
//!
//! let mut protos = Registry::<IpProtocol>::with_stock();
//! assert_eq!(protos.get(IpProtocol::TCP).name(), "TCP");
//! assert_eq!(protos.get(IpProtocol::from_raw(253)).to_string(), "unknown (253)");
//!
//! // Runtime extension: bind a vendor-specific number before decoding.
//! let prev = protos.register(NamedNum::new(IpProtocol::from_raw(253), "lab-proto")?);
//! assert!(prev.is_none());
//! assert_eq!(protos.get(IpProtocol::from_raw(253)).name(), "lab-proto");
//! # Ok::<(), npkt::InvalidValue>(())
//! ```

#[macro_use]
mod macros;

mod num;
pub use num::{Radix, RawNum};

mod named;
pub use named::{Domain, NamedNum, UNKNOWN};

mod error;
pub use error::{InvalidValue, Truncated};

mod registry;
pub use registry::{Registry, ScopedRegistry};

mod cursors;
pub use cursors::Cursor;

pub mod dispatch;

pub mod arp;
pub mod dns;
pub mod dot11;
pub mod ether;
pub mod icmpv4;
pub mod icmpv6;
pub mod ipv4;
pub mod link;
pub mod ppp;
pub mod tcp;
pub mod udp;
