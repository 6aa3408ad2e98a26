//! ICMPv4 headers, message types and the type-scoped code space.

use byteorder::{ByteOrder, NetworkEndian};
use bytes::Buf;

use crate::dispatch::{Decoded, HeaderDecoder};
use crate::error::Truncated;
use crate::{Cursor, Domain, Registry, ScopedRegistry};

named_enum! {
    /// ICMPv4 message types.
    pub struct IcmpType (u8), "icmpv4-type" {
        /// Echo reply.
        ECHO_REPLY = 0 => "Echo Reply",
        /// Destination unreachable.
        DST_UNREACHABLE = 3 => "Destination Unreachable",
        /// Source quench (deprecated).
        SOURCE_QUENCH = 4 => "Source Quench",
        /// Redirect.
        REDIRECT = 5 => "Redirect",
        /// Echo request.
        ECHO_REQUEST = 8 => "Echo Request",
        /// Router advertisement.
        ROUTER_ADVERTISEMENT = 9 => "Router Advertisement",
        /// Router solicitation.
        ROUTER_SOLICITATION = 10 => "Router Solicitation",
        /// Time exceeded.
        TIME_EXCEEDED = 11 => "Time Exceeded",
        /// Parameter problem.
        PARAMETER_PROBLEM = 12 => "Parameter Problem",
        /// Timestamp request.
        TIMESTAMP = 13 => "Timestamp",
        /// Timestamp reply.
        TIMESTAMP_REPLY = 14 => "Timestamp Reply",
        /// Information request (deprecated).
        INFO_REQUEST = 15 => "Information Request",
        /// Information reply (deprecated).
        INFO_REPLY = 16 => "Information Reply",
        /// Address mask request.
        ADDRESS_MASK_REQUEST = 17 => "Address Mask Request",
        /// Address mask reply.
        ADDRESS_MASK_REPLY = 18 => "Address Mask Reply",
    }
}

/// An ICMPv4 code. Its meaning depends entirely on the enclosing message
/// type, so the catalogue lives in a [`ScopedRegistry`] keyed by
/// [`IcmpType`]; see [`code_registry`].
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct IcmpCode(u8);

impl IcmpCode {
    /// Get the raw value.
    pub fn raw(&self) -> u8 {
        self.0
    }
}

impl Domain for IcmpCode {
    type Raw = u8;

    const NAME: &'static str = "icmpv4-code";

    #[inline]
    fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    #[inline]
    fn raw(self) -> u8 {
        self.0
    }
}

impl From<u8> for IcmpCode {
    #[inline]
    fn from(value: u8) -> IcmpCode {
        IcmpCode(value)
    }
}

impl From<IcmpCode> for u8 {
    #[inline]
    fn from(value: IcmpCode) -> u8 {
        value.0
    }
}

static CODE_TABLE: &[(u8, u8, &str)] = &[
    (3, 0, "Network Unreachable"),
    (3, 1, "Host Unreachable"),
    (3, 2, "Protocol Unreachable"),
    (3, 3, "Port Unreachable"),
    (3, 4, "Fragmentation Needed"),
    (3, 5, "Source Route Failed"),
    (3, 6, "Destination Network Unknown"),
    (3, 7, "Destination Host Unknown"),
    (3, 8, "Source Host Isolated"),
    (3, 9, "Network Administratively Prohibited"),
    (3, 10, "Host Administratively Prohibited"),
    (3, 11, "Network Unreachable for TOS"),
    (3, 12, "Host Unreachable for TOS"),
    (3, 13, "Communication Administratively Prohibited"),
    (3, 14, "Host Precedence Violation"),
    (3, 15, "Precedence Cutoff in Effect"),
    (5, 0, "Redirect for Network"),
    (5, 1, "Redirect for Host"),
    (5, 2, "Redirect for TOS and Network"),
    (5, 3, "Redirect for TOS and Host"),
    (11, 0, "TTL Exceeded in Transit"),
    (11, 1, "Fragment Reassembly Time Exceeded"),
    (12, 0, "Pointer Indicates Error"),
    (12, 1, "Missing Required Option"),
    (12, 2, "Bad Length"),
];

/// The stock type-scoped code catalogue.
pub fn code_registry() -> ScopedRegistry<IcmpType, IcmpCode> {
    ScopedRegistry::from_table(CODE_TABLE)
}

/// Fixed byte length of the ICMPv4 header.
pub const ICMPV4_HEADER_LEN: usize = 8;

/// An ICMPv4 header over a byte container.
#[derive(Debug, Clone, Copy)]
pub struct Icmpv4Header<T> {
    buf: T,
}

impl<T: AsRef<[u8]>> Icmpv4Header<T> {
    /// Parse, handing the buffer back on a short read.
    #[inline]
    pub fn new(buf: T) -> Result<Self, T> {
        if buf.as_ref().len() >= ICMPV4_HEADER_LEN {
            Ok(Self { buf })
        } else {
            Err(buf)
        }
    }

    /// Wrap without length checking.
    #[inline]
    pub fn new_unchecked(buf: T) -> Self {
        Self { buf }
    }

    /// The message type.
    #[inline]
    pub fn icmp_type(&self) -> IcmpType {
        IcmpType::from(self.buf.as_ref()[0])
    }

    /// The code, scoped by [`Icmpv4Header::icmp_type`].
    #[inline]
    pub fn code(&self) -> IcmpCode {
        IcmpCode::from(self.buf.as_ref()[1])
    }

    /// The checksum field.
    #[inline]
    pub fn checksum(&self) -> u16 {
        NetworkEndian::read_u16(&self.buf.as_ref()[2..4])
    }
}

/// Decodes an ICMPv4 header. A leaf: nothing names the message body.
#[derive(Debug)]
pub struct Icmpv4Decoder {
    types: Registry<IcmpType>,
    codes: ScopedRegistry<IcmpType, IcmpCode>,
}

impl Default for Icmpv4Decoder {
    fn default() -> Self {
        Self {
            types: Registry::with_stock(),
            codes: code_registry(),
        }
    }
}

impl HeaderDecoder for Icmpv4Decoder {
    fn decode(&self, cur: &mut Cursor<'_>) -> Result<Decoded, Truncated> {
        let hdr = Icmpv4Header::new(cur.chunk()).map_err(|buf| Truncated {
            protocol: "icmpv4",
            needed: ICMPV4_HEADER_LEN,
            available: buf.len(),
        })?;
        let ty = hdr.icmp_type();
        let summary = format!(
            "{}, code {}",
            self.types.get(ty),
            self.codes.get(ty, hdr.code())
        );
        cur.advance(ICMPV4_HEADER_LEN);
        Ok(Decoded {
            summary,
            next: None,
        })
    }
}
