//! IPv4 headers and the IP protocol number space.

use std::net::Ipv4Addr;

use byteorder::{ByteOrder, NetworkEndian};
use bytes::Buf;

use crate::dispatch::{Decoded, HeaderDecoder, LayerKey};
use crate::error::Truncated;
use crate::{Cursor, Registry};

named_enum! {
    /// IANA-assigned IP protocol numbers, shared by IPv4 and IPv6.
    pub struct IpProtocol (u8), "ip-protocol" {
        /// IPv6 hop-by-hop options.
        HOPOPT = 0 => "IPv6 Hop-by-Hop Option",
        /// Internet Control Message Protocol.
        ICMP = 1 => "ICMPv4",
        /// Internet Group Management Protocol.
        IGMP = 2 => "IGMP",
        /// IP in IP encapsulation.
        IPIP = 4 => "IP in IP",
        /// Transmission Control Protocol.
        TCP = 6 => "TCP",
        /// Exterior Gateway Protocol.
        EGP = 8 => "EGP",
        /// User Datagram Protocol.
        UDP = 17 => "UDP",
        /// Datagram Congestion Control Protocol.
        DCCP = 33 => "DCCP",
        /// IPv6 encapsulation.
        IPV6 = 41 => "IPv6 Encapsulation",
        /// IPv6 routing header.
        IPV6_ROUTE = 43 => "IPv6 Route",
        /// IPv6 fragment header.
        IPV6_FRAG = 44 => "IPv6 Fragment",
        /// Resource reservation protocol.
        RSVP = 46 => "RSVP",
        /// Generic routing encapsulation.
        GRE = 47 => "GRE",
        /// Encapsulating security payload.
        ESP = 50 => "ESP",
        /// Authentication header.
        AH = 51 => "AH",
        /// ICMP for IPv6.
        IPV6_ICMP = 58 => "ICMPv6",
        /// IPv6 no next header.
        IPV6_NO_NXT = 59 => "IPv6 No Next Header",
        /// IPv6 destination options.
        IPV6_OPTS = 60 => "IPv6 Destination Options",
        /// Cisco EIGRP.
        EIGRP = 88 => "EIGRP",
        /// Open Shortest Path First.
        OSPF = 89 => "OSPF",
        /// Protocol independent multicast.
        PIM = 103 => "PIM",
        /// Virtual router redundancy protocol.
        VRRP = 112 => "VRRP",
        /// Layer two tunneling protocol.
        L2TP = 115 => "L2TP",
        /// Stream Control Transmission Protocol.
        SCTP = 132 => "SCTP",
        /// Lightweight UDP.
        UDPLITE = 136 => "UDP-Lite",
        /// MPLS encapsulated in IP.
        MPLS_IN_IP = 137 => "MPLS in IP",
    }
}

/// Minimum byte length of an IPv4 header (IHL of 5).
pub const IPV4_HEADER_LEN: usize = 20;

/// An IPv4 header over a byte container.
#[derive(Debug, Clone, Copy)]
pub struct Ipv4Header<T> {
    buf: T,
}

impl<T: AsRef<[u8]>> Ipv4Header<T> {
    /// Parse, handing the buffer back on a short read.
    ///
    /// Only the fixed 20 bytes are required here; callers that walk options
    /// must check [`Ipv4Header::header_len`] against the buffer themselves.
    #[inline]
    pub fn new(buf: T) -> Result<Self, T> {
        if buf.as_ref().len() >= IPV4_HEADER_LEN {
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

    /// The version field. 4 for well-formed packets.
    #[inline]
    pub fn version(&self) -> u8 {
        self.buf.as_ref()[0] >> 4
    }

    /// Header length in bytes, as claimed by the IHL field.
    #[inline]
    pub fn header_len(&self) -> usize {
        ((self.buf.as_ref()[0] & 0x0f) as usize) * 4
    }

    /// The total length field: header plus payload, in bytes.
    #[inline]
    pub fn total_len(&self) -> u16 {
        NetworkEndian::read_u16(&self.buf.as_ref()[2..4])
    }

    /// Time to live.
    #[inline]
    pub fn ttl(&self) -> u8 {
        self.buf.as_ref()[8]
    }

    /// The protocol number of the payload.
    #[inline]
    pub fn protocol(&self) -> IpProtocol {
        IpProtocol::from(self.buf.as_ref()[9])
    }

    /// Source address.
    #[inline]
    pub fn src_addr(&self) -> Ipv4Addr {
        let b = &self.buf.as_ref()[12..16];
        Ipv4Addr::new(b[0], b[1], b[2], b[3])
    }

    /// Destination address.
    #[inline]
    pub fn dst_addr(&self) -> Ipv4Addr {
        let b = &self.buf.as_ref()[16..20];
        Ipv4Addr::new(b[0], b[1], b[2], b[3])
    }
}

/// Decodes an IPv4 header and dispatches on its protocol number.
#[derive(Debug)]
pub struct Ipv4Decoder {
    protos: Registry<IpProtocol>,
}

impl Default for Ipv4Decoder {
    fn default() -> Self {
        Self {
            protos: Registry::with_stock(),
        }
    }
}

impl HeaderDecoder for Ipv4Decoder {
    fn decode(&self, cur: &mut Cursor<'_>) -> Result<Decoded, Truncated> {
        let hdr = Ipv4Header::new(cur.chunk()).map_err(|buf| Truncated {
            protocol: "ipv4",
            needed: IPV4_HEADER_LEN,
            available: buf.len(),
        })?;
        let header_len = hdr.header_len();
        if header_len < IPV4_HEADER_LEN {
            // An IHL below 5 claims a header shorter than the minimum.
            return Err(Truncated {
                protocol: "ipv4",
                needed: IPV4_HEADER_LEN,
                available: header_len,
            });
        }
        if cur.remaining() < header_len {
            return Err(Truncated {
                protocol: "ipv4",
                needed: header_len,
                available: cur.remaining(),
            });
        }
        let protocol = hdr.protocol();
        let summary = format!(
            "{} > {}, ttl {}, proto {}",
            hdr.src_addr(),
            hdr.dst_addr(),
            hdr.ttl(),
            self.protos.get(protocol)
        );
        cur.advance(header_len);
        Ok(Decoded {
            summary,
            next: Some(LayerKey::of(protocol)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Domain;

    static HEADER_BYTES: [u8; 24] = [
        0x46, 0x00, 0x00, 0x2c, 0x00, 0x00, 0x40, 0x00, 0x40, 0x11, 0x00, 0x00, 0xc0, 0xa8,
        0x00, 0x01, 0x0a, 0x00, 0x00, 0x01, 0x94, 0x04, 0x00, 0x00,
    ];

    #[test]
    fn header_parse() {
        let hdr = Ipv4Header::new(&HEADER_BYTES[..]).unwrap();
        assert_eq!(hdr.version(), 4);
        assert_eq!(hdr.header_len(), 24);
        assert_eq!(hdr.total_len(), 44);
        assert_eq!(hdr.ttl(), 64);
        assert_eq!(hdr.protocol(), IpProtocol::UDP);
        assert_eq!(hdr.src_addr(), Ipv4Addr::new(192, 168, 0, 1));
        assert_eq!(hdr.dst_addr(), Ipv4Addr::new(10, 0, 0, 1));
    }

    #[test]
    fn decoder_honors_ihl_options() {
        let mut cur = Cursor::new(&HEADER_BYTES[..]);
        let decoded = Ipv4Decoder::default().decode(&mut cur).unwrap();
        // IHL of 6 consumes the 4 option bytes too.
        assert_eq!(cur.pos(), 24);
        assert_eq!(decoded.next, Some(LayerKey::of(IpProtocol::UDP)));
        assert!(decoded.summary.contains("UDP (17)"));
    }

    #[test]
    fn decoder_rejects_buffer_shorter_than_ihl() {
        let mut cur = Cursor::new(&HEADER_BYTES[..22]);
        let err = Ipv4Decoder::default().decode(&mut cur).unwrap_err();
        assert_eq!(err.needed, 24);
        assert_eq!(err.available, 22);
        assert_eq!(cur.pos(), 0);
    }

    #[test]
    fn protocol_numbers_resolve_from_stock() {
        let reg = Registry::<IpProtocol>::with_stock();
        assert_eq!(reg.get(IpProtocol::from_raw(6)).name(), "TCP");
        assert_eq!(reg.get(IpProtocol::from_raw(17)).name(), "UDP");
        assert_eq!(reg.get(IpProtocol::from_raw(89)).name(), "OSPF");
    }
}
