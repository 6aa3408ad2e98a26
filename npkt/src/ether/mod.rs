//! Ethernet II frames and the EtherType code space.

use core::fmt;

use byteorder::{ByteOrder, NetworkEndian};
use bytes::Buf;

use crate::dispatch::{Decoded, HeaderDecoder, LayerKey};
use crate::error::Truncated;
use crate::{Cursor, Registry};

named_enum! {
    /// The EtherType field of an Ethernet II frame.
    ///
    /// Values below 0x0600 are IEEE 802.3 lengths, not EtherTypes, so the
    /// catalogue starts in the protocol range.
    pub struct EtherType (u16), "ether-type", radix: Hex {
        /// Internet Protocol version 4.
        IPV4 = 0x0800 => "IPv4",
        /// Address Resolution Protocol.
        ARP = 0x0806 => "ARP",
        /// Wake-on-LAN magic packet.
        WAKE_ON_LAN = 0x0842 => "Wake-on-LAN",
        /// Reverse ARP.
        RARP = 0x8035 => "RARP",
        /// IEEE 802.1Q VLAN tag.
        VLAN = 0x8100 => "802.1Q VLAN",
        /// Internet Protocol version 6.
        IPV6 = 0x86dd => "IPv6",
        /// Ethernet flow control (PAUSE).
        FLOW_CONTROL = 0x8808 => "Ethernet Flow Control",
        /// MPLS unicast.
        MPLS_UNICAST = 0x8847 => "MPLS Unicast",
        /// MPLS multicast.
        MPLS_MULTICAST = 0x8848 => "MPLS Multicast",
        /// PPPoE discovery stage.
        PPPOE_DISCOVERY = 0x8863 => "PPPoE Discovery",
        /// PPPoE session stage.
        PPPOE_SESSION = 0x8864 => "PPPoE Session",
        /// IEEE 802.1X port authentication.
        EAPOL = 0x888e => "802.1X EAPOL",
        /// IEEE 802.1ad provider bridging (QinQ).
        QINQ = 0x88a8 => "802.1ad Provider Bridging",
        /// Link Layer Discovery Protocol.
        LLDP = 0x88cc => "LLDP",
        /// IEEE 802.1AE MAC security.
        MACSEC = 0x88e5 => "802.1AE MACsec",
        /// IEEE 802.1ah provider backbone bridging.
        PBB = 0x88e7 => "802.1ah PBB",
        /// Precision Time Protocol over Ethernet.
        PTP = 0x88f7 => "PTP",
        /// Fibre Channel over Ethernet.
        FCOE = 0x8906 => "FCoE",
        /// RDMA over Converged Ethernet.
        ROCE = 0x8915 => "RoCE",
    }
}

/// A six-octet Ethernet II address.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct EtherAddr(pub [u8; 6]);

impl EtherAddr {
    /// The broadcast address.
    pub const BROADCAST: EtherAddr = EtherAddr([0xff; 6]);

    /// Construct an Ethernet address from a sequence of octets, in big-endian.
    ///
    /// # Panics
    /// The function panics if `data` is not six octets long.
    pub fn from_bytes(data: &[u8]) -> EtherAddr {
        let mut bytes = [0; 6];
        bytes.copy_from_slice(data);
        EtherAddr(bytes)
    }

    /// Return the address as a sequence of octets, in big-endian.
    pub const fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Query whether this address is the broadcast address.
    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }

    /// Query whether the 'multicast' bit in the OUI is set.
    pub const fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 != 0
    }
}

impl fmt::Display for EtherAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

/// Fixed byte length of the Ethernet II header.
pub const ETHER_HEADER_LEN: usize = 14;

/// An Ethernet II header over a byte container.
#[derive(Debug, Clone, Copy)]
pub struct EtherHeader<T> {
    buf: T,
}

impl<T: AsRef<[u8]>> EtherHeader<T> {
    /// Parse, handing the buffer back on a short read.
    #[inline]
    pub fn new(buf: T) -> Result<Self, T> {
        if buf.as_ref().len() >= ETHER_HEADER_LEN {
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

    #[inline]
    pub fn dst_addr(&self) -> EtherAddr {
        EtherAddr::from_bytes(&self.buf.as_ref()[0..6])
    }

    #[inline]
    pub fn src_addr(&self) -> EtherAddr {
        EtherAddr::from_bytes(&self.buf.as_ref()[6..12])
    }

    #[inline]
    pub fn ethertype(&self) -> EtherType {
        EtherType::from(NetworkEndian::read_u16(&self.buf.as_ref()[12..14]))
    }
}

/// Decodes an Ethernet II header and dispatches on its EtherType.
#[derive(Debug)]
pub struct EtherDecoder {
    types: Registry<EtherType>,
}

impl Default for EtherDecoder {
    fn default() -> Self {
        Self {
            types: Registry::with_stock(),
        }
    }
}

impl HeaderDecoder for EtherDecoder {
    fn decode(&self, cur: &mut Cursor<'_>) -> Result<Decoded, Truncated> {
        let hdr = EtherHeader::new(cur.chunk()).map_err(|buf| Truncated {
            protocol: "ether",
            needed: ETHER_HEADER_LEN,
            available: buf.len(),
        })?;
        let ethertype = hdr.ethertype();
        let summary = format!(
            "{} > {}, type {}",
            hdr.src_addr(),
            hdr.dst_addr(),
            self.types.get(ethertype)
        );
        cur.advance(ETHER_HEADER_LEN);
        Ok(Decoded {
            summary,
            next: Some(LayerKey::of(ethertype)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Domain;

    static FRAME_BYTES: [u8; 16] = [
        0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x08, 0x00, 0xaa,
        0xbb,
    ];

    #[test]
    fn header_parse() {
        let hdr = EtherHeader::new(&FRAME_BYTES[..]).unwrap();
        assert_eq!(
            hdr.dst_addr(),
            EtherAddr([0x01, 0x02, 0x03, 0x04, 0x05, 0x06])
        );
        assert_eq!(
            hdr.src_addr(),
            EtherAddr([0x11, 0x12, 0x13, 0x14, 0x15, 0x16])
        );
        assert_eq!(hdr.ethertype(), EtherType::IPV4);
    }

    #[test]
    fn header_parse_rejects_short_buffer() {
        assert!(EtherHeader::new(&FRAME_BYTES[..13]).is_err());
    }

    #[test]
    fn ethertype_names_render_in_hex() {
        let reg = Registry::<EtherType>::with_stock();
        assert_eq!(reg.get(EtherType::IPV4).to_string(), "IPv4 (0x0800)");
        assert_eq!(reg.get(EtherType::LLDP).to_string(), "LLDP (0x88cc)");
        assert_eq!(
            reg.get(EtherType::from_raw(0x9000)).to_string(),
            "unknown (0x9000)"
        );
    }

    #[test]
    fn decoder_advances_past_header() {
        let mut cur = Cursor::new(&FRAME_BYTES[..]);
        let decoded = EtherDecoder::default().decode(&mut cur).unwrap();
        assert_eq!(cur.pos(), ETHER_HEADER_LEN);
        assert_eq!(decoded.next, Some(LayerKey::of(EtherType::IPV4)));
        assert!(decoded.summary.contains("IPv4 (0x0800)"));
    }

    #[test]
    fn decoder_reports_short_buffer() {
        let mut cur = Cursor::new(&FRAME_BYTES[..10]);
        let err = EtherDecoder::default().decode(&mut cur).unwrap_err();
        assert_eq!(err.needed, ETHER_HEADER_LEN);
        assert_eq!(err.available, 10);
        assert_eq!(cur.pos(), 0);
    }
}
