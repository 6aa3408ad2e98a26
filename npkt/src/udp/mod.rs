//! UDP headers and the well-known port catalogue.

use byteorder::{ByteOrder, NetworkEndian};
use bytes::Buf;

use crate::dispatch::{Decoded, HeaderDecoder, LayerKey};
use crate::error::Truncated;
use crate::Cursor;

named_enum! {
    /// Well-known UDP server ports.
    pub struct UdpPort (u16), "udp-port" {
        /// Domain Name System.
        DOMAIN = 53 => "DNS",
        /// DHCP server side.
        BOOTPS = 67 => "DHCP Server",
        /// DHCP client side.
        BOOTPC = 68 => "DHCP Client",
        /// Trivial File Transfer Protocol.
        TFTP = 69 => "TFTP",
        /// Kerberos.
        KERBEROS = 88 => "Kerberos",
        /// Network Time Protocol.
        NTP = 123 => "NTP",
        /// NetBIOS name service.
        NETBIOS_NS = 137 => "NetBIOS Name Service",
        /// SNMP agent.
        SNMP = 161 => "SNMP",
        /// SNMP traps.
        SNMP_TRAP = 162 => "SNMP Trap",
        /// HTTPS (QUIC).
        HTTPS = 443 => "HTTPS (QUIC)",
        /// IKE key exchange.
        ISAKMP = 500 => "ISAKMP",
        /// Syslog.
        SYSLOG = 514 => "Syslog",
        /// Routing Information Protocol.
        RIP = 520 => "RIP",
        /// DHCPv6 client side.
        DHCPV6_CLIENT = 546 => "DHCPv6 Client",
        /// DHCPv6 server side.
        DHCPV6_SERVER = 547 => "DHCPv6 Server",
        /// L2TP.
        L2TP = 1701 => "L2TP",
        /// IKE NAT traversal.
        IPSEC_NAT_T = 4500 => "IPsec NAT-T",
        /// Multicast DNS.
        MDNS = 5353 => "mDNS",
        /// VXLAN tunnel endpoint.
        VXLAN = 4789 => "VXLAN",
        /// WireGuard's conventional port.
        WIREGUARD = 51820 => "WireGuard",
    }
}

/// Fixed byte length of a UDP header.
pub const UDP_HEADER_LEN: usize = 8;

/// A UDP header over a byte container.
#[derive(Debug, Clone, Copy)]
pub struct UdpHeader<T> {
    buf: T,
}

impl<T: AsRef<[u8]>> UdpHeader<T> {
    /// Parse, handing the buffer back on a short read.
    #[inline]
    pub fn new(buf: T) -> Result<Self, T> {
        if buf.as_ref().len() >= UDP_HEADER_LEN {
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

    /// Source port.
    #[inline]
    pub fn src_port(&self) -> UdpPort {
        UdpPort::from(NetworkEndian::read_u16(&self.buf.as_ref()[0..2]))
    }

    /// Destination port.
    #[inline]
    pub fn dst_port(&self) -> UdpPort {
        UdpPort::from(NetworkEndian::read_u16(&self.buf.as_ref()[2..4]))
    }

    /// The length field: header plus payload, in bytes.
    #[inline]
    pub fn total_len(&self) -> u16 {
        NetworkEndian::read_u16(&self.buf.as_ref()[4..6])
    }
}

/// Decodes a UDP header; the payload is dispatched under the destination
/// port.
#[derive(Debug, Default)]
pub struct UdpDecoder;

impl HeaderDecoder for UdpDecoder {
    fn decode(&self, cur: &mut Cursor<'_>) -> Result<Decoded, Truncated> {
        let hdr = UdpHeader::new(cur.chunk()).map_err(|buf| Truncated {
            protocol: "udp",
            needed: UDP_HEADER_LEN,
            available: buf.len(),
        })?;
        let dst = hdr.dst_port();
        let summary = format!(
            "{} > {}, len {}",
            hdr.src_port().raw(),
            dst.raw(),
            hdr.total_len()
        );
        cur.advance(UDP_HEADER_LEN);
        Ok(Decoded {
            summary,
            next: Some(LayerKey::of(dst)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Domain, Registry};

    static DATAGRAM_BYTES: [u8; 12] = [
        0x94, 0x04, 0x00, 0x35, 0x00, 0x0c, 0x00, 0x00, 0xde, 0xad, 0xbe, 0xef,
    ];

    #[test]
    fn header_parse() {
        let hdr = UdpHeader::new(&DATAGRAM_BYTES[..]).unwrap();
        assert_eq!(hdr.src_port().raw(), 37892);
        assert_eq!(hdr.dst_port(), UdpPort::DOMAIN);
        assert_eq!(hdr.total_len(), 12);
    }

    #[test]
    fn decoder_dispatches_on_destination_port() {
        let mut cur = Cursor::new(&DATAGRAM_BYTES[..]);
        let decoded = UdpDecoder.decode(&mut cur).unwrap();
        assert_eq!(cur.pos(), UDP_HEADER_LEN);
        assert_eq!(decoded.next, Some(LayerKey::of(UdpPort::DOMAIN)));
    }

    #[test]
    fn port_catalogue_is_independent_of_tcp() {
        let udp = Registry::<UdpPort>::with_stock();
        let tcp = Registry::<crate::tcp::TcpPort>::with_stock();
        // 67 means DHCP for UDP and nothing for TCP.
        assert_eq!(udp.get(UdpPort::from_raw(67)).name(), "DHCP Server");
        assert_eq!(
            tcp.get(crate::tcp::TcpPort::from_raw(67)).name(),
            "unknown"
        );
    }
}
