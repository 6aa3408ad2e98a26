//! ARP messages, hardware types and operations.

use std::net::Ipv4Addr;

use byteorder::{ByteOrder, NetworkEndian};
use bytes::Buf;

use crate::dispatch::{Decoded, HeaderDecoder};
use crate::error::Truncated;
use crate::ether::EtherAddr;
use crate::{Cursor, Registry};

named_enum! {
    /// Hardware types of the arp protocol.
    pub struct Hardware (u16), "arp-hardware" {
        /// Ethernet (10Mb and up).
        ETHERNET = 1 => "Ethernet",
        /// Experimental Ethernet.
        EXPERIMENTAL_ETHERNET = 2 => "Experimental Ethernet",
        /// Amateur radio AX.25.
        AX25 = 3 => "AX.25",
        /// IEEE 802 networks.
        IEEE802 = 6 => "IEEE 802",
        /// ARCNET.
        ARCNET = 7 => "ARCNET",
        /// Frame relay.
        FRAME_RELAY = 15 => "Frame Relay",
        /// ATM.
        ATM = 16 => "ATM",
        /// HDLC.
        HDLC = 17 => "HDLC",
        /// Fibre channel.
        FIBRE_CHANNEL = 18 => "Fibre Channel",
        /// Serial line.
        SERIAL = 20 => "Serial Line",
        /// InfiniBand.
        INFINIBAND = 32 => "InfiniBand",
    }
}

named_enum! {
    /// Operation codes of the arp protocol.
    pub struct Operation (u16), "arp-operation" {
        /// Arp request.
        REQUEST = 1 => "Request",
        /// Arp reply.
        REPLY = 2 => "Reply",
        /// Reverse arp request.
        REQUEST_REVERSE = 3 => "Reverse Request",
        /// Reverse arp reply.
        REPLY_REVERSE = 4 => "Reverse Reply",
        /// Inverse arp request.
        INARP_REQUEST = 8 => "Inverse Request",
        /// Inverse arp reply.
        INARP_REPLY = 9 => "Inverse Reply",
    }
}

/// Byte length of an Ethernet/IPv4 ARP message.
pub const ARP_HEADER_LEN: usize = 28;

/// An Ethernet/IPv4 ARP message over a byte container.
#[derive(Debug, Clone, Copy)]
pub struct ArpHeader<T> {
    buf: T,
}

impl<T: AsRef<[u8]>> ArpHeader<T> {
    /// Parse, handing the buffer back on a short read.
    #[inline]
    pub fn new(buf: T) -> Result<Self, T> {
        if buf.as_ref().len() >= ARP_HEADER_LEN {
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

    /// Hardware type.
    #[inline]
    pub fn hardware(&self) -> Hardware {
        Hardware::from(NetworkEndian::read_u16(&self.buf.as_ref()[0..2]))
    }

    /// Protocol type, an EtherType.
    #[inline]
    pub fn protocol_type(&self) -> u16 {
        NetworkEndian::read_u16(&self.buf.as_ref()[2..4])
    }

    /// Operation code.
    #[inline]
    pub fn operation(&self) -> Operation {
        Operation::from(NetworkEndian::read_u16(&self.buf.as_ref()[6..8]))
    }

    /// Sender hardware address.
    #[inline]
    pub fn sender_hardware_addr(&self) -> EtherAddr {
        EtherAddr::from_bytes(&self.buf.as_ref()[8..14])
    }

    /// Sender protocol address.
    #[inline]
    pub fn sender_protocol_addr(&self) -> Ipv4Addr {
        let b = &self.buf.as_ref()[14..18];
        Ipv4Addr::new(b[0], b[1], b[2], b[3])
    }

    /// Target hardware address.
    #[inline]
    pub fn target_hardware_addr(&self) -> EtherAddr {
        EtherAddr::from_bytes(&self.buf.as_ref()[18..24])
    }

    /// Target protocol address.
    #[inline]
    pub fn target_protocol_addr(&self) -> Ipv4Addr {
        let b = &self.buf.as_ref()[24..28];
        Ipv4Addr::new(b[0], b[1], b[2], b[3])
    }
}

/// Decodes an Ethernet/IPv4 ARP message. A leaf protocol.
#[derive(Debug)]
pub struct ArpDecoder {
    operations: Registry<Operation>,
}

impl Default for ArpDecoder {
    fn default() -> Self {
        Self {
            operations: Registry::with_stock(),
        }
    }
}

impl HeaderDecoder for ArpDecoder {
    fn decode(&self, cur: &mut Cursor<'_>) -> Result<Decoded, Truncated> {
        let hdr = ArpHeader::new(cur.chunk()).map_err(|buf| Truncated {
            protocol: "arp",
            needed: ARP_HEADER_LEN,
            available: buf.len(),
        })?;
        let op = hdr.operation();
        let summary = match op {
            Operation::REQUEST => format!(
                "who-has {} tell {}",
                hdr.target_protocol_addr(),
                hdr.sender_protocol_addr()
            ),
            Operation::REPLY => format!(
                "{} is-at {}",
                hdr.sender_protocol_addr(),
                hdr.sender_hardware_addr()
            ),
            _ => format!("{}", self.operations.get(op)),
        };
        cur.advance(ARP_HEADER_LEN);
        Ok(Decoded {
            summary,
            next: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static REQUEST_BYTES: [u8; 28] = [
        0x00, 0x01, 0x08, 0x00, 0x06, 0x04, 0x00, 0x01, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06,
        0xc0, 0xa8, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xc0, 0xa8, 0x00, 0x02,
    ];

    #[test]
    fn header_parse() {
        let hdr = ArpHeader::new(&REQUEST_BYTES[..]).unwrap();
        assert_eq!(hdr.hardware(), Hardware::ETHERNET);
        assert_eq!(hdr.protocol_type(), 0x0800);
        assert_eq!(hdr.operation(), Operation::REQUEST);
        assert_eq!(hdr.sender_protocol_addr(), Ipv4Addr::new(192, 168, 0, 1));
        assert_eq!(hdr.target_protocol_addr(), Ipv4Addr::new(192, 168, 0, 2));
    }

    #[test]
    fn decoder_summarizes_requests() {
        let mut cur = Cursor::new(&REQUEST_BYTES[..]);
        let decoded = ArpDecoder::default().decode(&mut cur).unwrap();
        assert!(decoded.next.is_none());
        assert_eq!(decoded.summary, "who-has 192.168.0.2 tell 192.168.0.1");
    }
}
