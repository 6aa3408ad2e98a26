//! TCP headers and the well-known port catalogue.

use byteorder::{ByteOrder, NetworkEndian};
use bytes::Buf;

use crate::dispatch::{Decoded, HeaderDecoder, LayerKey};
use crate::error::Truncated;
use crate::Cursor;

named_enum! {
    /// Well-known TCP server ports.
    pub struct TcpPort (u16), "tcp-port" {
        /// FTP data channel.
        FTP_DATA = 20 => "FTP Data",
        /// FTP control channel.
        FTP = 21 => "FTP Control",
        /// Secure Shell.
        SSH = 22 => "SSH",
        /// Telnet.
        TELNET = 23 => "Telnet",
        /// Simple Mail Transfer Protocol.
        SMTP = 25 => "SMTP",
        /// Domain Name System over TCP.
        DOMAIN = 53 => "DNS",
        /// Hypertext Transfer Protocol.
        HTTP = 80 => "HTTP",
        /// Kerberos.
        KERBEROS = 88 => "Kerberos",
        /// Post Office Protocol v3.
        POP3 = 110 => "POP3",
        /// NNTP.
        NNTP = 119 => "NNTP",
        /// MS RPC endpoint mapper.
        EPMAP = 135 => "MS RPC",
        /// Internet Message Access Protocol.
        IMAP = 143 => "IMAP",
        /// Border Gateway Protocol.
        BGP = 179 => "BGP",
        /// LDAP.
        LDAP = 389 => "LDAP",
        /// HTTP over TLS.
        HTTPS = 443 => "HTTPS",
        /// SMB over TCP.
        MICROSOFT_DS = 445 => "SMB",
        /// SMTP submission.
        SUBMISSION = 587 => "SMTP Submission",
        /// LDAP over TLS.
        LDAPS = 636 => "LDAPS",
        /// IMAP over TLS.
        IMAPS = 993 => "IMAPS",
        /// POP3 over TLS.
        POP3S = 995 => "POP3S",
        /// MySQL.
        MYSQL = 3306 => "MySQL",
        /// Remote Desktop Protocol.
        RDP = 3389 => "RDP",
        /// PostgreSQL.
        POSTGRES = 5432 => "PostgreSQL",
        /// HTTP alternate.
        HTTP_ALT = 8080 => "HTTP Alternate",
    }
}

/// Minimum byte length of a TCP header (data offset of 5).
pub const TCP_HEADER_LEN: usize = 20;

/// A TCP header over a byte container.
#[derive(Debug, Clone, Copy)]
pub struct TcpHeader<T> {
    buf: T,
}

impl<T: AsRef<[u8]>> TcpHeader<T> {
    /// Parse, handing the buffer back on a short read.
    #[inline]
    pub fn new(buf: T) -> Result<Self, T> {
        if buf.as_ref().len() >= TCP_HEADER_LEN {
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
    pub fn src_port(&self) -> TcpPort {
        TcpPort::from(NetworkEndian::read_u16(&self.buf.as_ref()[0..2]))
    }

    /// Destination port.
    #[inline]
    pub fn dst_port(&self) -> TcpPort {
        TcpPort::from(NetworkEndian::read_u16(&self.buf.as_ref()[2..4]))
    }

    /// Sequence number.
    #[inline]
    pub fn seq(&self) -> u32 {
        NetworkEndian::read_u32(&self.buf.as_ref()[4..8])
    }

    /// Acknowledgment number.
    #[inline]
    pub fn ack(&self) -> u32 {
        NetworkEndian::read_u32(&self.buf.as_ref()[8..12])
    }

    /// Header length in bytes, as claimed by the data offset field.
    #[inline]
    pub fn header_len(&self) -> usize {
        ((self.buf.as_ref()[12] >> 4) as usize) * 4
    }

    /// The flags octet (CWR through FIN).
    #[inline]
    pub fn flags(&self) -> u8 {
        self.buf.as_ref()[13]
    }
}

fn flag_names(flags: u8) -> String {
    const NAMES: [(u8, &str); 6] = [
        (0x02, "SYN"),
        (0x10, "ACK"),
        (0x01, "FIN"),
        (0x04, "RST"),
        (0x08, "PSH"),
        (0x20, "URG"),
    ];
    let set: Vec<&str> = NAMES
        .iter()
        .filter(|(bit, _)| flags & bit != 0)
        .map(|&(_, n)| n)
        .collect();
    set.join(",")
}

/// Decodes a TCP header; the payload is dispatched under the destination
/// port, so applications can bind decoders to well-known ports.
#[derive(Debug, Default)]
pub struct TcpDecoder;

impl HeaderDecoder for TcpDecoder {
    fn decode(&self, cur: &mut Cursor<'_>) -> Result<Decoded, Truncated> {
        let hdr = TcpHeader::new(cur.chunk()).map_err(|buf| Truncated {
            protocol: "tcp",
            needed: TCP_HEADER_LEN,
            available: buf.len(),
        })?;
        let header_len = hdr.header_len();
        if header_len < TCP_HEADER_LEN {
            return Err(Truncated {
                protocol: "tcp",
                needed: TCP_HEADER_LEN,
                available: header_len,
            });
        }
        if cur.remaining() < header_len {
            return Err(Truncated {
                protocol: "tcp",
                needed: header_len,
                available: cur.remaining(),
            });
        }
        let dst = hdr.dst_port();
        let summary = format!(
            "{} > {} [{}], seq {}",
            hdr.src_port().raw(),
            dst.raw(),
            flag_names(hdr.flags()),
            hdr.seq()
        );
        cur.advance(header_len);
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

    static SEGMENT_BYTES: [u8; 20] = [
        0xc3, 0x50, 0x00, 0x50, 0x00, 0x00, 0x00, 0x2a, 0x00, 0x00, 0x00, 0x00, 0x50, 0x12,
        0xff, 0xff, 0x00, 0x00, 0x00, 0x00,
    ];

    #[test]
    fn header_parse() {
        let hdr = TcpHeader::new(&SEGMENT_BYTES[..]).unwrap();
        assert_eq!(hdr.src_port().raw(), 50000);
        assert_eq!(hdr.dst_port(), TcpPort::HTTP);
        assert_eq!(hdr.seq(), 42);
        assert_eq!(hdr.header_len(), 20);
        assert_eq!(hdr.flags(), 0x12);
    }

    #[test]
    fn decoder_dispatches_on_destination_port() {
        let mut cur = Cursor::new(&SEGMENT_BYTES[..]);
        let decoded = TcpDecoder.decode(&mut cur).unwrap();
        assert_eq!(decoded.next, Some(LayerKey::of(TcpPort::HTTP)));
        assert!(decoded.summary.contains("SYN,ACK"));
    }

    #[test]
    fn port_catalogue_resolves_and_falls_back() {
        let reg = Registry::<TcpPort>::with_stock();
        assert_eq!(reg.get(TcpPort::from_raw(443)).name(), "HTTPS");
        assert_eq!(reg.get(TcpPort::from_raw(50000)).name(), "unknown");
    }
}
