//! Protocol-layer dispatch: resolving "what comes next" from numeric fields.
//!
//! Each decoded header names the protocol of its payload as a value from
//! some [`Domain`]; the dispatch loop erases that identity into a
//! [`LayerKey`], looks up the next decoder and repeats until the buffer is
//! exhausted or no decoder applies. The loop is total: malformed or
//! unrecognized input ends the chain with a [`Terminal`] reason instead of
//! discarding the already-decoded prefix.

use std::collections::HashMap;
use std::fmt;

use bytes::Buf;
use tracing::trace;

use crate::error::Truncated;
use crate::named::Domain;
use crate::num::RawNum;
use crate::Cursor;

/// Erased identity of a protocol layer: a domain label plus the numeric
/// value, zero-extended to `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerKey {
    domain: &'static str,
    value: u64,
}

impl LayerKey {
    /// The key for a typed domain value.
    pub fn of<D: Domain>(value: D) -> Self {
        Self {
            domain: D::NAME,
            value: value.raw().widen(),
        }
    }

    /// The domain label.
    pub fn domain(&self) -> &'static str {
        self.domain
    }

    /// The numeric value, zero-extended.
    pub fn value(&self) -> u64 {
        self.value
    }
}

impl fmt::Display for LayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.domain, self.value)
    }
}

/// One decoded protocol header.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Identity under which this header's decoder was selected.
    pub protocol: LayerKey,
    /// Offset of the header within the original buffer.
    pub offset: usize,
    /// Length of the header in bytes.
    pub header_len: usize,
    /// One-line human-readable rendering of the header.
    pub summary: String,
}

/// What a decoder hands back for a single header.
#[derive(Debug, Clone)]
pub struct Decoded {
    /// One-line rendering of the decoded header.
    pub summary: String,
    /// Identity of the encapsulated payload, `None` for leaf protocols.
    pub next: Option<LayerKey>,
}

/// Decodes one protocol header off the front of a cursor.
///
/// Implementations read their header from the cursor's chunk, advance the
/// cursor past it and extract the discriminant naming the payload. On a
/// short buffer they return [`Truncated`] and leave the cursor untouched.
pub trait HeaderDecoder: Send + Sync {
    /// Decode the header at the cursor position.
    fn decode(&self, cur: &mut Cursor<'_>) -> Result<Decoded, Truncated>;
}

/// Maps layer identities to header decoders.
///
/// Structurally a [`crate::Registry`] keyed by [`LayerKey`], but binding
/// decoders instead of display names. Same overwrite semantics: `register`
/// replaces silently and returns the previous binding.
#[derive(Default)]
pub struct DecoderRegistry {
    map: HashMap<LayerKey, Box<dyn HeaderDecoder>>,
}

impl DecoderRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry wired with the built-in decoders: Ethernet under the
    /// link-layer type, IPv4/ARP under their EtherTypes, TCP/UDP/ICMPv4
    /// under their IP protocol numbers.
    pub fn preset() -> Self {
        let mut reg = Self::new();
        reg.register(crate::link::LinkType::ETHERNET, crate::ether::EtherDecoder::default());
        reg.register(crate::ether::EtherType::IPV4, crate::ipv4::Ipv4Decoder::default());
        reg.register(crate::ether::EtherType::ARP, crate::arp::ArpDecoder::default());
        reg.register(crate::ipv4::IpProtocol::TCP, crate::tcp::TcpDecoder);
        reg.register(crate::ipv4::IpProtocol::UDP, crate::udp::UdpDecoder);
        reg.register(crate::ipv4::IpProtocol::ICMP, crate::icmpv4::Icmpv4Decoder::default());
        reg
    }

    /// Bind `decoder` to the given domain value, returning the previous
    /// binding if one existed.
    pub fn register<D: Domain>(
        &mut self,
        value: D,
        decoder: impl HeaderDecoder + 'static,
    ) -> Option<Box<dyn HeaderDecoder>> {
        self.map.insert(LayerKey::of(value), Box::new(decoder))
    }

    /// The decoder bound to `key`, if any.
    pub fn lookup(&self, key: &LayerKey) -> Option<&dyn HeaderDecoder> {
        self.map.get(key).map(|b| b.as_ref())
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the registry holds no bindings.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoderRegistry")
            .field("keys", &self.map.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Why a decode run stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Terminal {
    /// The buffer was fully consumed after a recognized header.
    Exhausted,
    /// No decoder is bound to `protocol`; bytes from `payload_offset` on
    /// remain opaque.
    Opaque {
        /// The unresolved payload identity.
        protocol: LayerKey,
        /// Where the opaque payload starts in the original buffer.
        payload_offset: usize,
    },
    /// Fewer bytes remained than the `protocol` header requires. The layers
    /// decoded before this point are preserved.
    Truncated {
        /// The header that did not fit.
        protocol: LayerKey,
        /// Minimum byte count that header requires.
        needed: usize,
        /// Bytes actually remaining.
        available: usize,
    },
}

/// The result of decoding one buffer: the recognized layer chain plus the
/// reason decoding stopped.
#[derive(Debug, Clone)]
pub struct DecodedChain {
    /// Decoded headers, outermost first.
    pub layers: Vec<Layer>,
    /// Why decoding stopped.
    pub terminal: Terminal,
}

/// Decode `buf` into a chain of layers, starting from the externally
/// supplied `first` identity (typically the capture device's link-layer
/// type). Total: every input yields a chain and a terminal reason.
pub fn decode_chain(registry: &DecoderRegistry, first: LayerKey, buf: &[u8]) -> DecodedChain {
    let mut cur = Cursor::new(buf);
    let mut layers = Vec::new();
    let mut expected = first;

    loop {
        let Some(decoder) = registry.lookup(&expected) else {
            trace!(protocol = %expected, offset = cur.pos(), "no decoder bound, payload left opaque");
            return DecodedChain {
                layers,
                terminal: Terminal::Opaque {
                    protocol: expected,
                    payload_offset: cur.pos(),
                },
            };
        };

        let offset = cur.pos();
        match decoder.decode(&mut cur) {
            Ok(decoded) => {
                layers.push(Layer {
                    protocol: expected,
                    offset,
                    header_len: cur.pos() - offset,
                    summary: decoded.summary,
                });
                if !cur.has_remaining() {
                    trace!(layers = layers.len(), "buffer exhausted");
                    return DecodedChain {
                        layers,
                        terminal: Terminal::Exhausted,
                    };
                }
                match decoded.next {
                    Some(next) => expected = next,
                    // A leaf header with trailing bytes: nothing names them.
                    None => {
                        return DecodedChain {
                            terminal: Terminal::Opaque {
                                protocol: expected,
                                payload_offset: cur.pos(),
                            },
                            layers,
                        }
                    }
                }
            }
            Err(err) => {
                trace!(protocol = %expected, needed = err.needed, available = err.available, "truncated header");
                return DecodedChain {
                    layers,
                    terminal: Terminal::Truncated {
                        protocol: expected,
                        needed: err.needed,
                        available: err.available,
                    },
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ether::EtherType;
    use crate::link::LinkType;

    // Ethernet + IPv4 + TCP SYN, no TCP payload.
    static TCP_SYN_FRAME: [u8; 54] = [
        // Ethernet
        0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x08, 0x00,
        // IPv4, total length 40, protocol 6
        0x45, 0x00, 0x00, 0x28, 0x00, 0x00, 0x40, 0x00, 0x40, 0x06, 0x00, 0x00, 0xc0, 0xa8,
        0x00, 0x01, 0x0a, 0x00, 0x00, 0x01,
        // TCP, 50000 -> 80, data offset 5, SYN
        0xc3, 0x50, 0x00, 0x50, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x50, 0x02,
        0xff, 0xff, 0x00, 0x00, 0x00, 0x00,
    ];

    #[test]
    fn decodes_ether_ipv4_tcp_chain() {
        let reg = DecoderRegistry::preset();
        let chain = decode_chain(&reg, LayerKey::of(LinkType::ETHERNET), &TCP_SYN_FRAME);

        assert_eq!(chain.terminal, Terminal::Exhausted);
        assert_eq!(chain.layers.len(), 3);

        assert_eq!(chain.layers[0].offset, 0);
        assert_eq!(chain.layers[0].header_len, 14);
        assert_eq!(chain.layers[1].protocol, LayerKey::of(EtherType::IPV4));
        assert_eq!(chain.layers[1].offset, 14);
        assert_eq!(chain.layers[1].header_len, 20);
        assert_eq!(chain.layers[2].offset, 34);
        assert_eq!(chain.layers[2].header_len, 20);
        assert!(chain.layers[2].summary.contains("50000"));
    }

    #[test]
    fn tcp_payload_ends_opaque_under_port_identity() {
        let mut frame = TCP_SYN_FRAME.to_vec();
        frame.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);

        let reg = DecoderRegistry::preset();
        let chain = decode_chain(&reg, LayerKey::of(LinkType::ETHERNET), &frame);

        assert_eq!(chain.layers.len(), 3);
        match chain.terminal {
            Terminal::Opaque {
                protocol,
                payload_offset,
            } => {
                assert_eq!(protocol.domain(), "tcp-port");
                assert_eq!(protocol.value(), 80);
                assert_eq!(payload_offset, 54);
            }
            other => panic!("expected opaque terminal, got {:?}", other),
        }
    }

    #[test]
    fn truncated_header_preserves_decoded_prefix() {
        let reg = DecoderRegistry::preset();
        let chain = decode_chain(
            &reg,
            LayerKey::of(LinkType::ETHERNET),
            &TCP_SYN_FRAME[..30],
        );

        assert_eq!(chain.layers.len(), 1);
        assert_eq!(chain.layers[0].header_len, 14);
        assert_eq!(
            chain.terminal,
            Terminal::Truncated {
                protocol: LayerKey::of(EtherType::IPV4),
                needed: 20,
                available: 16,
            }
        );
    }

    #[test]
    fn unregistered_next_protocol_is_opaque_not_fatal() {
        let mut frame = TCP_SYN_FRAME.to_vec();
        // Rewrite the EtherType to IPv6, which the preset does not wire.
        frame[12] = 0x86;
        frame[13] = 0xdd;

        let reg = DecoderRegistry::preset();
        let chain = decode_chain(&reg, LayerKey::of(LinkType::ETHERNET), &frame);

        assert_eq!(chain.layers.len(), 1);
        assert_eq!(
            chain.terminal,
            Terminal::Opaque {
                protocol: LayerKey::of(EtherType::IPV6),
                payload_offset: 14,
            }
        );
    }

    #[test]
    fn unknown_initial_protocol_yields_empty_chain() {
        let reg = DecoderRegistry::preset();
        let chain = decode_chain(&reg, LayerKey::of(LinkType::PPP), &TCP_SYN_FRAME);

        assert!(chain.layers.is_empty());
        assert_eq!(
            chain.terminal,
            Terminal::Opaque {
                protocol: LayerKey::of(LinkType::PPP),
                payload_offset: 0,
            }
        );
    }

    #[test]
    fn register_overwrites_decoder_binding() {
        struct Nop;
        impl HeaderDecoder for Nop {
            fn decode(&self, _cur: &mut Cursor<'_>) -> Result<Decoded, Truncated> {
                Err(Truncated {
                    protocol: "nop",
                    needed: usize::MAX,
                    available: 0,
                })
            }
        }

        let mut reg = DecoderRegistry::preset();
        assert!(reg.register(EtherType::IPV4, Nop).is_some());
        assert!(reg.register(EtherType::IPV6, Nop).is_none());
    }
}
