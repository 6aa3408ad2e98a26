//! The PPP data link layer protocol number space.
//!
//! RFC 1661 structures these numbers for HDLC protocol-field compression:
//! the low octet of every assigned value is odd and the high octet is even.
//! Construction enforces that invariant.

use crate::error::InvalidValue;
use crate::num::Radix;
use crate::Domain;

/// A PPP DLL protocol number.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct PppDllProtocol(u16);

impl PppDllProtocol {
    /// Padding protocol.
    pub const PADDING: Self = Self(0x0001);
    /// Internet Protocol version 4.
    pub const IPV4: Self = Self(0x0021);
    /// AppleTalk.
    pub const APPLETALK: Self = Self(0x0029);
    /// Novell IPX.
    pub const IPX: Self = Self(0x002b);
    /// Van Jacobson compressed TCP/IP.
    pub const VJ_COMPRESSED: Self = Self(0x002d);
    /// Van Jacobson uncompressed TCP/IP.
    pub const VJ_UNCOMPRESSED: Self = Self(0x002f);
    /// Multilink fragment.
    pub const MULTILINK: Self = Self(0x003d);
    /// Internet Protocol version 6.
    pub const IPV6: Self = Self(0x0057);
    /// MPLS unicast.
    pub const MPLS_UNICAST: Self = Self(0x0281);
    /// MPLS multicast.
    pub const MPLS_MULTICAST: Self = Self(0x0283);
    /// IP control protocol.
    pub const IPCP: Self = Self(0x8021);
    /// Encryption control protocol.
    pub const ECP: Self = Self(0x8053);
    /// IPv6 control protocol.
    pub const IPV6CP: Self = Self(0x8057);
    /// Compression control protocol.
    pub const CCP: Self = Self(0x80fd);
    /// Link control protocol.
    pub const LCP: Self = Self(0xc021);
    /// Password authentication protocol.
    pub const PAP: Self = Self(0xc023);
    /// Link quality report.
    pub const LQR: Self = Self(0xc025);
    /// Challenge handshake authentication protocol.
    pub const CHAP: Self = Self(0xc223);
    /// Extensible authentication protocol.
    pub const EAP: Self = Self(0xc227);

    /// Get the raw value.
    pub fn raw(&self) -> u16 {
        self.0
    }
}

static STOCK: &[(u16, &str)] = &[
    (0x0001, "Padding Protocol"),
    (0x0021, "Internet Protocol version 4"),
    (0x0029, "AppleTalk"),
    (0x002b, "Novell IPX"),
    (0x002d, "Van Jacobson Compressed TCP/IP"),
    (0x002f, "Van Jacobson Uncompressed TCP/IP"),
    (0x003d, "Multilink"),
    (0x0057, "Internet Protocol version 6"),
    (0x0281, "MPLS Unicast"),
    (0x0283, "MPLS Multicast"),
    (0x8021, "IP Control Protocol"),
    (0x8053, "Encryption Control Protocol"),
    (0x8057, "IPv6 Control Protocol"),
    (0x80fd, "Compression Control Protocol"),
    (0xc021, "Link Control Protocol"),
    (0xc023, "Password Authentication Protocol"),
    (0xc025, "Link Quality Report"),
    (0xc223, "Challenge Handshake Authentication Protocol"),
    (0xc227, "Extensible Authentication Protocol"),
];

impl Domain for PppDllProtocol {
    type Raw = u16;

    const NAME: &'static str = "ppp-dll-protocol";
    const RADIX: Radix = Radix::Hex;

    #[inline]
    fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    #[inline]
    fn raw(self) -> u16 {
        self.0
    }

    fn check(self) -> Result<(), InvalidValue> {
        if self.0 & 0x0001 == 0 {
            return Err(InvalidValue {
                domain: Self::NAME,
                value: self.0 as u64,
                reason: "low octet must be odd",
            });
        }
        if self.0 & 0x0100 != 0 {
            return Err(InvalidValue {
                domain: Self::NAME,
                value: self.0 as u64,
                reason: "high octet must be even",
            });
        }
        Ok(())
    }

    fn stock() -> &'static [(u16, &'static str)] {
        STOCK
    }
}

impl From<u16> for PppDllProtocol {
    #[inline]
    fn from(value: u16) -> PppDllProtocol {
        PppDllProtocol(value)
    }
}

impl From<PppDllProtocol> for u16 {
    #[inline]
    fn from(value: PppDllProtocol) -> u16 {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NamedNum, Registry};

    #[test]
    fn parity_rule_is_enforced_at_construction() {
        // Even low octet.
        let err = NamedNum::new(PppDllProtocol::from_raw(0x0020), "bad").unwrap_err();
        assert_eq!(err.reason, "low octet must be odd");

        // Odd high octet.
        let err = NamedNum::new(PppDllProtocol::from_raw(0x0121), "bad").unwrap_err();
        assert_eq!(err.reason, "high octet must be even");

        assert!(NamedNum::new(PppDllProtocol::from_raw(0xc021), "ok").is_ok());
    }

    #[test]
    fn stock_entries_satisfy_the_invariant() {
        for &(raw, _) in STOCK {
            assert!(PppDllProtocol::from_raw(raw).check().is_ok(), "{raw:#06x}");
        }
    }

    #[test]
    fn values_render_in_hex() {
        let reg = Registry::<PppDllProtocol>::with_stock();
        assert_eq!(
            reg.get(PppDllProtocol::LCP).to_string(),
            "Link Control Protocol (0xc021)"
        );
        // Wire values skip validation on lookup; an invalid value still
        // resolves to a well-formed unknown.
        assert_eq!(
            reg.get(PppDllProtocol::from_raw(0x0100)).to_string(),
            "unknown (0x0100)"
        );
    }
}
