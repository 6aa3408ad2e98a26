//! ICMPv6 message types and the type-scoped code space.

use crate::{Domain, ScopedRegistry};

named_enum! {
    /// ICMPv6 message types. Error messages sit below 128, informational
    /// messages at 128 and above.
    pub struct Icmpv6Type (u8), "icmpv6-type" {
        /// Destination unreachable.
        DST_UNREACHABLE = 1 => "Destination Unreachable",
        /// Packet too big.
        PACKET_TOO_BIG = 2 => "Packet Too Big",
        /// Time exceeded.
        TIME_EXCEEDED = 3 => "Time Exceeded",
        /// Parameter problem.
        PARAMETER_PROBLEM = 4 => "Parameter Problem",
        /// Echo request.
        ECHO_REQUEST = 128 => "Echo Request",
        /// Echo reply.
        ECHO_REPLY = 129 => "Echo Reply",
        /// Multicast listener query.
        MLD_QUERY = 130 => "Multicast Listener Query",
        /// Multicast listener report.
        MLD_REPORT = 131 => "Multicast Listener Report",
        /// Multicast listener done.
        MLD_DONE = 132 => "Multicast Listener Done",
        /// NDP router solicitation.
        ROUTER_SOLICITATION = 133 => "Router Solicitation",
        /// NDP router advertisement.
        ROUTER_ADVERTISEMENT = 134 => "Router Advertisement",
        /// NDP neighbor solicitation.
        NEIGHBOR_SOLICITATION = 135 => "Neighbor Solicitation",
        /// NDP neighbor advertisement.
        NEIGHBOR_ADVERTISEMENT = 136 => "Neighbor Advertisement",
        /// NDP redirect.
        REDIRECT = 137 => "Redirect",
        /// MLDv2 report.
        MLD2_REPORT = 143 => "MLDv2 Report",
    }
}

/// An ICMPv6 code, meaningful only in the context of its message type.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct Icmpv6Code(u8);

impl Icmpv6Code {
    /// Get the raw value.
    pub fn raw(&self) -> u8 {
        self.0
    }
}

impl Domain for Icmpv6Code {
    type Raw = u8;

    const NAME: &'static str = "icmpv6-code";

    #[inline]
    fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    #[inline]
    fn raw(self) -> u8 {
        self.0
    }
}

impl From<u8> for Icmpv6Code {
    #[inline]
    fn from(value: u8) -> Icmpv6Code {
        Icmpv6Code(value)
    }
}

impl From<Icmpv6Code> for u8 {
    #[inline]
    fn from(value: Icmpv6Code) -> u8 {
        value.0
    }
}

static CODE_TABLE: &[(u8, u8, &str)] = &[
    (1, 0, "No Route to Destination"),
    (1, 1, "Communication Administratively Prohibited"),
    (1, 2, "Beyond Scope of Source Address"),
    (1, 3, "Address Unreachable"),
    (1, 4, "Port Unreachable"),
    (1, 5, "Source Address Failed Policy"),
    (1, 6, "Reject Route to Destination"),
    (3, 0, "Hop Limit Exceeded in Transit"),
    (3, 1, "Fragment Reassembly Time Exceeded"),
    (4, 0, "Erroneous Header Field"),
    (4, 1, "Unrecognized Next Header Type"),
    (4, 2, "Unrecognized IPv6 Option"),
];

/// The stock type-scoped code catalogue.
pub fn code_registry() -> ScopedRegistry<Icmpv6Type, Icmpv6Code> {
    ScopedRegistry::from_table(CODE_TABLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_resolve_in_type_context() {
        let codes = code_registry();
        assert_eq!(
            codes
                .get(Icmpv6Type::DST_UNREACHABLE, Icmpv6Code::from(4))
                .name(),
            "Port Unreachable"
        );
        assert_eq!(
            codes.get(Icmpv6Type::TIME_EXCEEDED, Icmpv6Code::from(0)).name(),
            "Hop Limit Exceeded in Transit"
        );
        // Code 4 means nothing under time exceeded.
        assert_eq!(
            codes.get(Icmpv6Type::TIME_EXCEEDED, Icmpv6Code::from(4)).name(),
            "unknown"
        );
    }

    #[test]
    fn code_space_is_independent_of_icmpv4() {
        let v6 = code_registry();
        let v4 = crate::icmpv4::code_registry();
        // (3, 0) reads differently in each version.
        assert_eq!(
            v6.get(Icmpv6Type::from_raw(3), Icmpv6Code::from(0)).name(),
            "Hop Limit Exceeded in Transit"
        );
        assert_eq!(
            v4.get(
                crate::icmpv4::IcmpType::from_raw(3),
                crate::icmpv4::IcmpCode::from(0)
            )
            .name(),
            "Network Unreachable"
        );
    }
}
