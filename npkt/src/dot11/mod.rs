//! IEEE 802.11 frame types.
//!
//! The frame control field packs a 2-bit type and a 4-bit subtype; this
//! module keys the catalogue by the combined 6-bit value, so the top two
//! bits of the octet must be clear. The coarse frame class is derived from
//! the type bits once, at construction.

use core::cmp::Ordering;
use core::fmt;

use crate::error::InvalidValue;
use crate::{Domain, NamedNum};

/// A combined 802.11 type/subtype value: `(type << 4) | subtype`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct FrameSubtype(u8);

impl FrameSubtype {
    /// Association request.
    pub const ASSOCIATION_REQUEST: Self = Self(0x00);
    /// Association response.
    pub const ASSOCIATION_RESPONSE: Self = Self(0x01);
    /// Reassociation request.
    pub const REASSOCIATION_REQUEST: Self = Self(0x02);
    /// Reassociation response.
    pub const REASSOCIATION_RESPONSE: Self = Self(0x03);
    /// Probe request.
    pub const PROBE_REQUEST: Self = Self(0x04);
    /// Probe response.
    pub const PROBE_RESPONSE: Self = Self(0x05);
    /// Beacon.
    pub const BEACON: Self = Self(0x08);
    /// ATIM.
    pub const ATIM: Self = Self(0x09);
    /// Disassociation.
    pub const DISASSOCIATION: Self = Self(0x0a);
    /// Authentication.
    pub const AUTHENTICATION: Self = Self(0x0b);
    /// Deauthentication.
    pub const DEAUTHENTICATION: Self = Self(0x0c);
    /// Action.
    pub const ACTION: Self = Self(0x0d);
    /// Block ack request.
    pub const BLOCK_ACK_REQUEST: Self = Self(0x18);
    /// Block ack.
    pub const BLOCK_ACK: Self = Self(0x19);
    /// PS-Poll.
    pub const PS_POLL: Self = Self(0x1a);
    /// Request to send.
    pub const RTS: Self = Self(0x1b);
    /// Clear to send.
    pub const CTS: Self = Self(0x1c);
    /// Acknowledgment.
    pub const ACK: Self = Self(0x1d);
    /// CF-End.
    pub const CF_END: Self = Self(0x1e);
    /// Data.
    pub const DATA: Self = Self(0x20);
    /// Null function (no data).
    pub const NULL: Self = Self(0x24);
    /// QoS data.
    pub const QOS_DATA: Self = Self(0x28);
    /// QoS null function.
    pub const QOS_NULL: Self = Self(0x2c);

    /// Get the raw value.
    pub fn raw(&self) -> u8 {
        self.0
    }
}

static STOCK: &[(u8, &str)] = &[
    (0x00, "Association Request"),
    (0x01, "Association Response"),
    (0x02, "Reassociation Request"),
    (0x03, "Reassociation Response"),
    (0x04, "Probe Request"),
    (0x05, "Probe Response"),
    (0x08, "Beacon"),
    (0x09, "ATIM"),
    (0x0a, "Disassociation"),
    (0x0b, "Authentication"),
    (0x0c, "Deauthentication"),
    (0x0d, "Action"),
    (0x18, "Block Ack Request"),
    (0x19, "Block Ack"),
    (0x1a, "PS-Poll"),
    (0x1b, "RTS"),
    (0x1c, "CTS"),
    (0x1d, "ACK"),
    (0x1e, "CF-End"),
    (0x20, "Data"),
    (0x24, "Null"),
    (0x28, "QoS Data"),
    (0x2c, "QoS Null"),
];

impl Domain for FrameSubtype {
    type Raw = u8;

    const NAME: &'static str = "dot11-frame-subtype";

    #[inline]
    fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    #[inline]
    fn raw(self) -> u8 {
        self.0
    }

    fn check(self) -> Result<(), InvalidValue> {
        if self.0 & 0xc0 != 0 {
            return Err(InvalidValue {
                domain: Self::NAME,
                value: self.0 as u64,
                reason: "top two bits must be clear",
            });
        }
        Ok(())
    }

    fn stock() -> &'static [(u8, &'static str)] {
        STOCK
    }
}

impl From<u8> for FrameSubtype {
    #[inline]
    fn from(value: u8) -> FrameSubtype {
        FrameSubtype(value)
    }
}

impl From<FrameSubtype> for u8 {
    #[inline]
    fn from(value: FrameSubtype) -> u8 {
        value.0
    }
}

/// The coarse frame class carried in the type bits.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum FrameClass {
    /// Management frames (type 0).
    Management,
    /// Control frames (type 1).
    Control,
    /// Data frames (type 2).
    Data,
    /// Reserved (type 3).
    Reserved,
}

impl FrameClass {
    /// The class encoded in a combined type/subtype value.
    pub fn of(subtype: FrameSubtype) -> Self {
        match (subtype.raw() >> 4) & 0x03 {
            0 => FrameClass::Management,
            1 => FrameClass::Control,
            2 => FrameClass::Data,
            _ => FrameClass::Reserved,
        }
    }
}

impl fmt::Display for FrameClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FrameClass::Management => "management",
            FrameClass::Control => "control",
            FrameClass::Data => "data",
            FrameClass::Reserved => "reserved",
        };
        f.write_str(s)
    }
}

/// A named frame type with its class resolved at construction.
///
/// The class is stored, not recomputed, so every observer sees the value it
/// was built with. Ordering delegates to the named number; the class is a
/// pure function of the value and cannot disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameType {
    number: NamedNum<FrameSubtype>,
    class: FrameClass,
}

impl FrameType {
    /// Wrap a named subtype, deriving its class.
    pub fn new(number: NamedNum<FrameSubtype>) -> Self {
        let class = FrameClass::of(number.value());
        Self { number, class }
    }

    /// The underlying named number.
    pub fn number(&self) -> &NamedNum<FrameSubtype> {
        &self.number
    }

    /// The frame class derived at construction.
    pub fn class(&self) -> FrameClass {
        self.class
    }
}

impl PartialOrd for FrameType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrameType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number.cmp(&other.number)
    }
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {} frame", self.number, self.class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Registry;

    #[test]
    fn reserved_bits_are_rejected_at_construction() {
        let err = NamedNum::new(FrameSubtype::from_raw(0x48), "bad").unwrap_err();
        assert_eq!(err.reason, "top two bits must be clear");
        assert!(NamedNum::new(FrameSubtype::from_raw(0x3f), "reserved ok").is_ok());
    }

    #[test]
    fn class_derives_from_type_bits() {
        assert_eq!(FrameClass::of(FrameSubtype::BEACON), FrameClass::Management);
        assert_eq!(FrameClass::of(FrameSubtype::RTS), FrameClass::Control);
        assert_eq!(FrameClass::of(FrameSubtype::QOS_DATA), FrameClass::Data);
        assert_eq!(FrameClass::of(FrameSubtype::from_raw(0x30)), FrameClass::Reserved);
    }

    #[test]
    fn frame_type_carries_its_class() {
        let reg = Registry::<FrameSubtype>::with_stock();
        let beacon = FrameType::new(reg.get(FrameSubtype::BEACON));
        assert_eq!(beacon.class(), FrameClass::Management);
        assert_eq!(beacon.to_string(), "Beacon (8), management frame");

        // Unknown subtypes still classify.
        let odd = FrameType::new(reg.get(FrameSubtype::from_raw(0x2f)));
        assert_eq!(odd.class(), FrameClass::Data);
        assert_eq!(odd.number().name(), "unknown");
    }

    #[test]
    fn ordering_follows_the_numeric_value() {
        let reg = Registry::<FrameSubtype>::with_stock();
        let beacon = FrameType::new(reg.get(FrameSubtype::BEACON));
        let rts = FrameType::new(reg.get(FrameSubtype::RTS));
        assert!(beacon < rts);
    }
}
