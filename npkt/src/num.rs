//! Raw wire-format integers and their rendering conventions.

use core::fmt;
use core::hash::Hash;

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// An unsigned fixed-width integer as it appears on the wire.
///
/// Implemented for `u8`, `u16` and `u32`, which cover every protocol-number
/// field this crate models. Unsigned storage makes the rendering and ordering
/// contracts trivial: `0xFF` at 8 bits *is* 255.
pub trait RawNum:
    sealed::Sealed
    + Copy
    + Eq
    + Ord
    + Hash
    + fmt::Debug
    + fmt::Display
    + fmt::LowerHex
    + Send
    + Sync
    + 'static
{
    /// Width of the value in bits.
    const BITS: u32;

    /// Widen to `u64` without sign extension.
    fn widen(self) -> u64;
}

impl RawNum for u8 {
    const BITS: u32 = 8;

    #[inline]
    fn widen(self) -> u64 {
        self as u64
    }
}

impl RawNum for u16 {
    const BITS: u32 = 16;

    #[inline]
    fn widen(self) -> u64 {
        self as u64
    }
}

impl RawNum for u32 {
    const BITS: u32 = 32;

    #[inline]
    fn widen(self) -> u64 {
        self as u64
    }
}

/// How a domain conventionally renders its numeric values.
///
/// Most registries print plain unsigned decimal; bit-structured code spaces
/// (EtherType, PPP DLL protocol) print zero-padded hexadecimal.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Radix {
    /// Unsigned decimal, e.g. `255`.
    Dec,
    /// `0x`-prefixed hexadecimal, zero-padded to the value's width, e.g. `0x0800`.
    Hex,
}

impl Radix {
    /// Render `value` under this convention.
    pub fn render<V: RawNum>(&self, value: V) -> String {
        match self {
            Radix::Dec => format!("{}", value),
            Radix::Hex => format!("0x{:0w$x}", value, w = (V::BITS / 4) as usize),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsigned_rendering() {
        assert_eq!(Radix::Dec.render(0xffu8), "255");
        assert_eq!(Radix::Dec.render(0xffffu16), "65535");
        assert_eq!(Radix::Hex.render(0x21u8), "0x21");
        assert_eq!(Radix::Hex.render(0x0800u16), "0x0800");
    }

    #[test]
    fn widen_is_zero_extension() {
        assert_eq!(0xffu8.widen(), 0xff);
        assert_eq!(0xffffu16.widen(), 0xffff);
        assert_eq!(0xffff_ffffu32.widen(), 0xffff_ffff);
    }
}
