macro_rules! named_enum {
    (
        $(#[$enum_attr: meta])*
        pub struct $tname:ident ($size_t:ty), $domain:literal $(, radix: $radix:ident)? {
            $(
                $(#[$arm_attr: meta])*
                $enum_arm:ident = $num_exp:expr => $arm_name:literal
            ),+ $(,)?
        }
    ) => {
        #[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
        $(#[$enum_attr])*
        pub struct $tname($size_t);

        impl $tname {
            $(
                $(#[$arm_attr])*
                pub const $enum_arm: Self = Self($num_exp);
            )+

            /// Get the raw value.
            pub fn raw(&self) -> $size_t {
                self.0
            }
        }

        impl $crate::Domain for $tname {
            type Raw = $size_t;

            const NAME: &'static str = $domain;
            $(const RADIX: $crate::Radix = $crate::Radix::$radix;)?

            #[inline]
            fn from_raw(raw: $size_t) -> Self {
                Self(raw)
            }

            #[inline]
            fn raw(self) -> $size_t {
                self.0
            }

            fn stock() -> &'static [($size_t, &'static str)] {
                &[$(($num_exp, $arm_name)),+]
            }
        }

        impl ::core::convert::From<$size_t> for $tname {
            #[inline]
            fn from(value: $size_t) -> $tname {
                $tname(value)
            }
        }

        impl ::core::convert::From<$tname> for $size_t {
            #[inline]
            fn from(value: $tname) -> $size_t {
                value.0
            }
        }
    };
}
