/// Declares a transparent newtype over a primitive integer, used for every
/// identifier that crosses the wire.
macro_rules! basic_type {
    ($(#[$attr:meta])* $name:ident, $type:ty) => {
        $(#[$attr])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, PartialOrd, Ord, Default
        )]
        #[serde(transparent)]
        pub struct $name(pub $type);

        impl $name {
            /// Width of the inner value in bytes.
            pub const BYTES: usize = std::mem::size_of::<$type>();

            pub fn to_be_bytes(&self) -> [u8; std::mem::size_of::<$type>()] {
                self.0.to_be_bytes()
            }
        }

        impl Deref for $name {
            type Target = $type;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<$type>().map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Add<$type> for $name {
            type Output = Self;

            fn add(self, other: $type) -> Self {
                Self(self.0 + other)
            }
        }

        impl Sub<$type> for $name {
            type Output = Self;

            fn sub(self, other: $type) -> Self {
                Self(self.0 - other)
            }
        }

        basic_type_conversions!($name, $type, u8, u16, u32, u64, usize);
    };
}

/// Lossy `as` conversions in both directions between a newtype and a list of primitives.
macro_rules! basic_type_conversions {
    ($name:ident, $type:ty, $($prim:ty),+) => {
        $(
            impl From<$prim> for $name {
                fn from(t: $prim) -> Self {
                    Self(t as $type)
                }
            }

            impl From<$name> for $prim {
                fn from(t: $name) -> $prim {
                    t.0 as $prim
                }
            }
        )+
    };
}
