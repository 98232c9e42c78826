//! Macros for defining identifier types bound to one prefix.

/// Macro to define a typed identifier with a fixed 4-character prefix.
///
/// This generates a newtype wrapper around [`Bcid`](crate::Bcid) with:
/// - A `PREFIX` constant, checked at compile time to be 4 bytes long
/// - `generate()`, `generate_at()` and `generate_random()`
/// - `parse()` that rejects identifiers carrying another prefix
/// - `decode()` to recover the payload fields
/// - `Display`, `FromStr`, `Serialize` and `Deserialize` implementations
///
/// # Example
///
/// ```ignore
/// define_bcid!(OrderId, "ORDR");
///
/// let id = OrderId::generate(MachineId::new(7))?;
/// let parsed: OrderId = id.to_string().parse()?;
/// ```
#[macro_export]
macro_rules! define_bcid {
    ($name:ident, $prefix:literal) => {
        /// A typed identifier for this prefix.
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name($crate::Bcid);

        const _: () = assert!($prefix.len() == 4, "BCID prefixes are 4 characters");

        impl $name {
            /// The prefix for this identifier type.
            pub const PREFIX: &'static str = $prefix;

            fn prefix() -> Result<$crate::Prefix, $crate::BcidError> {
                $crate::Prefix::new(Self::PREFIX)
            }

            /// Generates a chronological identifier for the current time.
            pub fn generate(machine_id: $crate::MachineId) -> Result<Self, $crate::BcidError> {
                $crate::Generator::new()
                    .chronological(&Self::prefix()?, machine_id, None)
                    .map(Self)
            }

            /// Generates a chronological identifier for the given time.
            pub fn generate_at(
                machine_id: $crate::MachineId,
                at: impl Into<$crate::TimeInput>,
            ) -> Result<Self, $crate::BcidError> {
                $crate::Generator::new()
                    .chronological(&Self::prefix()?, machine_id, Some(&at.into()))
                    .map(Self)
            }

            /// Generates a random identifier.
            pub fn generate_random(
                machine_id: $crate::MachineId,
            ) -> Result<Self, $crate::BcidError> {
                $crate::Generator::new()
                    .random(&Self::prefix()?, machine_id)
                    .map(Self)
            }

            /// Parses an identifier, requiring this type's prefix.
            pub fn parse(s: &str) -> Result<Self, $crate::BcidError> {
                let bcid = $crate::Bcid::parse(s)?;
                if bcid.prefix() != Self::PREFIX {
                    return Err($crate::BcidError::PrefixMismatch {
                        expected: Self::PREFIX,
                        actual: bcid.prefix().to_string(),
                    });
                }
                Ok(Self(bcid))
            }

            /// Decodes the payload fields.
            pub fn decode(&self) -> Result<$crate::Decoded, $crate::BcidError> {
                self.0.decode()
            }

            /// Returns the untyped identifier.
            #[must_use]
            pub fn as_bcid(&self) -> &$crate::Bcid {
                &self.0
            }

            /// Returns the identifier text.
            #[must_use]
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::BcidError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl $crate::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::serde::Serializer,
            {
                serializer.serialize_str(self.0.as_str())
            }
        }

        impl<'de> $crate::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: $crate::serde::Deserializer<'de>,
            {
                let s = <String as $crate::serde::Deserialize>::deserialize(deserializer)?;
                Self::parse(&s).map_err(<D::Error as $crate::serde::de::Error>::custom)
            }
        }
    };
}
