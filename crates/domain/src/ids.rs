use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($name:ident) => {
        /// Storage-assigned identity. Always a positive integer.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw identifier, rejecting zero and negative values.
            pub fn try_new(raw: i64) -> Option<Self> {
                (raw > 0).then_some(Self(raw))
            }

            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = String;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::try_new(value)
                    .ok_or_else(|| format!("{} must be a positive integer", stringify!($name)))
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id!(CelestialBodyId);
define_id!(CharacterId);
define_id!(VehicleId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_rejects_non_positive() {
        assert!(VehicleId::try_new(0).is_none());
        assert!(VehicleId::try_new(-7).is_none());
        assert_eq!(VehicleId::try_new(7).map(VehicleId::get), Some(7));
    }

    #[test]
    fn deserialize_rejects_zero() {
        assert!(serde_json::from_str::<CelestialBodyId>("0").is_err());
        let id: CelestialBodyId = serde_json::from_str("42").expect("positive id");
        assert_eq!(id.get(), 42);
    }
}
