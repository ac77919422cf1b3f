//! Closed option sets that select footprint geometry.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use crate::error::FootprintError;

macro_rules! option_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal $(| $alias:literal)*,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = FootprintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_lowercase().as_str() {
                    $($text $(| $alias)* => Ok($name::$variant),)+
                    _ => Err(FootprintError::UnknownOption {
                        kind: $kind,
                        value: s.to_string(),
                        expected: $name::ALL.iter().map(|v| v.as_str()).join(", "),
                    }),
                }
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serde::Serializer::serialize_str(serializer, self.as_str())
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

option_enum! {
    /// How the switch connects to the board.
    SwitchVariant, "switch" {
        /// No switch, only the keycap outline and any stabilizer/LED.
        None => "none",
        #[default]
        Solder => "solder",
        /// Kailh hotswap socket.
        Hotswap => "hotswap",
        /// Hotswap socket with anti-shear vias.
        HotswapAntishear => "hotswap-antishear" | "antishear",
    }
}

option_enum! {
    MountStyle, "mount" {
        /// PCB mount: the two extra plastic pegs need holes.
        #[default]
        Pcb => "pcb",
        Plate => "plate",
    }
}

option_enum! {
    LedOption, "led" {
        #[default]
        None => "none",
        Normal => "normal",
        /// LED with the pins swapped.
        Reverse => "reverse",
    }
}

option_enum! {
    /// Cherry plate-mount stabilizer; `Reverse` puts the wire on the south side.
    StabilizerOption, "stabilizer" {
        None => "none",
        #[default]
        Normal => "normal",
        Reverse => "reverse",
    }
}

impl SwitchVariant {
    pub fn is_hotswap(self) -> bool {
        matches!(self, Self::Hotswap | Self::HotswapAntishear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive_and_accepts_aliases() {
        assert_eq!("Hotswap".parse::<SwitchVariant>(), Ok(SwitchVariant::Hotswap));
        assert_eq!(
            "antishear".parse::<SwitchVariant>(),
            Ok(SwitchVariant::HotswapAntishear)
        );
        assert_eq!("PLATE".parse::<MountStyle>(), Ok(MountStyle::Plate));
        assert_eq!("reverse".parse::<LedOption>(), Ok(LedOption::Reverse));
    }

    #[test]
    fn unknown_values_are_rejected() {
        assert_eq!(
            "north".parse::<StabilizerOption>(),
            Err(FootprintError::UnknownOption {
                kind: "stabilizer",
                value: "north".to_string(),
                expected: "none, normal, reverse".to_string(),
            })
        );
        let err = "alps".parse::<SwitchVariant>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown switch option 'alps', expected one of: none, solder, hotswap, hotswap-antishear"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_goes_through_from_str() {
        use serde::Deserialize;
        use serde::de::IntoDeserializer;
        use serde::de::value::{Error, StrDeserializer};

        let de: StrDeserializer<Error> = "Hotswap".into_deserializer();
        assert_eq!(SwitchVariant::deserialize(de), Ok(SwitchVariant::Hotswap));

        let de: StrDeserializer<Error> = "rgb".into_deserializer();
        let err = LedOption::deserialize(de).unwrap_err();
        assert!(err.to_string().contains("expected one of: none, normal, reverse"));
    }

    #[test]
    fn defaults_and_display() {
        assert_eq!(SwitchVariant::default(), SwitchVariant::Solder);
        assert_eq!(MountStyle::default(), MountStyle::Pcb);
        assert_eq!(LedOption::default(), LedOption::None);
        assert_eq!(StabilizerOption::default(), StabilizerOption::Normal);
        assert_eq!(SwitchVariant::HotswapAntishear.to_string(), "hotswap-antishear");
        assert_eq!(SwitchVariant::ALL.len(), 4);
    }
}
