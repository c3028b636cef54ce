use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raised when text matches neither a wire code nor a display label
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a categorical field whose variants carry the backend's wire code
/// and the Turkish display label. The enum is the only table; lookups in
/// either direction go through `ALL`.
macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        $name:ident as $kind:literal {
            $($variant:ident => ($code:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in display order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Backend enum code, e.g. `APARTMENT`
            pub fn code(self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            /// Display label, e.g. `Daire`
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn from_code(code: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.code() == code)
            }

            pub fn from_label(label: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.label() == label)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        /// Accepts either the wire code (any case) or the exact label
        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let input = s.trim();
                Self::from_code(&input.to_uppercase())
                    .or_else(|| Self::from_label(input))
                    .ok_or_else(|| UnknownVariant {
                        kind: $kind,
                        value: input.to_string(),
                    })
            }
        }
    };
}

labeled_enum! {
    /// Kind of building being listed
    PropertyType as "property type" {
        Apartment => ("APARTMENT", "Daire"),
        House => ("HOUSE", "Müstakil"),
        Villa => ("VILLA", "Villa"),
        Office => ("OFFICE", "Ofis"),
        Other => ("OTHER", "Diğer"),
    }
}

labeled_enum! {
    /// Whether the listing is a sale or a rental
    PropertyStatus as "property status" {
        ForSale => ("FOR_SALE", "Satılık"),
        ForRent => ("FOR_RENT", "Kiralık"),
    }
}

labeled_enum! {
    HeatingType as "heating type" {
        NaturalGas => ("NATURAL_GAS", "Doğalgaz"),
        CentralHeating => ("CENTRAL_HEATING", "Merkezi Isıtma"),
        AirConditioning => ("AIR_CONDITIONING", "Klima"),
        Electric => ("ELECTRIC", "Elektrik"),
        Stove => ("STOVE", "Soba"),
    }
}

labeled_enum! {
    /// Room layout, bedrooms plus living room
    NumberOfRooms as "number of rooms" {
        OnePlusOne => ("ONE_PLUS_ONE", "1+1"),
        TwoPlusOne => ("TWO_PLUS_ONE", "2+1"),
        ThreePlusOne => ("THREE_PLUS_ONE", "3+1"),
        FourPlusOne => ("FOUR_PLUS_ONE", "4+1"),
        FivePlusOne => ("FIVE_PLUS_ONE", "5+1"),
        SixPlusOne => ("SIX_PLUS_ONE", "6+1"),
        SevenPlusOne => ("SEVEN_PLUS_ONE", "7+1"),
        EightPlusOne => ("EIGHT_PLUS_ONE", "8+1"),
        NinePlusOne => ("NINE_PLUS_ONE", "9+1"),
        TenPlusOne => ("TEN_PLUS_ONE", "10+1"),
    }
}

labeled_enum! {
    /// Account kind; decides which profile endpoint applies
    Role as "role" {
        Customer => ("CUSTOMER", "Müşteri"),
        Business => ("BUSINESS", "İşletme"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_codes_match_backend() {
        let json = serde_json::to_string(&HeatingType::CentralHeating).unwrap();
        assert_eq!(json, "\"CENTRAL_HEATING\"");

        let rooms: NumberOfRooms = serde_json::from_str("\"TEN_PLUS_ONE\"").unwrap();
        assert_eq!(rooms, NumberOfRooms::TenPlusOne);
        assert_eq!(rooms.label(), "10+1");
    }

    #[test]
    fn parses_codes_and_labels() {
        assert_eq!("apartment".parse::<PropertyType>(), Ok(PropertyType::Apartment));
        assert_eq!("Müstakil".parse::<PropertyType>(), Ok(PropertyType::House));
        assert_eq!(" Kiralık ".parse::<PropertyStatus>(), Ok(PropertyStatus::ForRent));
        assert_eq!("3+1".parse::<NumberOfRooms>(), Ok(NumberOfRooms::ThreePlusOne));
    }

    #[test]
    fn rejects_unknown_input() {
        let err = "castle".parse::<PropertyType>().unwrap_err();
        assert_eq!(err.kind, "property type");
        assert_eq!(err.to_string(), "unknown property type value: \"castle\"");
    }

    #[test]
    fn label_lookup_is_exact() {
        assert_eq!(HeatingType::from_label("Merkezi Isıtma"), Some(HeatingType::CentralHeating));
        assert_eq!(HeatingType::from_label("merkezi ısıtma"), None);
        assert_eq!(Role::ALL.len(), 2);
    }
}
