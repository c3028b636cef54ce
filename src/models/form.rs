use crate::models::enums::{HeatingType, NumberOfRooms, PropertyStatus, PropertyType};
use crate::models::Property;
use crate::validate::{parse_number, FormErrors};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// JSON body of a property create or update. Identity and owner/lister
/// references travel outside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDraft {
    pub property_type: PropertyType,
    pub area: f64,
    pub number_of_rooms: NumberOfRooms,
    pub floor: i32,
    pub heating_type: HeatingType,
    pub address: String,
    pub description: String,
    pub price: f64,
    pub property_status: PropertyStatus,
}

/// Raw property input as typed by a user. Enum fields take either the
/// wire code or the display label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyForm {
    pub property_type: String,
    pub area: String,
    pub number_of_rooms: String,
    pub floor: String,
    pub heating_type: String,
    pub address: String,
    pub description: String,
    pub price: String,
    pub property_status: String,
}

const TEXT_MIN: usize = 2;
const TEXT_MAX: usize = 50;

impl PropertyForm {
    /// Pre-fills the form for editing an existing listing
    pub fn from_property(property: &Property) -> Self {
        Self {
            property_type: property.property_type.label().to_string(),
            area: property.area.to_string(),
            number_of_rooms: property.number_of_rooms.label().to_string(),
            floor: property.floor.to_string(),
            heating_type: property.heating_type.label().to_string(),
            address: property.address.clone().unwrap_or_default(),
            description: property.description.clone(),
            price: property.price.to_string(),
            property_status: property.property_status.label().to_string(),
        }
    }

    /// Checks the input against the backend's entity constraints and
    /// builds the draft. Every failing field is reported at once.
    pub fn validate(&self) -> Result<PropertyDraft, FormErrors> {
        let mut errors = FormErrors::new();

        let property_type = pick::<PropertyType>(
            &self.property_type,
            "propertyType",
            "Emlak türü seçiniz",
            &mut errors,
        );
        let number_of_rooms = pick::<NumberOfRooms>(
            &self.number_of_rooms,
            "numberOfRooms",
            "Oda sayısı seçiniz",
            &mut errors,
        );
        let heating_type = pick::<HeatingType>(
            &self.heating_type,
            "heatingType",
            "Isıtma türü seçiniz",
            &mut errors,
        );
        let property_status = pick::<PropertyStatus>(
            &self.property_status,
            "propertyStatus",
            "Emlak durumu seçiniz",
            &mut errors,
        );

        let area = positive(
            &self.area,
            "area",
            "Alan pozitif bir sayı olmalıdır",
            &mut errors,
        );
        let price = positive(
            &self.price,
            "price",
            "Fiyat pozitif bir sayı olmalıdır",
            &mut errors,
        );

        let floor = match self.floor.trim().parse::<i32>() {
            Ok(floor) if floor > 0 => Some(floor),
            _ => {
                errors.insert("floor", "Kat pozitif bir tam sayı olmalıdır".to_string());
                None
            }
        };

        let address = text(
            &self.address,
            "address",
            "Adres 2 ile 50 karakter arasında olmalıdır",
            &mut errors,
        );
        let description = text(
            &self.description,
            "description",
            "Açıklama 2 ile 50 karakter arasında olmalıdır",
            &mut errors,
        );

        let (
            Some(property_type),
            Some(number_of_rooms),
            Some(heating_type),
            Some(property_status),
            Some(area),
            Some(price),
            Some(floor),
            Some(address),
            Some(description),
        ) = (
            property_type,
            number_of_rooms,
            heating_type,
            property_status,
            area,
            price,
            floor,
            address,
            description,
        )
        else {
            return Err(errors);
        };

        Ok(PropertyDraft {
            property_type,
            area,
            number_of_rooms,
            floor,
            heating_type,
            address,
            description,
            price,
            property_status,
        })
    }
}

fn pick<T: FromStr>(
    input: &str,
    field: &'static str,
    message: &str,
    errors: &mut FormErrors,
) -> Option<T> {
    let parsed = input.parse::<T>().ok();
    if parsed.is_none() {
        errors.insert(field, message.to_string());
    }
    parsed
}

fn positive(
    input: &str,
    field: &'static str,
    message: &str,
    errors: &mut FormErrors,
) -> Option<f64> {
    let parsed = parse_number(input).filter(|n| *n > 0.0);
    if parsed.is_none() {
        errors.insert(field, message.to_string());
    }
    parsed
}

fn text(
    input: &str,
    field: &'static str,
    message: &str,
    errors: &mut FormErrors,
) -> Option<String> {
    let trimmed = input.trim();
    let len = trimmed.chars().count();
    if (TEXT_MIN..=TEXT_MAX).contains(&len) {
        Some(trimmed.to_string())
    } else {
        errors.insert(field, message.to_string());
        None
    }
}
