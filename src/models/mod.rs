pub mod enums;
pub mod form;
pub mod user;

use serde::{Deserialize, Serialize};

pub use enums::{HeatingType, NumberOfRooms, PropertyStatus, PropertyType, Role, UnknownVariant};
pub use form::{PropertyDraft, PropertyForm};
pub use user::{
    Business, Customer, LoginRequest, LoginResponse, Profile, RegisterRequest, SessionUser,
    UserRef,
};

/// A real-estate listing as exchanged with the backend.
///
/// The list endpoint returns the flattened owner fields (`ownerId`,
/// `ownerName`) while single-property endpoints embed the `lister`; either
/// set may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: i64,
    pub property_type: PropertyType,
    pub number_of_rooms: NumberOfRooms,
    pub floor: i32,
    pub heating_type: HeatingType,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub area: f64,
    pub property_status: PropertyStatus,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lister: Option<UserRef>,
}

impl Property {
    /// First image, used as the card thumbnail
    pub fn cover_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_list_entry() {
        let body = r#"{
            "id": 12,
            "propertyType": "VILLA",
            "area": 240.5,
            "numberOfRooms": "FIVE_PLUS_ONE",
            "floor": 1,
            "heatingType": "NATURAL_GAS",
            "address": null,
            "description": "Deniz manzaralı",
            "price": 12500000.0,
            "propertyStatus": "FOR_SALE",
            "imageUrls": ["/uploads/a.jpg", "/uploads/b.jpg"],
            "ownerId": 4,
            "ownerName": "Ali Veli"
        }"#;
        let property: Property = serde_json::from_str(body).unwrap();

        assert_eq!(property.property_type, PropertyType::Villa);
        assert_eq!(property.address, None);
        assert_eq!(property.cover_image(), Some("/uploads/a.jpg"));
        assert_eq!(property.owner_id, Some(4));
        assert!(property.lister.is_none());
    }

    #[test]
    fn decodes_entity_with_lister() {
        let body = r#"{
            "id": 3,
            "propertyType": "OFFICE",
            "area": 80,
            "numberOfRooms": "TWO_PLUS_ONE",
            "floor": 4,
            "heatingType": "ELECTRIC",
            "address": "Levent",
            "description": "Ofis",
            "price": 30000,
            "propertyStatus": "FOR_RENT",
            "imageUrls": [],
            "lister": {"id": 9, "email": "firma@x.com", "role": "BUSINESS"}
        }"#;
        let property: Property = serde_json::from_str(body).unwrap();

        assert_eq!(property.lister.as_ref().map(|l| l.id), Some(9));
        assert_eq!(property.cover_image(), None);
    }
}
