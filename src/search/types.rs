use crate::models::{HeatingType, NumberOfRooms, PropertyStatus, PropertyType};
use crate::validate::parse_number;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Price ordering applied after filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortBy {
    #[serde(rename = "priceAsc")]
    PriceAsc,
    #[serde(rename = "priceDesc")]
    PriceDesc,
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "priceAsc" | "asc" => Ok(SortBy::PriceAsc),
            "priceDesc" | "desc" => Ok(SortBy::PriceDesc),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Client-side search criteria for the property list.
///
/// Numeric bounds hold the raw text typed by the user; an empty or
/// unparsable value imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub property_type: Option<PropertyType>,
    pub property_status: Option<PropertyStatus>,
    pub heating_type: Option<HeatingType>,
    pub number_of_rooms: Option<NumberOfRooms>,
    /// Exact floor
    pub floor: String,
    /// Minimum price (TRY), inclusive
    pub min_price: String,
    /// Maximum price (TRY), inclusive
    pub max_price: String,
    /// Minimum size in square meters, inclusive
    pub min_area: String,
    /// Maximum size in square meters, inclusive
    pub max_area: String,
    /// Case-insensitive substring of the address
    pub address: String,
    /// `None` keeps the listings in the order they were fetched
    pub sort_by: Option<SortBy>,
}

/// A single editable search field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    PropertyType,
    PropertyStatus,
    HeatingType,
    NumberOfRooms,
    Floor,
    MinPrice,
    MaxPrice,
    MinArea,
    MaxArea,
    Address,
    SortBy,
}

impl SearchParams {
    /// Updates one field from raw input.
    ///
    /// Returns `false` and leaves the params untouched when the input is a
    /// negative number or names no known enum value / sort order. Empty
    /// input clears the field, including the sort order.
    pub fn set(&mut self, field: SearchField, value: &str) -> bool {
        let value = value.trim();

        if parse_number(value).is_some_and(|n| n < 0.0) {
            return false;
        }

        match field {
            SearchField::PropertyType => set_choice(&mut self.property_type, value),
            SearchField::PropertyStatus => set_choice(&mut self.property_status, value),
            SearchField::HeatingType => set_choice(&mut self.heating_type, value),
            SearchField::NumberOfRooms => set_choice(&mut self.number_of_rooms, value),
            SearchField::Floor => replace(&mut self.floor, value),
            SearchField::MinPrice => replace(&mut self.min_price, value),
            SearchField::MaxPrice => replace(&mut self.max_price, value),
            SearchField::MinArea => replace(&mut self.min_area, value),
            SearchField::MaxArea => replace(&mut self.max_area, value),
            SearchField::Address => replace(&mut self.address, value),
            SearchField::SortBy => set_choice(&mut self.sort_by, value),
        }
    }

    /// True when no filter is populated; the sort order is not a filter
    pub fn is_empty(&self) -> bool {
        *self
            == Self {
                sort_by: self.sort_by,
                ..Self::default()
            }
    }
}

fn set_choice<T: FromStr>(slot: &mut Option<T>, value: &str) -> bool {
    if value.is_empty() {
        *slot = None;
        return true;
    }
    match value.parse() {
        Ok(choice) => {
            *slot = Some(choice);
            true
        }
        Err(_) => false,
    }
}

fn replace(slot: &mut String, value: &str) -> bool {
    *slot = value.to_string();
    true
}
