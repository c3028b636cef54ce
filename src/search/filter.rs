use crate::models::Property;
use crate::search::types::{SearchParams, SortBy};
use crate::validate::parse_number;

/// Parsed, active constraints. Anything that failed to parse is `None` and
/// so imposes nothing.
struct Criteria<'a> {
    params: &'a SearchParams,
    min_price: Option<f64>,
    max_price: Option<f64>,
    min_area: Option<f64>,
    max_area: Option<f64>,
    floor: Option<i32>,
    address: Option<String>,
}

impl<'a> Criteria<'a> {
    fn new(params: &'a SearchParams) -> Self {
        let address = params.address.trim();

        Self {
            params,
            min_price: parse_number(&params.min_price),
            max_price: parse_number(&params.max_price),
            min_area: parse_number(&params.min_area),
            max_area: parse_number(&params.max_area),
            floor: params.floor.trim().parse().ok(),
            address: (!address.is_empty()).then(|| address.to_lowercase()),
        }
    }

    fn matches(&self, property: &Property) -> bool {
        let p = self.params;

        if self.min_price.is_some_and(|min| property.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| property.price > max) {
            return false;
        }
        if self.min_area.is_some_and(|min| property.area < min) {
            return false;
        }
        if self.max_area.is_some_and(|max| property.area > max) {
            return false;
        }
        if self.floor.is_some_and(|floor| property.floor != floor) {
            return false;
        }

        if p.property_type.is_some_and(|t| property.property_type != t)
            || p.property_status.is_some_and(|s| property.property_status != s)
            || p.heating_type.is_some_and(|h| property.heating_type != h)
            || p.number_of_rooms.is_some_and(|r| property.number_of_rooms != r)
        {
            return false;
        }

        match (&self.address, &property.address) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(needle), Some(address)) => address.to_lowercase().contains(needle.as_str()),
        }
    }
}

/// Returns the listings matching every populated field of `params`, ordered
/// by price when a sort order is set and in input order otherwise. The input
/// is left untouched; equal prices keep input order.
pub fn filter_and_sort(properties: &[Property], params: &SearchParams) -> Vec<Property> {
    let criteria = Criteria::new(params);

    let mut matched: Vec<Property> = properties
        .iter()
        .filter(|p| criteria.matches(p))
        .cloned()
        .collect();

    match params.sort_by {
        Some(SortBy::PriceAsc) => matched.sort_by(|a, b| a.price.total_cmp(&b.price)),
        Some(SortBy::PriceDesc) => matched.sort_by(|a, b| b.price.total_cmp(&a.price)),
        None => {}
    }

    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HeatingType, NumberOfRooms, PropertyStatus, PropertyType};
    use crate::search::types::SearchField;

    fn listing(id: i64, price: f64, area: f64) -> Property {
        Property {
            id,
            property_type: PropertyType::Apartment,
            number_of_rooms: NumberOfRooms::TwoPlusOne,
            floor: 1,
            heating_type: HeatingType::NaturalGas,
            address: Some(format!("{id} Bağdat Caddesi")),
            description: "Test ilanı".to_string(),
            price,
            area,
            property_status: PropertyStatus::ForSale,
            image_urls: vec![],
            owner_id: None,
            owner_name: None,
            lister: None,
        }
    }

    fn sample() -> Vec<Property> {
        vec![
            listing(1, 100_000.0, 50.0),
            listing(2, 250_000.0, 80.0),
            listing(3, 90_000.0, 40.0),
        ]
    }

    fn ids(properties: &[Property]) -> Vec<i64> {
        properties.iter().map(|p| p.id).collect()
    }

    fn prices(properties: &[Property]) -> Vec<f64> {
        properties.iter().map(|p| p.price).collect()
    }

    #[test]
    fn min_price_with_ascending_sort() {
        let mut params = SearchParams::default();
        params.set(SearchField::MinPrice, "95000");
        params.set(SearchField::SortBy, "priceAsc");

        let result = filter_and_sort(&sample(), &params);

        assert_eq!(prices(&result), vec![100_000.0, 250_000.0]);
    }

    #[test]
    fn empty_params_keep_everything_in_order() {
        let properties = vec![
            listing(1, 300_000.0, 60.0),
            listing(2, 100_000.0, 40.0),
            listing(3, 200_000.0, 50.0),
        ];

        let result = filter_and_sort(&properties, &SearchParams::default());

        assert_eq!(ids(&result), vec![1, 2, 3]);
        assert_eq!(result, properties);
    }

    #[test]
    fn empty_list_stays_empty() {
        let mut params = SearchParams::default();
        params.set(SearchField::Address, "moda");

        assert!(filter_and_sort(&[], &params).is_empty());
        assert!(filter_and_sort(&[], &SearchParams::default()).is_empty());
    }

    #[test]
    fn input_is_not_mutated() {
        let properties = sample();
        let before = properties.clone();

        let _ = filter_and_sort(&properties, &SearchParams::default());

        assert_eq!(properties, before);
    }

    #[test]
    fn bounds_are_inclusive() {
        let params = SearchParams {
            min_price: "90000".to_string(),
            max_price: "100000".to_string(),
            min_area: "40".to_string(),
            max_area: "50".to_string(),
            ..Default::default()
        };

        let result = filter_and_sort(&sample(), &params);

        assert_eq!(ids(&result), vec![1, 3]);
    }

    #[test]
    fn every_result_respects_min_price() {
        let properties = sample();
        for bound in [0.0, 90_000.0, 95_000.0, 100_000.0, 250_000.0, 300_000.0] {
            let params = SearchParams {
                min_price: bound.to_string(),
                ..Default::default()
            };
            let result = filter_and_sort(&properties, &params);
            assert!(result.iter().all(|p| p.price >= bound), "bound {bound}");
        }
    }

    #[test]
    fn malformed_numbers_impose_nothing() {
        let params = SearchParams {
            min_price: "çok".to_string(),
            max_area: "NaN".to_string(),
            floor: "zemin".to_string(),
            ..Default::default()
        };

        assert_eq!(filter_and_sort(&sample(), &params).len(), 3);
    }

    #[test]
    fn exact_matches() {
        let mut properties = sample();
        properties[0].floor = 3;
        properties[1].property_status = PropertyStatus::ForRent;
        properties[2].number_of_rooms = NumberOfRooms::FourPlusOne;
        properties[2].heating_type = HeatingType::Stove;

        let floor = SearchParams {
            floor: "3".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&properties, &floor)), vec![1]);

        let rent = SearchParams {
            property_status: Some(PropertyStatus::ForRent),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&properties, &rent)), vec![2]);

        let combined = SearchParams {
            number_of_rooms: Some(NumberOfRooms::FourPlusOne),
            heating_type: Some(HeatingType::NaturalGas),
            ..Default::default()
        };
        assert!(filter_and_sort(&properties, &combined).is_empty());

        let villas = SearchParams {
            property_type: Some(PropertyType::Villa),
            ..Default::default()
        };
        assert!(filter_and_sort(&properties, &villas).is_empty());
    }

    #[test]
    fn address_is_case_insensitive_and_skips_missing() {
        let mut properties = sample();
        properties[0].address = Some("123 main st".to_string());
        properties[1].address = None;

        let params = SearchParams {
            address: "MAIN".to_string(),
            ..Default::default()
        };

        assert_eq!(ids(&filter_and_sort(&properties, &params)), vec![1]);
    }

    #[test]
    fn sorting_directions() {
        let asc = filter_and_sort(
            &sample(),
            &SearchParams {
                sort_by: Some(SortBy::PriceAsc),
                ..Default::default()
            },
        );
        assert!(asc.windows(2).all(|w| w[0].price <= w[1].price));
        assert_eq!(ids(&asc), vec![3, 1, 2]);

        let desc = filter_and_sort(
            &sample(),
            &SearchParams {
                sort_by: Some(SortBy::PriceDesc),
                ..Default::default()
            },
        );
        assert!(desc.windows(2).all(|w| w[0].price >= w[1].price));
        assert_eq!(ids(&desc), vec![2, 1, 3]);
    }

    #[test]
    fn equal_prices_keep_input_order() {
        let properties = vec![
            listing(1, 500.0, 10.0),
            listing(2, 100.0, 10.0),
            listing(3, 500.0, 10.0),
            listing(4, 100.0, 10.0),
        ];

        let asc = filter_and_sort(
            &properties,
            &SearchParams {
                sort_by: Some(SortBy::PriceAsc),
                ..Default::default()
            },
        );
        assert_eq!(ids(&asc), vec![2, 4, 1, 3]);

        let desc = filter_and_sort(
            &properties,
            &SearchParams {
                sort_by: Some(SortBy::PriceDesc),
                ..Default::default()
            },
        );
        assert_eq!(ids(&desc), vec![1, 3, 2, 4]);
    }

    #[test]
    fn filtering_twice_changes_nothing() {
        let params = SearchParams {
            max_price: "200000".to_string(),
            address: "bağdat".to_string(),
            ..Default::default()
        };

        let once = filter_and_sort(&sample(), &params);
        let twice = filter_and_sort(&once, &params);

        assert_eq!(once, twice);
    }
}
