use crate::api::{ApiError, PropertySource};
use crate::models::Property;
use crate::search::filter::filter_and_sort;
use crate::search::types::SearchParams;
use tracing::{debug, info};

/// Search view state: the full listing set is fetched once and every
/// parameter change is answered locally from that copy.
pub struct PropertySearch<S> {
    source: S,
    all: Option<Vec<Property>>,
}

impl<S: PropertySource> PropertySearch<S> {
    pub fn new(source: S) -> Self {
        Self { source, all: None }
    }

    /// Fetches the full list unless it is already cached
    pub async fn load(&mut self) -> Result<&[Property], ApiError> {
        if self.all.is_none() {
            return self.retry().await;
        }
        debug!("Using cached property list");
        Ok(self.all.as_deref().unwrap_or_default())
    }

    /// Always refetches, replacing the cached list on success. A failed
    /// fetch keeps whatever was cached before.
    pub async fn retry(&mut self) -> Result<&[Property], ApiError> {
        info!("Fetching all properties from {}", self.source.source_name());
        let properties = self.source.fetch_all().await?;
        info!("Loaded {} properties", properties.len());

        Ok(self.all.insert(properties).as_slice())
    }

    pub fn is_loaded(&self) -> bool {
        self.all.is_some()
    }

    /// Filters the cached list. Empty until a load succeeds.
    pub fn results(&self, params: &SearchParams) -> Vec<Property> {
        match &self.all {
            Some(all) => filter_and_sort(all, params),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HeatingType, NumberOfRooms, PropertyStatus, PropertyType};
    use crate::search::types::SearchField;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingSource {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl PropertySource for CountingSource {
        async fn fetch_all(&self) -> Result<Vec<Property>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ApiError::Status {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(vec![
                listing(1, 300.0, "Moda"),
                listing(2, 100.0, "Fenerbahçe"),
            ])
        }

        fn source_name(&self) -> &'static str {
            "test"
        }
    }

    fn listing(id: i64, price: f64, address: &str) -> Property {
        Property {
            id,
            property_type: PropertyType::House,
            number_of_rooms: NumberOfRooms::ThreePlusOne,
            floor: 2,
            heating_type: HeatingType::Electric,
            address: Some(address.to_string()),
            description: String::new(),
            price,
            area: 90.0,
            property_status: PropertyStatus::ForSale,
            image_urls: vec![],
            owner_id: None,
            owner_name: None,
            lister: None,
        }
    }

    #[tokio::test]
    async fn fetches_once_and_filters_locally() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut search = PropertySearch::new(CountingSource {
            calls: calls.clone(),
            fail: false,
        });

        assert!(search.results(&SearchParams::default()).is_empty());

        search.load().await.unwrap();
        search.load().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let mut params = SearchParams::default();
        let ids: Vec<i64> = search.results(&params).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);

        params.set(SearchField::SortBy, "priceAsc");
        let ids: Vec<i64> = search.results(&params).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1]);

        params.set(SearchField::Address, "MODA");
        assert_eq!(search.results(&params).len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        search.retry().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_load_leaves_nothing_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut search = PropertySearch::new(CountingSource { calls, fail: true });

        assert!(search.load().await.is_err());
        assert!(!search.is_loaded());
        assert!(search.results(&SearchParams::default()).is_empty());
    }
}
