use crate::api::ApiError;
use crate::models::Property;
use async_trait::async_trait;

/// Anything that can produce the full listing set for the search view
#[async_trait]
pub trait PropertySource: Send + Sync {
    /// Fetch every listing
    async fn fetch_all(&self) -> Result<Vec<Property>, ApiError>;

    /// Name used in log lines
    fn source_name(&self) -> &'static str;
}

#[async_trait]
impl<T: PropertySource + ?Sized> PropertySource for std::sync::Arc<T> {
    async fn fetch_all(&self) -> Result<Vec<Property>, ApiError> {
        (**self).fetch_all().await
    }

    fn source_name(&self) -> &'static str {
        (**self).source_name()
    }
}
