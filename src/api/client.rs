use crate::api::endpoints;
use crate::api::interceptor::{ResponseInterceptor, UnauthorizedRedirect};
use crate::api::multipart::{create_form, update_form, NewListing};
use crate::api::traits::PropertySource;
use crate::api::ApiError;
use crate::config::Config;
use crate::models::{
    Business, Customer, LoginRequest, LoginResponse, Profile, Property, PropertyDraft,
    RegisterRequest, Role, SessionUser,
};
use crate::navigation::Navigator;
use crate::session::AuthSession;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Shortest customer query worth sending
const MIN_OWNER_QUERY: usize = 2;

/// HTTP access to the listings backend.
///
/// Attaches the session's bearer token to every request and runs the
/// response interceptors (401 handling included) before any caller sees a
/// result.
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Arc<AuthSession>,
    interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl ApiClient {
    /// Create a client whose 401 responses end `session` and send
    /// `navigator` to the login entry point
    pub fn new(
        config: &Config,
        session: Arc<AuthSession>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("emlak-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let redirect = UnauthorizedRedirect::new(session.clone(), navigator);

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
            session,
            interceptors: vec![Arc::new(redirect)],
        })
    }

    pub fn with_interceptor(mut self, interceptor: Arc<dyn ResponseInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn session(&self) -> &Arc<AuthSession> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));

        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let request = builder.build()?;
        let method = request.method().clone();
        let url = request.url().to_string();

        debug!("{} {}", method, url);
        let response = self.client.execute(request).await?;
        let status = response.status();

        for interceptor in &self.interceptors {
            interceptor.on_response(&method, &url, status);
        }

        if status.is_success() {
            return Ok(response);
        }

        let message = error_message(&response.text().await.unwrap_or_default());
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized(message));
        }

        warn!("{} {} returned status: {}", method, url, status);
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(builder).await?;
        let body = response.text().await?;
        debug!("Downloaded {} bytes", body.len());

        Ok(serde_json::from_str(&body)?)
    }

    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.fetch(self.request(Method::POST, endpoints::LOGIN).json(credentials))
            .await
    }

    /// Returns the backend's confirmation text
    pub async fn register(&self, request: &RegisterRequest) -> Result<String, ApiError> {
        let response = self
            .send(self.request(Method::POST, endpoints::REGISTER).json(request))
            .await?;
        Ok(response.text().await?)
    }

    pub async fn list_properties(&self) -> Result<Vec<Property>, ApiError> {
        self.fetch(self.request(Method::GET, endpoints::PROPERTIES))
            .await
    }

    pub async fn get_property(&self, id: i64) -> Result<Property, ApiError> {
        self.fetch(self.request(Method::GET, &endpoints::property(id)))
            .await
    }

    /// Listings created by the signed-in user
    pub async fn my_properties(&self) -> Result<Vec<Property>, ApiError> {
        self.fetch(self.request(Method::GET, endpoints::MY_PROPERTIES))
            .await
    }

    pub async fn create_property(&self, listing: &NewListing) -> Result<Property, ApiError> {
        let form = create_form(listing)?;
        let property: Property = self
            .fetch(self.request(Method::POST, endpoints::PROPERTIES).multipart(form))
            .await?;

        info!(
            "Created property {} with {} images",
            property.id,
            listing.images.len()
        );
        Ok(property)
    }

    pub async fn update_property(
        &self,
        id: i64,
        draft: &PropertyDraft,
    ) -> Result<Property, ApiError> {
        let form = update_form(draft)?;
        self.fetch(self.request(Method::PUT, &endpoints::property(id)).multipart(form))
            .await
    }

    pub async fn delete_property(&self, id: i64) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, &endpoints::property(id)))
            .await?;
        info!("Deleted property {}", id);
        Ok(())
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
        self.fetch(self.request(Method::GET, endpoints::CUSTOMERS))
            .await
    }

    /// Customer profile by its user id
    pub async fn get_customer(&self, user_id: i64) -> Result<Customer, ApiError> {
        self.fetch(self.request(Method::GET, &endpoints::customer(user_id)))
            .await
    }

    /// Name search; the query is URL-encoded
    pub async fn search_customers(&self, query: &str) -> Result<Vec<Customer>, ApiError> {
        self.fetch(
            self.request(Method::GET, endpoints::CUSTOMER_SEARCH)
                .query(&[("query", query)]),
        )
        .await
    }

    /// Business profile by its user id
    pub async fn get_business(&self, user_id: i64) -> Result<Business, ApiError> {
        self.fetch(self.request(Method::GET, &endpoints::business(user_id)))
            .await
    }

    /// Profile record for the signed-in user, by role
    pub async fn profile(&self, user: &SessionUser) -> Result<Profile, ApiError> {
        match user.role {
            Role::Customer => self.get_customer(user.id).await.map(Profile::Customer),
            Role::Business => self.get_business(user.id).await.map(Profile::Business),
        }
    }

    /// Candidate owners for a new listing.
    ///
    /// Queries under two characters return nothing. When the search endpoint
    /// fails, the full customer list is filtered by email instead.
    pub async fn find_owner_candidates(&self, query: &str) -> Result<Vec<Customer>, ApiError> {
        let query = query.trim();
        if query.chars().count() < MIN_OWNER_QUERY {
            return Ok(Vec::new());
        }

        match self.search_customers(query).await {
            Ok(customers) => Ok(customers),
            Err(e) if e.is_unauthorized() => Err(e),
            Err(e) => {
                warn!("Customer search failed ({}), filtering full list", e);
                let needle = query.to_lowercase();
                let customers = self.list_customers().await?;
                Ok(customers
                    .into_iter()
                    .filter(|c| {
                        c.email()
                            .is_some_and(|email| email.to_lowercase().contains(&needle))
                    })
                    .collect())
            }
        }
    }
}

#[async_trait]
impl PropertySource for ApiClient {
    async fn fetch_all(&self) -> Result<Vec<Property>, ApiError> {
        self.list_properties().await
    }

    fn source_name(&self) -> &'static str {
        "backend"
    }
}

/// Spring error bodies are JSON with a `message` field; plain-text bodies
/// are used as they are.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_json_message() {
        assert_eq!(
            error_message(
                r#"{"status":400,"error":"Bad Request","message":"Address cannot be blank"}"#
            ),
            "Address cannot be blank"
        );
        assert_eq!(error_message("Email is already in use!\n"), "Email is already in use!");
        assert_eq!(error_message(""), "");
    }
}
