//! Client for a real-estate listings backend: typed API access with a
//! bearer-token session, a fetch-once local search over the listing set,
//! and the form validation and display formatting the listing views use.

pub mod api;
pub mod config;
pub mod format;
pub mod models;
pub mod navigation;
pub mod search;
pub mod session;
pub mod validate;

pub use api::{ApiClient, ApiError, PropertySource};
pub use config::Config;
pub use models::{Property, SessionUser};
pub use navigation::{Navigator, Route, RouteState};
pub use search::{filter_and_sort, PropertySearch, SearchParams, SortBy};
pub use session::AuthSession;
