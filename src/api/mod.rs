pub mod client;
pub mod endpoints;
pub mod error;
pub mod interceptor;
pub mod multipart;
pub mod traits;

pub use client::ApiClient;
pub use error::ApiError;
pub use interceptor::{ResponseInterceptor, UnauthorizedRedirect};
pub use multipart::{ImageFile, NewListing};
pub use traits::PropertySource;
