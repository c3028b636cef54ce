//! Backend REST paths, relative to the configured base URL.

pub const LOGIN: &str = "/api/auth/login";
pub const REGISTER: &str = "/api/auth/register";

pub const PROPERTIES: &str = "/api/properties";
pub const MY_PROPERTIES: &str = "/api/properties/my-properties";

pub const CUSTOMERS: &str = "/api/customers";
pub const CUSTOMER_SEARCH: &str = "/api/customers/search";

pub fn property(id: i64) -> String {
    format!("{PROPERTIES}/{id}")
}

pub fn customer(id: i64) -> String {
    format!("{CUSTOMERS}/{id}")
}

pub fn business(id: i64) -> String {
    format!("/api/business/{id}")
}
