use crate::models::enums::Role;
use serde::{Deserialize, Serialize};

/// The signed-in user as persisted in the session store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body returned by `/api/auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub id: i64,
    pub token: String,
    #[serde(rename = "type", default)]
    pub token_type: Option<String>,
    pub email: String,
    pub role: Role,
}

impl From<LoginResponse> for SessionUser {
    fn from(response: LoginResponse) -> Self {
        Self {
            id: response.id,
            email: response.email,
            role: response.role,
            token: response.token,
        }
    }
}

/// Account creation payload. Name and contact fields apply per role; the
/// ones a role does not use are sent empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Option<Role>,
    pub first_name: String,
    pub last_name: String,
    pub business_name: String,
    pub authorized_person: String,
    pub phone_number: String,
    pub address: String,
}

/// Reference to the user who created a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub user: Option<UserRef>,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.email.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: i64,
    pub business_name: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub user: Option<UserRef>,
}

/// Profile record behind a session, by role
#[derive(Debug, Clone, PartialEq)]
pub enum Profile {
    Customer(Customer),
    Business(Business),
}
