use crate::session::StoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, timeout or other transport failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// 401; the session has already been cleared by the time callers see this
    #[error("not authorized: {0}")]
    Unauthorized(String),

    /// Any other non-success status, with the server's message
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not read {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("session storage failed: {0}")]
    Storage(#[from] StoreError),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// Text suitable for an inline form or page message
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized(_) => "Oturumunuz sona erdi, lütfen tekrar giriş yapın.".to_string(),
            ApiError::Status { message, .. } if !message.trim().is_empty() => message.clone(),
            ApiError::Status { status, .. } => format!("İstek başarısız oldu ({status})."),
            ApiError::Transport(_) => "Sunucuya ulaşılamadı, lütfen tekrar deneyin.".to_string(),
            ApiError::File { path, .. } => format!("Dosya okunamadı: {}", path.display()),
            ApiError::Json(_) | ApiError::Storage(_) => "Beklenmeyen bir hata oluştu.".to_string(),
        }
    }
}
