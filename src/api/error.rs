//! Error types for the 4Q API clients

use thiserror::Error;

use crate::session::StorageError;

/// Errors that can occur when talking to the ticket/auth API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network, DNS or CORS failure before a response arrived
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response, carrying the localized failure message
    #[error("{message} (status {status})")]
    Status {
        /// HTTP status code
        status: u16,
        /// Message shown to the user
        message: String,
    },

    /// Response body was not the expected JSON
    #[error("Response parsing failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// Operation requires a stored access token
    #[error("No access token found. You are not logged in.")]
    MissingToken,

    /// Request could not be assembled
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Session storage rejected a write
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    pub(crate) fn status(status: reqwest::StatusCode, message: impl Into<String>) -> Self {
        Self::Status {
            status: status.as_u16(),
            message: message.into(),
        }
    }

    /// HTTP status, when the server answered
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text suitable for a toast
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            Self::MissingToken => "로그인이 필요합니다.".to_string(),
            Self::Transport(_) => "서버에 연결할 수 없습니다.".to_string(),
            Self::Decode(_) | Self::InvalidRequest(_) | Self::Storage(_) => {
                "요청을 처리하지 못했습니다.".to_string()
            }
        }
    }
}
