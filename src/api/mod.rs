//! 4Q API Clients
//!
//! Request/response wrappers for the ticket, image and user endpoints,
//! organized by domain. Every call is a single attempt: no retry, no timeout.

mod auth;
mod error;
mod photo;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::session::{self, BrowserSession, SessionStore};

pub use error::ApiError;
pub use photo::NewTicket;

/// HTTP client bound to a base URL and a session store
pub struct ApiClient<S = BrowserSession> {
    http: Client,
    base_url: String,
    session: S,
}

impl<S: SessionStore> ApiClient<S> {
    pub fn new(base_url: impl Into<String>, session: S) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `Authorization` value from the stored token (empty bearer when absent)
    fn bearer(&self) -> String {
        format!("Bearer {}", session::access_token(&self.session).unwrap_or_default())
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(AUTHORIZATION, self.bearer())
    }

    /// Fetch raw bytes from an absolute URL (ticket images live on a CDN)
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.http.get(url).send().await?;
        let response = expect_success(response, "이미지를 불러오지 못했습니다.")?;
        Ok(response.bytes().await?.to_vec())
    }
}

/// Turn a non-2xx response into `ApiError::Status` with `failure` as message
fn expect_success(response: Response, failure: &str) -> Result<Response, ApiError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(ApiError::status(response.status(), failure))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Send cookies along (refresh token lives in an http-only cookie)
#[cfg(target_arch = "wasm32")]
fn with_credentials(request: RequestBuilder) -> RequestBuilder {
    request.fetch_credentials_include()
}

#[cfg(not(target_arch = "wasm32"))]
fn with_credentials(request: RequestBuilder) -> RequestBuilder {
    request
}
