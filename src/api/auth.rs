//! User Account Endpoints
//!
//! Registration, email verification, login/logout, profile and token refresh.

use serde::Deserialize;
use serde_json::json;

use super::{decode, expect_success, with_credentials, ApiClient, ApiError};
use crate::models::UserInfo;
use crate::session::{self, SessionStore, ACCESS_TOKEN_KEY, TOKEN_EXPIRATION_KEY};

pub const EMAIL_SENT_MESSAGE: &str = "이메일이 전송되었습니다.";
pub const PROFILE_UPDATED_MESSAGE: &str = "프로필이 성공적으로 수정되었습니다.";

/// Body of a successful `POST /users/login`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    /// Number or string depending on the server; stored verbatim
    #[serde(default)]
    pub expiration: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ServerMessage {
    message: Option<String>,
}

fn expiration_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl<S: SessionStore> ApiClient<S> {
    /// Ask the server to mail a verification code
    pub async fn request_email_verification(&self, email: &str) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.url("/users/email/request"))
            .json(&json!({ "email": email }))
            .send()
            .await?;
        expect_success(response, "이메일 인증 요청에 실패했습니다.")?;
        Ok(EMAIL_SENT_MESSAGE.to_string())
    }

    pub async fn verify_email_code(&self, email: &str, code: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .patch(self.url("/users/email/verification"))
            .json(&json!({ "email": email, "code": code }))
            .send()
            .await?;
        expect_success(response, "이메일 인증에 실패했습니다.")?;
        Ok(())
    }

    pub async fn register(&self, email: &str, password: &str, nickname: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/users/register"))
            .json(&json!({ "email": email, "password": password, "nickname": nickname }))
            .send()
            .await?;
        expect_success(response, "회원가입에 실패했습니다.")?;
        Ok(())
    }

    /// Change the nickname. Refuses without a stored token.
    pub async fn update_profile(&self, nickname: &str) -> Result<String, ApiError> {
        if session::access_token(&self.session).is_none() {
            return Err(ApiError::MissingToken);
        }

        let request = self
            .http
            .patch(self.url("/users/modify"))
            .json(&json!({ "nickname": nickname }));
        let response = with_credentials(self.authorized(request)).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(PROFILE_UPDATED_MESSAGE.to_string());
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ServerMessage>(&body)
            .ok()
            .and_then(|m| m.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "프로필 수정에 실패했습니다.".to_string());
        Err(ApiError::status(status, message))
    }

    /// Log in and keep the access token and its expiration in session storage
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/users/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let response = expect_success(response, "로그인에 실패했습니다.")?;
        let login: LoginResponse = decode(response).await?;

        self.session.set(ACCESS_TOKEN_KEY, &login.access_token)?;
        self.session.set(TOKEN_EXPIRATION_KEY, &expiration_text(&login.expiration))?;
        tracing::info!("login succeeded");
        Ok(())
    }

    /// Profile of the current user; `None` on any failure
    pub async fn user_info(&self) -> Option<UserInfo> {
        let request = self.authorized(self.http.get(self.url("/users/me")));
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "error fetching user info");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::error!(status = response.status().as_u16(), "failed to fetch user info");
            return None;
        }

        match decode::<UserInfo>(response).await {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::error!(error = %e, "error fetching user info");
                None
            }
        }
    }

    /// Invalidate the session server-side and drop the stored token
    pub async fn logout(&self) -> Result<(), ApiError> {
        let request = self.authorized(self.http.post(self.url("/users/logout")));
        let response = with_credentials(request).send().await?;
        expect_success(response, "로그아웃에 실패했습니다.")?;
        self.session.remove(ACCESS_TOKEN_KEY);
        Ok(())
    }

    /// Rotate the access token using the refresh cookie; `None` on any failure
    pub async fn refresh_access_token(&self) -> Option<String> {
        let request = with_credentials(self.http.post(self.url("/auth/refresh")));
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "error refreshing access token");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::error!(status = response.status().as_u16(), "failed to refresh access token");
            return None;
        }

        let refreshed = match decode::<RefreshResponse>(response).await {
            Ok(refreshed) => refreshed,
            Err(e) => {
                tracing::error!(error = %e, "error refreshing access token");
                return None;
            }
        };

        if let Err(e) = self.session.set(ACCESS_TOKEN_KEY, &refreshed.access_token) {
            tracing::error!(error = %e, "could not store refreshed token");
            return None;
        }
        Some(refreshed.access_token)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::session::MemorySession;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> ApiClient<MemorySession> {
        ApiClient::new(server.uri(), MemorySession::default())
    }

    #[tokio::test]
    async fn test_login_stores_token_and_expiration() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/login"))
            .and(body_json(json!({ "email": "a@b.c", "password": "pw" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "accessToken": "tok-1",
                "expiration": 1700000000
            })))
            .mount(&server)
            .await;

        let api = client(&server);
        api.login("a@b.c", "pw").await.expect("login should succeed");

        assert_eq!(api.session().get(ACCESS_TOKEN_KEY).as_deref(), Some("tok-1"));
        assert_eq!(api.session().get(TOKEN_EXPIRATION_KEY).as_deref(), Some("1700000000"));
    }

    #[tokio::test]
    async fn test_login_failure_writes_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let api = client(&server);
        let err = api.login("a@b.c", "wrong").await.unwrap_err();

        assert_eq!(err.status_code(), Some(401));
        assert_eq!(err.user_message(), "로그인에 실패했습니다.");
        assert_eq!(api.session().get(ACCESS_TOKEN_KEY), None);
        assert_eq!(api.session().get(TOKEN_EXPIRATION_KEY), None);
    }

    #[tokio::test]
    async fn test_profile_update_requires_token() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/users/modify"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let api = client(&server);
        let err = api.update_profile("neo").await.unwrap_err();
        assert!(matches!(err, ApiError::MissingToken));
    }

    #[tokio::test]
    async fn test_profile_update_surfaces_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/users/modify"))
            .and(header("Authorization", "Bearer tok-2"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({ "message": "이미 사용 중인 닉네임입니다." })))
            .mount(&server)
            .await;

        let api = client(&server);
        api.session().set(ACCESS_TOKEN_KEY, "tok-2").unwrap();
        let err = api.update_profile("taken").await.unwrap_err();
        assert_eq!(err.user_message(), "이미 사용 중인 닉네임입니다.");
    }

    #[tokio::test]
    async fn test_user_info_returns_none_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        assert_eq!(client(&server).user_info().await, None);
    }

    #[tokio::test]
    async fn test_user_info_sends_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/me"))
            .and(header("Authorization", "Bearer tok-3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "nickname": "neo",
                "email": "neo@4q.kr"
            })))
            .mount(&server)
            .await;

        let api = client(&server);
        api.session().set(ACCESS_TOKEN_KEY, "tok-3").unwrap();
        let info = api.user_info().await.expect("profile");
        assert_eq!(info.nickname, "neo");
        assert_eq!(info.email, "neo@4q.kr");
    }

    #[tokio::test]
    async fn test_logout_removes_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/logout"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let api = client(&server);
        api.session().set(ACCESS_TOKEN_KEY, "tok-4").unwrap();
        api.logout().await.unwrap();
        assert_eq!(api.session().get(ACCESS_TOKEN_KEY), None);
    }

    #[tokio::test]
    async fn test_refresh_stores_new_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "accessToken": "fresh" })))
            .mount(&server)
            .await;

        let api = client(&server);
        assert_eq!(api.refresh_access_token().await.as_deref(), Some("fresh"));
        assert_eq!(api.session().get(ACCESS_TOKEN_KEY).as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn test_refresh_failure_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        assert_eq!(client(&server).refresh_access_token().await, None);
    }

    #[tokio::test]
    async fn test_signup_calls() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/email/request"))
            .and(body_json(json!({ "email": "a@b.c" })))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/users/email/verification"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let api = client(&server);
        assert_eq!(api.request_email_verification("a@b.c").await.unwrap(), EMAIL_SENT_MESSAGE);
        let err = api.verify_email_code("a@b.c", "000000").await.unwrap_err();
        assert_eq!(err.user_message(), "이메일 인증에 실패했습니다.");
    }
}
