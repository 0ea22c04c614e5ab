//! Ticket & Image Endpoints

use reqwest::multipart::{Form, Part};
use serde_json::json;

use super::{decode, expect_success, ApiClient, ApiError};
use crate::models::{CreatedTicket, GeneratedImage, Ticket, TicketInfo};
use crate::session::SessionStore;

const TICKET_FETCH_FAILED: &str = "티켓 정보를 가져오는데 실패했습니다.";

/// Everything `POST /ticket` needs
#[derive(Debug, Clone)]
pub struct NewTicket {
    /// Composed PNG of the ticket stage
    pub image: Vec<u8>,
    pub background_image_id: i64,
    pub shorten_url_id: Option<i64>,
    pub title: String,
}

impl NewTicket {
    fn into_form(self) -> Result<Form, ApiError> {
        let image = Part::bytes(self.image)
            .file_name("ticket.png")
            .mime_str("image/png")
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

        let mut form = Form::new()
            .part("ticketImage", image)
            .text("backgroundImageId", self.background_image_id.to_string());
        if let Some(id) = self.shorten_url_id {
            form = form.text("shortenUrlId", id.to_string());
        }
        Ok(form.text("title", self.title))
    }
}

impl<S: SessionStore> ApiClient<S> {
    /// Generate a background photo for a category and up to three tags
    pub async fn generate_photo_image(&self, category: &str, tags: &[String]) -> Result<GeneratedImage, ApiError> {
        let response = self
            .http
            .post(self.url("/image"))
            .json(&json!({ "category": category, "tags": tags }))
            .send()
            .await?;
        let response = expect_success(response, "이미지 생성에 실패했습니다.")?;
        decode(response).await
    }

    pub async fn generate_ticket(&self, ticket: NewTicket) -> Result<CreatedTicket, ApiError> {
        let form = ticket.into_form()?;
        let response = self.http.post(self.url("/ticket")).multipart(form).send().await?;
        let response = expect_success(response, "티켓 생성에 실패했습니다.")?;
        decode(response).await
    }

    pub async fn get_ticket_info(&self, ticket_id: i64) -> Result<TicketInfo, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/ticket/{}", ticket_id)))
            .send()
            .await?;
        let response = expect_success(response, TICKET_FETCH_FAILED)?;
        decode(response).await
    }

    /// Tickets of the signed-in user
    pub async fn get_my_tickets(&self) -> Result<Vec<Ticket>, ApiError> {
        let request = self.authorized(self.http.get(self.url("/myPQ")));
        let response = request.send().await?;
        let response = expect_success(response, TICKET_FETCH_FAILED)?;
        decode(response).await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::session::{MemorySession, ACCESS_TOKEN_KEY};
    use wiremock::matchers::{body_json, body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> ApiClient<MemorySession> {
        ApiClient::new(server.uri(), MemorySession::default())
    }

    #[tokio::test]
    async fn test_generate_photo_image() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/image"))
            .and(body_json(json!({ "category": "concert", "tags": ["neon", "winter"] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 12,
                "imageUrl": "https://cdn.4q.kr/bg/12.png"
            })))
            .mount(&server)
            .await;

        let tags = vec!["neon".to_string(), "winter".to_string()];
        let image = client(&server).generate_photo_image("concert", &tags).await.unwrap();
        assert_eq!(image.id, 12);
        assert_eq!(image.image_url, "https://cdn.4q.kr/bg/12.png");
    }

    #[tokio::test]
    async fn test_generate_photo_image_failure_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/image"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client(&server).generate_photo_image("concert", &[]).await.unwrap_err();
        assert_eq!(err.user_message(), "이미지 생성에 실패했습니다.");
    }

    #[tokio::test]
    async fn test_generate_ticket_sends_multipart() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ticket"))
            .and(body_string_contains("name=\"ticketImage\""))
            .and(body_string_contains("name=\"backgroundImageId\""))
            .and(body_string_contains("Birthday"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 77 })))
            .mount(&server)
            .await;

        let ticket = NewTicket {
            image: b"fake-png".to_vec(),
            background_image_id: 12,
            shorten_url_id: None,
            title: "Birthday".to_string(),
        };
        let created = client(&server).generate_ticket(ticket).await.unwrap();
        assert_eq!(created.id, 77);
    }

    #[tokio::test]
    async fn test_ticket_info() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ticket/77"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ticketUrl": "https://cdn.4q.kr/t/77.png",
                "title": "Birthday",
                "shortenUrl": "https://4q.kr/x1"
            })))
            .mount(&server)
            .await;

        let info = client(&server).get_ticket_info(77).await.unwrap();
        assert_eq!(info.title, "Birthday");
        assert_eq!(info.shorten_url, "https://4q.kr/x1");
    }

    #[tokio::test]
    async fn test_my_tickets_uses_session_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/myPQ"))
            .and(header("Authorization", "Bearer tok-9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 1, "ticketUrl": "https://cdn/1.png", "title": "A", "shortenUrl": "s1", "categoryName": "wedding", "formattedDate": "2024.01.01" }
            ])))
            .mount(&server)
            .await;

        let api = client(&server);
        api.session().set(ACCESS_TOKEN_KEY, "tok-9").unwrap();
        let tickets = api.get_my_tickets().await.unwrap();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].category, "wedding");
    }

    #[tokio::test]
    async fn test_bad_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ticket/5"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client(&server).get_ticket_info(5).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
