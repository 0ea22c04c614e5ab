//! Frontend Models
//!
//! Data structures shared by the wizard, the composer and the API layer.
//! Wire names are camelCase to match the backend.

use serde::{Deserialize, Serialize};

/// Wizard form data, persisted under the `form_data` session key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub shorten_url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub background_image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shorten_url_id: Option<i64>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A text label placed on the ticket stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextNode {
    pub id: u32,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub is_editing: bool,
    pub color: String,
}

/// Top-left corner of the QR image on the stage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QrPosition {
    pub x: f64,
    pub y: f64,
}

/// Ticket summary as listed by `/myPQ`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: i64,
    #[serde(default)]
    pub ticket_url: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub shorten_url: String,
    #[serde(default, alias = "categoryName")]
    pub category: String,
    #[serde(default)]
    pub formatted_date: String,
}

/// Ticket detail (`GET /ticket/{id}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketInfo {
    pub ticket_url: String,
    pub title: String,
    pub shorten_url: String,
}

/// Result of `POST /image`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub id: i64,
    pub image_url: String,
}

/// Result of `POST /ticket`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreatedTicket {
    pub id: i64,
}

/// Profile of the signed-in user (`GET /users/me`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub nickname: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_data_wire_names() {
        let form = FormData {
            url: "https://example.com".to_string(),
            shorten_url: "https://4q.kr/abc".to_string(),
            title: "Birthday".to_string(),
            background_image_url: "https://cdn/bg.png".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["shortenUrl"], "https://4q.kr/abc");
        assert_eq!(json["backgroundImageUrl"], "https://cdn/bg.png");
        assert!(json.get("backgroundImageId").is_none());
    }

    #[test]
    fn test_form_data_accepts_minimal_record() {
        let raw = r#"{"url":"u","shortenUrl":"s","title":"t","backgroundImageUrl":"b"}"#;
        let form: FormData = serde_json::from_str(raw).unwrap();
        assert_eq!(form.title, "t");
        assert!(form.tags.is_empty());
        assert_eq!(form.background_image_id, None);
    }

    #[test]
    fn test_ticket_category_alias() {
        let raw = r#"{"id":3,"ticketUrl":"https://cdn/t.png","title":"Gig","shortenUrl":"s","categoryName":"concert","formattedDate":"2024.05.01"}"#;
        let ticket: Ticket = serde_json::from_str(raw).unwrap();
        assert_eq!(ticket.category, "concert");
        assert_eq!(ticket.ticket_url.as_deref(), Some("https://cdn/t.png"));
    }
}
