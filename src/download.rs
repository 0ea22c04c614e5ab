//! Ticket Download
//!
//! Fetches a ticket image and hands it to the browser as a file download
//! through a transient object URL.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::api::ApiClient;
use crate::session::SessionStore;

pub fn download_file_name(title: &str) -> String {
    format!("photoQR_{}.png", title)
}

/// Offer `bytes` to the user as `file_name`
pub fn save_bytes(bytes: &[u8], file_name: &str, mime: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));

    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let result = click_anchor(&url, file_name);
    Url::revoke_object_url(&url)?;
    result
}

fn click_anchor(href: &str, file_name: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document unavailable"))?;
    let body = document.body().ok_or_else(|| JsValue::from_str("body unavailable"))?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into().map_err(JsValue::from)?;
    anchor.set_href(href);
    anchor.set_download(file_name);

    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;
    Ok(())
}

/// Download a ticket image. Failures are logged only.
pub async fn download_ticket<S: SessionStore>(api: &ApiClient<S>, image_url: Option<&str>, title: &str) {
    let Some(url) = image_url.filter(|u| !u.is_empty()) else {
        tracing::error!("Image URL is not available for download.");
        return;
    };

    let bytes = match api.fetch_bytes(url).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error = %e, "failed to download image");
            return;
        }
    };

    let file_name = download_file_name(title);
    match save_bytes(&bytes, &file_name, "image/png") {
        Ok(()) => tracing::info!(file = %file_name, "ticket downloaded"),
        Err(e) => tracing::error!(error = ?e, "failed to save image"),
    }
}
