//! Ticket Export
//!
//! Flattens the composer layers onto an off-screen 2D canvas and returns the
//! PNG bytes sent to `POST /ticket`.

use base64::{engine::general_purpose, Engine as _};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::composer::{ComposerState, STAGE_SIZE};

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Draw background, QR and labels in stage order and encode as PNG.
/// Fails when the background is cross-origin without CORS (tainted canvas).
pub fn render_ticket_png(
    background: Option<&HtmlImageElement>,
    qr: Option<&HtmlImageElement>,
    state: &ComposerState,
) -> Result<Vec<u8>, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document unavailable"))?;

    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into().map_err(JsValue::from)?;
    canvas.set_width(STAGE_SIZE as u32);
    canvas.set_height(STAGE_SIZE as u32);

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into()
        .map_err(JsValue::from)?;

    ctx.set_fill_style_str("#ffffff");
    ctx.fill_rect(0.0, 0.0, STAGE_SIZE, STAGE_SIZE);

    if let Some(image) = background {
        ctx.draw_image_with_html_image_element_and_dw_and_dh(image, 0.0, 0.0, STAGE_SIZE, STAGE_SIZE)?;
    }
    if let Some(image) = qr {
        let qr_box = state.qr;
        ctx.draw_image_with_html_image_element_and_dw_and_dh(image, qr_box.x, qr_box.y, qr_box.size, qr_box.size)?;
    }

    ctx.set_text_baseline("top");
    for node in &state.text_nodes {
        ctx.set_font(&format!("{}px sans-serif", node.font_size));
        ctx.set_fill_style_str(&node.color);
        ctx.fill_text(&node.text, node.x, node.y)?;
    }

    let data_url = canvas.to_data_url_with_type("image/png")?;
    png_bytes_from_data_url(&data_url).ok_or_else(|| JsValue::from_str("canvas did not produce a PNG"))
}

/// Decode a `data:image/png;base64,` URL
pub fn png_bytes_from_data_url(data_url: &str) -> Option<Vec<u8>> {
    let payload = data_url.strip_prefix(PNG_DATA_URL_PREFIX)?;
    general_purpose::STANDARD.decode(payload).ok()
}
