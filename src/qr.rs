//! QR Rendering
//!
//! Encodes the shortened URL as a PNG data URL for the composer's QR layer.

use std::io::Cursor;

use base64::{engine::general_purpose, Engine as _};
use image::{DynamicImage, ImageOutputFormat, Luma};
use qrcode::QrCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QrError {
    #[error("nothing to encode")]
    Empty,
    #[error("QR encoding failed: {0}")]
    Encode(String),
    #[error("PNG encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Render `value` to a `data:image/png;base64,...` URL
pub fn qr_data_url(value: &str) -> Result<String, QrError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(QrError::Empty);
    }

    let code = QrCode::new(value.as_bytes()).map_err(|e| QrError::Encode(format!("{:?}", e)))?;
    let image = code.render::<Luma<u8>>().quiet_zone(true).build();

    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(image).write_to(&mut buffer, ImageOutputFormat::Png)?;

    Ok(format!(
        "data:image/png;base64,{}",
        general_purpose::STANDARD.encode(buffer.get_ref())
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_is_png() {
        let url = qr_data_url("https://4q.kr/abc").unwrap();
        let payload = url.strip_prefix("data:image/png;base64,").expect("png data url");

        let bytes = general_purpose::STANDARD.decode(payload).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_different_values_differ() {
        assert_ne!(qr_data_url("https://4q.kr/a").unwrap(), qr_data_url("https://4q.kr/b").unwrap());
    }

    #[test]
    fn test_empty_value_is_rejected() {
        assert!(matches!(qr_data_url("   "), Err(QrError::Empty)));
    }
}
