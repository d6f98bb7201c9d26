//! Placement payload: the commit-time validation gate and the package
//! handed to the signing backend.
//!
//! The payload carries integer page-space coordinates as a JSON
//! metadata part and the signature image bytes as an opaque binary
//! part, matching the backend's multipart submission contract.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;

use crate::constants::payload as payload_const;
use crate::error::PlacementError;
use crate::geometry::{self, PageFrame, Rect, ViewportFrame};

// ============================================================================
// Signature Asset
// ============================================================================

/// Encoding of the signature image bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEncoding {
    Png,
    Jpeg,
}

impl ImageEncoding {
    /// MIME type for this encoding.
    pub fn mime(&self) -> &'static str {
        match self {
            ImageEncoding::Png => "image/png",
            ImageEncoding::Jpeg => "image/jpeg",
        }
    }

    fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/png" => Some(ImageEncoding::Png),
            "image/jpeg" | "image/jpg" => Some(ImageEncoding::Jpeg),
            _ => None,
        }
    }
}

/// The signature image as captured by the surrounding UI.
///
/// The engine never mutates the bytes; it validates them at commit time
/// and forwards them untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureAsset {
    bytes: Vec<u8>,
    encoding: ImageEncoding,
}

impl SignatureAsset {
    pub fn new(bytes: Vec<u8>, encoding: ImageEncoding) -> Self {
        Self { bytes, encoding }
    }

    /// Parse a `data:image/png;base64,...` URL, the form the capture UI
    /// stores after drawing or uploading a signature.
    pub fn from_data_url(url: &str) -> Result<Self, PlacementError> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| PlacementError::invalid_data_url("missing data: scheme"))?;
        let (header, data) = rest
            .split_once(',')
            .ok_or_else(|| PlacementError::invalid_data_url("missing payload separator"))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| PlacementError::invalid_data_url("only base64 data URLs supported"))?;
        let encoding = ImageEncoding::from_mime(mime).ok_or_else(|| {
            PlacementError::invalid_data_url(format!("unsupported media type '{mime}'"))
        })?;
        let bytes = BASE64
            .decode(data)
            .map_err(|e| PlacementError::invalid_data_url(format!("base64 decode: {e}")))?;

        Ok(Self { bytes, encoding })
    }

    /// Raw image bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn encoding(&self) -> ImageEncoding {
        self.encoding
    }

    /// Decode the image, verifying the bytes are readable.
    pub fn decode(&self) -> Result<image::DynamicImage, PlacementError> {
        Ok(image::load_from_memory(&self.bytes)?)
    }

    /// Whether every pixel is fully transparent.
    ///
    /// Mirrors the capture UI's confirm-time check: a signature canvas
    /// that was never drawn on decodes fine but carries no visible ink.
    /// Opaque formats (JPEG) are never blank by this definition.
    pub fn is_blank(&self) -> Result<bool, PlacementError> {
        let rgba = self.decode()?.to_rgba8();
        Ok(rgba.pixels().all(|p| p.0[3] == 0))
    }
}

// ============================================================================
// Placement Payload
// ============================================================================

/// The finalized placement: integer page-space coordinates plus the
/// signature image. Built once at commit time, immutable thereafter.
///
/// `page_number` is fixed at 1; multi-page documents are not supported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementPayload {
    page_number: u32,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    #[serde(skip)]
    signature: SignatureAsset,
}

impl PlacementPayload {
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Placement rectangle in integer PDF points, origin bottom-left.
    pub fn rect(&self) -> (i32, i32, i32, i32) {
        (self.x, self.y, self.width, self.height)
    }

    /// The signature image, byte-for-byte as it was passed in.
    pub fn signature(&self) -> &SignatureAsset {
        &self.signature
    }

    /// JSON metadata part of the multipart submission.
    pub fn metadata_json(&self) -> Result<String, PlacementError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Validate and build the payload. This is the single gate before any
/// network call: nothing selected, an unmeasured viewport, or a
/// missing/unreadable/blank signature all abort the commit here.
pub fn build_payload(
    rect: Option<&Rect>,
    viewport: &ViewportFrame,
    page: &PageFrame,
    asset: Option<&SignatureAsset>,
) -> Result<PlacementPayload, PlacementError> {
    let rect = rect.ok_or(PlacementError::NothingSelected)?;
    let asset = asset.ok_or(PlacementError::MissingAsset)?;

    // to_page_space rejects a degenerate viewport; check the asset first
    // so the user sees the signature problem before re-measuring.
    if asset.is_blank()? {
        return Err(PlacementError::BlankSignature);
    }

    let page_rect = geometry::to_page_space(rect, viewport, page)?;

    Ok(PlacementPayload {
        page_number: payload_const::PAGE_NUMBER,
        x: page_rect.x as i32,
        y: page_rect.y as i32,
        width: page_rect.width as i32,
        height: page_rect.height as i32,
        signature: asset.clone(),
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use std::io::Cursor;

    /// Encode a small RGBA image to PNG bytes; `ink` controls whether
    /// any pixel is opaque.
    fn png_asset(ink: bool) -> SignatureAsset {
        let alpha = if ink { 255 } else { 0 };
        let img = image::RgbaImage::from_fn(16, 8, |x, y| {
            if (x + y) % 3 == 0 {
                image::Rgba([0, 0, 0, alpha])
            } else {
                image::Rgba([0, 0, 0, 0])
            }
        });
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .expect("PNG encode");
        SignatureAsset::new(bytes, ImageEncoding::Png)
    }

    const VIEWPORT: ViewportFrame = ViewportFrame {
        width: 800.0,
        height: 1100.0,
    };

    #[test]
    fn test_build_payload_maps_and_rounds() {
        let rect = Rect::new(100.0, 100.0, 150.0, 75.0);
        let asset = png_asset(true);

        let payload =
            build_payload(Some(&rect), &VIEWPORT, &PageFrame::A4, Some(&asset)).unwrap();

        assert_eq!(payload.page_number(), 1);
        assert_eq!(payload.rect(), (74, 708, 112, 57));
        // Signature bytes forwarded untouched.
        assert_eq!(payload.signature().bytes(), asset.bytes());
    }

    #[test]
    fn test_build_payload_requires_rectangle() {
        let asset = png_asset(true);
        let err = build_payload(None, &VIEWPORT, &PageFrame::A4, Some(&asset)).unwrap_err();
        assert!(matches!(err, PlacementError::NothingSelected));
    }

    #[test]
    fn test_build_payload_requires_asset() {
        let rect = Rect::new(100.0, 100.0, 150.0, 75.0);
        let err = build_payload(Some(&rect), &VIEWPORT, &PageFrame::A4, None).unwrap_err();
        assert!(matches!(err, PlacementError::MissingAsset));
    }

    #[test]
    fn test_build_payload_rejects_degenerate_viewport() {
        let rect = Rect::new(100.0, 100.0, 150.0, 75.0);
        let asset = png_asset(true);
        let zero = ViewportFrame::new(0.0, 0.0);

        let err = build_payload(Some(&rect), &zero, &PageFrame::A4, Some(&asset)).unwrap_err();
        assert!(matches!(err, PlacementError::DegenerateViewport { .. }));
    }

    #[test]
    fn test_build_payload_rejects_blank_signature() {
        let rect = Rect::new(100.0, 100.0, 150.0, 75.0);
        let asset = png_asset(false);

        let err =
            build_payload(Some(&rect), &VIEWPORT, &PageFrame::A4, Some(&asset)).unwrap_err();
        assert!(matches!(err, PlacementError::BlankSignature));
    }

    #[test]
    fn test_build_payload_rejects_unreadable_bytes() {
        let rect = Rect::new(100.0, 100.0, 150.0, 75.0);
        let asset = SignatureAsset::new(vec![0xDE, 0xAD, 0xBE, 0xEF], ImageEncoding::Png);

        let err =
            build_payload(Some(&rect), &VIEWPORT, &PageFrame::A4, Some(&asset)).unwrap_err();
        assert!(matches!(err, PlacementError::UnreadableAsset(_)));
    }

    #[test]
    fn test_metadata_json_shape() {
        let rect = Rect::new(100.0, 100.0, 150.0, 75.0);
        let asset = png_asset(true);
        let payload =
            build_payload(Some(&rect), &VIEWPORT, &PageFrame::A4, Some(&asset)).unwrap();

        let json = payload.metadata_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["page_number"], 1);
        assert_eq!(value["x"], 74);
        assert_eq!(value["y"], 708);
        assert_eq!(value["width"], 112);
        assert_eq!(value["height"], 57);
        // The binary part never leaks into the metadata.
        assert!(value.get("signature").is_none());
    }

    #[test]
    fn test_from_data_url_round_trip() {
        let asset = png_asset(true);
        let url = format!("data:image/png;base64,{}", BASE64.encode(asset.bytes()));

        let parsed = SignatureAsset::from_data_url(&url).unwrap();
        assert_eq!(parsed.encoding(), ImageEncoding::Png);
        assert_eq!(parsed.bytes(), asset.bytes());
        assert!(!parsed.is_blank().unwrap());
    }

    #[test]
    fn test_from_data_url_rejects_malformed() {
        assert!(SignatureAsset::from_data_url("http://not-a-data-url").is_err());
        assert!(SignatureAsset::from_data_url("data:image/png;base64").is_err());
        assert!(SignatureAsset::from_data_url("data:text/plain;base64,aGk=").is_err());
        assert!(SignatureAsset::from_data_url("data:image/png;base64,!!!").is_err());
    }

    #[test]
    fn test_jpeg_is_never_blank() {
        let img = image::RgbImage::from_pixel(8, 8, image::Rgb([255, 255, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Jpeg)
            .expect("JPEG encode");

        let asset = SignatureAsset::new(bytes, ImageEncoding::Jpeg);
        assert!(!asset.is_blank().unwrap());
    }
}
