//! PDF text and image extraction using lopdf and pdf-extract.

use image::{DynamicImage, ImageBuffer, Luma, Rgb};
use lopdf::{Document, Object};
use tracing::{debug, trace};

use crate::error::AcquisitionError;

/// A loaded, decrypted PDF.
pub struct PdfDocument {
    document: Document,
    /// Unencrypted bytes handed to pdf-extract.
    raw_data: Vec<u8>,
}

impl PdfDocument {
    /// Parse a PDF, decrypting it when needed.
    ///
    /// Encrypted files are first tried with the empty user password (cards
    /// downloaded without a password still carry an encryption dictionary).
    /// Otherwise `password` is required and must open the file.
    pub fn load(data: &[u8], password: Option<&str>) -> Result<Self, AcquisitionError> {
        if data.is_empty() {
            return Err(AcquisitionError::Unreadable("empty PDF".to_string()));
        }

        let mut document = parse(data)?;

        let raw_data = if document.is_encrypted() {
            if document.decrypt("").is_ok() {
                debug!("Decrypted PDF with empty password");
            } else {
                let password = password
                    .filter(|p| !p.is_empty())
                    .ok_or(AcquisitionError::PasswordRequired)?;
                document = parse(data)?;
                document
                    .decrypt(password)
                    .map_err(|_| AcquisitionError::PasswordIncorrect)?;
                debug!("Decrypted PDF with supplied password");
            }

            let mut decrypted = Vec::new();
            document.save_to(&mut decrypted).map_err(|e| {
                AcquisitionError::Unreadable(format!("failed to save decrypted PDF: {}", e))
            })?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_count = document.get_pages().len();
        if page_count == 0 {
            return Err(AcquisitionError::Unreadable("PDF has no pages".to_string()));
        }

        debug!("Loaded PDF with {} pages", page_count);
        Ok(Self { document, raw_data })
    }

    pub fn page_count(&self) -> u32 {
        self.document.get_pages().len() as u32
    }

    /// Text layer of every page.
    pub fn extract_text(&self) -> Result<String, AcquisitionError> {
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| AcquisitionError::Unreadable(format!("PDF text extraction failed: {}", e)))
    }

    /// Decode every embedded image the OCR engine can use.
    pub fn extract_images(&self) -> Vec<DynamicImage> {
        let images: Vec<DynamicImage> = self
            .document
            .objects
            .values()
            .filter_map(|object| self.decode_image(object))
            .collect();

        debug!("Found {} images in document", images.len());
        images
    }

    fn decode_image(&self, object: &Object) -> Option<DynamicImage> {
        let Object::Stream(stream) = object else {
            return None;
        };
        let dict = &stream.dict;

        if dict.get(b"Subtype").ok()?.as_name().ok()? != b"Image" {
            return None;
        }

        let width = dict.get(b"Width").ok()?.as_i64().ok()? as u32;
        let height = dict.get(b"Height").ok()?.as_i64().ok()? as u32;
        trace!("Found image object: {}x{}", width, height);

        let filter = dict.get(b"Filter").ok().and_then(|filter| match filter {
            Object::Name(name) => Some(name.as_slice()),
            Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
            _ => None,
        });

        match filter {
            Some(b"DCTDecode") => {
                trace!("Decoding JPEG image");
                return image::load_from_memory_with_format(&stream.content, image::ImageFormat::Jpeg)
                    .ok();
            }
            Some(b"JPXDecode") | Some(b"CCITTFaxDecode") | Some(b"JBIG2Decode") => {
                trace!("Skipping image with unsupported filter");
                return None;
            }
            _ => {}
        }

        let data = stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone());

        let color_space = dict
            .get(b"ColorSpace")
            .ok()
            .and_then(|o| match o {
                Object::Name(name) => Some(name.as_slice()),
                Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
                Object::Reference(r) => self
                    .document
                    .get_object(*r)
                    .ok()
                    .and_then(|o| o.as_name().ok()),
                _ => None,
            })
            .unwrap_or(b"DeviceRGB");

        let bits = dict
            .get(b"BitsPerComponent")
            .ok()
            .and_then(|o| o.as_i64().ok())
            .unwrap_or(8);

        raw_to_image(&data, width, height, color_space, bits)
    }
}

/// Build an image from uncompressed 8-bit RGB or grayscale samples.
fn raw_to_image(
    data: &[u8],
    width: u32,
    height: u32,
    color_space: &[u8],
    bits_per_component: i64,
) -> Option<DynamicImage> {
    if bits_per_component != 8 {
        trace!("Unsupported bits per component: {}", bits_per_component);
        return None;
    }

    let pixels = (width as usize).checked_mul(height as usize)?;
    match color_space {
        b"DeviceRGB" | b"RGB" => {
            let len = pixels.checked_mul(3)?;
            let samples = data.get(..len)?.to_vec();
            ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, samples).map(DynamicImage::ImageRgb8)
        }
        b"DeviceGray" | b"G" => {
            let samples = data.get(..pixels)?.to_vec();
            ImageBuffer::<Luma<u8>, _>::from_raw(width, height, samples)
                .map(DynamicImage::ImageLuma8)
        }
        _ => {
            trace!(
                "Unsupported color space: {}",
                String::from_utf8_lossy(color_space)
            );
            None
        }
    }
}

fn parse(data: &[u8]) -> Result<Document, AcquisitionError> {
    Document::load_mem(data).map_err(|e| AcquisitionError::Unreadable(format!("invalid PDF: {}", e)))
}
