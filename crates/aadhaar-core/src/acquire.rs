//! Turning uploaded files into text.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::AcquisitionError;
use crate::models::config::PdfConfig;
use crate::ocr::OcrBackend;
use crate::pdf::{PdfDocument, PdfType};

/// Accepted upload types, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Image,
    Text,
}

impl DocumentKind {
    /// Classify by extension, ignoring case.
    pub fn from_filename(filename: &str) -> Result<Self, AcquisitionError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(Self::Pdf),
            "jpg" | "jpeg" | "png" | "bmp" | "tiff" | "tif" => Ok(Self::Image),
            "txt" => Ok(Self::Text),
            _ => Err(AcquisitionError::UnsupportedFormat(filename.to_string())),
        }
    }
}

/// Source of raw document text.
pub trait TextSource {
    /// Read the full text of one uploaded document.
    fn acquire_text(
        &self,
        bytes: &[u8],
        filename: &str,
        password: Option<&str>,
    ) -> Result<String, AcquisitionError>;
}

impl<T: TextSource + ?Sized> TextSource for &T {
    fn acquire_text(
        &self,
        bytes: &[u8],
        filename: &str,
        password: Option<&str>,
    ) -> Result<String, AcquisitionError> {
        (**self).acquire_text(bytes, filename, password)
    }
}

/// Reads PDFs, images and plain text files.
pub struct DocumentReader {
    pdf: PdfConfig,
    ocr: Option<Box<dyn OcrBackend>>,
}

impl DocumentReader {
    /// Reader without OCR: images fail with `OcrUnavailable`, scanned PDFs
    /// yield whatever text layer they have.
    pub fn new(pdf: PdfConfig) -> Self {
        Self { pdf, ocr: None }
    }

    /// Use `ocr` for images and scanned PDFs.
    pub fn with_ocr(mut self, ocr: impl OcrBackend + 'static) -> Self {
        self.ocr = Some(Box::new(ocr));
        self
    }

    /// Build a reader from configuration, loading OCR models when present.
    #[cfg(feature = "native")]
    pub fn from_config(config: &crate::models::AadhaarConfig) -> Self {
        let reader = Self::new(config.pdf.clone());
        match crate::ocr::PureOcrEngine::from_config(&config.ocr) {
            Ok(engine) => reader.with_ocr(engine),
            Err(AcquisitionError::OcrUnavailable) => {
                debug!(
                    "No OCR models in {}, images will be rejected",
                    config.ocr.model_dir.display()
                );
                reader
            }
            Err(e) => {
                warn!("Failed to load OCR engine: {}", e);
                reader
            }
        }
    }

    pub fn has_ocr(&self) -> bool {
        self.ocr.is_some()
    }

    fn ocr(&self) -> Result<&dyn OcrBackend, AcquisitionError> {
        self.ocr.as_deref().ok_or(AcquisitionError::OcrUnavailable)
    }

    fn read_image(&self, bytes: &[u8]) -> Result<String, AcquisitionError> {
        let ocr = self.ocr()?;
        let image = image::load_from_memory(bytes)
            .map_err(|e| AcquisitionError::Unreadable(format!("invalid image: {}", e)))?;
        ocr.extract_text(&image)
    }

    fn read_pdf(&self, bytes: &[u8], password: Option<&str>) -> Result<String, AcquisitionError> {
        let pdf = PdfDocument::load(bytes, password)?;
        let can_ocr = self.pdf.ocr_fallback && self.ocr.is_some();

        let text = match pdf.extract_text() {
            Ok(text) => text,
            Err(e) if can_ocr => {
                warn!("{}, falling back to OCR", e);
                String::new()
            }
            Err(e) => return Err(e),
        };

        if !can_ocr {
            debug!("Using PDF text layer ({} chars)", text.len());
            return Ok(text);
        }

        let images = pdf.extract_images();
        match PdfType::classify(text.trim().len(), images.len(), self.pdf.min_text_length) {
            PdfType::Text => {
                debug!("Using PDF text layer ({} chars)", text.len());
                Ok(text)
            }
            PdfType::Empty => {
                debug!("Short text layer and no images, using text layer");
                Ok(text)
            }
            PdfType::Image => {
                info!("Scanned PDF: running OCR on {} images", images.len());
                let ocr = self.ocr()?;
                let pages = images
                    .iter()
                    .map(|image| ocr.extract_text(image))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(pages.join("\n\n"))
            }
        }
    }
}

impl TextSource for DocumentReader {
    fn acquire_text(
        &self,
        bytes: &[u8],
        filename: &str,
        password: Option<&str>,
    ) -> Result<String, AcquisitionError> {
        let kind = DocumentKind::from_filename(filename)?;
        if bytes.is_empty() {
            return Err(AcquisitionError::Unreadable(format!("{} is empty", filename)));
        }

        debug!("Acquiring text from {} ({:?}, {} bytes)", filename, kind, bytes.len());

        let text = match kind {
            DocumentKind::Pdf => self.read_pdf(bytes, password)?,
            DocumentKind::Image => self.read_image(bytes)?,
            DocumentKind::Text => String::from_utf8_lossy(bytes).into_owned(),
        };

        info!("Acquired {} characters from {}", text.len(), filename);
        Ok(text)
    }
}
