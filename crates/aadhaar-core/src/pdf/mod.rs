//! PDF processing module.

mod extractor;

pub use extractor::PdfDocument;

#[cfg(test)]
pub(crate) use extractor::tests::build_pdf;

/// Type of PDF content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfType {
    /// Contains a usable text layer.
    Text,
    /// Contains only images (scanned card).
    Image,
    /// Neither text nor decodable images.
    Empty,
}

impl PdfType {
    /// Classify from the text layer length and image count.
    pub fn classify(text_len: usize, image_count: usize, min_text_length: usize) -> Self {
        if text_len >= min_text_length {
            Self::Text
        } else if image_count > 0 {
            Self::Image
        } else {
            Self::Empty
        }
    }
}
