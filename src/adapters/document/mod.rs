//! Document adapters - Implementations of the TextExtractor port.
//!
//! - `PdfTextExtractor` - Extracts text from PDF bytes
//! - `MockTextExtractor` - Scripted extractor for tests

mod mock_text_extractor;
mod pdf_text_extractor;

pub use mock_text_extractor::MockTextExtractor;
pub use pdf_text_extractor::PdfTextExtractor;
