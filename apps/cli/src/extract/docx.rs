//! DOCX raw text extraction.
//!
//! Reads `word/document.xml` from the package and emits run text, one
//! paragraph per line. Tabs and breaks inside a paragraph are kept as `\t`
//! and `\n` so the normalizer sees the same artifacts as in PDF output.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Read, Seek};
use vocab_core::ExtractionError;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extract raw text from a DOCX container.
pub fn extract_docx<R: Read + Seek>(reader: R) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(reader).map_err(|e| ExtractionError::Docx(e.to_string()))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::Docx(format!("{}: {}", DOCUMENT_PART, e)))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    document_text(&xml)
}

/// Flatten WordprocessingML body text.
pub fn document_text(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                let chunk = e
                    .unescape()
                    .map_err(|err| ExtractionError::Docx(err.to_string()))?;
                text.push_str(&chunk);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ExtractionError::Docx(format!(
                    "malformed XML at byte {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
        }
    }

    Ok(text)
}
