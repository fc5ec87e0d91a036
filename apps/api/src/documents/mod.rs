//! Resume document decoding: PDF and DOCX bytes to plain text.
//!
//! Failures are reported to the caller as-is; nothing is retried and no partial text is returned on failure.

use std::io::{Cursor, Read};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

const DOCX_BODY_PART: &str = "word/document.xml";

static XML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("could not read PDF: {0}")]
    Pdf(String),

    #[error("could not read DOCX: {0}")]
    Docx(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Detects the kind from the file name extension, then from the declared content type.
    pub fn detect(file_name: Option<&str>, content_type: Option<&str>) -> Result<Self, DocumentError> {
        if let Some(name) = file_name {
            let lower = name.to_ascii_lowercase();
            if lower.ends_with(".pdf") {
                return Ok(DocumentKind::Pdf);
            }
            if lower.ends_with(".docx") {
                return Ok(DocumentKind::Docx);
            }
        }

        match content_type.map(|c| c.trim().to_ascii_lowercase()) {
            Some(ct) if ct == "application/pdf" => Ok(DocumentKind::Pdf),
            Some(ct)
                if ct == "application/vnd.openxmlformats-officedocument.wordprocessingml.document" =>
            {
                Ok(DocumentKind::Docx)
            }
            _ => Err(DocumentError::UnsupportedFormat(
                file_name
                    .or(content_type)
                    .unwrap_or("unnamed upload")
                    .to_string(),
            )),
        }
    }
}

/// Extracts plain text from a document. CPU-bound; call from a blocking task.
///
/// A readable document without a text layer (e.g. a scanned PDF) yields an empty string.
pub fn extract_text(kind: DocumentKind, bytes: &[u8]) -> Result<String, DocumentError> {
    match kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| DocumentError::Pdf(format!("{e:?}"))),
        DocumentKind::Docx => docx_text(bytes),
    }
}

fn docx_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| DocumentError::Docx(e.to_string()))?;
    let mut part = archive
        .by_name(DOCX_BODY_PART)
        .map_err(|e| DocumentError::Docx(format!("{DOCX_BODY_PART}: {e}")))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| DocumentError::Docx(e.to_string()))?;

    Ok(docx_xml_to_text(&xml))
}

/// Flattens WordprocessingML into text: paragraphs and breaks become newlines, tabs become tabs.
fn docx_xml_to_text(xml: &str) -> String {
    let marked = xml
        .replace("</w:p>", "\n")
        .replace("<w:br/>", "\n")
        .replace("<w:tab/>", "\t");
    let stripped = XML_TAG.replace_all(&marked, "");
    unescape_xml(&stripped)
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            writer
                .start_file(DOCX_BODY_PART, zip::write::FileOptions::default())
                .unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(DocumentKind::detect(Some("CV.PDF"), None).unwrap(), DocumentKind::Pdf);
        assert_eq!(
            DocumentKind::detect(Some("resume.docx"), Some("application/octet-stream")).unwrap(),
            DocumentKind::Docx
        );
    }

    #[test]
    fn test_detect_by_content_type_when_name_is_ambiguous() {
        assert_eq!(
            DocumentKind::detect(Some("upload"), Some("application/pdf")).unwrap(),
            DocumentKind::Pdf
        );
    }

    #[test]
    fn test_detect_rejects_unknown_formats() {
        let err = DocumentKind::detect(Some("resume.txt"), Some("text/plain")).unwrap_err();
        assert!(matches!(err, DocumentError::UnsupportedFormat(name) if name == "resume.txt"));
        assert!(DocumentKind::detect(Some("resume.doc"), None).is_err());
        assert!(DocumentKind::detect(None, None).is_err());
    }

    #[test]
    fn test_docx_xml_to_text_keeps_paragraphs() {
        let xml = r#"<w:document><w:body><w:p><w:r><w:t>Rust &amp; Go</w:t></w:r></w:p><w:p><w:r><w:t>Docker</w:t><w:tab/><w:t>AWS</w:t></w:r></w:p></w:body></w:document>"#;
        assert_eq!(docx_xml_to_text(xml), "Rust & Go\nDocker\tAWS\n");
    }

    #[test]
    fn test_extract_text_from_docx_archive() {
        let bytes = build_docx(
            r#"<w:document><w:body><w:p><w:r><w:t>Python developer</w:t></w:r></w:p></w:body></w:document>"#,
        );
        let text = extract_text(DocumentKind::Docx, &bytes).unwrap();
        assert_eq!(text.trim(), "Python developer");
    }

    #[test]
    fn test_docx_without_body_part_is_an_error() {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            writer
                .start_file("other.xml", zip::write::FileOptions::default())
                .unwrap();
            writer.write_all(b"<x/>").unwrap();
            writer.finish().unwrap();
        }
        let err = extract_text(DocumentKind::Docx, &buf.into_inner()).unwrap_err();
        assert!(matches!(err, DocumentError::Docx(_)));
    }

    #[test]
    fn test_garbage_bytes_are_reported_not_panicked() {
        assert!(extract_text(DocumentKind::Docx, b"not a zip").is_err());
        assert!(extract_text(DocumentKind::Pdf, b"not a pdf").is_err());
    }

    #[test]
    fn test_docx_without_text_yields_empty_string() {
        let bytes = build_docx("<w:document><w:body></w:body></w:document>");
        let text = extract_text(DocumentKind::Docx, &bytes).unwrap();
        assert!(text.trim().is_empty());
    }
}
