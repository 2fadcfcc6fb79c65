//! Job description reading for the two supported upload formats
//!
//! PDF text is pulled per page and joined with newlines; DOCX text is the
//! document's paragraphs joined with newlines. Anything else is rejected.

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::FileType;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::path::Path;
use tokio::fs;

pub struct JdReader;

impl JdReader {
    /// Extract plain text from a job description file, dispatching on extension.
    pub async fn read(path: &Path) -> Result<String> {
        let bytes = fs::read(path)
            .await
            .map_err(|e| ScreenerError::JdRead(format!("{}: {}", path.display(), e)))?;

        match FileType::from_path(path) {
            FileType::Pdf => pdf_text(&bytes)
                .map_err(|e| ScreenerError::JdRead(format!("PDF read error: {}", e))),
            FileType::Docx => docx_text(&bytes)
                .map_err(|e| ScreenerError::JdRead(format!("DOCX read error: {}", e))),
            FileType::Unknown => Err(ScreenerError::UnsupportedFormat(format!(
                "{}: job description must be PDF or DOCX",
                path.display()
            ))),
        }
    }
}

fn pdf_text(bytes: &[u8]) -> anyhow::Result<String> {
    let doc = lopdf::Document::load_mem(bytes)?;
    let mut pages = Vec::new();
    for (page_num, _) in doc.get_pages() {
        pages.push(doc.extract_text(&[page_num])?);
    }
    Ok(pages.join("\n"))
}

fn docx_text(bytes: &[u8]) -> anyhow::Result<String> {
    let cursor = Cursor::new(bytes);
    let mut archive = zip::ZipArchive::new(cursor)?;

    let mut document_file = archive.by_name("word/document.xml")?;
    let mut xml = String::new();
    document_file.read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut current = String::new();
    let mut paragraphs = Vec::new();
    let mut in_paragraph = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if e.name().as_ref() == b"w:p" {
                    in_paragraph = true;
                    current.clear();
                }
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"w:p" {
                    if !current.trim().is_empty() {
                        paragraphs.push(current.trim().to_string());
                    }
                    current.clear();
                    in_paragraph = false;
                }
            }
            Ok(Event::Text(e)) => {
                if in_paragraph {
                    let value = e.xml_content()?.into_owned();
                    current.push_str(&value);
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err.into()),
            _ => {}
        }

        buf.clear();
    }

    Ok(paragraphs.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_docx(path: &Path, body_xml: &str) {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body>{}</w:body>
</w:document>"#,
            body_xml
        );
        let file = std::fs::File::create(path).unwrap();
        let mut archive = zip::ZipWriter::new(file);
        archive
            .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        archive.write_all(xml.as_bytes()).unwrap();
        archive.finish().unwrap();
    }

    #[tokio::test]
    async fn test_docx_paragraphs_joined_by_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jd.docx");
        write_docx(
            &path,
            "<w:p><w:r><w:t>Senior Rust Engineer</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Requirements: </w:t></w:r><w:r><w:t>Python, SQL</w:t></w:r></w:p>\
             <w:p></w:p>",
        );

        let text = JdReader::read(&path).await.unwrap();
        assert_eq!(text, "Senior Rust Engineer\nRequirements: Python, SQL");
    }

    #[tokio::test]
    async fn test_unsupported_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jd.txt");
        std::fs::write(&path, "plain text jd").unwrap();

        let result = JdReader::read(&path).await;
        assert!(matches!(result, Err(ScreenerError::UnsupportedFormat(_))));
    }

    #[tokio::test]
    async fn test_corrupt_docx_wrapped_with_cause() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jd.docx");
        std::fs::write(&path, b"not a zip archive").unwrap();

        match JdReader::read(&path).await {
            Err(ScreenerError::JdRead(msg)) => assert!(msg.starts_with("DOCX read error:")),
            other => panic!("expected JdRead error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_jd_read_error() {
        let result = JdReader::read(Path::new("does/not/exist.pdf")).await;
        assert!(matches!(result, Err(ScreenerError::JdRead(_))));
    }
}
