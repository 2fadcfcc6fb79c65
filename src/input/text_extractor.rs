//! Candidate profile extraction
//!
//! Pulls the raw text out of one segmented resume and applies best-effort
//! contact-field heuristics. Each contact field runs an ordered chain of
//! strategies (pattern match, then a looser token scan) and falls back to a
//! sentinel when nothing matches.

use crate::error::{Result, ScreenerError};
use log::debug;
use regex::Regex;
use std::path::Path;
use tokio::fs;

/// Sentinel for contact fields that could not be extracted.
pub const MISSING: &str = "N/A";

#[derive(Debug, Clone)]
pub struct ExtractedProfile {
    pub text: String,
    pub email: String,
    pub phone: String,
}

pub struct ProfileExtractor {
    email_regex: Regex,
    phone_regex: Regex,
}

impl Default for ProfileExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileExtractor {
    pub fn new() -> Self {
        let email_regex = Regex::new(r"[\w.\-]+@[\w.\-]+").expect("invalid email regex");
        let phone_regex =
            Regex::new(r"\+?\d[\d\s().\-]{8,}\d").expect("invalid phone regex");

        Self {
            email_regex,
            phone_regex,
        }
    }

    /// Extract text and contact fields from one resume PDF. Fails only when
    /// the file itself cannot be read; a resume with no extractable text
    /// yields an empty profile with sentinel contacts.
    pub async fn extract(&self, path: &Path) -> Result<ExtractedProfile> {
        let bytes = fs::read(path)
            .await
            .map_err(|e| ScreenerError::Extraction(format!("{}: {}", path.display(), e)))?;

        let text = match page_text(&bytes) {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                debug!("{}: no text via page extraction, trying fallback", path.display());
                pdf_extract::extract_text_from_mem(&bytes).unwrap_or_default()
            }
            Err(e) => pdf_extract::extract_text_from_mem(&bytes).map_err(|fallback| {
                ScreenerError::Extraction(format!(
                    "{}: {} (fallback: {})",
                    path.display(),
                    e,
                    fallback
                ))
            })?,
        };

        let email = self.email(&text).unwrap_or_else(|| MISSING.to_string());
        let phone = self.phone(&text).unwrap_or_else(|| MISSING.to_string());

        Ok(ExtractedProfile { text, email, phone })
    }

    /// First email-looking pattern match, else the first whitespace token
    /// containing both `@` and `.`.
    pub fn email(&self, text: &str) -> Option<String> {
        self.email_regex
            .find(text)
            .map(|m| m.as_str().to_string())
            .or_else(|| {
                text.split_whitespace()
                    .find(|token| token.contains('@') && token.contains('.'))
                    .map(|token| token.to_string())
            })
    }

    /// First phone-looking pattern match (optional leading `+`, digits with
    /// spaces/parentheses/hyphens/periods in between), else the first
    /// whitespace token of length >= 10 containing a digit.
    pub fn phone(&self, text: &str) -> Option<String> {
        self.phone_regex
            .find(text)
            .map(|m| m.as_str().to_string())
            .or_else(|| {
                text.split_whitespace()
                    .find(|token| token.len() >= 10 && token.chars().any(|c| c.is_ascii_digit()))
                    .map(|token| token.to_string())
            })
    }
}

/// Concatenate per-page text in page order, with no separators beyond what
/// each page yields.
fn page_text(bytes: &[u8]) -> anyhow::Result<String> {
    let doc = lopdf::Document::load_mem(bytes)?;
    let mut text = String::new();
    for (page_num, _) in doc.get_pages() {
        // A single unreadable page should not sink the whole resume.
        match doc.extract_text(&[page_num]) {
            Ok(page) => text.push_str(&page),
            Err(e) => debug!("page {}: {}", page_num, e),
        }
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_and_phone_patterns() {
        let extractor = ProfileExtractor::new();
        let text = "Reach me at a.b@example.com or +1 (555) 123-4567";

        assert_eq!(extractor.email(text), Some("a.b@example.com".to_string()));
        assert_eq!(extractor.phone(text), Some("+1 (555) 123-4567".to_string()));
    }

    #[test]
    fn test_email_token_fallback() {
        let extractor = ProfileExtractor::new();
        // No local part, so the pattern cannot match; the looser token scan
        // still picks up the handle.
        let text = "email: @example.com (handle moved)";
        assert_eq!(extractor.email(text), Some("@example.com".to_string()));
    }

    #[test]
    fn test_phone_token_fallback() {
        let extractor = ProfileExtractor::new();
        // Too short for the pattern (fewer than 8 middle characters) but a
        // long digit-bearing token for the fallback.
        let text = "call ext/12345x789 today";
        assert_eq!(extractor.phone(text), Some("ext/12345x789".to_string()));
    }

    #[test]
    fn test_no_contacts_found() {
        let extractor = ProfileExtractor::new();
        let text = "no contact details in this resume";
        assert_eq!(extractor.email(text), None);
        assert_eq!(extractor.phone(text), None);
    }

    #[test]
    fn test_first_match_wins() {
        let extractor = ProfileExtractor::new();
        let text = "first@one.com then second@two.com";
        assert_eq!(extractor.email(text), Some("first@one.com".to_string()));
    }

    #[tokio::test]
    async fn test_unreadable_file_is_extraction_error() {
        let extractor = ProfileExtractor::new();
        let result = extractor.extract(Path::new("missing/resume.pdf")).await;
        assert!(matches!(result, Err(ScreenerError::Extraction(_))));
    }
}
