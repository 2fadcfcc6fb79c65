//! Combined-resume segmentation
//!
//! A batch upload is a single PDF whose outline bookmarks mark where each
//! candidate's resume starts. Each bookmark spans the pages up to the next
//! bookmark's start page; the final bookmark runs to the end of the document.
//! Every segment is written as a standalone PDF that survives the request so
//! result rows can link back to it.

use crate::error::{Result, ScreenerError};
use lopdf::{Dictionary, Document, Object, ObjectId};
use log::{debug, warn};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Title given to the single whole-document segment when the source
/// carries no bookmarks at all.
const FALLBACK_TITLE: &str = "Resume";

#[derive(Debug, Clone)]
pub struct CandidateDocument {
    pub display_name: String,
    pub file_path: PathBuf,
    pub file_name: String,
}

pub struct DocumentSegmenter;

impl DocumentSegmenter {
    /// Split `source` into one PDF per bookmark under `output_dir`, returning
    /// the segments in bookmark order.
    pub fn segment(source: &Path, output_dir: &Path) -> Result<Vec<CandidateDocument>> {
        let doc = Document::load(source).map_err(|e| {
            ScreenerError::Segmentation(format!("{}: {}", source.display(), e))
        })?;
        let page_count = doc.get_pages().len() as u32;

        let bookmarks = outline_bookmarks(&doc);
        debug!(
            "{}: {} pages, {} bookmarks",
            source.display(),
            page_count,
            bookmarks.len()
        );

        std::fs::create_dir_all(output_dir)?;

        let sanitizer = Regex::new(r"[^\w\-. ]").expect("invalid title sanitizer regex");
        let mut segments = Vec::new();

        for (ordinal, (title, pages)) in segment_ranges(bookmarks, page_count).into_iter().enumerate() {
            let file_name = format!("{:02}_{}.pdf", ordinal + 1, sanitize_title(&title, &sanitizer));
            let file_path = output_dir.join(&file_name);

            write_segment(&doc, &pages, &file_path)?;
            debug!("wrote segment {} ({} pages)", file_name, pages.len());

            segments.push(CandidateDocument {
                display_name: title,
                file_path,
                file_name,
            });
        }

        Ok(segments)
    }
}

/// Pair each bookmark with its 1-based page numbers. Bookmark start pages are
/// half-open boundaries: segment i covers `[start_i, start_{i+1})`, with a
/// synthetic terminal boundary one past the last page. An out-of-range or
/// out-of-order start yields an empty (zero-page) segment rather than an error.
fn segment_ranges(bookmarks: Vec<(String, u32)>, page_count: u32) -> Vec<(String, Vec<u32>)> {
    let mut boundaries: Vec<(String, u32)> = if bookmarks.is_empty() {
        vec![(FALLBACK_TITLE.to_string(), 1)]
    } else {
        bookmarks
    };
    boundaries.push(("END".to_string(), page_count + 1));

    let mut ranges = Vec::new();
    for pair in boundaries.windows(2) {
        let (ref title, start) = pair[0];
        let (_, next_start) = pair[1];

        let start = start.max(1);
        let end = next_start.min(page_count + 1);
        let pages: Vec<u32> = if start < end { (start..end).collect() } else { Vec::new() };

        ranges.push((title.clone(), pages));
    }

    ranges
}

/// Strip every character outside word/hyphen/underscore/period/space, then
/// swap spaces for underscores so the title is filesystem-safe.
fn sanitize_title(title: &str, sanitizer: &Regex) -> String {
    sanitizer
        .replace_all(title, "")
        .trim()
        .replace(' ', "_")
}

/// Serialize the given pages of `source` as a standalone document. An empty
/// page list still produces a (zero-page) file so segment count always
/// matches bookmark count.
fn write_segment(source: &Document, pages: &[u32], path: &Path) -> Result<()> {
    let keep: HashSet<u32> = pages.iter().copied().collect();
    let delete: Vec<u32> = source
        .get_pages()
        .keys()
        .filter(|n| !keep.contains(n))
        .copied()
        .collect();

    let mut segment = source.clone();
    if !delete.is_empty() {
        segment.delete_pages(&delete);
    }
    segment.prune_objects();
    segment
        .save(path)
        .map_err(|e| ScreenerError::Segmentation(format!("{}: {}", path.display(), e)))?;
    Ok(())
}

/// Walk the outline tree depth-first and return a flat `(title, start_page)`
/// list in outline order. Items whose destination cannot be resolved to a
/// page are skipped with a warning.
fn outline_bookmarks(doc: &Document) -> Vec<(String, u32)> {
    let mut bookmarks = Vec::new();

    let page_numbers: HashMap<ObjectId, u32> = doc
        .get_pages()
        .into_iter()
        .map(|(number, id)| (id, number))
        .collect();

    let Ok(catalog) = doc.catalog() else {
        return bookmarks;
    };
    let Some(outlines) = catalog
        .get(b"Outlines")
        .ok()
        .and_then(|obj| dict_of(doc, obj))
    else {
        return bookmarks;
    };

    let mut visited = HashSet::new();
    if let Ok(first) = outlines.get(b"First") {
        walk_outline_chain(doc, first, &page_numbers, &mut bookmarks, &mut visited);
    }
    bookmarks
}

fn walk_outline_chain(
    doc: &Document,
    first: &Object,
    page_numbers: &HashMap<ObjectId, u32>,
    bookmarks: &mut Vec<(String, u32)>,
    visited: &mut HashSet<ObjectId>,
) {
    let mut next = first.as_reference().ok();
    while let Some(id) = next {
        // Guard against malformed self-referential outlines.
        if !visited.insert(id) {
            return;
        }
        let Ok(item) = doc.get_dictionary(id) else {
            return;
        };

        let title = item
            .get(b"Title")
            .ok()
            .and_then(|obj| obj.as_str().ok())
            .map(decode_pdf_string)
            .unwrap_or_default();

        match destination_page(doc, item, page_numbers) {
            Some(page) => bookmarks.push((title, page)),
            None => warn!("skipping bookmark '{}': unresolvable destination", title),
        }

        if let Ok(first_child) = item.get(b"First") {
            walk_outline_chain(doc, first_child, page_numbers, bookmarks, visited);
        }

        next = item.get(b"Next").ok().and_then(|obj| obj.as_reference().ok());
    }
}

/// Resolve an outline item's target to a 1-based page number. Handles a
/// direct `/Dest` array and the `/A` GoTo-action form; named destinations
/// are not resolved.
fn destination_page(
    doc: &Document,
    item: &Dictionary,
    page_numbers: &HashMap<ObjectId, u32>,
) -> Option<u32> {
    let dest = match item.get(b"Dest") {
        Ok(dest) => Some(dest.clone()),
        Err(_) => item
            .get(b"A")
            .ok()
            .and_then(|obj| dict_of(doc, obj))
            .and_then(|action| action.get(b"D").ok().cloned()),
    }?;

    let array = match dest {
        Object::Array(array) => array,
        Object::Reference(id) => doc.get_object(id).ok()?.as_array().ok()?.clone(),
        _ => return None,
    };

    let page_ref = array.first()?.as_reference().ok()?;
    page_numbers.get(&page_ref).copied()
}

fn dict_of<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Dictionary> {
    match obj {
        Object::Dictionary(dict) => Some(dict),
        Object::Reference(id) => doc.get_object(*id).ok()?.as_dict().ok(),
        _ => None,
    }
}

/// PDF text strings are either UTF-16BE (with a BOM) or effectively
/// Latin-1/PDFDoc encoded; decode both leniently.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&utf16)
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bookmark(title: &str, page: u32) -> (String, u32) {
        (title.to_string(), page)
    }

    #[test]
    fn test_ranges_half_open_between_bookmarks() {
        let ranges = segment_ranges(vec![bookmark("Alice", 1), bookmark("Bob", 3)], 5);
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0], ("Alice".to_string(), vec![1, 2]));
        assert_eq!(ranges[1], ("Bob".to_string(), vec![3, 4, 5]));
    }

    #[test]
    fn test_zero_bookmarks_single_whole_document_segment() {
        let ranges = segment_ranges(Vec::new(), 4);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0], ("Resume".to_string(), vec![1, 2, 3, 4]));
    }

    #[test]
    fn test_out_of_range_bookmark_yields_empty_segment() {
        let ranges = segment_ranges(vec![bookmark("Alice", 1), bookmark("Ghost", 99)], 2);
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].1, vec![1, 2]);
        assert!(ranges[1].1.is_empty());
    }

    #[test]
    fn test_pages_before_first_bookmark_are_dropped() {
        let ranges = segment_ranges(vec![bookmark("Alice", 3)], 5);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].1, vec![3, 4, 5]);
    }

    #[test]
    fn test_page_counts_sum_to_total_minus_leading_pages() {
        let ranges = segment_ranges(
            vec![bookmark("A", 2), bookmark("B", 4), bookmark("C", 7)],
            10,
        );
        let total_pages: usize = ranges.iter().map(|(_, pages)| pages.len()).sum();
        assert_eq!(total_pages, 10 - 1);
    }

    #[test]
    fn test_sanitize_title() {
        let sanitizer = Regex::new(r"[^\w\-. ]").unwrap();
        assert_eq!(sanitize_title("John O'Neil (CV)", &sanitizer), "John_ONeil_CV");
        assert_eq!(sanitize_title("  Jane Doe  ", &sanitizer), "Jane_Doe");
        assert_eq!(sanitize_title("r.e-s_u me", &sanitizer), "r.e-s_u_me");
        assert_eq!(sanitize_title("!@#$%", &sanitizer), "");
    }

    #[test]
    fn test_decode_pdf_string_utf16be() {
        let bytes = [0xFE, 0xFF, 0x00, 0x41, 0x00, 0x6C, 0x00, 0x69];
        assert_eq!(decode_pdf_string(&bytes), "Ali");
        assert_eq!(decode_pdf_string(b"Bob Jones"), "Bob Jones");
    }
}
