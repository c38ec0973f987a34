use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

/// Source-text extraction for knowledge-base documents.
///
/// HTML keeps headings, paragraphs and list items in document order, then
/// renders each table row as `cell | cell`. Plain text passes through.
pub struct HtmlTextAdapter {
    blocks: Selector,
    rows: Selector,
    cells: Selector,
}

impl HtmlTextAdapter {
    pub fn new() -> Result<Self, FileLoaderError> {
        Ok(Self {
            blocks: parse_selector("h2, h3, p, li, br")?,
            rows: parse_selector("table tr")?,
            cells: parse_selector("td, th")?,
        })
    }

    pub fn extract_html(&self, html: &str) -> String {
        let document = Html::parse_document(html);
        let mut lines: Vec<String> = document
            .select(&self.blocks)
            .map(element_text)
            .filter(|text| !text.is_empty())
            .collect();

        for row in document.select(&self.rows) {
            let cells: Vec<String> = row
                .select(&self.cells)
                .map(element_text)
                .filter(|text| !text.is_empty())
                .collect();
            if !cells.is_empty() {
                lines.push(cells.join(" | "));
            }
        }

        lines.join("\n")
    }
}

fn parse_selector(selector: &str) -> Result<Selector, FileLoaderError> {
    Selector::parse(selector)
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("bad selector {selector}: {e}")))
}

// Whitespace runs, including those between inline elements, collapse to one space.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl FileLoader for HtmlTextAdapter {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        let text = std::str::from_utf8(data)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("{}: {e}", document.filename)))?;

        match document.content_type {
            ContentType::Html => Ok(self.extract_html(text)),
            ContentType::Text => Ok(text.to_string()),
            other => Err(FileLoaderError::UnsupportedContentType(
                other.as_mime().to_string(),
            )),
        }
    }
}
