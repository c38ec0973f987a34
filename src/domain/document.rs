use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub filename: String,
    pub content_type: ContentType,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Pdf,
    Jpeg,
    Png,
    Html,
    Text,
}

impl ContentType {
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_lowercase().as_str() {
            "application/pdf" => Some(Self::Pdf),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "text/html" => Some(Self::Html),
            "text/plain" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "pdf" => Some(Self::Pdf),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "html" | "htm" => Some(Self::Html),
            "txt" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Html => "text/html",
            Self::Text => "text/plain",
        }
    }

    /// Whether the OCR service accepts this type as a scanned document.
    pub fn is_scannable(&self) -> bool {
        matches!(self, Self::Pdf | Self::Jpeg | Self::Png)
    }
}

impl Document {
    pub fn new(filename: String, content_type: ContentType, size_bytes: u64) -> Self {
        Self {
            filename,
            content_type,
            size_bytes,
        }
    }

    /// File name without its extension, used to name derived artifacts.
    pub fn stem(&self) -> &str {
        Path::new(&self.filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.filename)
    }
}

/// A document together with its raw bytes, as read from disk or an upload.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub document: Document,
    pub data: Vec<u8>,
}

impl SourceFile {
    pub fn new(filename: String, content_type: ContentType, data: Vec<u8>) -> Self {
        Self {
            document: Document::new(filename, content_type, data.len() as u64),
            data,
        }
    }
}
