mod azure_doc_intel_adapter;
mod html_text_adapter;
mod line_chunker;
mod numeric_cleanup;

pub use azure_doc_intel_adapter::{
    AnalyzeResponse, AnalyzeResult, AnalyzedLine, AnalyzedPage, AzureDocIntelAdapter,
};
pub use html_text_adapter::HtmlTextAdapter;
pub use line_chunker::LineChunker;
pub use numeric_cleanup::clean_numeric_fields;
