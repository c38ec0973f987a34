use std::sync::Arc;

use serde_json::Value;

use super::prompts;
use super::reply_parser::{ReplyParseError, parse_json_reply};
use crate::application::ports::{LlmClient, OcrClient, ServiceError};
use crate::domain::{Document, Message};

/// An OCR'd sample and the JSON the model is expected to produce for it.
#[derive(Debug, Clone)]
pub struct FewShotExample {
    pub ocr_text: String,
    pub expected: Value,
}

pub struct DocumentService<O, L>
where
    O: OcrClient,
    L: LlmClient,
{
    ocr_client: Arc<O>,
    llm_client: Arc<L>,
    few_shot: Option<FewShotExample>,
}

impl<O, L> DocumentService<O, L>
where
    O: OcrClient,
    L: LlmClient,
{
    pub fn new(ocr_client: Arc<O>, llm_client: Arc<L>) -> Self {
        Self {
            ocr_client,
            llm_client,
            few_shot: None,
        }
    }

    pub fn with_few_shot(mut self, example: FewShotExample) -> Self {
        self.few_shot = Some(example);
        self
    }

    #[tracing::instrument(skip(self, data), fields(filename = %document.filename))]
    pub async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, DocumentError> {
        if data.is_empty() {
            return Err(DocumentError::EmptyDocument);
        }

        let text = self
            .ocr_client
            .extract_text(data, document)
            .await
            .map_err(DocumentError::Ocr)?;

        tracing::debug!(chars = text.len(), "OCR text extracted");
        Ok(text)
    }

    /// Summarizes the document, or answers `question` about it.
    pub async fn ask(
        &self,
        data: &[u8],
        document: &Document,
        question: Option<&str>,
    ) -> Result<DocumentAnswer, DocumentError> {
        let text = self.extract_text(data, document).await?;
        let prompt = prompts::document_prompt(&text, question);

        let response = self
            .llm_client
            .complete(&prompt, prompts::DOCUMENT_SYSTEM_PROMPT)
            .await
            .map_err(DocumentError::Completion)?;

        Ok(DocumentAnswer { text, response })
    }

    /// Organizes the document's text into the structured form JSON.
    pub async fn extract_fields(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<FormExtraction, DocumentError> {
        let text = self.extract_text(data, document).await?;

        let mut messages = vec![Message::system(prompts::form_extraction_prompt())];
        if let Some(example) = &self.few_shot {
            messages.push(Message::user(prompts::form_extraction_request(
                &example.ocr_text,
            )));
            messages.push(Message::assistant(example.expected.to_string()));
        }
        messages.push(Message::user(prompts::form_extraction_request(&text)));

        let reply = self
            .llm_client
            .chat(&messages)
            .await
            .map_err(DocumentError::Completion)?;

        let fields = parse_json_reply(&reply)?;
        Ok(FormExtraction { text, fields })
    }
}

#[derive(Debug, Clone)]
pub struct DocumentAnswer {
    pub text: String,
    pub response: String,
}

#[derive(Debug, Clone)]
pub struct FormExtraction {
    pub text: String,
    pub fields: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("document is empty")]
    EmptyDocument,
    #[error("ocr: {0}")]
    Ocr(ServiceError),
    #[error("completion: {0}")]
    Completion(ServiceError),
    #[error("malformed reply: {0}")]
    MalformedReply(#[from] ReplyParseError),
}
