use std::sync::Arc;

use serde_json::json;

use docsense::application::ports::ServiceError;
use docsense::application::services::{DocumentError, DocumentService, FewShotExample};
use docsense::domain::{ContentType, Document, MessageRole};

use crate::helpers::{MockOcrClient, RecordingLlmClient};

fn invoice() -> Document {
    Document::new("invoice.pdf".to_string(), ContentType::Pdf, 4)
}

#[tokio::test]
async fn given_question_when_asking_then_prompt_contains_ocr_text_and_question() {
    let llm = Arc::new(RecordingLlmClient::replying("Total due: $50"));
    let service = DocumentService::new(
        Arc::new(MockOcrClient::returning("Invoice #123, total $50")),
        Arc::clone(&llm),
    );

    let answer = service
        .ask(b"%PDF", &invoice(), Some("What is the total?"))
        .await
        .unwrap();

    assert_eq!(answer.text, "Invoice #123, total $50");
    assert_eq!(answer.response, "Total due: $50");
    let prompt = llm.last_prompt();
    assert!(prompt.contains("Invoice #123, total $50"));
    assert!(prompt.contains("What is the total?"));
}

#[tokio::test]
async fn given_no_question_when_asking_then_requests_summary() {
    let llm = Arc::new(RecordingLlmClient::replying("A short invoice."));
    let service = DocumentService::new(
        Arc::new(MockOcrClient::returning("Invoice #123")),
        Arc::clone(&llm),
    );

    service.ask(b"%PDF", &invoice(), None).await.unwrap();

    assert!(llm.last_prompt().contains("Summarize the document"));
}

#[tokio::test]
async fn given_empty_upload_when_asking_then_returns_empty_document() {
    let llm = Arc::new(RecordingLlmClient::replying("unused"));
    let service = DocumentService::new(Arc::new(MockOcrClient::returning("x")), Arc::clone(&llm));

    let result = service.ask(b"", &invoice(), None).await;

    assert!(matches!(result, Err(DocumentError::EmptyDocument)));
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn given_ocr_auth_failure_when_asking_then_returns_ocr_error() {
    let llm = Arc::new(RecordingLlmClient::replying("unused"));
    let service = DocumentService::new(
        Arc::new(MockOcrClient::failing(ServiceError::Authentication(
            "HTTP 401".to_string(),
        ))),
        llm,
    );

    let result = service.ask(b"%PDF", &invoice(), None).await;

    assert!(matches!(
        result,
        Err(DocumentError::Ocr(ServiceError::Authentication(_)))
    ));
}

#[tokio::test]
async fn given_fenced_json_reply_when_extracting_fields_then_parses_form() {
    let llm = Arc::new(RecordingLlmClient::replying(
        "Here you go:\n```json\n{\"lastName\": \"Levi\"}\n```",
    ));
    let service = DocumentService::new(
        Arc::new(MockOcrClient::returning("Last name: Levi")),
        Arc::clone(&llm),
    );

    let extraction = service.extract_fields(b"%PDF", &invoice()).await.unwrap();

    assert_eq!(extraction.fields, json!({ "lastName": "Levi" }));
    assert_eq!(extraction.text, "Last name: Levi");
}

#[tokio::test]
async fn given_few_shot_example_when_extracting_fields_then_sends_example_before_request() {
    let llm = Arc::new(RecordingLlmClient::replying("{}"));
    let service = DocumentService::new(
        Arc::new(MockOcrClient::returning("Last name: Cohen")),
        Arc::clone(&llm),
    )
    .with_few_shot(FewShotExample {
        ocr_text: "Last name: Levi".to_string(),
        expected: json!({ "lastName": "Levi" }),
    });

    service.extract_fields(b"%PDF", &invoice()).await.unwrap();

    let messages = llm.calls().pop().unwrap();
    let roles: Vec<MessageRole> = messages.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            MessageRole::System,
            MessageRole::User,
            MessageRole::Assistant,
            MessageRole::User
        ]
    );
    assert!(messages[1].content.contains("Last name: Levi"));
    assert!(messages[2].content.contains("\"lastName\""));
    assert!(messages[3].content.contains("Last name: Cohen"));
}

#[tokio::test]
async fn given_non_json_reply_when_extracting_fields_then_returns_malformed_reply() {
    let llm = Arc::new(RecordingLlmClient::replying("Sorry, I cannot help."));
    let service = DocumentService::new(Arc::new(MockOcrClient::returning("text")), llm);

    let result = service.extract_fields(b"%PDF", &invoice()).await;

    assert!(matches!(result, Err(DocumentError::MalformedReply(_))));
}
