mod document_service_test;
mod service_error_test;
