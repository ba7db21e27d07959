use crate::{
    constants::{GET_RESPONSE_PATH, PDF_MIME, UPLOAD_FIELD, UPLOAD_PDF_PATH},
    errors::{MiloError, MiloResult},
    logging::{log_request, RequestLog},
    models::GetResponseRequest,
};
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use reqwest::{multipart, Client, Response};
use serde_json::Value;
use std::path::Path;
use std::time::Instant;

/// The remote chat backend.
///
/// Both calls return the decoded JSON body. Interpreting the body is left to
/// the caller, so a reply with unexpected fields is not an error here.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Posts `{ "message": <message> }` to `/get_response`.
    async fn get_response(&self, request_id: &str, message: &str) -> MiloResult<Value>;

    /// Posts the file at `path` as multipart field `file` to `/upload_pdf`.
    async fn upload_pdf(&self, request_id: &str, path: &Path) -> MiloResult<Value>;
}

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Records the call, then decodes the body.
    ///
    /// A non-2xx status is not a failure on its own: the backend reports
    /// problems as `{ "error": ... }` with a 4xx/5xx status.
    async fn read_json(
        request_id: &str,
        endpoint: String,
        started: Instant,
        response: Response,
    ) -> MiloResult<Value> {
        let status = response.status();
        log_request(&RequestLog {
            request_id: request_id.to_string(),
            timestamp: Utc::now(),
            endpoint,
            response_status: status.as_u16(),
            response_time_ms: started.elapsed().as_millis(),
        });

        if !status.is_success() {
            warn!("[{}] backend returned status {}", request_id, status);
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| MiloError::parse_error(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn get_response(&self, request_id: &str, message: &str) -> MiloResult<Value> {
        let endpoint = self.endpoint(GET_RESPONSE_PATH);
        debug!("[{}] POST {}", request_id, endpoint);

        let started = Instant::now();
        let response = self
            .client
            .post(&endpoint)
            .json(&GetResponseRequest {
                message: message.to_string(),
            })
            .send()
            .await
            .map_err(|e| MiloError::transport_error(format!("Request failed: {}", e)))?;

        Self::read_json(request_id, endpoint, started, response).await
    }

    async fn upload_pdf(&self, request_id: &str, path: &Path) -> MiloResult<Value> {
        let endpoint = self.endpoint(UPLOAD_PDF_PATH);
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.pdf".to_string());
        debug!(
            "[{}] POST {} ({}, {} bytes)",
            request_id,
            endpoint,
            file_name,
            bytes.len()
        );

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(PDF_MIME)
            .map_err(|e| MiloError::transport_error(format!("MIME error: {}", e)))?;
        let form = multipart::Form::new().part(UPLOAD_FIELD, part);

        let started = Instant::now();
        let response = self
            .client
            .post(&endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| MiloError::transport_error(format!("Request failed: {}", e)))?;

        Self::read_json(request_id, endpoint, started, response).await
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use wiremock::{
        matchers::{body_json, header_regex, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let backend = HttpBackend::new("http://localhost:5000/");
        assert_eq!(backend.endpoint(GET_RESPONSE_PATH), "http://localhost:5000/get_response");

        let backend = HttpBackend::new("http://localhost:5000/api");
        assert_eq!(backend.endpoint(UPLOAD_PDF_PATH), "http://localhost:5000/api/upload_pdf");
    }

    #[tokio::test]
    async fn test_get_response_posts_json_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/get_response"))
            .and(body_json(json!({ "message": "hello there" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": "General Kenobi",
                "history": []
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let backend = HttpBackend::new(mock_server.uri());
        let body = backend.get_response("req-1", "hello there").await.unwrap();

        assert_eq!(body["response"], "General Kenobi");
    }

    #[tokio::test]
    async fn test_error_status_body_is_still_parsed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/upload_pdf"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "too large" })))
            .mount(&mock_server)
            .await;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"%PDF-1.4 test").unwrap();

        let backend = HttpBackend::new(mock_server.uri());
        let body = backend.upload_pdf("req-2", file.path()).await.unwrap();

        assert_eq!(body["error"], "too large");
    }

    #[tokio::test]
    async fn test_upload_sends_multipart_file_field() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/upload_pdf"))
            .and(header_regex("content-type", "^multipart/form-data; boundary=.+"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "summary": "3 pages" })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"%PDF-1.4 test").unwrap();

        let backend = HttpBackend::new(mock_server.uri());
        backend.upload_pdf("req-3", file.path()).await.unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"file\""));
        assert!(body.contains("application/pdf"));
        assert!(body.contains("%PDF-1.4 test"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/get_response"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&mock_server)
            .await;

        let backend = HttpBackend::new(mock_server.uri());
        let err = backend.get_response("req-4", "hi").await.unwrap_err();

        assert!(matches!(err, MiloError::Parse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();
        drop(mock_server);

        let backend = HttpBackend::new(uri);
        let err = backend.get_response("req-5", "hi").await.unwrap_err();

        assert!(matches!(err, MiloError::Transport(_)));
    }

    #[tokio::test]
    async fn test_missing_upload_file_is_io_error() {
        let backend = HttpBackend::new("http://127.0.0.1:9");
        let err = backend
            .upload_pdf("req-6", Path::new("/definitely/not/here.pdf"))
            .await
            .unwrap_err();

        assert!(matches!(err, MiloError::Io(_)));
    }
}
