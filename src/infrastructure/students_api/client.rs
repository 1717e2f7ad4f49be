//! Students API HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use super::dto::{CreateStudentBody, ErrorResponse, StudentResponse, students_from_records};
use crate::domain::entities::{NewStudent, Student, StudentId};
use crate::domain::errors::ApiError;
use crate::domain::ports::StudentsPort;

const USER_AGENT: &str = concat!("roster-tui/", env!("CARGO_PKG_VERSION"));

/// HTTP adapter for the students collection resource.
pub struct StudentsApiClient {
    client: Client,
    collection_url: Url,
}

impl StudentsApiClient {
    /// Creates a client for the collection at `collection_url`.
    ///
    /// Requests never time out unless `timeout` is set.
    ///
    /// # Errors
    /// Returns error if the URL is invalid or HTTP client creation fails.
    pub fn new(collection_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let collection_url = Url::parse(collection_url)
            .map_err(|e| ApiError::unexpected(format!("invalid API URL {collection_url}: {e}")))?;

        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            collection_url,
        })
    }

    fn item_url(&self, id: &StudentId) -> Result<Url, ApiError> {
        let mut url = self.collection_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::unexpected("API URL cannot have path segments"))?
            .pop_if_empty()
            .push(id.as_str());
        Ok(url)
    }

    async fn error_from_response(status: StatusCode, response: reqwest::Response) -> ApiError {
        let message = match response.json::<ErrorResponse>().await {
            Ok(error) => error.message,
            Err(_) => status
                .canonical_reason()
                .map_or_else(|| format!("HTTP {status}"), str::to_string),
        };
        ApiError::status(status.as_u16(), message)
    }
}

fn transport_error(e: &reqwest::Error) -> ApiError {
    warn!(error = %e, "Failed to reach students API");
    if e.is_timeout() {
        ApiError::network("request timed out")
    } else if e.is_connect() {
        ApiError::network("failed to connect to the students API")
    } else {
        ApiError::network(e.to_string())
    }
}

#[async_trait]
impl StudentsPort for StudentsApiClient {
    async fn fetch_all(&self) -> Result<Vec<Student>, ApiError> {
        debug!(url = %self.collection_url, "GET students");

        let response = self
            .client
            .get(self.collection_url.clone())
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_from_response(status, response).await);
        }

        let records: Vec<serde_json::Value> = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse students list");
            ApiError::decode(e.to_string())
        })?;

        let total = records.len();
        let students = students_from_records(records);
        if students.len() < total {
            warn!(
                skipped = total - students.len(),
                total, "Some student records could not be decoded"
            );
        }
        Ok(students)
    }

    async fn create(&self, student: NewStudent) -> Result<Student, ApiError> {
        debug!(url = %self.collection_url, "POST student");

        let response = self
            .client
            .post(self.collection_url.clone())
            .json(&CreateStudentBody::from(&student))
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_from_response(status, response).await);
        }

        let created: StudentResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse created student");
            ApiError::decode(e.to_string())
        })?;

        Ok(created.into())
    }

    async fn delete(&self, id: StudentId) -> Result<(), ApiError> {
        let url = self.item_url(&id)?;
        debug!(url = %url, "DELETE student");

        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::error_from_response(status, response).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = StudentsApiClient::new("http://localhost:3000/api/students", None);
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_url_rejected() {
        let result = StudentsApiClient::new("not a url", Some(Duration::from_secs(1)));
        assert!(matches!(result, Err(ApiError::Unexpected { .. })));
    }

    #[test]
    fn test_item_url_appends_id() {
        let client = StudentsApiClient::new("http://localhost:3000/api/students", None).unwrap();
        let url = client.item_url(&StudentId::new("42")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/students/42");
    }

    #[test]
    fn test_item_url_with_trailing_slash_and_escaping() {
        let client = StudentsApiClient::new("http://localhost:3000/api/students/", None).unwrap();
        let url = client.item_url(&StudentId::new("a b")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/students/a%20b");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let client = StudentsApiClient::new(
            "http://127.0.0.1:9/api/students",
            Some(Duration::from_secs(2)),
        )
        .unwrap();

        let result = client.fetch_all().await;

        assert!(matches!(result, Err(ApiError::Network { .. })));
    }
}
