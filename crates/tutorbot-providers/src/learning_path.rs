//! HTTP client for the learning-path backend.

use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use tutorbot_core::traits::{LearningPath, LearningPathRequest, LearningPathSource};

use crate::error::ProviderError;

const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Fetches learning paths with `GET {base}/api/learning-path`.
pub struct HttpLearningPathClient {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpLearningPathClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base.trim_end_matches('/').to_string(),
            timeout_secs,
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl LearningPathSource for HttpLearningPathClient {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, request), fields(student = %request.student_id, personality = %request.personality))]
    async fn fetch(&self, request: &LearningPathRequest) -> anyhow::Result<LearningPath> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/api/learning-path", self.base_url),
            &[
                ("personality", request.personality.as_str()),
                ("studentId", request.student_id.as_str()),
            ],
        )
        .map_err(|e| ProviderError::NetworkError(format!("invalid base URL: {e}")))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    ProviderError::NetworkError(format!(
                        "learning path service not reachable at {}",
                        self.base_url
                    ))
                } else {
                    ProviderError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(ProviderError::NotFound(request.student_id.clone()).into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status,
                message: body,
            }
            .into());
        }

        let mut path: LearningPath = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        if path.student_id.is_empty() {
            path.student_id = request.student_id.clone();
        }
        if path.personality.is_empty() {
            path.personality = request.personality.clone();
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> LearningPathRequest {
        LearningPathRequest {
            student_id: "STU-7".into(),
            personality: "IAS".into(),
        }
    }

    #[tokio::test]
    async fn successful_fetch() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "learningAreas": [
                {"name": "Mathematics", "description": "Core", "subjects": ["Algebra"]}
            ],
            "recommendedPathway": "STEM",
            "pathways": [
                {"name": "STEM", "matchScore": 82.5, "description": "Science"},
                {"name": "Social Sciences", "matchScore": 61.0}
            ],
            "careerGuidance": [
                {"title": "Engineer", "requiredSubjects": ["Physics"]}
            ],
            "studyTips": ["Practise daily"]
        });

        Mock::given(method("GET"))
            .and(path("/api/learning-path"))
            .and(query_param("personality", "IAS"))
            .and(query_param("studentId", "STU-7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let client = HttpLearningPathClient::new(&server.uri(), 5);
        let lp = client.fetch(&request()).await.unwrap();
        assert_eq!(lp.student_id, "STU-7");
        assert_eq!(lp.personality, "IAS");
        assert_eq!(lp.learning_areas[0].subjects, vec!["Algebra"]);
        assert_eq!(lp.best_pathway(), Some("STEM"));
        assert_eq!(lp.career_guidance[0].title, "Engineer");
    }

    #[tokio::test]
    async fn not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/learning-path"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = HttpLearningPathClient::new(&server.uri(), 5);
        let err = client.fetch(&request()).await.unwrap_err();
        let provider_err = err.downcast_ref::<ProviderError>().unwrap();
        assert!(matches!(provider_err, ProviderError::NotFound(id) if id == "STU-7"));
    }

    #[tokio::test]
    async fn server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/learning-path"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = HttpLearningPathClient::new(&format!("{}/", server.uri()), 5);
        let err = client.fetch(&request()).await.unwrap_err();
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[tokio::test]
    async fn malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/learning-path"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = HttpLearningPathClient::new(&server.uri(), 5);
        let err = client.fetch(&request()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ProviderError>(),
            Some(ProviderError::InvalidResponse(_))
        ));
    }
}
