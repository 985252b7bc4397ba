//! HTTP client for the course API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::traits::{CourseSource, ProgressSink};
use crate::course::{Course, CourseSummary};
use crate::learning::ProgressReport;

/// Body of a progress update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub lesson_id: String,
    pub quiz_score: usize,
}

impl From<&ProgressReport> for ProgressUpdate {
    fn from(report: &ProgressReport) -> Self {
        Self { lesson_id: report.lesson_id.clone(), quiz_score: report.quiz_score }
    }
}

/// The catalog endpoint answers either with a bare list or wrapped in `courses`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogResponse {
    List(Vec<CourseSummary>),
    Wrapped { courses: Vec<CourseSummary> },
}

impl CatalogResponse {
    fn into_courses(self) -> Vec<CourseSummary> {
        match self {
            CatalogResponse::List(courses) | CatalogResponse::Wrapped { courses } => courses,
        }
    }
}

/// Course API client
#[derive(Debug, Clone)]
pub struct CourseApiClient {
    /// HTTP client
    client: Client,
    /// Base URL without a trailing slash, e.g. `http://localhost:5000/api`
    base_url: String,
    /// Bearer token, if signed in
    token: Option<String>,
}

impl CourseApiClient {
    /// Create a client for the given base URL
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url, token: None })
    }

    /// Send a bearer token with every request
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn catalog_url(&self) -> String {
        format!("{}/courses", self.base_url)
    }

    pub fn course_url(&self, course_id: &str) -> String {
        format!("{}/courses/{}/lessons", self.base_url, course_id)
    }

    pub fn progress_url(&self, course_id: &str) -> String {
        format!("{}/courses/{}/progress", self.base_url, course_id)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        what: &str,
    ) -> Result<T, ApiError> {
        let response = self.authorize(self.client.get(url)).send().await?;
        let response = check_status(response, what).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CourseSource for CourseApiClient {
    async fn list_courses(&self) -> Result<Vec<CourseSummary>, ApiError> {
        let catalog: CatalogResponse = self.get_json(&self.catalog_url(), "course catalog").await?;
        Ok(catalog.into_courses())
    }

    async fn fetch_course(&self, course_id: &str) -> Result<Course, ApiError> {
        tracing::debug!("Fetching course {}", course_id);
        let course: Course = self.get_json(&self.course_url(course_id), course_id).await?;
        for defect in course.validate() {
            tracing::warn!("Course {}: {}", course_id, defect);
        }
        Ok(course.normalize())
    }
}

#[async_trait]
impl ProgressSink for CourseApiClient {
    async fn submit_progress(&self, report: &ProgressReport) -> Result<(), ApiError> {
        let response = self
            .authorize(self.client.post(self.progress_url(&report.course_id)))
            .json(&ProgressUpdate::from(report))
            .send()
            .await?;
        check_status(response, &report.course_id).await?;
        Ok(())
    }
}

/// Turn an error response into an `ApiError`
async fn check_status(response: Response, what: &str) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(status_error(status, message, what))
}

fn status_error(status: StatusCode, message: String, what: &str) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::NOT_FOUND => ApiError::NotFound(what.to_string()),
        _ => ApiError::Status { status: status.as_u16(), message },
    }
}
