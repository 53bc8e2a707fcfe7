//! The remote analysis service, and the one HTTP client that talks to it.
//!
//! Layout never depends on this module: anything implementing [AnalysisService] can
//! produce the text a report is built from.

use crate::{
    report::AnalysisDocument,
    request::AnalysisRequest,
    ReportError, Result,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://airesume-reviewer.onrender.com/analyze";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

pub const ENDPOINT_VAR: &str = "RESUME_REVIEW_ENDPOINT";
pub const TIMEOUT_VAR: &str = "RESUME_REVIEW_TIMEOUT_SECS";

/// Reported when the service answers without an analysis or an error
pub const NO_ANALYSIS: &str = "No analysis returned.";

/// Turns a résumé, job role and job description into analysis text
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn submit(&self, request: &AnalysisRequest) -> Result<String>;
}

/// Validates `request`, submits it and wraps the returned text for layout. Nothing is
/// sent when the request lacks a résumé or a job role.
pub async fn analyze<S>(
    service: &S,
    request: &AnalysisRequest,
    generated: NaiveDate,
) -> Result<AnalysisDocument>
where
    S: AnalysisService + ?Sized,
{
    request.validate()?;
    let text = service.submit(request).await?;
    Ok(AnalysisDocument::new(text, request.job_role.as_str(), generated))
}

/// Where the service lives and how long to wait for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ServiceConfig {
    /// Defaults, overridden by `RESUME_REVIEW_ENDPOINT` and `RESUME_REVIEW_TIMEOUT_SECS`
    /// where those are set
    pub fn from_env() -> ServiceConfig {
        let mut config = ServiceConfig::default();
        if let Ok(endpoint) = std::env::var(ENDPOINT_VAR) {
            if !endpoint.trim().is_empty() {
                config.endpoint = endpoint.trim().to_string();
            }
        }
        if let Ok(secs) = std::env::var(TIMEOUT_VAR) {
            match secs.trim().parse::<u64>() {
                Ok(secs) => config.timeout = Duration::from_secs(secs),
                Err(_) => log::warn!("ignoring {TIMEOUT_VAR}={secs:?}, expected whole seconds"),
            }
        }
        config
    }
}

#[derive(Debug, Deserialize)]
struct AnalysisResponse {
    analysis: Option<String>,
    error: Option<String>,
}

/// Interprets a response body: the `analysis` field on success, the `error` field or a
/// generic failure otherwise
pub fn parse_analysis_response(body: &str) -> Result<String> {
    let response: AnalysisResponse = serde_json::from_str(body)
        .map_err(|err| ReportError::service(None, format!("malformed response: {err}")))?;
    if let Some(error) = response.error.filter(|error| !error.is_empty()) {
        return Err(ReportError::service(None, error));
    }
    response
        .analysis
        .filter(|analysis| !analysis.trim().is_empty())
        .ok_or_else(|| ReportError::service(None, NO_ANALYSIS))
}

/// [AnalysisService] over HTTP: one multipart `POST` per request, no retries
#[derive(Clone)]
pub struct HttpAnalysisService {
    client: Client,
    endpoint: String,
}

impl HttpAnalysisService {
    pub fn new(config: &ServiceConfig) -> Result<HttpAnalysisService> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(HttpAnalysisService {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    async fn submit(&self, request: &AnalysisRequest) -> Result<String> {
        let resume = request.validate()?;
        let part = Part::bytes(resume.bytes.clone())
            .file_name(resume.name.clone())
            .mime_str(resume.mime)?;
        let form = Form::new()
            .part("resume", part)
            .text("job_role", request.job_role.clone())
            .text("job_description", request.job_description.clone());

        log::debug!("submitting {} to {}", resume.name, self.endpoint);
        let response = self.client.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            log::warn!("analysis service returned {status}");
            // error replies usually still carry an `error` field worth showing
            let message = serde_json::from_str::<AnalysisResponse>(&body)
                .ok()
                .and_then(|response| response.error)
                .unwrap_or_else(|| status.to_string());
            return Err(ReportError::service(Some(status.as_u16()), message));
        }

        parse_analysis_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::ResumeFile;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn analysis_field_is_the_text() {
        let text = parse_analysis_response(r#"{ "analysis": "Experience\n- Strong" }"#)
            .expect("analysis present");
        assert_eq!(text, "Experience\n- Strong");
    }

    #[test]
    fn error_field_becomes_a_service_error() {
        match parse_analysis_response(r#"{ "error": "quota exceeded" }"#) {
            Err(ReportError::Service { status, message }) => {
                assert_eq!(status, None);
                assert_eq!(message, "quota exceeded");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            parse_analysis_response(r#"{ "analysis": "text", "error": "but also this" }"#),
            Err(ReportError::Service { .. })
        ));
    }

    #[test]
    fn missing_or_malformed_bodies_are_service_errors() {
        for body in ["{}", r#"{ "analysis": "" }"#, "<html>502</html>", ""] {
            assert!(
                matches!(parse_analysis_response(body), Err(ReportError::Service { .. })),
                "{body:?}"
            );
        }
        match parse_analysis_response("{}") {
            Err(err) => assert_eq!(err.to_string(), format!("analysis service error: {NO_ANALYSIS}")),
            Ok(text) => panic!("unexpected analysis {text:?}"),
        }
    }

    #[test]
    fn default_endpoint() {
        let config = ServiceConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, Duration::from_secs(120));
    }

    struct Counting {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AnalysisService for Counting {
        async fn submit(&self, request: &AnalysisRequest) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("Experience\n- analysed for {}", request.job_role))
        }
    }

    #[tokio::test]
    async fn analyze_skips_the_service_for_incomplete_requests() {
        let service = Counting {
            calls: AtomicUsize::new(0),
        };
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).expect("valid date");

        let missing = analyze(&service, &AnalysisRequest::default(), date).await;
        assert!(matches!(missing, Err(ReportError::MissingInput(_))));
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);

        let roleless = AnalysisRequest::new(ResumeFile::from_text("Rust, Go"));
        let missing = analyze(&service, &roleless, date).await;
        assert!(matches!(missing, Err(ReportError::MissingInput(_))));
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);

        let request =
            AnalysisRequest::new(ResumeFile::from_text("Rust, Go")).with_job_role("Cloud Engineer");
        let analysis = analyze(&service, &request, date).await.expect("analysed");
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
        assert_eq!(analysis.job_role, "Cloud Engineer");
        assert_eq!(analysis.text, "Experience\n- analysed for Cloud Engineer");
        assert_eq!(analysis.generated, date);
    }
}
