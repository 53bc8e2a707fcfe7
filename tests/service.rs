#![cfg(feature = "service")]

use async_trait::async_trait;
use chrono::NaiveDate;
use resume_report::service::{analyze, AnalysisService, HttpAnalysisService, ServiceConfig};
use resume_report::{
    build_report, resolve_job_role, AnalysisRequest, ReportConfig, ReportError, Result,
    ResumeFile, CUSTOM_ROLE,
};
use std::sync::Mutex;

/// Answers every request with a canned reply, remembering what it was sent
struct CannedService {
    reply: std::result::Result<String, String>,
    seen: Mutex<Vec<(String, String, String)>>,
}

impl CannedService {
    fn answering(text: &str) -> CannedService {
        CannedService {
            reply: Ok(text.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn failing(message: &str) -> CannedService {
        CannedService {
            reply: Err(message.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AnalysisService for CannedService {
    async fn submit(&self, request: &AnalysisRequest) -> Result<String> {
        let resume = request.resume.as_ref().map(|r| r.name.clone()).unwrap_or_default();
        self.seen.lock().expect("not poisoned").push((
            resume,
            request.job_role.clone(),
            request.job_description.clone(),
        ));
        self.reply.clone().map_err(|message| ReportError::Service {
            status: Some(500),
            message,
        })
    }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
}

#[tokio::test]
async fn analysis_flows_into_a_report() {
    let service = CannedService::answering(
        "Experience\n- Led a team of 5\nWeaknesses\nTime management could improve.",
    );
    let request = AnalysisRequest::new(ResumeFile::from_text("Jane Doe, Rust engineer"))
        .with_job_role(resolve_job_role(CUSTOM_ROLE, "Compiler Engineer"))
        .with_job_description("Work on the borrow checker");

    let analysis = analyze(&service, &request, date()).await.expect("analysed");
    let report = build_report(&analysis, &ReportConfig::default()).expect("report builds");

    assert_eq!(report.filename, "Compiler_Engineer.pdf");
    assert_eq!(report.outline().entries().len(), 2);
    assert_eq!(
        report.pages()[0].instructions()[1].text,
        "Job Role: Compiler Engineer"
    );
    assert_eq!(
        service.seen.lock().expect("not poisoned").as_slice(),
        &[(
            "resume.txt".to_string(),
            "Compiler Engineer".to_string(),
            "Work on the borrow checker".to_string()
        )]
    );
}

#[tokio::test]
async fn service_failures_are_passed_through() {
    let service = CannedService::failing("model overloaded");
    let request = AnalysisRequest::new(ResumeFile::from_text("resume")).with_job_role("Product Manager");
    match analyze(&service, &request, date()).await {
        Err(ReportError::Service { status, message }) => {
            assert_eq!(status, Some(500));
            assert_eq!(message, "model overloaded");
        }
        other => panic!("unexpected {:?}", other.map(|a| a.text)),
    }
}

#[tokio::test]
async fn http_service_rejects_incomplete_requests_without_connecting() {
    // nothing listens here; validation must fail before a connection is attempted
    let config = ServiceConfig {
        endpoint: "http://127.0.0.1:9/analyze".to_string(),
        ..ServiceConfig::default()
    };
    let service = HttpAnalysisService::new(&config).expect("client builds");
    assert_eq!(service.endpoint(), "http://127.0.0.1:9/analyze");

    let result = service.submit(&AnalysisRequest::default()).await;
    assert!(matches!(result, Err(ReportError::MissingInput(_))));

    let no_role = AnalysisRequest::new(ResumeFile::from_text("Ten years of Rust"))
        .with_job_role(resolve_job_role(CUSTOM_ROLE, ""));
    let result = service.submit(&no_role).await;
    assert!(matches!(result, Err(ReportError::MissingInput(_))));
}
