use crate::{ReportError, Result};
use std::path::Path;

/// The job roles offered out of the box, in display order. [CUSTOM_ROLE] stands for a
/// free-text role.
pub const JOB_ROLES: [&str; 15] = [
    "Software Engineer",
    "Frontend Developer",
    "Backend Developer",
    "Full Stack Developer",
    "Data Scientist",
    "Machine Learning Engineer",
    "AI Engineer",
    "Product Manager",
    "UX/UI Designer",
    "DevOps Engineer",
    "Mobile App Developer",
    "Cloud Engineer",
    "Cybersecurity Analyst",
    "Business Analyst",
    CUSTOM_ROLE,
];

pub const CUSTOM_ROLE: &str = "Custom";

/// The role a report is for: the custom text when [CUSTOM_ROLE] is selected, otherwise
/// the selection itself
pub fn resolve_job_role(selected: &str, custom: &str) -> String {
    if selected == CUSTOM_ROLE {
        custom.trim().to_string()
    } else {
        selected.to_string()
    }
}

/// Résumé formats the analysis service accepts, by extension
const ACCEPTED: [(&str, &str); 4] = [
    ("pdf", "application/pdf"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("txt", "text/plain"),
];

/// A résumé as it is uploaded: its name, content type and raw bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    /// Read a résumé from disk. Only `.pdf`, `.doc`, `.docx` and `.txt` files are accepted
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ResumeFile> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let mime = ACCEPTED
            .iter()
            .find(|(accepted, _)| *accepted == extension)
            .map(|(_, mime)| *mime)
            .ok_or_else(|| ReportError::UnsupportedResume(path.display().to_string()))?;

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("resume.{extension}"));
        let bytes = std::fs::read(path)?;
        log::debug!("read {} ({} bytes, {mime})", name, bytes.len());

        Ok(ResumeFile { name, mime, bytes })
    }

    /// Wrap pasted résumé text as a plain text upload
    pub fn from_text<S: Into<String>>(text: S) -> ResumeFile {
        ResumeFile {
            name: "resume.txt".to_string(),
            mime: "text/plain",
            bytes: text.into().into_bytes(),
        }
    }

    fn is_blank(&self) -> bool {
        match std::str::from_utf8(&self.bytes) {
            Ok(text) if self.mime == "text/plain" => text.trim().is_empty(),
            _ => self.bytes.is_empty(),
        }
    }
}

/// Everything sent to the analysis service in one go
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub resume: Option<ResumeFile>,
    pub job_role: String,
    pub job_description: String,
}

impl AnalysisRequest {
    pub fn new(resume: ResumeFile) -> AnalysisRequest {
        AnalysisRequest {
            resume: Some(resume),
            ..AnalysisRequest::default()
        }
    }

    pub fn with_job_role<S: Into<String>>(mut self, job_role: S) -> Self {
        self.job_role = job_role.into();
        self
    }

    pub fn with_job_description<S: Into<String>>(mut self, job_description: S) -> Self {
        self.job_description = job_description.into();
        self
    }

    /// Checks the request is worth sending, returning the résumé if so. A résumé and a job
    /// role are required; the job description may be left empty.
    pub fn validate(&self) -> Result<&ResumeFile> {
        let resume = match &self.resume {
            None => Err(ReportError::MissingInput(
                "upload a résumé file or paste its text".to_string(),
            )),
            Some(resume) if resume.is_blank() => Err(ReportError::MissingInput(format!(
                "résumé {} is empty",
                resume.name
            ))),
            Some(resume) => Ok(resume),
        }?;
        if self.job_role.trim().is_empty() {
            return Err(ReportError::MissingInput(
                "choose a job role, or enter one for Custom".to_string(),
            ));
        }
        Ok(resume)
    }
}
