use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, ReportError>;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum ReportError {
    /// No résumé (file or pasted text) was supplied before requesting an analysis
    #[error("missing input: {0}")]
    MissingInput(String),

    /// The résumé file is of a type the analysis service does not accept
    #[error("unsupported résumé file type: {0}")]
    UnsupportedResume(String),

    /// The analysis service failed or replied with something other than an analysis
    #[error("analysis service error{}: {message}", .status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    Service {
        status: Option<u16>,
        message: String,
    },

    /// A report was requested without any analysis text to lay out
    #[error("no analysis text available to build a report from")]
    EmptyReport,

    #[error(transparent)]
    /// The laid out report could not be rendered to PDF
    Render(#[from] RenderError),

    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FontParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// A header vocabulary produced an invalid pattern
    Pattern(#[from] regex::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The configured date format contains an unknown specifier
    #[error("invalid date format {0:?}")]
    DateFormat(String),

    #[cfg(feature = "service")]
    #[error(transparent)]
    /// The HTTP request to the analysis service could not be completed
    Http(#[from] reqwest::Error),
}

impl ReportError {
    pub(crate) fn service<S: ToString>(status: Option<u16>, message: S) -> ReportError {
        ReportError::Service {
            status,
            message: message.to_string(),
        }
    }
}

/// Failures while turning laid out pages into PDF bytes
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A character has no representation in the font it is drawn with
    #[error("character {ch:?} cannot be encoded with font {font}")]
    Unencodable { ch: char, font: String },

    /// A draw instruction refers to a font that was never added to the document
    #[error("draw instruction refers to font #{0}, which is not in the document")]
    MissingFont(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_mention_status_when_known() {
        let err = ReportError::service(Some(502), "Failed to analyze resume");
        assert_eq!(
            err.to_string(),
            "analysis service error (status 502): Failed to analyze resume"
        );
        let err = ReportError::service(None, "No analysis returned.");
        assert_eq!(err.to_string(), "analysis service error: No analysis returned.");
    }
}
