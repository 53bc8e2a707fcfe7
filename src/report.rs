use crate::{
    document::Document,
    font::{BuiltinFont, EncodingPolicy, Font},
    info::Info,
    layout::{
        draw_footer, draw_header, layout_body, BodyContext, Classifier, Geometry, HeaderMeta,
        OverflowPolicy, Styles, Typesetter, Vocabulary, WrapBudget, TRUNCATION_NOTICE,
    },
    outline::Outline,
    page::Page,
    ReportError, Result,
};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Filename used when no job role was given
pub const DEFAULT_FILENAME: &str = "resume-analysis.pdf";

/// A finished analysis, ready to be laid out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisDocument {
    /// The analysis text, one logical line per `\n`
    pub text: String,
    /// The job role the résumé was analysed for. May be empty
    pub job_role: String,
    /// The date printed in the header
    pub generated: NaiveDate,
}

impl AnalysisDocument {
    pub fn new<T: Into<String>, R: Into<String>>(
        text: T,
        job_role: R,
        generated: NaiveDate,
    ) -> AnalysisDocument {
        AnalysisDocument {
            text: text.into(),
            job_role: job_role.into(),
            generated,
        }
    }
}

/// Where the report's font comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontChoice {
    Builtin(BuiltinFont),
    /// A TrueType / OpenType file, embedded into the PDF
    File(PathBuf),
}

impl Default for FontChoice {
    fn default() -> Self {
        FontChoice::Builtin(BuiltinFont::Helvetica)
    }
}

impl FontChoice {
    pub fn load(&self) -> Result<Font> {
        match self {
            FontChoice::Builtin(font) => Ok(Font::builtin(*font)),
            FontChoice::File(path) => Font::from_file(path),
        }
    }
}

/// Everything that shapes a report. The default reproduces the reference report:
/// a single 600 × 800 page, Helvetica, paragraphs wrapped at 90 characters and the body
/// truncated once it runs low on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub geometry: Geometry,
    pub styles: Styles,
    pub vocabulary: Vocabulary,
    pub wrap: WrapBudget,
    pub overflow: OverflowPolicy,
    pub encoding: EncodingPolicy,
    pub font: FontChoice,
    pub title: String,
    pub footer: String,
    pub notice: String,
    /// A chrono `strftime` format for the header date
    pub date_format: String,
    /// Deflate page content streams
    pub compress: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            geometry: Geometry::default(),
            styles: Styles::default(),
            vocabulary: Vocabulary::default(),
            wrap: WrapBudget::default(),
            overflow: OverflowPolicy::default(),
            encoding: EncodingPolicy::default(),
            font: FontChoice::default(),
            title: "AI Resume Analysis Report".to_string(),
            footer: "Powered by AI Resume Reviewer".to_string(),
            notice: TRUNCATION_NOTICE.to_string(),
            date_format: "%-m/%-d/%Y".to_string(),
            compress: true,
        }
    }
}

impl ReportConfig {
    /// Parse a configuration from JSON. Missing fields take their default values
    pub fn from_json_str(json: &str) -> Result<ReportConfig> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<ReportConfig> {
        let json = std::fs::read_to_string(path)?;
        ReportConfig::from_json_str(&json)
    }

    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn with_wrap(mut self, wrap: WrapBudget) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn with_encoding(mut self, encoding: EncodingPolicy) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_font(mut self, font: FontChoice) -> Self {
        self.font = font;
        self
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_date_format<S: Into<String>>(mut self, date_format: S) -> Self {
        self.date_format = date_format.into();
        self
    }

    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

/// A laid out report, ready to be written as a PDF
pub struct Report {
    /// Suggested filename, derived from the job role
    pub filename: String,
    /// Whether some of the analysis was left out for lack of room
    pub truncated: bool,
    document: Document,
}

impl Report {
    pub fn pages(&self) -> &[Page] {
        self.document.pages()
    }

    pub fn outline(&self) -> &Outline {
        &self.document.outline
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn write<W: Write>(&self, w: W) -> Result<()> {
        self.document.write(w).inspect_err(|err| {
            log::error!("failed to render {}: {err}", self.filename);
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.write(&mut bytes)?;
        Ok(bytes)
    }

    /// Write the PDF to `path`, creating or truncating the file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        self.write(&mut w)?;
        w.flush()?;
        Ok(())
    }
}

/// The filename a report for `job_role` is saved under: every character outside
/// `[A-Za-z0-9]` becomes `_`, one per UTF-16 code unit, so characters beyond the
/// Basic Multilingual Plane (most emoji) become `__`.
///
/// ```
/// use resume_report::report_filename;
///
/// assert_eq!(report_filename("Full Stack Developer!!"), "Full_Stack_Developer__.pdf");
/// assert_eq!(report_filename(""), "resume-analysis.pdf");
/// ```
pub fn report_filename(job_role: &str) -> String {
    if job_role.is_empty() {
        return DEFAULT_FILENAME.to_string();
    }
    let mut stem = String::with_capacity(job_role.len());
    for ch in job_role.chars() {
        if ch.is_ascii_alphanumeric() {
            stem.push(ch);
        } else {
            stem.extend(std::iter::repeat('_').take(ch.len_utf16()));
        }
    }
    format!("{stem}.pdf")
}

fn format_date(date: NaiveDate, format: &str) -> Result<String> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ReportError::DateFormat(format.to_string()));
    }
    // time and zone specifiers parse fine but fail when a bare date is formatted
    let mut formatted = String::new();
    write!(formatted, "{}", date.format(format))
        .map_err(|_| ReportError::DateFormat(format.to_string()))?;
    Ok(formatted)
}

/// Lays out an analysis as a report: header, classified body and footer, plus one outline
/// entry per section. Fails with [ReportError::EmptyReport] when there is no text.
pub fn build_report(analysis: &AnalysisDocument, config: &ReportConfig) -> Result<Report> {
    if analysis.text.trim().is_empty() {
        return Err(ReportError::EmptyReport);
    }

    let classifier = Classifier::new(&config.vocabulary)?;
    let date = format_date(analysis.generated, &config.date_format)?;

    let mut document = Document::default();
    document.compress = config.compress;
    document.encoding = config.encoding;
    let font_id = document.add_font(config.font.load()?);

    let geometry = &config.geometry;
    let (pages, outcome) = {
        let typesetter = Typesetter::new(geometry, &config.styles, font_id, &document.fonts[font_id]);
        let mut pages = vec![Page::new(geometry.page_size, Some(geometry.margins.clone()))];

        let meta = HeaderMeta {
            title: &config.title,
            job_role: &analysis.job_role,
            date: &date,
        };
        let body_start = draw_header(&mut pages[0], geometry.top(), &meta, &typesetter);

        let context = BodyContext::new(typesetter)
            .with_classifier(classifier)
            .with_wrap(config.wrap)
            .with_overflow(config.overflow)
            .with_notice(config.notice.as_str());
        let outcome = layout_body(&mut pages, analysis.text.split('\n'), body_start, &context);

        draw_footer(
            &mut pages[outcome.cursor.page],
            outcome.cursor.y,
            &config.footer,
            &typesetter,
        );
        (pages, outcome)
    };

    for page in pages {
        document.add_page(page);
    }
    // bookmarks land at the top of the heading, not its baseline
    for section in &outcome.sections {
        document.add_bookmark(
            &section.title,
            section.page_index,
            section.y + config.styles.section.size,
        );
    }

    let mut info = Info::new();
    info.title(&config.title);
    if !analysis.job_role.is_empty() {
        info.subject(&analysis.job_role);
    }
    document.set_info(info);

    let filename = report_filename(&analysis.job_role);
    log::info!(
        "built {filename}: {} page(s), {} section(s), truncated: {}",
        document.pages().len(),
        outcome.sections.len(),
        outcome.truncated
    );

    Ok(Report {
        filename,
        truncated: outcome.truncated,
        document,
    })
}
