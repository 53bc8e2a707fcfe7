use regex::Regex;
use serde::{Deserialize, Serialize};

/// What a line of analysis text is, as far as layout is concerned
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LineClassification {
    SectionHeader,
    Bullet,
    Paragraph,
    Blank,
}

/// The words and markers that give analysis text its structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// A line starting with one of these (ignoring case) is a section header
    pub headers: Vec<String>,
    /// A line starting with one of these is a bullet
    pub bullet_markers: Vec<String>,
    /// Whether `1.`, `23.` and so on also start bullets
    pub numbered_bullets: bool,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Vocabulary {
            headers: ["Experience", "Weaknesses", "Suggestions", "Recommendations"]
                .into_iter()
                .map(String::from)
                .collect(),
            bullet_markers: vec!["•".to_string(), "-".to_string()],
            numbered_bullets: true,
        }
    }
}

/// Classifies lines against a [Vocabulary]. Classification only looks at the trimmed
/// line itself, so the same line always gets the same tag.
///
/// ```
/// use resume_report::layout::{Classifier, LineClassification, Vocabulary};
///
/// let classifier = Classifier::new(&Vocabulary::default()).expect("valid vocabulary");
/// assert_eq!(classifier.classify("Experience Summary"), LineClassification::SectionHeader);
/// assert_eq!(classifier.classify("My Experience"), LineClassification::Paragraph);
/// assert_eq!(classifier.classify("  2. Add metrics"), LineClassification::Bullet);
/// ```
#[derive(Debug, Clone)]
pub struct Classifier {
    headers: Option<Regex>,
    bullet_markers: Vec<String>,
    numbered: Option<Regex>,
}

impl Classifier {
    pub fn new(vocabulary: &Vocabulary) -> Result<Classifier, regex::Error> {
        let names: Vec<String> = vocabulary
            .headers
            .iter()
            .map(|header| header.trim())
            .filter(|header| !header.is_empty())
            .map(regex::escape)
            .collect();
        // an empty alternation would match every line
        let headers = if names.is_empty() {
            None
        } else {
            Some(Regex::new(&format!("(?i)^(?:{})", names.join("|")))?)
        };

        let numbered = if vocabulary.numbered_bullets {
            Some(Regex::new(r"^[0-9]+\.")?)
        } else {
            None
        };

        Ok(Classifier {
            headers,
            bullet_markers: vocabulary
                .bullet_markers
                .iter()
                .filter(|marker| !marker.is_empty())
                .cloned()
                .collect(),
            numbered,
        })
    }

    pub fn classify(&self, line: &str) -> LineClassification {
        let trimmed = line.trim();
        if self.is_section_header(trimmed) {
            LineClassification::SectionHeader
        } else if self.is_bullet(trimmed) {
            LineClassification::Bullet
        } else if trimmed.is_empty() {
            LineClassification::Blank
        } else {
            LineClassification::Paragraph
        }
    }

    fn is_section_header(&self, trimmed: &str) -> bool {
        self.headers
            .as_ref()
            .is_some_and(|headers| headers.is_match(trimmed))
    }

    fn is_bullet(&self, trimmed: &str) -> bool {
        self.bullet_markers
            .iter()
            .any(|marker| trimmed.starts_with(marker.as_str()))
            || self
                .numbered
                .as_ref()
                .is_some_and(|numbered| numbered.is_match(trimmed))
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::new(&Vocabulary::default()).expect("default vocabulary is a valid pattern")
    }
}
