use super::classify::{Classifier, LineClassification};
use super::wrap::{wrap_with, CharCount, FontWidth};
use super::Typesetter;
use crate::page::Page;
use crate::units::Pt;
use serde::{Deserialize, Serialize};

/// The notice drawn in place of text that didn't fit
pub const TRUNCATION_NOTICE: &str = "Content truncated due to page limit.";

/// What happens when the cursor runs past the bottom of a page
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Draw a truncation notice and drop the rest of the text, keeping to one page
    #[default]
    Truncate,
    /// Carry on at the top of a new page
    NewPage,
}

/// How wide a paragraph line may get before it wraps
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapBudget {
    /// At most this many characters per line, regardless of the glyphs involved
    Characters(usize),
    /// As many words as fit between the side margins, measured with the font's metrics
    Measured,
}

impl Default for WrapBudget {
    fn default() -> Self {
        WrapBudget::Characters(90)
    }
}

/// Layout-time position: the baseline for the next line, and the page it goes on.
/// Only lives for the duration of one [layout_body] call.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayoutCursor {
    pub y: Pt,
    pub page: usize,
}

/// A section header that was placed, for building the document outline
#[derive(Debug, Clone, PartialEq)]
pub struct SectionMark {
    pub title: String,
    pub page_index: usize,
    pub y: Pt,
}

/// Where body layout stopped and what it placed along the way
#[derive(Debug, Clone, PartialEq)]
pub struct BodyOutcome {
    pub cursor: LayoutCursor,
    /// Whether lines were dropped because they didn't fit
    pub truncated: bool,
    pub sections: Vec<SectionMark>,
}

/// The settings body layout runs with
#[derive(Clone)]
pub struct BodyContext<'a> {
    pub typesetter: Typesetter<'a>,
    pub classifier: Classifier,
    pub wrap: WrapBudget,
    pub overflow: OverflowPolicy,
    pub notice: String,
}

impl<'a> BodyContext<'a> {
    /// A context with the default vocabulary, a 90 character wrap, and truncation
    pub fn new(typesetter: Typesetter<'a>) -> BodyContext<'a> {
        BodyContext {
            typesetter,
            classifier: Classifier::default(),
            wrap: WrapBudget::default(),
            overflow: OverflowPolicy::default(),
            notice: TRUNCATION_NOTICE.to_string(),
        }
    }

    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_wrap(mut self, wrap: WrapBudget) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn with_notice<S: Into<String>>(mut self, notice: S) -> Self {
        self.notice = notice.into();
        self
    }

    fn wrapped<'t>(&self, text: &'t str) -> Box<dyn Iterator<Item = String> + 't>
    where
        'a: 't,
    {
        match self.wrap {
            WrapBudget::Characters(max_chars) => {
                Box::new(wrap_with(text, max_chars as f32, CharCount))
            }
            WrapBudget::Measured => {
                let measure = FontWidth {
                    font: self.typesetter.font,
                    size: self.typesetter.styles.paragraph.size,
                };
                Box::new(wrap_with(
                    text,
                    *self.typesetter.geometry.text_width(),
                    measure,
                ))
            }
        }
    }

    /// Makes sure the cursor is high enough on its page to start another line. Returns
    /// `false` when layout has to stop, after drawing the truncation notice.
    fn make_room(&self, pages: &mut Vec<Page>, cursor: &mut LayoutCursor) -> bool {
        let geometry = self.typesetter.geometry;
        if cursor.y >= geometry.truncate_below {
            return true;
        }

        match self.overflow {
            OverflowPolicy::Truncate => {
                log::warn!(
                    "analysis text does not fit on page {}, truncating",
                    cursor.page + 1
                );
                let notice = self.typesetter.run(
                    self.notice.as_str(),
                    geometry.left(),
                    geometry.margins.bottom,
                    &self.typesetter.styles.notice,
                );
                pages[cursor.page].push(notice);
                false
            }
            OverflowPolicy::NewPage => {
                pages.push(Page::new(geometry.page_size, Some(geometry.margins.clone())));
                cursor.page = pages.len() - 1;
                cursor.y = geometry.top();
                log::debug!("continuing body on page {}", cursor.page + 1);
                true
            }
        }
    }
}

/// Lays out lines of analysis text onto `pages`, starting at `start_y` on the last page
/// (which usually already holds the report header). Each line is classified and drawn
/// according to its category; before every line is started the cursor is checked
/// against [Geometry::truncate_below](super::Geometry) and the context's
/// [OverflowPolicy] decides what happens when it has run too low.
pub fn layout_body<'l, I>(
    pages: &mut Vec<Page>,
    lines: I,
    start_y: Pt,
    context: &BodyContext,
) -> BodyOutcome
where
    I: IntoIterator<Item = &'l str>,
{
    let typesetter = &context.typesetter;
    let geometry = typesetter.geometry;
    let styles = typesetter.styles;

    if pages.is_empty() {
        pages.push(Page::new(geometry.page_size, Some(geometry.margins.clone())));
    }
    let mut cursor = LayoutCursor {
        y: start_y,
        page: pages.len() - 1,
    };
    let mut sections = Vec::new();
    let mut truncated = false;

    'lines: for line in lines {
        if !context.make_room(pages, &mut cursor) {
            truncated = true;
            break;
        }

        let class = context.classifier.classify(line);
        log::trace!("{class:?}: {line:?}");
        match class {
            LineClassification::SectionHeader => {
                let title = line.replacen(':', "", 1).trim().to_string();
                sections.push(SectionMark {
                    title: title.clone(),
                    page_index: cursor.page,
                    y: cursor.y,
                });
                let run = typesetter.run(title, geometry.left(), cursor.y, &styles.section);
                pages[cursor.page].push(run);
                cursor.y -= styles.section.line_advance();
            }
            LineClassification::Bullet => {
                let run = typesetter.run(
                    line.trim(),
                    geometry.left() + geometry.bullet_indent,
                    cursor.y,
                    &styles.bullet,
                );
                pages[cursor.page].push(run);
                cursor.y -= styles.bullet.line_advance();
            }
            LineClassification::Blank => {
                cursor.y -= styles.blank_advance;
            }
            LineClassification::Paragraph => {
                for (i, wrapped) in context.wrapped(line.trim()).enumerate() {
                    if i > 0 && !context.make_room(pages, &mut cursor) {
                        truncated = true;
                        break 'lines;
                    }
                    let run = typesetter.run(wrapped, geometry.left(), cursor.y, &styles.paragraph);
                    pages[cursor.page].push(run);
                    cursor.y -= styles.paragraph.line_advance();
                }
            }
        }
    }

    BodyOutcome {
        cursor,
        truncated,
        sections,
    }
}
