use crate::colour::{colours, Colour};
use crate::pagesize::{self, PageSize};
use crate::units::Pt;
use serde::{Deserialize, Serialize};

/// Margins are used when laying out text on a page. Layout keeps the left margin as its
/// indent and starts the header at the top margin; the bottom margin is where the
/// truncation notice goes. Margins also determine the `ArtBox` of each generated page.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins::trbl(value, value, value, value)
    }

    /// Create margins where all values are 0.0
    pub fn empty() -> Margins {
        Margins::all(Pt(0.0))
    }
}

/// Fixed positions and distances of the report page. The defaults are the reference
/// 600 × 800 layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    pub page_size: PageSize,
    pub margins: Margins,
    /// Bullets are drawn this far right of the left margin
    pub bullet_indent: Pt,
    /// Once the cursor drops below this height, no further line is started on the page
    pub truncate_below: Pt,
    /// Drop from the title baseline to where the body starts. The lines in between are
    /// spaced by the title and meta styles' advances
    pub header_height: Pt,
    /// Drop from the end of the body to the footer baseline
    pub footer_gap: Pt,
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry {
            page_size: pagesize::REPORT,
            margins: Margins::all(Pt(50.0)),
            bullet_indent: Pt(15.0),
            truncate_below: Pt(60.0),
            header_height: Pt(80.0),
            footer_gap: Pt(20.0),
        }
    }
}

impl Geometry {
    /// Baseline of the first line drawn on a fresh page
    pub fn top(&self) -> Pt {
        self.page_size.1 - self.margins.top
    }

    pub fn left(&self) -> Pt {
        self.margins.left
    }

    /// Horizontal room between the side margins
    pub fn text_width(&self) -> Pt {
        self.page_size.0 - self.margins.left - self.margins.right
    }
}

/// How far the cursor drops after a line of some category is drawn
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advance {
    /// A fixed distance
    Fixed(Pt),
    /// A multiple of the font size
    LineHeight(f32),
}

impl Advance {
    pub fn resolve(&self, size: Pt) -> Pt {
        match *self {
            Advance::Fixed(distance) => distance,
            Advance::LineHeight(factor) => size * factor,
        }
    }
}

/// Size, colour and spacing of one category of text
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub size: Pt,
    pub colour: Colour,
    pub advance: Advance,
}

impl TextStyle {
    pub const fn new(size: Pt, colour: Colour, advance: Advance) -> TextStyle {
        TextStyle {
            size,
            colour,
            advance,
        }
    }

    /// The distance to drop after drawing a line in this style
    pub fn line_advance(&self) -> Pt {
        self.advance.resolve(self.size)
    }
}

/// Text styles for every kind of line in a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Styles {
    pub title: TextStyle,
    pub meta: TextStyle,
    pub section: TextStyle,
    pub bullet: TextStyle,
    pub paragraph: TextStyle,
    pub footer: TextStyle,
    pub notice: TextStyle,
    /// Spacing left for an empty line
    pub blank_advance: Pt,
}

impl Default for Styles {
    fn default() -> Self {
        Styles {
            title: TextStyle::new(Pt(18.0), colours::ACCENT, Advance::Fixed(Pt(30.0))),
            meta: TextStyle::new(Pt(12.0), colours::BLACK, Advance::Fixed(Pt(20.0))),
            section: TextStyle::new(Pt(14.0), colours::CHARCOAL, Advance::Fixed(Pt(24.0))),
            bullet: TextStyle::new(Pt(11.0), colours::BLACK, Advance::Fixed(Pt(18.0))),
            paragraph: TextStyle::new(Pt(11.0), colours::BLACK, Advance::LineHeight(1.4)),
            footer: TextStyle::new(Pt(10.0), colours::MUTED, Advance::Fixed(Pt(0.0))),
            notice: TextStyle::new(Pt(10.0), colours::RED, Advance::Fixed(Pt(0.0))),
            blank_advance: Pt(12.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_geometry() {
        let geometry = Geometry::default();
        assert_eq!(geometry.top(), Pt(750.0));
        assert_eq!(geometry.left(), Pt(50.0));
        assert_eq!(geometry.left() + geometry.bullet_indent, Pt(65.0));
        assert_eq!(geometry.text_width(), Pt(500.0));
    }

    #[test]
    fn paragraph_lines_advance_by_font_size() {
        let styles = Styles::default();
        assert_eq!(styles.paragraph.line_advance(), Pt(11.0) * 1.4);
        assert_eq!(styles.section.line_advance(), Pt(24.0));
        assert_eq!(styles.bullet.line_advance(), Pt(18.0));
    }

    #[test]
    fn partial_geometry_fills_in_defaults() {
        let geometry: Geometry =
            serde_json::from_str(r#"{ "truncate_below": 80.0 }"#).expect("parses");
        assert_eq!(geometry.truncate_below, Pt(80.0));
        assert_eq!(geometry.page_size, pagesize::REPORT);
    }
}
