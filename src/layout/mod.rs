//! The report layout engine.
//!
//! Analysis text carries no markup beyond line breaks, so structure is inferred line
//! by line: [classify] tags each line, [wrap] breaks paragraphs into lines, [body]
//! places everything on pages and [frame] draws the header and footer around it.
//! Layout only produces [DrawInstruction]s; turning them into PDF content happens
//! later, when the [Document](crate::Document) is written.
//!
//! # Example
//!
//! ```
//! use resume_report::layout::{
//!     draw_header, layout_body, BodyContext, Geometry, HeaderMeta, Styles, Typesetter,
//! };
//! use resume_report::{BuiltinFont, Document, Font, Page};
//!
//! let mut doc = Document::default();
//! let font_id = doc.add_font(Font::builtin(BuiltinFont::Helvetica));
//! let geometry = Geometry::default();
//! let styles = Styles::default();
//! let typesetter = Typesetter::new(&geometry, &styles, font_id, &doc.fonts[font_id]);
//!
//! let mut pages = vec![Page::new(geometry.page_size, Some(geometry.margins.clone()))];
//! let meta = HeaderMeta {
//!     title: "AI Resume Analysis Report",
//!     job_role: "Software Engineer",
//!     date: "3/14/2025",
//! };
//! let body_start = draw_header(&mut pages[0], geometry.top(), &meta, &typesetter);
//!
//! let context = BodyContext::new(typesetter);
//! let outcome = layout_body(&mut pages, "Experience\n- Led a team of 5".lines(), body_start, &context);
//! assert!(!outcome.truncated);
//! assert_eq!(pages[0].instructions().len(), 5);
//! ```

pub mod body;
pub mod classify;
pub mod frame;
pub mod geometry;
pub mod wrap;

pub use body::*;
pub use classify::*;
pub use frame::*;
pub use geometry::*;
pub use wrap::*;

use crate::font::Font;
use crate::page::{DrawInstruction, SpanFont};
use crate::units::Pt;
use id_arena::Id;

/// Everything needed to turn a string into a positioned [DrawInstruction]: where things
/// go, how they look, and the font they are drawn with
#[derive(Copy, Clone)]
pub struct Typesetter<'a> {
    pub geometry: &'a Geometry,
    pub styles: &'a Styles,
    pub font_id: Id<Font>,
    pub font: &'a Font,
}

impl<'a> Typesetter<'a> {
    pub fn new(
        geometry: &'a Geometry,
        styles: &'a Styles,
        font_id: Id<Font>,
        font: &'a Font,
    ) -> Typesetter<'a> {
        Typesetter {
            geometry,
            styles,
            font_id,
            font,
        }
    }

    pub fn run<S: Into<String>>(&self, text: S, x: Pt, y: Pt, style: &TextStyle) -> DrawInstruction {
        DrawInstruction {
            text: text.into(),
            font: SpanFont {
                id: self.font_id,
                size: style.size,
            },
            colour: style.colour,
            coords: (x, y),
        }
    }
}
