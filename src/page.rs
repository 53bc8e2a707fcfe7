use crate::colour::Colour;
use crate::font::Font;
use crate::layout::Margins;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Pt;
use id_arena::Id;

/// Which font, at which size, a run of text is drawn with
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A single run of text placed on a page. Instructions are produced by layout and
/// never changed afterwards; `coords` is the baseline origin, measured from the
/// bottom-left corner of the page.
#[derive(Clone, PartialEq, Debug)]
pub struct DrawInstruction {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

/// A fixed-size page holding the text drawn onto it, in drawing order
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    instructions: Vec<DrawInstruction>,
}

impl Page {
    /// Create a new page of the given size. If margins are not given, the content box
    /// covers the whole page
    pub fn new(size: PageSize, margins: Option<Margins>) -> Page {
        let (width, height) = size;
        let margins = margins.unwrap_or_else(Margins::empty);
        Page {
            media_box: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: width,
                y2: height,
            },
            content_box: Rect {
                x1: margins.left,
                y1: margins.bottom,
                x2: width - margins.right,
                y2: height - margins.top,
            },
            instructions: Vec::default(),
        }
    }

    pub fn width(&self) -> Pt {
        self.media_box.width()
    }

    pub fn height(&self) -> Pt {
        self.media_box.height()
    }

    /// Append a run of text. Pages are append-only; earlier instructions are final
    pub fn push(&mut self, instruction: DrawInstruction) {
        debug_assert!(
            self.media_box.contains_y(instruction.coords.1),
            "instruction {:?} placed off the page",
            instruction.text
        );
        self.instructions.push(instruction);
    }

    pub fn instructions(&self) -> &[DrawInstruction] {
        &self.instructions
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize;

    #[test]
    fn content_box_is_inset_by_margins() {
        let page = Page::new(
            pagesize::REPORT,
            Some(Margins::trbl(Pt(50.0), Pt(40.0), Pt(30.0), Pt(20.0))),
        );
        assert_eq!(page.width(), Pt(600.0));
        assert_eq!(page.height(), Pt(800.0));
        assert_eq!(
            page.content_box,
            Rect {
                x1: Pt(20.0),
                y1: Pt(30.0),
                x2: Pt(560.0),
                y2: Pt(750.0),
            }
        );
        assert!(page.is_empty());
    }
}
