//! Turns a page's draw instructions into a PDF content stream.

use crate::colour::Colour;
use crate::font::{EncodingPolicy, Font};
use crate::page::{DrawInstruction, SpanFont};
use crate::RenderError;
use id_arena::Arena;
use pdf_writer::{Content, Name, Str};

/// Resource name a font is registered under on every page
pub(crate) fn font_resource_name(index: usize) -> String {
    format!("F{index}")
}

/// Renders draw instructions to a content stream. Font and colour state is only
/// re-emitted when it changes between consecutive runs.
pub(crate) fn render_instructions(
    instructions: &[DrawInstruction],
    fonts: &Arena<Font>,
    policy: EncodingPolicy,
) -> Result<Vec<u8>, RenderError> {
    let mut content = Content::new();
    if instructions.is_empty() {
        return Ok(content.finish().to_vec());
    }

    content.save_state();
    let mut current_font: Option<SpanFont> = None;
    let mut current_colour: Option<Colour> = None;

    for instruction in instructions.iter() {
        let font = fonts
            .get(instruction.font.id)
            .ok_or(RenderError::MissingFont(instruction.font.id.index()))?;
        let encoded = font.encode(&instruction.text, policy)?;

        if current_colour != Some(instruction.colour) {
            set_fill(&mut content, instruction.colour);
            current_colour = Some(instruction.colour);
        }

        content.begin_text();
        if current_font != Some(instruction.font) {
            let name = font_resource_name(instruction.font.id.index());
            content.set_font(Name(name.as_bytes()), *instruction.font.size);
            current_font = Some(instruction.font);
        }
        content.next_line(*instruction.coords.0, *instruction.coords.1);
        content.show(Str(&encoded));
        content.end_text();
    }

    content.restore_state();
    Ok(content.finish().to_vec())
}

fn set_fill(content: &mut Content, colour: Colour) {
    match colour {
        Colour::RGB { r, g, b } => content.set_fill_rgb(r, g, b),
        Colour::CMYK { c, m, y, k } => content.set_fill_cmyk(c, m, y, k),
        Colour::Grey { g } => content.set_fill_gray(g),
    };
}
