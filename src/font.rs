use crate::{
    refs::{ObjectReferences, RefType},
    RenderError, ReportError, Pt,
};
use id_arena::Id;
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One of the standard PDF fonts every reader ships with. These are never embedded, and
/// are always encoded with `WinAnsiEncoding`, so they can only draw Latin-1 text plus the
/// handful of typographic characters that encoding adds (bullets, dashes, curly quotes, ...)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuiltinFont {
    Helvetica,
    Courier,
}

impl BuiltinFont {
    pub fn base_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::Courier => "Courier",
        }
    }

    /// Advance width of a character, in 1/1000 em
    fn advance(&self, ch: char) -> u16 {
        match self {
            BuiltinFont::Courier => 600,
            BuiltinFont::Helvetica => {
                let code = ch as u32;
                if (0x20..=0x7e).contains(&code) {
                    return HELVETICA_ASCII_WIDTHS[(code - 0x20) as usize];
                }
                match ch {
                    '\u{a0}' => 278,
                    '•' => 350,
                    '‘' | '’' | '‚' => 222,
                    '“' | '”' | '„' => 333,
                    '–' => 556,
                    '—' | '…' | '‰' => 1000,
                    _ => 556,
                }
            }
        }
    }
}

/// Helvetica advance widths (1/1000 em) for ' ' through '~', from the standard AFM metrics
#[rustfmt::skip]
const HELVETICA_ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Map a character onto its `WinAnsiEncoding` byte, if it has one
fn winansi_byte(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        0x20..=0x7e | 0xa0..=0xff => Some(code as u8),
        _ => Some(match ch {
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8a,
            '‹' => 0x8b,
            'Œ' => 0x8c,
            'Ž' => 0x8e,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9a,
            '›' => 0x9b,
            'œ' => 0x9c,
            'ž' => 0x9e,
            'Ÿ' => 0x9f,
            _ => return None,
        }),
    }
}

/// What to do with characters a font has no way of drawing
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingPolicy {
    /// Draw a `?` in place of the character
    #[default]
    Replace,
    /// Fail rendering with [RenderError::Unencodable]
    Strict,
}

enum FontKind {
    Builtin(BuiltinFont),
    Embedded(OwnedFace),
}

/// A font that text runs can be drawn with. Builtin fonts cost nothing to include;
/// TTF / OTF fonts are embedded in their entirety in the generated PDF.
///
/// Fonts are referred to by their [Id] within a [Document](crate::Document), which is what
/// each [DrawInstruction](crate::DrawInstruction) carries.
pub struct Font {
    kind: FontKind,
}

impl Font {
    pub fn builtin(font: BuiltinFont) -> Font {
        Font {
            kind: FontKind::Builtin(font),
        }
    }

    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, ReportError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font {
            kind: FontKind::Embedded(face),
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Font, ReportError> {
        Font::load(std::fs::read(path)?)
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.kind, FontKind::Builtin(_))
    }

    /// The PostScript-ish name of the font, used for the `BaseFont` entry
    pub fn name(&self) -> String {
        match &self.kind {
            FontKind::Builtin(font) => font.base_name().to_string(),
            FontKind::Embedded(face) => face
                .as_face_ref()
                .names()
                .into_iter()
                .find(|name| {
                    name.name_id == owned_ttf_parser::name_id::POST_SCRIPT_NAME
                        && name.is_unicode()
                })
                .and_then(|name| name.to_string())
                .unwrap_or_else(|| "EmbeddedFont".to_string()),
        }
    }

    /// Calculate the width of a given string of text at the given font size. Characters
    /// the font has no glyph for are measured as the replacement they will be drawn as.
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        match &self.kind {
            FontKind::Builtin(font) => {
                let units: u32 = text.chars().map(|ch| font.advance(ch) as u32).sum();
                size * (units as f32 / 1000.0)
            }
            FontKind::Embedded(face) => {
                let face = face.as_face_ref();
                let scaling = size / face.units_per_em() as f32;
                text.chars()
                    .map(|ch| {
                        let gid = face
                            .glyph_index(ch)
                            .or_else(|| face.glyph_index('?'))
                            .unwrap_or(GlyphId(0));
                        scaling * face.glyph_hor_advance(gid).unwrap_or_default() as f32
                    })
                    .sum()
            }
        }
    }

    /// Encode text into the bytes a `Tj` operator expects for this font: single
    /// WinAnsi bytes for builtin fonts, big-endian glyph ids for embedded ones
    pub fn encode(&self, text: &str, policy: EncodingPolicy) -> Result<Vec<u8>, RenderError> {
        let mut out = Vec::with_capacity(text.len() * 2);
        for ch in text.chars() {
            match &self.kind {
                FontKind::Builtin(_) => match winansi_byte(ch) {
                    Some(byte) => out.push(byte),
                    None => {
                        self.unencodable(ch, policy)?;
                        out.push(b'?');
                    }
                },
                FontKind::Embedded(face) => {
                    let face = face.as_face_ref();
                    let gid = match face.glyph_index(ch) {
                        Some(gid) => gid,
                        None => {
                            self.unencodable(ch, policy)?;
                            face.glyph_index('?').unwrap_or(GlyphId(0))
                        }
                    };
                    out.extend_from_slice(&gid.0.to_be_bytes());
                }
            }
        }
        Ok(out)
    }

    fn unencodable(&self, ch: char, policy: EncodingPolicy) -> Result<(), RenderError> {
        match policy {
            EncodingPolicy::Strict => Err(RenderError::Unencodable {
                ch,
                font: self.name(),
            }),
            EncodingPolicy::Replace => {
                log::warn!("font {} cannot draw {ch:?}, substituting '?'", self.name());
                Ok(())
            }
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_index = id.index();
        let font_ref = refs.gen(RefType::Font(font_index));
        match &self.kind {
            FontKind::Builtin(font) => {
                writer
                    .type1_font(font_ref)
                    .base_font(Name(font.base_name().as_bytes()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
            }
            FontKind::Embedded(face) => {
                let glyphs = glyph_chars(face);
                let cid_ref = self.write_cid(refs, font_index, face, &glyphs, writer);
                let to_unicode_ref = write_to_unicode(refs, font_index, &glyphs, writer);

                let base_font = self.name();
                let mut font = writer.type0_font(font_ref);
                font.base_font(Name(base_font.as_bytes()));
                font.encoding_predefined(Name(b"Identity-H"));
                font.descendant_font(cid_ref);
                font.to_unicode(to_unicode_ref);
            }
        }
    }

    fn write_cid(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        face: &OwnedFace,
        glyphs: &BTreeMap<u16, char>,
        writer: &mut Pdf,
    ) -> Ref {
        let face_ref = face.as_face_ref();
        let scaling = 1000.0 / face_ref.units_per_em() as f32;
        let base_font = self.name();

        // font program
        let data_ref = refs.gen(RefType::FontData(font_index));
        writer
            .stream(data_ref, face.as_slice())
            .pair(Name(b"Length1"), face.as_slice().len() as i32);

        // descriptor
        let descriptor_ref = refs.gen(RefType::FontDescriptor(font_index));
        let global_bbox = face_ref.global_bounding_box();
        let mut flags = FontFlags::NON_SYMBOLIC;
        if face_ref.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face_ref.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }
        let mut descriptor = writer.font_descriptor(descriptor_ref);
        descriptor.name(Name(base_font.as_bytes()));
        descriptor.flags(flags);
        descriptor.bbox(pdf_writer::Rect {
            x1: global_bbox.x_min as f32 * scaling,
            y1: global_bbox.y_min as f32 * scaling,
            x2: global_bbox.x_max as f32 * scaling,
            y2: global_bbox.y_max as f32 * scaling,
        });
        descriptor.italic_angle(face_ref.italic_angle());
        descriptor.ascent(face_ref.ascender() as f32 * scaling);
        descriptor.descent(face_ref.descender() as f32 * scaling);
        descriptor.cap_height(
            face_ref
                .capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(face_ref.ascender() as f32 * scaling),
        );
        // not recorded in TrueType fonts; 80 is what most writers fall back on
        descriptor.stem_v(80.0);
        descriptor.font_file2(data_ref);
        descriptor.finish();

        // the CID font itself, with widths grouped into runs of consecutive glyph ids
        let cid_ref = refs.gen(RefType::CidFont(font_index));
        let mut cid_font = writer.cid_font(cid_ref);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(base_font.as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_ref);
        cid_font.default_width(1000.0);

        let mut widths = cid_font.widths();
        let mut run_start: Option<u16> = None;
        let mut run: Vec<f32> = Vec::new();
        for &gid in glyphs.keys() {
            let width =
                face_ref.glyph_hor_advance(GlyphId(gid)).unwrap_or_default() as f32 * scaling;
            match run_start {
                Some(start) if start as usize + run.len() == gid as usize => run.push(width),
                Some(start) => {
                    widths.consecutive(start, run.drain(..));
                    run_start = Some(gid);
                    run.push(width);
                }
                None => {
                    run_start = Some(gid);
                    run.push(width);
                }
            }
        }
        if let Some(start) = run_start {
            widths.consecutive(start, run.drain(..));
        }
        widths.finish();
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        cid_ref
    }
}

/// Every glyph reachable from a unicode cmap subtable, with the first character mapping to it
fn glyph_chars(face: &OwnedFace) -> BTreeMap<u16, char> {
    let mut map: BTreeMap<u16, char> = BTreeMap::new();
    let Some(cmap) = face.as_face_ref().tables().cmap else {
        return map;
    };

    for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
        subtable.codepoints(|codepoint| {
            if let Ok(ch) = char::try_from(codepoint) {
                if let Some(gid) = subtable.glyph_index(codepoint).filter(|gid| gid.0 > 0) {
                    map.entry(gid.0).or_insert(ch);
                }
            }
        });
    }

    map
}

/// Writes the CMap that lets readers copy text back out of glyph ids. Blocks are capped at
/// 100 entries and never straddle a change in the high byte.
fn write_to_unicode(
    refs: &mut ObjectReferences,
    font_index: usize,
    glyphs: &BTreeMap<u16, char>,
    writer: &mut Pdf,
) -> Ref {
    let id = refs.gen(RefType::ToUnicode(font_index));

    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );

    let entries: Vec<(u16, char)> = glyphs.iter().map(|(&gid, &ch)| (gid, ch)).collect();
    for block in entries.chunk_by(|a, b| a.0 >> 8 == b.0 >> 8) {
        for chunk in block.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
            for (gid, ch) in chunk {
                let mut utf16 = [0u16; 2];
                let hex: String = ch
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04x}"))
                    .collect();
                cmap.push_str(&format!("<{gid:04x}> <{hex}>\n"));
            }
            cmap.push_str("endbfchar\n");
        }
    }
    cmap.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
        cmap.as_bytes(),
        miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
    );
    writer
        .stream(id, compressed.as_slice())
        .filter(Filter::FlateDecode);

    id
}
