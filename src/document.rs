use crate::{
    content::{font_resource_name, render_instructions},
    font::{EncodingPolicy, Font},
    info::Info,
    outline::Outline,
    page::Page,
    refs::{ObjectReferences, RefType},
    ReportError, Pt,
};
use id_arena::{Arena, Id};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Name, Pdf, Ref};
use std::io::Write;

/// A document stores laid out pages together with the fonts they are drawn with,
/// then renders everything out as a PDF with a call to [Document::write]
#[derive(Default)]
pub struct Document {
    pub info: Option<Info>,
    pub fonts: Arena<Font>,
    pub outline: Outline,
    /// Deflate page content streams
    pub compress: bool,
    /// How characters a font can't draw are handled while writing
    pub encoding: EncodingPolicy,
    pages: Vec<Page>,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a font to the document. Fonts are stored "globally" within the document so any
    /// page can draw with it through the returned id
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Append a page to the end of the document, returning its 0-based index
    pub fn add_page(&mut self, page: Page) -> usize {
        self.pages.push(page);
        self.pages.len() - 1
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Add a bookmark in the document outline pointing at a position on a page
    pub fn add_bookmark<S: ToString>(&mut self, title: S, page_index: usize, top: Pt) {
        self.outline.add_bookmark(title, page_index, top);
    }

    /// Render the whole document into memory and write it out. Nothing is resolved into
    /// PDF objects until this is called.
    pub fn write<W: Write>(&self, mut w: W) -> Result<(), ReportError> {
        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = &self.info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..self.pages.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs.iter().copied());

        for (id, font) in self.fonts.iter() {
            font.write(&mut refs, id, &mut writer);
        }

        for (page_index, page) in self.pages.iter().enumerate() {
            self.write_page(&mut refs, page_index, page, &mut writer)?;
        }

        let outlines_id = self.outline.write(&mut refs, &mut writer);

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        if let Some(outlines_id) = outlines_id {
            catalog.outlines(outlines_id);
        }
        catalog.finish();

        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }

    /// Convenience over [Document::write] that collects the PDF into a buffer
    pub fn to_bytes(&self) -> Result<Vec<u8>, ReportError> {
        let mut bytes = Vec::new();
        self.write(&mut bytes)?;
        Ok(bytes)
    }

    fn write_page(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        page: &Page,
        writer: &mut Pdf,
    ) -> Result<(), ReportError> {
        let rendered = render_instructions(page.instructions(), &self.fonts, self.encoding)?;

        let id = refs.get_or_gen(RefType::Page(page_index));
        let parent = refs.get_or_gen(RefType::PageTree);
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut pdf_page = writer.page(id);
        pdf_page.media_box(page.media_box.into());
        pdf_page.art_box(page.content_box.into());
        pdf_page.parent(parent);
        pdf_page.contents(content_id);

        let mut resources = pdf_page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, _) in self.fonts.iter() {
            let font_ref = refs.get_or_gen(RefType::Font(font_id.index()));
            let name = font_resource_name(font_id.index());
            resource_fonts.pair(Name(name.as_bytes()), font_ref);
        }
        resource_fonts.finish();
        resources.finish();
        pdf_page.finish();

        if self.compress {
            let compressed =
                compress_to_vec_zlib(&rendered, CompressionLevel::DefaultCompression as u8);
            writer
                .stream(content_id, &compressed)
                .filter(Filter::FlateDecode);
        } else {
            writer.stream(content_id, &rendered);
        }

        Ok(())
    }
}
