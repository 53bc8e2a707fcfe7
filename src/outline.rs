use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use pdf_writer::{Finish, Pdf, TextStr};

/// The document outline ("bookmarks"), kept flat: one entry per report section
#[derive(Default, Debug)]
pub struct Outline {
    entries: Vec<OutlineEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    pub title: String,
    /// 0-based index of the page the entry jumps to
    pub page_index: usize,
    /// Vertical position on that page to scroll to
    pub top: Pt,
}

impl Outline {
    pub fn add_bookmark<S: ToString>(&mut self, title: S, page_index: usize, top: Pt) {
        self.entries.push(OutlineEntry {
            title: title.to_string(),
            page_index,
            top,
        });
    }

    pub fn entries(&self) -> &[OutlineEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes the outline root and its items. Page objects must already have ids allocated.
    /// Returns [None] when there is nothing to write
    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        writer: &mut Pdf,
    ) -> Option<pdf_writer::Ref> {
        // bookmarks can only point at pages that were actually written
        let entries: Vec<(&OutlineEntry, pdf_writer::Ref)> = self
            .entries
            .iter()
            .filter_map(|entry| match refs.get(RefType::Page(entry.page_index)) {
                Some(page_id) => Some((entry, page_id)),
                None => {
                    log::warn!(
                        "bookmark {:?} points at missing page {}",
                        entry.title,
                        entry.page_index
                    );
                    None
                }
            })
            .collect();
        if entries.is_empty() {
            return None;
        }

        let outlines_id = refs.gen(RefType::Outlines);
        let item_ids: Vec<pdf_writer::Ref> = (0..entries.len())
            .map(|i| refs.gen(RefType::OutlineEntry(i)))
            .collect();

        let mut outline = writer.outline(outlines_id);
        outline.first(item_ids[0]);
        outline.last(item_ids[item_ids.len() - 1]);
        outline.count(item_ids.len() as i32);
        outline.finish();

        for (i, (entry, page_id)) in entries.into_iter().enumerate() {
            let mut item = writer.outline_item(item_ids[i]);
            item.parent(outlines_id);
            item.title(TextStr(entry.title.as_str()));
            if i > 0 {
                item.prev(item_ids[i - 1]);
            }
            if i + 1 < item_ids.len() {
                item.next(item_ids[i + 1]);
            }
            item.dest().page(page_id).xyz(0.0, *entry.top, None);
        }

        Some(outlines_id)
    }
}
