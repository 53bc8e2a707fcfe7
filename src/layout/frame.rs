use super::Typesetter;
use crate::page::Page;
use crate::units::Pt;

/// The text drawn in a report's header
#[derive(Debug, Copy, Clone)]
pub struct HeaderMeta<'a> {
    pub title: &'a str,
    pub job_role: &'a str,
    /// Already formatted for display
    pub date: &'a str,
}

/// Draws the title, job role and date lines with the title baseline at `top`, each line
/// dropping by its style's advance, and returns the height at which the body should start
pub fn draw_header(page: &mut Page, top: Pt, meta: &HeaderMeta, typesetter: &Typesetter) -> Pt {
    let geometry = typesetter.geometry;
    let styles = typesetter.styles;
    let x = geometry.left();

    page.push(typesetter.run(meta.title, x, top, &styles.title));

    let role_y = top - styles.title.line_advance();
    page.push(typesetter.run(
        format!("Job Role: {}", meta.job_role),
        x,
        role_y,
        &styles.meta,
    ));

    let date_y = role_y - styles.meta.line_advance();
    page.push(typesetter.run(format!("Date: {}", meta.date), x, date_y, &styles.meta));

    top - geometry.header_height
}

/// Draws the footer line a fixed gap below where the body ended, returning its baseline.
/// The footer is always drawn, whether or not the body was truncated.
pub fn draw_footer(page: &mut Page, body_end: Pt, text: &str, typesetter: &Typesetter) -> Pt {
    let y = body_end - typesetter.geometry.footer_gap;
    page.push(typesetter.run(
        text,
        typesetter.geometry.left(),
        y,
        &typesetter.styles.footer,
    ));
    y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colours;
    use crate::font::{BuiltinFont, Font};
    use crate::layout::{Advance, Geometry, Styles};
    use id_arena::Arena;

    #[test]
    fn header_and_footer_positions() {
        let mut fonts: Arena<Font> = Arena::new();
        let font_id = fonts.alloc(Font::builtin(BuiltinFont::Helvetica));
        let geometry = Geometry::default();
        let styles = Styles::default();
        let typesetter = Typesetter::new(&geometry, &styles, font_id, &fonts[font_id]);
        let mut page = Page::new(geometry.page_size, Some(geometry.margins.clone()));

        let meta = HeaderMeta {
            title: "AI Resume Analysis Report",
            job_role: "Data Scientist",
            date: "3/14/2025",
        };
        let body_start = draw_header(&mut page, geometry.top(), &meta, &typesetter);
        assert_eq!(body_start, Pt(670.0));

        let footer_y = draw_footer(&mut page, Pt(604.0), "Powered by AI Resume Reviewer", &typesetter);
        assert_eq!(footer_y, Pt(584.0));

        let runs = page.instructions();
        let placed: Vec<(&str, f32, f32)> = runs
            .iter()
            .map(|run| (run.text.as_str(), *run.coords.0, *run.coords.1))
            .collect();
        assert_eq!(
            placed,
            vec![
                ("AI Resume Analysis Report", 50.0, 750.0),
                ("Job Role: Data Scientist", 50.0, 720.0),
                ("Date: 3/14/2025", 50.0, 700.0),
                ("Powered by AI Resume Reviewer", 50.0, 584.0),
            ]
        );
        assert_eq!(runs[0].font.size, Pt(18.0));
        assert_eq!(runs[0].colour, colours::ACCENT);
        assert_eq!(runs[1].font.size, Pt(12.0));
        assert_eq!(runs[3].font.size, Pt(10.0));
        assert_eq!(runs[3].colour, colours::MUTED);
    }

    #[test]
    fn header_lines_follow_their_style_advances() {
        let mut fonts: Arena<Font> = Arena::new();
        let font_id = fonts.alloc(Font::builtin(BuiltinFont::Helvetica));
        let geometry = Geometry::default();
        let mut styles = Styles::default();
        styles.title.advance = Advance::Fixed(Pt(40.0));
        styles.meta.advance = Advance::LineHeight(1.5);
        let typesetter = Typesetter::new(&geometry, &styles, font_id, &fonts[font_id]);
        let mut page = Page::new(geometry.page_size, None);

        let meta = HeaderMeta {
            title: "Report",
            job_role: "AI Engineer",
            date: "1/2/2024",
        };
        let body_start = draw_header(&mut page, Pt(750.0), &meta, &typesetter);
        let ys: Vec<Pt> = page.instructions().iter().map(|run| run.coords.1).collect();
        assert_eq!(ys, vec![Pt(750.0), Pt(710.0), Pt(692.0)]);
        assert_eq!(body_start, Pt(670.0));
    }

    #[test]
    fn empty_role_still_gets_a_label() {
        let mut fonts: Arena<Font> = Arena::new();
        let font_id = fonts.alloc(Font::builtin(BuiltinFont::Helvetica));
        let geometry = Geometry::default();
        let styles = Styles::default();
        let typesetter = Typesetter::new(&geometry, &styles, font_id, &fonts[font_id]);
        let mut page = Page::new(geometry.page_size, None);

        let meta = HeaderMeta {
            title: "Report",
            job_role: "",
            date: "1/2/2024",
        };
        draw_header(&mut page, geometry.top(), &meta, &typesetter);
        assert_eq!(page.instructions()[1].text, "Job Role: ");
    }
}
