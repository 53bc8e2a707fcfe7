use crate::font::Font;
use crate::units::Pt;
use std::str::Split;

/// Measures how much of a line's budget a piece of text uses
pub trait Measure {
    fn measure(&self, text: &str) -> f32;
}

/// Measures text by its number of characters. Cheap and font-agnostic, but visual line
/// length then varies with the glyphs in each line.
#[derive(Debug, Copy, Clone, Default)]
pub struct CharCount;

impl Measure for CharCount {
    fn measure(&self, text: &str) -> f32 {
        text.chars().count() as f32
    }
}

/// Measures text by its rendered width, in points, in a given font and size
#[derive(Copy, Clone)]
pub struct FontWidth<'f> {
    pub font: &'f Font,
    pub size: Pt,
}

impl Measure for FontWidth<'_> {
    fn measure(&self, text: &str) -> f32 {
        *self.font.width_of_text(text, self.size)
    }
}

impl<M: Measure + ?Sized> Measure for &M {
    fn measure(&self, text: &str) -> f32 {
        (**self).measure(text)
    }
}

/// Greedily fills lines with whole words until the next word would push the line past
/// `max_chars` characters. Words are never split: a word longer than the budget gets a
/// line to itself and overflows it.
///
/// ```
/// use resume_report::layout::wrap;
///
/// let lines: Vec<String> = wrap("Quantify the impact of each project", 16).collect();
/// assert_eq!(lines, vec!["Quantify the", "impact of each", "project"]);
/// ```
pub fn wrap(text: &str, max_chars: usize) -> Wrap<'_, CharCount> {
    Wrap::new(text, max_chars as f32, CharCount)
}

/// Like [wrap], but with the budget expressed in whatever unit `measure` produces
pub fn wrap_with<M: Measure>(text: &str, budget: f32, measure: M) -> Wrap<'_, M> {
    Wrap::new(text, budget, measure)
}

/// Iterator over the wrapped lines of a piece of text. Lines are produced lazily and the
/// iterator cannot be restarted.
pub struct Wrap<'t, M> {
    words: Split<'t, char>,
    measure: M,
    budget: f32,
    // each buffered word is followed by a single space
    buffer: String,
    buffer_width: f32,
    space_width: f32,
    done: bool,
}

impl<'t, M: Measure> Wrap<'t, M> {
    fn new(text: &'t str, budget: f32, measure: M) -> Wrap<'t, M> {
        let space_width = measure.measure(" ");
        Wrap {
            words: text.split(' '),
            measure,
            budget,
            buffer: String::new(),
            buffer_width: 0.0,
            space_width,
            done: false,
        }
    }

    fn start_buffer_with(&mut self, word: &str, width: f32) {
        self.buffer.clear();
        self.buffer_width = 0.0;
        self.push_word(word, width);
    }

    fn push_word(&mut self, word: &str, width: f32) {
        self.buffer.push_str(word);
        self.buffer.push(' ');
        self.buffer_width += width + self.space_width;
    }
}

impl<M: Measure> Iterator for Wrap<'_, M> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        while let Some(word) = self.words.next() {
            let width = self.measure.measure(word);
            if self.buffer_width + width > self.budget {
                let line = self.buffer.trim().to_string();
                self.start_buffer_with(word, width);
                // an over-long first word leaves nothing behind it to emit
                if !line.is_empty() {
                    return Some(line);
                }
            } else {
                self.push_word(word, width);
            }
        }

        self.done = true;
        let line = self.buffer.trim();
        if line.is_empty() {
            None
        } else {
            Some(line.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::BuiltinFont;

    fn words(text: &str) -> Vec<&str> {
        text.split_whitespace().collect()
    }

    #[test]
    fn empty_input_produces_no_lines() {
        assert_eq!(wrap("", 90).count(), 0);
        assert_eq!(wrap("   ", 90).count(), 0);
    }

    #[test]
    fn short_text_is_a_single_trimmed_line() {
        let text = "  Time management could improve.  ";
        let lines: Vec<String> = wrap(text, 90).collect();
        assert_eq!(lines, vec![text.trim().to_string()]);

        let exact = "x".repeat(90);
        assert_eq!(wrap(&exact, 90).collect::<Vec<_>>(), vec![exact.clone()]);
    }

    #[test]
    fn interior_spacing_survives_on_a_line() {
        let lines: Vec<String> = wrap("two  spaces", 90).collect();
        assert_eq!(lines, vec!["two  spaces"]);
    }

    #[test]
    fn lines_break_when_the_next_word_overflows() {
        // "aaaa bbbb " is 10 characters, adding "cccc" would make 14
        let lines: Vec<String> = wrap("aaaa bbbb cccc dd", 12).collect();
        assert_eq!(lines, vec!["aaaa bbbb", "cccc dd"]);
    }

    #[test]
    fn long_words_are_never_split() {
        let word = "supercalifragilisticexpialidocious";
        let text = format!("see {word} here");
        let lines: Vec<String> = wrap(&text, 10).collect();
        assert_eq!(lines, vec!["see", word, "here"]);

        let lines: Vec<String> = wrap(word, 10).collect();
        assert_eq!(lines, vec![word]);
    }

    #[test]
    fn every_word_survives_whole_and_in_order() {
        let text = lipsum::lipsum(300);
        for budget in [1, 7, 20, 45, 90] {
            let lines: Vec<String> = wrap(&text, budget).collect();
            let rejoined: Vec<&str> = lines.iter().flat_map(|line| words(line)).collect();
            assert_eq!(rejoined, words(&text), "budget {budget}");
            for line in &lines {
                assert!(
                    line.chars().count() <= budget || words(line).len() == 1,
                    "{line:?} overflows {budget}"
                );
            }
        }
    }

    #[test]
    fn measured_wrap_uses_font_widths() {
        let font = Font::builtin(BuiltinFont::Helvetica);
        let measure = FontWidth {
            font: &font,
            size: Pt(10.0),
        };
        // "i" is 2.22pt and "m" is 8.33pt at 10pt Helvetica
        let narrow: Vec<String> = wrap_with("iiii iiii iiii", 40.0, measure).collect();
        assert_eq!(narrow.len(), 1);
        let wide: Vec<String> = wrap_with("mmmm mmmm mmmm", 40.0, measure).collect();
        assert_eq!(wide, vec!["mmmm", "mmmm", "mmmm"]);
    }
}
