// Text wrapping for fixed-width report columns.
//
// Line budgets come from an average glyph width for the built-in Helvetica
// face. Breaks happen only at whitespace; a single word longer than the
// budget gets its own line rather than being hyphenated.

/// Millimetres per typographic point.
const MM_PER_PT: f32 = 0.352_778;

/// Average Helvetica glyph width as a fraction of the font size.
const GLYPH_WIDTH_RATIO: f32 = 0.5;

/// Character-budget word wrapper for one column width at one font size.
#[derive(Debug, Clone, Copy)]
pub struct TextWrapper {
    max_chars: usize,
}

impl TextWrapper {
    /// Size the line budget for `width_mm` of horizontal space at
    /// `font_size` points.
    pub fn for_width(width_mm: f32, font_size: f32) -> Self {
        let char_width = font_size * MM_PER_PT * GLYPH_WIDTH_RATIO;
        let max_chars = (width_mm / char_width).floor() as usize;
        TextWrapper {
            max_chars: max_chars.max(1),
        }
    }

    /// Budget with an explicit character count.
    pub fn with_max_chars(max_chars: usize) -> Self {
        TextWrapper {
            max_chars: max_chars.max(1),
        }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Lazily wrap `text` at whitespace boundaries.
    ///
    /// The iterator is finite and restartable: call `wrap` again (or clone
    /// the iterator) to walk the lines from any point a second time. Joining
    /// the produced lines with single spaces reproduces the
    /// whitespace-normalized input.
    pub fn wrap<'a>(&self, text: &'a str) -> WrappedLines<'a> {
        WrappedLines {
            words: text.split_whitespace(),
            carry: None,
            max_chars: self.max_chars,
        }
    }
}

/// Iterator over wrapped lines. See [`TextWrapper::wrap`].
#[derive(Debug, Clone)]
pub struct WrappedLines<'a> {
    words: std::str::SplitWhitespace<'a>,
    carry: Option<&'a str>,
    max_chars: usize,
}

impl<'a> Iterator for WrappedLines<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut line = String::new();
        let mut count = 0usize;

        loop {
            let word = match self.carry.take() {
                Some(word) => word,
                None => match self.words.next() {
                    Some(word) => word,
                    None => break,
                },
            };
            let word_len = word.chars().count();

            if count == 0 {
                // First word always lands, even when it alone overflows the
                // budget: no mid-word splits.
                line.push_str(word);
                count = word_len;
                if count >= self.max_chars {
                    break;
                }
            } else if count + 1 + word_len <= self.max_chars {
                line.push(' ');
                line.push_str(word);
                count += 1 + word_len;
            } else {
                self.carry = Some(word);
                break;
            }
        }

        if line.is_empty() {
            None
        } else {
            Some(line)
        }
    }
}
