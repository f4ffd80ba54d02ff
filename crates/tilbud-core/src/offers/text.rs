//! Character-offset and line index over flyer text.
//!
//! Regex matches report byte offsets, while mention offsets and the
//! price/unit association radius are measured in characters. The index is
//! built once per extraction call so every lookup is a binary search.

/// A line of the source text, without its trailing `\n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Line content.
    pub text: &'a str,
    /// Byte offset of the first character of the line.
    pub start_byte: usize,
    /// Character offset of the first character of the line.
    pub start_char: usize,
}

/// Offset index over a borrowed text.
#[derive(Debug, Clone)]
pub struct TextIndex<'a> {
    text: &'a str,
    /// Byte offset of every character; `None` for pure ASCII text.
    char_starts: Option<Vec<usize>>,
    lines: Vec<Line<'a>>,
}

impl<'a> TextIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let char_starts = if text.is_ascii() {
            None
        } else {
            Some(text.char_indices().map(|(i, _)| i).collect())
        };

        let mut lines = Vec::new();
        let mut start_byte = 0;
        let mut start_char = 0;
        for line in text.split('\n') {
            lines.push(Line {
                text: line,
                start_byte,
                start_char,
            });
            start_byte += line.len() + 1;
            start_char += line.chars().count() + 1;
        }

        Self {
            text,
            char_starts,
            lines,
        }
    }

    /// The indexed text.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Convert a byte offset (on a char boundary) into a character offset.
    pub fn char_offset(&self, byte: usize) -> usize {
        match &self.char_starts {
            None => byte,
            Some(starts) => starts.partition_point(|&b| b < byte),
        }
    }

    /// Convert a character offset into a byte offset.
    pub fn byte_offset(&self, char_offset: usize) -> usize {
        match &self.char_starts {
            None => char_offset.min(self.text.len()),
            Some(starts) => starts.get(char_offset).copied().unwrap_or(self.text.len()),
        }
    }

    /// Lines split on `\n`, in source order.
    pub fn lines(&self) -> &[Line<'a>] {
        &self.lines
    }

    /// The line containing the given character offset.
    pub fn line_at(&self, char_offset: usize) -> Option<Line<'a>> {
        let idx = self.lines.partition_point(|l| l.start_char <= char_offset);
        idx.checked_sub(1).map(|i| self.lines[i])
    }
}
