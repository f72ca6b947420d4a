use unicode_width::UnicodeWidthChar;

/// Ordered display lines produced by the table formatter.
///
/// Index 0 is the header: it is always drawn and never scrolls vertically.
/// The remaining lines scroll underneath it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Number of lines including the header.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn header(&self) -> Option<&str> {
        self.lines.first().map(String::as_str)
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }
}

impl From<Vec<String>> for LineBuffer {
    fn from(lines: Vec<String>) -> Self {
        Self::new(lines)
    }
}

/// Cut `line` to the display columns `[offset, offset + width)` and pad the
/// result with spaces so it is exactly `width` columns wide.
///
/// Columns are measured in terminal cells, so wide characters count twice. A
/// wide character split by either edge is replaced by spaces.
pub fn clip_line(line: &str, offset: usize, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut col = 0usize;
    let mut used = 0usize;

    for ch in line.chars() {
        let w = ch.width().unwrap_or(0);
        if col < offset {
            col += w;
            if col > offset {
                // Right half of a wide char peeks past the left edge.
                let cut = (col - offset).min(width - used);
                out.extend(std::iter::repeat_n(' ', cut));
                used += cut;
            }
            continue;
        }
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
        col += w;
    }

    out.extend(std::iter::repeat_n(' ', width - used));
    out
}
