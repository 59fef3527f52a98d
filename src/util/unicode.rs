use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate to at most `max_cells` terminal cells, ending with `…` when cut.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }
    let budget = max_cells - 1;
    let mut width = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let gw = display_width(g);
        if width + gw > budget {
            break;
        }
        width += gw;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

/// Truncate or right-pad with spaces to exactly `cells` terminal cells.
pub fn fit_to_width(s: &str, cells: usize) -> String {
    let mut out = truncate_to_width(s, cells);
    let w = display_width(&out);
    if w < cells {
        out.push_str(&" ".repeat(cells - w));
    }
    out
}

/// Text for a one-row cell: each line break (`\r\n`, `\n` or `\r`) becomes `⏎`
/// and other control characters become spaces.
pub fn single_line(s: &str) -> String {
    s.replace("\r\n", "\n")
        .chars()
        .map(|c| match c {
            '\n' | '\r' => '\u{23ce}',
            c if c.is_control() => ' ',
            c => c,
        })
        .collect()
}

/// Byte offset of the last grapheme in `s`, or None when empty.
/// Used to delete one user-perceived character from the end of input.
pub fn last_grapheme_start(s: &str) -> Option<usize> {
    s.grapheme_indices(true).next_back().map(|(i, _)| i)
}

/// Byte offset where the last whitespace-delimited word of `s` starts,
/// ignoring trailing whitespace.
pub fn last_word_start(s: &str) -> usize {
    let trimmed = s.trim_end();
    trimmed
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(i, c)| i + c.len_utf8())
}
