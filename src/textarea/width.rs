use unicode_width::UnicodeWidthChar;

/// Terminal cells occupied by `c`: 2 for East-Asian wide/fullwidth, 1 for everything else.
pub fn char_width(c: char) -> usize {
    match UnicodeWidthChar::width(c) {
        Some(2) => 2,
        _ => 1,
    }
}

/// Display column reached after `prefix`, i.e. the summed width of its code points.
pub fn display_column(prefix: &[char]) -> usize {
    prefix.iter().map(|&c| char_width(c)).sum()
}

/// Resolves a display column to a code-point offset within `line`.
///
/// Widths are accumulated from the start of the line while the running total
/// is below `column`. The walk stops at the first offset whose prefix width
/// reaches `column`, or at the end of the line. A wide code point straddling
/// `column` is therefore stepped over, and a column past the end of the line
/// caps at the line's length.
pub fn offset_for_column(line: &[char], column: usize) -> usize {
    let mut width = 0;
    let mut offset = 0;
    while width < column && offset < line.len() {
        width += char_width(line[offset]);
        offset += 1;
    }
    offset
}
