//! Line boundaries derived from the flat code-point buffer.
//!
//! Nothing here is cached: every query rescans the buffer for `'\n'`, so a
//! line can never disagree with the text it was computed from.

pub const LINE_BREAK: char = '\n';

/// Half-open `[start, end)` range of one line. `end` is the index of the
/// terminating line break, or the buffer length for the last line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn slice<'a>(&self, buffer: &'a [char]) -> &'a [char] {
        &buffer[self.start..self.end]
    }
}

/// The line containing position `pos`. A position sitting on a line break
/// belongs to the line that break terminates.
pub fn line_range_at(buffer: &[char], pos: usize) -> LineRange {
    let pos = pos.min(buffer.len());
    let start = buffer[..pos]
        .iter()
        .rposition(|&c| c == LINE_BREAK)
        .map_or(0, |i| i + 1);
    let end = buffer[pos..]
        .iter()
        .position(|&c| c == LINE_BREAK)
        .map_or(buffer.len(), |i| pos + i);
    LineRange { start, end }
}

pub fn previous_line(buffer: &[char], line: LineRange) -> Option<LineRange> {
    if line.start == 0 {
        return None;
    }
    Some(line_range_at(buffer, line.start - 1))
}

pub fn next_line(buffer: &[char], line: LineRange) -> Option<LineRange> {
    if line.end >= buffer.len() {
        return None;
    }
    Some(line_range_at(buffer, line.end + 1))
}

/// 0-based index of the line containing `pos`: the number of line breaks before it.
pub fn line_index_at(buffer: &[char], pos: usize) -> usize {
    let pos = pos.min(buffer.len());
    buffer[..pos].iter().filter(|&&c| c == LINE_BREAK).count()
}

/// Always at least 1; an empty buffer holds a single empty line.
pub fn line_count(buffer: &[char]) -> usize {
    buffer.iter().filter(|&&c| c == LINE_BREAK).count() + 1
}

/// The line with 0-based `index`. Indices past the last line resolve to the last line.
pub fn line_range_by_index(buffer: &[char], index: usize) -> LineRange {
    let mut start = 0;
    for _ in 0..index {
        match buffer[start..].iter().position(|&c| c == LINE_BREAK) {
            Some(i) => start += i + 1,
            None => break,
        }
    }
    line_range_at(buffer, start)
}
