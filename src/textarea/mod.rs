//! Editing core of a multi-line text input.
//!
//! A [`TextArea`] is a flat buffer of code points plus a cursor. The cursor
//! is the gap before the code point at its index, so it ranges over
//! `0..=len`. Lines are never stored; they are recovered from `'\n'` on
//! demand (see [`lines`]). Display columns account for wide East-Asian code
//! points occupying two terminal cells (see [`width`]).
//!
//! Every operation is total: out-of-range requests clamp or do nothing.

pub mod lines;
mod snapshot;
pub mod width;

pub use snapshot::Snapshot;

use lines::{LineRange, LINE_BREAK};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextArea {
    content: Vec<char>,
    cursor: usize,
    overwrite: bool,
}

impl TextArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Types one code point at the cursor and advances past it.
    ///
    /// In overwrite mode the code point under the cursor is replaced, unless
    /// the cursor is at the end of the buffer or on a line break, in which
    /// case `c` is inserted. Overwriting never joins or splits lines.
    pub fn type_rune(&mut self, c: char) {
        let replaceable =
            matches!(self.content.get(self.cursor), Some(&under) if under != LINE_BREAK);
        if self.overwrite && replaceable {
            self.content[self.cursor] = c;
        } else {
            self.content.insert(self.cursor, c);
        }
        self.cursor += 1;
    }

    /// Same as calling [`TextArea::type_rune`] once per code point of `s`.
    pub fn type_string(&mut self, s: &str) {
        for c in s.chars() {
            self.type_rune(c);
        }
    }

    pub fn back_space_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        self.content.remove(self.cursor);
    }

    pub fn delete_char(&mut self) {
        if self.cursor < self.content.len() {
            self.content.remove(self.cursor);
        }
    }

    /// Removes everything between the start of the current line and the cursor.
    ///
    /// When nothing precedes the cursor on its line and a previous line
    /// exists, the line break before it is removed instead, joining the two
    /// lines with the cursor at the join point.
    pub fn delete_to_start_of_line(&mut self) {
        let line = self.current_line();
        if self.cursor > line.start {
            self.content.drain(line.start..self.cursor);
            self.cursor = line.start;
        } else if line.start > 0 {
            tracing::trace!(at = line.start - 1, "joining line with previous line");
            self.content.remove(line.start - 1);
            self.cursor = line.start - 1;
        }
    }

    /// Empties the buffer. The overwrite mode is kept.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    pub fn content(&self) -> String {
        self.content.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn is_overwrite(&self) -> bool {
        self.overwrite
    }

    pub fn toggle_overwrite(&mut self) {
        self.overwrite = !self.overwrite;
    }

    pub fn line_count(&self) -> usize {
        lines::line_count(&self.content)
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.content.len() {
            self.cursor += 1;
        }
    }

    pub fn go_to_start_of_line(&mut self) {
        self.cursor = self.current_line().start;
    }

    pub fn go_to_end_of_line(&mut self) {
        self.cursor = self.current_line().end;
    }

    /// Moves to the same display column on the previous line, if any.
    ///
    /// The column is measured from the live cursor on every call; no
    /// "desired column" survives between calls, so moving through a short
    /// line loses the original column.
    pub fn move_cursor_up(&mut self) {
        let line = self.current_line();
        if let Some(target) = lines::previous_line(&self.content, line) {
            self.move_to_line(line, target);
        }
    }

    /// Counterpart of [`TextArea::move_cursor_up`] for the next line.
    pub fn move_cursor_down(&mut self) {
        let line = self.current_line();
        if let Some(target) = lines::next_line(&self.content, line) {
            self.move_to_line(line, target);
        }
    }

    /// Places the cursor at display column `x` of line `y`.
    ///
    /// Negative coordinates clamp to 0, `y` past the last line selects the
    /// last line, and `x` past the end of the line lands on its end.
    pub fn set_cursor_2d(&mut self, x: isize, y: isize) {
        let x = usize::try_from(x).unwrap_or(0);
        let y = usize::try_from(y).unwrap_or(0);
        let line = lines::line_range_by_index(&self.content, y);
        self.cursor = line.start + width::offset_for_column(line.slice(&self.content), x);
    }

    /// `(display column, line index)` of the cursor, both 0-based.
    pub fn cursor_xy(&self) -> (usize, usize) {
        let line = self.current_line();
        let x = width::display_column(&self.content[line.start..self.cursor]);
        let y = lines::line_index_at(&self.content, self.cursor);
        (x, y)
    }

    pub fn snapshot(&self) -> Snapshot {
        let (x, y) = self.cursor_xy();
        Snapshot {
            content: self.content(),
            cursor: self.cursor,
            x,
            y,
            overwrite: self.overwrite,
        }
    }

    fn current_line(&self) -> LineRange {
        lines::line_range_at(&self.content, self.cursor)
    }

    fn move_to_line(&mut self, from: LineRange, to: LineRange) {
        let column = width::display_column(&self.content[from.start..self.cursor]);
        self.cursor = to.start + width::offset_for_column(to.slice(&self.content), column);
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Type(char),
        BackSpace,
        Delete,
        DeleteToStartOfLine,
        Left,
        Right,
        Up,
        Down,
        LineStart,
        LineEnd,
        SetCursor(isize, isize),
        ToggleOverwrite,
    }

    fn arbitrary_char() -> impl Strategy<Value = char> {
        prop::sample::select(vec!['a', 'b', 'z', ' ', '\n', '漢', '老', 'Ａ', 'é'])
    }

    fn arbitrary_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            arbitrary_char().prop_map(Op::Type),
            arbitrary_char().prop_map(Op::Type),
            Just(Op::BackSpace),
            Just(Op::Delete),
            Just(Op::DeleteToStartOfLine),
            Just(Op::Left),
            Just(Op::Right),
            Just(Op::Up),
            Just(Op::Down),
            Just(Op::LineStart),
            Just(Op::LineEnd),
            (-3isize..12, -3isize..6).prop_map(|(x, y)| Op::SetCursor(x, y)),
            Just(Op::ToggleOverwrite),
        ]
    }

    fn apply(area: &mut TextArea, op: &Op) {
        match *op {
            Op::Type(c) => area.type_rune(c),
            Op::BackSpace => area.back_space_char(),
            Op::Delete => area.delete_char(),
            Op::DeleteToStartOfLine => area.delete_to_start_of_line(),
            Op::Left => area.move_cursor_left(),
            Op::Right => area.move_cursor_right(),
            Op::Up => area.move_cursor_up(),
            Op::Down => area.move_cursor_down(),
            Op::LineStart => area.go_to_start_of_line(),
            Op::LineEnd => area.go_to_end_of_line(),
            Op::SetCursor(x, y) => area.set_cursor_2d(x, y),
            Op::ToggleOverwrite => area.toggle_overwrite(),
        }
    }

    fn build(ops: &[Op]) -> TextArea {
        let mut area = TextArea::new();
        for op in ops {
            apply(&mut area, op);
        }
        area
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn cursor_stays_within_buffer(ops in prop::collection::vec(arbitrary_op(), 0..60)) {
            let mut area = TextArea::new();
            for op in &ops {
                apply(&mut area, op);
                prop_assert!(area.cursor() <= area.len());
            }
        }

        #[test]
        fn type_string_matches_repeated_type_rune(
            prior in prop::collection::vec(arbitrary_op(), 0..30),
            typed in prop::collection::vec(arbitrary_char(), 0..20)
        ) {
            let text: String = typed.iter().collect();
            let mut by_string = build(&prior);
            let mut by_rune = by_string.clone();

            by_string.type_string(&text);
            for &c in &typed {
                by_rune.type_rune(c);
            }
            prop_assert_eq!(by_string, by_rune);
        }

        #[test]
        fn type_rune_always_advances_by_one(
            prior in prop::collection::vec(arbitrary_op(), 0..30),
            c in arbitrary_char()
        ) {
            let mut area = build(&prior);
            let before = area.cursor();
            area.type_rune(c);
            prop_assert_eq!(area.cursor(), before + 1);
        }

        #[test]
        fn insert_then_back_space_restores(
            prior in prop::collection::vec(arbitrary_op(), 0..30),
            c in arbitrary_char()
        ) {
            let mut area = build(&prior);
            if area.is_overwrite() {
                area.toggle_overwrite();
            }
            let expected = area.clone();
            area.type_rune(c);
            area.back_space_char();
            prop_assert_eq!(area, expected);
        }

        #[test]
        fn insert_then_left_and_delete_restores(
            prior in prop::collection::vec(arbitrary_op(), 0..30),
            c in arbitrary_char()
        ) {
            let mut area = build(&prior);
            if area.is_overwrite() {
                area.toggle_overwrite();
            }
            let expected = area.clone();
            area.type_rune(c);
            area.move_cursor_left();
            area.delete_char();
            prop_assert_eq!(area, expected);
        }

        #[test]
        fn left_then_right_restores_interior_cursor(
            prior in prop::collection::vec(arbitrary_op(), 0..30)
        ) {
            let mut area = build(&prior);
            let before = area.cursor();
            if before > 0 {
                area.move_cursor_left();
                area.move_cursor_right();
                prop_assert_eq!(area.cursor(), before);
            }
            if before < area.len() {
                area.move_cursor_right();
                area.move_cursor_left();
                prop_assert_eq!(area.cursor(), before);
            }
        }

        #[test]
        fn set_cursor_2d_inverts_cursor_xy(
            prior in prop::collection::vec(arbitrary_op(), 0..40)
        ) {
            let mut area = build(&prior);
            let before = area.cursor();
            let (x, y) = area.cursor_xy();
            area.set_cursor_2d(x as isize, y as isize);
            prop_assert_eq!(area.cursor(), before);
        }

        #[test]
        fn line_start_to_end_spans_current_line(
            prior in prop::collection::vec(arbitrary_op(), 0..40)
        ) {
            let mut area = build(&prior);
            area.go_to_start_of_line();
            let start = area.cursor();
            area.go_to_end_of_line();
            let end = area.cursor();
            let content: Vec<char> = area.content().chars().collect();

            prop_assert!(start <= end);
            prop_assert!(content[start..end].iter().all(|&c| c != '\n'));
            prop_assert!(end == content.len() || content[end] == '\n');
        }
    }
}
