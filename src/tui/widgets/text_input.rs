use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tuiarea::TextArea;

/// Bordered, scrolling view over a [`TextArea`]. Lines are not wrapped; the
/// view scrolls both ways just enough to keep the cursor visible.
pub struct TextInput {
    buffer: TextArea,
    title: String,
    scroll_x: usize,
    scroll_y: usize,
}

impl TextInput {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            buffer: TextArea::new(),
            title: title.into(),
            scroll_x: 0,
            scroll_y: 0,
        }
    }

    pub fn text_area(&self) -> &TextArea {
        &self.buffer
    }

    pub fn text_area_mut(&mut self) -> &mut TextArea {
        &mut self.buffer
    }

    fn scroll_to_cursor(&mut self, width: usize, height: usize, x: usize, y: usize) {
        self.scroll_y = follow(self.scroll_y, y, height);
        self.scroll_x = follow(self.scroll_x, x, width);
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (x, y) = self.buffer.cursor_xy();
        let mode = if self.buffer.is_overwrite() { "OVR" } else { "INS" };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(Span::styled(
                format!(" {} [{}] {}:{} ", self.title, mode, y + 1, x + 1),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        self.scroll_to_cursor(inner.width as usize, inner.height as usize, x, y);

        let content = self.buffer.content();
        let text_style = Style::default().fg(Color::White);
        let display_text: Vec<Line> = if content.is_empty() {
            vec![Line::from(Span::styled(
                "Type here...",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            content
                .split('\n')
                .map(|line| Line::from(Span::styled(line, text_style)))
                .collect()
        };

        let paragraph = Paragraph::new(display_text)
            .block(block)
            .scroll((to_u16(self.scroll_y), to_u16(self.scroll_x)));
        frame.render_widget(paragraph, area);

        if inner.width > 0 && inner.height > 0 {
            frame.set_cursor_position((
                inner.x + to_u16(x - self.scroll_x),
                inner.y + to_u16(y - self.scroll_y),
            ));
        }
    }
}

/// New scroll offset keeping `pos` inside a window of `size` cells.
fn follow(offset: usize, pos: usize, size: usize) -> usize {
    if size == 0 {
        offset
    } else if pos < offset {
        pos
    } else if pos >= offset + size {
        pos + 1 - size
    } else {
        offset
    }
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
