use std::io::{self, Stdout};

use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use tuiarea::keymap::{Action, Keymap};

use super::app::EditorApp;

const FOOTER_HINTS: [(Action, &str); 4] = [
    (Action::Quit, "quit"),
    (Action::ToggleOverwrite, "overwrite"),
    (Action::DeleteToStartOfLine, "delete to line start"),
    (Action::Clear, "clear"),
];

pub struct UI;

impl UI {
    pub fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    pub fn restore_terminal() -> io::Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen)?;
        Ok(())
    }

    pub fn render(frame: &mut Frame, app: &mut EditorApp) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(frame.area());

        app.input_mut().render(frame, chunks[0]);
        Self::render_footer(frame, chunks[1], app.keymap());
    }

    fn render_footer(frame: &mut Frame, area: Rect, keymap: &Keymap) {
        frame.render_widget(Paragraph::new(Self::footer_line(keymap)), area);
    }

    fn footer_line(keymap: &Keymap) -> Line<'static> {
        let mut spans = Vec::new();
        for (action, label) in FOOTER_HINTS {
            let keys = keymap.keys_for(action);
            if keys.is_empty() {
                continue;
            }
            let keys = keys
                .iter()
                .map(|k| k.to_string())
                .collect::<Vec<_>>()
                .join("/");

            if !spans.is_empty() {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(
                keys,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!(" {}", label),
                Style::default().fg(Color::Gray),
            ));
        }
        Line::from(spans)
    }
}
