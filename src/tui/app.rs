use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::Stdout;
use std::time::Duration;

use tuiarea::config::Config;
use tuiarea::keymap::{Action, Keymap};
use tuiarea::Snapshot;

use super::ui::UI;
use super::widgets::TextInput;

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct EditorApp {
    input: TextInput,
    keymap: Keymap,
    running: bool,
}

impl EditorApp {
    pub fn new(config: &Config, keymap: Keymap) -> Self {
        let mut input = TextInput::new(config.title.clone());
        if config.overwrite {
            input.text_area_mut().toggle_overwrite();
        }
        Self {
            input,
            keymap,
            running: true,
        }
    }

    /// Types `text` at the cursor, as if it had been pasted. `\r\n` and lone
    /// `\r` line ends are stored as `\n`.
    pub fn seed(&mut self, text: &str) {
        let text = normalize_line_endings(text);
        self.input.text_area_mut().type_string(&text);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn input_mut(&mut self) -> &mut TextInput {
        &mut self.input
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn snapshot(&self) -> Snapshot {
        self.input.text_area().snapshot()
    }

    pub fn handle_key(&mut self, key: &KeyEvent) {
        let Some(action) = self.keymap.resolve(key) else {
            return;
        };
        tracing::trace!("Key {:?} ({:?}) -> {:?}", key.code, key.modifiers, action);

        if action == Action::Quit {
            self.quit();
            return;
        }
        action.apply(self.input.text_area_mut());
    }

    pub fn handle_events(&mut self) -> Result<()> {
        if event::poll(EVENT_POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) => self.handle_key(&key),
                Event::Paste(text) => {
                    tracing::debug!("Pasted {} chars", text.chars().count());
                    self.seed(&text);
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = UI::setup_terminal()?;
        tracing::info!("Editor started");

        let result = self.event_loop(&mut terminal);
        let restored = UI::restore_terminal();

        if let Err(e) = &result {
            tracing::error!("Editor stopped with error: {}", e);
        } else {
            tracing::info!("Editor closed");
        }
        if let Err(e) = &restored {
            tracing::error!("Failed to restore terminal: {}", e);
        }
        first_error(result, restored)
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        while self.is_running() {
            terminal.draw(|frame| UI::render(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }
}

/// The loop's error if there was one, otherwise the restore error.
fn first_error(result: Result<()>, restored: std::io::Result<()>) -> Result<()> {
    result?;
    restored.map_err(Into::into)
}

/// Bracketed paste keeps the terminal's line ends; xterm-style terminals send `\r`.
fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
