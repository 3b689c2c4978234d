mod app;
mod ui;
mod widgets;

pub use app::EditorApp;
