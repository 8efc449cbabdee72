mod app;
mod page;
mod paths;
mod settings;
mod table_settings;

use std::fs::File;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use helioboard_lib::{MockSource, TableKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::app::App;
use crate::settings::{MemoryBackend, SettingsProvider, SqliteBackend};
use crate::table_settings::TableSettings;

/// Restores the terminal on drop, including on panic unwind.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
    }
}

#[tokio::main]
async fn main() {
    paths::rotate_logs();
    init_logging();

    let settings = open_settings().await;
    let source = Arc::new(MockSource::new(7));
    let mut app = App::new(source, settings);
    app.activate(TableKind::default()).await;

    if let Err(err) = run(app).await {
        eprintln!("Error: {err}");
    }
}

async fn run(mut app: App) -> io::Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let _guard = TerminalGuard;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(Duration::from_millis(250));

    loop {
        terminal.draw(|frame| app.render(frame))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    app.on_key(key).await;
                }
                Some(Ok(Event::Mouse(mouse))) => app.on_mouse(mouse),
                Some(Ok(_)) => {}
                Some(Err(err)) => log::error!("event stream error: {err}"),
                None => break,
            },
            _ = tick.tick() => app.tick(),
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

fn init_logging() {
    let path = paths::log_file().unwrap_or_else(|| "helioboard.log".into());
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    match File::create(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), file);
        }
        Err(err) => eprintln!("failed to create log file: {err}"),
    }
}

/// Open the sqlite settings store, falling back to in-memory storage
/// when the database cannot be created.
async fn open_settings() -> TableSettings {
    if let Some(path) = paths::settings_db() {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match SqliteBackend::new(&path).await {
            Ok(backend) => return TableSettings::new(SettingsProvider::new(backend)),
            Err(err) => {
                log::warn!("settings database unavailable ({err}); customization will not persist");
            }
        }
    }
    TableSettings::new(SettingsProvider::new(MemoryBackend::new()))
}
