//! Application shell: tab bar, search line, reset menu, toast overlay.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use helioboard_lib::{TableKind, TableSource};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};
use sungrid::layout::{ResetScope, TextMode};
use sungrid::table;
use sungrid::toast::{Toast, ToastQueue, render_toasts};

use crate::page::{DashboardPage, PageConfig};
use crate::table_settings::TableSettings;

/// Input mode of the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    Search,
    /// Reset menu open, with the highlighted entry index.
    ResetMenu(usize),
}

pub struct App {
    pages: HashMap<TableKind, DashboardPage>,
    active: TableKind,
    source: Arc<dyn TableSource>,
    settings: TableSettings,
    toasts: ToastQueue,
    mode: Mode,
    quit: bool,
}

/// Page configuration per table kind.
///
/// Plansets keeps the accordion resize and source-provided headers the
/// old dashboard used; the rest resize singly from their built-in
/// descriptor sets.
fn config_for(kind: TableKind) -> PageConfig {
    match kind {
        TableKind::Plansets => PageConfig::new(kind).accordion().headers_from_source(),
        _ => PageConfig::new(kind),
    }
}

impl App {
    pub fn new(source: Arc<dyn TableSource>, settings: TableSettings) -> Self {
        let mut pages = HashMap::new();
        for kind in TableKind::ALL {
            pages.insert(
                kind,
                DashboardPage::new(config_for(kind), Arc::clone(&source), settings.clone()),
            );
        }
        Self {
            pages,
            active: TableKind::default(),
            source,
            settings,
            toasts: ToastQueue::new(),
            mode: Mode::Normal,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    fn page(&self) -> &DashboardPage {
        // Pages exist for every kind from construction; the entry also
        // self-heals in page_mut, so a missing entry here is unreachable.
        &self.pages[&self.active]
    }

    fn page_mut(&mut self) -> &mut DashboardPage {
        let (active, source, settings) = (self.active, &self.source, &self.settings);
        self.pages.entry(active).or_insert_with(|| {
            DashboardPage::new(config_for(active), Arc::clone(source), settings.clone())
        })
    }

    /// Switch to a table kind, loading it on first visit.
    pub async fn activate(&mut self, kind: TableKind) {
        self.active = kind;
        if !self.page().is_loaded()
            && let Err(err) = self.page_mut().load().await
        {
            self.toasts
                .push(Toast::error("Failed to load table").with_body(err.to_string()));
        }
    }

    /// Expire toasts; called from the event-loop tick.
    pub fn tick(&mut self) {
        self.toasts.tick(Instant::now());
    }

    pub async fn on_key(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Normal => self.on_key_normal(key).await,
            Mode::Search => self.on_key_search(key),
            Mode::ResetMenu(selected) => self.on_key_reset_menu(key, selected),
        }
    }

    async fn on_key_normal(&mut self, key: KeyEvent) {
        let table = self.page().table().clone();
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Tab => {
                let next = next_kind(self.active, 1);
                self.activate(next).await;
            }
            KeyCode::BackTab => {
                let prev = next_kind(self.active, TableKind::ALL.len() - 1);
                self.activate(prev).await;
            }
            KeyCode::Char('/') => self.mode = Mode::Search,
            KeyCode::Char('r') => self.mode = Mode::ResetMenu(0),
            KeyCode::Char('c') => self.page_mut().cycle_customer_type(),
            KeyCode::Char('d') => self.page_mut().cycle_date_preset(),
            KeyCode::Char('a') => {
                if let Some(label) = self.page_mut().add_extra_column() {
                    self.toasts.push(Toast::success(format!("Added column {label}")));
                }
            }
            // H/w act on the column whose resize handle is lit.
            KeyCode::Char('H') => {
                if let Some(key) = table.hover_column() {
                    self.page().hide_column(&key);
                }
            }
            KeyCode::Char('w') => {
                if let Some(key) = table.hover_column() {
                    let next = match table.text_mode(&key) {
                        None => Some(TextMode::Wrap),
                        Some(TextMode::Wrap) => Some(TextMode::Clip),
                        Some(TextMode::Clip) => None,
                    };
                    self.page().set_text_mode(&key, next);
                }
            }
            KeyCode::Char('j') | KeyCode::Down => table.scroll_y_by(1),
            KeyCode::Char('k') | KeyCode::Up => table.scroll_y_by(-1),
            KeyCode::Char('h') | KeyCode::Left => table.scroll_x_by(-4),
            KeyCode::Char('l') | KeyCode::Right => table.scroll_x_by(4),
            KeyCode::PageDown => table.scroll_y_by(10),
            KeyCode::PageUp => table.scroll_y_by(-10),
            _ => {}
        }
    }

    fn on_key_search(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.mode = Mode::Normal,
            KeyCode::Backspace => {
                let mut search = self.page().search().to_string();
                search.pop();
                self.page_mut().set_search(search);
            }
            KeyCode::Char(c) => {
                let mut search = self.page().search().to_string();
                search.push(c);
                self.page_mut().set_search(search);
            }
            _ => {}
        }
    }

    fn on_key_reset_menu(&mut self, key: KeyEvent, selected: usize) {
        let count = ResetScope::ALL.len();
        match key.code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Char('j') | KeyCode::Down => {
                self.mode = Mode::ResetMenu((selected + 1) % count);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.mode = Mode::ResetMenu((selected + count - 1) % count);
            }
            KeyCode::Enter => {
                let scope = ResetScope::ALL[selected];
                self.page_mut().reset(scope);
                self.toasts.push(Toast::success(scope.label()));
                self.mode = Mode::Normal;
            }
            _ => {}
        }
    }

    pub fn on_mouse(&mut self, event: MouseEvent) {
        let (_, table_event) = self.page().table().on_mouse(&event);
        if let Some(table_event) = table_event {
            self.page_mut().on_table_event(table_event);
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let [tabs, filter, body, help] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_tabs(frame, tabs);
        self.render_filter_line(frame, filter);
        table::render(frame, self.page().table(), body);
        self.render_help(frame, help);

        if let Mode::ResetMenu(selected) = self.mode {
            self.render_reset_menu(frame, selected);
        }
        render_toasts(frame, &self.toasts);
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        for kind in TableKind::ALL {
            let style = if kind == self.active {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(format!(" {} ", kind.label()), style));
            spans.push(Span::raw("│"));
        }
        spans.pop();
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_filter_line(&self, frame: &mut Frame, area: Rect) {
        let search = self.page().search();
        let (prefix, style) = if self.mode == Mode::Search {
            ("Search▌ ", Style::default().fg(Color::Yellow))
        } else {
            ("Search: ", Style::default().fg(Color::Gray))
        };
        let mut spans = vec![Span::styled(prefix, style), Span::raw(search.to_string())];
        let facet_style = Style::default().fg(Color::Cyan);
        if let Some(customer_type) = self.page().customer_type() {
            spans.push(Span::styled(format!("  Type: {customer_type}"), facet_style));
        }
        if let Some(preset) = self.page().date_preset() {
            spans.push(Span::styled(format!("  Date: {}", preset.label()), facet_style));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let help = match self.mode {
            Mode::Normal => "q quit · tab switch · / search · c type · d date · a add column · r reset · click header to sort · drag edge to resize",
            Mode::Search => "type to filter · enter/esc done",
            Mode::ResetMenu(_) => "j/k move · enter apply · esc close",
        };
        frame.render_widget(
            Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
            area,
        );
    }

    fn render_reset_menu(&self, frame: &mut Frame, selected: usize) {
        let area = frame.area();
        let width = 30u16.min(area.width);
        let height = (ResetScope::ALL.len() as u16 + 2).min(area.height);
        let menu = Rect::new(
            area.x + (area.width.saturating_sub(width)) / 2,
            area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        );
        frame.render_widget(Clear, menu);

        let mut lines = vec![Line::from(Span::styled(
            " Reset ",
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        for (i, scope) in ResetScope::ALL.iter().enumerate() {
            let style = if i == selected {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(format!(" {} ", scope.label()), style)));
        }
        frame.render_widget(
            Paragraph::new(lines).style(Style::default().bg(Color::Black)),
            menu,
        );
    }
}

fn next_kind(current: TableKind, step: usize) -> TableKind {
    let index = TableKind::ALL
        .iter()
        .position(|k| *k == current)
        .unwrap_or(0);
    TableKind::ALL[(index + step) % TableKind::ALL.len()]
}
