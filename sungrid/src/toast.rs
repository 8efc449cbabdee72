//! Declarative toast notifications.
//!
//! Toasts live in an ordered queue with absolute expiry instants; a
//! single renderer draws the active entries each frame and `tick`
//! retires the expired ones. Nothing manages node lifecycles by hand.

use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

/// Toast notification level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    fn color(self) -> Color {
        match self {
            ToastLevel::Info => Color::Gray,
            ToastLevel::Success => Color::Green,
            ToastLevel::Warning => Color::Yellow,
            ToastLevel::Error => Color::Red,
        }
    }
}

/// A toast notification.
#[derive(Debug, Clone)]
pub struct Toast {
    /// Title to display (single line).
    pub title: String,
    /// Optional body text.
    pub body: Option<String>,
    pub level: ToastLevel,
    pub duration: Duration,
}

impl Toast {
    pub fn info(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: None,
            level: ToastLevel::Info,
            duration: Duration::from_secs(3),
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            ..Self::info(title)
        }
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Warning,
            duration: Duration::from_secs(4),
            ..Self::info(title)
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            duration: Duration::from_secs(5),
            ..Self::info(title)
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// An entry in the queue, with its assigned id and expiry.
#[derive(Debug, Clone)]
pub struct ActiveToast {
    pub id: u64,
    pub toast: Toast,
    pub expires_at: Instant,
}

/// Ordered queue of active toasts.
#[derive(Debug, Default)]
pub struct ToastQueue {
    entries: Vec<ActiveToast>,
    next_id: u64,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a toast, returning its id.
    pub fn push(&mut self, toast: Toast) -> u64 {
        self.push_at(toast, Instant::now())
    }

    /// Enqueue with an explicit clock, for tests.
    pub fn push_at(&mut self, toast: Toast, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(ActiveToast {
            id,
            expires_at: now + toast.duration,
            toast,
        });
        id
    }

    /// Drop entries whose deadline has passed. Order is preserved.
    pub fn tick(&mut self, now: Instant) {
        self.entries.retain(|e| e.expires_at > now);
    }

    /// Dismiss a toast by id.
    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|e| e.id != id);
    }

    pub fn active(&self) -> &[ActiveToast] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Instant of the soonest expiry, for scheduling the next tick.
    pub fn next_expiry(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.expires_at).min()
    }
}

const TOAST_WIDTH: u16 = 44;
const TOAST_MARGIN: u16 = 1;
const MAX_VISIBLE: usize = 5;

/// Render the queue top-down in the top-right corner.
pub fn render_toasts(frame: &mut Frame, queue: &ToastQueue) {
    if queue.is_empty() {
        return;
    }

    let area = frame.area();
    let x = area.width.saturating_sub(TOAST_WIDTH + 1);
    let mut y = 1u16;

    for entry in queue.active().iter().take(MAX_VISIBLE) {
        let body_lines: Vec<&str> = entry
            .toast
            .body
            .as_deref()
            .map(|b| b.lines().collect())
            .unwrap_or_default();
        let height = 1 + body_lines.len() as u16;
        if y + height >= area.height {
            break;
        }

        let toast_area = Rect::new(x, y, TOAST_WIDTH.min(area.width), height);
        frame.render_widget(Clear, toast_area);

        let accent = Style::default().fg(entry.toast.level.color());
        let mut lines = vec![Line::from(vec![
            Span::styled("▌ ", accent),
            Span::styled(entry.toast.title.clone(), accent),
        ])];
        for body in body_lines {
            lines.push(Line::from(vec![
                Span::styled("▌ ", accent),
                Span::raw(body.to_string()),
            ]));
        }
        frame.render_widget(
            Paragraph::new(lines).style(Style::default().bg(Color::Black)),
            toast_area,
        );

        y += height + TOAST_MARGIN;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_expire_in_duration_order() {
        let now = Instant::now();
        let mut queue = ToastQueue::new();
        let long = queue.push_at(Toast::error("failed"), now);
        let short = queue.push_at(Toast::info("saved"), now);

        queue.tick(now + Duration::from_secs(4));
        assert_eq!(queue.active().len(), 1);
        assert_eq!(queue.active()[0].id, long);
        assert!(!queue.active().iter().any(|e| e.id == short));

        queue.tick(now + Duration::from_secs(6));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dismiss_removes_only_the_target() {
        let now = Instant::now();
        let mut queue = ToastQueue::new();
        let a = queue.push_at(Toast::info("a"), now);
        let b = queue.push_at(Toast::info("b"), now);

        queue.dismiss(a);
        assert_eq!(queue.active().len(), 1);
        assert_eq!(queue.active()[0].id, b);
    }

    #[test]
    fn test_next_expiry_is_the_soonest_deadline() {
        let now = Instant::now();
        let mut queue = ToastQueue::new();
        assert_eq!(queue.next_expiry(), None);

        queue.push_at(Toast::error("slow"), now);
        queue.push_at(Toast::info("fast"), now);
        assert_eq!(queue.next_expiry(), Some(now + Duration::from_secs(3)));
    }
}
