//! TUI utilities and shared helpers for the Tana terminal list view.
//!
//! This module provides formatting helpers shared between the `tana-tui`
//! binary and any other application that wants to render tracked records in
//! a terminal. It is only available when the `tui` feature is enabled.
//!
//! # Examples
//!
//! ```rust,no_run
//! use tana::tui::format_record_line;
//! use tana::types::{MangaRecord, ReadingStatus, ReleaseStatus};
//!
//! let record = MangaRecord {
//!     id: Some(1),
//!     name: "One Piece".to_string(),
//!     total_chapters: 1100,
//!     completed_chapters: 420,
//!     comment: None,
//!     status: ReadingStatus::Reading,
//!     release_status: ReleaseStatus::Ongoing,
//!     cover_image: None,
//!     user_id: Some(1),
//! };
//!
//! let line = format_record_line(&record);
//! ```

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::types::{MangaRecord, ReadingStatus};

/// Color used for a reading status badge.
///
/// Blue for reading, green for completed, red for dropped and to-read.
pub fn status_color(status: ReadingStatus) -> Color {
    match status {
        ReadingStatus::ToRead => Color::Red,
        ReadingStatus::Reading => Color::Blue,
        ReadingStatus::Completed => Color::Green,
        ReadingStatus::Dropped => Color::Red,
    }
}

/// Formats one tracked record as a styled list line.
///
/// Shows the name, the chapter progress and the two status badges.
pub fn format_record_line(record: &MangaRecord) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            record.name.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            format!("{}/{}", record.completed_chapters, record.total_chapters),
            Style::default().fg(Color::White),
        ),
        Span::raw("  "),
        Span::styled(
            record.status.label().to_string(),
            Style::default().fg(status_color(record.status)),
        ),
        Span::raw("  "),
        Span::styled(
            record.release_status.label().to_string(),
            Style::default().fg(Color::Yellow),
        ),
    ];

    if record.cover_image.is_some() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("▣", Style::default().fg(Color::Magenta)));
    }

    Line::from(spans)
}

/// Label for the status filter slot, with `None` shown as "All".
pub fn filter_label(status: Option<ReadingStatus>) -> &'static str {
    match status {
        None => "All",
        Some(status) => status.label(),
    }
}

/// Advances the status filter one step through
/// `All -> To Read -> Reading -> Completed -> Dropped -> All`.
///
/// # Examples
///
/// ```rust
/// use tana::tui::cycle_status_filter;
/// use tana::types::ReadingStatus;
///
/// assert_eq!(cycle_status_filter(None), Some(ReadingStatus::ToRead));
/// assert_eq!(cycle_status_filter(Some(ReadingStatus::Dropped)), None);
/// ```
pub fn cycle_status_filter(current: Option<ReadingStatus>) -> Option<ReadingStatus> {
    match current {
        None => Some(ReadingStatus::ALL[0]),
        Some(status) => {
            let index = ReadingStatus::ALL.iter().position(|s| *s == status);
            match index {
                Some(i) if i + 1 < ReadingStatus::ALL.len() => Some(ReadingStatus::ALL[i + 1]),
                _ => None,
            }
        }
    }
}

/// Creates a styled status message for TUI display.
pub fn create_status_message(prefix: &str, message: &str, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{}:", prefix),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(message.to_string(), Style::default().fg(color)),
    ])
}

/// Creates a success message for TUI display.
pub fn success_message(message: &str) -> Line<'static> {
    create_status_message("Success", message, Color::Green)
}

/// Creates an error message for TUI display.
pub fn error_message(message: &str) -> Line<'static> {
    create_status_message("Error", message, Color::Red)
}

/// Creates an info message for TUI display.
pub fn info_message(message: &str) -> Line<'static> {
    create_status_message("Info", message, Color::Blue)
}

/// Truncates text to fit within a specified width.
///
/// # Examples
///
/// ```rust,no_run
/// use tana::tui::truncate_text;
///
/// let truncated = truncate_text("This is a very long text", 10);
/// assert_eq!(truncated, "This is...");
/// ```
pub fn truncate_text(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else if width > 3 {
        let prefix: String = text.chars().take(width - 3).collect();
        format!("{}...", prefix)
    } else {
        text.chars().take(width).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_status_filter_round_trip() {
        let mut current = None;
        let mut seen = Vec::new();
        for _ in 0..ReadingStatus::ALL.len() {
            current = cycle_status_filter(current);
            seen.push(current);
        }
        assert_eq!(
            seen,
            ReadingStatus::ALL.map(Some).to_vec(),
            "cycle should visit every status once"
        );
        assert_eq!(cycle_status_filter(current), None);
    }

    #[test]
    fn test_filter_label() {
        assert_eq!(filter_label(None), "All");
        assert_eq!(filter_label(Some(ReadingStatus::ToRead)), "To Read");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("Hello World", 5), "He...");
        assert_eq!(truncate_text("Hi", 10), "Hi");
        assert_eq!(truncate_text("Test", 3), "Tes");
    }

    #[test]
    fn test_truncate_text_multibyte() {
        let comment = "あ".repeat(20);
        let truncated = truncate_text(&comment, 10);
        assert_eq!(truncated, format!("{}...", "あ".repeat(7)));

        // Short multibyte text passes through unchanged
        assert_eq!(truncate_text("あいう", 5), "あいう");
    }
}
