//! Tana TUI - Terminal list view for a personal manga tracking list
//!
//! Browse, search and filter the tracked collection, create and edit records
//! through a form modal, and delete with confirmation. All mutations go to
//! the remote backend and are followed by a full re-fetch.

use color_eyre::{eyre::Result, install};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use std::{io, time::Duration};

use bytes::Bytes;
use tana::prelude::*;
use tana::tui::{
    cycle_status_filter, error_message, filter_label, format_record_line, info_message,
    truncate_text,
};

// Cover storage configuration; replace with your own project values.
const SUPABASE_URL: &str = "https://ypnvbzctyZZZdemo.supabase.co";
const SUPABASE_BUCKET: &str = "manga-covers";
const SUPABASE_ANON_KEY: &str = "public-anon-key";

/// Which surface currently receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Browse,
    Search,
    Form,
    ConfirmDelete(u64),
}

/// Fields of the form modal, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Name = 0,
    TotalChapters = 1,
    CompletedChapters = 2,
    Comment = 3,
    Status = 4,
    ReleaseStatus = 5,
    CoverPath = 6,
}

impl FormField {
    const ALL: [FormField; 7] = [
        FormField::Name,
        FormField::TotalChapters,
        FormField::CompletedChapters,
        FormField::Comment,
        FormField::Status,
        FormField::ReleaseStatus,
        FormField::CoverPath,
    ];

    fn name(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::TotalChapters => "Total Chapters",
            FormField::CompletedChapters => "Completed",
            FormField::Comment => "Comment",
            FormField::Status => "Status",
            FormField::ReleaseStatus => "Release Status",
            FormField::CoverPath => "Cover Image Path",
        }
    }
}

struct App {
    api: MangaApi,
    covers: SupabaseStorage,
    view: ListView,

    focus: Focus,
    list_state: ListState,
    should_quit: bool,

    // Form modal buffers; numeric fields are edited as text and parsed on
    // submit, cover paths are read from disk on submit
    field_index: usize,
    total_buffer: String,
    completed_buffer: String,
    cover_path: String,
    notice: Option<String>,
}

impl App {
    fn new() -> Self {
        Self {
            api: MangaApi::new(),
            covers: SupabaseStorage::new(SUPABASE_URL, SUPABASE_BUCKET, SUPABASE_ANON_KEY),
            view: ListView::new(),
            focus: Focus::Browse,
            list_state: ListState::default(),
            should_quit: false,
            field_index: 0,
            total_buffer: String::new(),
            completed_buffer: String::new(),
            cover_path: String::new(),
            notice: None,
        }
    }

    fn visible_ids(&self) -> Vec<u64> {
        self.view.visible().iter().filter_map(|r| r.id).collect()
    }

    fn selected_id(&self) -> Option<u64> {
        let ids = self.visible_ids();
        self.list_state.selected().and_then(|i| ids.get(i).copied())
    }

    fn select_delta(&mut self, delta: isize) {
        let count = self.view.visible().len();
        if count == 0 {
            self.list_state.select(None);
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(count as isize) as usize;
        self.list_state.select(Some(next));
    }

    fn open_create(&mut self) {
        self.view.open_create();
        self.seed_form_buffers();
        self.focus = Focus::Form;
    }

    fn open_edit(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if self.view.open_edit(id).is_ok() {
            self.seed_form_buffers();
            self.focus = Focus::Form;
        }
    }

    fn seed_form_buffers(&mut self) {
        self.field_index = 0;
        self.cover_path.clear();
        self.notice = None;
        if let Some(form) = self.view.form.form() {
            self.total_buffer = form.data.total_chapters.to_string();
            self.completed_buffer = form.data.completed_chapters.to_string();
        }
    }

    fn current_field(&self) -> FormField {
        FormField::ALL[self.field_index]
    }

    fn next_field(&mut self) {
        self.field_index = (self.field_index + 1) % FormField::ALL.len();
    }

    fn previous_field(&mut self) {
        self.field_index = (self.field_index + FormField::ALL.len() - 1) % FormField::ALL.len();
    }

    fn edit_field(&mut self, key: KeyCode) {
        let field = self.current_field();
        let Some(form) = self.view.form.form_mut() else {
            return;
        };

        let buffer = match field {
            FormField::Name => &mut form.data.name,
            FormField::Comment => &mut form.data.comment,
            FormField::TotalChapters => &mut self.total_buffer,
            FormField::CompletedChapters => &mut self.completed_buffer,
            FormField::CoverPath => &mut self.cover_path,
            FormField::Status => {
                if matches!(key, KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right) {
                    form.data.status = next_status(form.data.status);
                }
                return;
            }
            FormField::ReleaseStatus => {
                if matches!(key, KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right) {
                    form.data.release_status = match form.data.release_status {
                        ReleaseStatus::Ongoing => ReleaseStatus::Finished,
                        ReleaseStatus::Finished => ReleaseStatus::Ongoing,
                    };
                }
                return;
            }
        };

        match key {
            KeyCode::Char(c) => buffer.push(c),
            KeyCode::Backspace => {
                buffer.pop();
            }
            _ => {}
        }
    }

    /// Moves the modal buffers into the form data and submits.
    async fn submit_form(&mut self) {
        self.notice = None;

        let total = match self.total_buffer.trim().parse::<u32>() {
            Ok(n) => n,
            Err(_) => {
                self.notice = Some("Total chapters must be a number".to_string());
                return;
            }
        };
        let completed = match self.completed_buffer.trim().parse::<u32>() {
            Ok(n) => n,
            Err(_) => {
                self.notice = Some("Completed chapters must be a number".to_string());
                return;
            }
        };

        let pending_cover = if self.cover_path.trim().is_empty() {
            None
        } else {
            match std::fs::read(self.cover_path.trim()) {
                Ok(data) => {
                    let file_name = std::path::Path::new(self.cover_path.trim())
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "cover".to_string());
                    Some(CoverImage::Pending(PendingCover {
                        file_name,
                        data: Bytes::from(data),
                    }))
                }
                Err(e) => {
                    self.notice = Some(format!("Cannot read cover file: {}", e));
                    return;
                }
            }
        };

        if let Some(form) = self.view.form.form_mut() {
            form.data.total_chapters = total;
            form.data.completed_chapters = completed;
            if let Some(cover) = pending_cover {
                form.data.cover = Some(cover);
            }
        }

        if self.view.submit(&self.api, &self.covers).await.is_ok() {
            self.focus = Focus::Browse;
        }
    }

    async fn handle_key(&mut self, code: KeyCode) {
        match self.focus {
            Focus::Browse => match code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('/') => self.focus = Focus::Search,
                KeyCode::Char('f') => {
                    let next = cycle_status_filter(self.view.filter.status);
                    self.view.set_status_filter(next);
                    self.list_state.select(None);
                }
                KeyCode::Char('a') => self.open_create(),
                KeyCode::Char('e') => self.open_edit(),
                KeyCode::Char('d') => {
                    if let Some(id) = self.selected_id() {
                        self.focus = Focus::ConfirmDelete(id);
                    }
                }
                KeyCode::Char('r') => self.view.refresh(&self.api).await,
                KeyCode::Up => self.select_delta(-1),
                KeyCode::Down => self.select_delta(1),
                _ => {}
            },
            Focus::Search => match code {
                KeyCode::Esc | KeyCode::Enter => self.focus = Focus::Browse,
                KeyCode::Backspace => {
                    let mut query = self.view.filter.query.clone();
                    query.pop();
                    self.view.set_query(query);
                    self.list_state.select(None);
                }
                KeyCode::Char(c) => {
                    let mut query = self.view.filter.query.clone();
                    query.push(c);
                    self.view.set_query(query);
                    self.list_state.select(None);
                }
                _ => {}
            },
            Focus::Form => match code {
                KeyCode::Esc => {
                    self.view.close_form();
                    self.focus = Focus::Browse;
                }
                KeyCode::Enter => self.submit_form().await,
                KeyCode::Tab | KeyCode::Down => self.next_field(),
                KeyCode::Up => self.previous_field(),
                KeyCode::BackTab => self.previous_field(),
                code => self.edit_field(code),
            },
            Focus::ConfirmDelete(id) => match code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    // Consent was gathered by this modal
                    let _ = self.view.delete(&self.api, &AlwaysConfirm, id).await;
                    self.list_state.select(None);
                    self.focus = Focus::Browse;
                }
                _ => self.focus = Focus::Browse,
            },
        }
    }
}

fn next_status(current: ReadingStatus) -> ReadingStatus {
    let index = ReadingStatus::ALL
        .iter()
        .position(|s| *s == current)
        .unwrap_or(0);
    ReadingStatus::ALL[(index + 1) % ReadingStatus::ALL.len()]
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(frame.size());

    draw_header(frame, app, chunks[0]);
    draw_list(frame, app, chunks[1]);
    draw_footer(frame, app, chunks[2]);

    match app.focus {
        Focus::Form => draw_form_modal(frame, app),
        Focus::ConfirmDelete(_) => draw_confirm_modal(frame),
        _ => {}
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let search_style = if app.focus == Focus::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "Manga List",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   search: "),
        Span::styled(app.view.filter.query.clone(), search_style),
        Span::raw("   filter: "),
        Span::styled(
            filter_label(app.view.filter.status),
            Style::default().fg(Color::Magenta),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    frame.render_widget(header, area);
}

fn draw_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = app
        .view
        .visible()
        .iter()
        .map(|record| ListItem::new(format_record_line(record)))
        .collect();

    let title = if app.view.is_loading() {
        " Loading... "
    } else {
        " Tracked Manga "
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(error) = app.view.error() {
        error_message(error)
    } else if let Some(notice) = &app.notice {
        error_message(notice)
    } else {
        info_message("↑/↓ select  / search  f filter  a add  e edit  d delete  r refresh  q quit")
    };

    let footer = Paragraph::new(line)
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    frame.render_widget(footer, area);
}

fn draw_form_modal(frame: &mut Frame, app: &App) {
    let Some(form) = app.view.form.form() else {
        return;
    };

    let title = match form.mode {
        FormMode::Create => " Create Manga ",
        FormMode::Edit { .. } => " Edit Manga ",
    };

    let area = centered_rect(60, 60, frame.size());
    frame.render_widget(Clear, area);

    let mut lines = Vec::new();
    for (i, field) in FormField::ALL.iter().enumerate() {
        let value = match field {
            FormField::Name => form.data.name.clone(),
            FormField::TotalChapters => app.total_buffer.clone(),
            FormField::CompletedChapters => app.completed_buffer.clone(),
            FormField::Comment => truncate_text(&form.data.comment, 40),
            FormField::Status => form.data.status.label().to_string(),
            FormField::ReleaseStatus => form.data.release_status.label().to_string(),
            FormField::CoverPath => {
                if app.cover_path.is_empty() {
                    form.preview_url().unwrap_or("").to_string()
                } else {
                    app.cover_path.clone()
                }
            }
        };

        let label_style = if i == app.field_index {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{:>16}: ", field.name()), label_style),
            Span::styled(value, Style::default().fg(Color::White)),
        ]));
    }

    lines.push(Line::raw(""));
    let submitting = form.is_submitting();
    lines.push(Line::from(Span::styled(
        if submitting {
            "Submitting..."
        } else {
            "Enter submit  Tab next field  Space cycle  Esc cancel"
        },
        Style::default().fg(Color::DarkGray),
    )));

    let modal = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Double),
    );
    frame.render_widget(modal, area);
}

fn draw_confirm_modal(frame: &mut Frame) {
    let area = centered_rect(40, 20, frame.size());
    frame.render_widget(Clear, area);

    let modal = Paragraph::new(vec![
        Line::raw(""),
        Line::from(Span::styled(
            "Delete this manga?",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "y confirm    any other key cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(" Confirm ")
            .borders(Borders::ALL)
            .border_type(BorderType::Double),
    );
    frame.render_widget(modal, area);
}

#[tokio::main]
async fn main() -> Result<()> {
    install()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    app.view.refresh(&app.api).await;

    let result = run(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code).await;
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
