use crate::app::{App, Dialog, DialogKind, LoginField, MainField, Screen};
use crate::journal_entry::MOODS;
use crate::query::MoodTally;
use color_eyre::Result;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::{
    io::{stdout, Stdout},
    time::Duration,
};
use unicode_width::UnicodeWidthStr;

pub struct UI {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl UI {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;

        Ok(UI { terminal })
    }

    pub fn draw(&mut self, app: &App) -> Result<()> {
        self.terminal.draw(|f| {
            match &app.screen {
                Screen::Login => render_login(f, app),
                Screen::Main => render_main(f, app),
                Screen::Entries(view) => {
                    let chunks = frame_chunks(f.area());
                    f.render_widget(title(view.title), chunks[0]);
                    let body = Paragraph::new(view.body.as_str())
                        .block(Block::default().borders(Borders::ALL).title("Entries"))
                        .scroll((view.scroll, 0));
                    f.render_widget(body, chunks[1]);
                    f.render_widget(instructions("Up/Down/PgUp/PgDn: Scroll, Esc: Back"), chunks[2]);
                }
                Screen::Chart(tally) => render_chart(f, tally),
                Screen::ExportPrompt => render_export(f, app),
            }

            if let Some(dialog) = app.dialog() {
                render_dialog(f, dialog);
            }
        })?;
        Ok(())
    }

    /// Waits up to `timeout` for a key press.
    pub fn next_key(&self, timeout: Duration) -> Result<Option<KeyEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            _ => Ok(None),
        }
    }
}

impl Drop for UI {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

fn frame_chunks(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area)
}

fn title(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
}

fn instructions(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
}

fn field_block(label: &str, focused: bool) -> Block<'_> {
    let style = if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(label)
}

fn render_login(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.area());

    f.render_widget(title("🔐 Login"), chunks[0]);

    let on_user = app.login_focus == LoginField::Username;
    let username = if on_user {
        app.username.with_caret()
    } else {
        app.username.as_str().to_string()
    };
    f.render_widget(
        Paragraph::new(username).block(field_block("Username", on_user)),
        chunks[1],
    );

    let mut masked = "*".repeat(app.password.as_str().chars().count());
    if !on_user {
        masked.push('|');
    }
    f.render_widget(
        Paragraph::new(masked).block(field_block("Password", !on_user)),
        chunks[2],
    );

    f.render_widget(
        instructions("Tab: Switch field, Enter: Login, Esc: Quit"),
        chunks[4],
    );
}

fn render_main(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(3),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.area());

    f.render_widget(title("🧠 Mood Journal - How are you feeling today?"), chunks[0]);

    let mood_spans: Vec<Span> = MOODS
        .iter()
        .enumerate()
        .flat_map(|(i, mood)| {
            let style = if app.mood == Some(i) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            [
                Span::styled(format!(" {} {} ", i + 1, mood), style),
                Span::raw(" "),
            ]
        })
        .collect();
    f.render_widget(
        Paragraph::new(Line::from(mood_spans))
            .block(field_block("Mood (Left/Right or 1-6)", app.focus == MainField::Mood)),
        chunks[1],
    );

    let on_note = app.focus == MainField::Note;
    let note = if on_note {
        app.note.with_caret()
    } else if app.note.is_empty() {
        "(Tab here to write)".to_string()
    } else {
        app.note.as_str().to_string()
    };
    f.render_widget(
        Paragraph::new(note)
            .wrap(Wrap { trim: false })
            .block(field_block("Write your thoughts below", on_note)),
        chunks[2],
    );

    let filters = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(chunks[3]);
    let on_mood_filter = app.focus == MainField::MoodFilter;
    let on_date_filter = app.focus == MainField::DateFilter;
    let mood_filter = if on_mood_filter {
        app.mood_filter.with_caret()
    } else {
        app.mood_filter.as_str().to_string()
    };
    let date_filter = if on_date_filter {
        app.date_filter.with_caret()
    } else {
        app.date_filter.as_str().to_string()
    };
    f.render_widget(
        Paragraph::new(mood_filter).block(field_block("Mood to filter (optional)", on_mood_filter)),
        filters[0],
    );
    f.render_widget(
        Paragraph::new(date_filter)
            .block(field_block("Date to filter (optional YYYY-MM-DD)", on_date_filter)),
        filters[1],
    );

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let controls = Line::from(vec![
        Span::styled("Tab", bold),
        Span::raw(" field, "),
        Span::styled("^S", bold),
        Span::raw(" save, "),
        Span::styled("^V", bold),
        Span::raw(" view, "),
        Span::styled("^F", bold),
        Span::raw(" filter, "),
        Span::styled("^G", bold),
        Span::raw(" chart, "),
        Span::styled("^E", bold),
        Span::raw(" export, "),
        Span::styled("Esc", bold),
        Span::raw(" quit"),
    ]);
    f.render_widget(
        Paragraph::new(controls)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center),
        chunks[4],
    );
}

fn render_chart(f: &mut Frame, tally: &MoodTally) {
    let chunks = frame_chunks(f.area());
    f.render_widget(title("📊 Mood Frequency"), chunks[0]);

    if tally.is_empty() {
        f.render_widget(
            Paragraph::new("No entries yet.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Count")),
            chunks[1],
        );
    } else {
        let widest_label = tally
            .iter()
            .map(|(mood, _)| mood.width())
            .max()
            .unwrap_or(1);
        let bar_width = bar_width(widest_label, tally.len(), chunks[1].width);
        let bars: Vec<Bar> = tally
            .iter()
            .map(|(mood, count)| {
                Bar::default()
                    .value(count)
                    .label(Line::from(mood.to_string()))
            })
            .collect();
        let chart = BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Count ({} entries)", tally.total())),
            )
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(2)
            .bar_style(Style::default().fg(Color::Cyan))
            .value_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(chart, chunks[1]);
    }

    f.render_widget(instructions("Esc: Back"), chunks[2]);
}

/// Width of each chart bar: wide enough for the longest label, narrow enough to fit.
fn bar_width(widest_label: usize, bars: usize, area_width: u16) -> u16 {
    let label = u16::try_from(widest_label.clamp(3, 20)).unwrap_or(20);
    let bars = u16::try_from(bars.max(1)).unwrap_or(u16::MAX);
    let per_bar = (area_width.saturating_sub(2) / bars).saturating_sub(2).max(1);
    label.min(per_bar)
}

fn render_export(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(1),
            ]
            .as_ref(),
        )
        .split(f.area());

    f.render_widget(title("📤 Export to File"), chunks[0]);
    f.render_widget(
        Paragraph::new(app.export_path.with_caret())
            .block(field_block("File path (.txt added if no extension)", true)),
        chunks[1],
    );
    f.render_widget(instructions("Enter: Export, Esc: Cancel"), chunks[2]);
}

fn render_dialog(f: &mut Frame, dialog: &Dialog) {
    let color = match dialog.kind {
        DialogKind::Info => Color::Cyan,
        DialogKind::Warning => Color::Yellow,
        DialogKind::Error => Color::Red,
    };
    let area = centered(f.area(), 50, 7);
    let body = Paragraph::new(vec![
        Line::from(dialog.message.as_str()),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: OK",
            Style::default().fg(Color::Yellow),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(dialog.title.as_str()),
    );
    f.render_widget(Clear, area);
    f.render_widget(body, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
