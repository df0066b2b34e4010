use crate::credentials::CredentialStore;
use crate::entry_store::{export_to_file, EntryStore};
use crate::error::JournalResult;
use crate::journal_entry::{JournalEntry, MOODS};
use crate::query::{aggregate_by_mood, export_text, filter, MoodTally};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::VecDeque;
use std::path::PathBuf;
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Login,
    Save,
    ViewAll,
    Filter,
    Chart,
    Export,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Login,
    Main,
    Entries(EntryView),
    Chart(MoodTally),
    ExportPrompt,
}

/// Scrollable text rendering of a set of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    pub title: &'static str,
    pub body: String,
    pub scroll: u16,
}

impl EntryView {
    fn new(title: &'static str, body: String) -> Self {
        EntryView {
            title,
            body,
            scroll: 0,
        }
    }

    fn max_scroll(&self) -> u16 {
        u16::try_from(self.body.lines().count()).unwrap_or(u16::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainField {
    Mood,
    Note,
    MoodFilter,
    DateFilter,
}

impl MainField {
    const ORDER: [MainField; 4] = [
        MainField::Mood,
        MainField::Note,
        MainField::MoodFilter,
        MainField::DateFilter,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
}

impl Dialog {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_kind(DialogKind::Info, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_kind(DialogKind::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_kind(DialogKind::Error, title, message)
    }

    fn with_kind(kind: DialogKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Dialog {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Single-line or multi-line text field with a char-indexed cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// The text with a `|` caret at the cursor position.
    pub fn with_caret(&self) -> String {
        let mut shown = self.text.clone();
        shown.insert(self.byte_index(), '|');
        shown
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self) -> usize {
        self.text
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn insert(&mut self, c: char) {
        let idx = self.byte_index();
        self.text.insert(idx, c);
        self.cursor += 1;
    }

    /// Applies an editing key. Returns false when the key is not an edit.
    fn edit(&mut self, code: KeyCode, multiline: bool) -> bool {
        match code {
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Enter if multiline => self.insert('\n'),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let idx = self.byte_index();
                    self.text.remove(idx);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.char_len() {
                    let idx = self.byte_index();
                    self.text.remove(idx);
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.char_len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.char_len(),
            _ => return false,
        }
        true
    }
}

/// All presentation state, owned by the UI loop and handed to the renderer.
#[derive(Debug)]
pub struct App {
    pub screen: Screen,
    pub username: TextInput,
    pub password: TextInput,
    pub login_focus: LoginField,
    pub mood: Option<usize>,
    pub note: TextInput,
    pub mood_filter: TextInput,
    pub date_filter: TextInput,
    pub export_path: TextInput,
    pub focus: MainField,
    authenticated: bool,
    dialogs: VecDeque<Dialog>,
    should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        App {
            screen: Screen::Login,
            username: TextInput::default(),
            password: TextInput::default(),
            login_focus: LoginField::Username,
            mood: None,
            note: TextInput::default(),
            mood_filter: TextInput::default(),
            date_filter: TextInput::default(),
            export_path: TextInput::default(),
            focus: MainField::Mood,
            authenticated: false,
            dialogs: VecDeque::new(),
            should_quit: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// The reminder runs only for a logged-in session, and only once.
    pub fn should_start_reminder(&self, running: bool) -> bool {
        self.is_authenticated() && !running
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The dialog currently on top, if any.
    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialogs.front()
    }

    pub fn selected_mood(&self) -> Option<&'static str> {
        self.mood.map(|i| MOODS[i])
    }

    pub fn show(&mut self, dialog: Dialog) {
        self.dialogs.push_back(dialog);
    }

    pub fn remind(&mut self) {
        self.show(Dialog::info("Reminder", "🧠 Time to log your mood!"));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        if !self.dialogs.is_empty() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.dialogs.pop_front();
            }
            return None;
        }

        match self.screen {
            Screen::Login => self.login_key(key.code),
            Screen::Main => self.main_key(key.code, ctrl),
            Screen::Entries(_) => {
                self.entries_key(key.code);
                None
            }
            Screen::Chart(_) => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    self.screen = Screen::Main;
                }
                None
            }
            Screen::ExportPrompt => match key.code {
                KeyCode::Enter => Some(Action::Export),
                KeyCode::Esc => {
                    self.screen = Screen::Main;
                    None
                }
                code => {
                    self.export_path.edit(code, false);
                    None
                }
            },
        }
    }

    fn login_key(&mut self, code: KeyCode) -> Option<Action> {
        match code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.login_focus = match self.login_focus {
                    LoginField::Username => LoginField::Password,
                    LoginField::Password => LoginField::Username,
                };
                None
            }
            KeyCode::Enter => match self.login_focus {
                LoginField::Username => {
                    self.login_focus = LoginField::Password;
                    None
                }
                LoginField::Password => Some(Action::Login),
            },
            KeyCode::Esc => Some(Action::Quit),
            code => {
                match self.login_focus {
                    LoginField::Username => self.username.edit(code, false),
                    LoginField::Password => self.password.edit(code, false),
                };
                None
            }
        }
    }

    fn main_key(&mut self, code: KeyCode, ctrl: bool) -> Option<Action> {
        if ctrl {
            return match code {
                KeyCode::Char('s') => Some(Action::Save),
                KeyCode::Char('v') => Some(Action::ViewAll),
                KeyCode::Char('f') => Some(Action::Filter),
                KeyCode::Char('g') => Some(Action::Chart),
                KeyCode::Char('e') => {
                    self.screen = Screen::ExportPrompt;
                    None
                }
                _ => None,
            };
        }

        match code {
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Esc => return Some(Action::Quit),
            code => match self.focus {
                MainField::Mood => self.mood_key(code),
                MainField::Note => {
                    self.note.edit(code, true);
                }
                MainField::MoodFilter => {
                    self.mood_filter.edit(code, false);
                }
                MainField::DateFilter => {
                    self.date_filter.edit(code, false);
                }
            },
        }
        None
    }

    fn mood_key(&mut self, code: KeyCode) {
        let count = MOODS.len();
        self.mood = match code {
            KeyCode::Right | KeyCode::Down => Some(self.mood.map_or(0, |i| (i + 1) % count)),
            KeyCode::Left | KeyCode::Up => Some(self.mood.map_or(count - 1, |i| (i + count - 1) % count)),
            KeyCode::Char(c) => match c.to_digit(10) {
                Some(d) if (1..=count as u32).contains(&d) => Some(d as usize - 1),
                _ => self.mood,
            },
            KeyCode::Backspace | KeyCode::Delete => None,
            _ => self.mood,
        };
    }

    fn entries_key(&mut self, code: KeyCode) {
        if matches!(code, KeyCode::Esc | KeyCode::Char('q')) {
            self.screen = Screen::Main;
            return;
        }
        if let Screen::Entries(view) = &mut self.screen {
            let max = view.max_scroll();
            view.scroll = match code {
                KeyCode::Up => view.scroll.saturating_sub(1),
                KeyCode::Down => view.scroll.saturating_add(1).min(max),
                KeyCode::PageUp => view.scroll.saturating_sub(10),
                KeyCode::PageDown => view.scroll.saturating_add(10).min(max),
                KeyCode::Home => 0,
                KeyCode::End => max,
                _ => view.scroll,
            };
        }
    }

    /// Runs `action` against the stores. Failures become an error dialog.
    pub fn perform(&mut self, action: Action, entries: &EntryStore, credentials: &CredentialStore) {
        if let Err(err) = self.try_perform(action, entries, credentials) {
            error!(?action, error = %err, "action failed");
            self.show(Dialog::error("Error", err.to_string()));
        }
    }

    fn try_perform(
        &mut self,
        action: Action,
        entries: &EntryStore,
        credentials: &CredentialStore,
    ) -> JournalResult<()> {
        match action {
            Action::Login => {
                if credentials.verify(self.username.as_str(), self.password.as_str())? {
                    self.password.clear();
                    self.authenticated = true;
                    self.screen = Screen::Main;
                } else {
                    self.show(Dialog::error("Login Failed", "Invalid username or password."));
                }
            }
            Action::Save => {
                let note = self.note.as_str().trim();
                let entry = match self.selected_mood() {
                    Some(mood) if !note.is_empty() => JournalEntry::now(mood, note),
                    _ => {
                        self.show(Dialog::warning(
                            "Missing Info",
                            "Please select a mood and write something.",
                        ));
                        return Ok(());
                    }
                };
                entries.append(&entry)?;
                self.show(Dialog::info("Saved", "Your mood has been logged."));
                self.note.clear();
                self.mood = None;
            }
            Action::ViewAll => {
                let all = entries.read_all()?;
                self.screen = Screen::Entries(EntryView::new("Past Entries", export_text(&all)));
            }
            Action::Filter => {
                let all = entries.read_all()?;
                let matched = filter(&all, self.mood_filter.as_str(), self.date_filter.as_str());
                self.screen =
                    Screen::Entries(EntryView::new("Filtered Entries", export_text(&matched)));
            }
            Action::Chart => {
                let all = entries.read_all()?;
                self.screen = Screen::Chart(aggregate_by_mood(&all));
            }
            Action::Export => {
                let raw = self.export_path.as_str().trim();
                if raw.is_empty() {
                    self.screen = Screen::Main;
                    return Ok(());
                }
                let path = with_default_extension(raw);
                let all = entries.read_all()?;
                export_to_file(&path, &all)?;
                self.export_path.clear();
                self.screen = Screen::Main;
                self.show(Dialog::info("Exported", "Entries exported successfully!"));
            }
            Action::Quit => self.should_quit = true,
        }
        Ok(())
    }
}

fn with_default_extension(raw: &str) -> PathBuf {
    let mut path = PathBuf::from(raw);
    if path.extension().is_none() {
        path.set_extension("txt");
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{DEFAULT_PASSWORD, DEFAULT_USERNAME};
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        dir: TempDir,
        entries: EntryStore,
        credentials: CredentialStore,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let entries = EntryStore::new(dir.path().join("mood_data.json"));
        let credentials = CredentialStore::new(dir.path().join("credentials.json"));
        entries.ensure_initialized().unwrap();
        credentials.ensure_initialized().unwrap();
        Fixture {
            dir,
            entries,
            credentials,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            let code = if c == '\n' { KeyCode::Enter } else { KeyCode::Char(c) };
            assert_eq!(app.handle_key(key(code)), None);
        }
    }

    fn press(app: &mut App, fx: &Fixture, event: KeyEvent) {
        if let Some(action) = app.handle_key(event) {
            app.perform(action, &fx.entries, &fx.credentials);
        }
    }

    fn logged_in(fx: &Fixture) -> App {
        let mut app = App::new();
        type_text(&mut app, DEFAULT_USERNAME);
        press(&mut app, fx, key(KeyCode::Enter));
        type_text(&mut app, DEFAULT_PASSWORD);
        press(&mut app, fx, key(KeyCode::Enter));
        assert_eq!(app.screen, Screen::Main);
        app
    }

    #[test]
    fn login_with_default_pair_opens_main_screen() {
        let fx = fixture();
        let app = logged_in(&fx);
        assert!(app.is_authenticated());
        assert!(app.password.is_empty());
        assert!(app.dialog().is_none());
    }

    #[test]
    fn reminder_waits_for_login() {
        let fx = fixture();
        let app = App::new();
        assert!(!app.should_start_reminder(false));

        let app = logged_in(&fx);
        assert!(app.should_start_reminder(false));
        assert!(!app.should_start_reminder(true));
    }

    #[test]
    fn failed_login_does_not_start_reminder() {
        let fx = fixture();
        let mut app = App::new();
        type_text(&mut app, "admin");
        press(&mut app, &fx, key(KeyCode::Enter));
        type_text(&mut app, "nope");
        press(&mut app, &fx, key(KeyCode::Enter));

        assert!(!app.should_start_reminder(false));
    }

    #[test]
    fn wrong_password_stays_on_login_with_error() {
        let fx = fixture();
        let mut app = App::new();
        type_text(&mut app, "admin");
        press(&mut app, &fx, key(KeyCode::Tab));
        type_text(&mut app, "wrong");
        press(&mut app, &fx, key(KeyCode::Enter));

        assert_eq!(app.screen, Screen::Login);
        assert!(!app.is_authenticated());
        let dialog = app.dialog().unwrap();
        assert_eq!(dialog.kind, DialogKind::Error);
        assert_eq!(dialog.title, "Login Failed");

        press(&mut app, &fx, key(KeyCode::Enter));
        assert!(app.dialog().is_none());
    }

    #[test]
    fn open_dialog_swallows_other_keys() {
        let fx = fixture();
        let mut app = logged_in(&fx);
        app.remind();

        press(&mut app, &fx, ctrl('s'));
        press(&mut app, &fx, key(KeyCode::Char('x')));

        assert_eq!(app.dialog().unwrap().title, "Reminder");
        assert!(fx.entries.read_all().unwrap().is_empty());
        press(&mut app, &fx, key(KeyCode::Esc));
        assert!(app.dialog().is_none());
        assert!(!app.should_quit());
    }

    #[test]
    fn dialogs_are_shown_in_arrival_order() {
        let mut app = App::new();
        app.remind();
        app.show(Dialog::warning("Second", "later"));

        assert_eq!(app.dialog().unwrap().title, "Reminder");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.dialog().unwrap().title, "Second");
    }

    #[test]
    fn save_without_mood_warns_and_writes_nothing() {
        let fx = fixture();
        let mut app = logged_in(&fx);
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "Just a note");

        press(&mut app, &fx, ctrl('s'));

        let dialog = app.dialog().unwrap();
        assert_eq!(dialog.kind, DialogKind::Warning);
        assert_eq!(dialog.title, "Missing Info");
        assert!(fx.entries.read_all().unwrap().is_empty());
        assert_eq!(app.note.as_str(), "Just a note");
    }

    #[test]
    fn save_with_blank_note_warns() {
        let fx = fixture();
        let mut app = logged_in(&fx);
        app.handle_key(key(KeyCode::Char('1')));
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "  \n ");

        press(&mut app, &fx, ctrl('s'));

        assert_eq!(app.dialog().unwrap().kind, DialogKind::Warning);
        assert!(fx.entries.read_all().unwrap().is_empty());
    }

    #[test]
    fn save_appends_trimmed_entry_and_resets_form() {
        let fx = fixture();
        let mut app = logged_in(&fx);
        app.handle_key(key(KeyCode::Char('2')));
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "  Rainy day\nstayed in  ");

        press(&mut app, &fx, ctrl('s'));

        let saved = fx.entries.read_all().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].mood, "😢 Sad");
        assert_eq!(saved[0].note, "Rainy day\nstayed in");
        assert_eq!(app.dialog().unwrap().title, "Saved");
        assert!(app.note.is_empty());
        assert_eq!(app.mood, None);
    }

    #[test]
    fn mood_picker_cycles_through_all_six() {
        let mut app = App::new();
        app.screen = Screen::Main;

        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.selected_mood(), Some("😊 Happy"));
        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.selected_mood(), Some("😴 Tired"));
        app.handle_key(key(KeyCode::Char('6')));
        assert_eq!(app.selected_mood(), Some("😌 Grateful"));
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.selected_mood(), Some("😊 Happy"));
        app.handle_key(key(KeyCode::Char('9')));
        assert_eq!(app.selected_mood(), Some("😊 Happy"));
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.selected_mood(), None);
    }

    #[test]
    fn focus_cycles_both_ways() {
        let mut app = App::new();
        app.screen = Screen::Main;
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.focus, MainField::DateFilter);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, MainField::Mood);
    }

    #[test]
    fn view_all_renders_every_entry() {
        let fx = fixture();
        let stored = vec![
            JournalEntry::new("2024-01-01 09:00", "😊 Happy", "Good morning"),
            JournalEntry::new("2024-01-02 22:00", "😴 Tired", "Late"),
        ];
        for e in &stored {
            fx.entries.append(e).unwrap();
        }
        let mut app = logged_in(&fx);

        press(&mut app, &fx, ctrl('v'));

        match &app.screen {
            Screen::Entries(view) => {
                assert_eq!(view.title, "Past Entries");
                assert_eq!(view.body, export_text(&stored));
            }
            other => panic!("unexpected screen {other:?}"),
        }
        press(&mut app, &fx, key(KeyCode::Esc));
        assert_eq!(app.screen, Screen::Main);
    }

    #[test]
    fn filter_uses_the_filter_fields() {
        let fx = fixture();
        let happy = JournalEntry::new("2024-01-01 09:00", "😊 Happy", "Good morning");
        let sad = JournalEntry::new("2024-01-02 22:00", "😢 Sad", "Rain");
        fx.entries.append(&happy).unwrap();
        fx.entries.append(&sad).unwrap();
        let mut app = logged_in(&fx);
        app.focus = MainField::MoodFilter;
        type_text(&mut app, "Happy");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "2024-01");

        press(&mut app, &fx, ctrl('f'));

        match &app.screen {
            Screen::Entries(view) => {
                assert_eq!(view.title, "Filtered Entries");
                assert_eq!(view.body, export_text(&[happy]));
            }
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[test]
    fn entry_view_scroll_is_clamped() {
        let fx = fixture();
        fx.entries
            .append(&JournalEntry::new("2024-01-01 09:00", "Happy", "one"))
            .unwrap();
        let mut app = logged_in(&fx);
        press(&mut app, &fx, ctrl('v'));

        for _ in 0..20 {
            app.handle_key(key(KeyCode::Down));
        }
        match &app.screen {
            Screen::Entries(view) => assert_eq!(view.scroll, 3),
            other => panic!("unexpected screen {other:?}"),
        }
        app.handle_key(key(KeyCode::Home));
        match &app.screen {
            Screen::Entries(view) => assert_eq!(view.scroll, 0),
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[test]
    fn scrolling_past_the_end_of_a_huge_view_stays_put() {
        let mut app = App::new();
        app.screen = Screen::Entries(EntryView::new("Past Entries", "line\n".repeat(70_000)));

        app.handle_key(key(KeyCode::End));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::PageDown));

        match &app.screen {
            Screen::Entries(view) => assert_eq!(view.scroll, u16::MAX),
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[test]
    fn chart_shows_mood_counts() {
        let fx = fixture();
        for mood in ["Happy", "Sad", "Happy"] {
            fx.entries
                .append(&JournalEntry::new("2024-01-01 09:00", mood, "n"))
                .unwrap();
        }
        let mut app = logged_in(&fx);

        press(&mut app, &fx, ctrl('g'));

        match &app.screen {
            Screen::Chart(tally) => {
                assert_eq!(tally.get("Happy"), 2);
                assert_eq!(tally.get("Sad"), 1);
            }
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[test]
    fn export_adds_txt_extension_and_writes_all_entries() {
        let fx = fixture();
        let entry = JournalEntry::new("2024-01-01 09:00", "Happy", "Good morning");
        fx.entries.append(&entry).unwrap();
        let mut app = logged_in(&fx);
        let target = fx.dir.path().join("backup");

        press(&mut app, &fx, ctrl('e'));
        assert_eq!(app.screen, Screen::ExportPrompt);
        type_text(&mut app, target.to_str().unwrap());
        press(&mut app, &fx, key(KeyCode::Enter));

        let written = fs::read_to_string(fx.dir.path().join("backup.txt")).unwrap();
        assert_eq!(written, export_text(&[entry]));
        assert_eq!(app.screen, Screen::Main);
        assert_eq!(app.dialog().unwrap().title, "Exported");
    }

    #[test]
    fn empty_export_path_cancels() {
        let fx = fixture();
        let mut app = logged_in(&fx);

        press(&mut app, &fx, ctrl('e'));
        press(&mut app, &fx, key(KeyCode::Enter));

        assert_eq!(app.screen, Screen::Main);
        assert!(app.dialog().is_none());
    }

    #[test]
    fn store_failure_becomes_error_dialog() {
        let fx = fixture();
        let mut app = logged_in(&fx);
        let broken = EntryStore::new(fx.dir.path().join("no_such_dir").join("mood_data.json"));
        app.mood = Some(0);
        app.focus = MainField::Note;
        type_text(&mut app, "note");

        app.perform(Action::Save, &broken, &fx.credentials);

        let dialog = app.dialog().unwrap();
        assert_eq!(dialog.kind, DialogKind::Error);
        assert_eq!(dialog.title, "Error");
        assert!(dialog.message.contains("no_such_dir"));
        assert!(!app.should_quit());
    }

    #[test]
    fn quit_paths() {
        let fx = fixture();
        let mut app = logged_in(&fx);
        press(&mut app, &fx, key(KeyCode::Esc));
        assert!(app.should_quit());

        let mut app = App::new();
        app.show(Dialog::info("Open", "dialog"));
        press(&mut app, &fx, ctrl('c'));
        assert!(app.should_quit());
    }

    #[test]
    fn text_input_edits_multibyte_text() {
        let mut input = TextInput::default();
        for c in "héllo".chars() {
            input.edit(KeyCode::Char(c), false);
        }
        input.edit(KeyCode::Left, false);
        input.edit(KeyCode::Left, false);
        input.edit(KeyCode::Backspace, false);
        assert_eq!(input.as_str(), "hélo");
        assert_eq!(input.with_caret(), "hé|lo");
        input.edit(KeyCode::Home, false);
        input.edit(KeyCode::Delete, false);
        assert_eq!(input.as_str(), "élo");
        assert!(!input.edit(KeyCode::Enter, false));
        input.edit(KeyCode::End, false);
        assert!(input.edit(KeyCode::Enter, true));
        assert_eq!(input.as_str(), "élo\n");
    }
}
