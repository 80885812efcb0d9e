//! Main application logic for the terminal user interface.
//!
//! `App` wraps a [`TaskListScreen`] with the terminal-only state: which part of the
//! screen has focus, the selected row, text cursors and a status line. Key presses are
//! translated into screen operations, and every frame is drawn from
//! [`TaskListScreen::render`].

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use tracing::debug;

use crate::screen::TaskListScreen;
use crate::task::TaskId;
use crate::tui::{
    colors::{ACCENT, ACCENT_DARK, BORDER, CARD, DANGER, PLACEHOLDER, TEXT},
    enums::{Focus, KeyOutcome},
    input::InputField,
};
use crate::view::{RowMode, ScreenView};

const HIGHLIGHT_SYMBOL: &str = ">> ";
const ADD_BUTTON: &str = "[ Add ]";
const ACTIONS_WIDTH: u16 = 21;

/// Terminal column of the cursor in `input`, drawn from `origin` and kept left of `limit`.
///
/// Uses display width so wide characters move the cursor by two columns.
fn cursor_column(origin: u16, input: &InputField, limit: u16) -> u16 {
    let width = Span::raw(input.before_cursor()).width();
    let offset = u16::try_from(width).unwrap_or(u16::MAX);
    origin.saturating_add(offset).min(limit.saturating_sub(1))
}

/// Terminal state layered over the task list screen.
pub struct App {
    screen: TaskListScreen,
    focus: Focus,
    selected: usize,
    table_state: TableState,
    compose_input: InputField,
    draft_input: InputField,
    status_message: String,
}

impl App {
    pub fn new() -> Self {
        App {
            screen: TaskListScreen::new(),
            focus: Focus::Compose,
            selected: 0,
            table_state: TableState::default(),
            compose_input: InputField::new(),
            draft_input: InputField::new(),
            status_message: String::new(),
        }
    }

    /// Create an app whose list is pre-filled by adding each entry in order.
    pub fn with_tasks(seed: &[String]) -> Self {
        let mut app = Self::new();
        for text in seed {
            app.screen.add_task(text);
        }
        app
    }

    pub fn screen(&self) -> &TaskListScreen {
        &self.screen
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    fn selected_id(&self) -> Option<TaskId> {
        self.screen.tasks().iter().nth(self.selected).map(|t| t.id.clone())
    }

    fn clamp_selection(&mut self) {
        let len = self.screen.tasks().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Translate one key press into screen operations.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> KeyOutcome {
        if modifiers.contains(KeyModifiers::CONTROL) && matches!(code, KeyCode::Char('c') | KeyCode::Char('q')) {
            return KeyOutcome::Quit;
        }
        self.status_message.clear();

        if self.screen.editing_id().is_some() {
            self.handle_edit_input(code, modifiers);
            return KeyOutcome::Continue;
        }
        match self.focus {
            Focus::Compose => {
                self.handle_compose_input(code);
                KeyOutcome::Continue
            }
            Focus::List => self.handle_list_input(code),
        }
    }

    fn handle_compose_input(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => {
                if self.screen.submit_compose().is_some() {
                    self.compose_input = InputField::new();
                    self.selected = 0;
                    self.set_status_message("Task added");
                }
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focus = Focus::List;
                self.clamp_selection();
            }
            KeyCode::Char(c) => {
                self.compose_input.handle_char(c);
                self.screen.set_compose(self.compose_input.value.clone());
            }
            KeyCode::Backspace => {
                self.compose_input.handle_backspace();
                self.screen.set_compose(self.compose_input.value.clone());
            }
            KeyCode::Delete => {
                self.compose_input.handle_delete();
                self.screen.set_compose(self.compose_input.value.clone());
            }
            KeyCode::Left => self.compose_input.move_cursor_left(),
            KeyCode::Right => self.compose_input.move_cursor_right(),
            KeyCode::Home => self.compose_input.move_home(),
            KeyCode::End => self.compose_input.move_end(),
            _ => {}
        }
    }

    fn handle_list_input(&mut self, code: KeyCode) -> KeyOutcome {
        match code {
            KeyCode::Char('q') => return KeyOutcome::Quit,
            KeyCode::Tab | KeyCode::Esc => self.focus = Focus::Compose,
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected > 0 {
                    self.selected -= 1;
                } else {
                    self.focus = Focus::Compose;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.screen.tasks().len() {
                    self.selected += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char('e') => {
                if let Some(id) = self.selected_id() {
                    self.screen.begin_edit(&id);
                    self.draft_input = InputField::with_value(self.screen.draft().unwrap_or_default());
                }
            }
            KeyCode::Delete | KeyCode::Char('d') => {
                if let Some(id) = self.selected_id() {
                    self.screen.remove_task(&id);
                    self.clamp_selection();
                    self.set_status_message("Task deleted");
                }
            }
            _ => {}
        }
        KeyOutcome::Continue
    }

    fn handle_edit_input(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Enter => {
                if self.screen.save_edit() {
                    self.set_status_message("Task saved");
                }
            }
            KeyCode::Esc => self.screen.cancel_edit(),
            KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(id) = self.screen.editing_id().cloned() {
                    self.screen.remove_task(&id);
                    self.clamp_selection();
                    self.set_status_message("Task deleted");
                }
            }
            KeyCode::Char(c) => {
                self.draft_input.handle_char(c);
                self.screen.update_draft(self.draft_input.value.clone());
            }
            KeyCode::Backspace => {
                self.draft_input.handle_backspace();
                self.screen.update_draft(self.draft_input.value.clone());
            }
            KeyCode::Delete => {
                self.draft_input.handle_delete();
                self.screen.update_draft(self.draft_input.value.clone());
            }
            KeyCode::Left => self.draft_input.move_cursor_left(),
            KeyCode::Right => self.draft_input.move_cursor_right(),
            KeyCode::Home => self.draft_input.move_home(),
            KeyCode::End => self.draft_input.move_end(),
            _ => {}
        }
    }

    /// Poll for one key event and handle it.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(false);
                }
                return Ok(self.handle_key(key.code, key.modifiers) == KeyOutcome::Quit);
            }
        }
        Ok(false)
    }

    fn render_title(&self, f: &mut Frame, area: Rect, view: &ScreenView) {
        let title = Paragraph::new(Line::from(Span::styled(
            view.title,
            Style::default().fg(ACCENT_DARK).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(BORDER)));
        f.render_widget(title, area);
    }

    /// Render the compose field and the Add button side by side.
    fn render_compose(&self, f: &mut Frame, area: Rect, view: &ScreenView) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(ADD_BUTTON.len() as u16 + 2)])
            .split(area);

        let composing = self.focus == Focus::Compose && self.screen.editing_id().is_none();
        let border_color = if composing { ACCENT } else { BORDER };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(chunks[0]);

        let content = if view.compose.is_empty() {
            Span::styled(view.compose_placeholder, Style::default().fg(PLACEHOLDER))
        } else {
            Span::styled(view.compose.as_str(), Style::default().fg(TEXT))
        };
        f.render_widget(Paragraph::new(Line::from(content)).block(block), chunks[0]);

        let button = Paragraph::new(Span::styled(
            ADD_BUTTON,
            Style::default().fg(ACCENT_DARK).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded).border_style(Style::default().fg(ACCENT)));
        f.render_widget(button, chunks[1]);

        if composing {
            let x = cursor_column(inner.x, &self.compose_input, inner.right());
            f.set_cursor_position((x, inner.y));
        }
    }

    /// Render the task rows, or the empty-state message when there are none.
    fn render_list(&mut self, f: &mut Frame, area: Rect, view: &ScreenView) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BORDER))
            .title(format!("Tasks ({})", view.rows.len()));

        if let Some(message) = view.empty_message {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(message, Style::default().fg(PLACEHOLDER))),
            ])
            .alignment(Alignment::Center)
            .block(block);
            f.render_widget(empty, area);
            return;
        }

        let inner = block.inner(area);
        let rows: Vec<Row> = view
            .rows
            .iter()
            .map(|row| {
                // Labels name the keys that trigger them in the row's mode.
                let (text, primary, delete) = match &row.mode {
                    RowMode::Display { name } => (
                        Span::styled(name.as_str(), Style::default().fg(TEXT)),
                        Span::styled("[e]dit", Style::default().fg(ACCENT_DARK)),
                        "[d]elete",
                    ),
                    RowMode::Editing { draft } => (
                        Span::styled(draft.as_str(), Style::default().fg(TEXT).add_modifier(Modifier::UNDERLINED)),
                        Span::styled("Enter save", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
                        "^D delete",
                    ),
                };
                let actions = Line::from(vec![
                    primary,
                    Span::raw("  "),
                    Span::styled(delete, Style::default().fg(DANGER)),
                ]);
                Row::new(vec![Cell::from(Line::from(text)), Cell::from(actions)])
            })
            .collect();

        let widths = [Constraint::Min(10), Constraint::Length(ACTIONS_WIDTH)];
        let table = Table::new(rows, widths)
            .block(block)
            .row_highlight_style(Style::default().bg(CARD).fg(Color::Black))
            .highlight_symbol(HIGHLIGHT_SYMBOL);

        let editing_index = view.rows.iter().position(|row| row.is_editing());
        let highlighted = editing_index.or((self.focus == Focus::List).then_some(self.selected));
        self.table_state.select(highlighted);
        f.render_stateful_widget(table, area, &mut self.table_state);

        if let Some(idx) = editing_index {
            let Some(visible) = idx.checked_sub(self.table_state.offset()) else {
                return;
            };
            if let Ok(row) = u16::try_from(visible) {
                if row < inner.height {
                    let origin = inner.x.saturating_add(HIGHLIGHT_SYMBOL.len() as u16);
                    let x = cursor_column(origin, &self.draft_input, inner.right());
                    f.set_cursor_position((x, inner.y + row));
                }
            }
        }
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&self, f: &mut Frame, area: Rect, view: &ScreenView) {
        let hint = if self.screen.editing_id().is_some() {
            "Editing | Enter save  Esc cancel  Ctrl+D delete".to_string()
        } else {
            match self.focus {
                Focus::Compose => format!("Tasks: {} | Enter add  Tab list  Ctrl+C quit", view.rows.len()),
                Focus::List => format!("Tasks: {} | e edit  d delete  Tab compose  q quit", view.rows.len()),
            }
        };
        let text = if self.status_message.is_empty() {
            hint
        } else {
            format!("{} | {}", self.status_message, hint)
        };
        let status = Paragraph::new(text)
            .style(Style::default().bg(ACCENT_DARK).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Draw the whole screen from a fresh projection of the state.
    pub fn render(&mut self, f: &mut Frame) {
        let view = self.screen.render();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.render_title(f, chunks[0], &view);
        self.render_compose(f, chunks[1], &view);
        self.render_list(f, chunks[2], &view);
        self.render_status_bar(f, chunks[3], &view);
    }

    /// Main event loop for the TUI application.
    ///
    /// Redraws after every handled key until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                debug!(tasks = self.screen.tasks().len(), "quit requested");
                break;
            }
        }
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn press(app: &mut App, code: KeyCode) -> KeyOutcome {
        app.handle_key(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn names(app: &App) -> Vec<String> {
        app.screen().tasks().iter().map(|t| t.name.clone()).collect()
    }

    fn render_to_string(app: &mut App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        let buf = terminal.backend().buffer();
        let area = buf.area;
        let mut lines = Vec::new();
        for y in area.y..area.y + area.height {
            let mut line = String::new();
            for x in area.x..area.x + area.width {
                line.push_str(buf[(x, y)].symbol());
            }
            lines.push(line.trim_end().to_string());
        }
        lines.join("\n")
    }

    #[test]
    fn typing_and_enter_adds_task() {
        let mut app = App::new();
        type_text(&mut app, "Buy milk");
        assert_eq!(app.screen().compose(), "Buy milk");
        press(&mut app, KeyCode::Enter);
        assert_eq!(names(&app), vec!["Buy milk"]);
        assert_eq!(app.screen().compose(), "");
        assert_eq!(app.status_message(), "Task added");
    }

    #[test]
    fn blank_compose_is_ignored_silently() {
        let mut app = App::new();
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert!(app.screen().tasks().is_empty());
        assert_eq!(app.status_message(), "");
    }

    #[test]
    fn edit_flow_renames_selected_row() {
        let mut app = App::with_tasks(&["Buy milk".to_string(), "Walk dog".to_string()]);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus(), Focus::List);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected(), 1);

        press(&mut app, KeyCode::Char('e'));
        assert!(app.screen().editing_id().is_some());
        for _ in 0.."milk".len() {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "oat milk");
        press(&mut app, KeyCode::Enter);

        assert_eq!(names(&app), vec!["Walk dog", "Buy oat milk"]);
        assert!(app.screen().editing_id().is_none());
    }

    #[test]
    fn letters_go_to_draft_while_editing() {
        let mut app = App::with_tasks(&["a".to_string()]);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "qd");
        assert_eq!(app.screen().draft(), Some("aqd"));
        assert_eq!(names(&app), vec!["a"]);
    }

    #[test]
    fn escape_cancels_edit() {
        let mut app = App::with_tasks(&["a".to_string()]);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, "bc");
        press(&mut app, KeyCode::Esc);
        assert_eq!(names(&app), vec!["a"]);
        assert!(app.screen().editing_id().is_none());
        assert_eq!(app.focus(), Focus::List);
    }

    #[test]
    fn delete_removes_selected_and_clamps() {
        let mut app = App::with_tasks(&["a".to_string(), "b".to_string()]);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(names(&app), vec!["b"]);
        assert_eq!(app.selected(), 0);
        press(&mut app, KeyCode::Char('d'));
        assert!(app.screen().tasks().is_empty());
        press(&mut app, KeyCode::Char('d'));
        assert!(app.screen().tasks().is_empty());
    }

    #[test]
    fn ctrl_d_deletes_row_being_edited() {
        let mut app = App::with_tasks(&["a".to_string()]);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('e'));
        app.handle_key(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert!(app.screen().tasks().is_empty());
        assert!(app.screen().editing_id().is_none());
    }

    #[test]
    fn quit_keys() {
        let mut app = App::new();
        assert_eq!(press(&mut app, KeyCode::Char('q')), KeyOutcome::Continue);
        assert_eq!(app.screen().compose(), "q");
        assert_eq!(app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL), KeyOutcome::Quit);

        press(&mut app, KeyCode::Tab);
        assert_eq!(press(&mut app, KeyCode::Char('q')), KeyOutcome::Quit);
    }

    #[test]
    fn renders_empty_state() {
        let mut app = App::new();
        let screen = render_to_string(&mut app, 60, 12);
        assert!(screen.contains("To-Do List"));
        assert!(screen.contains("Add a new task"));
        assert!(screen.contains("[ Add ]"));
        assert!(screen.contains("Nothing yet - add your first task!"));
    }

    #[test]
    fn renders_rows_with_actions() {
        let mut app = App::with_tasks(&["Buy milk".to_string(), "Walk dog".to_string()]);
        let screen = render_to_string(&mut app, 60, 12);
        assert!(!screen.contains("Nothing yet"));
        let dog = screen.find("Walk dog").unwrap();
        let milk = screen.find("Buy milk").unwrap();
        assert!(dog < milk);
        assert!(screen.contains("[e]dit"));
        assert!(screen.contains("[d]elete"));
        assert!(!screen.contains("[s]ave"));
    }

    #[test]
    fn renders_draft_in_edited_row() {
        let mut app = App::with_tasks(&["Buy milk".to_string()]);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, "!");
        let screen = render_to_string(&mut app, 60, 12);
        assert!(screen.contains("Buy milk!"));
        assert!(screen.contains("Enter save"));
        assert!(screen.contains("^D delete"));
        assert!(!screen.contains("[s]ave"));
        assert!(!screen.contains("[d]elete"));
        assert!(screen.contains("Editing"));
    }

    #[test]
    fn edited_row_labels_match_working_keys() {
        let mut app = App::with_tasks(&["a".to_string(), "b".to_string()]);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, "sd");
        assert_eq!(app.screen().draft(), Some("bsd"));

        press(&mut app, KeyCode::Enter);
        assert_eq!(names(&app), vec!["bsd", "a"]);
        assert!(app.screen().editing_id().is_none());

        press(&mut app, KeyCode::Char('e'));
        app.handle_key(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(names(&app), vec!["a"]);
    }

    #[test]
    fn cursor_column_uses_display_width_and_clamps() {
        let wide = InputField::with_value("日本");
        assert_eq!(cursor_column(2, &wide, 40), 6);

        let long = InputField::with_value(&"x".repeat(70_000));
        assert_eq!(cursor_column(10, &long, 40), 39);
        assert_eq!(cursor_column(u16::MAX - 1, &InputField::with_value("ab"), u16::MAX), u16::MAX - 1);
    }

    #[test]
    fn renders_very_long_draft_without_panicking() {
        let mut app = App::with_tasks(&["x".repeat(70_000)]);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('e'));
        let screen = render_to_string(&mut app, 60, 12);
        assert!(screen.contains("Enter save"));
    }
}
