use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Position, Rect};

use crate::io::config_io::load_workspace;
use crate::io::logging::{LogTarget, init_logging};
use crate::model::{BoardConfig, Status, TodoId, TodoRecord};
use crate::ops::Board;
use crate::store::{TodoStore, open_store};

use super::card::{CardAction, CardField, CardState, Picker};
use super::form::TaskForm;
use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing into a card's text fields
    Edit,
}

/// The card text field being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub id: TodoId,
    pub field: CardField,
    /// Byte offset into the field's dirty text
    pub cursor: usize,
}

/// Message shown in the status row until the next key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Clickable regions of one card, recorded at render time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardHit {
    pub id: TodoId,
    pub area: Rect,
    pub priority_button: Rect,
    pub status_button: Rect,
}

/// An open picker's popup and option rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerHit {
    pub id: TodoId,
    pub picker: Picker,
    pub popup: Rect,
    pub options: Vec<Rect>,
}

/// Screen regions from the last frame, used for mouse hit-testing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMap {
    pub create_button: Option<Rect>,
    pub cards: Vec<CardHit>,
    pub pickers: Vec<PickerHit>,
    pub form: Option<Rect>,
}

impl HitMap {
    pub fn clear(&mut self) {
        *self = HitMap::default();
    }

    pub fn card(&self, id: &TodoId) -> Option<&CardHit> {
        self.cards.iter().find(|c| &c.id == id)
    }

    /// Whether `pos` lies inside `picker` on card `id`: its button or its popup
    pub fn inside_picker(&self, id: &TodoId, picker: Picker, pos: Position) -> bool {
        let on_button = self.card(id).is_some_and(|c| match picker {
            Picker::Priority => c.priority_button.contains(pos),
            Picker::Status => c.status_button.contains(pos),
        });
        on_button
            || self
                .pickers
                .iter()
                .any(|p| &p.id == id && p.picker == picker && p.popup.contains(pos))
    }
}

/// Main application state
pub struct App {
    pub store: Box<dyn TodoStore>,
    pub board_name: String,
    pub theme: Theme,
    pub show_key_hints: bool,
    pub mode: Mode,
    pub should_quit: bool,
    /// Local state of every visible card
    pub cards: HashMap<TodoId, CardState>,
    /// Focused column
    pub column: Status,
    /// Focused row per column
    pub rows: [usize; 3],
    /// First visible row per column
    pub scroll: [usize; 3],
    pub editing: Option<EditSession>,
    /// Creation modal visible
    pub show_form: bool,
    pub form: TaskForm,
    /// Highlighted option in the open picker
    pub picker_cursor: usize,
    pub show_help: bool,
    pub status_message: Option<StatusMessage>,
    pub hits: HitMap,
    /// Focus this record after the next reconcile
    follow: Option<TodoId>,
    seen_version: Option<u64>,
}

impl App {
    pub fn new(store: Box<dyn TodoStore>, config: &BoardConfig) -> Self {
        let mut app = App {
            store,
            board_name: config.board.name.clone(),
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            mode: Mode::Navigate,
            should_quit: false,
            cards: HashMap::new(),
            column: Status::Todo,
            rows: [0; 3],
            scroll: [0; 3],
            editing: None,
            show_form: false,
            form: TaskForm::new(),
            picker_cursor: 0,
            show_help: false,
            status_message: None,
            hits: HitMap::default(),
            follow: None,
            seen_version: None,
        };
        app.reconcile_cards();
        app
    }

    pub fn board(&self) -> Board<'_> {
        Board::project(self.store.records().iter())
    }

    /// Row focused in `status`'s column, clamped to its length
    pub fn row(&self, status: Status) -> usize {
        self.rows[status.index()]
    }

    pub fn focused_record(&self) -> Option<&TodoRecord> {
        let board = self.board();
        board.column(self.column).get(self.row(self.column)).copied()
    }

    pub fn focused_id(&self) -> Option<TodoId> {
        self.focused_record().map(|r| r.id.clone())
    }

    /// Card with an open picker that takes keyboard input
    pub fn active_picker(&self) -> Option<(TodoId, Picker)> {
        let id = self.focused_id()?;
        let picker = self.cards.get(&id)?.active_picker()?;
        Some((id, picker))
    }

    /// Move focus to a record wherever it is on the board
    pub fn focus(&mut self, id: &TodoId) -> bool {
        let Some((status, row)) = self.board().position(id) else {
            return false;
        };
        self.column = status;
        self.rows[status.index()] = row;
        true
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }

    /// Bring card state in line with the store after it changed. Cards of
    /// removed records are dropped; the field being edited keeps its text.
    pub fn reconcile_cards(&mut self) {
        let version = self.store.version();
        if self.seen_version == Some(version) {
            return;
        }
        self.seen_version = Some(version);

        let editing = self.editing.clone();
        let mut seen: HashMap<TodoId, CardState> = HashMap::with_capacity(self.store.records().len());
        for record in self.store.records().iter() {
            let card = match self.cards.remove(&record.id) {
                Some(mut card) => {
                    let field = editing
                        .as_ref()
                        .filter(|e| e.id == record.id)
                        .map(|e| e.field);
                    card.refresh(record, field);
                    card
                }
                None => CardState::seed(record),
            };
            seen.insert(record.id.clone(), card);
        }
        self.cards = seen;

        if let Some(session) = &self.editing {
            let locked = self.store.get(&session.id).is_none_or(|r| r.completed);
            if locked {
                log::debug!("event=edit_abandoned id={}", session.id);
                self.editing = None;
                self.mode = Mode::Navigate;
            } else if let Some(card) = self.cards.get(&session.id) {
                let len = card.field(session.field).len();
                if let Some(session) = &mut self.editing {
                    session.cursor = session.cursor.min(len);
                }
            }
        }

        if let Some(id) = self.follow.take() {
            self.focus(&id);
        }
        self.clamp_rows();
    }

    fn clamp_rows(&mut self) {
        let counts = {
            let board = self.board();
            Status::ALL.map(|s| board.count(s))
        };
        for (row, count) in self.rows.iter_mut().zip(counts) {
            *row = (*row).min(count.saturating_sub(1));
        }
    }

    /// Send a card's request to the store
    pub fn apply(&mut self, action: CardAction) {
        match action {
            CardAction::Update(id, record) => {
                self.follow = Some(id.clone());
                self.store.update(&id, record);
            }
            CardAction::Delete(id) => self.store.delete(&id),
            CardAction::ToggleComplete(id) => {
                self.follow = Some(id.clone());
                self.store.toggle_complete(&id);
            }
        }
        self.after_store_change();
    }

    /// Called once per event loop iteration
    pub fn tick(&mut self) {
        self.store.sync();
        self.after_store_change();
    }

    fn after_store_change(&mut self) {
        let failures = self.store.take_failures();
        if let Some(last) = failures.last() {
            self.set_error(last.to_string());
        }
        self.reconcile_cards();
    }

    pub fn open_form(&mut self) {
        self.cancel_edit();
        self.close_all_pickers();
        self.form = TaskForm::new();
        self.show_form = true;
    }

    pub fn close_form(&mut self) {
        self.show_form = false;
        self.form = TaskForm::new();
    }

    /// Create a todo from the form. Invalid input keeps the form open.
    pub fn submit_form(&mut self) {
        match self.form.submit() {
            Ok(fields) => {
                if let Some(id) = self.store.create(fields) {
                    log::info!("event=todo_created id={}", id);
                    self.follow = Some(id);
                }
                self.close_form();
                self.after_store_change();
            }
            Err(e) => self.form.error = Some(e),
        }
    }

    /// Start editing the focused card's title
    pub fn begin_edit(&mut self) {
        let Some(record) = self.focused_record().cloned() else {
            return;
        };
        if record.completed {
            self.set_error("Completed todos are locked");
            return;
        }
        let Some(card) = self.cards.get_mut(&record.id) else {
            return;
        };
        card.close_pickers();
        self.editing = Some(EditSession {
            id: record.id.clone(),
            field: CardField::Title,
            cursor: card.title.len(),
        });
        self.mode = Mode::Edit;
    }

    /// Move the edit cursor to another field of the same card
    pub fn edit_field(&mut self, field: CardField) {
        let Some(session) = &mut self.editing else {
            return;
        };
        let len = self
            .cards
            .get(&session.id)
            .map_or(0, |c| c.field(field).len());
        session.field = field;
        session.cursor = len;
    }

    /// Persist dirty text of the card being edited and leave edit mode.
    /// A bad date keeps the session open.
    pub fn commit_edit(&mut self) {
        let Some(session) = self.editing.clone() else {
            return;
        };
        let result = match (self.store.get(&session.id), self.cards.get_mut(&session.id)) {
            (Some(record), Some(card)) => card.commit(record),
            _ => Ok(None),
        };
        match result {
            Ok(action) => {
                self.editing = None;
                self.mode = Mode::Navigate;
                if let Some(action) = action {
                    self.apply(action);
                }
            }
            Err(e) => {
                self.edit_field(CardField::Date);
                self.set_error(e.to_string());
            }
        }
    }

    /// Leave edit mode, discarding dirty text
    pub fn cancel_edit(&mut self) {
        let Some(session) = self.editing.take() else {
            return;
        };
        if let (Some(record), Some(card)) =
            (self.store.get(&session.id), self.cards.get_mut(&session.id))
        {
            card.revert(record);
        }
        self.mode = Mode::Navigate;
    }

    /// Open or close a picker on the focused card
    pub fn toggle_picker(&mut self, picker: Picker) {
        if let Some(id) = self.focused_id() {
            self.toggle_picker_on(&id, picker);
        }
    }

    pub fn toggle_picker_on(&mut self, id: &TodoId, picker: Picker) {
        let (Some(record), Some(card)) = (self.store.get(id), self.cards.get_mut(id)) else {
            return;
        };
        if !card.toggle_picker(record, picker) {
            self.set_error("Completed todos are locked");
            return;
        }
        if card.is_open(picker) {
            self.picker_cursor = match picker {
                Picker::Priority => card.priority.index(),
                Picker::Status => card.status.index(),
            };
        }
    }

    /// Choose option `index` in `picker` on card `id`
    pub fn select_option(&mut self, id: &TodoId, picker: Picker, index: usize) {
        let (Some(record), Some(card)) = (self.store.get(id), self.cards.get_mut(id)) else {
            return;
        };
        let action = match picker {
            Picker::Priority => crate::model::Priority::ALL
                .get(index)
                .and_then(|p| card.select_priority(record, *p)),
            Picker::Status => Status::from_index(index).and_then(|s| card.select_status(record, s)),
        };
        if let Some(action) = action {
            self.apply(action);
        }
    }

    pub fn close_all_pickers(&mut self) {
        for card in self.cards.values_mut() {
            card.close_pickers();
        }
    }

    pub fn request_delete(&mut self) {
        let Some(record) = self.focused_record() else {
            return;
        };
        let action = self.cards.get(&record.id).and_then(|c| c.request_delete(record));
        match action {
            Some(action) => self.apply(action),
            None => self.set_error("Completed todos cannot be deleted"),
        }
    }

    pub fn request_toggle(&mut self) {
        let Some(record) = self.focused_record() else {
            return;
        };
        let action = self.cards.get(&record.id).map(|c| c.request_toggle(record));
        if let Some(action) = action {
            self.apply(action);
        }
    }
}

/// Run the TUI application
pub fn run(dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let start = match dir {
        Some(d) => d.to_path_buf(),
        None => std::env::current_dir()?,
    };
    let workspace = load_workspace(&start)?;
    let _logger = init_logging(
        workspace.config.log.level.as_deref(),
        LogTarget::Files(workspace.log_dir()),
    )?;

    let store = open_store(&workspace)?;
    let mut app = App::new(store, &workspace.config);
    let mouse = workspace.config.ui.mouse;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);
    log::info!("event=app_exit");

    // Restore terminal
    disable_raw_mode()?;
    if mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
        app.tick();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;
    use crate::tui::input::test_support::app_with;

    #[test]
    fn new_app_seeds_a_card_per_record() {
        let app = app_with(&[("a", Status::Todo), ("b", Status::Complete)]);
        assert_eq!(app.cards.len(), 2);
        assert_eq!(app.focused_record().unwrap().title, "a");
        assert_eq!(app.board_name, "Taskboard");
    }

    #[test]
    fn submit_form_creates_and_focuses() {
        let mut app = app_with(&[("old", Status::Todo)]);
        app.open_form();
        app.form.title = "new".into();
        app.form.status = Status::InProgress;
        app.submit_form();

        assert!(!app.show_form);
        assert_eq!(app.store.records().len(), 2);
        assert_eq!(app.column, Status::InProgress);
        assert_eq!(app.focused_record().unwrap().title, "new");
        assert!(app.cards.contains_key(&app.focused_id().unwrap()));
    }

    #[test]
    fn submit_form_with_bad_date_stays_open() {
        let mut app = app_with(&[]);
        app.open_form();
        app.form.date = "soon".into();
        app.submit_form();
        assert!(app.show_form);
        assert!(app.form.error.is_some());
        assert!(app.store.records().is_empty());
    }

    #[test]
    fn status_selection_moves_focus_with_the_card() {
        let mut app = app_with(&[("a", Status::Todo)]);
        let id = app.focused_id().unwrap();
        app.toggle_picker(Picker::Status);
        assert_eq!(app.active_picker(), Some((id.clone(), Picker::Status)));

        app.select_option(&id, Picker::Status, Status::InProgress.index());
        assert_eq!(app.store.get(&id).unwrap().status, Status::InProgress);
        assert_eq!(app.column, Status::InProgress);
        assert_eq!(app.active_picker(), None);
    }

    #[test]
    fn priority_selection_updates_store() {
        let mut app = app_with(&[("a", Status::Todo)]);
        let id = app.focused_id().unwrap();
        app.toggle_picker(Picker::Priority);
        assert_eq!(app.picker_cursor, Priority::Low.index());
        app.select_option(&id, Picker::Priority, Priority::High.index());
        assert_eq!(app.store.get(&id).unwrap().priority, Priority::High);
        assert_eq!(app.cards[&id].priority, Priority::High);
    }

    #[test]
    fn commit_edit_persists_dirty_text() {
        let mut app = app_with(&[("a", Status::Todo)]);
        let id = app.focused_id().unwrap();
        app.begin_edit();
        assert_eq!(app.mode, Mode::Edit);
        let record = app.store.get(&id).unwrap().clone();
        app.cards
            .get_mut(&id)
            .unwrap()
            .edit(&record, CardField::Title, "renamed".into());
        // Not yet persisted
        assert_eq!(app.store.get(&id).unwrap().title, "a");

        app.commit_edit();
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.store.get(&id).unwrap().title, "renamed");
    }

    #[test]
    fn commit_edit_with_bad_date_keeps_editing() {
        let mut app = app_with(&[("a", Status::Todo)]);
        let id = app.focused_id().unwrap();
        app.begin_edit();
        let record = app.store.get(&id).unwrap().clone();
        app.cards
            .get_mut(&id)
            .unwrap()
            .edit(&record, CardField::Date, "nope".into());
        app.commit_edit();
        assert_eq!(app.mode, Mode::Edit);
        assert_eq!(app.editing.as_ref().unwrap().field, CardField::Date);
        assert!(app.status_message.as_ref().unwrap().is_error);
    }

    #[test]
    fn cancel_edit_reverts() {
        let mut app = app_with(&[("a", Status::Todo)]);
        let id = app.focused_id().unwrap();
        app.begin_edit();
        let record = app.store.get(&id).unwrap().clone();
        app.cards
            .get_mut(&id)
            .unwrap()
            .edit(&record, CardField::Title, "scratch".into());
        app.cancel_edit();
        assert_eq!(app.cards[&id].title, "a");
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn completed_card_cannot_be_deleted_or_edited() {
        let mut app = app_with(&[("a", Status::Todo)]);
        let id = app.focused_id().unwrap();
        app.request_toggle();
        assert!(app.store.get(&id).unwrap().completed);

        app.request_delete();
        assert!(app.store.get(&id).is_some());
        app.begin_edit();
        assert_eq!(app.mode, Mode::Navigate);
        app.toggle_picker(Picker::Priority);
        assert_eq!(app.active_picker(), None);

        app.request_toggle();
        app.request_delete();
        assert!(app.store.get(&id).is_none());
        assert!(app.cards.is_empty());
    }

    #[test]
    fn rows_clamp_after_delete() {
        let mut app = app_with(&[("a", Status::Todo), ("b", Status::Todo)]);
        app.rows[0] = 1;
        app.request_delete();
        assert_eq!(app.row(Status::Todo), 0);
        assert_eq!(app.focused_record().unwrap().title, "b");
    }

    #[test]
    fn hit_map_checks_button_and_popup() {
        let id = TodoId::new("1");
        let hits = HitMap {
            create_button: None,
            cards: vec![CardHit {
                id: id.clone(),
                area: Rect::new(0, 0, 20, 6),
                priority_button: Rect::new(1, 1, 6, 1),
                status_button: Rect::new(10, 1, 8, 1),
            }],
            pickers: vec![PickerHit {
                id: id.clone(),
                picker: Picker::Priority,
                popup: Rect::new(1, 2, 10, 5),
                options: vec![],
            }],
            form: None,
        };
        assert!(hits.inside_picker(&id, Picker::Priority, Position::new(2, 1)));
        assert!(hits.inside_picker(&id, Picker::Priority, Position::new(5, 4)));
        assert!(!hits.inside_picker(&id, Picker::Status, Position::new(5, 4)));
        assert!(hits.inside_picker(&id, Picker::Status, Position::new(12, 1)));
        assert!(!hits.inside_picker(&id, Picker::Priority, Position::new(30, 30)));
    }
}
