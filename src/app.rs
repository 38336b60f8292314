use crate::drag::DragGesture;
use crate::ids::TaskIdGenerator;
use crate::kanban_board::{Column, KanbanBoard};
use crate::modal::{DraftField, TaskModal};
use crate::task::TaskId;
use crate::ui::{BoardLayout, ColumnScroll, ModalLayout};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use tracing::{debug, trace};

/// All state behind the board screen. The view only reads it.
#[derive(Debug)]
pub struct App {
    pub board: KanbanBoard,
    pub modal: TaskModal,
    pub drag: DragGesture,
    pub scroll: ColumnScroll,
    pub viewport: Rect,
    pub should_quit: bool,
    ids: TaskIdGenerator,
}

impl App {
    pub fn new(board: KanbanBoard) -> Self {
        let ids = TaskIdGenerator::starting_after(board.max_id());
        Self {
            board,
            modal: TaskModal::new(),
            drag: DragGesture::default(),
            scroll: ColumnScroll::default(),
            viewport: Rect::default(),
            should_quit: false,
            ids,
        }
    }

    pub fn move_task(&mut self, id: TaskId, source: Column, destination: Column) {
        if self.board.move_task(id, source, destination) {
            debug!(id, %source, %destination, "moved task");
        } else {
            trace!(id, %source, %destination, "move ignored");
        }
    }

    pub fn drag_start(&mut self, id: TaskId, source: Column) {
        trace!(id, %source, "drag started");
        self.drag.start(id, source);
    }

    pub fn drag_over(&mut self, column: Option<Column>) {
        self.drag.over(column);
    }

    pub fn drop_on(&mut self, destination: Column) {
        if let Some(payload) = self.drag.drop_on(destination) {
            self.move_task(payload.id, payload.source, destination);
            self.reveal_last(destination);
        }
    }

    /// Scrolls `column` so its newest card is visible.
    fn reveal_last(&mut self, column: Column) {
        let len = self.board.tasks(column).len();
        self.scroll.reveal_last(column, len, BoardLayout::capacity(self.viewport));
    }

    pub fn scroll_column(&mut self, column: Column, delta: isize) {
        let len = self.board.tasks(column).len();
        self.scroll.scroll_by(column, delta, len, BoardLayout::capacity(self.viewport));
    }

    pub fn cancel_drag(&mut self) {
        if self.drag.is_dragging() {
            trace!("drag cancelled");
        }
        self.drag.cancel();
    }

    pub fn open_modal(&mut self) {
        self.cancel_drag();
        self.modal.open();
    }

    pub fn update_draft(&mut self, field: DraftField, value: impl Into<String>) {
        self.modal.update_draft(field, value);
    }

    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    /// Adds the draft to the end of todo under a fresh id and closes the modal.
    pub fn commit_draft(&mut self) {
        if !self.modal.is_open() {
            return;
        }
        let id = self.ids.next();
        if let Some(task) = self.modal.commit(id) {
            debug!(id, title = %task.title, "added task");
            self.board.add_to_todo(task);
            self.reveal_last(Column::Todo);
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if self.modal.is_open() {
                    self.handle_modal_key(key);
                } else {
                    self.handle_board_key(key);
                }
            }
            Event::Mouse(mouse) => {
                if self.modal.is_open() {
                    self.handle_modal_mouse(mouse);
                } else {
                    self.handle_board_mouse(mouse);
                }
            }
            Event::Resize(width, height) => {
                self.viewport = Rect::new(0, 0, width, height);
            }
            _ => {}
        }
    }

    fn handle_board_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Char('a') => self.open_modal(),
            _ => {}
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Esc => self.close_modal(),
            KeyCode::Enter => self.commit_draft(),
            KeyCode::Tab | KeyCode::BackTab => self.modal.focus_next(),
            KeyCode::Backspace => self.modal.backspace(),
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                self.modal.insert_char(c)
            }
            _ => {}
        }
    }

    fn handle_board_mouse(&mut self, mouse: MouseEvent) {
        let position = Position::new(mouse.column, mouse.row);
        let layout = BoardLayout::compute(self.viewport, &self.board, self.scroll);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if layout.add_button.contains(position) {
                    self.open_modal();
                } else if let Some(card) = layout.card_at(position) {
                    self.drag_start(card.id, card.column);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.drag_over(layout.column_at(position));
            }
            MouseEventKind::Up(MouseButton::Left) => match layout.column_at(position) {
                Some(column) => self.drop_on(column),
                None => self.cancel_drag(),
            },
            MouseEventKind::ScrollUp => {
                if let Some(column) = layout.column_at(position) {
                    self.scroll_column(column, -1);
                }
            }
            MouseEventKind::ScrollDown => {
                if let Some(column) = layout.column_at(position) {
                    self.scroll_column(column, 1);
                }
            }
            _ => {}
        }
    }

    fn handle_modal_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let position = Position::new(mouse.column, mouse.row);
        let layout = ModalLayout::compute(self.viewport);

        if layout.close.contains(position) {
            self.close_modal();
        } else if layout.submit.contains(position) {
            self.commit_draft();
        } else if let Some(field) = layout.field_at(position) {
            self.modal.set_focus(field);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::ModalState;
    use crate::task::Task;
    use rstest::{fixture, rstest};

    #[fixture]
    fn app() -> App {
        let mut app = App::new(KanbanBoard::seeded());
        app.handle_event(Event::Resize(120, 40));
        app
    }

    fn ids_in(app: &App, column: Column) -> Vec<TaskId> {
        app.board.tasks(column).iter().map(|t| t.id).collect()
    }

    fn mouse(kind: MouseEventKind, position: Position) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: position.x,
            row: position.y,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_event(key(KeyCode::Char(c)));
        }
    }

    fn card_center(app: &App, id: TaskId) -> Position {
        let layout = BoardLayout::compute(app.viewport, &app.board, app.scroll);
        let card = layout.cards.iter().find(|c| c.id == id).unwrap();
        Position::new(card.rect.x + card.rect.width / 2, card.rect.y + 1)
    }

    fn column_bottom(app: &App, column: Column) -> Position {
        let layout = BoardLayout::compute(app.viewport, &app.board, app.scroll);
        let (_, rect) = layout.columns.iter().find(|(c, _)| *c == column).unwrap();
        Position::new(rect.x + rect.width / 2, rect.bottom() - 2)
    }

    fn drag(app: &mut App, from: Position, to: Position) {
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), from));
        app.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), to));
        app.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), to));
    }

    #[rstest]
    fn move_task_from_todo_to_done(mut app: App) {
        app.move_task(2, Column::Todo, Column::Done);
        assert_eq!(ids_in(&app, Column::Todo), vec![1, 3]);
        assert_eq!(ids_in(&app, Column::Done), vec![6, 7, 2]);
    }

    #[rstest]
    fn dragging_card_to_other_column_moves_it(mut app: App) {
        let from = card_center(&app, 1);
        let to = column_bottom(&app, Column::InProgress);

        drag(&mut app, from, to);

        assert_eq!(ids_in(&app, Column::Todo), vec![2, 3]);
        assert_eq!(ids_in(&app, Column::InProgress), vec![4, 5, 1]);
        assert!(!app.drag.is_dragging());
    }

    #[rstest]
    fn drag_over_highlights_without_mutating(mut app: App) {
        let before = app.board.clone();
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), card_center(&app, 4)));
        app.handle_event(mouse(
            MouseEventKind::Drag(MouseButton::Left),
            column_bottom(&app, Column::Done),
        ));

        assert_eq!(app.drag.hover(), Some(Column::Done));
        assert_eq!(app.board, before);
    }

    #[rstest]
    fn dropping_on_same_column_is_noop(mut app: App) {
        let before = app.board.clone();
        let from = card_center(&app, 1);
        let to = column_bottom(&app, Column::Todo);

        drag(&mut app, from, to);

        assert_eq!(app.board, before);
    }

    #[rstest]
    fn releasing_outside_columns_cancels(mut app: App) {
        let before = app.board.clone();
        let from = card_center(&app, 6);
        drag(&mut app, from, Position::new(60, 1));

        assert_eq!(app.board, before);
        assert!(!app.drag.is_dragging());
    }

    #[rstest]
    fn stale_payload_is_discarded(mut app: App) {
        app.drag_start(5, Column::InProgress);
        app.move_task(5, Column::InProgress, Column::Todo);
        let before = app.board.clone();

        app.drop_on(Column::Done);

        assert_eq!(app.board, before);
    }

    #[rstest]
    fn pressing_empty_space_starts_no_gesture(mut app: App) {
        app.handle_event(mouse(
            MouseEventKind::Down(MouseButton::Left),
            column_bottom(&app, Column::Done),
        ));
        assert!(!app.drag.is_dragging());
    }

    #[rstest]
    fn open_and_close_modal_leaves_board(mut app: App) {
        let before = app.board.clone();
        app.handle_event(key(KeyCode::Char('a')));
        assert_eq!(app.modal.state(), ModalState::Open);
        type_text(&mut app, "abandoned");
        app.handle_event(key(KeyCode::Esc));

        assert_eq!(app.board, before);
        assert_eq!(app.modal.state(), ModalState::Closed);
        assert_eq!(app.modal.draft(), &Task::draft());
        assert!(!app.should_quit);
    }

    #[rstest]
    fn committing_draft_appends_to_todo(mut app: App) {
        app.open_modal();
        app.update_draft(DraftField::Title, "X");
        app.update_draft(DraftField::Description, "Y");
        app.commit_draft();

        let todo = app.board.tasks(Column::Todo);
        assert_eq!(todo.len(), 4);
        let added = &todo[3];
        assert_eq!((added.title.as_str(), added.description.as_str()), ("X", "Y"));
        assert!(added.id > 7);
        assert_eq!(app.board.len(), 8);
        assert!(!app.modal.is_open());
    }

    #[rstest]
    fn typed_draft_commits_on_enter(mut app: App) {
        app.handle_event(key(KeyCode::Char('a')));
        type_text(&mut app, "Ship");
        app.handle_event(key(KeyCode::Tab));
        type_text(&mut app, "v1");
        app.handle_event(key(KeyCode::Enter));

        let added = app.board.tasks(Column::Todo).last().unwrap();
        assert_eq!(added.title, "Ship");
        assert_eq!(added.description, "v1");
    }

    #[rstest]
    fn two_quick_commits_get_distinct_ids(mut app: App) {
        for _ in 0..2 {
            app.open_modal();
            app.commit_draft();
        }
        let todo = app.board.tasks(Column::Todo);
        assert_ne!(todo[3].id, todo[4].id);
    }

    #[rstest]
    fn clicking_add_button_and_modal_controls(mut app: App) {
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), Position::new(2, 1)));
        assert!(app.modal.is_open());

        let layout = ModalLayout::compute(app.viewport);
        app.handle_event(mouse(
            MouseEventKind::Down(MouseButton::Left),
            Position::new(layout.description.x + 1, layout.description.y + 1),
        ));
        type_text(&mut app, "notes");
        assert_eq!(app.modal.draft().description, "notes");

        app.handle_event(mouse(
            MouseEventKind::Down(MouseButton::Left),
            Position::new(layout.submit.x + 1, layout.submit.y + 1),
        ));
        assert!(!app.modal.is_open());
        assert_eq!(app.board.tasks(Column::Todo).last().unwrap().description, "notes");
    }

    #[rstest]
    fn clicking_close_discards_draft(mut app: App) {
        app.open_modal();
        type_text(&mut app, "draft");
        let layout = ModalLayout::compute(app.viewport);
        app.handle_event(mouse(
            MouseEventKind::Down(MouseButton::Left),
            Position::new(layout.close.x + 1, layout.close.y),
        ));

        assert!(!app.modal.is_open());
        assert_eq!(app.board.len(), 7);
    }

    fn commit_titled(app: &mut App, title: &str) {
        app.open_modal();
        app.update_draft(DraftField::Title, title);
        app.commit_draft();
    }

    fn laid_out(app: &App, column: Column) -> Vec<TaskId> {
        BoardLayout::compute(app.viewport, &app.board, app.scroll)
            .cards
            .iter()
            .filter(|c| c.column == column)
            .map(|c| c.id)
            .collect()
    }

    #[test]
    fn every_task_in_an_overflowing_column_can_be_reached() {
        let mut app = App::new(KanbanBoard::seeded());
        app.handle_event(Event::Resize(80, 24));
        let capacity = BoardLayout::capacity(app.viewport);
        assert_eq!(capacity, 4);

        commit_titled(&mut app, "fourth");
        commit_titled(&mut app, "fifth");
        let todo = ids_in(&app, Column::Todo);
        assert_eq!(todo.len(), 5);
        assert!(laid_out(&app, Column::Todo).contains(&todo[4]));

        let over_todo = column_bottom(&app, Column::Todo);
        let mut reached: Vec<TaskId> = laid_out(&app, Column::Todo);
        for _ in 0..todo.len() {
            app.handle_event(mouse(MouseEventKind::ScrollUp, over_todo));
            reached.extend(laid_out(&app, Column::Todo));
        }
        assert_eq!(laid_out(&app, Column::Todo), todo[..capacity].to_vec());
        for id in &todo {
            assert!(reached.contains(id), "task {id} never laid out");
        }

        app.handle_event(mouse(MouseEventKind::ScrollDown, over_todo));
        assert_eq!(laid_out(&app, Column::Todo), todo[1..].to_vec());
    }

    #[test]
    fn scrolled_card_can_be_dragged() {
        let mut app = App::new(KanbanBoard::seeded());
        app.handle_event(Event::Resize(80, 24));
        commit_titled(&mut app, "fourth");
        commit_titled(&mut app, "fifth");
        let newest = *ids_in(&app, Column::Todo).last().unwrap();

        let from = card_center(&app, newest);
        let to = column_bottom(&app, Column::Done);
        drag(&mut app, from, to);

        assert_eq!(ids_in(&app, Column::Done).last(), Some(&newest));
        assert_eq!(ids_in(&app, Column::Todo).len(), 4);
    }

    #[rstest]
    #[case(KeyModifiers::CONTROL, 'a')]
    #[case(KeyModifiers::ALT, 'x')]
    fn modified_chars_are_not_typed(mut app: App, #[case] modifiers: KeyModifiers, #[case] c: char) {
        app.open_modal();
        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Char(c), modifiers)));
        assert_eq!(app.modal.draft(), &Task::draft());
        assert!(app.modal.is_open());
    }

    #[rstest]
    fn shifted_chars_are_typed(mut app: App) {
        app.open_modal();
        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT)));
        assert_eq!(app.modal.draft().title, "X");
    }

    #[rstest]
    fn q_inside_modal_is_text_not_quit(mut app: App) {
        app.open_modal();
        type_text(&mut app, "q");
        assert!(!app.should_quit);
        assert_eq!(app.modal.draft().title, "q");
    }

    #[rstest]
    #[case(KeyCode::Char('q'), KeyModifiers::NONE)]
    #[case(KeyCode::Esc, KeyModifiers::NONE)]
    #[case(KeyCode::Char('c'), KeyModifiers::CONTROL)]
    fn quit_keys(mut app: App, #[case] code: KeyCode, #[case] modifiers: KeyModifiers) {
        app.handle_event(Event::Key(KeyEvent::new(code, modifiers)));
        assert!(app.should_quit);
    }

    #[rstest]
    fn arrow_keys_do_not_move_tasks(mut app: App) {
        let before = app.board.clone();
        for code in [KeyCode::Left, KeyCode::Right, KeyCode::Enter, KeyCode::Up] {
            app.handle_event(key(code));
        }
        assert_eq!(app.board, before);
    }
}
