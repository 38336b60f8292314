use crate::app::App;
use crate::kanban_board::{Column, KanbanBoard};
use crate::modal::{DraftField, TaskModal};
use crate::task::{Task, TaskId};
use ratatui::{
    layout::{Constraint, Layout, Margin, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const HEADER_HEIGHT: u16 = 3;
const BUTTON_WIDTH: u16 = 14;
const CARD_HEIGHT: u16 = 4;
const MODAL_MIN_WIDTH: u16 = 40;
const MODAL_HEIGHT: u16 = 12;

/// First visible card of each column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnScroll([usize; 3]);

impl ColumnScroll {
    pub fn offset(&self, column: Column) -> usize {
        self.0[column.index()]
    }

    /// Shifts the window by `delta` cards, kept within `0..=len - capacity`.
    pub fn scroll_by(&mut self, column: Column, delta: isize, len: usize, capacity: usize) {
        let max = len.saturating_sub(capacity);
        let offset = &mut self.0[column.index()];
        *offset = (*offset).min(max).saturating_add_signed(delta).min(max);
    }

    /// Scrolls so the last card of the column is in view.
    pub fn reveal_last(&mut self, column: Column, len: usize, capacity: usize) {
        self.0[column.index()] = len.saturating_sub(capacity);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardArea {
    pub id: TaskId,
    pub column: Column,
    pub rect: Rect,
}

/// Screen geometry of the board, shared by rendering and mouse hit-testing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLayout {
    pub add_button: Rect,
    pub help: Rect,
    pub columns: [(Column, Rect); 3],
    pub cards: Vec<CardArea>,
    /// Cards scrolled out of view above and below, per column.
    pub hidden: [(usize, usize); 3],
}

fn split_screen(area: Rect) -> (Rect, Rect, [Rect; 3]) {
    let [header, body] =
        Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)]).areas(area);
    let [add_button, help] =
        Layout::horizontal([Constraint::Length(BUTTON_WIDTH), Constraint::Min(0)]).areas(header);
    let columns = Layout::horizontal([
        Constraint::Percentage(33),
        Constraint::Percentage(33),
        Constraint::Percentage(34),
    ])
    .areas(body);
    (add_button, help, columns)
}

impl BoardLayout {
    /// How many whole cards fit in one column.
    pub fn capacity(area: Rect) -> usize {
        let (_, _, [column, ..]) = split_screen(area);
        usize::from(column.inner(Margin::new(1, 1)).height / CARD_HEIGHT)
    }

    pub fn compute(area: Rect, board: &KanbanBoard, scroll: ColumnScroll) -> Self {
        let (add_button, help, rects) = split_screen(area);
        let capacity = Self::capacity(area);

        let columns = [
            (Column::Todo, rects[0]),
            (Column::InProgress, rects[1]),
            (Column::Done, rects[2]),
        ];

        let mut cards = Vec::new();
        let mut hidden = [(0, 0); 3];
        for (column, rect) in columns {
            let tasks = board.tasks(column);
            let offset = scroll.offset(column).min(tasks.len().saturating_sub(capacity));
            let shown = tasks.len().saturating_sub(offset).min(capacity);
            hidden[column.index()] = (offset, tasks.len() - offset - shown);

            let inner = rect.inner(Margin::new(1, 1));
            let mut y = inner.y;
            for task in tasks.iter().skip(offset).take(shown) {
                cards.push(CardArea {
                    id: task.id,
                    column,
                    rect: Rect::new(inner.x, y, inner.width, CARD_HEIGHT),
                });
                y += CARD_HEIGHT;
            }
        }

        Self {
            add_button,
            help,
            columns,
            cards,
            hidden,
        }
    }

    pub fn card_at(&self, position: Position) -> Option<CardArea> {
        self.cards.iter().copied().find(|card| card.rect.contains(position))
    }

    pub fn column_at(&self, position: Position) -> Option<Column> {
        self.columns
            .iter()
            .find(|(_, rect)| rect.contains(position))
            .map(|(column, _)| *column)
    }
}

/// Geometry of the "Add Task" modal, centered in the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalLayout {
    pub modal: Rect,
    pub close: Rect,
    pub title: Rect,
    pub description: Rect,
    pub submit: Rect,
}

impl ModalLayout {
    pub fn compute(area: Rect) -> Self {
        let width = (area.width / 3).max(MODAL_MIN_WIDTH).min(area.width);
        let height = MODAL_HEIGHT.min(area.height);
        let modal = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );
        let [title, description, buttons] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
        ])
        .areas(modal.inner(Margin::new(1, 1)));
        let [submit, _] =
            Layout::horizontal([Constraint::Length(BUTTON_WIDTH), Constraint::Min(0)]).areas(buttons);

        Self {
            modal,
            close: Rect::new(modal.right().saturating_sub(4), modal.y, 3, 1),
            title,
            description,
            submit,
        }
    }

    pub fn field_at(&self, position: Position) -> Option<DraftField> {
        if self.title.contains(position) {
            Some(DraftField::Title)
        } else if self.description.contains(position) {
            Some(DraftField::Description)
        } else {
            None
        }
    }
}

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = BoardLayout::compute(area, &app.board, app.scroll);

    frame.render_widget(button("Add Task"), layout.add_button);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(" drag cards between columns with the mouse   "),
            Span::styled("a", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" add task   "),
            Span::styled("q", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" quit"),
        ]))
        .style(Style::default().fg(Color::Gray)),
        layout.help.inner(Margin::new(0, 1)),
    );

    let dragged = app.drag.payload().map(|p| p.id);
    for (column, rect) in layout.columns {
        let is_target = app.drag.is_dragging() && app.drag.hover() == Some(column);
        let (above, below) = layout.hidden[column.index()];
        let mut block = Block::default()
            .title(Line::from(column.title()).centered());
        if above > 0 {
            block = block.title_top(Line::from(format!("↑ {above} more ")).right_aligned());
        }
        if below > 0 {
            block = block.title_bottom(Line::from(format!("↓ {below} more ")).right_aligned());
        }
        frame.render_widget(
            block
                .title_style(Style::default().add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(if is_target {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                }),
            rect,
        );
    }

    for card in &layout.cards {
        if let Some(task) = app.board.tasks(card.column).iter().find(|t| t.id == card.id) {
            frame.render_widget(task_card(task, dragged == Some(task.id)), card.rect);
        }
    }

    if app.modal.is_open() {
        draw_modal(frame, &app.modal, ModalLayout::compute(area));
    }
}

fn button(label: &str) -> Paragraph<'_> {
    Paragraph::new(Line::from(label).centered())
        .style(Style::default().fg(Color::White).bg(Color::Blue).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL))
}

fn task_card(task: &Task, dragged: bool) -> Paragraph<'_> {
    let border = if dragged {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Paragraph::new(vec![
        Line::from(Span::styled(
            task.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(task.description.as_str()),
    ])
    .block(Block::default().borders(Borders::ALL).border_style(border))
}

fn draw_modal(frame: &mut Frame, modal: &TaskModal, layout: ModalLayout) {
    frame.render_widget(Clear, layout.modal);
    frame.render_widget(
        Block::default()
            .title(Span::styled("Add New Task", Style::default().add_modifier(Modifier::BOLD)))
            .borders(Borders::ALL),
        layout.modal,
    );
    frame.render_widget(
        Paragraph::new("[X]").style(Style::default().add_modifier(Modifier::BOLD)),
        layout.close,
    );

    let draft = modal.draft();
    let fields = [
        (DraftField::Title, "Title", draft.title.as_str(), layout.title),
        (DraftField::Description, "Description", draft.description.as_str(), layout.description),
    ];
    for (field, placeholder, value, rect) in fields {
        let focused = modal.focus() == field;
        let text = if value.is_empty() {
            Span::styled(placeholder, Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(value)
        };
        frame.render_widget(
            Paragraph::new(Line::from(text)).wrap(Wrap { trim: false }).block(
                Block::default().borders(Borders::ALL).border_style(if focused {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default()
                }),
            ),
            rect,
        );
        if focused {
            frame.set_cursor_position(cursor_position(rect, value.chars().count()));
        }
    }

    frame.render_widget(button("Add Task"), layout.submit);
}

/// End of `typed` characters inside a bordered field, wrapping by width and
/// pinned to the last cell once the field is full.
fn cursor_position(field: Rect, typed: usize) -> Position {
    let inner = field.inner(Margin::new(1, 1));
    let width = usize::from(inner.width.max(1));
    let rows = usize::from(inner.height.max(1));
    let (row, col) = if typed / width < rows {
        (typed / width, typed % width)
    } else {
        (rows - 1, width - 1)
    };
    let row = u16::try_from(row).unwrap_or(0);
    let col = u16::try_from(col).unwrap_or(0);
    Position::new(inner.x + col, inner.y + row)
}
