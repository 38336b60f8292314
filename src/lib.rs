//! A three-column drag-and-drop task board for the terminal.
//!
//! [`app::App`] holds the whole board and modal state; [`ui::draw`] renders
//! it. Tasks move between columns only through mouse drag gestures.

pub mod app;
pub mod config;
pub mod drag;
pub mod error;
pub mod ids;
pub mod kanban_board;
pub mod logging;
pub mod modal;
pub mod task;
pub mod ui;
