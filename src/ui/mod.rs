//! Terminal UI: a lobby for the roster and game settings, and the game
//! board.

mod app;
pub mod board_widget;
mod game_view;
mod lobby_view;

pub use app::{App, Screen};
