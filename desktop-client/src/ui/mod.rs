mod app;
mod board_view;
mod segments;

pub use app::SnakeApp;
