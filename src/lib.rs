pub mod app;
pub mod board;
pub mod error;
pub mod store;
pub mod surface;
pub mod ui;

pub use board::BoardController;
pub use error::{BoardError, Result};
