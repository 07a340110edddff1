pub mod types;
pub mod movegen;
pub mod board;
pub mod render;
pub mod setup;
pub mod game;
