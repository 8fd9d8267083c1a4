pub mod catalog;
pub mod game;
pub mod id;
