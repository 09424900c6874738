//! Falling-block puzzle engine
//!
//! [`game::GameEngine`] holds all game rules. Rendering, input, high score
//! storage and the gravity timer live outside it and only call its public
//! operations.

pub mod board;
pub mod game;
pub mod input;
pub mod piece;
pub mod randomizer;
pub mod score;
pub mod settings;
pub mod store;
pub mod tetromino;
pub mod ui;

pub use game::{Action, GameEngine, GameState, TickOutcome};
pub use store::{FileStore, HighScoreStore, MemoryStore};
