//! Core game state and logic
//!
//! [`GameEngine`] owns the board, the active and preview pieces and the score.
//! It has no timers: a scheduler calls [`GameEngine::tick`] for gravity and
//! input is fed through [`GameEngine::process_action`].

use crate::board::Board;
use crate::piece::Piece;
use crate::randomizer::Randomizer;
use crate::score::{clear_name, Score};
use crate::store::{HighScoreStore, MemoryStore};
use crate::tetromino::Shape;

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// No piece spawned yet
    Ready,
    Playing,
    /// Terminal, nothing mutates after this
    GameOver,
}

/// Input actions the engine can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
}

/// Result of one gravity tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The piece moved down one row
    Fell,
    /// The piece locked and the next one spawned
    Locked,
    /// The tick ended the game
    GameOver,
    /// Not playing, nothing happened
    Idle,
}

/// The game engine
pub struct GameEngine<S: HighScoreStore = MemoryStore> {
    board: Board,
    active: Option<Piece>,
    preview: Piece,
    randomizer: Randomizer,
    score: Score,
    state: GameState,
    /// Name of the last line clear, for display
    last_action: Option<&'static str>,
    store: S,
}

impl<S: HighScoreStore> GameEngine<S> {
    /// Create a new engine, loading the high score from `store`
    pub fn new(store: S) -> Self {
        Self::with_randomizer(store, Randomizer::new())
    }

    /// Create a new engine with a deterministic piece sequence
    pub fn with_seed(store: S, seed: u64) -> Self {
        Self::with_randomizer(store, Randomizer::with_seed(seed))
    }

    fn with_randomizer(store: S, mut randomizer: Randomizer) -> Self {
        let high_score = store.load().unwrap_or(0);
        let preview = Piece::new(randomizer.next());
        tracing::debug!("Engine created, high score {}", high_score);

        Self {
            board: Board::new(),
            active: None,
            preview,
            randomizer,
            score: Score::new(high_score),
            state: GameState::Ready,
            last_action: None,
            store,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current falling piece
    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    /// Next piece to spawn
    pub fn preview(&self) -> &Piece {
        &self.preview
    }

    pub fn score(&self) -> u64 {
        self.score.points
    }

    pub fn high_score(&self) -> u64 {
        self.score.high_score
    }

    /// Total lines cleared this game
    pub fn lines(&self) -> u32 {
        self.score.lines
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    pub fn last_action(&self) -> Option<&'static str> {
        self.last_action
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the store, e.g. to start a new game with it
    pub fn into_store(self) -> S {
        self.store
    }

    /// Promote the preview piece to active at the spawn position.
    ///
    /// Returns the new active piece, or None if it could not be placed and the
    /// game ended.
    pub fn spawn_piece(&mut self) -> Option<&Piece> {
        if self.is_game_over() {
            return None;
        }

        let piece = self.preview.spawned(self.board.width());
        if self.check_collision(piece.x, piece.y, &piece.shape) {
            tracing::debug!("Spawn of {:?} blocked at ({}, {})", piece.kind, piece.x, piece.y);
            self.active = None;
            self.game_over();
            return None;
        }

        tracing::debug!("Spawned {:?} at ({}, {})", piece.kind, piece.x, piece.y);
        self.preview = Piece::new(self.randomizer.next());
        self.state = GameState::Playing;
        self.active = Some(piece);
        self.active.as_ref()
    }

    /// Whether `shape` with its top-left at (x, y) would collide
    pub fn check_collision(&self, x: i32, y: i32, shape: &Shape) -> bool {
        self.board.collides(x, y, shape)
    }

    /// Try to shift the active piece, returns true if it moved
    pub fn move_piece(&mut self, dx: i32, dy: i32) -> bool {
        if self.is_game_over() {
            return false;
        }
        match &mut self.active {
            Some(piece) => piece.try_move(dx, dy, &self.board),
            None => false,
        }
    }

    /// Try to rotate the active piece clockwise, returns true if it rotated
    pub fn rotate_piece(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        match &mut self.active {
            Some(piece) => piece.try_rotate(&self.board),
            None => false,
        }
    }

    /// Lock the active piece onto the board, clear lines and spawn the next.
    ///
    /// Returns false if the piece locked partly above the board, which ends
    /// the game. Blocks already inside the board stay written in that case.
    pub fn lock_piece(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        let Some(piece) = self.active.take() else {
            return false;
        };

        let mut overflow = false;
        for (row, col) in piece.block_positions() {
            if row < 0 {
                overflow = true;
            } else {
                self.board.fill(row, col);
            }
        }

        if overflow {
            tracing::debug!("{:?} locked above the board at ({}, {})", piece.kind, piece.x, piece.y);
            self.game_over();
            return false;
        }

        tracing::debug!("Locked {:?} at ({}, {})", piece.kind, piece.x, piece.y);
        self.clear_lines();
        self.spawn_piece();
        true
    }

    /// Remove completed rows and score them, returns the number cleared
    pub fn clear_lines(&mut self) -> u32 {
        if self.is_game_over() {
            return 0;
        }

        let cleared = self.board.clear_lines();
        if cleared > 0 {
            tracing::debug!("Cleared {} line(s)", cleared);
            self.add_score(cleared);
        }
        self.last_action = clear_name(cleared);
        cleared
    }

    /// Award points for a clear of `lines` rows
    pub fn add_score(&mut self, lines: u32) {
        if self.is_game_over() {
            return;
        }
        self.score.add_clear(lines);
        self.update_high_score();
    }

    /// One gravity step: fall one row, or lock if the piece can't move
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != GameState::Playing {
            return TickOutcome::Idle;
        }
        if self.move_piece(0, 1) {
            return TickOutcome::Fell;
        }
        if self.lock_piece() && !self.is_game_over() {
            TickOutcome::Locked
        } else {
            TickOutcome::GameOver
        }
    }

    /// Process an input action
    pub fn process_action(&mut self, action: Action) {
        if self.state != GameState::Playing {
            return;
        }
        match action {
            Action::MoveLeft => {
                self.move_piece(-1, 0);
            }
            Action::MoveRight => {
                self.move_piece(1, 0);
            }
            Action::SoftDrop => {
                self.move_piece(0, 1);
            }
            Action::Rotate => {
                self.rotate_piece();
            }
        }
    }

    /// Persist a beaten high score
    fn update_high_score(&mut self) {
        if !self.score.update_high_score() {
            return;
        }
        tracing::info!("New high score {}", self.score.high_score);
        if let Err(e) = self.store.save(self.score.high_score) {
            tracing::warn!("Could not save high score: {}", e);
        }
    }

    fn game_over(&mut self) {
        self.update_high_score();
        self.state = GameState::GameOver;
        tracing::info!(
            "Game over, score {} ({} lines), high score {}",
            self.score.points,
            self.score.lines,
            self.score.high_score
        );
    }
}

impl Default for GameEngine<MemoryStore> {
    fn default() -> Self {
        Self::new(MemoryStore::new())
    }
}
