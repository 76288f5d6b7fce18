//! Game state module - manages the complete game state
//!
//! This module ties together the board, pieces, spawner, scoring and the flip.
//! It owns the session phase, the fall timer, the clearing stage that follows
//! a line clear, and the lock/clear/flip/spawn sequence.

use log::{debug, info};

use crate::board::{Board, ClearedRows};
use crate::config::{ConfigError, EngineConfig};
use crate::gravity::{flip_board, FlipMeter, FlipPolicy};
use crate::pieces::{try_rotate, MinoOffset, Shape};
use crate::rng::Spawner;
use crate::scoring::{calculate_drop_score, calculate_level, calculate_line_score, get_drop_interval_ms};
use crate::types::*;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    /// Current orientation.
    pub shape: Shape,
    /// Board position of the matrix's top-left corner.
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// A new piece centred on the spawn edge for `gravity`.
    ///
    /// The matrix sits on row 0 under normal gravity and on the bottom row
    /// when gravity is inverted.
    pub fn spawn(kind: PieceKind, board_width: u8, board_height: u8, gravity: Gravity) -> Self {
        let shape = Shape::of(kind);
        let size = shape.size() as i8;
        let x = board_width as i8 / 2 - size / 2;
        let y = match gravity {
            Gravity::Down => 0,
            Gravity::Up => board_height as i8 - size,
        };
        Self { kind, shape, x, y }
    }

    /// Absolute board cells covered by the piece.
    pub fn minos(&self) -> [MinoOffset; 4] {
        self.shape.minos().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Check if all minos are at valid positions on the board
    pub fn is_valid(&self, board: &Board) -> bool {
        self.fits(board, 0, 0)
    }

    /// Whether the piece would still be valid after moving by (`dx`, `dy`).
    pub fn fits(&self, board: &Board, dx: i8, dy: i8) -> bool {
        self.minos()
            .iter()
            .all(|&(x, y)| board.is_valid(x + dx, y + dy))
    }
}

/// Sub-state of [`Phase::Playing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    /// A piece is falling and input is accepted.
    #[default]
    Falling,
    /// Rows were just cleared; the next spawn waits for the animation.
    Clearing { remaining_ms: u32 },
}

/// Emitted whenever a piece locks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    /// Cells written into the board.
    pub cells_locked: usize,
    /// Rows removed by the lock itself (not by a flip settle).
    pub lines_cleared: u32,
    pub cleared_rows: ClearedRows,
    /// Line-clear points awarded for this lock.
    pub score_delta: u32,
    pub flipped: bool,
}

/// What a call to [`GameState::tick`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The active piece fell one row.
    pub dropped: bool,
    pub locked: bool,
    pub lines_cleared: u32,
    pub flipped: bool,
    pub spawned: bool,
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: EngineConfig,
    board: Board,
    active: Option<Tetromino>,
    hold: Option<PieceKind>,
    can_hold: bool,
    spawner: Spawner,
    /// Seed the session was created with.
    seed: u32,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    phase: Phase,
    stage: Stage,
    gravity: Gravity,
    flip_meter: FlipMeter,
    flip_count: u32,
    score: u32,
    high_score: u32,
    new_high_score: bool,
    level: u32,
    lines: u32,
    drop_timer_ms: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a classic game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::build(EngineConfig::classic(), seed)
    }

    /// Create a game from a custom configuration.
    pub fn with_config(config: EngineConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    /// Seed the best score seen so far (usually loaded from disk).
    pub fn with_high_score(mut self, high_score: u32) -> Self {
        self.high_score = high_score;
        self
    }

    fn build(config: EngineConfig, seed: u32) -> Self {
        let spawner = Spawner::new(seed, config.spawn.clone());
        Self {
            board: Board::new(config.width, config.height),
            active: None,
            hold: None,
            can_hold: true,
            spawner,
            seed,
            episode_id: 0,
            phase: Phase::Start,
            stage: Stage::Falling,
            gravity: Gravity::Down,
            flip_meter: FlipMeter::default(),
            flip_count: 0,
            score: 0,
            high_score: 0,
            new_high_score: false,
            level: INITIAL_LEVEL,
            lines: 0,
            drop_timer_ms: 0,
            last_event: None,
            config,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Start {
            return false;
        }
        info!("session {} started (seed {})", self.episode_id, self.seed);
        self.phase = Phase::Playing;
        self.spawn_piece();
        true
    }

    /// Pause a running game or resume a paused one.
    ///
    /// Resuming zeroes the fall timer so paused wall time never turns into
    /// fall progress.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Playing => {
                self.phase = Phase::Paused;
                debug!("paused");
                true
            }
            Phase::Paused => {
                self.phase = Phase::Playing;
                self.drop_timer_ms = 0;
                debug!("resumed");
                true
            }
            Phase::Start | Phase::GameOver => false,
        }
    }

    /// Throw the current session away and start a new one.
    ///
    /// The piece stream continues from where it was; the high score is kept.
    pub fn restart(&mut self) -> bool {
        self.reset_session();
        self.episode_id = self.episode_id.wrapping_add(1);
        self.phase = Phase::Start;
        self.start()
    }

    /// Throw the current session away and go back to the start screen.
    pub fn go_home(&mut self) -> bool {
        if self.phase == Phase::Start {
            return false;
        }
        self.reset_session();
        self.phase = Phase::Start;
        info!("back to start screen");
        true
    }

    fn reset_session(&mut self) {
        self.board.clear();
        self.active = None;
        self.hold = None;
        self.can_hold = true;
        self.stage = Stage::Falling;
        self.gravity = Gravity::Down;
        self.flip_meter.reset();
        self.flip_count = 0;
        self.score = 0;
        self.new_high_score = false;
        self.level = INITIAL_LEVEL;
        self.lines = 0;
        self.drop_timer_ms = 0;
        self.last_event = None;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Playing, not clearing, with a piece in hand.
    pub fn is_live(&self) -> bool {
        self.phase == Phase::Playing && self.stage == Stage::Falling && self.active.is_some()
    }

    pub fn is_clearing(&self) -> bool {
        matches!(self.stage, Stage::Clearing { .. })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// The session that just ended beat the previous high score.
    pub fn is_new_high_score(&self) -> bool {
        self.new_high_score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn gravity(&self) -> Gravity {
        self.gravity
    }

    pub fn flip_count(&self) -> u32 {
        self.flip_count
    }

    /// Line-clear points banked towards the next flip.
    pub fn flip_progress(&self) -> u32 {
        self.flip_meter.since_last_flip()
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn next_piece(&self) -> PieceKind {
        self.spawner.peek()
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for puzzle setups and tests.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Current fall interval.
    pub fn drop_interval_ms(&self) -> u32 {
        get_drop_interval_ms(self.level, &self.config.timing)
    }

    pub fn snapshot_into(&self, out: &mut crate::snapshot::GameSnapshot) {
        use crate::snapshot::ActiveSnapshot;

        out.width = self.board.width();
        out.height = self.board.height();
        out.board.clear();
        out.board.extend_from_slice(self.board.cells());
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost = self.ghost_cells();
        out.next = self.spawner.peek();
        out.hold = self.hold;
        out.can_hold = self.can_hold;
        out.score = self.score;
        out.high_score = self.high_score;
        out.new_high_score = self.new_high_score;
        out.level = self.level;
        out.lines = self.lines;
        out.phase = self.phase;
        out.gravity = self.gravity;
        out.flip_count = self.flip_count;
        out.clearing = self.is_clearing();
        out.episode_id = self.episode_id;
    }

    pub fn snapshot(&self) -> crate::snapshot::GameSnapshot {
        let mut s = crate::snapshot::GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Spawn a new piece from the spawner.
    ///
    /// A spawn that collides ends the game.
    pub fn spawn_piece(&mut self) -> bool {
        let kind = self.spawner.draw();
        let piece = Tetromino::spawn(kind, self.board.width(), self.board.height(), self.gravity);

        if !piece.is_valid(&self.board) {
            debug!("spawn of {:?} blocked at ({}, {})", kind, piece.x, piece.y);
            self.end_game();
            return false;
        }

        self.active = Some(piece);
        self.stage = Stage::Falling;
        self.can_hold = true;
        self.drop_timer_ms = 0;
        true
    }

    fn end_game(&mut self) {
        self.active = None;
        self.stage = Stage::Falling;
        self.phase = Phase::GameOver;
        info!(
            "game over: score {} lines {} level {} flips {}",
            self.score, self.lines, self.level, self.flip_count
        );
        if self.score > self.high_score {
            info!("new high score {} (was {})", self.score, self.high_score);
            self.high_score = self.score;
            self.new_high_score = true;
        }
    }

    /// Try to move the active piece
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.is_live() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        if !active.fits(&self.board, dx, dy) {
            return false;
        }
        self.active = Some(Tetromino {
            x: active.x + dx,
            y: active.y + dy,
            ..active
        });
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Move one row in the gravity direction for a one-point bonus.
    ///
    /// A soft drop that cannot move does nothing; the fall timer locks the
    /// piece.
    pub fn soft_drop(&mut self) -> bool {
        if !self.try_move(0, self.gravity.dy()) {
            return false;
        }
        self.score = self.score.saturating_add(calculate_drop_score(1, false));
        true
    }

    /// Rows the active piece can fall before it rests.
    fn drop_distance(&self, piece: &Tetromino) -> i8 {
        let dy = self.gravity.dy();
        let mut distance: i8 = 0;
        while piece.fits(&self.board, 0, (distance + 1) * dy) {
            distance += 1;
        }
        distance
    }

    /// Drop the active piece to the floor and lock it
    pub fn hard_drop(&mut self) -> bool {
        if !self.is_live() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let distance = self.drop_distance(&active);
        self.active = Some(Tetromino {
            y: active.y + distance * self.gravity.dy(),
            ..active
        });
        self.score = self
            .score
            .saturating_add(calculate_drop_score(distance as u32, true));

        self.lock_piece();
        true
    }

    /// Rotate the active piece, kicking it free if the plain rotation collides.
    pub fn rotate(&mut self, clockwise: bool) -> bool {
        if !self.is_live() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        // O piece doesn't rotate
        if active.kind == PieceKind::O {
            return false;
        }

        let board = &self.board;
        let result = try_rotate(
            &active.shape,
            active.x,
            active.y,
            clockwise,
            self.gravity,
            |x, y| board.is_valid(x, y),
        );

        match result {
            Some((shape, (dx, dy))) => {
                self.active = Some(Tetromino {
                    shape,
                    x: active.x + dx,
                    y: active.y + dy,
                    ..active
                });
                true
            }
            None => false,
        }
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.rotate(true)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.rotate(false)
    }

    /// Swap active piece with hold piece
    ///
    /// Allowed once per spawned piece. With nothing held the active piece is
    /// stored and the next one spawns.
    pub fn hold(&mut self) -> bool {
        if !self.config.hold_enabled || !self.can_hold || !self.is_live() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        match self.hold.replace(active.kind) {
            Some(held) => {
                let piece =
                    Tetromino::spawn(held, self.board.width(), self.board.height(), self.gravity);
                if !piece.is_valid(&self.board) {
                    self.end_game();
                    return true;
                }
                self.active = Some(piece);
                self.drop_timer_ms = 0;
            }
            None => {
                self.active = None;
                if !self.spawn_piece() {
                    return true;
                }
            }
        }

        self.can_hold = false;
        true
    }

    /// Lock the active piece onto the board and handle line clears
    ///
    /// Runs the whole lock sequence: merge, clear, score, flip, then either
    /// enters the clearing stage or spawns the next piece.
    pub fn lock_piece(&mut self) -> Option<LockEvent> {
        let active = self.active.take()?;

        let cells_locked = self.board.merge_piece(&active.minos(), active.kind);
        let cleared_rows = self.board.clear_full_rows(self.gravity);
        let lines_cleared = cleared_rows.len() as u32;

        let score_level = if self.config.leveling {
            self.level
        } else {
            INITIAL_LEVEL
        };
        let score_delta = calculate_line_score(cleared_rows.len(), score_level);
        self.score = self.score.saturating_add(score_delta);
        self.add_lines(lines_cleared);

        let mut flipped = false;
        if let Some(policy) = self.config.flip {
            if self.flip_meter.record(score_delta, &policy) {
                self.flip(policy);
                flipped = true;
            }
        }

        debug!(
            "locked {:?}: {} lines, +{} (score {})",
            active.kind, lines_cleared, score_delta, self.score
        );

        let event = LockEvent {
            kind: active.kind,
            cells_locked,
            lines_cleared,
            cleared_rows,
            score_delta,
            flipped,
        };
        self.last_event = Some(event.clone());
        self.drop_timer_ms = 0;

        let delay = self.config.timing.clear_delay_ms;
        if lines_cleared > 0 && delay > 0 {
            self.stage = Stage::Clearing {
                remaining_ms: delay,
            };
        } else {
            self.spawn_piece();
        }

        Some(event)
    }

    fn add_lines(&mut self, lines: u32) {
        self.lines = self.lines.saturating_add(lines);
        if self.config.leveling {
            let level = calculate_level(self.lines, self.config.lines_per_level);
            if level != self.level {
                info!("level {}", level);
                self.level = level;
            }
        }
    }

    fn flip(&mut self, policy: FlipPolicy) {
        self.gravity = self.gravity.flipped();
        let report = flip_board(&mut self.board, self.gravity, policy.clear_band);
        self.add_lines(report.settle_cleared as u32);
        self.flip_count = self.flip_count.wrapping_add(1);
        info!(
            "board flipped (gravity {}, flip #{}, {} settle moves, {} rows cleared)",
            self.gravity.as_str(),
            self.flip_count,
            report.settle_moves,
            report.settle_cleared
        );
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Cells the active piece would occupy after a hard drop.
    pub fn ghost_cells(&self) -> Option<[MinoOffset; 4]> {
        let active = self.active?;
        let dy = self.drop_distance(&active) * self.gravity.dy();
        Some(active.minos().map(|(x, y)| (x, y + dy)))
    }

    /// Main game tick - advance timers and apply gravity
    ///
    /// At most one fall step per call; a piece that cannot fall locks.
    pub fn tick(&mut self, elapsed_ms: u32) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.phase != Phase::Playing {
            return outcome;
        }

        if let Stage::Clearing { remaining_ms } = self.stage {
            let remaining_ms = remaining_ms.saturating_sub(elapsed_ms);
            if remaining_ms > 0 {
                self.stage = Stage::Clearing { remaining_ms };
                return outcome;
            }
            outcome.spawned = self.spawn_piece();
            outcome.game_over = self.phase == Phase::GameOver;
            return outcome;
        }

        if self.active.is_none() {
            outcome.spawned = self.spawn_piece();
            outcome.game_over = self.phase == Phase::GameOver;
            return outcome;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms < self.drop_interval_ms() {
            return outcome;
        }
        self.drop_timer_ms = 0;

        if self.try_move(0, self.gravity.dy()) {
            outcome.dropped = true;
            return outcome;
        }

        if let Some(event) = self.lock_piece() {
            outcome.locked = true;
            outcome.lines_cleared = event.lines_cleared;
            outcome.flipped = event.flipped;
            outcome.spawned = self.active.is_some();
        }
        outcome.game_over = self.phase == Phase::GameOver;
        outcome
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate_cw(),
            GameAction::RotateCcw => self.rotate_ccw(),
            GameAction::Hold => self.hold(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => self.restart(),
            GameAction::Home => self.go_home(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
