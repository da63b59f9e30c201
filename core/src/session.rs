use chrono::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Intro -> Encode
/// - Encode -> Decode
/// - Decode -> Result
///
/// plus the unconditional restart, which lands straight on Encode.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    /// Scenario explanation, nothing on the table yet
    Intro,
    /// Player 1 sees the key and owes exactly one flip
    Encode,
    /// Player 2 sees only the coins and owes a guess
    Decode,
    /// Guess measured against the key, terminal until restart
    Result,
}

impl Phase {
    pub const fn is_initial(self) -> bool {
        match self {
            Self::Intro => true,
            Self::Encode => false,
            Self::Decode => false,
            Self::Result => false,
        }
    }

    pub const fn is_final(self) -> bool {
        match self {
            Self::Intro => false,
            Self::Encode => false,
            Self::Decode => false,
            Self::Result => true,
        }
    }

    /// Whether the key square may be shown to whoever is looking. Player 2's
    /// turn is the only played phase that keeps it secret.
    pub const fn key_visible(self) -> bool {
        match self {
            Self::Intro => false,
            Self::Encode => true,
            Self::Decode => false,
            Self::Result => true,
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Intro
    }
}

/// A single game from scenario intro to reveal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    board: Board,
    key: CellIndex,
    phase: Phase,
    selection: Option<CellIndex>,
    flipped: Option<CellIndex>,
    guess: Option<CellIndex>,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl GameSession {
    pub fn new(setup: GameSetup) -> Self {
        let (board, key) = setup.into_parts();
        Self {
            board,
            key,
            phase: Default::default(),
            selection: None,
            flipped: None,
            guess: None,
            started_at: None,
            ended_at: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn key(&self) -> CellIndex {
        self.key
    }

    pub fn selection(&self) -> Option<CellIndex> {
        self.selection
    }

    /// The cell Player 1 flipped, recorded once the flip is confirmed.
    pub fn flipped_cell(&self) -> Option<CellIndex> {
        self.flipped
    }

    pub fn guess(&self) -> Option<CellIndex> {
        self.guess
    }

    pub fn ended(&self) -> bool {
        self.phase.is_final()
    }

    /// `Some(true)` for a win, populated once the game reaches the reveal.
    pub fn victory(&self) -> Option<bool> {
        match (self.phase, self.guess) {
            (Phase::Result, Some(guess)) => Some(guess == self.key),
            _ => None,
        }
    }

    /// How many seconds have passed since the game started, 0 if it hasn't
    pub fn elapsed_secs(&self) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or_else(Utc::now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    /// Record the active player's choice for the current phase. Re-selecting
    /// the same cell reports no change.
    pub fn select_cell(&mut self, index: CellIndex) -> Result<SelectOutcome> {
        use SelectOutcome::*;

        let index = self.board.validate_index(index)?;

        Ok(match self.phase {
            Phase::Intro => NoChange,
            Phase::Encode | Phase::Decode => {
                if self.selection == Some(index) {
                    NoChange
                } else {
                    self.selection = Some(index);
                    log::trace!("Cell {} selected during {:?}", index, self.phase);
                    Changed
                }
            }
            Phase::Result => return Err(GameError::AlreadyEnded),
        })
    }

    /// Confirm the current phase. With nothing selected during Encode or
    /// Decode this is a no-op and the session stays where it is.
    pub fn confirm_phase(&mut self) -> Result<ConfirmOutcome> {
        use ConfirmOutcome::*;

        Ok(match self.phase {
            Phase::Intro => {
                self.advance(Phase::Encode);
                self.started_at = Some(Utc::now());
                Started
            }
            Phase::Encode => match self.selection {
                None => NoChange,
                Some(index) => {
                    let face = self.board.toggle(index);
                    self.flipped = Some(index);
                    self.advance(Phase::Decode);
                    log::debug!("Cell {} flipped, now showing {:?}", index, face);
                    Flipped
                }
            },
            Phase::Decode => match self.selection {
                None => NoChange,
                Some(index) => {
                    self.guess = Some(index);
                    self.advance(Phase::Result);
                    self.ended_at = Some(Utc::now());
                    if index == self.key { Won } else { Lost }
                }
            },
            Phase::Result => return Err(GameError::AlreadyEnded),
        })
    }

    /// Throw everything away and start over on a fresh setup. Restart lands
    /// directly on the flip phase; the intro is only shown once.
    pub fn restart(&mut self, setup: GameSetup) {
        *self = Self::new(setup);
        self.advance(Phase::Encode);
        self.started_at = Some(Utc::now());
    }

    /// The flip Player 1 should make: the cell that rewrites the board
    /// checksum into the key. Only meaningful while the flip is still owed.
    pub fn solve_flip(&self) -> Option<CellIndex> {
        match self.phase {
            Phase::Encode => Some(self.board.corrective_flip(self.key)),
            _ => None,
        }
    }

    /// The guess Player 2 should make; needs nothing but the coins.
    pub fn solve_guess(&self) -> Option<CellIndex> {
        match self.phase {
            Phase::Decode => Some(self.board.checksum()),
            _ => None,
        }
    }

    // Selections never survive a phase change.
    fn advance(&mut self, next: Phase) {
        self.selection = None;
        log::debug!("Phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }
}
