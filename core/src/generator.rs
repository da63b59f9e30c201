use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// A board plus the key square hidden somewhere on it. Everything a new game
/// needs; the session never regenerates either on its own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSetup {
    board: Board,
    key: CellIndex,
}

impl GameSetup {
    pub fn new(board: Board, key: CellIndex) -> Result<Self> {
        if (key as CellCount) >= board.cell_count() {
            return Err(GameError::KeyOutOfRange);
        }
        Ok(Self { board, key })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn key(&self) -> CellIndex {
        self.key
    }

    pub(crate) fn into_parts(self) -> (Board, CellIndex) {
        (self.board, self.key)
    }
}

pub trait SetupGenerator {
    fn generate(self, config: BoardConfig) -> GameSetup;
}

/// Uniform random coins and a uniform random key, all from a fixed seed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomSetupGenerator {
    seed: u64,
}

impl RandomSetupGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl SetupGenerator for RandomSetupGenerator {
    fn generate(self, config: BoardConfig) -> GameSetup {
        use rand::prelude::*;

        let side = match BoardConfig::new(config.side) {
            Ok(config) => config.side,
            Err(_) => {
                log::warn!(
                    "Side {} is not addressable, falling back to the classic board",
                    config.side
                );
                BoardConfig::classic().side
            }
        };

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let coins = Array2::from_shape_simple_fn((side as usize, side as usize), || {
            Coin::from(rng.random_bool(0.5))
        });
        let board = Board { coins };
        let key = rng.random_range(0..board.cell_count()) as CellIndex;
        log::debug!("Generated a {0}x{0} setup from seed {1}", side, self.seed);

        GameSetup { board, key }
    }
}
