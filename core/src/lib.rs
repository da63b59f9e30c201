use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use coin::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use types::*;
pub use view::*;

mod coin;
mod error;
mod generator;
mod session;
mod types;
mod view;

/// Board shape. The side must be a power of two so that the linear cell
/// indices form a space closed under XOR; that closure is what lets a single
/// corrective flip address any key square.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub side: Coord,
}

impl BoardConfig {
    /// Largest side whose linear indices still fit a `CellIndex`.
    pub const MAX_SIDE: Coord = 16;

    pub const fn new_unchecked(side: Coord) -> Self {
        Self { side }
    }

    pub fn new(side: Coord) -> Result<Self> {
        if side == 0 || side > Self::MAX_SIDE || !side.is_power_of_two() {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self::new_unchecked(side))
    }

    /// 4x4, for quick games.
    pub const fn mini() -> Self {
        Self { side: 4 }
    }

    /// The classic chessboard of 64 coins.
    pub const fn classic() -> Self {
        Self { side: 8 }
    }

    /// 16x16, the largest addressable board.
    pub const fn grand() -> Self {
        Self { side: 16 }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.side, self.side)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::classic()
    }
}

/// Square grid of coins. The only mutation the board offers is toggling a
/// single cell; everything else about the game flows through [`GameSession`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    coins: Array2<Coin>,
}

impl Board {
    pub fn from_coins(coins: Array2<Coin>) -> Result<Self> {
        let (rows, cols) = coins.dim();
        if rows != cols {
            return Err(GameError::InvalidBoardShape);
        }
        let side: Coord = cols.try_into().map_err(|_| GameError::InvalidBoardShape)?;
        BoardConfig::new(side)?;
        Ok(Self { coins })
    }

    pub fn all_tails(config: BoardConfig) -> Self {
        Self {
            coins: Array2::default((config.side as usize, config.side as usize)),
        }
    }

    /// Builds a board from row-major bits, 0 = Tails, anything else = Heads.
    pub fn from_bits(side: Coord, bits: &[u8]) -> Result<Self> {
        let config = BoardConfig::new(side)?;
        if bits.len() != config.total_cells() as usize {
            return Err(GameError::InvalidBoardShape);
        }
        let coins = Array2::from_shape_fn((side as usize, side as usize), |(x, y)| {
            let index = coords_to_index((x as Coord, y as Coord), side);
            Coin::from(bits[index as usize] != 0)
        });
        Ok(Self { coins })
    }

    pub fn side(&self) -> Coord {
        self.coins.dim().0.try_into().unwrap()
    }

    pub fn config(&self) -> BoardConfig {
        BoardConfig::new_unchecked(self.side())
    }

    pub fn cell_count(&self) -> CellCount {
        self.coins.len().try_into().unwrap()
    }

    pub fn validate_index(&self, index: CellIndex) -> Result<CellIndex> {
        if (index as CellCount) < self.cell_count() {
            Ok(index)
        } else {
            Err(GameError::InvalidCell)
        }
    }

    pub fn coin_at(&self, index: CellIndex) -> Coin {
        self[index]
    }

    /// Flips the coin at `index`, returning the face now showing.
    pub fn toggle(&mut self, index: CellIndex) -> Coin {
        let (x, y) = index_to_coords(index, self.side());
        let flipped = self.coins[(x as usize, y as usize)].toggled();
        self.coins[(x as usize, y as usize)] = flipped;
        flipped
    }

    pub fn heads_indices(&self) -> impl Iterator<Item = CellIndex> + '_ {
        let side = self.side();
        self.coins
            .indexed_iter()
            .filter(|(_, coin)| coin.is_heads())
            .map(move |((x, y), _)| coords_to_index((x as Coord, y as Coord), side))
    }

    /// XOR-fold of the Heads indices. Toggling cell `i` changes this value by
    /// exactly `i`, since every other term cancels against itself.
    pub fn checksum(&self) -> CellIndex {
        self.heads_indices().fold(0, |acc, index| acc ^ index)
    }

    /// The one cell whose toggle rewrites [`Board::checksum`] into `key`.
    /// When the board already encodes the key this degenerates to cell 0,
    /// which contributes nothing to the fold, so the mandatory flip is safe.
    pub fn corrective_flip(&self, key: CellIndex) -> CellIndex {
        key ^ self.checksum()
    }
}

impl Index<CellIndex> for Board {
    type Output = Coin;

    fn index(&self, index: CellIndex) -> &Self::Output {
        let (x, y) = index_to_coords(index, self.side());
        &self.coins[(x as usize, y as usize)]
    }
}

impl Index<Coord2> for Board {
    type Output = Coin;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.coins[(x as usize, y as usize)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SelectOutcome {
    NoChange,
    Changed,
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConfirmOutcome {
    NoChange,
    Started,
    Flipped,
    Won,
    Lost,
}

impl ConfirmOutcome {
    pub const fn has_update(self) -> bool {
        use ConfirmOutcome::*;
        match self {
            NoChange => false,
            Started => true,
            Flipped => true,
            Won => true,
            Lost => true,
        }
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_of_all_tails_is_zero() {
        let board = Board::all_tails(BoardConfig::classic());

        assert_eq!(board.checksum(), 0);
    }

    #[test]
    fn checksum_of_a_single_head_is_its_index() {
        for index in [0, 1, 5, 42, 63] {
            let mut board = Board::all_tails(BoardConfig::classic());
            board.toggle(index);

            assert_eq!(board.checksum(), index);
        }
    }

    #[test]
    fn checksum_is_stable_without_mutation() {
        let setup = RandomSetupGenerator::new(11).generate(BoardConfig::classic());

        assert_eq!(setup.board().checksum(), setup.board().checksum());
    }

    #[test]
    fn toggling_a_cell_shifts_the_checksum_by_its_index() {
        let setup = RandomSetupGenerator::new(3).generate(BoardConfig::classic());
        let before = setup.board().checksum();

        for index in 0..64 {
            let mut board = setup.board().clone();
            board.toggle(index);

            assert_eq!(board.checksum(), before ^ index);
        }
    }

    #[test]
    fn corrective_flip_forces_the_checksum_to_the_key() {
        for seed in 0..8 {
            let setup = RandomSetupGenerator::new(seed).generate(BoardConfig::classic());
            for key in 0..64 {
                let mut board = setup.board().clone();
                board.toggle(board.corrective_flip(key));

                assert_eq!(board.checksum(), key);
            }
        }
    }

    #[test]
    fn corrective_flip_holds_on_every_board_size() {
        for config in [BoardConfig::mini(), BoardConfig::classic(), BoardConfig::grand()] {
            let setup = RandomSetupGenerator::new(99).generate(config);
            let key = (config.total_cells() - 1) as CellIndex;
            let mut board = setup.board().clone();
            board.toggle(board.corrective_flip(key));

            assert_eq!(board.checksum(), key);
        }
    }

    #[test]
    fn config_rejects_unaddressable_sides() {
        for side in [0, 3, 6, 9, 17, 32] {
            assert_eq!(BoardConfig::new(side), Err(GameError::InvalidBoardShape));
        }
        for side in [1, 2, 4, 8, 16] {
            assert!(BoardConfig::new(side).is_ok());
        }
    }

    #[test]
    fn from_bits_places_heads_in_row_major_order() {
        let mut bits = [0u8; 64];
        bits[9] = 1;
        let board = Board::from_bits(8, &bits).unwrap();

        assert_eq!(board[(1, 1)], Coin::Heads);
        assert_eq!(board.coin_at(9), Coin::Heads);
        assert_eq!(board.heads_indices().collect::<Vec<_>>(), vec![9]);
    }

    #[test]
    fn from_bits_rejects_mismatched_lengths() {
        assert_eq!(
            Board::from_bits(8, &[0u8; 63]),
            Err(GameError::InvalidBoardShape)
        );
    }

    #[test]
    fn validate_index_rejects_out_of_range_cells() {
        let board = Board::all_tails(BoardConfig::mini());

        assert_eq!(board.validate_index(15), Ok(15));
        assert_eq!(board.validate_index(16), Err(GameError::InvalidCell));
    }
}
