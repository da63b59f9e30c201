use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a front-end may show for the current turn. The key square is only
/// present when the phase allows it; Player 2's turn gets `None` no matter
/// who is asking, so a renderer cannot leak it by accident.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub side: Coord,
    pub coins: Array2<Coin>,
    pub phase: Phase,
    pub selection: Option<CellIndex>,
    pub key: Option<CellIndex>,
    pub guess: Option<CellIndex>,
    pub elapsed_secs: u32,
}

impl SessionView {
    pub fn from_session(session: &GameSession) -> Self {
        let side = session.board().side();
        let coins = Array2::from_shape_fn((side as usize, side as usize), |(x, y)| {
            session.board()[(x as Coord, y as Coord)]
        });

        Self {
            side,
            coins,
            phase: session.phase(),
            selection: session.selection(),
            key: if session.phase().key_visible() {
                Some(session.key())
            } else {
                None
            },
            guess: session.guess(),
            elapsed_secs: session.elapsed_secs(),
        }
    }

    pub fn cell_count(&self) -> CellCount {
        mult(self.side, self.side)
    }

    pub fn coin_at(&self, index: CellIndex) -> Coin {
        let (x, y) = index_to_coords(index, self.side);
        self.coins[(x as usize, y as usize)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_key(key: CellIndex) -> GameSession {
        let setup = GameSetup::new(Board::all_tails(BoardConfig::classic()), key).unwrap();
        GameSession::new(setup)
    }

    #[test]
    fn key_is_visible_to_the_flipping_player() {
        let mut session = session_with_key(31);
        session.confirm_phase().unwrap();

        let view = SessionView::from_session(&session);

        assert_eq!(view.phase, Phase::Encode);
        assert_eq!(view.key, Some(31));
    }

    #[test]
    fn key_is_withheld_from_the_guessing_player() {
        let mut session = session_with_key(31);
        session.confirm_phase().unwrap();
        session.select_cell(4).unwrap();
        session.confirm_phase().unwrap();

        let view = SessionView::from_session(&session);

        assert_eq!(view.phase, Phase::Decode);
        assert_eq!(view.key, None);
    }

    #[test]
    fn reveal_exposes_key_and_guess_together() {
        let mut session = session_with_key(31);
        session.confirm_phase().unwrap();
        session.select_cell(4).unwrap();
        session.confirm_phase().unwrap();
        session.select_cell(27).unwrap();
        session.confirm_phase().unwrap();

        let view = SessionView::from_session(&session);

        assert_eq!(view.key, Some(31));
        assert_eq!(view.guess, Some(27));
    }

    #[test]
    fn view_mirrors_the_coins() {
        let mut session = session_with_key(2);
        session.confirm_phase().unwrap();
        session.select_cell(10).unwrap();
        session.confirm_phase().unwrap();

        let view = SessionView::from_session(&session);

        assert_eq!(view.coin_at(10), Coin::Heads);
        assert_eq!(view.coin_at(11), Coin::Tails);
        assert_eq!(view.cell_count(), 64);
    }
}
