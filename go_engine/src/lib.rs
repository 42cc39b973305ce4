//! A minimal, dependency-free (besides serde/postcard) rules engine for Go.
//!
//! This crate is the "external collaborator" the session coordination layer
//! treats as a black box: legality, capture, simple ko, and scoring live
//! here, behind [`Game::apply`].

mod action;
mod board;
mod color;
mod error;
mod game;

pub use action::{Action, GameStatus};
pub use board::{Board, Point};
pub use color::Color;
pub use error::{DecodeError, RuleViolation};
pub use game::{Game, Prisoners};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_starts_white_to_play_at_version_zero() {
        let game = Game::new(9, 6.5);
        assert_eq!(game.version(), 0);
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.status(), GameStatus::Play);
    }

    #[test]
    fn placing_out_of_turn_is_rejected_and_does_not_bump_version() {
        let mut game = Game::new(9, 6.5);
        let err = game
            .apply(Color::Black, Action::Place { point: Point::new(0, 0) })
            .unwrap_err();
        assert_eq!(err, RuleViolation::NotYourTurn);
        assert_eq!(game.version(), 0);
    }

    #[test]
    fn placing_on_an_occupied_point_is_rejected() {
        let mut game = Game::new(9, 6.5);
        game.apply(Color::White, Action::Place { point: Point::new(4, 4) })
            .unwrap();
        let err = game
            .apply(Color::Black, Action::Place { point: Point::new(4, 4) })
            .unwrap_err();
        assert_eq!(err, RuleViolation::OccupiedPoint);
    }

    #[test]
    fn capturing_a_single_stone_increments_prisoners() {
        let mut game = Game::new(9, 6.5);
        // Surround a lone black stone at (1,1) with white, black passing in between.
        game.apply(Color::White, Action::Place { point: Point::new(0, 1) })
            .unwrap();
        game.apply(Color::Black, Action::Place { point: Point::new(1, 1) })
            .unwrap();
        game.apply(Color::White, Action::Place { point: Point::new(1, 0) })
            .unwrap();
        game.apply(Color::Black, Action::Place { point: Point::new(8, 8) })
            .unwrap();
        game.apply(Color::White, Action::Place { point: Point::new(2, 1) })
            .unwrap();
        game.apply(Color::Black, Action::Place { point: Point::new(7, 8) })
            .unwrap();
        game.apply(Color::White, Action::Place { point: Point::new(1, 2) })
            .unwrap();

        assert_eq!(game.board().get(Point::new(1, 1)), None);
        assert_eq!(game.prisoners().white, 1);
    }

    #[test]
    fn suicide_move_is_rejected() {
        let mut game = Game::new(9, 6.5);
        // Build a white ring around (1,1), black to move into it with nothing to capture.
        game.apply(Color::White, Action::Place { point: Point::new(0, 1) })
            .unwrap();
        game.apply(Color::Black, Action::Place { point: Point::new(8, 8) })
            .unwrap();
        game.apply(Color::White, Action::Place { point: Point::new(1, 0) })
            .unwrap();
        game.apply(Color::Black, Action::Place { point: Point::new(7, 8) })
            .unwrap();
        game.apply(Color::White, Action::Place { point: Point::new(2, 1) })
            .unwrap();
        game.apply(Color::Black, Action::Place { point: Point::new(6, 8) })
            .unwrap();
        game.apply(Color::White, Action::Place { point: Point::new(1, 2) })
            .unwrap();

        let err = game
            .apply(Color::Black, Action::Place { point: Point::new(1, 1) })
            .unwrap_err();
        assert_eq!(err, RuleViolation::Suicide);
    }

    #[test]
    fn two_consecutive_passes_enter_endgame() {
        let mut game = Game::new(9, 6.5);
        game.apply(Color::White, Action::Pass).unwrap();
        game.apply(Color::Black, Action::Pass).unwrap();
        assert_eq!(game.status(), GameStatus::Endgame);
    }

    #[test]
    fn scoring_proposal_requires_opponent_acceptance() {
        let mut game = Game::new(9, 6.5);
        game.apply(Color::White, Action::Pass).unwrap();
        game.apply(Color::Black, Action::Pass).unwrap();
        assert_eq!(game.status(), GameStatus::Endgame);

        game.apply(Color::White, Action::RequestScoring).unwrap();
        let err = game.apply(Color::White, Action::Accept).unwrap_err();
        assert_eq!(err, RuleViolation::CannotRespondToOwnProposal);

        game.apply(Color::Black, Action::Accept).unwrap();
        assert_eq!(game.status(), GameStatus::Complete);
        assert!(game.final_score().is_some());
    }

    #[test]
    fn encode_decode_round_trips() {
        let mut game = Game::new(9, 6.5);
        game.apply(Color::White, Action::Place { point: Point::new(2, 2) })
            .unwrap();
        let bytes = game.encode();
        let decoded = Game::decode(&bytes).unwrap();
        assert_eq!(decoded.version(), game.version());
        assert_eq!(decoded.board().get(Point::new(2, 2)), Some(Color::White));
    }
}
