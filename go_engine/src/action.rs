use serde::{Deserialize, Serialize};

use crate::board::Point;

/// A single move submitted by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Place { point: Point },
    Pass,
    MarkDead { point: Point },
    ProposeDraw,
    RequestScoring,
    Accept,
    Reject,
}

/// High-level phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Play,
    Endgame,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum ProposalKind {
    Draw,
    Scoring,
}
